//! `cg-index` — string-keyed index primitives.
//!
//! Both indices map a city name to a small integer (a vertex slot) but know
//! nothing about graphs; `cg-graph` wraps them as name resolvers.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`hash`]   | `OpenAddressingIndex` — double hashing, fixed-step growth  |
//! | [`rbtree`] | `RedBlackTree` — arena-backed red/black BST                |

pub mod hash;
pub mod rbtree;


pub use hash::OpenAddressingIndex;
pub use rbtree::RedBlackTree;
