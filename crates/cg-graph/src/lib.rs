//! `cg-graph` — city road graph, name resolvers, and shortest paths.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`graph`]    | `CityGraph` vertex/adjacency store, `VertexSlot`          |
//! | [`resolver`] | `NameResolver` trait, linear / tree / hashed resolvers    |
//! | [`router`]   | `Router` trait, `DijkstraRouter`                          |
//! | [`path`]     | `Path`                                                    |
//! | [`networks`] | `CityNetworks` — one store per resolver, fed in lock-step |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `CityNetworks::shortest_path_all` fans out via Rayon.     |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod error;
pub mod graph;
pub mod networks;
pub mod path;
pub mod resolver;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use graph::{CityGraph, EdgeRecord, VertexSlot};
pub use networks::{CityNetworks, PathComparison};
pub use path::Path;
pub use resolver::{HashedResolver, LinearResolver, NameResolver, ResolverKind, TreeResolver};
pub use router::{DijkstraRouter, Router};
