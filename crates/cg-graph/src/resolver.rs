//! Name → slot resolution strategies.
//!
//! # Pluggability
//!
//! [`CityGraph`](crate::CityGraph) resolves every city name through a
//! [`NameResolver`] chosen at construction.  The adjacency logic never knows
//! which one it holds:
//!
//! | Resolver           | Backing structure         | Lookup      |
//! |--------------------|---------------------------|-------------|
//! | [`LinearResolver`] | none — scans the slots    | O(n)        |
//! | [`HashedResolver`] | `OpenAddressingIndex`     | avg. O(1)   |
//! | [`TreeResolver`]   | `RedBlackTree`            | O(log n)    |

use std::fmt;

use cg_core::{NetworkConfig, SlotId};
use cg_index::{OpenAddressingIndex, RedBlackTree};

use crate::graph::VertexSlot;

/// Which resolver a store uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolverKind {
    Linear,
    Tree,
    Hashed,
}

impl ResolverKind {
    pub const ALL: [ResolverKind; 3] = [Self::Linear, Self::Tree, Self::Hashed];
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear scan",
            Self::Tree => "red/black tree index",
            Self::Hashed => "hash table index",
        })
    }
}

/// Pluggable name → slot lookup.
///
/// # Contract
///
/// - `register` is called exactly once per city, right after the store
///   appends it at `slot`, and only for names that did not yet resolve.
/// - `resolve` must return the slot passed to `register` for that name, or
///   `None` for names never registered.
///
/// Implementations must be `Send + Sync` so distinct stores can be queried
/// from different threads.
pub trait NameResolver: Send + Sync {
    /// Build an empty resolver sized for `expected` cities.
    fn with_config(expected: usize, config: &NetworkConfig) -> Self
    where
        Self: Sized;

    fn kind(&self) -> ResolverKind;

    /// Look up `name`.  `slots` is the store's vertex table, for resolvers
    /// that keep no index of their own.
    fn resolve(&self, name: &str, slots: &[VertexSlot]) -> Option<SlotId>;

    fn register(&mut self, name: &str, slot: SlotId);
}

// ── LinearResolver ────────────────────────────────────────────────────────────

/// Unindexed resolver: compares `name` against every occupied slot in order.
#[derive(Clone, Debug, Default)]
pub struct LinearResolver;

impl NameResolver for LinearResolver {
    fn with_config(_expected: usize, _config: &NetworkConfig) -> Self {
        LinearResolver
    }

    fn kind(&self) -> ResolverKind {
        ResolverKind::Linear
    }

    fn resolve(&self, name: &str, slots: &[VertexSlot]) -> Option<SlotId> {
        slots
            .iter()
            .position(|s| s.city().name() == name)
            .map(|i| SlotId(i as u32))
    }

    fn register(&mut self, _name: &str, _slot: SlotId) {}
}

// ── HashedResolver ────────────────────────────────────────────────────────────

/// Resolver backed by the open-addressing hash index.
#[derive(Clone, Debug)]
pub struct HashedResolver {
    index: OpenAddressingIndex<SlotId>,
}

impl HashedResolver {
    pub fn index(&self) -> &OpenAddressingIndex<SlotId> {
        &self.index
    }
}

impl NameResolver for HashedResolver {
    fn with_config(expected: usize, config: &NetworkConfig) -> Self {
        let capacity = config.index.initial_capacity(expected);
        Self { index: OpenAddressingIndex::with_policy(capacity, config.index) }
    }

    fn kind(&self) -> ResolverKind {
        ResolverKind::Hashed
    }

    fn resolve(&self, name: &str, _slots: &[VertexSlot]) -> Option<SlotId> {
        self.index.get(name).copied()
    }

    fn register(&mut self, name: &str, slot: SlotId) {
        self.index.put(name, slot);
    }
}

impl Default for HashedResolver {
    fn default() -> Self {
        Self::with_config(0, &NetworkConfig::default())
    }
}

// ── TreeResolver ──────────────────────────────────────────────────────────────

/// Resolver backed by the red/black tree.
///
/// A tree needs a seed entry, so it is created by the first registration;
/// until then every lookup misses.
#[derive(Clone, Debug, Default)]
pub struct TreeResolver {
    tree: Option<RedBlackTree<SlotId>>,
}

impl TreeResolver {
    pub fn tree(&self) -> Option<&RedBlackTree<SlotId>> {
        self.tree.as_ref()
    }
}

impl NameResolver for TreeResolver {
    fn with_config(_expected: usize, _config: &NetworkConfig) -> Self {
        Self::default()
    }

    fn kind(&self) -> ResolverKind {
        ResolverKind::Tree
    }

    fn resolve(&self, name: &str, _slots: &[VertexSlot]) -> Option<SlotId> {
        self.tree.as_ref()?.get(name).copied()
    }

    fn register(&mut self, name: &str, slot: SlotId) {
        match &mut self.tree {
            Some(tree) => {
                tree.insert(name, slot);
            }
            None => self.tree = Some(RedBlackTree::new(name, slot)),
        }
    }
}
