//! The vertex/adjacency store.
//!
//! # Data layout
//!
//! Cities live in a vertex table (`Vec<VertexSlot>`) indexed by `SlotId`,
//! filled in insertion order and never compacted, so a `SlotId` handed out
//! once stays valid for the life of the store.
//!
//! Routes live in an edge arena (`Vec<EdgeRecord>`) indexed by `EdgeId`.
//! Each slot heads a singly linked list threaded through the arena:
//!
//! ```text
//! slot.head ─► edge ─next─► edge ─next─► edge ◄─ slot.tail
//! ```
//!
//! `tail` makes appends O(1); iteration follows `next` from `head`, so
//! children come back in the order their routes were added.
//!
//! # Growth
//!
//! The vertex table carries an explicit capacity managed by the configured
//! [`GrowthPolicy`]: a fixed increment is reserved whenever the load check
//! fires, instead of leaving reallocation to `Vec`'s doubling.

use cg_core::{City, EdgeId, GeoPoint, GrowthPolicy, Metric, NetworkConfig, Route, SlotId};

use crate::path::Path;
use crate::resolver::{LinearResolver, NameResolver, ResolverKind};
use crate::router::{DijkstraRouter, Router};
use crate::{GraphError, GraphResult};

// ── Vertex and edge records ───────────────────────────────────────────────────

/// One vertex: a city plus the head of its outgoing-route list.
#[derive(Clone, Debug)]
pub struct VertexSlot {
    city:       City,
    out_degree: u32,
    head:       Option<EdgeId>,
    tail:       Option<EdgeId>,
}

impl VertexSlot {
    fn new(city: City) -> Self {
        Self { city, out_degree: 0, head: None, tail: None }
    }

    pub fn city(&self) -> &City {
        &self.city
    }

    /// Number of routes leaving this city.
    pub fn out_degree(&self) -> usize {
        self.out_degree as usize
    }
}

/// A stored route with its endpoints already resolved to slots.
#[derive(Clone, Debug)]
pub struct EdgeRecord {
    pub route: Route,
    pub from:  SlotId,
    pub to:    SlotId,
    next:      Option<EdgeId>,
}

// ── CityGraph ─────────────────────────────────────────────────────────────────

/// Directed, labelled city graph.
///
/// `R` decides how names map to slots; see [`crate::resolver`].  Three
/// stores with different resolvers fed the same records hold identical
/// slots and edges.
///
/// # Example
///
/// ```
/// use cg_core::{City, GeoPoint, Metric, Route};
/// use cg_graph::{CityGraph, HashedResolver};
///
/// let mut g: CityGraph<HashedResolver> = CityGraph::new();
/// g.add_city(City::new("Girona", "", "ES", GeoPoint::new(41.98, 2.82)));
/// g.add_city(City::new("Figueres", "", "ES", GeoPoint::new(42.27, 2.96)));
/// assert!(g.add_route(Route::new("Girona", "Figueres", 40_000, 1_800)));
/// let path = g.shortest_path("Girona", "Figueres", Metric::ByDistance).unwrap();
/// assert_eq!(path.distance_m, 40_000);
/// ```
#[derive(Clone, Debug)]
pub struct CityGraph<R: NameResolver = LinearResolver> {
    slots:    Vec<VertexSlot>,
    edges:    Vec<EdgeRecord>,
    capacity: usize,
    policy:   GrowthPolicy,
    resolver: R,
    dropped:  usize,
}

impl<R: NameResolver> CityGraph<R> {
    /// An empty store with the default configuration.
    pub fn new() -> Self {
        let config = NetworkConfig::default();
        Self::build(0, &config)
    }

    /// An empty store sized for `expected` cities.
    pub fn with_config(expected: usize, config: &NetworkConfig) -> GraphResult<Self> {
        config.validate()?;
        Ok(Self::build(expected, config))
    }

    /// A store pre-populated with `cities`, in order.  Duplicate names after
    /// the first are ignored.
    pub fn from_cities(cities: Vec<City>, config: &NetworkConfig) -> GraphResult<Self> {
        let mut graph = Self::with_config(cities.len(), config)?;
        for city in cities {
            graph.add_city(city);
        }
        Ok(graph)
    }

    fn build(expected: usize, config: &NetworkConfig) -> Self {
        let capacity = config.vertices.initial_capacity(expected);
        Self {
            slots: Vec::with_capacity(capacity),
            edges: Vec::new(),
            capacity,
            policy: config.vertices,
            resolver: R::with_config(expected, config),
            dropped: 0,
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn city_count(&self) -> usize {
        self.slots.len()
    }

    pub fn route_count(&self) -> usize {
        self.edges.len()
    }

    /// Routes rejected by [`add_route`](Self::add_route) so far.
    pub fn dropped_routes(&self) -> usize {
        self.dropped
    }

    /// Reserved vertex-table capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn resolver_kind(&self) -> ResolverKind {
        self.resolver.kind()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Append `city` and return its slot, or `None` (no change) if a city
    /// with the same name is already stored.
    pub fn add_city(&mut self, city: City) -> Option<SlotId> {
        if self.resolve(city.name()).is_some() {
            log::debug!("city {:?} already stored; ignoring", city.name());
            return None;
        }

        let slot = SlotId(self.slots.len() as u32);
        self.resolver.register(city.name(), slot);
        self.slots.push(VertexSlot::new(city));

        if self.policy.should_grow(self.slots.len(), self.capacity) {
            let grown = self.policy.grown(self.capacity);
            log::debug!(
                "growing {} vertex table {} -> {} slots",
                self.resolver.kind(),
                self.capacity,
                grown
            );
            self.slots.reserve_exact(grown - self.slots.len());
            self.capacity = grown;
        }

        Some(slot)
    }

    /// Append `route` to its source city's list.
    ///
    /// A route naming a city that does not resolve is dropped: the store is
    /// left untouched, the drop is logged and counted, and `false` is
    /// returned.
    pub fn add_route(&mut self, route: Route) -> bool {
        let (from, to) = match (self.resolve(&route.from), self.resolve(&route.to)) {
            (Some(f), Some(t)) => (f, t),
            (f, _) => {
                let missing = if f.is_none() { &route.from } else { &route.to };
                log::warn!(
                    "dropping route {:?} -> {:?}: city {:?} not stored",
                    route.from,
                    route.to,
                    missing
                );
                self.dropped += 1;
                return false;
            }
        };

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(EdgeRecord { route, from, to, next: None });

        let slot = &mut self.slots[from.index()];
        match slot.tail {
            Some(tail) => self.edges[tail.index()].next = Some(id),
            None => slot.head = Some(id),
        }
        slot.tail = Some(id);
        slot.out_degree += 1;
        true
    }

    /// Move a city.  Names are the index key, so nothing else changes.
    pub fn set_position(&mut self, name: &str, position: GeoPoint) -> GraphResult<()> {
        let slot = self.slot_of(name)?;
        self.slots[slot.index()].city.set_position(position);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Resolve `name` through the configured resolver.
    #[inline]
    pub fn resolve(&self, name: &str) -> Option<SlotId> {
        self.resolver.resolve(name, &self.slots)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn slot_of(&self, name: &str) -> GraphResult<SlotId> {
        self.resolve(name)
            .ok_or_else(|| GraphError::CityNotFound(name.to_owned()))
    }

    pub fn city(&self, name: &str) -> GraphResult<&City> {
        Ok(&self.slots[self.slot_of(name)?.index()].city)
    }

    pub fn city_at(&self, slot: SlotId) -> Option<&City> {
        self.slots.get(slot.index()).map(VertexSlot::city)
    }

    pub fn vertex(&self, slot: SlotId) -> Option<&VertexSlot> {
        self.slots.get(slot.index())
    }

    /// All cities in slot (insertion) order.
    pub fn cities(&self) -> impl Iterator<Item = &City> + '_ {
        self.slots.iter().map(VertexSlot::city)
    }

    /// Destinations of every route leaving `name`, in insertion order.  A
    /// city with no routes yields an empty list.
    pub fn children(&self, name: &str) -> GraphResult<Vec<&City>> {
        let slot = self.slot_of(name)?;
        Ok(self
            .out_edges(slot)
            .map(|e| &self.slots[self.edges[e.index()].to.index()].city)
            .collect())
    }

    /// The first route stored from `from` to `to`, if any.
    ///
    /// Fails only when `from` does not resolve; an unknown `to` simply has
    /// no route leading to it.
    pub fn label(&self, from: &str, to: &str) -> GraphResult<Option<&Route>> {
        let slot = self.slot_of(from)?;
        Ok(self
            .routes_from_slot(slot)
            .find(|r| r.to == to))
    }

    /// Every route leaving `name`, in insertion order.
    pub fn routes_from(&self, name: &str) -> GraphResult<impl Iterator<Item = &Route> + '_> {
        let slot = self.slot_of(name)?;
        Ok(self.routes_from_slot(slot))
    }

    pub fn out_degree(&self, name: &str) -> GraphResult<usize> {
        Ok(self.slots[self.slot_of(name)?.index()].out_degree())
    }

    /// Shortest path under `metric` using the default [`DijkstraRouter`].
    pub fn shortest_path(&self, from: &str, to: &str, metric: Metric) -> GraphResult<Path> {
        DijkstraRouter.route(self, from, to, metric)
    }

    // ── Edge traversal ────────────────────────────────────────────────────

    /// `EdgeId`s of the routes leaving `slot`, following the list from its
    /// head.  An out-of-range slot yields nothing.
    pub fn out_edges(&self, slot: SlotId) -> impl Iterator<Item = EdgeId> + '_ {
        let head = self.slots.get(slot.index()).and_then(|s| s.head);
        std::iter::successors(head, move |e| self.edges[e.index()].next)
    }

    #[inline]
    pub fn edge(&self, edge: EdgeId) -> &EdgeRecord {
        &self.edges[edge.index()]
    }

    fn routes_from_slot(&self, slot: SlotId) -> impl Iterator<Item = &Route> + '_ {
        self.out_edges(slot).map(|e| &self.edges[e.index()].route)
    }
}

impl<R: NameResolver> Default for CityGraph<R> {
    fn default() -> Self {
        Self::new()
    }
}
