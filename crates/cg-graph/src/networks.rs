//! One store per resolver, populated in lock-step.
//!
//! Importers and the city-discovery workflow feed records through
//! [`CityNetworks`], which forwards each one to a linear, a tree-indexed,
//! and a hash-indexed [`CityGraph`].  The three stores therefore hold the
//! same slots and edges and differ only in how they resolve names; a query
//! picks one with [`ResolverKind`].
//!
//! The stores share no state, so once population is finished they can be
//! queried concurrently (see [`CityNetworks::shortest_path_all`]).

use cg_core::{City, GeoPoint, Metric, NetworkConfig, Route};

use crate::graph::CityGraph;
use crate::path::Path;
use crate::resolver::{HashedResolver, LinearResolver, ResolverKind, TreeResolver};
use crate::GraphResult;

/// Run `$body` with `$g` bound to the store for `$kind`.
macro_rules! with_store {
    ($self:ident, $kind:expr, |$g:ident| $body:expr) => {
        match $kind {
            ResolverKind::Linear => {
                let $g = &$self.linear;
                $body
            }
            ResolverKind::Tree => {
                let $g = &$self.tree;
                $body
            }
            ResolverKind::Hashed => {
                let $g = &$self.hashed;
                $body
            }
        }
    };
}

/// The same query answered by each store.
#[derive(Debug)]
pub struct PathComparison {
    pub linear: GraphResult<Path>,
    pub tree:   GraphResult<Path>,
    pub hashed: GraphResult<Path>,
}

impl PathComparison {
    pub fn get(&self, kind: ResolverKind) -> &GraphResult<Path> {
        match kind {
            ResolverKind::Linear => &self.linear,
            ResolverKind::Tree => &self.tree,
            ResolverKind::Hashed => &self.hashed,
        }
    }

    /// `true` if every store produced the same answer.
    pub fn agree(&self) -> bool {
        self.linear == self.tree && self.tree == self.hashed
    }
}

/// Three parallel city stores, one per resolver.
#[derive(Clone, Debug)]
pub struct CityNetworks {
    linear: CityGraph<LinearResolver>,
    tree:   CityGraph<TreeResolver>,
    hashed: CityGraph<HashedResolver>,
    config: NetworkConfig,
}

impl CityNetworks {
    pub fn new(config: NetworkConfig) -> GraphResult<Self> {
        Self::from_records(Vec::new(), Vec::new(), config)
    }

    /// Build all three stores from an import: cities first, then routes.
    /// Routes with unknown endpoints are dropped (and counted) per store.
    pub fn from_records(
        cities: Vec<City>,
        routes: Vec<Route>,
        config: NetworkConfig,
    ) -> GraphResult<Self> {
        let mut networks = Self {
            linear: CityGraph::from_cities(cities.clone(), &config)?,
            tree:   CityGraph::from_cities(cities.clone(), &config)?,
            hashed: CityGraph::from_cities(cities, &config)?,
            config,
        };
        for route in routes {
            networks.add_route(route);
        }
        log::info!(
            "imported {} cities and {} routes ({} dropped)",
            networks.city_count(),
            networks.route_count(),
            networks.linear.dropped_routes()
        );
        Ok(networks)
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn linear(&self) -> &CityGraph<LinearResolver> {
        &self.linear
    }

    pub fn tree(&self) -> &CityGraph<TreeResolver> {
        &self.tree
    }

    pub fn hashed(&self) -> &CityGraph<HashedResolver> {
        &self.hashed
    }

    pub fn city_count(&self) -> usize {
        self.linear.city_count()
    }

    pub fn route_count(&self) -> usize {
        self.linear.route_count()
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Add `city` to every store.  `false` if the name was already stored.
    pub fn add_city(&mut self, city: City) -> bool {
        let added = self.linear.add_city(city.clone()).is_some();
        self.tree.add_city(city.clone());
        self.hashed.add_city(city);
        added
    }

    /// Add `route` to every store.  `false` if it was dropped.
    pub fn add_route(&mut self, route: Route) -> bool {
        let added = self.linear.add_route(route.clone());
        self.tree.add_route(route.clone());
        self.hashed.add_route(route);
        added
    }

    /// Integrate a newly discovered city and the routes found for it.
    ///
    /// Routes whose length reaches the configured discovery cutoff are not
    /// forwarded.  Returns the number of routes actually stored.
    pub fn add_discovered(&mut self, city: City, routes: Vec<Route>) -> usize {
        let name = city.name().to_owned();
        self.add_city(city);

        let cutoff = self.config.discovery_cutoff_m;
        let mut stored = 0;
        for route in routes {
            if route.distance_m >= cutoff {
                log::debug!(
                    "skipping discovered route {:?} -> {:?}: {} m beyond cutoff",
                    route.from,
                    route.to,
                    route.distance_m
                );
                continue;
            }
            if self.add_route(route) {
                stored += 1;
            }
        }
        log::info!("discovered {name:?}: {stored} routes stored");
        stored
    }

    /// Stored cities within `radius_m` (great-circle) of `position`, nearest
    /// first.  Used to choose which cities a new one should be connected to.
    pub fn candidates_near(&self, position: GeoPoint, radius_m: f64) -> Vec<&City> {
        let mut near: Vec<(f64, &City)> = self
            .linear
            .cities()
            .map(|c| (c.position().distance_m(position), c))
            .filter(|(d, _)| *d <= radius_m)
            .collect();
        near.sort_by(|a, b| a.0.total_cmp(&b.0));
        near.into_iter().map(|(_, c)| c).collect()
    }

    /// Move a city in every store.
    pub fn set_position(&mut self, name: &str, position: GeoPoint) -> GraphResult<()> {
        self.linear.set_position(name, position)?;
        self.tree.set_position(name, position)?;
        self.hashed.set_position(name, position)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn contains(&self, kind: ResolverKind, name: &str) -> bool {
        with_store!(self, kind, |g| g.contains(name))
    }

    pub fn city(&self, kind: ResolverKind, name: &str) -> GraphResult<&City> {
        with_store!(self, kind, |g| g.city(name))
    }

    pub fn children(&self, kind: ResolverKind, name: &str) -> GraphResult<Vec<&City>> {
        with_store!(self, kind, |g| g.children(name))
    }

    pub fn label(&self, kind: ResolverKind, from: &str, to: &str) -> GraphResult<Option<&Route>> {
        with_store!(self, kind, |g| g.label(from, to))
    }

    pub fn shortest_path(
        &self,
        kind: ResolverKind,
        from: &str,
        to: &str,
        metric: Metric,
    ) -> GraphResult<Path> {
        with_store!(self, kind, |g| g.shortest_path(from, to, metric))
    }

    /// Run the same query against all three stores.
    ///
    /// With the `parallel` feature the stores are searched concurrently.
    pub fn shortest_path_all(&self, from: &str, to: &str, metric: Metric) -> PathComparison {
        #[cfg(feature = "parallel")]
        let (linear, (tree, hashed)) = rayon::join(
            || self.linear.shortest_path(from, to, metric),
            || {
                rayon::join(
                    || self.tree.shortest_path(from, to, metric),
                    || self.hashed.shortest_path(from, to, metric),
                )
            },
        );

        #[cfg(not(feature = "parallel"))]
        let (linear, tree, hashed) = (
            self.linear.shortest_path(from, to, metric),
            self.tree.shortest_path(from, to, metric),
            self.hashed.shortest_path(from, to, metric),
        );

        PathComparison { linear, tree, hashed }
    }

    /// Check that a city resolves to the same slot in every store.
    pub fn consistent_slot(&self, name: &str) -> GraphResult<bool> {
        let slot = self.linear.slot_of(name)?;
        Ok(self.tree.resolve(name) == Some(slot) && self.hashed.resolve(name) == Some(slot))
    }
}
