//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Callers go through the [`Router`] trait, so an alternative search (A*,
//! a heap-based Dijkstra for larger networks) can be swapped in without
//! touching the store.  The search only sees the store through name
//! resolution and its edge lists, so it runs unchanged against every
//! resolver.
//!
//! # Cost units
//!
//! Costs accumulate as `u64` (metres or seconds, per [`Metric`]); a
//! country-scale network cannot overflow them.

use cg_core::{EdgeId, Metric, SlotId};

use crate::graph::CityGraph;
use crate::path::Path;
use crate::resolver::NameResolver;
use crate::{GraphError, GraphResult};

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
pub trait Router {
    /// Compute the cheapest path from `from` to `to` under `metric`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::CityNotFound`] if either name does not resolve.
    ///   Checked before any search work.
    /// - [`GraphError::Unreachable`] if no sequence of routes connects them.
    ///
    /// `from == to` yields a trivial path rather than an error.
    fn route<R: NameResolver>(
        &self,
        graph: &CityGraph<R>,
        from: &str,
        to: &str,
        metric: Metric,
    ) -> GraphResult<Path>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm with a linear minimum scan.
///
/// Each of at most `V` rounds scans all unsettled vertices for the cheapest
/// one (first found wins ties), settles it, and relaxes every route leaving
/// it.  O(V² + E) overall, which is fine for a few thousand cities and
/// needs no heap.
///
/// Parallel routes between the same pair of cities are each relaxed, so the
/// cheapest one is used.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route<R: NameResolver>(
        &self,
        graph: &CityGraph<R>,
        from: &str,
        to: &str,
        metric: Metric,
    ) -> GraphResult<Path> {
        let origin = graph.slot_of(from)?;
        let target = graph.slot_of(to)?;
        log::trace!(
            "shortest path {from:?} -> {to:?} {metric:?} via {}",
            graph.resolver_kind()
        );

        if origin == target {
            let city = graph.city(from)?.clone();
            return Ok(Path::trivial(city, metric));
        }

        let prev_edge = dijkstra(graph, origin, target, metric);
        let path = reconstruct(graph, &prev_edge, origin, target, metric).ok_or_else(|| {
            GraphError::Unreachable {
                from: from.to_owned(),
                to:   to.to_owned(),
            }
        })?;
        log::trace!("{from:?} -> {to:?}: {} hops, cost {}", path.hops(), path.cost());
        Ok(path)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Run the search from `origin`, stopping once `target` is settled.
///
/// Returns the predecessor edge of every vertex; `EdgeId::INVALID` for the
/// origin and for vertices never reached.
fn dijkstra<R: NameResolver>(
    graph: &CityGraph<R>,
    origin: SlotId,
    target: SlotId,
    metric: Metric,
) -> Vec<EdgeId> {
    let n = graph.city_count();
    // cost[v] = best known cost to reach v; u64::MAX while unreached.
    let mut cost      = vec![u64::MAX; n];
    let mut settled   = vec![false; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    cost[origin.index()] = 0;

    for _ in 0..n {
        let Some(u) = (0..n)
            .filter(|&v| !settled[v] && cost[v] != u64::MAX)
            .min_by_key(|&v| cost[v])
        else {
            break; // everything reachable is settled
        };

        settled[u] = true;
        if u == target.index() {
            break;
        }

        for edge in graph.out_edges(SlotId(u as u32)) {
            let record = graph.edge(edge);
            let v = record.to.index();
            if settled[v] {
                continue;
            }
            let candidate = cost[u] + u64::from(record.route.cost(metric));
            if candidate < cost[v] {
                cost[v] = candidate;
                prev_edge[v] = edge;
            }
        }
    }

    prev_edge
}

/// Walk `prev_edge` back from `target` to `origin`.
///
/// `None` if `target` was never reached, or if the chain breaks before
/// arriving at `origin`.
fn reconstruct<R: NameResolver>(
    graph: &CityGraph<R>,
    prev_edge: &[EdgeId],
    origin: SlotId,
    target: SlotId,
    metric: Metric,
) -> Option<Path> {
    let mut path = Path {
        origin:      graph.city_at(origin)?.clone(),
        destination: graph.city_at(target)?.clone(),
        cities:      Vec::new(),
        distance_m:  0,
        duration_s:  0,
        metric,
    };

    let mut cur = target;
    // A valid chain has at most V - 1 edges.
    for _ in 0..prev_edge.len() {
        if cur == origin {
            return Some(path.finish());
        }
        let edge = *prev_edge.get(cur.index())?;
        if !edge.is_valid() {
            return None;
        }
        let record = graph.edge(edge);
        path.push_hop(graph.city_at(cur)?.clone(), &record.route);
        cur = record.from;
    }

    (cur == origin).then(|| path.finish())
}
