//! Shortest-path results.

use std::fmt;

use cg_core::{City, Metric, Route};

/// A route through the graph: the cities visited after leaving `origin`
/// (ending with `destination`), plus both metric totals.
///
/// Totals always cover distance *and* duration, whichever metric the search
/// minimised.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub origin:      City,
    pub destination: City,
    /// Visited cities in travel order, excluding `origin`.  Empty when
    /// origin and destination coincide.
    pub cities:      Vec<City>,
    /// Total length in metres.
    pub distance_m:  u64,
    /// Total travel time in seconds.
    pub duration_s:  u64,
    /// The metric the search minimised.
    pub metric:      Metric,
}

impl Path {
    /// A zero-length path that starts and ends at `city`.
    pub fn trivial(city: City, metric: Metric) -> Self {
        Self {
            origin: city.clone(),
            destination: city,
            cities: Vec::new(),
            distance_m: 0,
            duration_s: 0,
            metric,
        }
    }

    /// `true` if the origin is the destination.
    pub fn is_trivial(&self) -> bool {
        self.cities.is_empty()
    }

    /// Number of routes travelled.
    pub fn hops(&self) -> usize {
        self.cities.len()
    }

    /// Total under the metric that drove the search.
    pub fn cost(&self) -> u64 {
        match self.metric {
            Metric::ByDistance => self.distance_m,
            Metric::ByDuration => self.duration_s,
        }
    }

    /// City names from origin to destination inclusive.
    pub fn names(&self) -> Vec<&str> {
        std::iter::once(self.origin.name())
            .chain(self.cities.iter().map(City::name))
            .collect()
    }

    /// Account for one more travelled route arriving at `city`.
    ///
    /// Reconstruction walks backwards from the destination, so hops are
    /// pushed in reverse and [`finish`](Self::finish) restores travel order.
    pub(crate) fn push_hop(&mut self, city: City, route: &Route) {
        self.cities.push(city);
        self.distance_m += u64::from(route.distance_m);
        self.duration_s += u64::from(route.duration_s);
    }

    pub(crate) fn finish(mut self) -> Self {
        self.cities.reverse();
        self
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = (
            self.duration_s / 3_600,
            (self.duration_s % 3_600) / 60,
            self.duration_s % 60,
        );
        writeln!(f, "Origin: {}", self.origin.name())?;
        writeln!(f, "Destination: {}", self.destination.name())?;
        writeln!(f, "Distance: {:.1} km", self.distance_m as f64 / 1_000.0)?;
        writeln!(f, "Total duration: {h:02}:{m:02}:{s:02}")?;
        write!(f, "Path: {}", self.names().join(" -> "))
    }
}
