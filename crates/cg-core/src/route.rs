//! Directed route records and the metric that selects their cost.

/// Which route field drives a shortest-path search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// Physical length in metres.
    ByDistance,
    /// Travel time in seconds.
    ByDuration,
}

/// A directed road between two cities, keyed by city name.
///
/// The store resolves `from` and `to` when the route is added; a route whose
/// endpoints do not resolve is dropped there, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub from:       String,
    pub to:         String,
    pub distance_m: u32,
    pub duration_s: u32,
}

impl Route {
    pub fn new(
        from:       impl Into<String>,
        to:         impl Into<String>,
        distance_m: u32,
        duration_s: u32,
    ) -> Self {
        Self {
            from: from.into(),
            to:   to.into(),
            distance_m,
            duration_s,
        }
    }

    /// Edge cost under `metric`.
    #[inline]
    pub fn cost(&self, metric: Metric) -> u32 {
        match metric {
            Metric::ByDistance => self.distance_m,
            Metric::ByDuration => self.duration_s,
        }
    }
}
