//! Growth and network configuration.
//!
//! # Growth model
//!
//! Both the vertex table and the hash index grow by a **fixed increment**
//! rather than doubling.  Growth is checked after each insertion:
//!
//!   grow when  load(len, capacity) > load_threshold   or   len >= capacity
//!
//! `load` is computed according to [`LoadFactorMode`].  The `len >= capacity`
//! clause means a full table always grows, whatever the mode, so no insert
//! is ever refused.

use crate::{CoreError, CoreResult};

// ── LoadFactorMode ────────────────────────────────────────────────────────────

/// How the load ratio is computed before comparing it to the threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadFactorMode {
    /// `len as f64 / capacity as f64`.
    #[default]
    Real,
    /// `len / capacity` in integer arithmetic, then compared as a real.
    ///
    /// The quotient is 0 until the table is full, so in practice this grows
    /// only when `len == capacity`.
    Truncating,
}

// ── GrowthPolicy ──────────────────────────────────────────────────────────────

/// Sizing rules for a growable table.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthPolicy {
    /// Extra slots reserved on top of the number of records known up front.
    /// Default: 331.
    pub initial_spare: usize,

    /// Slots added per growth step.  Default: 617.
    pub increment: usize,

    /// Load ratio above which the table grows.  Default: 0.6.
    pub load_threshold: f64,

    pub load_mode: LoadFactorMode,
}

impl GrowthPolicy {
    pub const DEFAULT_SPARE: usize = 331;
    pub const DEFAULT_INCREMENT: usize = 617;
    pub const DEFAULT_THRESHOLD: f64 = 0.6;

    /// Policy that reproduces the integer-division load check.
    pub fn truncating() -> Self {
        Self { load_mode: LoadFactorMode::Truncating, ..Self::default() }
    }

    /// Initial capacity for a table expected to hold `expected` records.
    #[inline]
    pub fn initial_capacity(&self, expected: usize) -> usize {
        expected + self.initial_spare.max(1)
    }

    /// Load ratio of `len` records in `capacity` slots under this policy.
    pub fn load(&self, len: usize, capacity: usize) -> f64 {
        if capacity == 0 {
            return f64::INFINITY;
        }
        match self.load_mode {
            LoadFactorMode::Real => len as f64 / capacity as f64,
            LoadFactorMode::Truncating => (len / capacity) as f64,
        }
    }

    /// `true` if a table with `len` records in `capacity` slots must grow.
    #[inline]
    pub fn should_grow(&self, len: usize, capacity: usize) -> bool {
        len >= capacity || self.load(len, capacity) > self.load_threshold
    }

    /// Capacity after one growth step.
    #[inline]
    pub fn grown(&self, capacity: usize) -> usize {
        capacity + self.increment.max(1)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.increment == 0 {
            return Err(CoreError::Config("growth increment must be non-zero".into()));
        }
        if !(self.load_threshold > 0.0 && self.load_threshold <= 1.0) {
            return Err(CoreError::Config(format!(
                "load threshold {} outside (0, 1]",
                self.load_threshold
            )));
        }
        Ok(())
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            initial_spare:  Self::DEFAULT_SPARE,
            increment:      Self::DEFAULT_INCREMENT,
            load_threshold: Self::DEFAULT_THRESHOLD,
            load_mode:      LoadFactorMode::Real,
        }
    }
}

// ── NetworkConfig ─────────────────────────────────────────────────────────────

/// Configuration for a set of city stores.
///
/// Typically built by the application from its own settings file and passed
/// to the store constructors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    /// Growth rules for the vertex table of every store.
    pub vertices: GrowthPolicy,

    /// Growth rules for the hash index behind the hashed resolver.
    pub index: GrowthPolicy,

    /// Routes to a newly discovered city at or beyond this length (metres)
    /// are not forwarded into the stores.  Default: 300 km.
    pub discovery_cutoff_m: u32,
}

impl NetworkConfig {
    pub const DEFAULT_DISCOVERY_CUTOFF_M: u32 = 300_000;

    pub fn validate(&self) -> CoreResult<()> {
        self.vertices.validate()?;
        self.index.validate()
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            vertices:           GrowthPolicy::default(),
            index:              GrowthPolicy::default(),
            discovery_cutoff_m: Self::DEFAULT_DISCOVERY_CUTOFF_M,
        }
    }
}
