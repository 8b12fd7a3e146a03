//! `cg-core` — foundational types for the citygraph workspace.
//!
//! This crate is a dependency of every other `cg-*` crate.  It has no `cg-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `SlotId`, `EdgeId`                                      |
//! | [`geo`]       | `GeoPoint`, haversine distance                          |
//! | [`city`]      | `City`                                                  |
//! | [`route`]     | `Route`, `Metric`                                       |
//! | [`config`]    | `GrowthPolicy`, `LoadFactorMode`, `NetworkConfig`       |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod city;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod route;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use city::City;
pub use config::{GrowthPolicy, LoadFactorMode, NetworkConfig};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, SlotId};
pub use route::{Metric, Route};
