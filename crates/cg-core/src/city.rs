//! The `City` vertex payload.

use std::fmt;

use crate::GeoPoint;

/// A named location in the road network.
///
/// `name` is the lookup key every resolver indexes on, so it (together with
/// `address` and `country`) is fixed at construction.  Only the position may
/// change afterwards, and changing it never touches an index.
///
/// Two cities are equal when their names and coordinates match; address and
/// country are descriptive only.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    name:     String,
    address:  String,
    country:  String,
    position: GeoPoint,
}

impl City {
    pub fn new(
        name:     impl Into<String>,
        address:  impl Into<String>,
        country:  impl Into<String>,
        position: GeoPoint,
    ) -> Self {
        Self {
            name:    name.into(),
            address: address.into(),
            country: country.into(),
            position,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    pub fn set_position(&mut self, position: GeoPoint) {
        self.position = position;
    }
}

impl PartialEq for City {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.position == other.position
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.name, self.country, self.position)
    }
}
