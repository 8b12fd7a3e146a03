//! Typed indices into a store's vertex table and edge arena.
//!
//! Both wrap a `u32`.  A store never holds more than `u32::MAX - 1` cities
//! or routes, which leaves `u32::MAX` free as the `INVALID` sentinel used by
//! predecessor arrays.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "#{}", self.0)
                } else {
                    f.write_str("#-")
                }
            }
        }
    };
}

typed_id! {
    /// Position of a city in a store's vertex table.  Assigned in insertion
    /// order and never reused.
    pub struct SlotId;
}

typed_id! {
    /// Index of a directed route record in a store's edge arena.
    pub struct EdgeId;
}
