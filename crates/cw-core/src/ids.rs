//! Strongly typed, zero-cost identifier wrappers.
//!
//! Internal ids (`AgentId`, `NodeId`, `EdgeId`, `KindId`) are dense indices
//! assigned by this workspace and used directly as `Vec` indices.  `RoadId`
//! is different: it is the stable identifier carried by the external road
//! data and is only ever used as a lookup key.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Generate a typed index wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent within its population.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a road-network node (a deduplicated segment endpoint).
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a road-network edge.  One edge per input segment.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Index of an agent kind (one population per kind).
    pub struct KindId(u16);
}

// ── RoadId ────────────────────────────────────────────────────────────────────

/// Stable road identifier carried by the network and population sources.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoadId(pub i64);

impl RoadId {
    /// Parse a road identifier from a tabular field.
    ///
    /// Accepts integer syntax (`"519"`) and float syntax (`"519.0"`,
    /// `"1.8081e4"`); fractional parts are truncated toward zero.
    pub fn parse(field: &str) -> CoreResult<RoadId> {
        let s = field.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Ok(RoadId(n));
        }
        match s.parse::<f64>() {
            Ok(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(RoadId(f.trunc() as i64)),
            _ => Err(CoreError::Parse(format!("invalid road id {s:?}"))),
        }
    }
}

impl fmt::Display for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "road {}", self.0)
    }
}

impl From<i64> for RoadId {
    #[inline]
    fn from(n: i64) -> Self {
        RoadId(n)
    }
}
