//! Strongly-typed identifiers and small shared aliases.

use std::fmt;

/// A Cartesian position or displacement in engine units.
pub type Vec3 = [f64; 3];

/// Engine timestep counter.
///
/// Engines report the step as an integer count starting at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepId(pub u64);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
