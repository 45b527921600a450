//! Error types for cell construction.

use std::fmt;

/// Errors arising from cell construction or deformation.
#[derive(Clone, Debug, PartialEq)]
pub enum CellError {
    /// Upper bound does not exceed lower bound along an axis.
    Degenerate {
        /// Axis index, 0 = x.
        axis: usize,
        /// Lower bound.
        lo: f64,
        /// Upper bound.
        hi: f64,
    },
    /// A bound or tilt factor is NaN or infinite.
    NonFinite {
        /// Which parameter was rejected.
        what: &'static str,
    },
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degenerate { axis, lo, hi } => {
                let name = ["x", "y", "z"].get(*axis).copied().unwrap_or("?");
                write!(f, "cell is degenerate along {name}: lo {lo} >= hi {hi}")
            }
            Self::NonFinite { what } => write!(f, "cell {what} must be finite"),
        }
    }
}

impl std::error::Error for CellError {}
