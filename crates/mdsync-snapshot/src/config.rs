//! Session configuration, validation, and error types.

use std::error::Error;
use std::fmt;

/// Label passed to the indexed minimum-image form unless configured otherwise.
pub const DEFAULT_IMAGE_LABEL: &str = "mdsync";

/// Largest particle or bond capacity whose `f32` triples fit in one
/// allocation.
pub const MAX_CAPACITY: usize = isize::MAX as usize / (3 * std::mem::size_of::<f32>());

// ── SessionConfig ──────────────────────────────────────────────────

/// Configuration for a [`SnapshotSession`](crate::SnapshotSession).
///
/// Capacities only pre-size buffers; captures grow them as needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Atoms to reserve position storage for. Default: 0.
    pub particle_capacity: usize,
    /// Bonds to reserve segment storage for. Default: 0.
    pub bond_capacity: usize,
    /// Caller label handed to the indexed minimum-image form. Default: `"mdsync"`.
    pub image_label: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            particle_capacity: 0,
            bond_capacity: 0,
            image_label: DEFAULT_IMAGE_LABEL.to_owned(),
        }
    }
}

impl SessionConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_label.trim().is_empty() {
            return Err(ConfigError::EmptyImageLabel);
        }
        for (what, value) in [
            ("particle", self.particle_capacity),
            ("bond", self.bond_capacity),
        ] {
            if value > MAX_CAPACITY {
                return Err(ConfigError::CapacityOverflow { what, value });
            }
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SessionConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `image_label` is empty or whitespace.
    EmptyImageLabel,
    /// A capacity exceeds [`MAX_CAPACITY`].
    CapacityOverflow {
        /// Which capacity.
        what: &'static str,
        /// The configured value.
        value: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImageLabel => write!(f, "image_label must not be empty"),
            Self::CapacityOverflow { what, value } => {
                write!(f, "{what} capacity {value} overflows buffer length")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn empty_label_rejected() {
        let cfg = SessionConfig {
            image_label: "  ".into(),
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyImageLabel));
    }

    #[test]
    fn overflowing_capacity_rejected() {
        let cfg = SessionConfig {
            bond_capacity: usize::MAX,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::CapacityOverflow {
                what: "bond",
                value: usize::MAX
            })
        );
    }

    #[test]
    fn unallocatable_capacity_rejected() {
        let cfg = SessionConfig {
            particle_capacity: usize::MAX / 3,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::CapacityOverflow {
                what: "particle",
                ..
            })
        ));
        let edge = SessionConfig {
            bond_capacity: MAX_CAPACITY,
            ..Default::default()
        };
        assert_eq!(edge.validate(), Ok(()));
        let over = SessionConfig {
            bond_capacity: MAX_CAPACITY + 1,
            ..Default::default()
        };
        assert!(over.validate().is_err());
    }
}
