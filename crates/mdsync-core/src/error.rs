//! Error types shared between engines and the bridge.
//!
//! Captures never fail; these errors come from the lifecycle side: opening
//! an engine instance and feeding it commands or state.

use std::error::Error;
use std::fmt;

/// Errors raised while opening an engine instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LaunchError {
    /// The engine could not be opened.
    Unavailable {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "engine unavailable: {reason}"),
        }
    }
}

impl Error for LaunchError {}

/// Errors raised by a running engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// State was supplied before a simulation box exists.
    NoSimulationBox,
    /// An atom with this identifier already exists.
    DuplicateTag {
        /// The identifier, widened to `i64`.
        tag: i64,
    },
    /// No resident atom carries this identifier.
    UnknownTag {
        /// The identifier, widened to `i64`.
        tag: i64,
    },
    /// The engine rejected a script or command.
    ScriptFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A script file could not be read.
    Io {
        /// Path as given by the caller.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSimulationBox => write!(f, "no simulation box has been created"),
            Self::DuplicateTag { tag } => write!(f, "atom tag {tag} already exists"),
            Self::UnknownTag { tag } => write!(f, "no resident atom with tag {tag}"),
            Self::ScriptFailed { reason } => write!(f, "script failed: {reason}"),
            Self::Io { path, reason } => write!(f, "cannot read '{path}': {reason}"),
        }
    }
}

impl Error for EngineError {}
