//! C-compatible status codes.
//!
//! [`MdStatus`] is a `repr(i32)` enum covering every failure the C ABI can
//! report. Conversions from the Rust error types (`EngineError`,
//! `LaunchError`, `ConfigError`, `CellError`) are provided.

use mdsync_cell::CellError;
use mdsync_core::{EngineError, LaunchError};
use mdsync_snapshot::ConfigError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MdStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or was already destroyed.
    InvalidHandle = -1,
    /// The bridge has no running engine.
    NotStarted = -2,
    /// The engine instance could not be opened.
    LaunchFailed = -3,
    /// The engine rejected a command or script.
    ScriptFailed = -4,
    /// A script file could not be read.
    IoError = -5,
    /// Atoms were supplied before a simulation box exists.
    NoSimulationBox = -6,
    /// An atom with this identifier already exists.
    DuplicateTag = -7,
    /// No resident atom carries this identifier.
    UnknownTag = -8,
    /// Session configuration validation error.
    ConfigError = -9,
    /// Cell bounds are degenerate or non-finite.
    InvalidCell = -10,
    /// An argument is null, out of range, or otherwise invalid.
    InvalidArgument = -18,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&EngineError> for MdStatus {
    fn from(e: &EngineError) -> Self {
        match e {
            EngineError::NoSimulationBox => MdStatus::NoSimulationBox,
            EngineError::DuplicateTag { .. } => MdStatus::DuplicateTag,
            EngineError::UnknownTag { .. } => MdStatus::UnknownTag,
            EngineError::ScriptFailed { .. } => MdStatus::ScriptFailed,
            EngineError::Io { .. } => MdStatus::IoError,
        }
    }
}

impl From<&LaunchError> for MdStatus {
    fn from(_e: &LaunchError) -> Self {
        MdStatus::LaunchFailed
    }
}

impl From<&ConfigError> for MdStatus {
    fn from(_e: &ConfigError) -> Self {
        MdStatus::ConfigError
    }
}

impl From<&CellError> for MdStatus {
    fn from(_e: &CellError) -> Self {
        MdStatus::InvalidCell
    }
}

/// Status code of a fallible result, as returned across the boundary.
pub(crate) fn code<E>(result: Result<(), E>) -> i32
where
    for<'e> MdStatus: From<&'e E>,
{
    match result {
        Ok(()) => MdStatus::Ok as i32,
        Err(e) => MdStatus::from(&e) as i32,
    }
}
