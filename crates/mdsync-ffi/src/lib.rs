//! C ABI for mdsync.
//!
//! Bridges live behind opaque `u64` handles. Every exported function
//! returns an [`MdStatus`] code as `i32` and writes results through
//! caller-provided out-pointers. Snapshot views hand out raw addresses
//! of buffers owned by the bridge; they stay valid until the next call
//! on the same bridge handle.
//!
//! This is the only mdsync crate containing `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body, converting a panic into [`MdStatus::Panicked`].
macro_rules! ffi_guard {
    ($body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(status) => status,
            Err(_) => {
                tracing::error!("panic caught at the C boundary");
                $crate::status::MdStatus::Panicked as i32
            }
        }
    };
}

/// Lock a mutex, returning [`MdStatus::InternalError`] from the enclosing
/// FFI body if it is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::MdStatus::InternalError as i32,
        }
    };
}

pub mod bridge;
pub mod engine;
mod handle;
pub mod status;
pub mod types;

pub use status::MdStatus;
pub use types::{
    MdBondSnapshot, MdBoxSnapshot, MdBufferView, MdParticleSnapshot, MdScalarType, MdStatusInfo,
};
