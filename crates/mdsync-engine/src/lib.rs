//! In-memory reference engine for mdsync.
//!
//! [`MemoryEngine`] implements the engine traits from `mdsync-core` over
//! plain vectors. It performs no dynamics: callers place atoms, bonds and
//! a cell directly, and scripts are recorded rather than interpreted. It
//! exists so the capture layer can be exercised and embedded without a
//! native engine, and it is what the C ABI in `mdsync-ffi` drives.
//!
//! [`MemoryLauncher`] opens fresh instances, for use as the launcher of
//! an `mdsync-bridge` `Bridge`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod atoms;
pub mod launcher;
pub mod memory;

pub use atoms::{BondLists, MemoryAtoms};
pub use launcher::MemoryLauncher;
pub use memory::{MemoryEngine, DEFAULT_TIMESTEP};
