//! Engine lifecycle and snapshot publishing.
//!
//! [`Bridge`] owns one engine instance at a time together with the
//! [`SnapshotSession`](mdsync_snapshot::SnapshotSession) its captures are
//! written into. The host starts the engine, alternates [`Bridge::advance`]
//! with the `sync_*` calls, and stops it when done.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bridge;
pub mod script;

pub use bridge::Bridge;
