//! Snapshot capture for mdsync.
//!
//! Each builder reads one aspect of engine state and packs it into
//! reusable buffers it owns, returning views that borrow those buffers:
//!
//! - [`ParticleSnapshotBuilder`]: positions (wrapped or unwrapped), ids, types
//! - [`BondSnapshotBuilder`]: deduplicated bond segments
//! - [`BoxSnapshotBuilder`]: cell edge vectors, origin and periodic lengths
//!
//! [`SnapshotSession`] bundles the three with their configuration. No
//! capture ever fails: missing engine state yields an empty snapshot.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bonds;
pub mod cell_box;
pub mod config;
pub mod particles;
pub mod session;

pub use bonds::BondSnapshotBuilder;
pub use cell_box::BoxSnapshotBuilder;
pub use config::{ConfigError, SessionConfig, MAX_CAPACITY};
pub use particles::ParticleSnapshotBuilder;
pub use session::SnapshotSession;

use mdsync_core::{ImageCounts, ImageWord, Vec3};

/// Image counts of atom `i`, if the field is present.
fn image_at<W: ImageWord>(images: Option<&[W]>, i: usize) -> Option<ImageCounts> {
    images.and_then(|img| img.get(i)).map(|w| w.decode())
}

fn narrow(p: Vec3) -> [f32; 3] {
    [p[0] as f32, p[1] as f32, p[2] as f32]
}
