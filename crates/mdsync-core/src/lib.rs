//! Core types and traits for mdsync.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! scalar element types, reusable [`ScalarBuffer`]s, borrowed
//! [`BufferView`]s handed to hosts, the packed periodic image encoding,
//! the snapshot types, and the traits an engine implements to be captured.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod id;
pub mod image;
pub mod scalar;
pub mod snapshot;
pub mod traits;
pub mod view;

pub use buffer::ScalarBuffer;
pub use error::{EngineError, LaunchError};
pub use id::{StepId, Vec3};
pub use image::{ImageCounts, ImageWord};
pub use scalar::{ScalarElement, ScalarType, TagWord};
pub use snapshot::{BondSnapshot, BoxSnapshot, ParticleSnapshot};
pub use traits::{AtomStore, BondTopology, Domain, Engine, Launcher};
pub use view::{BufferView, ScalarSlice};
