//! mdsync: snapshot extraction and buffer marshalling between a molecular
//! dynamics engine and a visualisation host.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all mdsync sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use mdsync::prelude::*;
//!
//! // Two bonded atoms either side of the x boundary of a 10-unit cube.
//! let launcher = MemoryLauncher::new().with_setup(|engine| {
//!     engine.create_box(PeriodicCell::cubic(10.0).unwrap());
//!     engine.create_atom(1, 1, [0.5, 5.0, 5.0]).unwrap();
//!     engine.create_atom(2, 1, [9.5, 5.0, 5.0]).unwrap();
//!     engine.create_bond(1, 2).unwrap();
//! });
//! let mut bridge = Bridge::new(launcher, SessionConfig::default()).unwrap();
//! bridge.start().unwrap();
//! bridge.advance(100, true, false).unwrap();
//!
//! let particles = bridge.sync_particles(false);
//! assert_eq!(particles.count, 2);
//! assert_eq!(particles.ids.scalar_type(), ScalarType::Int32);
//!
//! // The bond is drawn once, at its true length across the boundary.
//! let bonds = bridge.sync_bonds(false);
//! assert_eq!(bonds.count, 1);
//! assert_eq!(bonds.second.as_slice::<f32>(), Some(&[10.5, 5.0, 5.0][..]));
//!
//! let cell = bridge.sync_simulation_box();
//! assert_eq!(cell.lengths.as_slice::<f32>(), Some(&[10.0, 10.0, 10.0][..]));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mdsync-core` | Buffers, views, snapshots, image words, engine traits |
//! | [`cell`] | `mdsync-cell` | Periodic cell geometry and coordinate resolution |
//! | [`engine`] | `mdsync-engine` | In-memory reference engine and launcher |
//! | [`snapshot`] | `mdsync-snapshot` | Particle, bond and cell capture |
//! | [`bridge`] | `mdsync-bridge` | Engine lifecycle and publishing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and engine traits (`mdsync-core`).
///
/// Contains [`types::ScalarBuffer`], [`types::BufferView`], the snapshot
/// structs and the traits an engine implements ([`types::AtomStore`],
/// [`types::Domain`], [`types::Engine`]).
pub use mdsync_core as types;

/// Periodic cell geometry (`mdsync-cell`).
///
/// [`cell::PeriodicCell`] for orthogonal and triclinic cells,
/// [`cell::CoordinateResolver`] for unwrapping and minimum-image bonds.
pub use mdsync_cell as cell;

/// In-memory reference engine (`mdsync-engine`).
pub use mdsync_engine as engine;

/// Snapshot capture (`mdsync-snapshot`).
///
/// The three builders and [`snapshot::SnapshotSession`] bundling them.
pub use mdsync_snapshot as snapshot;

/// Engine lifecycle (`mdsync-bridge`).
pub use mdsync_bridge as bridge;

/// Common imports for typical mdsync usage.
///
/// ```rust
/// use mdsync::prelude::*;
/// ```
pub mod prelude {
    // Buffers and snapshots
    pub use mdsync_core::{
        BondSnapshot, BoxSnapshot, BufferView, ParticleSnapshot, ScalarBuffer, ScalarType,
    };

    // Engine traits
    pub use mdsync_core::{AtomStore, BondTopology, Domain, Engine, Launcher};

    // Errors
    pub use mdsync_core::{EngineError, LaunchError};
    pub use mdsync_snapshot::ConfigError;

    // Geometry
    pub use mdsync_cell::{CoordinateResolver, PeriodicCell};

    // Engine
    pub use mdsync_engine::{MemoryEngine, MemoryLauncher};

    // Capture and lifecycle
    pub use mdsync_bridge::Bridge;
    pub use mdsync_snapshot::{SessionConfig, SnapshotSession};
}
