//! Traits an engine implements so its state can be captured.
//!
//! The capture layer never owns engine state. It reads per-atom arrays
//! through [`AtomStore`], geometry through [`Domain`], and lifecycle
//! state through [`Engine`]. Every accessor that may be unavailable in a
//! partially initialised engine returns `Option`; captures treat `None`
//! as "nothing to publish".

use std::path::Path;

use crate::error::{EngineError, LaunchError};
use crate::id::{StepId, Vec3};
use crate::image::{ImageCounts, ImageWord};
use crate::scalar::TagWord;

/// Per-atom bond partner lists.
pub trait BondTopology {
    /// Identifier type of the partners.
    type Tag: TagWord;

    /// Global identifiers of the partners listed by local atom `atom`.
    ///
    /// Returns an empty slice for atoms without bonds or out-of-range indices.
    fn partners(&self, atom: usize) -> &[Self::Tag];
}

/// Per-atom storage of an engine.
///
/// Slices are indexed by local atom order. Field slices may be longer
/// than [`atom_count`](AtomStore::atom_count) (engines over-allocate);
/// only the first `atom_count` entries are meaningful.
pub trait AtomStore {
    /// Global identifier width of this engine build.
    type Tag: TagWord;
    /// Packed image flag word of this engine build.
    type Image: ImageWord;
    /// Bond partner storage.
    type Bonds: BondTopology<Tag = Self::Tag>;

    /// Number of atoms resident in local storage.
    fn atom_count(&self) -> usize;

    /// Wrapped positions inside the primary cell.
    fn positions(&self) -> &[Vec3];

    /// Global identifiers, if the engine keeps them.
    fn tags(&self) -> Option<&[Self::Tag]>;

    /// Per-atom type labels, if the engine keeps them.
    fn types(&self) -> Option<&[i32]>;

    /// Packed periodic image flags, if the engine keeps them.
    fn images(&self) -> Option<&[Self::Image]>;

    /// Total number of bonds in the system.
    fn total_bonds(&self) -> u64;

    /// Bond partner lists, if the engine keeps them.
    fn bonds(&self) -> Option<&Self::Bonds>;

    /// Local index of the atom carrying global identifier `tag`.
    fn local_index(&self, tag: Self::Tag) -> Option<usize>;
}

/// Simulation cell geometry and periodic arithmetic of an engine.
pub trait Domain {
    /// Whether this engine build provides the indexed minimum-image form.
    ///
    /// Resolved per domain type, never per call.
    const INDEXED_MINIMUM_IMAGE: bool = false;

    /// Recompute the eight cell corners from the current cell shape.
    fn update_corners(&mut self);

    /// Cell corners as of the last [`update_corners`](Domain::update_corners).
    ///
    /// Corner `k` sits at fractional coordinates `(k & 1, (k >> 1) & 1, (k >> 2) & 1)`.
    fn corners(&self) -> &[Vec3; 8];

    /// Periodic lengths along x, y and z.
    fn periodic_lengths(&self) -> Vec3;

    /// Undo periodic folding: map a wrapped position back to the image
    /// given by `image`.
    fn unmap(&self, position: Vec3, image: ImageCounts) -> Vec3;

    /// Two-argument minimum-image form: shortest periodic equivalent of `delta`.
    fn minimum_image(&self, delta: Vec3) -> Vec3;

    /// Indexed minimum-image form. `label` and `index` identify the caller
    /// in the engine's diagnostics.
    ///
    /// Defaults to the two-argument form.
    fn minimum_image_indexed(&self, label: &str, index: u32, delta: Vec3) -> Vec3 {
        let _ = (label, index);
        self.minimum_image(delta)
    }
}

/// A running simulation engine instance.
pub trait Engine {
    /// Per-atom storage type.
    type Atoms: AtomStore;
    /// Cell geometry type.
    type Domain: Domain;

    /// Per-atom storage, if the engine has created it.
    fn atoms(&self) -> Option<&Self::Atoms>;

    /// Cell geometry, if the engine has created it.
    fn domain(&self) -> Option<&Self::Domain>;

    /// Mutable cell geometry, for corner recomputation.
    fn domain_mut(&mut self) -> Option<&mut Self::Domain>;

    /// Whether every owner computes every bond independently.
    ///
    /// When `false`, each bond appears in both endpoints' partner lists.
    fn symmetric_bond_sharing(&self) -> bool;

    /// Whether a run is in progress.
    fn is_running(&self) -> bool;

    /// Current timestep number.
    fn current_step(&self) -> StepId;

    /// Integration timestep size.
    fn timestep(&self) -> f64;

    /// Execute a newline-separated script.
    fn execute(&mut self, script: &str) -> Result<(), EngineError>;

    /// Execute a script file.
    fn execute_file(&mut self, path: &Path) -> Result<(), EngineError>;
}

/// Opens engine instances.
pub trait Launcher {
    /// Engine type produced.
    type Engine: Engine;

    /// Open a fresh engine instance.
    fn launch(&mut self) -> Result<Self::Engine, LaunchError>;
}
