//! The in-memory engine.

use std::path::Path;

use mdsync_cell::{PeriodicCell, Remap};
use mdsync_core::{
    AtomStore, Domain, Engine, EngineError, ImageCounts, ImageWord, StepId, TagWord, Vec3,
};

use crate::atoms::MemoryAtoms;

/// Timestep reported by a fresh engine.
pub const DEFAULT_TIMESTEP: f64 = 0.005;

/// A deterministic engine over plain vectors.
///
/// `T` is the identifier width, `I` the image flag word and `D` the cell
/// type. Until [`create_box`](MemoryEngine::create_box) is called the
/// engine has neither domain nor atom table, like a native engine before
/// its box is defined.
///
/// Bond storage follows the sharing flag at the time a bond is created:
/// without symmetric sharing each bond is listed by both endpoints, with
/// it only by the first.
#[derive(Debug)]
pub struct MemoryEngine<T = i32, I = i32, D = PeriodicCell> {
    domain: Option<D>,
    atoms: Option<MemoryAtoms<T, I>>,
    symmetric_bonds: bool,
    running: bool,
    step: StepId,
    timestep: f64,
    history: Vec<String>,
    rejected_keyword: Option<String>,
}

impl MemoryEngine {
    /// Engine with 32-bit identifiers and image words over a [`PeriodicCell`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: TagWord, I: ImageWord, D: Domain> Default for MemoryEngine<T, I, D> {
    fn default() -> Self {
        Self {
            domain: None,
            atoms: None,
            symmetric_bonds: false,
            running: false,
            step: StepId(0),
            timestep: DEFAULT_TIMESTEP,
            history: Vec::new(),
            rejected_keyword: None,
        }
    }
}

impl<T: TagWord, I: ImageWord, D: Domain> MemoryEngine<T, I, D> {
    /// Define the simulation cell, discarding any existing atoms.
    pub fn create_box(&mut self, domain: D) {
        self.domain = Some(domain);
        self.atoms = Some(MemoryAtoms::default());
    }

    /// Add an atom already folded into the cell, with explicit image counts.
    ///
    /// Returns the atom's local index.
    pub fn create_atom_folded(
        &mut self,
        tag: T,
        kind: i32,
        folded: Vec3,
        image: ImageCounts,
    ) -> Result<usize, EngineError> {
        let atoms = self.atoms.as_mut().ok_or(EngineError::NoSimulationBox)?;
        if atoms.contains(tag) {
            return Err(EngineError::DuplicateTag { tag: tag.to_i64() });
        }
        Ok(atoms.push(tag, kind, folded, image))
    }

    /// Bond atoms `a` and `b`.
    ///
    /// Both must be resident. Counts as one bond.
    pub fn create_bond(&mut self, a: T, b: T) -> Result<(), EngineError> {
        let atoms = self.atoms.as_mut().ok_or(EngineError::NoSimulationBox)?;
        let ia = atoms
            .local_index(a)
            .ok_or(EngineError::UnknownTag { tag: a.to_i64() })?;
        let ib = atoms
            .local_index(b)
            .ok_or(EngineError::UnknownTag { tag: b.to_i64() })?;
        atoms.add_partner(ia, b);
        if !self.symmetric_bonds {
            atoms.add_partner(ib, a);
        }
        atoms.count_bond();
        Ok(())
    }

    /// List `partner` in `owner`'s bond list without touching the partner.
    ///
    /// The partner need not be resident, as for a bond whose other end
    /// lives on another process. Counts as one bond.
    pub fn attach_partner(&mut self, owner: T, partner: T) -> Result<(), EngineError> {
        let atoms = self.atoms.as_mut().ok_or(EngineError::NoSimulationBox)?;
        let io = atoms
            .local_index(owner)
            .ok_or(EngineError::UnknownTag {
                tag: owner.to_i64(),
            })?;
        atoms.add_partner(io, partner);
        atoms.count_bond();
        Ok(())
    }

    /// Set whether every owner computes every bond independently.
    ///
    /// Affects bonds created afterwards.
    pub fn set_symmetric_bond_sharing(&mut self, enabled: bool) {
        self.symmetric_bonds = enabled;
    }

    /// Mark a run as in progress or finished.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Set the current step number.
    pub fn set_step(&mut self, step: StepId) {
        self.step = step;
    }

    /// Set the integration timestep size.
    pub fn set_timestep(&mut self, dt: f64) {
        self.timestep = dt;
    }

    /// Stop keeping image flags; the atom table reports them as absent.
    pub fn drop_image_flags(&mut self) {
        if let Some(atoms) = &mut self.atoms {
            atoms.drop_images();
        }
    }

    /// Stop keeping bond partner lists; the atom table reports them as absent.
    pub fn drop_bond_table(&mut self) {
        if let Some(atoms) = &mut self.atoms {
            atoms.drop_bonds();
        }
    }

    /// Make any script line containing `keyword` fail.
    pub fn reject_keyword(&mut self, keyword: impl Into<String>) {
        self.rejected_keyword = Some(keyword.into());
    }

    /// Script lines executed so far, trimmed, in order.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl<T: TagWord, I: ImageWord, D: Domain + Remap> MemoryEngine<T, I, D> {
    /// Add an atom at an arbitrary position, folding it into the cell.
    ///
    /// Returns the atom's local index.
    pub fn create_atom(&mut self, tag: T, kind: i32, position: Vec3) -> Result<usize, EngineError> {
        let domain = self.domain.as_ref().ok_or(EngineError::NoSimulationBox)?;
        let (folded, image) = domain.remap(position, [0; 3]);
        self.create_atom_folded(tag, kind, folded, image)
    }

    /// Move an atom by `displacement`, folding it back into the cell and
    /// updating its image counts.
    pub fn displace(&mut self, tag: T, displacement: Vec3) -> Result<(), EngineError> {
        let domain = self.domain.as_ref().ok_or(EngineError::NoSimulationBox)?;
        let atoms = self.atoms.as_mut().ok_or(EngineError::NoSimulationBox)?;
        let local = atoms
            .local_index(tag)
            .ok_or(EngineError::UnknownTag { tag: tag.to_i64() })?;
        let x = atoms.positions()[local];
        let moved = [
            x[0] + displacement[0],
            x[1] + displacement[1],
            x[2] + displacement[2],
        ];
        let (folded, image) = domain.remap(moved, atoms.image_counts(local));
        atoms.place(local, folded, image);
        Ok(())
    }
}

impl<T: TagWord, I: ImageWord, D: Domain> Engine for MemoryEngine<T, I, D> {
    type Atoms = MemoryAtoms<T, I>;
    type Domain = D;

    fn atoms(&self) -> Option<&MemoryAtoms<T, I>> {
        self.atoms.as_ref()
    }

    fn domain(&self) -> Option<&D> {
        self.domain.as_ref()
    }

    fn domain_mut(&mut self) -> Option<&mut D> {
        self.domain.as_mut()
    }

    fn symmetric_bond_sharing(&self) -> bool {
        self.symmetric_bonds
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn current_step(&self) -> StepId {
        self.step
    }

    fn timestep(&self) -> f64 {
        self.timestep
    }

    fn execute(&mut self, script: &str) -> Result<(), EngineError> {
        for line in script.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(keyword) = &self.rejected_keyword {
                if line.contains(keyword.as_str()) {
                    return Err(EngineError::ScriptFailed {
                        reason: format!("rejected command: {line}"),
                    });
                }
            }
            tracing::debug!(line, "executing");
            self.history.push(line.to_owned());
        }
        Ok(())
    }

    fn execute_file(&mut self, path: &Path) -> Result<(), EngineError> {
        let script = std::fs::read_to_string(path).map_err(|e| EngineError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.execute(&script)
    }
}
