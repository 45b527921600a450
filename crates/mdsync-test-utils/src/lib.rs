//! Test fixtures and mock engines for mdsync development.
//!
//! Provides ready-made [`MemoryEngine`] scenarios (boundary pair, periodic
//! chain, triclinic pair), a [`MockEngine`] whose fields can be set
//! directly to produce inconsistent or partial engine state, and
//! [`LegacyCell`], a domain offering only the two-argument minimum-image
//! form.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use mdsync_cell::{PeriodicCell, Remap};
use mdsync_core::{
    AtomStore, BondTopology, Domain, Engine, EngineError, ImageCounts, ImageWord, StepId, Vec3,
};
use mdsync_engine::MemoryEngine;

/// Edge length of the cubic cells used by the fixtures.
pub const BOX_LENGTH: f64 = 10.0;

// ── MemoryEngine fixtures ──────────────────────────────────────────

/// Two bonded atoms either side of the x boundary of a 10-unit cube:
/// tag 1 at x = 0.5, tag 2 at x = 9.5. Symmetric sharing is off, so each
/// atom lists the other.
pub fn boundary_pair() -> MemoryEngine {
    let mut engine = MemoryEngine::new();
    engine.create_box(cube());
    engine.create_atom(1, 1, [0.5, 5.0, 5.0]).unwrap();
    engine.create_atom(2, 1, [9.5, 5.0, 5.0]).unwrap();
    engine.create_bond(1, 2).unwrap();
    engine
}

/// `n` atoms along x with the given spacing, bonded in sequence, inside a
/// 10-unit cube. Atoms past the cell edge are folded back, so long chains
/// cross the x boundary.
pub fn periodic_chain(n: i32, spacing: f64) -> MemoryEngine {
    let mut engine = MemoryEngine::new();
    engine.create_box(cube());
    for tag in 1..=n {
        let x = 0.25 + spacing * f64::from(tag - 1);
        engine.create_atom(tag, 1 + tag % 3, [x, 5.0, 5.0]).unwrap();
    }
    for tag in 1..n {
        engine.create_bond(tag, tag + 1).unwrap();
    }
    engine
}

/// Atoms with no image crossings: a 3x3x3 lattice inside the cell, bonded
/// along z within each row. Every bond is shorter than half the cell.
pub fn lattice_at_home() -> MemoryEngine {
    let mut engine = MemoryEngine::new();
    engine.create_box(cube());
    let mut tag = 1;
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                let x = [
                    1.0 + 3.0 * f64::from(i),
                    1.0 + 3.0 * f64::from(j),
                    1.0 + 3.0 * f64::from(k),
                ];
                engine.create_atom(tag, 1, x).unwrap();
                if k > 0 {
                    engine.create_bond(tag - 1, tag).unwrap();
                }
                tag += 1;
            }
        }
    }
    engine
}

/// Two bonded atoms either side of the y boundary of a triclinic cell
/// with xy tilt 2.
pub fn triclinic_pair() -> MemoryEngine {
    let mut engine = MemoryEngine::new();
    engine.create_box(
        PeriodicCell::triclinic([0.0; 3], [BOX_LENGTH; 3], [2.0, 0.0, 0.0], [true; 3]).unwrap(),
    );
    engine.create_atom_folded(1, 1, [5.0, 0.5, 5.0], [0; 3]).unwrap();
    engine.create_atom_folded(2, 1, [5.0, 9.5, 5.0], [0; 3]).unwrap();
    engine.create_bond(1, 2).unwrap();
    engine
}

/// The boundary pair over a [`LegacyCell`].
pub fn legacy_boundary_pair() -> MemoryEngine<i32, i32, LegacyCell> {
    let mut engine = MemoryEngine::<i32, i32, LegacyCell>::default();
    engine.create_box(LegacyCell(cube()));
    engine.create_atom(1, 1, [0.5, 5.0, 5.0]).unwrap();
    engine.create_atom(2, 1, [9.5, 5.0, 5.0]).unwrap();
    engine.create_bond(1, 2).unwrap();
    engine
}

fn cube() -> PeriodicCell {
    PeriodicCell::cubic(BOX_LENGTH).unwrap()
}

// ── LegacyCell ─────────────────────────────────────────────────────

/// A [`PeriodicCell`] exposing only the two-argument minimum-image form,
/// like engine builds that predate the indexed form.
#[derive(Clone, Debug)]
pub struct LegacyCell(pub PeriodicCell);

impl Domain for LegacyCell {
    fn update_corners(&mut self) {
        self.0.update_corners();
    }

    fn corners(&self) -> &[Vec3; 8] {
        self.0.corners()
    }

    fn periodic_lengths(&self) -> Vec3 {
        self.0.periodic_lengths()
    }

    fn unmap(&self, position: Vec3, image: ImageCounts) -> Vec3 {
        self.0.unmap(position, image)
    }

    fn minimum_image(&self, delta: Vec3) -> Vec3 {
        self.0.minimum_image(delta)
    }
}

impl Remap for LegacyCell {
    fn remap(&self, position: Vec3, image: ImageCounts) -> (Vec3, ImageCounts) {
        self.0.remap(position, image)
    }
}

// ── MockEngine ─────────────────────────────────────────────────────

/// Bond lists as plain nested vectors.
#[derive(Clone, Debug, Default)]
pub struct MockBonds(pub Vec<Vec<i32>>);

impl BondTopology for MockBonds {
    type Tag = i32;

    fn partners(&self, atom: usize) -> &[i32] {
        self.0.get(atom).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Atom table with every field directly settable.
///
/// Unlike [`MemoryEngine`], nothing keeps the fields consistent with each
/// other or with `count`.
#[derive(Clone, Debug, Default)]
pub struct MockAtoms {
    pub count: usize,
    pub positions: Vec<Vec3>,
    pub tags: Option<Vec<i32>>,
    pub types: Option<Vec<i32>>,
    pub images: Option<Vec<i32>>,
    pub bonds: Option<MockBonds>,
    pub total_bonds: u64,
}

impl MockAtoms {
    /// Consistent table for `positions` with tags 1.., type 1 and no crossings.
    pub fn at(positions: &[Vec3]) -> Self {
        let n = positions.len();
        Self {
            count: n,
            positions: positions.to_vec(),
            tags: Some((1..=n as i32).collect()),
            types: Some(vec![1; n]),
            images: Some(vec![<i32 as ImageWord>::home(); n]),
            bonds: None,
            total_bonds: 0,
        }
    }
}

impl AtomStore for MockAtoms {
    type Tag = i32;
    type Image = i32;
    type Bonds = MockBonds;

    fn atom_count(&self) -> usize {
        self.count
    }

    fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn tags(&self) -> Option<&[i32]> {
        self.tags.as_deref()
    }

    fn types(&self) -> Option<&[i32]> {
        self.types.as_deref()
    }

    fn images(&self) -> Option<&[i32]> {
        self.images.as_deref()
    }

    fn total_bonds(&self) -> u64 {
        self.total_bonds
    }

    fn bonds(&self) -> Option<&MockBonds> {
        self.bonds.as_ref()
    }

    fn local_index(&self, tag: i32) -> Option<usize> {
        self.tags.as_ref()?.iter().position(|&t| t == tag)
    }
}

/// Engine over a [`MockAtoms`] table and a [`PeriodicCell`].
#[derive(Clone, Debug, Default)]
pub struct MockEngine {
    pub atoms: Option<MockAtoms>,
    pub domain: Option<PeriodicCell>,
    pub symmetric: bool,
}

impl MockEngine {
    /// Mock with `atoms` in a 10-unit cube.
    pub fn with_atoms(atoms: MockAtoms) -> Self {
        Self {
            atoms: Some(atoms),
            domain: Some(cube()),
            symmetric: false,
        }
    }
}

impl Engine for MockEngine {
    type Atoms = MockAtoms;
    type Domain = PeriodicCell;

    fn atoms(&self) -> Option<&MockAtoms> {
        self.atoms.as_ref()
    }

    fn domain(&self) -> Option<&PeriodicCell> {
        self.domain.as_ref()
    }

    fn domain_mut(&mut self) -> Option<&mut PeriodicCell> {
        self.domain.as_mut()
    }

    fn symmetric_bond_sharing(&self) -> bool {
        self.symmetric
    }

    fn is_running(&self) -> bool {
        false
    }

    fn current_step(&self) -> StepId {
        StepId(0)
    }

    fn timestep(&self) -> f64 {
        0.0
    }

    fn execute(&mut self, _script: &str) -> Result<(), EngineError> {
        Ok(())
    }

    fn execute_file(&mut self, _path: &Path) -> Result<(), EngineError> {
        Ok(())
    }
}
