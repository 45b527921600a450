//! Snapshot types published to hosts after each capture.
//!
//! Snapshots are bundles of [`BufferView`]s. They borrow the buffers that
//! produced them, so taking a new capture on the same session requires
//! the previous snapshot to be dropped first.

use crate::scalar::ScalarType;
use crate::view::BufferView;

/// Per-atom state at one step.
///
/// All three views index the engine's local atom order: tuple `i` of
/// `positions`, `ids` and `types` describes the same atom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSnapshot<'a> {
    /// `count` xyz triples, `Float32`.
    pub positions: BufferView<'a>,
    /// `count` global identifiers in the engine's tag width.
    pub ids: BufferView<'a>,
    /// `count` per-atom type labels, `Int32`.
    pub types: BufferView<'a>,
    /// Number of atoms described.
    pub count: usize,
}

impl ParticleSnapshot<'_> {
    /// Snapshot with no atoms. `tag_type` is the engine's identifier width.
    pub const fn empty(tag_type: ScalarType) -> Self {
        Self {
            positions: BufferView::empty(ScalarType::Float32),
            ids: BufferView::empty(tag_type),
            types: BufferView::empty(ScalarType::Int32),
            count: 0,
        }
    }
}

/// Bond segments at one step.
///
/// Tuple `i` of `first` and tuple `i` of `second` are the two endpoints of
/// segment `i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BondSnapshot<'a> {
    /// `count` owner-side endpoints, `Float32` xyz.
    pub first: BufferView<'a>,
    /// `count` partner-side endpoints, `Float32` xyz.
    pub second: BufferView<'a>,
    /// Number of segments.
    pub count: usize,
}

impl BondSnapshot<'_> {
    /// Snapshot with no segments.
    pub const fn empty() -> Self {
        Self {
            first: BufferView::empty(ScalarType::Float32),
            second: BufferView::empty(ScalarType::Float32),
            count: 0,
        }
    }
}

impl Default for BondSnapshot<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Simulation cell geometry at one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSnapshot<'a> {
    /// Cell edge vectors a, b and c as three xyz rows, `Float32`.
    pub matrix: BufferView<'a>,
    /// Cell origin corner, one xyz tuple.
    pub origin: BufferView<'a>,
    /// Periodic lengths along x, y and z, one tuple.
    pub lengths: BufferView<'a>,
}

impl BoxSnapshot<'_> {
    /// Snapshot with no cell.
    pub const fn empty() -> Self {
        Self {
            matrix: BufferView::empty(ScalarType::Float32),
            origin: BufferView::empty(ScalarType::Float32),
            lengths: BufferView::empty(ScalarType::Float32),
        }
    }

    /// Whether the snapshot carries a cell.
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }
}

impl Default for BoxSnapshot<'_> {
    fn default() -> Self {
        Self::empty()
    }
}
