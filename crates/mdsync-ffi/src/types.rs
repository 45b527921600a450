//! C-compatible snapshot and status structs.

use mdsync_core::{BondSnapshot, BoxSnapshot, BufferView, ParticleSnapshot, ScalarType};

/// Element type of a buffer view, as stored in [`MdBufferView::scalar_type`].
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MdScalarType {
    /// 32-bit float.
    Float32 = 0,
    /// 64-bit float.
    Float64 = 1,
    /// 32-bit signed integer.
    Int32 = 2,
    /// 64-bit signed integer.
    Int64 = 3,
}

impl From<ScalarType> for MdScalarType {
    fn from(ty: ScalarType) -> Self {
        match ty {
            ScalarType::Float32 => MdScalarType::Float32,
            ScalarType::Float64 => MdScalarType::Float64,
            ScalarType::Int32 => MdScalarType::Int32,
            ScalarType::Int64 => MdScalarType::Int64,
        }
    }
}

/// A borrowed buffer: address, total scalar count, tuple width and type.
///
/// An empty view has `handle == 0`, `length == 0` and `components == 0`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MdBufferView {
    /// Address of the first scalar, or 0.
    pub handle: usize,
    /// Total number of scalars.
    pub length: u64,
    /// Scalars per logical element.
    pub components: u32,
    /// An [`MdScalarType`] value.
    pub scalar_type: i32,
}

impl From<&BufferView<'_>> for MdBufferView {
    fn from(view: &BufferView<'_>) -> Self {
        Self {
            handle: view.handle(),
            length: view.len() as u64,
            components: view.components() as u32,
            scalar_type: MdScalarType::from(view.scalar_type()) as i32,
        }
    }
}

/// Per-atom snapshot.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MdParticleSnapshot {
    /// `float[count][3]` positions.
    pub positions: MdBufferView,
    /// Global identifiers, one per atom.
    pub ids: MdBufferView,
    /// Type labels, one per atom.
    pub types: MdBufferView,
    /// Number of atoms.
    pub count: u64,
}

impl From<&ParticleSnapshot<'_>> for MdParticleSnapshot {
    fn from(snap: &ParticleSnapshot<'_>) -> Self {
        Self {
            positions: (&snap.positions).into(),
            ids: (&snap.ids).into(),
            types: (&snap.types).into(),
            count: snap.count as u64,
        }
    }
}

/// Bond segment snapshot.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MdBondSnapshot {
    /// `float[count][3]` owner endpoints.
    pub first: MdBufferView,
    /// `float[count][3]` partner endpoints.
    pub second: MdBufferView,
    /// Number of segments.
    pub count: u64,
}

impl From<&BondSnapshot<'_>> for MdBondSnapshot {
    fn from(snap: &BondSnapshot<'_>) -> Self {
        Self {
            first: (&snap.first).into(),
            second: (&snap.second).into(),
            count: snap.count as u64,
        }
    }
}

/// Simulation cell snapshot.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MdBoxSnapshot {
    /// `float[3][3]`, one cell edge vector per row.
    pub matrix: MdBufferView,
    /// `float[3]` cell origin.
    pub origin: MdBufferView,
    /// `float[3]` periodic lengths.
    pub lengths: MdBufferView,
}

impl From<&BoxSnapshot<'_>> for MdBoxSnapshot {
    fn from(snap: &BoxSnapshot<'_>) -> Self {
        Self {
            matrix: (&snap.matrix).into(),
            origin: (&snap.origin).into(),
            lengths: (&snap.lengths).into(),
        }
    }
}

/// Bridge status for non-blocking polling.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MdStatusInfo {
    /// 1 if an engine instance is open.
    pub ready: u8,
    /// 1 if the engine is inside a run.
    pub running: u8,
    /// Current timestep number.
    pub current_step: u64,
    /// Integration timestep size.
    pub timestep: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_view_is_all_zero() {
        let view = BufferView::empty(ScalarType::Int64);
        let c = MdBufferView::from(&view);
        assert_eq!((c.handle, c.length, c.components), (0, 0, 0));
        assert_eq!(c.scalar_type, MdScalarType::Int64 as i32);
    }

    #[test]
    fn view_fields_carry_over() {
        let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let c = MdBufferView::from(&BufferView::from_slice(&data, 3));
        assert_eq!(c.handle, data.as_ptr() as usize);
        assert_eq!(c.length, 6);
        assert_eq!(c.components, 3);
        assert_eq!(c.scalar_type, 0);
    }

    #[test]
    fn scalar_type_codes_match_core() {
        for ty in [
            ScalarType::Float32,
            ScalarType::Float64,
            ScalarType::Int32,
            ScalarType::Int64,
        ] {
            assert_eq!(MdScalarType::from(ty) as i32, ty as i32);
        }
    }
}
