//! Per-atom capture.

use mdsync_cell::CoordinateResolver;
use mdsync_core::{
    AtomStore, BufferView, Engine, ParticleSnapshot, ScalarBuffer, ScalarElement, ScalarType,
};

use crate::config::SessionConfig;
use crate::{image_at, narrow};

/// Identifier width of engine type `E`.
pub(crate) fn tag_type<E: Engine>() -> ScalarType {
    <<E::Atoms as AtomStore>::Tag as ScalarElement>::SCALAR_TYPE
}

/// Captures positions, identifiers and types of every resident atom.
///
/// Positions are copied into an owned `f32` buffer; identifiers and types
/// are published as views straight over engine memory.
#[derive(Clone, Debug)]
pub struct ParticleSnapshotBuilder {
    positions: ScalarBuffer<f32>,
    label: String,
}

impl ParticleSnapshotBuilder {
    /// Builder with buffers pre-sized from `config`.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            positions: ScalarBuffer::with_capacity(config.particle_capacity.saturating_mul(3)),
            label: config.image_label.clone(),
        }
    }

    /// Capture the current per-atom state.
    ///
    /// With `wrapped` the engine's folded positions are published as-is;
    /// otherwise each position is unwrapped by its image flags when the
    /// engine keeps them. Without an engine, atom table or domain, the
    /// buffer is cleared and the empty snapshot returned.
    pub fn capture<'a, E: Engine>(
        &'a mut self,
        engine: Option<&'a E>,
        wrapped: bool,
    ) -> ParticleSnapshot<'a> {
        let Some((atoms, domain)) = engine.and_then(|e| Some((e.atoms()?, e.domain()?))) else {
            tracing::debug!("no atom table or domain; publishing empty particle snapshot");
            self.positions.clear();
            return ParticleSnapshot::empty(tag_type::<E>());
        };

        let positions = atoms.positions();
        let mut count = atoms.atom_count();
        if positions.len() < count {
            tracing::warn!(
                reported = count,
                available = positions.len(),
                "position array shorter than atom count"
            );
            count = positions.len();
        }

        if count == 0 {
            self.positions.clear();
            return ParticleSnapshot {
                positions: self.positions.view(3),
                ids: BufferView::raw(atoms.tags(), 0, 1),
                types: BufferView::raw(atoms.types(), 0, 1),
                count: 0,
            };
        }

        let images = if wrapped {
            None
        } else {
            atoms.images().filter(|img| img.len() >= count)
        };
        let resolver = CoordinateResolver::new(domain, &self.label);
        let out = self.positions.resize(count * 3);
        for (i, (slot, x)) in out.chunks_exact_mut(3).zip(&positions[..count]).enumerate() {
            let p = resolver.unwrap(*x, image_at(images, i));
            slot.copy_from_slice(&narrow(p));
        }
        tracing::trace!(count, wrapped, "captured particles");

        ParticleSnapshot {
            positions: self.positions.view(3),
            ids: BufferView::raw(atoms.tags(), count, 1),
            types: BufferView::raw(atoms.types(), count, 1),
            count,
        }
    }

    /// Drop buffer contents, keeping allocations.
    pub fn reset(&mut self) {
        self.positions.clear();
    }

    /// Position buffer as of the last capture.
    pub fn positions(&self) -> &ScalarBuffer<f32> {
        &self.positions
    }
}

impl Default for ParticleSnapshotBuilder {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdsync_cell::PeriodicCell;
    use mdsync_engine::MemoryEngine;

    fn engine_with(atoms: &[(i32, i32, [f64; 3])]) -> MemoryEngine {
        let mut engine = MemoryEngine::new();
        engine.create_box(PeriodicCell::cubic(10.0).unwrap());
        for &(tag, kind, x) in atoms {
            engine.create_atom(tag, kind, x).unwrap();
        }
        engine
    }

    #[test]
    fn no_engine_gives_empty_snapshot() {
        let mut builder = ParticleSnapshotBuilder::default();
        let snap = builder.capture::<MemoryEngine>(None, false);
        assert_eq!(snap.count, 0);
        assert_eq!(snap.positions.handle(), 0);
        assert_eq!(snap.ids.scalar_type(), ScalarType::Int32);
    }

    #[test]
    fn engine_without_box_gives_empty_snapshot() {
        let engine = MemoryEngine::new();
        let mut builder = ParticleSnapshotBuilder::default();
        let snap = builder.capture(Some(&engine), true);
        assert_eq!(snap.count, 0);
        assert!(snap.ids.is_empty());
    }

    #[test]
    fn counts_match_atom_count() {
        let engine = engine_with(&[(5, 1, [1.0; 3]), (9, 2, [2.0; 3]), (3, 1, [3.0; 3])]);
        let mut builder = ParticleSnapshotBuilder::default();
        let snap = builder.capture(Some(&engine), false);
        assert_eq!(snap.count, 3);
        assert_eq!(snap.positions.count(), 3);
        assert_eq!(snap.ids.count(), 3);
        assert_eq!(snap.types.count(), 3);
        assert_eq!(snap.ids.as_slice::<i32>(), Some(&[5, 9, 3][..]));
        assert_eq!(snap.types.as_slice::<i32>(), Some(&[1, 2, 1][..]));
    }

    #[test]
    fn unwrapped_positions_follow_images() {
        let engine = engine_with(&[(1, 1, [12.0, -1.0, 5.0])]);
        let mut builder = ParticleSnapshotBuilder::default();

        let snap = builder.capture(Some(&engine), true);
        assert_eq!(snap.positions.as_slice::<f32>(), Some(&[2.0, 9.0, 5.0][..]));

        let snap = builder.capture(Some(&engine), false);
        assert_eq!(snap.positions.as_slice::<f32>(), Some(&[12.0, -1.0, 5.0][..]));
    }

    #[test]
    fn missing_image_field_publishes_raw_positions() {
        let mut engine = engine_with(&[(1, 1, [12.0, 0.5, 0.5])]);
        engine.drop_image_flags();
        let mut builder = ParticleSnapshotBuilder::default();
        let snap = builder.capture(Some(&engine), false);
        assert_eq!(snap.positions.as_slice::<f32>(), Some(&[2.0, 0.5, 0.5][..]));
    }

    #[test]
    fn empty_box_gives_zero_count() {
        let engine = engine_with(&[]);
        let mut builder = ParticleSnapshotBuilder::default();
        let snap = builder.capture(Some(&engine), false);
        assert_eq!(snap.count, 0);
        assert_eq!(snap.positions.handle(), 0);
        assert_eq!(snap.ids.handle(), 0);
        assert_eq!(snap.types.len(), 0);
    }

    #[test]
    fn shrinking_system_reuses_buffer() {
        let mut engine = engine_with(&[(1, 1, [1.0; 3]), (2, 1, [2.0; 3])]);
        let mut builder = ParticleSnapshotBuilder::default();
        builder.capture(Some(&engine), false);
        let cap = builder.positions().capacity();

        engine.create_box(PeriodicCell::cubic(10.0).unwrap());
        engine.create_atom(7, 1, [4.0; 3]).unwrap();
        let snap = builder.capture(Some(&engine), false);
        assert_eq!(snap.count, 1);
        assert_eq!(snap.positions.len(), 3);
        assert_eq!(builder.positions().capacity(), cap);
    }

    #[test]
    fn wide_tags_publish_int64_ids() {
        let mut engine = MemoryEngine::<i64, i64>::default();
        engine.create_box(PeriodicCell::cubic(10.0).unwrap());
        engine.create_atom(1 << 40, 1, [1.0; 3]).unwrap();
        let mut builder = ParticleSnapshotBuilder::default();
        let snap = builder.capture(Some(&engine), false);
        assert_eq!(snap.ids.scalar_type(), ScalarType::Int64);
        assert_eq!(snap.ids.as_slice::<i64>(), Some(&[1i64 << 40][..]));
    }
}
