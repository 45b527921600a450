//! Bond segment capture.
//!
//! Every bond becomes a segment between two endpoints. When the engine
//! lists each bond under both of its atoms, only the occurrence owned by
//! the higher local index is kept, so each bond is drawn once. Unwrapped
//! segments place the partner at its nearest periodic image of the owner,
//! so bonds crossing a boundary are drawn at their true length instead of
//! spanning the cell.

use mdsync_cell::CoordinateResolver;
use mdsync_core::{AtomStore, BondSnapshot, BondTopology, Engine, ScalarBuffer};

use crate::config::SessionConfig;
use crate::{image_at, narrow};

/// Captures bond segments into two parallel endpoint buffers.
#[derive(Clone, Debug)]
pub struct BondSnapshotBuilder {
    first: ScalarBuffer<f32>,
    second: ScalarBuffer<f32>,
    label: String,
}

impl BondSnapshotBuilder {
    /// Builder with buffers pre-sized from `config`.
    pub fn new(config: &SessionConfig) -> Self {
        let scalars = config.bond_capacity.saturating_mul(3);
        Self {
            first: ScalarBuffer::with_capacity(scalars),
            second: ScalarBuffer::with_capacity(scalars),
            label: config.image_label.clone(),
        }
    }

    /// Capture the current bond segments.
    ///
    /// Partners whose identifier does not resolve to a resident atom are
    /// skipped. Without an engine, atom table, domain, bonds or bond table
    /// the buffers are cleared and the empty snapshot returned.
    pub fn capture<'a, E: Engine>(
        &'a mut self,
        engine: Option<&'a E>,
        wrapped: bool,
    ) -> BondSnapshot<'a> {
        self.first.clear();
        self.second.clear();

        let Some(engine) = engine else {
            tracing::debug!("no engine; publishing empty bond snapshot");
            return BondSnapshot::empty();
        };
        let (Some(atoms), Some(domain)) = (engine.atoms(), engine.domain()) else {
            tracing::debug!("no atom table or domain; publishing empty bond snapshot");
            return BondSnapshot::empty();
        };
        let total = atoms.total_bonds();
        if total == 0 {
            return BondSnapshot::empty();
        }
        let Some(table) = atoms.bonds() else {
            tracing::debug!(total, "engine keeps no bond table; publishing empty bond snapshot");
            return BondSnapshot::empty();
        };

        let positions = atoms.positions();
        let count = atoms.atom_count().min(positions.len());
        let reserve = usize::try_from(total).unwrap_or(usize::MAX).saturating_mul(3);
        if !(self.first.reserve_total(reserve) && self.second.reserve_total(reserve)) {
            tracing::debug!(total, "bond total too large to reserve; growing on demand");
        }

        let images = if wrapped {
            None
        } else {
            atoms.images().filter(|img| img.len() >= count)
        };
        let resolver = CoordinateResolver::new(domain, &self.label);
        let symmetric = engine.symmetric_bond_sharing();
        let mut unresolved = 0usize;

        for owner in 0..count {
            let partners = table.partners(owner);
            if partners.is_empty() {
                continue;
            }
            let owner_pos = resolver.unwrap(positions[owner], image_at(images, owner));
            for &tag in partners {
                let Some(partner) = atoms.local_index(tag).filter(|&p| p < count) else {
                    unresolved += 1;
                    continue;
                };
                if !symmetric && owner < partner {
                    continue;
                }
                let partner_pos = resolver.unwrap(positions[partner], image_at(images, partner));
                let end = if wrapped {
                    partner_pos
                } else {
                    resolver.bond_endpoint(owner_pos, partner_pos)
                };
                self.first.extend_from_slice(&narrow(owner_pos));
                self.second.extend_from_slice(&narrow(end));
            }
        }

        let segments = self.first.len() / 3;
        tracing::trace!(segments, unresolved, wrapped, symmetric, "captured bonds");
        BondSnapshot {
            first: self.first.view(3),
            second: self.second.view(3),
            count: segments,
        }
    }

    /// Drop buffer contents, keeping allocations.
    pub fn reset(&mut self) {
        self.first.clear();
        self.second.clear();
    }
}

impl Default for BondSnapshotBuilder {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}
