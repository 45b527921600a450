//! Owned capture state for one host connection.

use mdsync_core::{BondSnapshot, BoxSnapshot, Engine, ParticleSnapshot};

use crate::bonds::BondSnapshotBuilder;
use crate::cell_box::BoxSnapshotBuilder;
use crate::config::{ConfigError, SessionConfig};
use crate::particles::ParticleSnapshotBuilder;

/// The three snapshot builders and their buffers.
///
/// Each `sync_*` call rebuilds its buffers from the engine state passed in
/// and returns views borrowing them. The borrow checker ensures a view is
/// dropped before the next call on the same session.
#[derive(Clone, Debug)]
pub struct SnapshotSession {
    config: SessionConfig,
    particles: ParticleSnapshotBuilder,
    bonds: BondSnapshotBuilder,
    cell: BoxSnapshotBuilder,
}

impl SnapshotSession {
    /// Validate `config` and pre-size buffers from it.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            particles: ParticleSnapshotBuilder::new(&config),
            bonds: BondSnapshotBuilder::new(&config),
            cell: BoxSnapshotBuilder::new(),
            config,
        })
    }

    /// The configuration this session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Capture per-atom state. See [`ParticleSnapshotBuilder::capture`].
    pub fn sync_particles<'a, E: Engine>(
        &'a mut self,
        engine: Option<&'a E>,
        wrapped: bool,
    ) -> ParticleSnapshot<'a> {
        self.particles.capture(engine, wrapped)
    }

    /// Capture bond segments. See [`BondSnapshotBuilder::capture`].
    pub fn sync_bonds<'a, E: Engine>(
        &'a mut self,
        engine: Option<&'a E>,
        wrapped: bool,
    ) -> BondSnapshot<'a> {
        self.bonds.capture(engine, wrapped)
    }

    /// Capture the cell. See [`BoxSnapshotBuilder::capture`].
    pub fn sync_simulation_box<E: Engine>(&mut self, engine: Option<&mut E>) -> BoxSnapshot<'_> {
        self.cell.capture(engine)
    }

    /// Clear every buffer, keeping allocations.
    pub fn reset(&mut self) {
        self.particles.reset();
        self.bonds.reset();
        self.cell.reset();
    }
}

impl Default for SnapshotSession {
    fn default() -> Self {
        let config = SessionConfig::default();
        Self {
            particles: ParticleSnapshotBuilder::new(&config),
            bonds: BondSnapshotBuilder::new(&config),
            cell: BoxSnapshotBuilder::new(),
            config,
        }
    }
}
