//! The engine bridge.
//!
//! # Ownership model
//!
//! [`Bridge`] owns its launcher, at most one engine instance and the
//! capture buffers. Every `sync_*` method takes `&mut self` and returns a
//! snapshot borrowing from `self`, so the engine cannot be advanced or
//! stopped while a snapshot is still held.
//!
//! # Shutdown
//!
//! Dropping a `Bridge` stops the engine. Capture buffers are reset on
//! every stop, so a restarted engine never publishes stale state.

use std::path::Path;

use mdsync_core::{
    BondSnapshot, BoxSnapshot, Engine, EngineError, LaunchError, Launcher, ParticleSnapshot,
    StepId,
};
use mdsync_snapshot::{ConfigError, SessionConfig, SnapshotSession};

use crate::script;

/// One engine instance and the buffers its state is published through.
///
/// # Example
///
/// ```ignore
/// let mut bridge = Bridge::new(launcher, SessionConfig::default())?;
/// bridge.start()?;
/// loop {
///     bridge.advance(100, false, false)?;
///     let particles = bridge.sync_particles(false);
///     upload(particles.positions.as_bytes());
/// }
/// ```
pub struct Bridge<L: Launcher> {
    launcher: L,
    engine: Option<L::Engine>,
    session: SnapshotSession,
}

impl<L: Launcher> Bridge<L> {
    /// Bridge with no running engine.
    ///
    /// Validates `config` and pre-sizes the capture buffers from it.
    pub fn new(launcher: L, config: SessionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            launcher,
            engine: None,
            session: SnapshotSession::new(config)?,
        })
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    /// Open a fresh engine instance, stopping any running one first.
    ///
    /// # Errors
    ///
    /// Returns the launcher's [`LaunchError`]. No instance is left behind.
    pub fn start(&mut self) -> Result<(), LaunchError> {
        self.stop();
        match self.launcher.launch() {
            Ok(engine) => {
                tracing::info!("engine started");
                self.engine = Some(engine);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "engine launch failed");
                Err(e)
            }
        }
    }

    /// Close the engine instance and reset the capture buffers.
    pub fn stop(&mut self) {
        if self.engine.take().is_some() {
            tracing::info!("engine stopped");
        }
        self.session.reset();
    }

    /// Run the engine for `steps` timesteps.
    ///
    /// Does nothing when `steps` is zero or no engine is running.
    pub fn advance(&mut self, steps: u64, run_pre: bool, run_post: bool) -> Result<(), EngineError> {
        if steps == 0 {
            return Ok(());
        }
        self.run_script(&script::run_command(steps, run_pre, run_post))
    }

    // ── Commands ───────────────────────────────────────────────────

    /// Execute a single command line. A trailing newline is added if missing.
    pub fn run_command(&mut self, command: &str) -> Result<(), EngineError> {
        if command.is_empty() {
            return Ok(());
        }
        self.run_script(&script::terminated(command))
    }

    /// Execute a newline-separated script.
    ///
    /// Does nothing when `script` is empty or no engine is running.
    pub fn run_script(&mut self, script: &str) -> Result<(), EngineError> {
        match &mut self.engine {
            Some(engine) if !script.is_empty() => engine.execute(script),
            _ => Ok(()),
        }
    }

    /// Execute a script file.
    ///
    /// Does nothing when `path` is empty or no engine is running.
    pub fn run_file(&mut self, path: &Path) -> Result<(), EngineError> {
        match &mut self.engine {
            Some(engine) if !path.as_os_str().is_empty() => engine.execute_file(path),
            _ => Ok(()),
        }
    }

    // ── Status ─────────────────────────────────────────────────────

    /// Whether an engine instance is open.
    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    /// Whether the engine is inside a run. `false` without an engine.
    pub fn is_running(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.is_running())
    }

    /// Current timestep number. Zero without an engine.
    pub fn current_step(&self) -> StepId {
        self.engine
            .as_ref()
            .map_or(StepId(0), |e| e.current_step())
    }

    /// Integration timestep size. Zero without an engine.
    pub fn timestep(&self) -> f64 {
        self.engine.as_ref().map_or(0.0, |e| e.timestep())
    }

    /// The open engine instance.
    pub fn engine(&self) -> Option<&L::Engine> {
        self.engine.as_ref()
    }

    /// The open engine instance, mutably.
    pub fn engine_mut(&mut self) -> Option<&mut L::Engine> {
        self.engine.as_mut()
    }

    /// The launcher new instances come from.
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// The capture configuration.
    pub fn config(&self) -> &SessionConfig {
        self.session.config()
    }

    // ── Capture ────────────────────────────────────────────────────

    /// Capture per-atom state, unwrapped across periodic boundaries unless
    /// `wrapped` is set.
    pub fn sync_particles(&mut self, wrapped: bool) -> ParticleSnapshot<'_> {
        let Self {
            engine, session, ..
        } = self;
        session.sync_particles(engine.as_ref(), wrapped)
    }

    /// Capture per-atom state as stored by the engine, folded into the cell.
    pub fn sync_particles_wrapped(&mut self) -> ParticleSnapshot<'_> {
        self.sync_particles(true)
    }

    /// Capture one segment per bond, using minimum-image partners unless
    /// `wrapped` is set.
    pub fn sync_bonds(&mut self, wrapped: bool) -> BondSnapshot<'_> {
        let Self {
            engine, session, ..
        } = self;
        session.sync_bonds(engine.as_ref(), wrapped)
    }

    /// Capture bond segments between stored, folded positions.
    pub fn sync_bonds_wrapped(&mut self) -> BondSnapshot<'_> {
        self.sync_bonds(true)
    }

    /// Capture the simulation cell.
    pub fn sync_simulation_box(&mut self) -> BoxSnapshot<'_> {
        let Self {
            engine, session, ..
        } = self;
        session.sync_simulation_box(engine.as_mut())
    }
}

impl<L: Launcher> Drop for Bridge<L> {
    fn drop(&mut self) {
        self.stop();
    }
}
