//! Launcher for in-memory engines.

use std::fmt;

use mdsync_cell::PeriodicCell;
use mdsync_core::{Domain, ImageWord, LaunchError, Launcher, TagWord};

use crate::memory::MemoryEngine;

type Setup<T, I, D> = Box<dyn FnMut(&mut MemoryEngine<T, I, D>) + Send>;

/// Opens fresh [`MemoryEngine`]s.
///
/// An optional setup hook runs on every new instance, standing in for the
/// input script a native engine would read on startup.
pub struct MemoryLauncher<T = i32, I = i32, D = PeriodicCell> {
    setup: Option<Setup<T, I, D>>,
    failure: Option<String>,
    launches: usize,
}

impl MemoryLauncher {
    /// Launcher for engines with 32-bit identifiers over a [`PeriodicCell`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, I, D> Default for MemoryLauncher<T, I, D> {
    fn default() -> Self {
        Self {
            setup: None,
            failure: None,
            launches: 0,
        }
    }
}

impl<T, I, D> MemoryLauncher<T, I, D> {
    /// Run `setup` on every launched engine.
    pub fn with_setup(
        mut self,
        setup: impl FnMut(&mut MemoryEngine<T, I, D>) + Send + 'static,
    ) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Make every launch fail with `reason`.
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    /// Number of successful launches.
    pub fn launches(&self) -> usize {
        self.launches
    }
}

impl<T, I, D> fmt::Debug for MemoryLauncher<T, I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryLauncher")
            .field("has_setup", &self.setup.is_some())
            .field("failure", &self.failure)
            .field("launches", &self.launches)
            .finish()
    }
}

impl<T: TagWord, I: ImageWord, D: Domain> Launcher for MemoryLauncher<T, I, D> {
    type Engine = MemoryEngine<T, I, D>;

    fn launch(&mut self) -> Result<MemoryEngine<T, I, D>, LaunchError> {
        if let Some(reason) = &self.failure {
            return Err(LaunchError::Unavailable {
                reason: reason.clone(),
            });
        }
        let mut engine = MemoryEngine::default();
        if let Some(setup) = &mut self.setup {
            setup(&mut engine);
        }
        self.launches += 1;
        Ok(engine)
    }
}
