//! Async turnstile around a [`Simulation`] for hosts that tick and read input
//! from separate tasks.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::error::SimResult;
use crate::sim::Simulation;

/// Cloneable handle. Renders share the read lock; ticks and input take the
/// write lock, so each mutation lands whole between ticks.
#[derive(Debug, Clone)]
pub struct SharedSimulation {
    inner: Arc<RwLock<Simulation>>,
}

impl SharedSimulation {
    #[must_use]
    pub fn new(sim: Simulation) -> Self {
        Self {
            inner: Arc::new(RwLock::new(sim)),
        }
    }

    /// # Errors
    ///
    /// See [`Simulation::on_tick`].
    pub async fn on_tick(&self, elapsed: Duration) -> SimResult<()> {
        self.inner.write().await.on_tick(elapsed)
    }

    /// # Errors
    ///
    /// See [`Simulation::send_input`].
    pub async fn send_input(&self, line: &str) -> SimResult<()> {
        self.inner.write().await.send_input(line)
    }

    pub async fn display_text(&self) -> String {
        self.inner.read().await.display_text()
    }

    pub async fn is_closed(&self) -> bool {
        self.inner.read().await.is_closed()
    }

    /// Run `f` against the session under the read lock.
    pub async fn inspect<T>(&self, f: impl FnOnce(&Simulation) -> T) -> T {
        f(&*self.inner.read().await)
    }
}
