//! Draw lifecycle: the `Idle -> Drawing -> Idle` guard and the presentation delay.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{FaterollError, Result};

/// Default pause between computing a result and revealing it.
pub const DEFAULT_PRESENTATION_DELAY: Duration = Duration::from_millis(1000);

/// Whether a draw is currently being presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrawState {
    #[default]
    Idle,
    Drawing,
}

/// Re-entrancy guard for draws.
///
/// `begin` is rejected unless the guard is idle. It hands out a [`DrawTicket`]
/// that returns the guard to idle when dropped, so a draw that is abandoned
/// (a cancelled future, a discarded pending draw) cannot leave it stuck.
#[derive(Debug, Default)]
pub struct DrawGuard {
    drawing: Arc<AtomicBool>,
}

impl DrawGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DrawState {
        if self.is_drawing() {
            DrawState::Drawing
        } else {
            DrawState::Idle
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.load(Ordering::SeqCst)
    }

    /// Idle -> Drawing. The returned ticket performs Drawing -> Idle.
    pub fn begin(&mut self) -> Result<DrawTicket> {
        if self
            .drawing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(FaterollError::DrawInProgress);
        }
        Ok(DrawTicket {
            drawing: Arc::clone(&self.drawing),
        })
    }
}

/// Proof of a draw in progress. Dropping it ends the draw.
#[derive(Debug)]
pub struct DrawTicket {
    drawing: Arc<AtomicBool>,
}

impl DrawTicket {
    /// Drawing -> Idle.
    pub fn finish(self) {}
}

impl Drop for DrawTicket {
    fn drop(&mut self) {
        self.drawing.store(false, Ordering::SeqCst);
    }
}

/// Pause between a draw's computation and its publication.
///
/// Purely presentational; it never influences which option wins.
#[async_trait]
pub trait PresentationDelay: Send + Sync {
    async fn wait(&self);
}

/// A fixed pause backed by the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    duration: Duration,
}

impl FixedDelay {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(DEFAULT_PRESENTATION_DELAY)
    }
}

#[async_trait]
impl PresentationDelay for FixedDelay {
    async fn wait(&self) {
        tokio::time::sleep(self.duration).await;
    }
}

/// Publishes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl PresentationDelay for NoDelay {
    async fn wait(&self) {}
}
