//! Trailing-edge debounce
//!
//! Collapses a burst of submissions into the last one: each new submission
//! cancels the pending delayed task and schedules its own. Only a submission
//! that survives the quiet window unchallenged actually runs.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Debounces raw input into committed actions.
///
/// Cheap to clone; clones share the same pending slot, so submissions
/// through any clone supersede each other.
#[derive(Clone)]
pub struct Debouncer {
    window: Duration,
    pending: Arc<Mutex<Option<CancellationToken>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Schedule `action` to run after the quiet window, superseding any
    /// submission still waiting. A superseded action never runs at all.
    pub async fn submit<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        {
            let mut pending = self.pending.lock().await;
            if let Some(superseded) = pending.replace(token.clone()) {
                superseded.cancel();
            }
        }

        let window = self.window;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    trace!("Debounced submission superseded");
                }
                _ = sleep(window) => action.await,
            }
        });
    }

    /// Drop any submission still inside its quiet window
    pub async fn cancel_pending(&self) {
        if let Some(token) = self.pending.lock().await.take() {
            token.cancel();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
