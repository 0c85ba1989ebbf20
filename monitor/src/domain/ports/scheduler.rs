//! Scheduler port trait
//!
//! A repeating timer capability with scoped cancellation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Future produced by one timer firing
pub type TickFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Callback invoked on every timer firing
pub type TickFn = Arc<dyn Fn() -> TickFuture + Send + Sync>;

/// Handle to a registered repeating timer.
///
/// The timer stops when the handle is cancelled or dropped.
#[must_use = "dropping the handle cancels the timer"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the timer. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Port trait for registering repeating timers
pub trait Scheduler: Send + Sync {
    /// Call `tick` every `period`, first firing one period from now
    fn schedule_repeating(&self, period: Duration, tick: TickFn) -> TimerHandle;
}
