//! Tokio-backed repeating timer

use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::domain::ports::{Scheduler, TickFn, TimerHandle};

/// Runs each timer as its own task on the current Tokio runtime.
///
/// Ticks of one timer run sequentially; a tick that overruns the period
/// causes the missed firings to be skipped rather than stacked.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&self, period: Duration, tick: TickFn) -> TimerHandle {
        let task = tokio::spawn(run_timer(period, tick));
        TimerHandle::new(move || task.abort())
    }
}

/// Fire `tick` every `period`, starting one period from now
async fn run_timer(period: Duration, tick: TickFn) {
    let Some(start) = Instant::now().checked_add(period) else {
        tracing::error!("Timer period {:?} is out of range; polling disabled", period);
        return;
    };
    let mut timer = interval_at(start, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        timer.tick().await;
        tick().await;
    }
}
