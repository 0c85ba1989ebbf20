//! Monitor Service
//!
//! Orchestrates one polling tick:
//! - Fetch each subscribed profile's timeline (Weibo)
//! - Render the newest post if it is fresh
//! - Dispatch it to the subscription's group (host bot)
//!
//! Freshness is purely time based. Nothing is remembered between ticks.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::entities::Subscription;
use crate::domain::ports::{
    MessageSink, ProfileFetcher, Scheduler, TickFn, TickFuture, TimerHandle,
};
use crate::error::MonitorError;
use crate::feed::{render, with_broadcast_mention};

/// What to do with the rest of a tick after a subscription fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log and move on to the next subscription
    #[default]
    Isolate,
    /// Abandon the remaining subscriptions until the next tick
    FailFast,
}

/// Outcome of polling one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Dispatched,
    EmptyTimeline,
    Stale,
}

/// Summary of one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub dispatched: usize,
    pub skipped: usize,
    pub failed: usize,
    pub aborted: bool,
}

/// Service that polls profiles and dispatches notifications
pub struct MonitorService<PF, MS>
where
    PF: ProfileFetcher,
    MS: MessageSink,
{
    fetcher: Arc<PF>,
    sink: Arc<MS>,
    subscriptions: Vec<Subscription>,
    policy: FailurePolicy,
}

impl<PF, MS> MonitorService<PF, MS>
where
    PF: ProfileFetcher + 'static,
    MS: MessageSink + 'static,
{
    pub fn new(fetcher: Arc<PF>, sink: Arc<MS>, subscriptions: Vec<Subscription>) -> Self {
        Self {
            fetcher,
            sink,
            subscriptions,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register the repeating tick with `scheduler`.
    ///
    /// The timer runs until the returned handle is cancelled or dropped.
    pub fn start(self: Arc<Self>, scheduler: &dyn Scheduler, period: Duration) -> TimerHandle {
        tracing::info!(
            "Polling {} subscription(s) every {}s",
            self.subscriptions.len(),
            period.as_secs()
        );

        let tick: TickFn = Arc::new(move || -> TickFuture {
            let service = Arc::clone(&self);
            Box::pin(async move {
                let report = service.run_tick(Utc::now()).await;
                tracing::debug!(
                    dispatched = report.dispatched,
                    skipped = report.skipped,
                    failed = report.failed,
                    aborted = report.aborted,
                    "Tick finished"
                );
            })
        });

        scheduler.schedule_repeating(period, tick)
    }

    /// Poll every subscription once, in configured order
    pub async fn run_tick(&self, now: DateTime<Utc>) -> TickReport {
        let mut report = TickReport::default();

        for subscription in &self.subscriptions {
            match self.poll_subscription(subscription, now).await {
                Ok(PollOutcome::Dispatched) => report.dispatched += 1,
                Ok(outcome) => {
                    tracing::debug!(
                        uid = %subscription.weibo_uid,
                        "Nothing to send: {:?}",
                        outcome
                    );
                    report.skipped += 1;
                }
                Err(e) => {
                    report.failed += 1;
                    match &e {
                        MonitorError::Timestamp(_) => {
                            tracing::warn!(uid = %subscription.weibo_uid, "Skipping post: {}", e)
                        }
                        _ => tracing::error!(uid = %subscription.weibo_uid, "{}", e),
                    }

                    if self.policy == FailurePolicy::FailFast && e.aborts_tick() {
                        tracing::warn!("Aborting remaining subscriptions for this tick");
                        report.aborted = true;
                        break;
                    }
                }
            }
        }

        report
    }

    /// Fetch, render and dispatch for a single subscription
    pub async fn poll_subscription(
        &self,
        subscription: &Subscription,
        now: DateTime<Utc>,
    ) -> Result<PollOutcome, MonitorError> {
        let posts = self.fetcher.latest_posts(&subscription.weibo_uid).await?;

        // Only the newest post is considered
        let Some(latest) = posts.first() else {
            return Ok(PollOutcome::EmptyTimeline);
        };

        let Some(message) = render(subscription, latest, now)? else {
            return Ok(PollOutcome::Stale);
        };

        let message = if subscription.send_all {
            with_broadcast_mention(&message)
        } else {
            message
        };

        self.sink
            .send(&subscription.bot, &subscription.group_id, &message)
            .await?;

        tracing::info!(
            uid = %subscription.weibo_uid,
            group = %subscription.group_id,
            mid = latest.mid(),
            "Dispatched new post via {}",
            subscription.bot
        );

        Ok(PollOutcome::Dispatched)
    }
}
