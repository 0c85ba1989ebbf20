//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::entities::{BotKey, RawPost};
use crate::domain::ports::{MessageSink, ProfileFetcher, Scheduler, TickFn, TimerHandle};
use crate::error::{FetchError, SendError};

// ============================================================================
// In-Memory Profile Fetcher
// ============================================================================

enum Scripted {
    Posts(Vec<RawPost>),
    Error(FetchError),
}

/// Serves canned timelines per UID and records every request
#[derive(Default)]
pub struct InMemoryProfileFetcher {
    timelines: Arc<RwLock<HashMap<String, Scripted>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl InMemoryProfileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `posts` (newest first) for `uid`
    pub fn with_posts(self, uid: &str, posts: Vec<RawPost>) -> Self {
        self.timelines
            .write()
            .unwrap()
            .insert(uid.to_string(), Scripted::Posts(posts));
        self
    }

    /// Fail every fetch for `uid`
    pub fn with_error(self, uid: &str, error: FetchError) -> Self {
        self.timelines
            .write()
            .unwrap()
            .insert(uid.to_string(), Scripted::Error(error));
        self
    }

    /// UIDs fetched so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }
}

fn replay(error: &FetchError) -> FetchError {
    match error {
        FetchError::Api { status, message } => FetchError::Api {
            status: *status,
            message: message.clone(),
        },
        other => FetchError::Deserialization(other.to_string()),
    }
}

#[async_trait]
impl ProfileFetcher for InMemoryProfileFetcher {
    async fn latest_posts(&self, weibo_uid: &str) -> Result<Vec<RawPost>, FetchError> {
        self.requests.write().unwrap().push(weibo_uid.to_string());

        match self.timelines.read().unwrap().get(weibo_uid) {
            Some(Scripted::Posts(posts)) => Ok(posts.clone()),
            Some(Scripted::Error(error)) => Err(replay(error)),
            None => Err(FetchError::Api {
                status: 404,
                message: format!("no timeline for {}", weibo_uid),
            }),
        }
    }
}

// ============================================================================
// Recording Message Sink
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub bot: BotKey,
    pub group_id: String,
    pub message: String,
}

/// Records delivered messages instead of sending them
#[derive(Default)]
pub struct RecordingMessageSink {
    sent: Arc<RwLock<Vec<SentMessage>>>,
    should_fail: bool,
}

impl RecordingMessageSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            should_fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.read().unwrap().clone()
    }
}

#[async_trait]
impl MessageSink for RecordingMessageSink {
    async fn send(&self, bot: &BotKey, group_id: &str, message: &str) -> Result<(), SendError> {
        if self.should_fail {
            return Err(SendError::Api {
                status: 500,
                message: "Mock failure".to_string(),
            });
        }

        self.sent.write().unwrap().push(SentMessage {
            bot: bot.clone(),
            group_id: group_id.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

// ============================================================================
// Manual Scheduler
// ============================================================================

struct Registration {
    period: Duration,
    tick: TickFn,
    cancelled: Arc<AtomicBool>,
}

/// Scheduler whose timers only fire when the test says so
#[derive(Default)]
pub struct ManualScheduler {
    timers: RwLock<Vec<Registration>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Periods of every registered timer
    pub fn periods(&self) -> Vec<Duration> {
        self.timers
            .read()
            .unwrap()
            .iter()
            .map(|t| t.period)
            .collect()
    }

    /// Fire every timer that has not been cancelled, once
    pub async fn fire(&self) {
        let ticks: Vec<TickFn> = self
            .timers
            .read()
            .unwrap()
            .iter()
            .filter(|t| !t.cancelled.load(Ordering::SeqCst))
            .map(|t| t.tick.clone())
            .collect();

        for tick in ticks {
            tick().await;
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, period: Duration, tick: TickFn) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.timers.write().unwrap().push(Registration {
            period,
            tick,
            cancelled: cancelled.clone(),
        });

        TimerHandle::new(move || cancelled.store(true, Ordering::SeqCst))
    }
}
