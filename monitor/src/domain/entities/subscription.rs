//! Subscription domain entity
//!
//! One monitored Weibo profile paired with the chat group it reports to.

use std::time::Duration;

/// Fallback poll period when no positive interval is configured
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(60);

/// Longest accepted poll interval, one week
pub const MAX_POLL_MINUTES: u64 = 7 * 24 * 60;

pub const MAX_POLL_PERIOD: Duration = Duration::from_secs(MAX_POLL_MINUTES * 60);

/// Key of a bot session in the host registry, e.g. `onebot:10001`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BotKey {
    pub platform: String,
    pub account: String,
}

impl BotKey {
    pub fn new(platform: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            account: account.into(),
        }
    }
}

impl std::fmt::Display for BotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.platform, self.account)
    }
}

/// A configured (profile, destination) pairing.
///
/// Built once from configuration at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub bot: BotKey,
    pub poll_interval_minutes: u64,
    pub weibo_uid: String,
    pub group_id: String,
    pub send_all: bool,
}

impl Subscription {
    /// Poll period, which is also the freshness window
    pub fn poll_period(&self) -> Duration {
        poll_period(self.poll_interval_minutes)
    }
}

/// `minutes` as a timer period, falling back to one minute for zero.
///
/// Capped at [`MAX_POLL_PERIOD`].
pub fn poll_period(minutes: u64) -> Duration {
    if minutes == 0 {
        return DEFAULT_POLL_PERIOD;
    }
    minutes
        .checked_mul(60)
        .map(Duration::from_secs)
        .map_or(MAX_POLL_PERIOD, |period| period.min(MAX_POLL_PERIOD))
}
