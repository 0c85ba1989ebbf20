use std::env;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::app::FailurePolicy;
use crate::domain::entities::{poll_period, BotKey, Subscription, MAX_POLL_MINUTES};
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "weibo-monitor.json";

fn default_platform() -> String {
    "onebot".to_string()
}

fn default_wait_minutes() -> u64 {
    3
}

fn default_onebot_url() -> String {
    "http://127.0.0.1:5700".to_string()
}

/// Monitor configuration, keyed the way the host plugin schema names things
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Bot account (QQ number)
    pub account: String,
    /// Bot platform; the key is spelled `plantform` in the host schema
    #[serde(rename = "plantform", alias = "platform", default = "default_platform")]
    pub platform: String,
    /// Minutes between polls, also the freshness window
    #[serde(default = "default_wait_minutes")]
    pub wait_minutes: u64,
    #[serde(rename = "sendINFO", default)]
    pub send_info: Vec<SendInfo>,
    /// Static Weibo session cookie
    #[serde(default)]
    pub cookie: Option<String>,
    #[serde(default = "default_onebot_url")]
    pub onebot_url: String,
    #[serde(default)]
    pub onebot_access_token: Option<String>,
    /// Abort the rest of a tick on the first fetch or send failure
    #[serde(default)]
    pub fail_fast: bool,
}

/// One listen-and-send entry
#[derive(Debug, Clone, Deserialize)]
pub struct SendInfo {
    /// Mention everyone in the group
    #[serde(rename = "sendAll", default)]
    pub send_all: bool,
    #[serde(rename = "weiboUID", default)]
    pub weibo_uid: Option<String>,
    #[serde(rename = "groupID")]
    pub group_id: String,
}

impl Config {
    /// Load from the file named by `WEIBO_MONITOR_CONFIG`, then apply env overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path =
            env::var("WEIBO_MONITOR_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let config = Self::read_file(&path)?.with_overrides(|key| env::var(key).ok());

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replace connection settings with `WEIBO_COOKIE`, `ONEBOT_URL` and
    /// `ONEBOT_ACCESS_TOKEN` when `var` yields them
    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(cookie) = var("WEIBO_COOKIE") {
            self.cookie = Some(cookie);
        }
        if let Some(url) = var("ONEBOT_URL") {
            self.onebot_url = url;
        }
        if let Some(token) = var("ONEBOT_ACCESS_TOKEN") {
            self.onebot_access_token = Some(token);
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.account.trim().is_empty() {
            return Err(ConfigError::Validation("account must be set".to_string()));
        }
        if self.wait_minutes < 1 {
            return Err(ConfigError::Validation(
                "waitMinutes must be at least 1".to_string(),
            ));
        }
        if self.wait_minutes > MAX_POLL_MINUTES {
            return Err(ConfigError::Validation(format!(
                "waitMinutes must be at most {}",
                MAX_POLL_MINUTES
            )));
        }
        if let Some(i) = self.send_info.iter().position(|s| s.group_id.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "sendINFO[{}].groupID must be set",
                i
            )));
        }
        Ok(())
    }

    pub fn bot(&self) -> BotKey {
        BotKey::new(&self.platform, &self.account)
    }

    /// Timer period for the polling loop
    pub fn poll_period(&self) -> Duration {
        poll_period(self.wait_minutes)
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::Isolate
        }
    }

    /// Subscriptions in configured order; entries without a UID are skipped
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.send_info
            .iter()
            .filter_map(|info| {
                let Some(uid) = info.weibo_uid.as_deref().filter(|u| !u.is_empty()) else {
                    tracing::debug!(group = %info.group_id, "Skipping sendINFO entry without weiboUID");
                    return None;
                };
                Some(Subscription {
                    bot: self.bot(),
                    poll_interval_minutes: self.wait_minutes,
                    weibo_uid: uid.to_string(),
                    group_id: info.group_id.clone(),
                    send_all: info.send_all,
                })
            })
            .collect()
    }
}
