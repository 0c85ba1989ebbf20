//! Unified error types for the Weibo monitor
//!
//! This module defines error types for each layer:
//! - `FetchError`: Weibo profile endpoint errors
//! - `TimestampError`: Unparseable `created_at` values
//! - `SendError`: Message delivery errors
//! - `ConfigError`: Startup configuration errors
//! - `MonitorError`: Application layer errors (wraps the above per subscription)

use thiserror::Error;

/// Weibo profile endpoint errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Timestamp parse errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Invalid date format: {0:?}")]
    InvalidFormat(String),
}

/// Message delivery errors
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("No bot registered for {0}")]
    UnknownBot(String),

    #[error("Message rejected (retcode {retcode}): {message}")]
    Rejected { retcode: i64, message: String },

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Validation(String),
}

/// Application layer errors - one subscription's failure within a tick
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Timestamp error: {0}")]
    Timestamp(#[from] TimestampError),

    #[error("Send error: {0}")]
    Send(#[from] SendError),
}

impl MonitorError {
    /// Whether this failure stops the rest of the tick under the fail-fast policy.
    ///
    /// Bad timestamps only ever cost the affected post.
    pub fn aborts_tick(&self) -> bool {
        !matches!(self, MonitorError::Timestamp(_))
    }
}
