//! Application layer
//!
//! Contains use cases and service orchestration.
//! The service coordinates the Weibo fetcher, the renderer and the bot sink.

pub mod monitor_service;
pub mod timestamp_parser;

#[allow(unused_imports)]
pub use monitor_service::{FailurePolicy, MonitorService, PollOutcome, TickReport};
pub use timestamp_parser::parse_timestamp;
