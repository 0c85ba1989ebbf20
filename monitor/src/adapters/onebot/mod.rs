//! OneBot adapter
//!
//! Message delivery through a OneBot v11 HTTP endpoint.

pub mod client;

pub use client::OneBotSink;
