//! Weibo adapter
//!
//! Profile timeline client for `weibo.com`.

pub mod client;

pub use client::WeiboClient;
