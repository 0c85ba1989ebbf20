//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod onebot;
pub mod scheduler;
pub mod weibo;

pub use onebot::OneBotSink;
pub use scheduler::TokioScheduler;
pub use weibo::WeiboClient;
