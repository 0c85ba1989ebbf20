//! Domain ports (traits)
//!
//! Port traits define the capabilities the monitor requires from its host.
//! Adapters provide concrete implementations of these traits.

pub mod messaging;
pub mod scheduler;
pub mod weibo;

pub use messaging::MessageSink;
#[allow(unused_imports)]
pub use scheduler::{Scheduler, TickFn, TickFuture, TimerHandle};
pub use weibo::ProfileFetcher;
