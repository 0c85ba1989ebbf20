//! Scheduler adapter

pub mod tokio_timer;

pub use tokio_timer::TokioScheduler;
