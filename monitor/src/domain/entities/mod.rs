//! Domain entities
//!
//! Pure domain models: what is monitored and what comes back from Weibo.

pub mod post;
pub mod subscription;

#[allow(unused_imports)]
pub use post::{
    MediaInfo, PageInfo, PicInfo, PicVariant, PostAuthor, PostKind, ProfileTimeline, RawPost,
    TimelineData,
};
#[allow(unused_imports)]
pub use subscription::{
    poll_period, BotKey, Subscription, DEFAULT_POLL_PERIOD, MAX_POLL_MINUTES, MAX_POLL_PERIOD,
};
