//! Post renderer
//!
//! Turns the newest post of a profile into a chat message, or nothing when
//! the post falls outside the freshness window.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::app::parse_timestamp;
use crate::domain::entities::{PostKind, RawPost, Subscription};
use crate::error::TimestampError;

/// Base of the mobile permalink for a post `mid`
pub const PERMALINK_BASE: &str = "https://m.weibo.cn/status/";

/// Markup that mentions every member of the destination group
pub const BROADCAST_MENTION: &str = r#"<at id="all"/>"#;

/// Render the message for `post`, or `None` if it is stale.
///
/// A post is stale when it was created before `now - subscription.poll_period()`.
pub fn render(
    subscription: &Subscription,
    post: &RawPost,
    now: DateTime<Utc>,
) -> Result<Option<String>, TimestampError> {
    render_post(post, subscription.poll_period(), now)
}

/// Render `post` against an explicit freshness window
pub fn render_post(
    post: &RawPost,
    window: Duration,
    now: DateTime<Utc>,
) -> Result<Option<String>, TimestampError> {
    let created_at = post
        .created_at
        .as_deref()
        .ok_or_else(|| TimestampError::InvalidFormat(String::new()))?;
    let posted = parse_timestamp(created_at)?;

    if !is_fresh(posted, window, now) {
        return Ok(None);
    }

    let mut message = render_body(post, PostKind::classify(post));
    message.push_str(&permalink(post.mid()));
    Ok(Some(message))
}

/// Whether a post created at `posted` is inside the window ending at `now`
pub fn is_fresh(posted: DateTime<Utc>, window: Duration, now: DateTime<Utc>) -> bool {
    let window = TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX);
    match now.checked_sub_signed(window) {
        Some(cutoff) => posted >= cutoff,
        None => true,
    }
}

fn render_body(post: &RawPost, kind: PostKind<'_>) -> String {
    let name = post.screen_name();
    let text = post.text();

    match kind {
        PostKind::Video { url } => format!("{} 发布了微博:\n{}\n{}", name, text, url),
        PostKind::Repost => format!("{} 转发了微博:\n{}", name, text),
        PostKind::Image { picture_url } => format!(
            "{} 发布了微博:\n{}\n{}",
            name,
            text,
            image_tag(picture_url)
        ),
        PostKind::Generic => format!("{} 发布了微博:\n{}", name, text),
    }
}

fn image_tag(src: &str) -> String {
    format!(r#"<img src="{}"/>"#, src)
}

/// Permalink suffix, including its leading newline
pub fn permalink(mid: &str) -> String {
    format!("\n链接：{}{}", PERMALINK_BASE, mid)
}

/// Prefix `message` with the group-wide mention
pub fn with_broadcast_mention(message: &str) -> String {
    format!("{} {}", BROADCAST_MENTION, message)
}
