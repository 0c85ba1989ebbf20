//! Test fixtures
//!
//! Factory functions for subscriptions and posts of each kind.
//! Post factories take the creation instant so tests control freshness.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::entities::{
    BotKey, MediaInfo, PageInfo, PicInfo, PicVariant, PostAuthor, RawPost, Subscription,
};

/// Format `at` the way Weibo does, in China Standard Time
pub fn created_at(at: DateTime<Utc>) -> String {
    let cst = FixedOffset::east_opt(8 * 3600).expect("valid offset");
    at.with_timezone(&cst)
        .format("%a %b %d %H:%M:%S %z %Y")
        .to_string()
}

/// Subscription from the end-to-end scenario: uid 123 -> group g1 every 3 minutes
pub fn test_subscription() -> Subscription {
    test_subscription_for("123", "g1")
}

pub fn test_subscription_for(weibo_uid: &str, group_id: &str) -> Subscription {
    Subscription {
        bot: BotKey::new("onebot", "10001"),
        poll_interval_minutes: 3,
        weibo_uid: weibo_uid.to_string(),
        group_id: group_id.to_string(),
        send_all: false,
    }
}

fn base_post(at: DateTime<Utc>, mid: &str, text: &str) -> RawPost {
    RawPost {
        created_at: Some(created_at(at)),
        user: Some(PostAuthor {
            screen_name: Some("A".to_string()),
        }),
        mid: Some(mid.to_string()),
        text_raw: Some(text.to_string()),
        ..Default::default()
    }
}

pub fn test_video_post(at: DateTime<Utc>) -> RawPost {
    RawPost {
        page_info: Some(PageInfo {
            object_type: Some("video".to_string()),
            media_info: Some(MediaInfo {
                h5_url: Some("http://video/1".to_string()),
            }),
        }),
        ..base_post(at, "101", "watch this")
    }
}

pub fn test_repost(at: DateTime<Utc>) -> RawPost {
    RawPost {
        retweeted_status: Some(serde_json::json!({ "mid": "50" })),
        ..base_post(at, "102", "sharing")
    }
}

/// Image post from the end-to-end scenario
pub fn test_image_post(at: DateTime<Utc>) -> RawPost {
    let mut pic_infos = HashMap::new();
    pic_infos.insert(
        "p1".to_string(),
        PicInfo {
            large: Some(PicVariant {
                url: Some("http://x/y.jpg".to_string()),
            }),
        },
    );

    RawPost {
        pic_ids: Some(vec!["p1".to_string()]),
        pic_infos: Some(pic_infos),
        ..base_post(at, "999", "hello")
    }
}

pub fn test_generic_post(at: DateTime<Utc>) -> RawPost {
    base_post(at, "104", "just text")
}
