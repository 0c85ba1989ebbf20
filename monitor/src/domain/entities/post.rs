//! Weibo post domain entity
//!
//! Represents one entry of a profile timeline as returned by
//! `/ajax/statuses/mymblog`. Every field is optional; which ones are present
//! depends on the kind of post.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Marks a field as present even when its value is `null`.
///
/// Used with `#[serde(default)]`: a missing field stays `None`, a `null`
/// field becomes `Some(T::default())`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?.unwrap_or_default()))
}

/// Timeline response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileTimeline {
    #[serde(default)]
    pub data: Option<TimelineData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelineData {
    #[serde(default)]
    pub list: Option<Vec<RawPost>>,
}

impl ProfileTimeline {
    /// Posts newest first; missing `data` or `list` means no posts
    pub fn into_posts(self) -> Vec<RawPost> {
        self.data.and_then(|d| d.list).unwrap_or_default()
    }
}

/// A raw post record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user: Option<PostAuthor>,
    #[serde(default)]
    pub mid: Option<String>,
    #[serde(default)]
    pub text_raw: Option<String>,
    #[serde(default)]
    pub pic_ids: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub pic_infos: Option<HashMap<String, PicInfo>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub page_info: Option<PageInfo>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub topic_struct: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub retweeted_status: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostAuthor {
    #[serde(default)]
    pub screen_name: Option<String>,
}

/// Media card attached to a post (videos, articles, links)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub media_info: Option<MediaInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub h5_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PicInfo {
    #[serde(default)]
    pub large: Option<PicVariant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PicVariant {
    #[serde(default)]
    pub url: Option<String>,
}

impl RawPost {
    pub fn screen_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.screen_name.as_deref())
            .unwrap_or_default()
    }

    pub fn text(&self) -> &str {
        self.text_raw.as_deref().unwrap_or_default()
    }

    pub fn mid(&self) -> &str {
        self.mid.as_deref().unwrap_or_default()
    }

    /// Video URL, when the post carries a video card
    pub fn video_url(&self) -> Option<&str> {
        let page = self.page_info.as_ref()?;
        if page.object_type.as_deref() != Some("video") {
            return None;
        }
        Some(
            page.media_info
                .as_ref()
                .and_then(|m| m.h5_url.as_deref())
                .unwrap_or_default(),
        )
    }

    pub fn is_repost(&self) -> bool {
        self.topic_struct.is_some() || self.retweeted_status.is_some()
    }

    /// Large URL of the first picture, when the post carries pictures
    pub fn first_picture_url(&self) -> Option<&str> {
        let infos = self.pic_infos.as_ref()?;
        let url = self
            .pic_ids
            .as_ref()
            .and_then(|ids| ids.first())
            .and_then(|id| infos.get(id))
            .and_then(|info| info.large.as_ref())
            .and_then(|large| large.url.as_deref())
            .unwrap_or_default();
        Some(url)
    }
}

/// Classified post variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind<'a> {
    Video { url: &'a str },
    Repost,
    Image { picture_url: &'a str },
    Generic,
}

impl<'a> PostKind<'a> {
    /// Classify by structure. First match wins: video, repost, image.
    pub fn classify(post: &'a RawPost) -> Self {
        if let Some(url) = post.video_url() {
            return PostKind::Video { url };
        }
        if post.is_repost() {
            return PostKind::Repost;
        }
        if let Some(picture_url) = post.first_picture_url() {
            return PostKind::Image { picture_url };
        }
        PostKind::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(value: serde_json::Value) -> RawPost {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn null_marker_counts_as_present() {
        let p = post(json!({ "retweeted_status": null }));
        assert!(p.is_repost());
        assert_eq!(PostKind::classify(&p), PostKind::Repost);
    }

    #[test]
    fn missing_marker_is_absent() {
        let p = post(json!({ "text_raw": "hi" }));
        assert!(!p.is_repost());
        assert_eq!(PostKind::classify(&p), PostKind::Generic);
    }

    #[test]
    fn video_wins_over_pictures() {
        let p = post(json!({
            "page_info": { "object_type": "video", "media_info": { "h5_url": "http://v/1" } },
            "pic_ids": ["p1"],
            "pic_infos": { "p1": { "large": { "url": "http://x/y.jpg" } } },
            "retweeted_status": {}
        }));
        assert_eq!(PostKind::classify(&p), PostKind::Video { url: "http://v/1" });
    }

    #[test]
    fn repost_wins_over_pictures() {
        let p = post(json!({
            "topic_struct": [],
            "pic_ids": ["p1"],
            "pic_infos": { "p1": { "large": { "url": "http://x/y.jpg" } } }
        }));
        assert_eq!(PostKind::classify(&p), PostKind::Repost);
    }

    #[test]
    fn non_video_page_info_is_not_a_video() {
        let p = post(json!({ "page_info": { "object_type": "article" } }));
        assert_eq!(p.video_url(), None);
        assert_eq!(PostKind::classify(&p), PostKind::Generic);
    }

    #[test]
    fn video_without_media_info_has_empty_url() {
        let p = post(json!({ "page_info": { "object_type": "video" } }));
        assert_eq!(PostKind::classify(&p), PostKind::Video { url: "" });
    }

    #[test]
    fn picture_lookup_uses_first_id() {
        let p = post(json!({
            "pic_ids": ["b", "a"],
            "pic_infos": {
                "a": { "large": { "url": "http://x/a.jpg" } },
                "b": { "large": { "url": "http://x/b.jpg" } }
            }
        }));
        assert_eq!(
            PostKind::classify(&p),
            PostKind::Image {
                picture_url: "http://x/b.jpg"
            }
        );
    }

    #[test]
    fn picture_lookup_without_ids_is_empty() {
        let p = post(json!({ "pic_infos": {} }));
        assert_eq!(PostKind::classify(&p), PostKind::Image { picture_url: "" });
    }

    #[test]
    fn timeline_without_list_is_empty() {
        let timeline: ProfileTimeline = serde_json::from_value(json!({ "ok": 1 })).unwrap();
        assert!(timeline.into_posts().is_empty());

        let timeline: ProfileTimeline =
            serde_json::from_value(json!({ "data": { "list": null } })).unwrap();
        assert!(timeline.into_posts().is_empty());
    }

    #[test]
    fn accessors_default_to_empty() {
        let p = RawPost::default();
        assert_eq!(p.screen_name(), "");
        assert_eq!(p.text(), "");
        assert_eq!(p.mid(), "");
    }
}
