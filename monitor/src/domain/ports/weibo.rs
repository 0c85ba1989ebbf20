//! Weibo profile port trait
//!
//! Defines the interface for reading a profile's latest posts.

use async_trait::async_trait;

use crate::domain::entities::RawPost;
use crate::error::FetchError;

/// Port trait for the profile timeline endpoint
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Fetch a profile's posts, newest first
    async fn latest_posts(&self, weibo_uid: &str) -> Result<Vec<RawPost>, FetchError>;
}
