//! Weibo profile endpoint client

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, COOKIE, REFERER, USER_AGENT,
};
use reqwest::Client;
use urlencoding::encode;

use crate::domain::entities::{ProfileTimeline, RawPost};
use crate::domain::ports::ProfileFetcher;
use crate::error::FetchError;

pub const WEIBO_BASE_URL: &str = "https://weibo.com";

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
const ACCEPT_LANGUAGE_VALUE: &str = "zh-CN,zh;q=0.9,en;q=0.8,en-GB;q=0.7,en-US;q=0.6";
const REFERER_VALUE: &str = "https://passport.weibo.com/";
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

/// Implementation of the profile fetcher against `weibo.com/ajax`
pub struct WeiboClient {
    http: Client,
    base_url: String,
}

impl WeiboClient {
    /// Create a client for `weibo.com`, sending `cookie` with every request
    pub fn new(cookie: Option<&str>) -> Result<Self, FetchError> {
        Self::with_base_url(WEIBO_BASE_URL, cookie)
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(base_url: &str, cookie: Option<&str>) -> Result<Self, FetchError> {
        let http = Client::builder()
            .default_headers(default_headers(cookie)?)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn timeline_url(&self, weibo_uid: &str) -> String {
        format!(
            "{}/ajax/statuses/mymblog?uid={}",
            self.base_url,
            encode(weibo_uid)
        )
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Vec<RawPost>, FetchError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            let timeline: ProfileTimeline = serde_json::from_str(&body)
                .map_err(|e| FetchError::Deserialization(e.to_string()))?;
            Ok(timeline.into_posts())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(FetchError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn default_headers(cookie: Option<&str>) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(REFERER, HeaderValue::from_static(REFERER_VALUE));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    if let Some(cookie) = cookie.filter(|c| !c.is_empty()) {
        headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
    }

    Ok(headers)
}

#[async_trait]
impl ProfileFetcher for WeiboClient {
    async fn latest_posts(&self, weibo_uid: &str) -> Result<Vec<RawPost>, FetchError> {
        let response = self.http.get(self.timeline_url(weibo_uid)).send().await?;
        self.handle_response(response).await
    }
}
