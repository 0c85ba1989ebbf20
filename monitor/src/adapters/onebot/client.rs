//! OneBot v11 HTTP API message sink
//!
//! Delivers group messages through `POST /send_group_msg`, translating the
//! inline `<img>` and `<at>` markup into CQ codes.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::entities::BotKey;
use crate::domain::ports::MessageSink;
use crate::error::SendError;

pub const ONEBOT_PLATFORM: &str = "onebot";

static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img src="([^"]*)"\s*/>|<at id="([^"]*)"\s*/>"#).expect("markup pattern is valid")
});

/// OneBot bot session reachable over HTTP
pub struct OneBotSink {
    http: Client,
    base_url: String,
    account: String,
}

impl OneBotSink {
    pub fn new(
        base_url: &str,
        account: &str,
        access_token: Option<&str>,
    ) -> Result<Self, SendError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = access_token.filter(|t| !t.is_empty()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            account: account.to_string(),
        })
    }

    fn api_url(&self, action: &str) -> String {
        format!("{}/{}", self.base_url, action)
    }

    fn serves(&self, bot: &BotKey) -> bool {
        bot.platform == ONEBOT_PLATFORM && bot.account == self.account
    }
}

#[derive(Serialize)]
struct SendGroupMsgRequest<'a> {
    group_id: GroupId<'a>,
    message: String,
}

/// Numeric group ids are sent as numbers, anything else verbatim
#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
enum GroupId<'a> {
    Number(i64),
    Text(&'a str),
}

impl<'a> From<&'a str> for GroupId<'a> {
    fn from(id: &'a str) -> Self {
        id.parse().map(GroupId::Number).unwrap_or(GroupId::Text(id))
    }
}

#[derive(Deserialize)]
struct OneBotResponse {
    status: String,
    #[serde(default)]
    retcode: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    wording: Option<String>,
}

#[async_trait]
impl MessageSink for OneBotSink {
    async fn send(&self, bot: &BotKey, group_id: &str, message: &str) -> Result<(), SendError> {
        if !self.serves(bot) {
            return Err(SendError::UnknownBot(bot.to_string()));
        }

        let request = SendGroupMsgRequest {
            group_id: group_id.into(),
            message: to_cq_message(message),
        };

        let response = self
            .http
            .post(self.api_url("send_group_msg"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: OneBotResponse = response.json().await?;
        check_response(body)
    }
}

fn check_response(body: OneBotResponse) -> Result<(), SendError> {
    if body.status == "ok" {
        Ok(())
    } else {
        Err(SendError::Rejected {
            retcode: body.retcode,
            message: body.wording.or(body.message).unwrap_or(body.status),
        })
    }
}

/// Convert host markup to a OneBot CQ-code message
pub fn to_cq_message(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut last = 0;

    for caps in MARKUP.captures_iter(message) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&escape_text(&message[last..whole.start()]));

        if let Some(src) = caps.get(1) {
            out.push_str(&format!("[CQ:image,file={}]", escape_param(src.as_str())));
        } else if let Some(id) = caps.get(2) {
            out.push_str(&format!("[CQ:at,qq={}]", escape_param(id.as_str())));
        }
        last = whole.end();
    }

    out.push_str(&escape_text(&message[last..]));
    out
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('[', "&#91;")
        .replace(']', "&#93;")
}

fn escape_param(s: &str) -> String {
    escape_text(s).replace(',', "&#44;")
}
