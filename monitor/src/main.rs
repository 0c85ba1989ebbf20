//! Weibo Monitor
//!
//! Polls Weibo profiles on a fixed interval and forwards newly published
//! posts to chat groups through a OneBot bot.
//! Uses hexagonal (ports & adapters) architecture so the polling logic never
//! touches the network or the clock directly.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;

#[cfg(test)]
mod test_utils;


use adapters::{OneBotSink, TokioScheduler, WeiboClient};
use app::MonitorService;
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,weibo_monitor=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Weibo monitor...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    let subscriptions = config.subscriptions();
    if subscriptions.is_empty() {
        tracing::warn!("No sendINFO entries with a weiboUID; nothing will be polled");
    }

    // Create adapters
    let fetcher = Arc::new(
        WeiboClient::new(config.cookie.as_deref()).context("Failed to build Weibo client")?,
    );
    let sink = Arc::new(
        OneBotSink::new(
            &config.onebot_url,
            &config.account,
            config.onebot_access_token.as_deref(),
        )
        .context("Failed to build OneBot client")?,
    );

    // Create application service
    let service = Arc::new(
        MonitorService::new(fetcher, sink, subscriptions).with_policy(config.failure_policy()),
    );

    let mut timer = service.start(&TokioScheduler::new(), config.poll_period());

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("Shutting down");
    timer.cancel();

    Ok(())
}
