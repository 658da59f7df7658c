// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Moraby Bot Binary
//!
//! Starts the Telegram coaching bot with its keep-alive HTTP server. When a
//! public webhook URL is configured the bot registers it and serves
//! deliveries over HTTP; otherwise it falls back to long polling.

use anyhow::{Context, Result};
use clap::Parser;
use moraby_bot::{
    analysis::WorkoutAdvisor,
    augment::{OpenAiAugmenter, TextAugmenter},
    bot::{self, BotHandler, TelegramClient},
    catalog::ExerciseCatalog,
    config::{CoachConfig, Config},
    constants::WEBHOOK_PATH,
    database::Database,
    health::{routes::health_routes, HealthChecker},
    logging,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use warp::Filter;

#[derive(Parser)]
#[command(name = "moraby-bot")]
#[command(about = "Telegram coaching bot for Persian-language workout analysis")]
pub struct Args {
    /// Configuration file path (defaults to the platform config directory,
    /// then environment variables)
    #[arg(short, long)]
    config: Option<String>,

    /// Exercise catalog file (defaults to ./catalog.toml, then embedded
    /// defaults)
    #[arg(long)]
    catalog: Option<String>,

    /// Coaching configuration file (defaults to ./coach_config.toml, then
    /// embedded defaults)
    #[arg(long)]
    coach_config: Option<String>,

    /// Port override for the keep-alive/webhook HTTP server
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;

    let args = Args::parse();

    let config = Config::load(args.config)?;
    let port = args.port.unwrap_or(config.http_port);

    info!("Port: {}", port);
    info!("Database: {}", config.database_url);

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized successfully");

    let catalog = ExerciseCatalog::load(args.catalog)?;
    let coach_config = CoachConfig::load(args.coach_config)?;
    info!("Exercise catalog loaded: {} entries", catalog.len());

    let advisor = Arc::new(WorkoutAdvisor::new(catalog, coach_config));

    let augmenter: Option<Arc<dyn TextAugmenter>> = match &config.openai_api_key {
        Some(api_key) => {
            info!("Augmentation enabled");
            Some(Arc::new(OpenAiAugmenter::new(api_key.clone())))
        }
        None => {
            info!("Augmentation disabled (no API key)");
            None
        }
    };

    let client = TelegramClient::new(config.telegram.token.clone());
    let handler = Arc::new(BotHandler::new(
        client.clone(),
        database.clone(),
        advisor,
        augmenter,
    ));

    let health = health_routes(HealthChecker::new(database));

    match &config.telegram.webhook_url {
        Some(webhook_url) => {
            url::Url::parse(webhook_url).context("WEBHOOK_URL is not a valid URL")?;
            let endpoint = format!("{}/{}", webhook_url.trim_end_matches('/'), WEBHOOK_PATH);
            client.set_webhook(&endpoint).await?;
            info!("Webhook registered: {}", endpoint);

            spawn_keep_alive_ping(webhook_url.clone());

            let routes = health.or(bot::webhook_filter(handler));
            info!("🚀 Moraby bot serving webhook on port {}", port);
            warp::serve(routes).run(([0, 0, 0, 0], port)).await;
        }
        None => {
            tokio::spawn(async move {
                warp::serve(health).run(([0, 0, 0, 0], port)).await;
            });
            info!("🚀 Moraby bot polling for updates (health server on port {})", port);
            bot::run_polling(client, handler).await?;
        }
    }

    Ok(())
}

/// Ping the public URL every five minutes so free hosting tiers don't put
/// the service to sleep.
fn spawn_keep_alive_ping(url: String) {
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        loop {
            tokio::time::sleep(Duration::from_secs(300)).await;
            match client.get(&url).timeout(Duration::from_secs(10)).send().await {
                Ok(_) => info!("Keep-alive ping sent"),
                Err(err) => warn!(error = %err, "Keep-alive ping failed"),
            }
        }
    });
}
