// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for the Moraby bot

pub mod coach_config;

use crate::constants::env_config;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use coach_config::CoachConfig;

/// Top-level application configuration, loaded from a TOML file or the
/// environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub database_url: String,
    /// OpenAI API key; absent disables the augmentation feature
    pub openai_api_key: Option<String>,
    /// Port for the keep-alive/webhook HTTP server
    pub http_port: u16,
}

/// Telegram transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    /// Bot API token from @BotFather
    pub token: String,
    /// Public base URL for webhook delivery; absent means long polling
    pub webhook_url: Option<String>,
}

impl Config {
    /// Load configuration from a file if one exists, otherwise from the
    /// environment (reading `.env` first).
    pub fn load(path: Option<String>) -> Result<Self> {
        let config_path = path.unwrap_or_else(|| {
            dirs::config_dir()
                .map(|p| p.join("moraby-bot/config.toml"))
                .unwrap_or_else(|| "config.toml".into())
                .to_string_lossy()
                .to_string()
        });

        if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            dotenv::dotenv().ok();

            let token = env_config::bot_token()
                .context("BOT_TOKEN is not set and no config file was found")?;

            Ok(Config {
                telegram: TelegramConfig {
                    token,
                    webhook_url: env_config::webhook_url(),
                },
                database_url: env_config::database_url(),
                openai_api_key: env_config::openai_api_key(),
                http_port: env_config::http_port(),
            })
        }
    }

    #[allow(dead_code)]
    pub fn save(&self, path: Option<String>) -> Result<()> {
        let config_path = path.unwrap_or_else(|| {
            dirs::config_dir()
                .map(|p| p.join("moraby-bot/config.toml"))
                .unwrap_or_else(|| "config.toml".into())
                .to_string_lossy()
                .to_string()
        });

        let parent = Path::new(&config_path)
            .parent()
            .context("Invalid config path")?;
        fs::create_dir_all(parent)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(())
    }
}
