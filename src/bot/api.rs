// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Minimal Telegram Bot API client
//!
//! Only the handful of methods the bot needs: sending messages, answering
//! callback queries, webhook management, and long polling.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// One incoming update from Telegram.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// An incoming chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<TelegramUser>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// The Telegram account behind a message or callback.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A button press on an inline keyboard.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: TelegramUser,
    #[serde(default)]
    pub data: Option<String>,
}

/// Persistent reply keyboard shown under the input field.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

/// Inline keyboard attached to a specific message.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

/// Either kind of keyboard, serialized as Telegram expects.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard(ReplyKeyboardMarkup),
    Inline(InlineKeyboardMarkup),
}

/// Telegram Bot API response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Thin client over the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    token: String,
    api_base: String,
}

impl TelegramClient {
    pub fn new(token: String) -> Self {
        Self {
            client: Client::new(),
            token,
            api_base: TELEGRAM_API_BASE.to_string(),
        }
    }

    /// Override the API base URL, used by tests to point at a mock server.
    pub fn with_api_base(token: String, api_base: String) -> Self {
        Self {
            client: Client::new(),
            token,
            api_base,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        payload: serde_json::Value,
    ) -> Result<T> {
        let response: ApiResponse<T> = self
            .client
            .post(self.method_url(method))
            .json(&payload)
            .send()
            .await?
            .json()
            .await
            .with_context(|| format!("Telegram {} returned an unreadable response", method))?;

        if !response.ok {
            anyhow::bail!(
                "Telegram {} failed: {}",
                method,
                response.description.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        response
            .result
            .with_context(|| format!("Telegram {} returned no result", method))
    }

    /// Send a Markdown-formatted message, optionally with a keyboard.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<ReplyMarkup>,
    ) -> Result<()> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });
        if let Some(markup) = reply_markup {
            payload["reply_markup"] = serde_json::to_value(markup)?;
        }

        self.call::<serde_json::Value>("sendMessage", payload).await?;
        Ok(())
    }

    /// Acknowledge a callback query, optionally with a toast text.
    pub async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        let mut payload = json!({ "callback_query_id": callback_id });
        if let Some(text) = text {
            payload["text"] = json!(text);
        }

        // answerCallbackQuery returns plain `true`.
        self.call::<bool>("answerCallbackQuery", payload).await?;
        Ok(())
    }

    /// Register the webhook endpoint with Telegram.
    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        self.call::<bool>("setWebhook", json!({ "url": url })).await?;
        Ok(())
    }

    /// Remove a previously registered webhook.
    pub async fn delete_webhook(&self) -> Result<()> {
        self.call::<bool>("deleteWebhook", json!({})).await?;
        Ok(())
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            json!({ "offset": offset, "timeout": timeout_secs }),
        )
        .await
    }
}
