// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Bot Module
//!
//! The Telegram transport layer: API client, keyboards, conversation
//! handlers, and the two delivery modes (webhook and long polling). The
//! analysis engine is invoked from here and nowhere else.

pub mod api;
pub mod handlers;
pub mod keyboard;

pub use api::{TelegramClient, Update};
pub use handlers::BotHandler;

use crate::constants::WEBHOOK_PATH;
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use warp::Filter;

/// Warp filter accepting webhook deliveries at `POST /webhook`.
///
/// Updates are handed to the handler in a spawned task so Telegram gets its
/// 200 immediately and a slow handler cannot stall delivery.
pub fn webhook_filter(
    handler: Arc<BotHandler>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let handler_filter = warp::any().map(move || handler.clone());

    warp::path(WEBHOOK_PATH)
        .and(warp::post())
        .and(warp::body::json())
        .and(handler_filter)
        .map(|update: Update, handler: Arc<BotHandler>| {
            tokio::spawn(async move {
                handler.handle_update(update).await;
            });
            warp::reply()
        })
}

/// Long-polling update loop, used when no public webhook URL is configured.
///
/// Runs until the process exits; transport errors back off briefly and the
/// loop continues.
pub async fn run_polling(client: TelegramClient, handler: Arc<BotHandler>) -> Result<()> {
    // A stale webhook blocks getUpdates; clear it first.
    client.delete_webhook().await?;
    info!("Starting long-polling update loop");

    let mut offset: i64 = 0;
    loop {
        match client.get_updates(offset, 30).await {
            Ok(updates) => {
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    handler.handle_update(update).await;
                }
            }
            Err(err) => {
                error!(error = %err, "getUpdates failed; backing off");
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            }
        }
    }
}
