// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversation-flow tests with a mocked Telegram API

use anyhow::Result;
use moraby_bot::analysis::WorkoutAdvisor;
use moraby_bot::bot::api::{CallbackQuery, Chat, Message, TelegramUser, Update};
use moraby_bot::bot::{BotHandler, TelegramClient};
use moraby_bot::catalog::ExerciseCatalog;
use moraby_bot::config::CoachConfig;
use moraby_bot::database::Database;
use std::sync::Arc;

const TOKEN: &str = "test-token";

async fn handler_with_mock(server_url: String, database: Database) -> Arc<BotHandler> {
    let client = TelegramClient::with_api_base(TOKEN.to_string(), server_url);
    let advisor = Arc::new(WorkoutAdvisor::new(
        ExerciseCatalog::default(),
        CoachConfig::default(),
    ));
    Arc::new(BotHandler::new(client, database, advisor, None))
}

fn message_update(update_id: i64, user_id: i64, text: &str) -> Update {
    Update {
        update_id,
        message: Some(Message {
            message_id: update_id,
            from: Some(TelegramUser {
                id: user_id,
                username: Some("ali".to_string()),
                first_name: Some("علی".to_string()),
                last_name: None,
            }),
            chat: Chat { id: user_id },
            text: Some(text.to_string()),
        }),
        callback_query: None,
    }
}

fn callback_update(update_id: i64, user_id: i64, data: &str) -> Update {
    Update {
        update_id,
        message: None,
        callback_query: Some(CallbackQuery {
            id: format!("cb{}", update_id),
            from: TelegramUser {
                id: user_id,
                username: None,
                first_name: None,
                last_name: None,
            },
            data: Some(data.to_string()),
        }),
    }
}

async fn send_message_mock(server: &mut mockito::Server, hits: usize) -> mockito::Mock {
    server
        .mock("POST", format!("/bot{}/sendMessage", TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true, "result": {"message_id": 1}}"#)
        .expect(hits)
        .create_async()
        .await
}

async fn answer_callback_mock(server: &mut mockito::Server) -> mockito::Mock {
    server
        .mock("POST", format!("/bot{}/answerCallbackQuery", TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true, "result": true}"#)
        .create_async()
        .await
}

#[tokio::test]
async fn test_start_flow_registers_user_and_welcomes() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let send_mock = send_message_mock(&mut server, 1).await;

    let database = Database::new("sqlite::memory:").await?;
    let handler = handler_with_mock(server.url(), database.clone()).await;

    handler.handle_update(message_update(1, 42, "/start")).await;

    send_mock.assert_async().await;
    // The user row exists now; settings were seeded with defaults.
    assert_eq!(database.total_workouts(42).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_full_workout_flow_persists_history() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    // Register prompt + analysis reply.
    let send_mock = send_message_mock(&mut server, 2).await;

    let database = Database::new("sqlite::memory:").await?;
    database
        .record_user(&moraby_bot::models::UserProfile {
            user_id: 42,
            username: None,
            first_name: None,
            last_name: None,
        })
        .await?;

    let handler = handler_with_mock(server.url(), database.clone()).await;

    handler
        .handle_update(message_update(1, 42, "🏋 ثبت برنامه تمرینی"))
        .await;
    handler
        .handle_update(message_update(2, 42, "دراز نشست=۲۰\nشنا=۱۰\nاسکات=۵"))
        .await;

    send_mock.assert_async().await;

    let workouts = database.fetch_recent_workouts(42, 5).await?;
    assert_eq!(workouts.len(), 1);
    assert_eq!(database.total_workouts(42).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_unrecognized_workout_is_rejected_not_persisted() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    // Register prompt + format-guidance error.
    let send_mock = send_message_mock(&mut server, 2).await;

    let database = Database::new("sqlite::memory:").await?;
    let handler = handler_with_mock(server.url(), database.clone()).await;

    handler
        .handle_update(message_update(1, 42, "🏋 ثبت برنامه تمرینی"))
        .await;
    handler
        .handle_update(message_update(2, 42, "سلام! امروز حال ندارم"))
        .await;

    send_mock.assert_async().await;
    assert!(database.fetch_recent_workouts(42, 5).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_workout_without_register_prompts_menu() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let send_mock = send_message_mock(&mut server, 1).await;

    let database = Database::new("sqlite::memory:").await?;
    let handler = handler_with_mock(server.url(), database.clone()).await;

    handler.handle_update(message_update(1, 42, "شنا=۱۰")).await;

    send_mock.assert_async().await;
    assert!(database.fetch_recent_workouts(42, 5).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_harder_callback_without_analysis() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let send_mock = send_message_mock(&mut server, 1).await;
    let answer_mock = answer_callback_mock(&mut server).await;

    let database = Database::new("sqlite::memory:").await?;
    let handler = handler_with_mock(server.url(), database).await;

    handler.handle_update(callback_update(1, 42, "harder")).await;

    send_mock.assert_async().await;
    answer_mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_harder_callback_after_analysis() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    // Register prompt, analysis reply, and the harder rewrite.
    let send_mock = send_message_mock(&mut server, 3).await;
    let answer_mock = answer_callback_mock(&mut server).await;

    let database = Database::new("sqlite::memory:").await?;
    let handler = handler_with_mock(server.url(), database).await;

    handler
        .handle_update(message_update(1, 42, "🏋 ثبت برنامه تمرینی"))
        .await;
    handler.handle_update(message_update(2, 42, "شنا=۱۰")).await;
    handler.handle_update(callback_update(3, 42, "harder")).await;

    send_mock.assert_async().await;
    answer_mock.assert_async().await;

    Ok(())
}
