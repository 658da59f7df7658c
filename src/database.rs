// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Database Management
//!
//! SQLite persistence for users, their settings, and workout history. The
//! analysis engine never touches this module; the conversation layer owns
//! when results are persisted, and a persistence failure must never erase
//! an analysis the user has already been shown.

use crate::analysis::WorkoutAnalysis;
use crate::models::{FitnessLevel, UserProfile, UserSettings, WorkoutSummary};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite, SqlitePool};

/// Database manager for user and workout-history storage.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist.
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                username TEXT,
                first_name TEXT,
                last_name TEXT,
                registered_at TEXT NOT NULL,
                settings TEXT NOT NULL,
                total_workouts INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS workout_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                workout_date TEXT NOT NULL,
                workout_text TEXT NOT NULL,
                workout_type TEXT NOT NULL,
                intensity TEXT NOT NULL,
                calories_burned REAL NOT NULL DEFAULT 0,
                analysis_result TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_history_user ON workout_history(user_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Register a user at first contact; an already-registered user is left
    /// untouched.
    pub async fn record_user(&self, profile: &UserProfile) -> Result<()> {
        let settings = serde_json::to_string(&UserSettings::default())
            .context("Failed to serialize default settings")?;

        sqlx::query(
            r#"
            INSERT OR IGNORE INTO users (user_id, username, first_name, last_name, registered_at, settings)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.username)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(Utc::now().to_rfc3339())
        .bind(settings)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persist one analyzed workout and bump the user's workout counter.
    pub async fn save_workout_result(
        &self,
        user_id: i64,
        raw_text: &str,
        analysis: &WorkoutAnalysis,
    ) -> Result<()> {
        let analysis_json =
            serde_json::to_string(analysis).context("Failed to serialize analysis")?;

        sqlx::query(
            r#"
            INSERT INTO workout_history
                (user_id, workout_date, workout_text, workout_type, intensity, calories_burned, analysis_result)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(user_id)
        .bind(Utc::now().to_rfc3339())
        .bind(raw_text)
        .bind(&analysis.workout_type)
        .bind(analysis.intensity.as_str())
        .bind(analysis.total_calories)
        .bind(analysis_json)
        .execute(&self.pool)
        .await?;

        sqlx::query("UPDATE users SET total_workouts = total_workouts + 1 WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetch the user's most recent workouts, newest first.
    pub async fn fetch_recent_workouts(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<WorkoutSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT workout_date, workout_type, calories_burned
            FROM workout_history
            WHERE user_id = ?1
            ORDER BY workout_date DESC, id DESC
            LIMIT ?2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let date_text: String = row.try_get("workout_date")?;
                let workout_date = DateTime::parse_from_rfc3339(&date_text)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

                Ok(WorkoutSummary {
                    workout_date,
                    workout_type: row.try_get("workout_type")?,
                    calories_burned: row.try_get("calories_burned")?,
                })
            })
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()
            .context("Failed to decode workout history rows")
    }

    /// Get the user's settings; unknown users get the defaults.
    pub async fn get_user_settings(&self, user_id: i64) -> Result<UserSettings> {
        let row = sqlx::query("SELECT settings FROM users WHERE user_id = ?1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let settings_json: String = row.try_get("settings")?;
                serde_json::from_str(&settings_json).context("Failed to parse user settings")
            }
            None => Ok(UserSettings::default()),
        }
    }

    /// Replace the user's settings.
    pub async fn set_user_settings(&self, user_id: i64, settings: &UserSettings) -> Result<()> {
        let settings_json =
            serde_json::to_string(settings).context("Failed to serialize settings")?;

        sqlx::query("UPDATE users SET settings = ?1 WHERE user_id = ?2")
            .bind(settings_json)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Update just the self-reported fitness level.
    pub async fn update_fitness_level(&self, user_id: i64, level: FitnessLevel) -> Result<()> {
        let mut settings = self.get_user_settings(user_id).await?;
        settings.fitness_level = level;
        self.set_user_settings(user_id, &settings).await
    }

    /// Total workouts the user has recorded.
    pub async fn total_workouts(&self, user_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT total_workouts FROM users WHERE user_id = ?1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row.try_get("total_workouts")?),
            None => Ok(0),
        }
    }

    /// Lightweight connectivity probe for health checks.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
