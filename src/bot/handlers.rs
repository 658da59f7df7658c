// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversation handlers
//!
//! Message and callback dispatch for the coaching conversation: onboarding,
//! the analyze flow, history, settings, and the inline rewrite actions.
//! Handler failures are logged and answered with a user-facing error; they
//! never take down the update loop.

use super::api::{CallbackQuery, Message, TelegramClient, Update};
use super::keyboard::{self, callback};
use crate::analysis::{
    extract_exercises, generate_pro_version, rewrite_intensity, RewriteDirection, WorkoutAdvisor,
    WorkoutAnalysis,
};
use crate::augment::{merge_augmentation, TextAugmenter};
use crate::database::Database;
use crate::logging::AppLogger;
use crate::models::{FitnessLevel, Intensity, UserProfile};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};

const WELCOME_TEXT: &str = "\
🏋️‍♂️ به مربی شخصی هوشمند خوش آمدید! 🤖

من اینجام تا بهت کمک کنم تمریناتت رو حرفه‌ای‌تر کنی و به هدفت برسی.

🔥 چیکار می‌تونم برات انجام بدم؟
• تحلیل هوشمند برنامه تمرینیت
• محاسبه شدت و کالری مصرفی
• پیشنهاد زمان استراحت اصولی
• تشخیص تمرین نامتعادل
• ارائه نسخه پیشرفته تمرین

📝 برای شروع، یکی از گزینه‌های زیر رو انتخاب کن یا برنامه تمرینیت رو برام بفرست!";

const WORKOUT_PROMPT_TEXT: &str = "\
📝 برنامه تمرینیت رو برام بنویس.

مثال:
دراز نشست=۲۰
شنا=۱۰
اسکات=۵
طناب=۳ دقیقه

می‌تونی با = یا : مقادیر رو مشخص کنی.";

const NO_EXERCISES_TEXT: &str = "\
❌ تمرینی تشخیص داده نشد!

لطفاً به این فرمت بنویسید:
دراز نشست=۲۰
شنا=۱۰
اسکات=۵";

const GUIDE_TEXT: &str = "\
🧠 *راهنمای تمرین اصولی*

🔹 *قانون اضافه‌بار پیشرونده*
هر هفته ۵-۱۰٪ به حجم یا شدت تمرین اضافه کن

🔹 *تنوع در تمرین*
هر ۴-۶ هفته تمریناتت رو تغییر بده

🔹 *استراحت کافی*
بین تمرینات قدرتی: ۴۸-۷۲ ساعت استراحت
بین تمرینات هوازی: ۲۴-۴۸ ساعت استراحت

🔹 *تغذیه مناسب*
• پروتئین: ۱.۶-۲.۲ گرم به ازای هر کیلو وزن
• آب: ۳۰-۳۵ میلی‌لیتر به ازای هر کیلو وزن

🔹 *گرم کردن و سرد کردن*
• گرم کردن: ۵-۱۰ دقیقه قبل از تمرین
• سرد کردن: ۵-۱۰ دقیقه بعد از تمرین";

const REST_GUIDE_TEXT: &str = "\
⏱ *تنظیم زمان استراحت*

استراحت اصولی بین ست‌ها:
• قدرتی: ۶۰-۹۰ ثانیه
• استقامتی: ۳۰-۴۵ ثانیه
• هایپرتروفی: ۴۵-۶۰ ثانیه
• قدرتی سنگین: ۲-۳ دقیقه";

const UPGRADE_HINT_TEXT: &str = "\
⚡ برای ارتقای تمرین، ابتدا برنامه تمرینیت رو ثبت کن.
بعد از تحلیل، می‌تونی با دکمه «سخت‌ترش کن» نسخه پیشرفته رو دریافت کنی.";

const WEEKLY_PLAN_TEXT: &str = "\
📅 برای ساخت برنامه هفتگی، هر روز تمرینت رو ثبت کن تا الگوی هفتگی‌ات شکل بگیرد.
بعد از چند تمرین، از «تحلیل تمرین من» روند پیشرفتت رو ببین.";

const WEIGHT_LOSS_TEXT: &str = "\
📉 برای کاهش وزن، تمرینات هوازی مثل طناب و دوچرخه رو با حجم بالا ثبت کن.
تحلیل هر تمرین، کالری مصرفی تقریبی رو بهت نشون می‌ده.";

const STRENGTH_TEXT: &str = "\
📈 برای افزایش قدرت، حرکات ترکیبی مثل اسکات و شنا رو با تکرارهای بالاتر از ۱۲ ثبت کن.
بعد از تحلیل، نسخه سخت‌تر رو امتحان کن.";

const ASK_REGISTER_FIRST_TEXT: &str = "لطفاً ابتدا گزینه «ثبت برنامه تمرینی» رو انتخاب کن.";

const ANALYZE_FIRST_TEXT: &str = "❌ ابتدا یک تمرین را تحلیل کن.";

/// Per-user conversation state, kept in memory only.
#[derive(Default)]
struct Session {
    awaiting_workout: bool,
    last_analysis: Option<WorkoutAnalysis>,
}

/// The conversation handler: one instance serves every user.
pub struct BotHandler {
    client: TelegramClient,
    database: Database,
    advisor: Arc<WorkoutAdvisor>,
    augmenter: Option<Arc<dyn TextAugmenter>>,
    sessions: Mutex<HashMap<i64, Session>>,
}

impl BotHandler {
    pub fn new(
        client: TelegramClient,
        database: Database,
        advisor: Arc<WorkoutAdvisor>,
        augmenter: Option<Arc<dyn TextAugmenter>>,
    ) -> Self {
        Self {
            client,
            database,
            advisor,
            augmenter,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Entry point for one update; errors are logged, never propagated, so a
    /// single bad update cannot stop the loop.
    pub async fn handle_update(&self, update: Update) {
        if let Some(message) = update.message {
            if let Err(err) = self.handle_message(&message).await {
                error!(chat_id = %message.chat.id, error = %err, "message handler failed");
            }
        } else if let Some(callback_query) = update.callback_query {
            if let Err(err) = self.handle_callback(&callback_query).await {
                error!(user_id = %callback_query.from.id, error = %err, "callback handler failed");
            }
        }
    }

    async fn handle_message(&self, message: &Message) -> Result<()> {
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };
        let chat_id = message.chat.id;
        let user_id = message.from.as_ref().map(|u| u.id).unwrap_or(chat_id);
        AppLogger::log_update(user_id, "message");

        match text {
            "/start" => self.handle_start(message).await,
            keyboard::BTN_REGISTER_WORKOUT => {
                let mut sessions = self.sessions.lock().await;
                sessions.entry(user_id).or_default().awaiting_workout = true;
                drop(sessions);

                self.client
                    .send_message(chat_id, WORKOUT_PROMPT_TEXT, Some(keyboard::main_keyboard()))
                    .await
            }
            keyboard::BTN_MY_HISTORY => self.handle_history(chat_id, user_id).await,
            keyboard::BTN_WEEKLY_PLAN => {
                self.client.send_message(chat_id, WEEKLY_PLAN_TEXT, None).await
            }
            keyboard::BTN_UPGRADE => {
                self.client.send_message(chat_id, UPGRADE_HINT_TEXT, None).await
            }
            keyboard::BTN_WEIGHT_LOSS => {
                self.client.send_message(chat_id, WEIGHT_LOSS_TEXT, None).await
            }
            keyboard::BTN_STRENGTH => {
                self.client.send_message(chat_id, STRENGTH_TEXT, None).await
            }
            keyboard::BTN_GUIDE => self.client.send_message(chat_id, GUIDE_TEXT, None).await,
            keyboard::BTN_SETTINGS => self.handle_settings(chat_id, user_id).await,
            _ => self.handle_workout_text(chat_id, user_id, text).await,
        }
    }

    async fn handle_start(&self, message: &Message) -> Result<()> {
        let chat_id = message.chat.id;

        if let Some(from) = &message.from {
            let profile = UserProfile {
                user_id: from.id,
                username: from.username.clone(),
                first_name: from.first_name.clone(),
                last_name: from.last_name.clone(),
            };
            match self.database.record_user(&profile).await {
                Ok(()) => AppLogger::log_database_operation("insert", "users", true),
                Err(err) => {
                    // Onboarding still succeeds; history just starts later.
                    AppLogger::log_database_operation("insert", "users", false);
                    error!(user_id = %from.id, error = %err, "failed to record user");
                }
            }
        }

        self.client
            .send_message(chat_id, WELCOME_TEXT, Some(keyboard::main_keyboard()))
            .await
    }

    async fn handle_history(&self, chat_id: i64, user_id: i64) -> Result<()> {
        let workouts = match self.database.fetch_recent_workouts(user_id, 5).await {
            Ok(workouts) => workouts,
            Err(err) => {
                error!(user_id = %user_id, error = %err, "failed to fetch history");
                return self
                    .client
                    .send_message(chat_id, "⚠️ دریافت تاریخچه با خطا مواجه شد.", None)
                    .await;
            }
        };

        if workouts.is_empty() {
            return self
                .client
                .send_message(
                    chat_id,
                    "📭 شما هنوز تمرینی ثبت نکرده‌اید. با گزینه «ثبت برنامه تمرینی» شروع کنید.",
                    None,
                )
                .await;
        }

        let mut text = "📊 آخرین تمرینات شما:\n\n".to_string();
        for (index, workout) in workouts.iter().enumerate() {
            text.push_str(&format!(
                "{}. {} - {} - {} کالری\n",
                index + 1,
                workout.workout_date.format("%Y/%m/%d"),
                workout.workout_type,
                workout.calories_burned.round() as i64
            ));
        }

        self.client.send_message(chat_id, &text, None).await
    }

    async fn handle_settings(&self, chat_id: i64, user_id: i64) -> Result<()> {
        let settings = self.database.get_user_settings(user_id).await.unwrap_or_default();

        let text = format!(
            "⚙ *تنظیمات*\n\n\
             🔔 یادآور استراحت: {}\n\
             💧 یادآور آب: {}\n\
             📊 سطح تناسب اندام: {}\n\n\
             برای تغییر، گزینه مورد نظر رو انتخاب کن:",
            if settings.rest_reminder { "✅" } else { "❌" },
            if settings.water_reminder { "✅" } else { "❌" },
            settings.fitness_level.display_name()
        );

        self.client
            .send_message(chat_id, &text, Some(keyboard::settings_keyboard(&settings)))
            .await
    }

    async fn handle_workout_text(&self, chat_id: i64, user_id: i64, text: &str) -> Result<()> {
        let awaiting = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.entry(user_id).or_default();
            std::mem::take(&mut session.awaiting_workout)
        };

        if !awaiting {
            return self
                .client
                .send_message(chat_id, ASK_REGISTER_FIRST_TEXT, Some(keyboard::main_keyboard()))
                .await;
        }

        let records = extract_exercises(text, self.advisor.catalog());
        if records.is_empty() {
            return self.client.send_message(chat_id, NO_EXERCISES_TEXT, None).await;
        }

        let mut analysis = match self.advisor.analyze(&records) {
            Ok(analysis) => analysis,
            Err(err) => {
                // Unreachable with a non-empty record list; guard anyway.
                error!(user_id = %user_id, error = %err, "analysis rejected extracted records");
                return self.client.send_message(chat_id, NO_EXERCISES_TEXT, None).await;
            }
        };

        if let Some(augmenter) = &self.augmenter {
            match augmenter.augment(text).await {
                Ok(augmentation) => {
                    merge_augmentation(&mut analysis, augmentation);
                    AppLogger::log_augmentation(user_id, true);
                }
                Err(err) => {
                    AppLogger::log_augmentation(user_id, false);
                    debug!(user_id = %user_id, error = %err, "augmentation degraded to none");
                }
            }
        }

        AppLogger::log_analysis(user_id, analysis.exercises.len(), analysis.intensity.as_str());

        let mut reply = format_analysis(&analysis);
        match self.database.save_workout_result(user_id, text, &analysis).await {
            Ok(()) => AppLogger::log_database_operation("insert", "workout_history", true),
            Err(err) => {
                // The analysis the user sees survives a persistence failure.
                AppLogger::log_database_operation("insert", "workout_history", false);
                error!(user_id = %user_id, error = %err, "failed to persist workout");
                reply.push_str("\n\n⚠️ ذخیره تمرین در تاریخچه با خطا مواجه شد.");
            }
        }

        {
            let mut sessions = self.sessions.lock().await;
            sessions.entry(user_id).or_default().last_analysis = Some(analysis);
        }

        self.client
            .send_message(chat_id, &reply, Some(keyboard::analysis_keyboard()))
            .await
    }

    async fn handle_callback(&self, callback_query: &CallbackQuery) -> Result<()> {
        let user_id = callback_query.from.id;
        let data = callback_query.data.as_deref().unwrap_or_default();
        AppLogger::log_update(user_id, "callback");

        let mut toast: Option<String> = None;

        match data {
            callback::HARDER | callback::EASIER => {
                let direction = if data == callback::HARDER {
                    RewriteDirection::Harder
                } else {
                    RewriteDirection::Easier
                };

                match self.last_analysis(user_id).await {
                    Some(analysis) => {
                        let text = rewrite_intensity(&analysis, direction);
                        self.client.send_message(user_id, &text, None).await?;
                    }
                    None => {
                        self.client.send_message(user_id, ANALYZE_FIRST_TEXT, None).await?;
                    }
                }
            }
            callback::REST_GUIDE => {
                self.client.send_message(user_id, REST_GUIDE_TEXT, None).await?;
            }
            callback::SAVE => {
                // Analyses are persisted when produced; this confirms it.
                self.client
                    .send_message(
                        user_id,
                        "✅ تمرین در تاریخچه شما ذخیره شد.\nبرای مشاهده تاریخچه از گزینه «تحلیل تمرین من» استفاده کن.",
                        None,
                    )
                    .await?;
            }
            callback::PDF => {
                self.client
                    .send_message(user_id, "📤 قابلیت خروجی PDF به زودی اضافه خواهد شد!", None)
                    .await?;
            }
            callback::PRO_REWRITE => match self.last_analysis(user_id).await {
                Some(analysis) => {
                    let settings =
                        self.database.get_user_settings(user_id).await.unwrap_or_default();
                    let text = generate_pro_version(&analysis.exercises, settings.fitness_level);
                    self.client.send_message(user_id, &text, None).await?;
                }
                None => {
                    self.client.send_message(user_id, ANALYZE_FIRST_TEXT, None).await?;
                }
            },
            callback::TOGGLE_REST | callback::TOGGLE_WATER => {
                let mut settings =
                    self.database.get_user_settings(user_id).await.unwrap_or_default();
                if data == callback::TOGGLE_REST {
                    settings.rest_reminder = !settings.rest_reminder;
                } else {
                    settings.water_reminder = !settings.water_reminder;
                }
                match self.database.set_user_settings(user_id, &settings).await {
                    Ok(()) => toast = Some("تنظیمات به‌روزرسانی شد".to_string()),
                    Err(err) => {
                        error!(user_id = %user_id, error = %err, "failed to update settings");
                        toast = Some("⚠️ ذخیره تنظیمات ناموفق بود".to_string());
                    }
                }
            }
            data if data.starts_with(callback::LEVEL_PREFIX) => {
                let level_id = &data[callback::LEVEL_PREFIX.len()..];
                match fitness_level_from_id(level_id) {
                    Some(level) => {
                        match self.database.update_fitness_level(user_id, level).await {
                            Ok(()) => {
                                toast = Some(format!(
                                    "سطح به {} تغییر یافت",
                                    level.display_name()
                                ));
                            }
                            Err(err) => {
                                error!(user_id = %user_id, error = %err, "failed to update level");
                                toast = Some("⚠️ ذخیره سطح ناموفق بود".to_string());
                            }
                        }
                    }
                    None => debug!(user_id = %user_id, data = %data, "unknown level id"),
                }
            }
            other => debug!(user_id = %user_id, data = %other, "unknown callback data"),
        }

        self.client
            .answer_callback_query(&callback_query.id, toast.as_deref())
            .await
    }

    async fn last_analysis(&self, user_id: i64) -> Option<WorkoutAnalysis> {
        let sessions = self.sessions.lock().await;
        sessions.get(&user_id).and_then(|s| s.last_analysis.clone())
    }
}

fn fitness_level_from_id(id: &str) -> Option<FitnessLevel> {
    match id {
        "beginner" => Some(FitnessLevel::Beginner),
        "intermediate" => Some(FitnessLevel::Intermediate),
        "advanced" => Some(FitnessLevel::Advanced),
        _ => None,
    }
}

/// Render the full Persian analysis reply.
pub(crate) fn format_analysis(analysis: &WorkoutAnalysis) -> String {
    let mut text = String::from("🔥 *تحلیل تمرین شما*\n\n📋 *تمرینات ثبت شده:*\n");
    for record in &analysis.exercises {
        text.push_str(&format!(
            "• {}: {} {}\n",
            record.raw_name,
            record.value,
            record.unit.display_name()
        ));
    }

    text.push_str(&format!(
        "\n🎯 *هدف احتمالی:* {}\n📊 *نوع تمرین:* {}\n💪 *شدت:* {}\n🏋️‍♂️ *سطح:* {}\n\n",
        analysis.goal,
        analysis.workout_type,
        analysis.intensity.display_name(),
        analysis.fitness_level.display_name()
    ));

    text.push_str(&format!(
        "🔥 *کالری مصرفی تقریبی:* {} کالری\n⏱ *زمان استراحت پیشنهادی:* {} ثانیه بین حرکات\n💧 *زمان نوشیدن آب:* هر {} دقیقه\n",
        analysis.total_calories.round() as i64,
        analysis.rest_time_seconds,
        analysis.water_break_minutes
    ));

    if !analysis.muscle_groups.is_empty() {
        let groups: Vec<&str> = analysis.muscle_groups.iter().map(|s| s.as_str()).collect();
        text.push_str(&format!("\n📈 *عضلات درگیر:* {}\n", groups.join("، ")));
    }

    text.push_str(&format!(
        "\n📝 *پیشنهاد ارتقا:*\n{}\n",
        analysis.improvement_suggestion
    ));

    for warning in &analysis.imbalance_warnings {
        text.push_str(&format!("\n⚠️ *عدم تعادل:* {}", warning));
    }
    for warning in &analysis.overtraining_warnings {
        text.push_str(&format!("\n{}", warning));
    }

    if let Some(recovery) = &analysis.recovery_version {
        text.push_str(&format!("\n\n🔄 *نسخه ریکاوری:*\n{}", recovery));
    }

    text.push_str(match analysis.intensity {
        Intensity::High => "\n\n💪 عالی! تمرین چالش‌برانگیزی داری. به خودت افتخار کن!",
        Intensity::Medium => "\n\n👍 تمرین خوبیه! می‌تونی کم‌کم شدتش رو بیشتر کنی.",
        Intensity::Low => "\n\n🌟 شروع عالی! با استمرار به نتایج خوب می‌رسی.",
    });

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExerciseCatalog;
    use crate::config::CoachConfig;

    fn analysis_for(text: &str) -> WorkoutAnalysis {
        let advisor = WorkoutAdvisor::new(ExerciseCatalog::default(), CoachConfig::default());
        let records = extract_exercises(text, advisor.catalog());
        advisor.analyze(&records).expect("analysis should succeed")
    }

    #[test]
    fn test_format_analysis_core_sections() {
        let text = format_analysis(&analysis_for("دراز نشست=20\nشنا=10\nاسکات=5"));

        assert!(text.contains("تحلیل تمرین شما"));
        assert!(text.contains("• دراز نشست: 20 تکرار"));
        assert!(text.contains("هدف احتمالی"));
        assert!(text.contains("کالری مصرفی تقریبی"));
        assert!(text.contains("عضلات درگیر"));
        assert!(text.contains("پیشنهاد ارتقا"));
        // Balanced workout: no imbalance block.
        assert!(!text.contains("عدم تعادل"));
    }

    #[test]
    fn test_format_analysis_shows_raw_names() {
        // The reply echoes what the user typed, not the normalized key.
        let text = format_analysis(&analysis_for("شنا سوئدی=10"));
        assert!(text.contains("• شنا سوئدی: 10 تکرار"));
    }

    #[test]
    fn test_format_analysis_warning_blocks() {
        let text = format_analysis(&analysis_for("شنا=25\nپشت بازو=25"));

        assert!(text.contains("عدم تعادل"));
        assert!(text.contains("پایین تنه"));
    }

    #[test]
    fn test_format_analysis_motivation_tracks_intensity() {
        let low = format_analysis(&analysis_for("کرانچ=10"));
        assert!(low.contains("🌟"));

        let high = format_analysis(&analysis_for("طناب=40 دقیقه"));
        assert!(high.contains("💪 عالی"));
        assert!(high.contains("نسخه ریکاوری"));
    }

    #[test]
    fn test_fitness_level_from_id() {
        assert_eq!(fitness_level_from_id("beginner"), Some(FitnessLevel::Beginner));
        assert_eq!(
            fitness_level_from_id("intermediate"),
            Some(FitnessLevel::Intermediate)
        );
        assert_eq!(fitness_level_from_id("advanced"), Some(FitnessLevel::Advanced));
        assert_eq!(fitness_level_from_id("elite"), None);
    }
}
