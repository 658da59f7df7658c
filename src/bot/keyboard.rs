// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Keyboard layouts and button labels
//!
//! The Persian button labels double as the dispatch keys for incoming
//! messages, so they live here as constants rather than inline strings.

use super::api::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardMarkup, ReplyMarkup,
};
use crate::models::UserSettings;

pub const BTN_REGISTER_WORKOUT: &str = "🏋 ثبت برنامه تمرینی";
pub const BTN_MY_HISTORY: &str = "📊 تحلیل تمرین من";
pub const BTN_WEEKLY_PLAN: &str = "📅 ساخت برنامه هفتگی";
pub const BTN_UPGRADE: &str = "⚡ ارتقای تمرین";
pub const BTN_WEIGHT_LOSS: &str = "📉 کاهش وزن هوشمند";
pub const BTN_STRENGTH: &str = "📈 افزایش قدرت";
pub const BTN_GUIDE: &str = "🧠 راهنمای تمرین اصولی";
pub const BTN_SETTINGS: &str = "⚙ تنظیمات";

/// Callback identifiers carried in inline buttons.
pub mod callback {
    pub const HARDER: &str = "harder";
    pub const EASIER: &str = "easier";
    pub const REST_GUIDE: &str = "rest";
    pub const SAVE: &str = "save";
    pub const PDF: &str = "pdf";
    pub const PRO_REWRITE: &str = "rewrite";
    pub const TOGGLE_REST: &str = "toggle_rest";
    pub const TOGGLE_WATER: &str = "toggle_water";
    pub const LEVEL_PREFIX: &str = "level_";
}

/// The persistent main menu, two buttons per row.
pub fn main_keyboard() -> ReplyMarkup {
    let button = |text: &str| KeyboardButton {
        text: text.to_string(),
    };

    ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
        keyboard: vec![
            vec![button(BTN_REGISTER_WORKOUT), button(BTN_MY_HISTORY)],
            vec![button(BTN_WEEKLY_PLAN), button(BTN_UPGRADE)],
            vec![button(BTN_WEIGHT_LOSS), button(BTN_STRENGTH)],
            vec![button(BTN_GUIDE), button(BTN_SETTINGS)],
        ],
        resize_keyboard: true,
    })
}

/// Inline actions attached to every analysis reply.
pub fn analysis_keyboard() -> ReplyMarkup {
    let button = |text: &str, data: &str| InlineKeyboardButton {
        text: text.to_string(),
        callback_data: data.to_string(),
    };

    ReplyMarkup::Inline(InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![
                button("🔥 سخت‌ترش کن", callback::HARDER),
                button("🧊 سبک‌ترش کن", callback::EASIER),
                button("⏱ تنظیم استراحت", callback::REST_GUIDE),
            ],
            vec![
                button("📋 ذخیره تمرین", callback::SAVE),
                button("📤 خروجی PDF", callback::PDF),
                button("🔄 بازنویسی حرفه‌ای", callback::PRO_REWRITE),
            ],
        ],
    })
}

/// Settings toggles and level selection.
pub fn settings_keyboard(settings: &UserSettings) -> ReplyMarkup {
    let button = |text: String, data: &str| InlineKeyboardButton {
        text,
        callback_data: data.to_string(),
    };

    let rest_label = if settings.rest_reminder { "✅" } else { "❌" };
    let water_label = if settings.water_reminder { "✅" } else { "❌" };

    ReplyMarkup::Inline(InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![
                button(format!("یادآور استراحت 🔔 {rest_label}"), callback::TOGGLE_REST),
                button(format!("یادآور آب 💧 {water_label}"), callback::TOGGLE_WATER),
            ],
            vec![
                button("سطح مبتدی".to_string(), "level_beginner"),
                button("سطح متوسط".to_string(), "level_intermediate"),
                button("سطح حرفه‌ای".to_string(), "level_advanced"),
            ],
        ],
    })
}
