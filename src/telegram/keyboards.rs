//! Inline keyboard builders
//!
//! Payload strings here are the other half of the convention decoded in
//! [`crate::telegram::callback`]; keep the two in sync.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("📘 О занятиях", "menu:about")],
        vec![InlineKeyboardButton::callback("🧪 Мини-диагностика", "menu:diag")],
        vec![InlineKeyboardButton::callback("🗓 Записаться в группу", "lead:start")],
        vec![InlineKeyboardButton::callback("📝 Проверка ДЗ", "hw:start")],
        vec![InlineKeyboardButton::callback("⭐ Отзывы", "menu:reviews")],
        vec![InlineKeyboardButton::callback("❓ FAQ", "menu:faq")],
        vec![InlineKeyboardButton::callback("💬 Задать вопрос", "support:ask")],
    ])
}

pub fn back_to_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback("🏠 В меню", "menu:home")]])
}

pub fn support_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("🗓 Записаться", "lead:start")],
        vec![InlineKeyboardButton::callback("🏠 В меню", "menu:home")],
    ])
}

pub fn lead_class_kb() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("1–4", "lead:class:1-4"),
            InlineKeyboardButton::callback("5–8", "lead:class:5-8"),
        ],
        vec![
            InlineKeyboardButton::callback("9", "lead:class:9"),
            InlineKeyboardButton::callback("10", "lead:class:10"),
            InlineKeyboardButton::callback("11", "lead:class:11"),
        ],
    ])
}

pub fn lead_goal_kb() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("📈 Подтянуть успеваемость", "lead:goal:improve")],
        vec![InlineKeyboardButton::callback("🧩 Подготовка к ОГЭ", "lead:goal:oge")],
        vec![InlineKeyboardButton::callback("🎯 Подготовка к ЕГЭ", "lead:goal:ege")],
    ])
}

pub fn lead_time_kb() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("🌤 Утро", "lead:time:morning")],
        vec![InlineKeyboardButton::callback("☀️ День", "lead:time:day")],
        vec![InlineKeyboardButton::callback("🌙 Вечер", "lead:time:evening")],
    ])
}

pub fn lead_finish_kb() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("✅ Отправить заявку", "lead:submit")],
        vec![InlineKeyboardButton::callback("🏠 В меню", "menu:home")],
    ])
}

pub fn hw_class_kb() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("1–4", "hw:class:1-4"),
            InlineKeyboardButton::callback("5–8", "hw:class:5-8"),
        ],
        vec![
            InlineKeyboardButton::callback("9", "hw:class:9"),
            InlineKeyboardButton::callback("10", "hw:class:10"),
            InlineKeyboardButton::callback("11", "hw:class:11"),
        ],
        vec![InlineKeyboardButton::callback("🏠 В меню", "menu:home")],
    ])
}

pub fn hw_topic_kb() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("➕ Алгебра", "hw:topic:algebra")],
        vec![InlineKeyboardButton::callback("📐 Геометрия", "hw:topic:geometry")],
        vec![InlineKeyboardButton::callback("📊 Текстовые задачи", "hw:topic:word")],
        vec![InlineKeyboardButton::callback("🎓 Экзамен (ОГЭ/ЕГЭ)", "hw:topic:exam")],
        vec![InlineKeyboardButton::callback("🏠 В меню", "menu:home")],
    ])
}

pub fn admin_lead_actions(lead_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Подтвердить", format!("admin:lead:ok:{lead_id}")),
        InlineKeyboardButton::callback("❌ Отказать", format!("admin:lead:no:{lead_id}")),
    ]])
}

pub fn admin_hw_actions(hw_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("✅ Принято", format!("admin:hw:accept:{hw_id}")),
            InlineKeyboardButton::callback("🔁 На доработку", format!("admin:hw:rework:{hw_id}")),
        ],
        vec![InlineKeyboardButton::callback("💬 Комментарий", format!("admin:hw:comment:{hw_id}"))],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::callback::{CallbackAction, HwAdminAction, LeadDecision};
    use teloxide::types::InlineKeyboardButtonKind;

    fn payloads(kb: &InlineKeyboardMarkup) -> Vec<String> {
        kb.inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_every_menu_payload_decodes() {
        for kb in [
            main_menu(),
            back_to_menu(),
            support_menu(),
            lead_class_kb(),
            lead_goal_kb(),
            lead_time_kb(),
            lead_finish_kb(),
            hw_class_kb(),
            hw_topic_kb(),
        ] {
            for payload in payloads(&kb) {
                assert!(
                    CallbackAction::parse(&payload).is_some(),
                    "payload {payload} does not decode"
                );
            }
        }
    }

    #[test]
    fn test_admin_lead_controls_bind_the_id() {
        let kb = admin_lead_actions(42);
        let decoded: Vec<_> = payloads(&kb)
            .iter()
            .map(|p| CallbackAction::parse(p).unwrap())
            .collect();
        assert_eq!(
            decoded,
            vec![
                CallbackAction::AdminLead {
                    decision: LeadDecision::Approve,
                    lead_id: 42,
                },
                CallbackAction::AdminLead {
                    decision: LeadDecision::Reject,
                    lead_id: 42,
                },
            ]
        );
    }

    #[test]
    fn test_admin_hw_controls_bind_the_id() {
        let kb = admin_hw_actions(7);
        let decoded: Vec<_> = payloads(&kb)
            .iter()
            .map(|p| CallbackAction::parse(p).unwrap())
            .collect();
        assert_eq!(
            decoded,
            vec![
                CallbackAction::AdminHw {
                    action: HwAdminAction::Accept,
                    homework_id: 7,
                },
                CallbackAction::AdminHw {
                    action: HwAdminAction::Rework,
                    homework_id: 7,
                },
                CallbackAction::AdminHw {
                    action: HwAdminAction::Comment,
                    homework_id: 7,
                },
            ]
        );
    }
}
