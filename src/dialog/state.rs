//! Per-chat dialog state
//!
//! Conversations span several independent updates, so the current position
//! in a flow and everything collected so far live here between turns. State
//! is in-memory only; a restart drops unfinished dialogs, which users
//! recover from via the menu.

use dashmap::DashMap;

/// Position in a conversation plus the fields accumulated so far.
///
/// Each variant carries exactly what its step has already collected, so a
/// half-filled enrollment can never leak into the homework flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    /// «Задать вопрос»: ждём текст вопроса
    SupportAwaitingQuestion,
    /// Запись в группу: ждём выбор класса
    LeadClass,
    /// Запись в группу: ждём выбор цели
    LeadGoal { class: String },
    /// Запись в группу: ждём выбор времени
    LeadTime { class: String, goal: String },
    /// Запись в группу: ждём контакт текстом
    LeadContact {
        class: String,
        goal: String,
        time_pref: String,
    },
    /// Запись в группу: показана сводка, ждём подтверждение
    LeadConfirm {
        class: String,
        goal: String,
        time_pref: String,
        contact: String,
    },
    /// Проверка ДЗ: ждём выбор класса
    HwClass,
    /// Проверка ДЗ: ждём выбор темы
    HwTopic { class: String },
    /// Проверка ДЗ: ждём текст/фото/файл
    HwPayload { class: String, topic: String },
    /// Админ пишет комментарий к ДЗ (хранится под chat id самого админа)
    AdminAwaitingHwComment { homework_id: i64 },
}

/// Keyed store of dialog states, one slot per chat id.
///
/// `set` overwrites unconditionally: starting flow B while flow A is
/// unfinished discards A's fields. DashMap serializes concurrent writers
/// to the same key; between two updates from one user the last write wins.
#[derive(Debug, Default)]
pub struct DialogStore {
    states: DashMap<i64, DialogState>,
}

impl DialogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for the chat, if a dialog is in progress.
    pub fn get(&self, chat_id: i64) -> Option<DialogState> {
        self.states.get(&chat_id).map(|s| s.clone())
    }

    /// Enters or advances a dialog, replacing whatever was there.
    pub fn set(&self, chat_id: i64, state: DialogState) {
        self.states.insert(chat_id, state);
    }

    /// Ends the dialog for the chat (completion or «В меню»).
    pub fn clear(&self, chat_id: i64) {
        self.states.remove(&chat_id);
    }
}
