//! Dialog engine: support, enrollment and homework flows
//!
//! Each flow is a strict linear state machine over [`DialogState`]. A button
//! press advances a flow only when the current state expects that exact step;
//! presses on stale keyboards from earlier screens are acknowledged and
//! ignored. «В меню» is the global escape from every state.
//!
//! The transition logic itself is pure: [`flow_step`] maps the current state
//! and a decoded button press to a [`StepAction`], and [`handle_callback`]
//! only interprets that action against the store and the Bot API.

use teloxide::prelude::*;
use teloxide::types::{FileId, InlineKeyboardMarkup, InputFile, MessageId, ParseMode};

use crate::core::classifier::{classify, Intent};
use crate::core::config;
use crate::core::texts;
use crate::dialog::DialogState;
use crate::storage::db::{self, NewHomework, NewLead};
use crate::telegram::callback::{CallbackAction, MenuScreen};
use crate::telegram::keyboards::{
    admin_hw_actions, admin_lead_actions, back_to_menu, hw_class_kb, hw_topic_kb, lead_class_kb, lead_finish_kb,
    lead_goal_kb, lead_time_kb, main_menu, support_menu,
};
use crate::telegram::notifications::notify_admins;

use super::admin;
use super::types::{HandlerDeps, UserInfo};

/// Trims free text; whitespace-only input counts as absent.
pub fn normalize_text(text: Option<&str>) -> Option<String> {
    let t = text?.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Maps a goal button code to its stored label. Unknown codes pass through.
pub fn goal_label(code: &str) -> String {
    match code {
        "improve" => "подтянуть успеваемость".to_string(),
        "oge" => "ОГЭ".to_string(),
        "ege" => "ЕГЭ".to_string(),
        other => other.to_string(),
    }
}

/// Maps a time button code to its stored label. Unknown codes pass through.
pub fn time_label(code: &str) -> String {
    match code {
        "morning" => "утро".to_string(),
        "day" => "день".to_string(),
        "evening" => "вечер".to_string(),
        other => other.to_string(),
    }
}

/// Maps a topic button code to its stored label. Unknown codes pass through.
pub fn topic_label(code: &str) -> String {
    match code {
        "algebra" => "алгебра".to_string(),
        "geometry" => "геометрия".to_string(),
        "word" => "текстовые задачи".to_string(),
        "exam" => "ОГЭ/ЕГЭ".to_string(),
        other => other.to_string(),
    }
}

/// Homework attachment, exactly one of photo / document / text.
///
/// When a single message somehow carries several, photo wins over document
/// wins over text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwPayload {
    Photo { file_id: String, caption: Option<String> },
    Document { file_id: String, caption: Option<String> },
    Text { text: String },
}

impl HwPayload {
    pub fn from_parts(
        photo_file_id: Option<String>,
        document_file_id: Option<String>,
        text: Option<String>,
        caption: Option<String>,
    ) -> Option<Self> {
        if let Some(file_id) = photo_file_id {
            return Some(HwPayload::Photo { file_id, caption });
        }
        if let Some(file_id) = document_file_id {
            return Some(HwPayload::Document { file_id, caption });
        }
        let text = normalize_text(text.as_deref())?;
        Some(HwPayload::Text { text })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            HwPayload::Photo { .. } => "photo",
            HwPayload::Document { .. } => "document",
            HwPayload::Text { .. } => "text",
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            HwPayload::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn file_id(&self) -> Option<&str> {
        match self {
            HwPayload::Photo { file_id, .. } | HwPayload::Document { file_id, .. } => Some(file_id),
            HwPayload::Text { .. } => None,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            HwPayload::Photo { caption, .. } | HwPayload::Document { caption, .. } => caption.as_deref(),
            HwPayload::Text { .. } => None,
        }
    }
}

/// How a step changes the chat's dialog state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Keep,
    Clear,
    Set(DialogState),
}

/// Outcome of feeding one button press into the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum StepAction {
    /// Replace the screen and apply the state change.
    Show {
        state: StateChange,
        text: &'static str,
        keyboard: InlineKeyboardMarkup,
    },
    /// The confirmation step was accepted; persist these fields.
    SubmitLead {
        class: String,
        goal: String,
        time_pref: String,
        contact: String,
    },
    /// Stale or mismatched press; acknowledge and change nothing.
    Ignore,
}

/// The flow state machine, free of any I/O.
///
/// Step callbacks advance a flow only when `current` is the state that
/// rendered their keyboard; anything else is [`StepAction::Ignore`]. Entry
/// points (menu, flow starts) are accepted from any state.
pub fn flow_step(current: Option<DialogState>, action: CallbackAction) -> StepAction {
    let show = |state: StateChange, text: &'static str, keyboard: InlineKeyboardMarkup| StepAction::Show {
        state,
        text,
        keyboard,
    };

    match action {
        CallbackAction::Menu(MenuScreen::Home) => show(StateChange::Clear, texts::WELCOME, main_menu()),
        CallbackAction::Menu(MenuScreen::About) => show(StateChange::Keep, texts::ABOUT, back_to_menu()),
        CallbackAction::Menu(MenuScreen::Diag) => show(StateChange::Keep, texts::DIAG, support_menu()),
        CallbackAction::Menu(MenuScreen::Reviews) => show(StateChange::Keep, texts::REVIEWS, back_to_menu()),
        CallbackAction::Menu(MenuScreen::Faq) => show(StateChange::Keep, texts::FAQ_TEXT, support_menu()),
        CallbackAction::SupportAsk => show(
            StateChange::Set(DialogState::SupportAwaitingQuestion),
            texts::ASK_QUESTION_HINT,
            back_to_menu(),
        ),
        CallbackAction::LeadStart => show(
            StateChange::Set(DialogState::LeadClass),
            texts::LEAD_START,
            lead_class_kb(),
        ),
        CallbackAction::LeadClass(band) => match current {
            Some(DialogState::LeadClass) => show(
                StateChange::Set(DialogState::LeadGoal { class: band }),
                texts::LEAD_GOAL_PROMPT,
                lead_goal_kb(),
            ),
            _ => StepAction::Ignore,
        },
        CallbackAction::LeadGoal(code) => match current {
            Some(DialogState::LeadGoal { class }) => show(
                StateChange::Set(DialogState::LeadTime {
                    class,
                    goal: goal_label(&code),
                }),
                texts::LEAD_TIME_PROMPT,
                lead_time_kb(),
            ),
            _ => StepAction::Ignore,
        },
        CallbackAction::LeadTime(code) => match current {
            Some(DialogState::LeadTime { class, goal }) => show(
                StateChange::Set(DialogState::LeadContact {
                    class,
                    goal,
                    time_pref: time_label(&code),
                }),
                texts::LEAD_CONTACT_PROMPT,
                back_to_menu(),
            ),
            _ => StepAction::Ignore,
        },
        CallbackAction::LeadSubmit => match current {
            Some(DialogState::LeadConfirm {
                class,
                goal,
                time_pref,
                contact,
            }) => StepAction::SubmitLead {
                class,
                goal,
                time_pref,
                contact,
            },
            _ => StepAction::Ignore,
        },
        CallbackAction::HwStart => show(StateChange::Set(DialogState::HwClass), texts::HW_START, hw_class_kb()),
        CallbackAction::HwClass(band) => match current {
            Some(DialogState::HwClass) => show(
                StateChange::Set(DialogState::HwTopic { class: band }),
                texts::HW_TOPIC_PROMPT,
                hw_topic_kb(),
            ),
            _ => StepAction::Ignore,
        },
        CallbackAction::HwTopic(code) => match current {
            Some(DialogState::HwTopic { class }) => show(
                StateChange::Set(DialogState::HwPayload {
                    class,
                    topic: topic_label(&code),
                }),
                texts::HW_PAYLOAD_PROMPT,
                back_to_menu(),
            ),
            _ => StepAction::Ignore,
        },
        // Privileged controls are routed before flow_step is consulted.
        CallbackAction::AdminLead { .. } | CallbackAction::AdminHw { .. } => StepAction::Ignore,
    }
}

/// Contact step of the enrollment flow, as a pure transition.
///
/// Empty or whitespace-only text does not advance; the caller re-prompts and
/// leaves the state untouched.
pub fn accept_contact(class: String, goal: String, time_pref: String, text: Option<&str>) -> Option<DialogState> {
    let contact = normalize_text(text)?;
    Some(DialogState::LeadConfirm {
        class,
        goal,
        time_pref,
        contact,
    })
}

async fn edit_screen(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    text: &str,
    keyboard: InlineKeyboardMarkup,
) -> ResponseResult<()> {
    bot.edit_message_text(chat_id, message_id, text)
        .parse_mode(ParseMode::Markdown)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

/// Handles callback queries from inline keyboards.
///
/// The payload is decoded once; admin controls are routed to the privileged
/// handlers, everything else goes through [`flow_step`].
pub async fn handle_callback(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> ResponseResult<()> {
    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };
    let Some(action) = CallbackAction::parse(&data) else {
        log::warn!("Unknown callback payload: {}", data);
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    // Privileged controls first. Presses from anyone outside the allow-list
    // are acknowledged and dropped without a visible response.
    match action {
        CallbackAction::AdminLead { decision, lead_id } => {
            let from_id = i64::try_from(q.from.id.0).unwrap_or(0);
            if !config::admin::is_admin(from_id) {
                bot.answer_callback_query(q.id.clone()).await?;
                return Ok(());
            }
            return admin::handle_lead_decision(&bot, &q, &deps, decision, lead_id).await;
        }
        CallbackAction::AdminHw { action, homework_id } => {
            let from_id = i64::try_from(q.from.id.0).unwrap_or(0);
            if !config::admin::is_admin(from_id) {
                bot.answer_callback_query(q.id.clone()).await?;
                return Ok(());
            }
            return admin::handle_hw_action(&bot, &q, &deps, action, homework_id).await;
        }
        _ => {}
    }

    let chat_id = q.message.as_ref().map(|m| m.chat().id);
    let message_id = q.message.as_ref().map(|m| m.id());
    let (Some(chat_id), Some(message_id)) = (chat_id, message_id) else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };
    let key = chat_id.0;

    bot.answer_callback_query(q.id.clone()).await?;

    match flow_step(deps.dialogs.get(key), action) {
        StepAction::Show { state, text, keyboard } => {
            match state {
                StateChange::Keep => {}
                StateChange::Clear => deps.dialogs.clear(key),
                StateChange::Set(next) => deps.dialogs.set(key, next),
            }
            edit_screen(&bot, chat_id, message_id, text, keyboard).await?;
        }
        StepAction::SubmitLead {
            class,
            goal,
            time_pref,
            contact,
        } => {
            submit_lead(&bot, chat_id, message_id, &q, &deps, class, goal, time_pref, contact).await?;
        }
        StepAction::Ignore => {}
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn submit_lead(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    q: &CallbackQuery,
    deps: &HandlerDeps,
    class: String,
    goal: String,
    time_pref: String,
    contact: String,
) -> ResponseResult<()> {
    let user = UserInfo::from_callback(q);

    // The defining write happens first; if it fails the dialog state stays
    // at the confirmation step so the user can retry.
    let lead_id = {
        let conn = match db::connection(&deps.db_pool) {
            Ok(conn) => conn,
            Err(e) => {
                log::error!("Failed to get DB connection for lead submit: {}", e);
                bot.send_message(chat_id, texts::TRY_AGAIN_LATER).await?;
                return Ok(());
            }
        };
        let new_lead = NewLead {
            tg_id: user.chat_id,
            student_class: class.clone(),
            goal: goal.clone(),
            time_pref: time_pref.clone(),
            contact: Some(contact.clone()),
        };
        match db::create_lead(&conn, &new_lead) {
            Ok(id) => id,
            Err(e) => {
                log::error!("Failed to create lead for user {}: {}", user.chat_id, e);
                bot.send_message(chat_id, texts::TRY_AGAIN_LATER).await?;
                return Ok(());
            }
        }
    };

    deps.dialogs.clear(chat_id.0);
    log::info!("Lead #{} created by user {}", lead_id, user.chat_id);

    let admin_text = format!(
        "📥 *Новая заявка*\n\n\
         От: {}\n\
         ID: `{}`\n\n\
         Класс: *{}*\n\
         Цель: *{}*\n\
         Время: *{}*\n\
         Контакт: `{}`\n\
         Заявка: `#{}`",
        user.display_line(),
        user.chat_id,
        class,
        goal,
        time_pref,
        contact,
        lead_id
    );
    notify_admins(bot, &admin_text, Some(admin_lead_actions(lead_id))).await;

    edit_screen(bot, chat_id, message_id, texts::LEAD_DONE, main_menu()).await
}

/// «Задать вопрос»: forwards the question to the admins.
pub async fn handle_support_question(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> ResponseResult<()> {
    let Some(text) = normalize_text(msg.text()) else {
        bot.send_message(msg.chat.id, texts::SUPPORT_EMPTY).await?;
        return Ok(());
    };

    deps.dialogs.clear(msg.chat.id.0);

    let user = UserInfo::from_message(msg);
    let admin_text = format!(
        "💬 *Вопрос от ученика*\n\n\
         От: {}\n\
         ID: `{}`\n\n\
         Текст:\n{}",
        user.display_line(),
        user.chat_id,
        text
    );
    notify_admins(bot, &admin_text, None).await;

    bot.send_message(msg.chat.id, texts::SUPPORT_DONE)
        .reply_markup(main_menu())
        .await?;
    Ok(())
}

/// Contact step of the enrollment flow.
pub async fn handle_lead_contact(
    bot: &Bot,
    msg: &Message,
    deps: &HandlerDeps,
    class: String,
    goal: String,
    time_pref: String,
) -> ResponseResult<()> {
    let Some(next) = accept_contact(class, goal, time_pref, msg.text()) else {
        bot.send_message(msg.chat.id, texts::LEAD_CONTACT_EMPTY).await?;
        return Ok(());
    };

    let summary = if let DialogState::LeadConfirm {
        class,
        goal,
        time_pref,
        contact,
    } = &next
    {
        format!(
            "✅ *Проверьте заявку*\n\n\
             Класс: *{class}*\n\
             Цель: *{goal}*\n\
             Время: *{time_pref}*\n\
             Контакт: `{contact}`\n\n\
             Если всё верно — отправляйте."
        )
    } else {
        return Ok(());
    };

    deps.dialogs.set(msg.chat.id.0, next);

    bot.send_message(msg.chat.id, summary)
        .parse_mode(ParseMode::Markdown)
        .reply_markup(lead_finish_kb())
        .await?;
    Ok(())
}

/// Payload step of the homework flow.
pub async fn handle_homework_payload(
    bot: &Bot,
    msg: &Message,
    deps: &HandlerDeps,
    class: String,
    topic: String,
) -> ResponseResult<()> {
    let photo = msg.photo().and_then(|sizes| sizes.last()).map(|p| p.file.id.0.clone());
    let document = msg.document().map(|d| d.file.id.0.clone());
    let text = msg.text().map(str::to_string);
    let caption = msg.caption().map(str::to_string);

    let Some(payload) = HwPayload::from_parts(photo, document, text, caption) else {
        bot.send_message(msg.chat.id, texts::HW_PAYLOAD_EMPTY).await?;
        return Ok(());
    };

    let user = UserInfo::from_message(msg);

    let hw_id = {
        let conn = match db::connection(&deps.db_pool) {
            Ok(conn) => conn,
            Err(e) => {
                log::error!("Failed to get DB connection for homework submit: {}", e);
                bot.send_message(msg.chat.id, texts::TRY_AGAIN_LATER).await?;
                return Ok(());
            }
        };
        let new_hw = NewHomework {
            tg_id: user.chat_id,
            student_class: class.clone(),
            topic: topic.clone(),
            payload_type: payload.kind().to_string(),
            payload_text: payload.text().map(str::to_string),
            file_id: payload.file_id().map(str::to_string),
            caption: payload.caption().map(str::to_string),
        };
        match db::create_homework(&conn, &new_hw) {
            Ok(id) => id,
            Err(e) => {
                log::error!("Failed to create homework for user {}: {}", user.chat_id, e);
                bot.send_message(msg.chat.id, texts::TRY_AGAIN_LATER).await?;
                return Ok(());
            }
        }
    };

    deps.dialogs.clear(msg.chat.id.0);
    log::info!("Homework #{} created by user {}", hw_id, user.chat_id);

    let header = format!(
        "📝 *Новое ДЗ*\n\n\
         От: {}\n\
         ID: `{}`\n\
         Класс: *{}*\n\
         Тема: *{}*\n\
         ДЗ: `#{}`",
        user.display_line(),
        user.chat_id,
        class,
        topic,
        hw_id
    );

    // Three messages per admin: header, the payload itself, then the action
    // buttons. One admin failing mid-sequence must not affect the rest.
    for &admin_id in config::admin::ADMIN_IDS.iter() {
        if let Err(e) = send_homework_to_admin(bot, ChatId(admin_id), &header, &payload, hw_id).await {
            log::warn!("Failed to deliver homework #{} to admin {}: {}", hw_id, admin_id, e);
        }
    }

    bot.send_message(msg.chat.id, texts::HW_DONE)
        .reply_markup(main_menu())
        .await?;
    Ok(())
}

async fn send_homework_to_admin(
    bot: &Bot,
    chat: ChatId,
    header: &str,
    payload: &HwPayload,
    hw_id: i64,
) -> ResponseResult<()> {
    bot.send_message(chat, header).parse_mode(ParseMode::Markdown).await?;

    match payload {
        HwPayload::Photo { file_id, caption } => {
            bot.send_photo(chat, InputFile::file_id(FileId(file_id.clone())))
                .caption(caption.clone().unwrap_or_else(|| "—".to_string()))
                .await?;
        }
        HwPayload::Document { file_id, caption } => {
            bot.send_document(chat, InputFile::file_id(FileId(file_id.clone())))
                .caption(caption.clone().unwrap_or_else(|| "—".to_string()))
                .await?;
        }
        HwPayload::Text { text } => {
            bot.send_message(chat, text).await?;
        }
    }

    bot.send_message(chat, "Действия:")
        .reply_markup(admin_hw_actions(hw_id))
        .await?;
    Ok(())
}

/// Fallback for free text outside any dialog: keyword routing to a menu
/// action or a default "didn't understand" reply.
pub async fn handle_free_text(bot: &Bot, msg: &Message, _deps: &HandlerDeps) -> ResponseResult<()> {
    let text = msg.text().unwrap_or_default();

    match classify(text) {
        Some(Intent::Faq) => {
            bot.send_message(msg.chat.id, texts::FAQ_TEXT)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(support_menu())
                .await?;
        }
        Some(Intent::About) => {
            bot.send_message(msg.chat.id, texts::ABOUT)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(back_to_menu())
                .await?;
        }
        Some(Intent::Reviews) => {
            bot.send_message(msg.chat.id, texts::REVIEWS)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(back_to_menu())
                .await?;
        }
        Some(Intent::LeadStart) => {
            bot.send_message(msg.chat.id, texts::LEAD_GO_MENU)
                .reply_markup(main_menu())
                .await?;
        }
        Some(Intent::HwStart) => {
            bot.send_message(msg.chat.id, texts::HW_GO_MENU)
                .reply_markup(main_menu())
                .await?;
        }
        None => {
            bot.send_message(msg.chat.id, texts::UNKNOWN_TEXT)
                .reply_markup(support_menu())
                .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> CallbackAction {
        CallbackAction::parse(data).unwrap()
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(Some("  привет  ")), Some("привет".to_string()));
        assert_eq!(normalize_text(Some("   ")), None);
        assert_eq!(normalize_text(Some("")), None);
        assert_eq!(normalize_text(None), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(goal_label("oge"), "ОГЭ");
        assert_eq!(goal_label("improve"), "подтянуть успеваемость");
        assert_eq!(time_label("morning"), "утро");
        assert_eq!(topic_label("word"), "текстовые задачи");
        // unknown codes pass through unchanged
        assert_eq!(goal_label("custom"), "custom");
    }

    #[test]
    fn test_flow_step_advances_expected_lead_steps() {
        let step = flow_step(Some(DialogState::LeadClass), parse("lead:class:9"));
        let StepAction::Show { state, text, .. } = step else {
            panic!("expected a screen");
        };
        assert_eq!(
            state,
            StateChange::Set(DialogState::LeadGoal { class: "9".to_string() })
        );
        assert_eq!(text, texts::LEAD_GOAL_PROMPT);

        let step = flow_step(
            Some(DialogState::LeadGoal { class: "9".to_string() }),
            parse("lead:goal:oge"),
        );
        let StepAction::Show { state, .. } = step else {
            panic!("expected a screen");
        };
        assert_eq!(
            state,
            StateChange::Set(DialogState::LeadTime {
                class: "9".to_string(),
                goal: "ОГЭ".to_string(),
            })
        );
    }

    #[test]
    fn test_flow_step_ignores_cross_flow_class_button() {
        // A homework class button pressed while the enrollment flow awaits
        // its own class selection must not move the dialog.
        let step = flow_step(Some(DialogState::LeadClass), parse("hw:class:9"));
        assert_eq!(step, StepAction::Ignore);

        // Same the other way around.
        let step = flow_step(Some(DialogState::HwClass), parse("lead:class:9"));
        assert_eq!(step, StepAction::Ignore);
    }

    #[test]
    fn test_flow_step_ignores_out_of_order_steps() {
        // A goal button while the flow still awaits the class selection.
        let step = flow_step(Some(DialogState::LeadClass), parse("lead:goal:oge"));
        assert_eq!(step, StepAction::Ignore);

        // Step buttons with no dialog at all.
        assert_eq!(flow_step(None, parse("lead:class:9")), StepAction::Ignore);
        assert_eq!(flow_step(None, parse("hw:topic:algebra")), StepAction::Ignore);
    }

    #[test]
    fn test_flow_step_submit_requires_confirm_state() {
        assert_eq!(flow_step(None, parse("lead:submit")), StepAction::Ignore);
        assert_eq!(
            flow_step(Some(DialogState::LeadClass), parse("lead:submit")),
            StepAction::Ignore
        );

        let step = flow_step(
            Some(DialogState::LeadConfirm {
                class: "9".to_string(),
                goal: "ОГЭ".to_string(),
                time_pref: "утро".to_string(),
                contact: "@ivan".to_string(),
            }),
            parse("lead:submit"),
        );
        assert_eq!(
            step,
            StepAction::SubmitLead {
                class: "9".to_string(),
                goal: "ОГЭ".to_string(),
                time_pref: "утро".to_string(),
                contact: "@ivan".to_string(),
            }
        );
    }

    #[test]
    fn test_flow_step_menu_home_clears_state() {
        let step = flow_step(
            Some(DialogState::LeadGoal { class: "9".to_string() }),
            parse("menu:home"),
        );
        let StepAction::Show { state, text, .. } = step else {
            panic!("expected a screen");
        };
        assert_eq!(state, StateChange::Clear);
        assert_eq!(text, texts::WELCOME);

        // Informational screens leave the dialog alone.
        let step = flow_step(Some(DialogState::HwClass), parse("menu:about"));
        let StepAction::Show { state, .. } = step else {
            panic!("expected a screen");
        };
        assert_eq!(state, StateChange::Keep);
    }

    #[test]
    fn test_flow_step_entry_points_accepted_from_any_state() {
        let step = flow_step(
            Some(DialogState::LeadContact {
                class: "10".to_string(),
                goal: "ЕГЭ".to_string(),
                time_pref: "утро".to_string(),
            }),
            parse("hw:start"),
        );
        let StepAction::Show { state, .. } = step else {
            panic!("expected a screen");
        };
        assert_eq!(state, StateChange::Set(DialogState::HwClass));
    }

    #[test]
    fn test_accept_contact_rejects_empty_text() {
        assert_eq!(
            accept_contact("9".to_string(), "ОГЭ".to_string(), "утро".to_string(), Some("   ")),
            None
        );
        assert_eq!(
            accept_contact("9".to_string(), "ОГЭ".to_string(), "утро".to_string(), None),
            None
        );

        assert_eq!(
            accept_contact("9".to_string(), "ОГЭ".to_string(), "утро".to_string(), Some(" @ivan ")),
            Some(DialogState::LeadConfirm {
                class: "9".to_string(),
                goal: "ОГЭ".to_string(),
                time_pref: "утро".to_string(),
                contact: "@ivan".to_string(),
            })
        );
    }

    #[test]
    fn test_payload_photo_wins_over_text() {
        let payload = HwPayload::from_parts(
            Some("photo-id".to_string()),
            None,
            Some("решение во вложении".to_string()),
            Some("стр. 2".to_string()),
        )
        .unwrap();

        assert_eq!(payload.kind(), "photo");
        assert_eq!(payload.file_id(), Some("photo-id"));
        assert_eq!(payload.caption(), Some("стр. 2"));
        // The text field stays unset when a photo is present.
        assert_eq!(payload.text(), None);
    }

    #[test]
    fn test_payload_photo_wins_over_document() {
        let payload =
            HwPayload::from_parts(Some("photo-id".to_string()), Some("doc-id".to_string()), None, None).unwrap();
        assert_eq!(payload.kind(), "photo");
        assert_eq!(payload.file_id(), Some("photo-id"));
    }

    #[test]
    fn test_payload_document_over_text() {
        let payload =
            HwPayload::from_parts(None, Some("doc-id".to_string()), Some("текст".to_string()), None).unwrap();
        assert_eq!(payload.kind(), "document");
        assert_eq!(payload.file_id(), Some("doc-id"));
        assert_eq!(payload.text(), None);
    }

    #[test]
    fn test_payload_plain_text() {
        let payload = HwPayload::from_parts(None, None, Some("2x + 3 = 7, x = 2".to_string()), None).unwrap();
        assert_eq!(payload.kind(), "text");
        assert_eq!(payload.text(), Some("2x + 3 = 7, x = 2"));
        assert_eq!(payload.file_id(), None);
        assert_eq!(payload.caption(), None);
    }

    #[test]
    fn test_payload_empty_message_rejected() {
        assert_eq!(HwPayload::from_parts(None, None, None, None), None);
        assert_eq!(HwPayload::from_parts(None, None, Some("   ".to_string()), None), None);
    }
}
