//! Privileged handlers behind the admin allow-list
//!
//! The router verifies the allow-list before delegating here. Every action
//! answers the callback query so the pressed button stops spinning, and the
//! student is notified best-effort after the status write lands.

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::core::config;
use crate::core::texts;
use crate::dialog::DialogState;
use crate::storage::db::{self, HomeworkStatus, LeadStatus};
use crate::telegram::callback::{HwAdminAction, LeadDecision};

use super::types::HandlerDeps;

/// «Подтвердить» / «Отказать» on a lead notification.
///
/// Re-applying the same decision is allowed; the status is simply written
/// again and the owner gets the same notification once more.
pub async fn handle_lead_decision(
    bot: &Bot,
    q: &CallbackQuery,
    deps: &HandlerDeps,
    decision: LeadDecision,
    lead_id: i64,
) -> ResponseResult<()> {
    // Allow-list is re-checked here even though the router already did.
    if !config::admin::is_admin(i64::try_from(q.from.id.0).unwrap_or(0)) {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    }

    let conn = match db::connection(&deps.db_pool) {
        Ok(conn) => conn,
        Err(e) => {
            log::error!("Failed to get DB connection for lead decision: {}", e);
            bot.answer_callback_query(q.id.clone()).text(texts::TRY_AGAIN_LATER).await?;
            return Ok(());
        }
    };

    let lead = match db::get_lead(&conn, lead_id) {
        Ok(Some(lead)) => lead,
        Ok(None) => {
            bot.answer_callback_query(q.id.clone())
                .text(texts::ADMIN_LEAD_NOT_FOUND)
                .show_alert(true)
                .await?;
            return Ok(());
        }
        Err(e) => {
            log::error!("Failed to load lead #{}: {}", lead_id, e);
            bot.answer_callback_query(q.id.clone()).text(texts::TRY_AGAIN_LATER).await?;
            return Ok(());
        }
    };

    let (status, owner_text) = match decision {
        LeadDecision::Approve => (LeadStatus::Approved, texts::LEAD_APPROVED_USER),
        LeadDecision::Reject => (LeadStatus::Rejected, texts::LEAD_REJECTED_USER),
    };

    if let Err(e) = db::update_lead_status(&conn, lead_id, status) {
        log::error!("Failed to update lead #{} status: {}", lead_id, e);
        bot.answer_callback_query(q.id.clone()).text(texts::TRY_AGAIN_LATER).await?;
        return Ok(());
    }
    log::info!("Lead #{} set to {} by admin {}", lead_id, status.as_str(), q.from.id);

    // Уведомление владельцу заявки best-effort: заблокировавший бота
    // ученик не должен ломать кнопку админа.
    if let Err(e) = bot.send_message(ChatId(lead.tg_id), owner_text).await {
        log::warn!("Failed to notify lead #{} owner {}: {}", lead_id, lead.tg_id, e);
    }

    bot.answer_callback_query(q.id.clone()).text(texts::ADMIN_DONE).await?;
    Ok(())
}

/// «Принято» / «На доработку» / «Комментарий» on a homework notification.
pub async fn handle_hw_action(
    bot: &Bot,
    q: &CallbackQuery,
    deps: &HandlerDeps,
    action: HwAdminAction,
    homework_id: i64,
) -> ResponseResult<()> {
    if !config::admin::is_admin(i64::try_from(q.from.id.0).unwrap_or(0)) {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    }

    let conn = match db::connection(&deps.db_pool) {
        Ok(conn) => conn,
        Err(e) => {
            log::error!("Failed to get DB connection for homework action: {}", e);
            bot.answer_callback_query(q.id.clone()).text(texts::TRY_AGAIN_LATER).await?;
            return Ok(());
        }
    };

    let hw = match db::get_homework(&conn, homework_id) {
        Ok(Some(hw)) => hw,
        Ok(None) => {
            bot.answer_callback_query(q.id.clone())
                .text(texts::ADMIN_HW_NOT_FOUND)
                .show_alert(true)
                .await?;
            return Ok(());
        }
        Err(e) => {
            log::error!("Failed to load homework #{}: {}", homework_id, e);
            bot.answer_callback_query(q.id.clone()).text(texts::TRY_AGAIN_LATER).await?;
            return Ok(());
        }
    };

    let (status, owner_text) = match action {
        HwAdminAction::Accept => (HomeworkStatus::Accepted, texts::HW_ACCEPTED_USER),
        HwAdminAction::Rework => (HomeworkStatus::Rework, texts::HW_REWORK_USER),
        HwAdminAction::Comment => {
            // Комментарий пишется следующим сообщением; состояние живёт под
            // chat id самого админа.
            let admin_chat = q.message.as_ref().map(|m| m.chat().id);
            let Some(admin_chat) = admin_chat else {
                bot.answer_callback_query(q.id.clone()).await?;
                return Ok(());
            };
            deps.dialogs.set(admin_chat.0, DialogState::AdminAwaitingHwComment { homework_id });
            bot.answer_callback_query(q.id.clone()).await?;
            bot.send_message(admin_chat, texts::ADMIN_COMMENT_PROMPT).await?;
            return Ok(());
        }
    };

    if let Err(e) = db::update_homework_status(&conn, homework_id, status) {
        log::error!("Failed to update homework #{} status: {}", homework_id, e);
        bot.answer_callback_query(q.id.clone()).text(texts::TRY_AGAIN_LATER).await?;
        return Ok(());
    }
    log::info!(
        "Homework #{} set to {} by admin {}",
        homework_id,
        status.as_str(),
        q.from.id
    );

    if let Err(e) = bot
        .send_message(ChatId(hw.tg_id), owner_text)
        .parse_mode(ParseMode::Markdown)
        .await
    {
        log::warn!("Failed to notify homework #{} owner {}: {}", homework_id, hw.tg_id, e);
    }

    bot.answer_callback_query(q.id.clone()).text(texts::ADMIN_DONE).await?;
    Ok(())
}

/// The comment text promised after «Комментарий».
///
/// Empty input re-prompts and keeps the state; a vanished homework clears
/// it. On success the comment is stored, relayed to the student and the
/// admin gets a confirmation.
pub async fn handle_comment_message(
    bot: &Bot,
    msg: &Message,
    deps: &HandlerDeps,
    homework_id: i64,
) -> ResponseResult<()> {
    let from_id = msg.from.as_ref().and_then(|u| i64::try_from(u.id.0).ok()).unwrap_or(0);
    if !config::admin::is_admin(from_id) {
        return Ok(());
    }

    let Some(comment) = super::flows::normalize_text(msg.text()) else {
        bot.send_message(msg.chat.id, texts::ADMIN_COMMENT_EMPTY).await?;
        return Ok(());
    };

    let conn = match db::connection(&deps.db_pool) {
        Ok(conn) => conn,
        Err(e) => {
            log::error!("Failed to get DB connection for homework comment: {}", e);
            bot.send_message(msg.chat.id, texts::TRY_AGAIN_LATER).await?;
            return Ok(());
        }
    };

    let hw = match db::get_homework(&conn, homework_id) {
        Ok(Some(hw)) => hw,
        Ok(None) => {
            deps.dialogs.clear(msg.chat.id.0);
            bot.send_message(msg.chat.id, texts::ADMIN_HW_NOT_FOUND).await?;
            return Ok(());
        }
        Err(e) => {
            log::error!("Failed to load homework #{}: {}", homework_id, e);
            bot.send_message(msg.chat.id, texts::TRY_AGAIN_LATER).await?;
            return Ok(());
        }
    };

    if let Err(e) = db::set_homework_comment(&conn, homework_id, &comment) {
        log::error!("Failed to store comment for homework #{}: {}", homework_id, e);
        bot.send_message(msg.chat.id, texts::TRY_AGAIN_LATER).await?;
        return Ok(());
    }

    deps.dialogs.clear(msg.chat.id.0);
    log::info!("Comment stored for homework #{} by admin {}", homework_id, msg.chat.id);

    let owner_text = format!("💬 *Комментарий по ДЗ #{}*\n\n{}", homework_id, comment);
    if let Err(e) = bot
        .send_message(ChatId(hw.tg_id), owner_text)
        .parse_mode(ParseMode::Markdown)
        .await
    {
        log::warn!("Failed to relay comment for homework #{} to {}: {}", homework_id, hw.tg_id, e);
    }

    bot.send_message(msg.chat.id, texts::ADMIN_COMMENT_SENT).await?;
    Ok(())
}
