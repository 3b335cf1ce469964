//! Best-effort admin notifications
//!
//! Fan-out runs after the defining database write. A failure to reach one
//! admin is logged and skipped; it never rolls anything back and never
//! surfaces to the student.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, ParseMode};
use teloxide::{ApiError, RequestError};

use crate::core::config;

/// True when the API rejected the message body itself, not the delivery.
///
/// Notification texts interpolate free user input into Markdown; an odd `*`
/// or `_` in it makes the whole message unparseable.
fn is_parse_error(err: &RequestError) -> bool {
    matches!(err, RequestError::Api(ApiError::CantParseEntities(_)))
}

/// Sends `text` to every configured admin, optionally with inline controls.
///
/// Markdown is attempted first; if the API cannot parse the entities the
/// same text is resent as plain text, so the content still reaches the
/// admin, just without formatting.
pub async fn notify_admins(bot: &Bot, text: &str, keyboard: Option<InlineKeyboardMarkup>) {
    if config::admin::ADMIN_IDS.is_empty() {
        log::warn!("ADMIN_IDS is empty, notification dropped: {}", text.lines().next().unwrap_or(""));
        return;
    }

    for &admin_id in config::admin::ADMIN_IDS.iter() {
        let request = bot
            .send_message(ChatId(admin_id), text)
            .parse_mode(ParseMode::Markdown);
        let request = match keyboard.clone() {
            Some(kb) => request.reply_markup(kb),
            None => request,
        };

        if let Err(e) = request.await {
            if is_parse_error(&e) {
                log::warn!("Markdown rejected for admin {}, resending as plain text: {}", admin_id, e);
                let retry = bot.send_message(ChatId(admin_id), text);
                let retry = match keyboard.clone() {
                    Some(kb) => retry.reply_markup(kb),
                    None => retry,
                };
                if let Err(e) = retry.await {
                    log::warn!("Failed to notify admin {}: {}", admin_id, e);
                }
            } else {
                // не ломаем поток из-за недоступного админа
                log::warn!("Failed to notify admin {}: {}", admin_id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_only_on_entity_parse_errors() {
        let parse = RequestError::Api(ApiError::CantParseEntities(
            "Can't parse entities: can't find end of the entity".to_string(),
        ));
        assert!(is_parse_error(&parse));

        // Delivery failures keep the single-attempt behaviour.
        assert!(!is_parse_error(&RequestError::Api(ApiError::BotBlocked)));
    }
}
