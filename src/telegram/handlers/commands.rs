//! Command handlers

use teloxide::prelude::*;

use crate::core::texts;
use crate::telegram::keyboards::main_menu;

use super::types::{ensure_user_exists, HandlerDeps, UserInfo};

/// /start: drops any unfinished dialog, registers the user on first contact
/// and shows the main menu.
pub async fn handle_start_command(bot: Bot, msg: Message, deps: HandlerDeps) -> ResponseResult<()> {
    deps.dialogs.clear(msg.chat.id.0);

    let user = UserInfo::from_message(&msg);
    // Регистрация не должна блокировать приветствие.
    if let Err(e) = ensure_user_exists(&deps.db_pool, &user) {
        log::error!("Failed to register user {}: {}", user.chat_id, e);
    }

    bot.send_message(msg.chat.id, texts::WELCOME)
        .reply_markup(main_menu())
        .await?;
    Ok(())
}
