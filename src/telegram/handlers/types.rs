//! Handler types, dependencies, and user management helpers

use std::sync::Arc;

use teloxide::types::{CallbackQuery, Message};

use crate::core::error::AppResult;
use crate::dialog::DialogStore;
use crate::storage::db::{self, create_user, get_user};
use crate::storage::get_connection;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub db_pool: Arc<db::DbPool>,
    pub dialogs: Arc<DialogStore>,
}

impl HandlerDeps {
    pub fn new(db_pool: Arc<db::DbPool>, dialogs: Arc<DialogStore>) -> Self {
        Self { db_pool, dialogs }
    }
}

/// Sender identity attached to outgoing admin notifications
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub chat_id: i64,
    pub username: Option<String>,
    pub full_name: Option<String>,
}

impl UserInfo {
    /// Extract user info from a Telegram message
    pub fn from_message(msg: &Message) -> Self {
        Self {
            chat_id: msg.chat.id.0,
            username: msg.from.as_ref().and_then(|u| u.username.clone()),
            full_name: msg.from.as_ref().map(|u| u.full_name()),
        }
    }

    /// Extract user info from a callback query
    pub fn from_callback(q: &CallbackQuery) -> Self {
        Self {
            chat_id: i64::try_from(q.from.id.0).unwrap_or(0),
            username: q.from.username.clone(),
            full_name: Some(q.from.full_name()),
        }
    }

    /// "Имя Фамилия (@ник)" line for admin notifications
    pub fn display_line(&self) -> String {
        format!(
            "{} (@{})",
            self.full_name.as_deref().unwrap_or("—"),
            self.username.as_deref().unwrap_or("—")
        )
    }
}

/// Ensures a user row exists, creating it on first contact.
///
/// The row is create-once; nothing is updated for returning users.
pub fn ensure_user_exists(db_pool: &Arc<db::DbPool>, user: &UserInfo) -> AppResult<()> {
    let conn = get_connection(db_pool)?;
    if get_user(&conn, user.chat_id)?.is_none() {
        create_user(&conn, user.chat_id, user.username.as_deref(), user.full_name.as_deref())?;
        log::info!("Created user {} (@{})", user.chat_id, user.username.as_deref().unwrap_or("—"));
    }
    Ok(())
}
