//! Repetitor - conversational Telegram bot for a math tutoring practice
//!
//! This library provides all the functionality of the bot: per-chat dialog
//! flows, persistence for enrollment leads and homework submissions, and
//! admin review controls.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, texts and the keyword classifier
//! - `storage`: Database operations (users, leads, homeworks)
//! - `dialog`: Per-chat dialog state between updates
//! - `telegram`: Bot integration, keyboards and the handler tree

pub mod core;
pub mod dialog;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult};
pub use dialog::{DialogState, DialogStore};
pub use storage::{create_pool, get_connection, DbConnection, DbPool};
pub use telegram::{create_bot, schema, HandlerDeps};
