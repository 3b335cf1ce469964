//! Ephemeral per-chat conversation state

pub mod state;

pub use state::{DialogState, DialogStore};
