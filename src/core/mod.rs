//! Core utilities: configuration, errors, logging, texts, classifier

pub mod classifier;
pub mod config;
pub mod error;
pub mod logging;
pub mod texts;

pub use error::{AppError, AppResult};
pub use logging::init_logger;
