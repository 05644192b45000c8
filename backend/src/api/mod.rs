//! Inbound HTTP adapter: handlers and error payloads.

pub mod characters;
pub mod combat_styles;
pub mod error;
pub mod health;

pub use error::{ApiError, ApiResult};
