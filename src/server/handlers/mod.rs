//! HTTP request handlers.

mod api;
mod error;

pub use api::{greet, health, process_command, CommandRequest, CommandResponse};
pub use error::ApiError;
