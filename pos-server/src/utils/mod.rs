//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`AppResponse`] - error type and response envelope
//! - [`logger`] - tracing setup
//! - [`time`] - millisecond timestamps and RFC 3339 rendering

pub mod error;
pub mod logger;
pub mod time;

pub use error::{ok, ok_with_message};
pub use error::{AppError, AppResponse, AppResult};
pub use time::{millis_to_rfc3339, now_millis};
