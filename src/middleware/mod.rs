//! Middleware module
//!
//! Authentication gate, request logging and caller address resolution

pub mod auth;
pub mod client_ip;
pub mod logging;

pub use auth::{auth_middleware, API_KEY_HEADER};
pub use client_ip::ClientAddr;
pub use logging::request_logging_middleware;
