//! Service layer module
//!
//! Contains the upstream HTTP client and the response translator

pub mod client;
pub mod translator;

pub use client::{HttpUpstream, Upstream};
pub use translator::translate;
