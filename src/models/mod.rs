//! Data models module
//!
//! Types exchanged between the gateway's adapters, upstream client and translator

pub mod upstream;

pub use upstream::{UpstreamOutcome, UpstreamReply, UpstreamRequest};
