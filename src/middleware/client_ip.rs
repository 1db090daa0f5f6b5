//! Caller address resolution

use async_trait::async_trait;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, Extensions, HeaderMap},
};
use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;

/// Network address of the caller, for logging
///
/// Prefers the socket peer; falls back to proxy headers, then `unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub String);

impl ClientAddr {
    pub fn from_parts(headers: &HeaderMap, extensions: &Extensions) -> Self {
        if let Some(ConnectInfo(addr)) = extensions.get::<ConnectInfo<SocketAddr>>() {
            return Self(addr.ip().to_string());
        }

        Self(get_client_ip(headers).unwrap_or_else(|| "unknown".to_string()))
    }
}

impl fmt::Display for ClientAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(&parts.headers, &parts.extensions))
    }
}

/// Get client IP address from proxy headers
fn get_client_ip(headers: &HeaderMap) -> Option<String> {
    for header_name in ["x-forwarded-for", "x-real-ip"] {
        if let Some(ip_str) = headers.get(header_name).and_then(|v| v.to_str().ok()) {
            // X-Forwarded-For may contain multiple IPs, take the first one
            if let Some(first_ip) = ip_str.split(',').next() {
                let ip = first_ip.trim();
                if !ip.is_empty() && ip != "unknown" {
                    return Some(ip.to_string());
                }
            }
        }
    }

    None
}
