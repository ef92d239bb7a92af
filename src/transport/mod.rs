//! The transport collaborator: sends one request and hands back one response.

mod http;

pub use http::{ClientCertificate, HttpTransport};

use crate::request::HttpRequest;
use crate::Result;
use async_trait::async_trait;

/// Sends a single [`HttpRequest`] and returns the raw response.
///
/// Implementations are shared by every in-flight call of a client and must be
/// safe for concurrent use. Status codes are not interpreted here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<reqwest::Response>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
