use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for configuration problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Configuration key that caused the error (e.g., "client.base_address", "request.uri")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the parser message for a bad URL)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder", "request_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the REST client.
///
/// `ApiCall` means the server rejected the call; `Deserialization` means it
/// accepted the call but returned a body that does not fit the requested type.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration (base address, method, URI) is missing or invalid.
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// The request body could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The server answered with a non-2xx status.
    #[error("Error occurred while calling API: HTTP {status} {reason}")]
    ApiCall { status: u16, reason: String },

    /// A 2xx body did not match the JSON shape of the requested type.
    #[error("Deserialization error: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    pub fn is_api_call(&self) -> bool {
        matches!(self, Error::ApiCall { .. })
    }

    /// HTTP status carried by the error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiCall { status, .. } => Some(*status),
            Error::Transport(TransportError::Http(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_renders_context() {
        let err = Error::configuration_with_context(
            "base address is required",
            ErrorContext::new()
                .with_field_path("client.base_address")
                .with_source("client_builder"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: base address is required (field: client.base_address, source: client_builder)"
        );
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("client.base_address")
        );
    }

    #[test]
    fn api_call_error_carries_reason_phrase() {
        let err = Error::ApiCall {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert!(err.is_api_call());
        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn deserialization_is_not_an_api_call_error() {
        let source = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = Error::Deserialization(source);
        assert!(!err.is_api_call());
        assert_eq!(err.status(), None);
        assert!(err.context().is_none());
    }
}
