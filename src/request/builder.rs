use super::{Content, HttpMethod, HttpRequest};
use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use url::Url;

/// Fluent builder for a single [`HttpRequest`].
///
/// Every setter is last-write-wins. `method` and `uri` are required by
/// [`build`](Self::build); everything else is optional.
#[derive(Debug)]
pub struct RequestMessageBuilder<'a, T: ?Sized = ()> {
    method: Option<HttpMethod>,
    uri: Option<String>,
    content_type: Option<String>,
    content: Option<Content<'a, T>>,
}

impl RequestMessageBuilder<'static, ()> {
    pub fn new() -> Self {
        Self {
            method: None,
            uri: None,
            content_type: None,
            content: None,
        }
    }
}

impl Default for RequestMessageBuilder<'static, ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Serialize + ?Sized> RequestMessageBuilder<'a, T> {
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Content type attached to JSON bodies. Blank values are ignored at build time.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the body, replacing any body set earlier.
    pub fn content<'b, U: Serialize + ?Sized>(
        self,
        content: Content<'b, U>,
    ) -> RequestMessageBuilder<'b, U> {
        RequestMessageBuilder {
            method: self.method,
            uri: self.uri,
            content_type: self.content_type,
            content: Some(content),
        }
    }

    /// Assemble the request, serializing a JSON body if one was set.
    pub fn build(self) -> Result<HttpRequest> {
        let method = self.method.ok_or_else(|| {
            Error::configuration_with_context(
                "request method is not set",
                ErrorContext::new()
                    .with_field_path("request.method")
                    .with_source("request_builder"),
            )
        })?;
        let uri = self.uri.ok_or_else(|| {
            Error::configuration_with_context(
                "request uri is not set",
                ErrorContext::new()
                    .with_field_path("request.uri")
                    .with_source("request_builder"),
            )
        })?;
        let url = Url::parse(&uri).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid request uri: {}", uri),
                ErrorContext::new()
                    .with_field_path("request.uri")
                    .with_details(e.to_string())
                    .with_source("request_builder"),
            )
        })?;

        let content_type = self
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty());
        let body = match self.content {
            Some(content) => Some(content.encode(content_type)?),
            None => None,
        };

        Ok(HttpRequest {
            method,
            url,
            headers: Vec::new(),
            body,
        })
    }
}
