//! Request execution: build, send, then hand the response to a strategy.
//!
//! Both call families share [`RestClient::dispatch`]; they differ only in the
//! [`ResponseHandler`] applied after the transport returns.

use crate::request::{Content, HttpMethod, HttpRequest, RequestMessageBuilder};
use crate::transport::TransportError;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use super::core::RestClient;

/// Post-processing applied to a response once the transport returns it.
#[async_trait]
pub(crate) trait ResponseHandler: Send {
    type Output;

    async fn handle(self, response: Response) -> Result<Self::Output>;
}

/// Return the response untouched, whatever its status.
pub(crate) struct Passthrough;

#[async_trait]
impl ResponseHandler for Passthrough {
    type Output = Response;

    async fn handle(self, response: Response) -> Result<Response> {
        Ok(response)
    }
}

/// Classify by status, then decode a 2xx body as JSON.
pub(crate) struct DecodeJson<T>(PhantomData<fn() -> T>);

impl<T> DecodeJson<T> {
    pub(crate) fn new() -> Self {
        Self(PhantomData)
    }
}

#[async_trait]
impl<T: DeserializeOwned> ResponseHandler for DecodeJson<T> {
    type Output = T;

    async fn handle(self, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            // The body is never read; dropping the response releases the connection.
            return Err(Error::ApiCall {
                status: status.as_u16(),
                reason: reason_phrase(&response),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        serde_json::from_str(&body).map_err(Error::Deserialization)
    }
}

/// The phrase the server sent on the status line, else the canonical one.
fn reason_phrase(response: &Response) -> String {
    if let Some(phrase) = response.extensions().get::<hyper::ext::ReasonPhrase>() {
        return String::from_utf8_lossy(phrase.as_bytes()).into_owned();
    }
    response
        .status()
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string()
}

impl RestClient {
    pub(crate) async fn dispatch<B, H>(
        &self,
        method: HttpMethod,
        path: &str,
        content: Option<Content<'_, B>>,
        handler: H,
    ) -> Result<H::Output>
    where
        B: Serialize + ?Sized + Sync,
        H: ResponseHandler,
    {
        let request = self.assemble(method, path, content)?;
        let request_id = Uuid::new_v4().to_string();
        debug!(
            request_id = request_id.as_str(),
            method = method.as_str(),
            url = request.url.as_str(),
            transport = self.transport.name(),
            "rest-client sending request"
        );

        let start = Instant::now();
        let response = self.transport.send(request).await?;
        let http_status = response.status().as_u16();
        debug!(
            request_id = request_id.as_str(),
            http_status,
            duration_ms = start.elapsed().as_millis() as u64,
            "rest-client received response"
        );

        let result = handler.handle(response).await;
        if let Err(e) = &result {
            info!(
                request_id = request_id.as_str(),
                method = method.as_str(),
                path,
                http_status,
                error = %e,
                "rest-client request failed"
            );
        }
        result
    }

    /// Build the outgoing request and stamp the default headers onto it.
    fn assemble<B>(
        &self,
        method: HttpMethod,
        path: &str,
        content: Option<Content<'_, B>>,
    ) -> Result<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = RequestMessageBuilder::new()
            .method(method)
            .uri(format!("{}{}", self.base_address, path));
        if let Some(content_type) = &self.request_content_type {
            builder = builder.content_type(content_type.as_str());
        }

        let mut request = match content {
            Some(content) => builder.content(content).build()?,
            None => builder.build()?,
        };
        for (name, value) in &self.default_headers {
            request.set_header(name.as_str(), value.as_str());
        }
        Ok(request)
    }
}
