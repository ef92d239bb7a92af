use crate::client::builder::RestClientBuilder;
use crate::client::execution::{DecodeJson, Passthrough};
use crate::request::{Content, FormUrlEncoded, HttpMethod};
use crate::transport::Transport;
use crate::Result;
use reqwest::header::AUTHORIZATION;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// A configured REST client.
///
/// Untyped calls (`get`, `post`, ...) return the raw response whatever its
/// status. Typed calls (`get_as`, `post_as`, ...) fail with
/// [`Error::ApiCall`](crate::Error::ApiCall) on non-2xx and otherwise decode the
/// body as JSON.
///
/// Every call is independent; concurrent calls share only the transport.
pub struct RestClient {
    pub(crate) base_address: String,
    pub(crate) request_content_type: Option<String>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) default_headers: Vec<(String, String)>,
    pub(crate) basic_credentials: bool,
}

impl RestClient {
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::new()
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    pub fn request_content_type(&self) -> Option<&str> {
        self.request_content_type.as_deref()
    }

    /// Send `Authorization: Bearer <token>` on every subsequent call.
    ///
    /// Replaces basic credentials on the wire if those were configured. Needs
    /// `&mut self`; a client shared behind `Arc` must be synchronized externally
    /// to rotate its token.
    pub fn set_bearer_token(&mut self, token: &str) {
        if self.basic_credentials {
            warn!("bearer token replaces the configured basic credentials");
            self.basic_credentials = false;
        }
        self.default_headers
            .retain(|(name, _)| !name.eq_ignore_ascii_case(AUTHORIZATION.as_str()));
        self.default_headers
            .push((AUTHORIZATION.as_str().to_string(), format!("Bearer {}", token)));
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        self.dispatch(HttpMethod::Get, path, None::<Content<'_, ()>>, Passthrough)
            .await
    }

    pub async fn post<B: Serialize + ?Sized + Sync>(&self, path: &str, body: &B) -> Result<Response> {
        self.dispatch(HttpMethod::Post, path, Some(Content::Json(body)), Passthrough)
            .await
    }

    pub async fn put<B: Serialize + ?Sized + Sync>(&self, path: &str, body: &B) -> Result<Response> {
        self.dispatch(HttpMethod::Put, path, Some(Content::Json(body)), Passthrough)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.dispatch(HttpMethod::Delete, path, None::<Content<'_, ()>>, Passthrough)
            .await
    }

    pub async fn post_form(&self, path: &str, form: &FormUrlEncoded) -> Result<Response> {
        self.dispatch(HttpMethod::Post, path, Some(Content::<()>::Form(form)), Passthrough)
            .await
    }

    pub async fn put_form(&self, path: &str, form: &FormUrlEncoded) -> Result<Response> {
        self.dispatch(HttpMethod::Put, path, Some(Content::<()>::Form(form)), Passthrough)
            .await
    }

    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.dispatch(HttpMethod::Get, path, None::<Content<'_, ()>>, DecodeJson::new())
            .await
    }

    pub async fn post_as<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.dispatch(HttpMethod::Post, path, Some(Content::Json(body)), DecodeJson::new())
            .await
    }

    pub async fn put_as<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.dispatch(HttpMethod::Put, path, Some(Content::Json(body)), DecodeJson::new())
            .await
    }

    pub async fn delete_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.dispatch(HttpMethod::Delete, path, None::<Content<'_, ()>>, DecodeJson::new())
            .await
    }

    pub async fn post_form_as<T: DeserializeOwned>(&self, path: &str, form: &FormUrlEncoded) -> Result<T> {
        self.dispatch(HttpMethod::Post, path, Some(Content::<()>::Form(form)), DecodeJson::new())
            .await
    }

    pub async fn put_form_as<T: DeserializeOwned>(&self, path: &str, form: &FormUrlEncoded) -> Result<T> {
        self.dispatch(HttpMethod::Put, path, Some(Content::<()>::Form(form)), DecodeJson::new())
            .await
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_address", &self.base_address)
            .field("request_content_type", &self.request_content_type)
            .field("transport", &self.transport.name())
            .finish()
    }
}
