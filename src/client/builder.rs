use crate::client::core::RestClient;
use crate::transport::{ClientCertificate, HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::fmt;
use std::sync::Arc;
use tracing::warn;
use url::Url;

/// Username/password pair sent as HTTP Basic credentials.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub(crate) fn basic_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Builder for [`RestClient`].
///
/// Holds configuration until [`build`](Self::build) constructs the transport.
/// At most one of [`certificate`](Self::certificate) and
/// [`user_and_password`](Self::user_and_password) may be set.
#[derive(Clone, Default)]
pub struct RestClientBuilder {
    base_address: Option<String>,
    request_content_type: Option<String>,
    certificate: Option<ClientCertificate>,
    credentials: Option<Credentials>,
    transport: Option<Arc<dyn Transport>>,
}

impl RestClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the builder from `REST_CLIENT_BASE_ADDRESS` and `REST_CLIENT_CONTENT_TYPE`.
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        if let Ok(address) = std::env::var("REST_CLIENT_BASE_ADDRESS") {
            builder = builder.base_address(address);
        }
        if let Ok(content_type) = std::env::var("REST_CLIENT_CONTENT_TYPE") {
            builder = builder.request_content_type(content_type);
        }
        builder
    }

    /// Prefix for every call path. Stored as given; paths are appended without
    /// inserting a separator.
    pub fn base_address(mut self, address: impl Into<String>) -> Self {
        self.base_address = Some(address.into());
        self
    }

    /// Content type for request bodies, also sent as the only `Accept` value.
    pub fn request_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.request_content_type = Some(content_type.into());
        self
    }

    pub fn certificate(mut self, certificate: ClientCertificate) -> Self {
        self.certificate = Some(certificate);
        self
    }

    pub fn user_and_password(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Use a custom transport instead of the default reqwest one.
    ///
    /// Client certificates cannot be applied to an injected transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RestClient> {
        let base_address = self
            .base_address
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "base address is required",
                    ErrorContext::new()
                        .with_field_path("client.base_address")
                        .with_source("client_builder"),
                )
            })?;
        Url::parse(&base_address).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base address: {}", base_address),
                ErrorContext::new()
                    .with_field_path("client.base_address")
                    .with_details(e.to_string())
                    .with_source("client_builder"),
            )
        })?;

        if self.certificate.is_some() && self.credentials.is_some() {
            warn!("both a client certificate and basic credentials were configured");
            return Err(Error::configuration_with_context(
                "a client certificate and basic credentials are mutually exclusive",
                ErrorContext::new()
                    .with_field_path("client.credentials")
                    .with_source("client_builder"),
            ));
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(_) if self.certificate.is_some() => {
                return Err(Error::configuration_with_context(
                    "a client certificate cannot be applied to a custom transport",
                    ErrorContext::new()
                        .with_field_path("client.certificate")
                        .with_source("client_builder"),
                ));
            }
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.certificate.as_ref())?),
        };

        let request_content_type = self
            .request_content_type
            .map(|ct| ct.trim().to_string())
            .filter(|ct| !ct.is_empty());

        let mut default_headers = Vec::new();
        if let Some(content_type) = &request_content_type {
            default_headers.push((ACCEPT.as_str().to_string(), content_type.clone()));
        }
        if let Some(credentials) = &self.credentials {
            default_headers.push((AUTHORIZATION.as_str().to_string(), credentials.basic_header()));
        }

        Ok(RestClient {
            base_address,
            request_content_type,
            transport,
            default_headers,
            basic_credentials: self.credentials.is_some(),
        })
    }
}

impl fmt::Debug for RestClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClientBuilder")
            .field("base_address", &self.base_address)
            .field("request_content_type", &self.request_content_type)
            .field("certificate", &self.certificate)
            .field("credentials", &self.credentials)
            .field("transport", &self.transport.as_ref().map(|t| t.name()))
            .finish()
    }
}
