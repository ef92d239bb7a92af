//! # rest-client
//!
//! A small, typed HTTP REST client.
//!
//! Configure a base address, a content type and credentials once, then issue
//! GET/POST/PUT/DELETE calls that serialize request bodies to JSON and decode
//! response bodies into the type the caller asks for.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rest_client::RestClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> rest_client::Result<()> {
//!     let mut client = RestClient::builder()
//!         .base_address("https://api.example.com/")
//!         .request_content_type("application/json")
//!         .build()?;
//!     client.set_bearer_token("abc123");
//!
//!     // Typed: non-2xx becomes `Error::ApiCall`, bad JSON becomes `Error::Deserialization`.
//!     let user: User = client.get_as("users/1").await?;
//!     println!("{} {}", user.id, user.name);
//!
//!     // Untyped: the raw response, whatever its status.
//!     let response = client.post("orders", &serde_json::json!({"item": "X"})).await?;
//!     println!("{}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Request assembly and body encoding |
//! | [`client`] | Client configuration and the call pipeline |
//! | [`transport`] | Transport trait and the reqwest-backed default |
//! | [`error`] | Unified error type |

pub mod client;
pub mod request;
pub mod transport;

pub use client::{Credentials, RestClient, RestClientBuilder};
pub use request::{
    Content, FormUrlEncoded, HttpMethod, HttpRequest, RequestMessageBuilder, SerializedBody,
};
pub use transport::{ClientCertificate, HttpTransport, Transport, TransportError};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
