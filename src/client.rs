//! The REST client.
//!
//! Configuration lives in [`RestClientBuilder`]; [`RestClient`] owns the
//! transport and runs every call through the shared execution pipeline in
//! `src/client/execution.rs`.

pub mod builder;
pub mod core;
mod execution;

pub use builder::{Credentials, RestClientBuilder};
pub use core::RestClient;
