//! Request bodies and their wire encoding.

use crate::{Error, Result};
use bytes::Bytes;
use serde::Serialize;
use std::fmt;

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// A form body that is already `application/x-www-form-urlencoded`.
///
/// Sent byte-for-byte as constructed; never re-encoded as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormUrlEncoded {
    encoded: String,
}

impl FormUrlEncoded {
    /// Encode key/value pairs in order.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
        Self {
            encoded: serializer.finish(),
        }
    }

    /// Wrap a payload the caller has already encoded.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

/// A request body, tagged by how it reaches the wire.
///
/// `Json` bodies are serialized when the request is built. Every other variant
/// is a pre-encoded kind that bypasses serialization.
pub enum Content<'a, T: ?Sized> {
    Json(&'a T),
    Form(&'a FormUrlEncoded),
}

impl<T: ?Sized> Clone for Content<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Content<'_, T> {}

impl<T: ?Sized> fmt::Debug for Content<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Json(_) => f.write_str("Content::Json(..)"),
            Content::Form(form) => f.debug_tuple("Content::Form").field(form).finish(),
        }
    }
}

impl<T: Serialize + ?Sized> Content<'_, T> {
    /// Encode to wire bytes.
    ///
    /// `content_type` is attached to JSON payloads only; form payloads keep their
    /// own content type.
    pub(crate) fn encode(&self, content_type: Option<&str>) -> Result<SerializedBody> {
        match self {
            Content::Form(form) => Ok(SerializedBody {
                bytes: Bytes::copy_from_slice(form.as_str().as_bytes()),
                content_type: Some(FORM_URLENCODED.to_string()),
            }),
            Content::Json(value) => {
                let json = serde_json::to_string(value).map_err(Error::Serialization)?;
                Ok(SerializedBody {
                    bytes: Bytes::from(json.into_bytes()),
                    content_type: content_type.map(str::to_string),
                })
            }
        }
    }
}

/// Raw payload plus its optional content-type metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedBody {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_pairs_are_percent_encoded_in_order() {
        let form = FormUrlEncoded::new([("grant_type", "password"), ("username", "ada lovelace")]);
        assert_eq!(form.as_str(), "grant_type=password&username=ada+lovelace");
    }

    #[test]
    fn form_body_ignores_configured_content_type() {
        let form = FormUrlEncoded::from_encoded("a=1&b=%7B%7D");
        let body = Content::<()>::Form(&form)
            .encode(Some("application/json"))
            .unwrap();
        assert_eq!(&body.bytes[..], b"a=1&b=%7B%7D");
        assert_eq!(body.content_type.as_deref(), Some(FORM_URLENCODED));
    }

    #[test]
    fn json_body_without_content_type_has_no_metadata() {
        let body = Content::Json(&serde_json::json!({"item": "X"}))
            .encode(None)
            .unwrap();
        assert_eq!(&body.bytes[..], br#"{"item":"X"}"#);
        assert!(body.content_type.is_none());
    }
}
