//! Request body strategies and JSON codec helpers.

use bytes::Bytes;

use crate::{Multipart, Result};

/// Content type constants for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Plain text content type (`text/plain`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request payload. Exactly one mode is active per request.
///
/// [`Body::Json`] of `Value::Null` encodes as the literal three-byte body
/// `null` — sending a JSON null is distinct from sending no body at all
/// ([`Body::None`]).
#[derive(Debug)]
pub enum Body {
    /// No payload; no content type header is added.
    None,
    /// JSON-encoded value, sent as `application/json`.
    Json(serde_json::Value),
    /// Verbatim text with a caller-specified content type.
    Raw {
        /// Body text.
        text: String,
        /// Content type header value.
        content_type: String,
    },
    /// Multipart form data.
    Multipart(Multipart),
}

impl Body {
    /// Create a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Create a JSON body carrying an explicit null.
    #[must_use]
    pub const fn json_null() -> Self {
        Self::Json(serde_json::Value::Null)
    }

    /// Create a raw text body. An absent text is treated as an empty string,
    /// never as an error.
    #[must_use]
    pub fn raw(text: Option<&str>, content_type: impl Into<String>) -> Self {
        Self::Raw {
            text: text.unwrap_or_default().to_string(),
            content_type: content_type.into(),
        }
    }

    /// Create a plain text body.
    #[must_use]
    pub fn text(text: Option<&str>) -> Self {
        Self::raw(text, ContentType::PlainText.as_str())
    }

    /// Encode into a `(content type, payload)` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails or a multipart part
    /// cannot be read.
    pub fn encode(self) -> Result<(Option<String>, Option<Bytes>)> {
        match self {
            Self::None => Ok((None, None)),
            Self::Json(value) => {
                let bytes = serde_json::to_vec(&value)?;
                Ok((
                    Some(ContentType::Json.as_str().to_string()),
                    Some(Bytes::from(bytes)),
                ))
            }
            Self::Raw { text, content_type } => {
                Ok((Some(content_type), Some(Bytes::from(text))))
            }
            Self::Multipart(form) => {
                let (content_type, bytes) = form.into_body()?;
                Ok((Some(content_type), Some(bytes)))
            }
        }
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use restkit_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so a failed decode reports the exact path to
/// the offending field (e.g., "user.address.city").
///
/// # Errors
///
/// Returns [`crate::Error::Decode`] if the bytes do not match the target
/// shape.
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| crate::Error::decode(e.path().to_string(), e.inner().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_as_str() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
        assert_eq!(ContentType::PlainText.as_str(), "text/plain");
        assert_eq!(
            ContentType::OctetStream.as_str(),
            "application/octet-stream"
        );
    }

    #[test]
    fn body_none_has_no_payload() {
        let (content_type, payload) = Body::None.encode().expect("encode");
        assert!(content_type.is_none());
        assert!(payload.is_none());
    }

    #[test]
    fn body_json_encodes_value() {
        #[derive(serde::Serialize)]
        struct User {
            name: String,
        }

        let body = Body::json(&User {
            name: "Alice".to_string(),
        })
        .expect("body");

        let (content_type, payload) = body.encode().expect("encode");
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(
            payload.expect("payload").as_ref(),
            br#"{"name":"Alice"}"#
        );
    }

    #[test]
    fn body_json_null_is_literal_null() {
        // A JSON null body is a real payload, distinct from Body::None.
        let (content_type, payload) = Body::json_null().encode().expect("encode");
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(payload.expect("payload").as_ref(), b"null");

        let body = Body::json(&None::<u32>).expect("body");
        let (_, payload) = body.encode().expect("encode");
        assert_eq!(payload.expect("payload").as_ref(), b"null");
    }

    #[test]
    fn body_raw_defaults_absent_text_to_empty() {
        let (content_type, payload) = Body::text(None).encode().expect("encode");
        assert_eq!(content_type.as_deref(), Some("text/plain"));
        assert_eq!(payload.expect("payload").as_ref(), b"");
    }

    #[test]
    fn body_raw_keeps_text_verbatim() {
        let body = Body::raw(Some("<xml/>"), "application/xml");
        let (content_type, payload) = body.encode().expect("encode");
        assert_eq!(content_type.as_deref(), Some("application/xml"));
        assert_eq!(payload.expect("payload").as_ref(), b"<xml/>");
    }

    #[test]
    fn body_multipart_encodes_form() {
        let form = crate::Multipart::with_boundary("mb").text("a", "b");
        let (content_type, payload) = Body::Multipart(form).encode().expect("encode");
        assert_eq!(
            content_type.as_deref(),
            Some("multipart/form-data; boundary=mb")
        );
        assert!(!payload.expect("payload").is_empty());
    }

    #[test]
    fn from_json_decode_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct User {
            #[allow(dead_code)]
            address: Address,
        }

        let bytes = br#"{"address":{}}"#;
        let result: Result<User> = from_json(bytes);

        let err = result.expect_err("should fail");
        let msg = err.to_string();
        assert!(msg.contains("address"), "expected path in error: {msg}");
        assert!(msg.contains("city"), "expected field in error: {msg}");
    }

    #[test]
    fn json_roundtrip() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct User {
            name: String,
            age: u32,
        }

        let user = User {
            name: "Alice".to_string(),
            age: 30,
        };
        let bytes = to_json(&user).expect("serialize");
        let back: User = from_json(&bytes).expect("deserialize");
        assert_eq!(back, user);
    }
}
