//! Error types for restkit.

use derive_more::{Display, Error, From};

/// Main error type for restkit operations.
///
/// Caller-contract violations ([`Error::EmptyParamName`],
/// [`Error::MissingHeaderValue`], [`Error::MissingSegmentValue`]) are always
/// fatal to the single call and never retried. Environment failures
/// ([`Error::Aborted`], [`Error::Timeout`], [`Error::Connection`],
/// [`Error::Tls`]) are surfaced as-is with no internal retry. Every failure
/// aborts the one call that produced it; the caller decides what to do next.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The remote rejected the request (non-2xx status, no transport failure).
    #[display("HTTP error {status}: {status_text}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Status text reported by the server.
        status_text: String,
        /// Response body, if available.
        #[error(not(source))]
        body: Option<bytes::Bytes>,
    },

    /// A mapping-sourced parameter had an empty name.
    #[display("parameter name must not be empty")]
    #[from(skip)]
    EmptyParamName,

    /// A header parameter projected to an absent value.
    #[display("header '{name}' must not have an absent value")]
    #[from(skip)]
    MissingHeaderValue {
        /// Header name.
        name: String,
    },

    /// A path segment parameter projected to an absent value.
    #[display("path segment '{name}' must not have an absent value")]
    #[from(skip)]
    MissingSegmentValue {
        /// Segment name.
        name: String,
    },

    /// The transport reported the request as aborted.
    #[display("request aborted")]
    #[from(skip)]
    Aborted(#[error(not(source))] Option<Box<Error>>),

    /// The transport reported the request as timed out.
    #[display("request timed out")]
    #[from(skip)]
    Timeout(#[error(not(source))] Option<Box<Error>>),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// The response body did not match the expected shape.
    #[display("decode error at '{path}': {message}")]
    #[from(skip)]
    Decode {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// I/O error while reading a file- or stream-backed multipart part.
    #[display("I/O error: {_0}")]
    #[from]
    Io(std::io::Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an HTTP error from status code and status text.
    #[must_use]
    pub fn http(status: u16, status_text: impl Into<String>) -> Self {
        Self::Http {
            status,
            status_text: status_text.into(),
            body: None,
        }
    }

    /// Create an HTTP error with body.
    #[must_use]
    pub fn http_with_body(
        status: u16,
        status_text: impl Into<String>,
        body: bytes::Bytes,
    ) -> Self {
        Self::Http {
            status,
            status_text: status_text.into(),
            body: Some(body),
        }
    }

    /// Create an aborted error, optionally wrapping the transport error.
    #[must_use]
    pub fn aborted(cause: Option<Error>) -> Self {
        Self::Aborted(cause.map(Box::new))
    }

    /// Create a timeout error, optionally wrapping the transport error.
    #[must_use]
    pub fn timed_out(cause: Option<Error>) -> Self {
        Self::Timeout(cause.map(Box::new))
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a decode error with path context.
    #[must_use]
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Returns `true` if this is an aborted error.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the wrapped transport error for aborted/timeout errors.
    #[must_use]
    pub fn cause(&self) -> Option<&Error> {
        match self {
            Self::Aborted(cause) | Self::Timeout(cause) => cause.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the response body if this is an HTTP error with a body.
    #[must_use]
    pub fn body(&self) -> Option<&bytes::Bytes> {
        match self {
            Self::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Try to decode the HTTP error body as JSON.
    ///
    /// Returns `Some(Ok(value))` if the error has a body and it deserializes
    /// successfully, `Some(Err(error))` if the body exists but does not match,
    /// or `None` if there is no body or this is not an HTTP error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}

#[cfg(test)]
mod tests {
    use assert2::let_assert;

    use super::*;

    #[test]
    fn error_display() {
        let err = Error::http(404, "Not Found");
        assert_eq!(err.to_string(), "HTTP error 404: Not Found");

        let err = Error::timed_out(None);
        assert_eq!(err.to_string(), "request timed out");

        let err = Error::aborted(Some(Error::connection("reset")));
        assert_eq!(err.to_string(), "request aborted");

        let err = Error::MissingHeaderValue {
            name: "Accept".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "header 'Accept' must not have an absent value"
        );

        let err = Error::decode("user.address.city", "missing field `city`");
        assert_eq!(
            err.to_string(),
            "decode error at 'user.address.city': missing field `city`"
        );
    }

    #[test]
    fn error_status() {
        let err = Error::http(404, "Not Found");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = Error::http(500, "Internal Server Error");
        assert!(err.is_server_error());

        let err = Error::timed_out(None);
        assert_eq!(err.status(), None);
        assert!(!err.is_client_error());
    }

    #[test]
    fn error_cause() {
        let err = Error::timed_out(Some(Error::connection("reset by peer")));
        let_assert!(Some(Error::Connection(msg)) = err.cause());
        assert_eq!(msg, "reset by peer");

        assert!(Error::timed_out(None).cause().is_none());
        assert!(Error::http(404, "Not Found").cause().is_none());
    }

    #[test]
    fn error_predicates() {
        assert!(Error::timed_out(None).is_timeout());
        assert!(!Error::aborted(None).is_timeout());
        assert!(Error::aborted(None).is_aborted());
        assert!(Error::connection("failed").is_connection());
        assert!(Error::http(404, "Not Found").is_not_found());
        assert!(!Error::http(400, "Bad Request").is_not_found());
    }

    #[test]
    fn error_body() {
        let err = Error::http(404, "Not Found");
        assert!(err.body().is_none());

        let body = bytes::Bytes::from(r#"{"error": "not found"}"#);
        let err = Error::http_with_body(404, "Not Found", body.clone());
        assert_eq!(err.body(), Some(&body));
    }

    #[test]
    fn error_decode_body() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct ApiError {
            error: String,
        }

        let body = bytes::Bytes::from(r#"{"error": "not found"}"#);
        let err = Error::http_with_body(404, "Not Found", body);

        let decoded = err.decode_body::<ApiError>();
        let_assert!(Some(Ok(api_error)) = decoded);
        assert_eq!(api_error.error, "not found");

        assert!(
            Error::http(404, "Not Found")
                .decode_body::<ApiError>()
                .is_none()
        );
        assert!(Error::timed_out(None).decode_body::<ApiError>().is_none());
    }
}
