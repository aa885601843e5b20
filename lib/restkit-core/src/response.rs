//! Transport outcomes and response classification.
//!
//! The transport reports every dispatch as an [`Outcome`] — terminal status,
//! HTTP status line, headers, body, and any transport-level error. The
//! classifier ([`Outcome::into_result`]) turns that into either a
//! [`Response`] or a typed failure; nothing is retried or recovered here.

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Error, Result};

/// Terminal status of a dispatch, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeStatus {
    /// The exchange ran to completion (any HTTP status).
    Completed,
    /// No transport-level status recorded; treated like completion.
    None,
    /// The transport failed (connection, TLS, protocol).
    Error,
    /// The transport gave up waiting.
    TimedOut,
    /// The dispatch was cancelled.
    Aborted,
}

/// Everything the transport knows about one dispatch.
///
/// Produced once per dispatch and consumed immediately by the classifier; no
/// state survives the call.
#[derive(Debug)]
pub struct Outcome {
    status_code: u16,
    status_text: String,
    is_successful: bool,
    status: OutcomeStatus,
    transport_error: Option<Error>,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Outcome {
    /// Full constructor. Prefer [`Outcome::completed`] and
    /// [`Outcome::failed`] outside of transport adapters.
    #[must_use]
    pub fn new(
        status_code: u16,
        status_text: impl Into<String>,
        is_successful: bool,
        status: OutcomeStatus,
        transport_error: Option<Error>,
        headers: HashMap<String, String>,
        body: Bytes,
    ) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            is_successful,
            status,
            transport_error,
            headers,
            body,
        }
    }

    /// An exchange that ran to completion; success is derived from the
    /// status code.
    #[must_use]
    pub fn completed(
        status_code: u16,
        status_text: impl Into<String>,
        headers: HashMap<String, String>,
        body: Bytes,
    ) -> Self {
        Self::new(
            status_code,
            status_text,
            (200..300).contains(&status_code),
            OutcomeStatus::Completed,
            None,
            headers,
            body,
        )
    }

    /// A dispatch that never produced an HTTP exchange.
    #[must_use]
    pub fn failed(status: OutcomeStatus, transport_error: Option<Error>) -> Self {
        Self::new(
            0,
            String::new(),
            false,
            status,
            transport_error,
            HashMap::new(),
            Bytes::new(),
        )
    }

    /// Terminal dispatch status.
    #[must_use]
    pub const fn status(&self) -> OutcomeStatus {
        self.status
    }

    /// HTTP status code (0 when no exchange happened).
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Classify the outcome into a response or a typed failure.
    ///
    /// Transport-status gate first: aborted and timed-out dispatches raise
    /// wrapping errors, transport errors are surfaced directly. Then the
    /// success gate: a completed non-2xx exchange raises [`Error::Http`].
    ///
    /// # Errors
    ///
    /// See above; every failure belongs to the single call that produced it.
    pub fn into_result(self) -> Result<Response> {
        match self.status {
            OutcomeStatus::Completed | OutcomeStatus::None => {}
            OutcomeStatus::Aborted => {
                return Err(Error::aborted(self.transport_error));
            }
            OutcomeStatus::Error => {
                return Err(self.transport_error.unwrap_or_else(|| {
                    Error::invalid_request("transport reported failure without an error")
                }));
            }
            OutcomeStatus::TimedOut => {
                return Err(Error::timed_out(self.transport_error));
            }
        }

        if !self.is_successful {
            return Err(Error::http_with_body(
                self.status_code,
                self.status_text,
                self.body,
            ));
        }

        Ok(Response {
            status: self.status_code,
            status_text: self.status_text,
            headers: self.headers,
            body: self.body,
        })
    }

    /// Classify, then decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Classification errors as in [`Outcome::into_result`], plus
    /// [`Error::Decode`] when the body does not match `T`.
    pub fn into_json<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        self.into_result()?.json()
    }
}

/// A classified successful HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    status_text: String,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Creates a response.
    #[must_use]
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        headers: HashMap<String, String>,
        body: Bytes,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Status text reported by the server.
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into the body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body does not match `T`.
    pub fn json<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        crate::from_json(&self.body)
    }

    /// Body as text.
    ///
    /// # Errors
    ///
    /// Returns a decode error at path `body` if the bytes are not valid
    /// UTF-8.
    pub fn text(self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| Error::decode("body", e.to_string()))
    }
}
