//! Request descriptor assembly.
//!
//! A [`Request`] is built incrementally (headers, body, authenticator
//! mutations), then sealed into a [`PreparedRequest`] with the body encoded.
//! Descriptors are created per call and never reused.

use bytes::Bytes;
use url::Url;

use crate::{Body, Error, Method, Result, ToNameValues};

/// A mutable request descriptor: method, URL, ordered headers, and a body
/// strategy. Authenticators receive `&mut Request` to inject headers or query
/// parameters before dispatch.
#[derive(Debug)]
pub struct Request {
    method: Method,
    url: Url,
    headers: Vec<(String, String)>,
    body: Body,
}

impl Request {
    /// Create a request with no body.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self::with_body(method, url, Body::None)
    }

    /// Create a request with the given body strategy.
    #[must_use]
    pub fn with_body(method: Method, url: Url, body: Body) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Mutable access to the URL.
    #[must_use]
    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    /// Request headers, in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value matching `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Append a header.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Project `params` and append each pair as a header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingHeaderValue`] for a pair with an absent value;
    /// headers never tolerate omission.
    pub fn add_headers(&mut self, params: &dyn ToNameValues) -> Result<()> {
        for nv in params.to_name_values()? {
            let Some(value) = nv.value else {
                return Err(Error::MissingHeaderValue { name: nv.name });
            };
            self.headers.push((nv.name, value));
        }
        Ok(())
    }

    /// Append a query parameter to the URL.
    pub fn add_query(&mut self, name: &str, value: &str) {
        self.url.query_pairs_mut().append_pair(name, value);
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Replace the request body.
    pub fn set_body(&mut self, body: Body) {
        self.body = body;
    }

    /// Seal the descriptor: encode the body and attach its content type
    /// (unless one was set explicitly). The result is immutable and ready for
    /// dispatch.
    ///
    /// # Errors
    ///
    /// Returns an error if body encoding fails.
    pub fn prepare(self) -> Result<PreparedRequest> {
        let Self {
            method,
            url,
            mut headers,
            body,
        } = self;

        let (content_type, payload) = body.encode()?;
        if let Some(content_type) = content_type
            && !headers.iter().any(|(n, _)| n.eq_ignore_ascii_case("content-type"))
        {
            headers.push(("Content-Type".to_string(), content_type));
        }

        Ok(PreparedRequest {
            method,
            url,
            headers,
            body: payload,
        })
    }
}

/// An immutable, fully-encoded request ready for the transport.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    method: Method,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl PreparedRequest {
    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers, in order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Encoded body payload, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into `(method, url, headers, body)`.
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, Vec<(String, String)>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}
