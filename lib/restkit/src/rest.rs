//! The `Rest` facade: verb-shaped entry points over a pluggable transport.

use std::sync::Arc;

use restkit_core::url::apply_query;
use restkit_core::{
    Authenticator, Body, Method, Multipart, Response, Result, ToNameValues, Transport,
};
use url::Url;

use crate::config::ClientConfig;
use crate::transport::HyperTransport;

/// HTTP facade over a [`Transport`].
///
/// Holds only an optional base URL and an optional client-wide
/// [`Authenticator`]; every call builds its own request descriptor, so a
/// single `Rest` can serve concurrent callers.
///
/// # Example
///
/// ```ignore
/// use restkit::{Rest, BearerAuth};
/// use url::Url;
///
/// let api = Rest::new(Url::parse("https://api.example.com/")?)
///     .authenticator(BearerAuth::new("token"));
///
/// let user: User = api.get_json("users/42", None, None).await?;
/// ```
pub struct Rest<T = HyperTransport> {
    transport: T,
    base_url: Option<Url>,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl<T: Clone> Clone for Rest<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            base_url: self.base_url.clone(),
            authenticator: self.authenticator.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Rest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rest")
            .field("base_url", &self.base_url)
            .field("has_authenticator", &self.authenticator.is_some())
            .finish_non_exhaustive()
    }
}

impl Rest<HyperTransport> {
    /// Create a facade resolving request URLs against `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self::with_transport(HyperTransport::new()).base_url(base_url)
    }

    /// Create a facade that requires absolute request URLs.
    #[must_use]
    pub fn without_base() -> Self {
        Self::with_transport(HyperTransport::new())
    }

    /// Create a facade with a custom transport configuration.
    #[must_use]
    pub fn with_config(base_url: Option<Url>, config: ClientConfig) -> Self {
        let rest = Self::with_transport(HyperTransport::with_config(config));
        match base_url {
            Some(url) => rest.base_url(url),
            None => rest,
        }
    }
}

impl Default for Rest<HyperTransport> {
    fn default() -> Self {
        Self::without_base()
    }
}

impl<T: Transport> Rest<T> {
    /// Create a facade over the given transport (no base URL).
    #[must_use]
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
            authenticator: None,
        }
    }

    /// Set the base URL request URLs are resolved against.
    #[must_use]
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Install a client-wide authenticator, applied to every request unless
    /// a per-call one is passed to [`Rest::execute`].
    #[must_use]
    pub fn authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    fn resolve(&self, url: &str) -> Result<Url> {
        match &self.base_url {
            Some(base) => Ok(base.join(url)?),
            None => Ok(Url::parse(url)?),
        }
    }

    /// Assemble and dispatch a request.
    ///
    /// Headers are projected first (an absent header value is an error), the
    /// authenticator runs next (per-call wins over the client-wide one), then
    /// the body is encoded and the request dispatched. Dropping the returned
    /// future cancels the call at the dispatch point.
    ///
    /// # Errors
    ///
    /// Assembly errors (headers, URL, body encoding) and every classified
    /// dispatch failure, per [`restkit_core::Outcome::into_result`].
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        headers: Option<&dyn ToNameValues>,
        body: Body,
        authenticator: Option<&dyn Authenticator>,
    ) -> Result<Response> {
        let url = self.resolve(url)?;
        let mut request = restkit_core::Request::with_body(method, url, body);

        if let Some(headers) = headers {
            request.add_headers(headers)?;
        }

        if let Some(authenticator) = authenticator {
            authenticator.authenticate(&mut request)?;
        } else if let Some(authenticator) = &self.authenticator {
            authenticator.authenticate(&mut request)?;
        }

        let prepared = request.prepare()?;
        tracing::debug!(method = %prepared.method(), url = %prepared.url(), "dispatching request");

        let outcome = self.transport.dispatch(prepared).await;
        tracing::debug!(status = outcome.status_code(), dispatch = ?outcome.status(), "dispatch finished");

        outcome.into_result()
    }

    /// [`Rest::execute`], decoding the response body as JSON.
    ///
    /// # Errors
    ///
    /// As [`Rest::execute`], plus a decode error when the body does not
    /// match `R`.
    pub async fn execute_json<R: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        headers: Option<&dyn ToNameValues>,
        body: Body,
        authenticator: Option<&dyn Authenticator>,
    ) -> Result<R> {
        self.execute(method, url, headers, body, authenticator)
            .await?
            .json()
    }

    async fn query_verb(
        &self,
        method: Method,
        url: &str,
        query: Option<&dyn ToNameValues>,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<Response> {
        let url = apply_query(url, query)?;
        self.execute(method, &url, headers, Body::None, None).await
    }

    /// GET with optional query parameters.
    ///
    /// # Errors
    ///
    /// As [`Rest::execute`].
    pub async fn get(
        &self,
        url: &str,
        query: Option<&dyn ToNameValues>,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<Response> {
        self.query_verb(Method::Get, url, query, headers).await
    }

    /// GET, decoding the response body as JSON.
    ///
    /// # Errors
    ///
    /// As [`Rest::execute_json`].
    pub async fn get_json<R: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: Option<&dyn ToNameValues>,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<R> {
        self.get(url, query, headers).await?.json()
    }

    /// DELETE with optional query parameters.
    ///
    /// # Errors
    ///
    /// As [`Rest::execute`].
    pub async fn delete(
        &self,
        url: &str,
        query: Option<&dyn ToNameValues>,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<Response> {
        self.query_verb(Method::Delete, url, query, headers).await
    }

    /// DELETE, decoding the response body as JSON.
    ///
    /// # Errors
    ///
    /// As [`Rest::execute_json`].
    pub async fn delete_json<R: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: Option<&dyn ToNameValues>,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<R> {
        self.delete(url, query, headers).await?.json()
    }

    /// OPTIONS with optional query parameters.
    ///
    /// # Errors
    ///
    /// As [`Rest::execute`].
    pub async fn options(
        &self,
        url: &str,
        query: Option<&dyn ToNameValues>,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<Response> {
        self.query_verb(Method::Options, url, query, headers).await
    }

    /// OPTIONS, decoding the response body as JSON.
    ///
    /// # Errors
    ///
    /// As [`Rest::execute_json`].
    pub async fn options_json<R: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: Option<&dyn ToNameValues>,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<R> {
        self.options(url, query, headers).await?.json()
    }

    /// POST with a JSON body.
    ///
    /// # Errors
    ///
    /// As [`Rest::execute`], plus serialization failures of `body`.
    pub async fn post<B: serde::Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<Response> {
        self.execute(Method::Post, url, headers, Body::json(body)?, None)
            .await
    }

    /// POST with a JSON body, decoding the response as JSON.
    ///
    /// # Errors
    ///
    /// As [`Rest::post`], plus decode failures.
    pub async fn post_json<B: serde::Serialize + Sync, R: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<R> {
        self.post(url, body, headers).await?.json()
    }

    /// POST verbatim text with the given content type. An absent text sends
    /// an empty body.
    ///
    /// # Errors
    ///
    /// As [`Rest::execute`].
    pub async fn post_string(
        &self,
        url: &str,
        text: Option<&str>,
        content_type: &str,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<Response> {
        self.execute(
            Method::Post,
            url,
            headers,
            Body::raw(text, content_type),
            None,
        )
        .await
    }

    /// [`Rest::post_string`], decoding the response as JSON.
    ///
    /// # Errors
    ///
    /// As [`Rest::post_string`], plus decode failures.
    pub async fn post_string_json<R: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        text: Option<&str>,
        content_type: &str,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<R> {
        self.post_string(url, text, content_type, headers)
            .await?
            .json()
    }

    /// POST a multipart form.
    ///
    /// # Errors
    ///
    /// As [`Rest::execute`], plus I/O failures reading file or stream parts.
    pub async fn post_multipart(
        &self,
        url: &str,
        form: Multipart,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<Response> {
        self.execute(Method::Post, url, headers, Body::Multipart(form), None)
            .await
    }

    /// [`Rest::post_multipart`], decoding the response as JSON.
    ///
    /// # Errors
    ///
    /// As [`Rest::post_multipart`], plus decode failures.
    pub async fn post_multipart_json<R: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        form: Multipart,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<R> {
        self.post_multipart(url, form, headers).await?.json()
    }

    /// PUT with a JSON body.
    ///
    /// # Errors
    ///
    /// As [`Rest::post`].
    pub async fn put<B: serde::Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<Response> {
        self.execute(Method::Put, url, headers, Body::json(body)?, None)
            .await
    }

    /// PUT with a JSON body, decoding the response as JSON.
    ///
    /// # Errors
    ///
    /// As [`Rest::put`], plus decode failures.
    pub async fn put_json<B: serde::Serialize + Sync, R: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<R> {
        self.put(url, body, headers).await?.json()
    }

    /// PATCH with a JSON body.
    ///
    /// # Errors
    ///
    /// As [`Rest::post`].
    pub async fn patch<B: serde::Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<Response> {
        self.execute(Method::Patch, url, headers, Body::json(body)?, None)
            .await
    }

    /// PATCH with a JSON body, decoding the response as JSON.
    ///
    /// # Errors
    ///
    /// As [`Rest::patch`], plus decode failures.
    pub async fn patch_json<B: serde::Serialize + Sync, R: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&dyn ToNameValues>,
    ) -> Result<R> {
        self.patch(url, body, headers).await?.json()
    }
}
