//! Hyper-based transport adapter.
//!
//! [`HyperTransport`] dispatches prepared requests through hyper-util's
//! pooled legacy client over a rustls connector, and folds everything that
//! can go wrong into an [`Outcome`] for the classifier.

use std::collections::HashMap;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use restkit_core::{Error, Outcome, OutcomeStatus, PreparedRequest, Result, Transport};

use crate::config::ClientConfig;

/// HTTPS connector: rustls with the Mozilla root set, HTTP/1.1 and HTTP/2.
/// The connect deadline applies to TCP establishment, separately from the
/// overall request timeout.
fn https_connector(connect_timeout: std::time::Duration) -> HttpsConnector<HttpConnector> {
    let root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_connect_timeout(Some(connect_timeout));

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http)
}

/// [`Transport`] implementation over a pooled hyper client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport with the given configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(config.connect_timeout));

        Self { inner, config }
    }

    /// Transport configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn build_http_request(request: PreparedRequest) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = body.map_or_else(Full::default, Full::new);
        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    fn collect_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Map a hyper failure to a dispatch status and error. A canceled
    /// in-flight connection counts as aborted, not as a connection fault.
    fn classify_hyper_error(err: &hyper_util::client::legacy::Error) -> (OutcomeStatus, Error) {
        let msg = err.to_string();

        if msg.contains("canceled") || msg.contains("cancelled") {
            return (OutcomeStatus::Aborted, Error::connection(msg));
        }

        if err.is_connect() {
            return (OutcomeStatus::Error, Error::connection(msg));
        }

        if msg.contains("tls") || msg.contains("ssl") || msg.contains("certificate") {
            return (OutcomeStatus::Error, Error::tls(msg));
        }

        (OutcomeStatus::Error, Error::connection(msg))
    }

    async fn run(&self, request: PreparedRequest) -> Outcome {
        let http_request = match Self::build_http_request(request) {
            Ok(request) => request,
            Err(error) => return Outcome::failed(OutcomeStatus::Error, Some(error)),
        };

        let response =
            match tokio::time::timeout(self.config.timeout, self.inner.request(http_request))
                .await
            {
                Err(_) => {
                    tracing::debug!(timeout = ?self.config.timeout, "request deadline elapsed");
                    return Outcome::failed(OutcomeStatus::TimedOut, None);
                }
                Ok(Err(err)) => {
                    let (status, error) = Self::classify_hyper_error(&err);
                    tracing::debug!(%error, "transport failure");
                    return Outcome::failed(status, Some(error));
                }
                Ok(Ok(response)) => response,
            };

        let status = response.status();
        let headers = Self::collect_headers(response.headers());

        let body = match response.into_body().collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(err) => {
                return Outcome::failed(
                    OutcomeStatus::Error,
                    Some(Error::connection(err.to_string())),
                );
            }
        };

        Outcome::completed(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            headers,
            body,
        )
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    async fn dispatch(&self, request: PreparedRequest) -> Outcome {
        self.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn transport_default_config() {
        let transport = HyperTransport::new();
        assert_eq!(transport.config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn transport_custom_config() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(3))
            .pool_idle_per_host(2)
            .build();
        let transport = HyperTransport::with_config(config);

        assert_eq!(transport.config().timeout, Duration::from_secs(3));
        assert_eq!(transport.config().pool_idle_per_host, 2);
    }

    #[test]
    fn transport_is_clone_and_debug() {
        let transport = HyperTransport::new();
        let cloned = transport.clone();
        let debug = format!("{cloned:?}");
        assert!(debug.contains("HyperTransport"));
    }
}
