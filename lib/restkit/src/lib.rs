//! restkit — a generic HTTP request/response facility.
//!
//! Takes loosely-typed call-site data (query parameter, header, and path
//! segment objects; one of several body strategies; an optional
//! authenticator), assembles a well-formed request, dispatches it through a
//! pluggable transport, and classifies the outcome into a precise error
//! taxonomy.
//!
//! - [`Rest`] - verb-shaped facade (`get`, `post`, `put`, ...)
//! - [`HyperTransport`] - pooled hyper/rustls transport adapter
//! - [`BearerAuth`] / [`BasicAuth`] - ready-made authenticators
//! - [`ClientConfig`] - transport configuration
//!
//! Core types (request descriptor, body strategies, params projection,
//! outcome classification) are re-exported from `restkit-core`.
//!
//! # Example
//!
//! ```ignore
//! use restkit::{Params, Rest};
//! use url::Url;
//!
//! let api = Rest::new(Url::parse("https://api.example.com/")?);
//! let query = Params::new().set("page", 1);
//! let users: Vec<User> = api.get_json("users", Some(&query), None).await?;
//! ```

mod auth;
mod config;
pub mod prelude;
mod rest;
mod transport;

pub use auth::{BasicAuth, BearerAuth};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use rest::Rest;
pub use transport::HyperTransport;

pub use restkit_core::{
    Authenticator, Body, ContentType, Error, Method, Multipart, NameValue, Outcome, OutcomeStatus,
    ParamValue, Params, Part, PreparedRequest, Request, Response, Result, ToNameValues, Transport,
    from_json, to_json, url,
};

// The projection macro lands at the restkit-core root; re-export it here so
// `restkit::export_params!` works too.
pub use restkit_core::export_params;
