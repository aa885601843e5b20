//! Core types for the restkit HTTP request/response facility.
//!
//! This crate is transport-free: it covers everything up to and after the
//! wire, leaving dispatch to an injected [`Transport`].
//!
//! - [`Params`], [`ToNameValues`], [`export_params!`] - name/value projection
//! - [`url`] - query-string and `{name}` segment composition
//! - [`Body`], [`Multipart`], [`Part`] - request body strategies
//! - [`Request`] and [`PreparedRequest`] - request assembly
//! - [`Outcome`] and [`Response`] - dispatch outcomes and classification
//! - [`Authenticator`] - credential injection capability
//! - [`Error`] and [`Result`] - error handling

mod auth;
mod body;
mod error;
mod method;
mod multipart;
mod params;
pub mod prelude;
mod request;
mod response;
mod transport;
pub mod url;

pub use auth::Authenticator;
pub use body::{Body, ContentType, from_json, to_json};
pub use error::{Error, Result};
pub use method::Method;
pub use multipart::{Multipart, Part};
pub use params::{NameValue, ParamValue, Params, ToNameValues};
pub use request::{PreparedRequest, Request};
pub use response::{Outcome, OutcomeStatus, Response};
pub use transport::Transport;
