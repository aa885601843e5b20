//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types for glob importing:
//!
//! ```ignore
//! use restkit::prelude::*;
//! ```

pub use crate::{
    Authenticator, BasicAuth, BearerAuth, Body, ClientConfig, ContentType, Error, HyperTransport,
    Method, Multipart, Params, Part, Response, Rest, Result, ToNameValues, Transport,
};
