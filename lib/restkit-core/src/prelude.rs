//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types for glob importing:
//!
//! ```ignore
//! use restkit_core::prelude::*;
//! ```

pub use crate::{
    Authenticator, Body, ContentType, Error, Method, Multipart, Outcome, OutcomeStatus, Params,
    Part, PreparedRequest, Request, Response, Result, ToNameValues, Transport, from_json, to_json,
};
