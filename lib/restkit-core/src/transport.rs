//! Transport abstraction.

use std::future::Future;

use crate::{Outcome, PreparedRequest};

/// Dispatches a prepared request and reports everything it learned as an
/// [`Outcome`].
///
/// A transport never fails at the Rust level: connection errors, TLS
/// failures, and timeouts are folded into the outcome and classified by
/// [`Outcome::into_result`]. Cancellation is dropping the returned future.
///
/// Implement this to swap the HTTP engine or to fake the wire in tests.
pub trait Transport: Send + Sync {
    /// Dispatch a request and report the outcome.
    fn dispatch(&self, request: PreparedRequest) -> impl Future<Output = Outcome> + Send;
}
