//! Request authentication capability.

use crate::{Request, Result};

/// Mutates a request descriptor before dispatch, typically by injecting an
/// `Authorization` header or a credential query parameter.
///
/// One authenticator can be installed client-wide and another passed per
/// call; the per-call one wins. Any `Fn(&mut Request) -> Result<()>` closure
/// is an authenticator.
///
/// # Example
///
/// ```
/// use restkit_core::{Authenticator, Method, Request, Result};
/// use url::Url;
///
/// let auth = |request: &mut Request| -> Result<()> {
///     request.add_header("Authorization", "Bearer token");
///     Ok(())
/// };
///
/// let url = Url::parse("https://api.example.com").expect("url");
/// let mut request = Request::new(Method::Get, url);
/// auth.authenticate(&mut request).expect("authenticate");
/// assert_eq!(request.header("authorization"), Some("Bearer token"));
/// ```
pub trait Authenticator: Send + Sync {
    /// Apply credentials to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials cannot be produced or applied.
    fn authenticate(&self, request: &mut Request) -> Result<()>;
}

impl<F> Authenticator for F
where
    F: Fn(&mut Request) -> Result<()> + Send + Sync,
{
    fn authenticate(&self, request: &mut Request) -> Result<()> {
        self(request)
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::Method;

    #[test]
    fn closure_authenticator_mutates_request() {
        let auth = |request: &mut Request| -> Result<()> {
            request.add_query("api_key", "secret");
            Ok(())
        };

        let mut request = Request::new(
            Method::Get,
            Url::parse("https://api.example.com/users").expect("url"),
        );
        auth.authenticate(&mut request).expect("authenticate");

        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/users?api_key=secret"
        );
    }
}
