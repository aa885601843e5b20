//! Ready-made authenticators.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use restkit_core::{Authenticator, Request, Result};

/// Bearer token authentication.
///
/// Adds `Authorization: Bearer <token>` to every request it authenticates.
#[derive(Clone)]
pub struct BearerAuth {
    header_value: String,
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token stays out of logs.
        f.debug_struct("BearerAuth").finish_non_exhaustive()
    }
}

impl BearerAuth {
    /// Create a bearer authenticator for the given token.
    #[must_use]
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            header_value: format!("Bearer {}", token.as_ref()),
        }
    }
}

impl Authenticator for BearerAuth {
    fn authenticate(&self, request: &mut Request) -> Result<()> {
        request.add_header("Authorization", self.header_value.clone());
        Ok(())
    }
}

/// Basic authentication.
///
/// Adds `Authorization: Basic <base64(username:password)>`.
#[derive(Clone)]
pub struct BasicAuth {
    header_value: String,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials stay out of logs.
        f.debug_struct("BasicAuth").finish_non_exhaustive()
    }
}

impl BasicAuth {
    /// Create a basic authenticator for the given credentials.
    #[must_use]
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        Self {
            header_value: format!("Basic {}", STANDARD.encode(credentials)),
        }
    }
}

impl Authenticator for BasicAuth {
    fn authenticate(&self, request: &mut Request) -> Result<()> {
        request.add_header("Authorization", self.header_value.clone());
        Ok(())
    }
}
