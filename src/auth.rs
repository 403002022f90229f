//! Access token providers
//!
//! The API authenticates every call with an `access_token` query parameter.
//! Token acquisition is modeled as a capability passed into the client rather
//! than an ambient environment lookup, so callers (and tests) control where
//! credentials come from.

use crate::error::{Error, Result};
use async_trait::async_trait;

/// Trait for supplying the current bearer token
///
/// Implementations may hold a fixed token, read one from the environment, or
/// refresh one from an identity provider. The client asks for a token before
/// every call, so short-lived tokens work without extra plumbing.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return the current access token
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when no token can be produced.
    async fn access_token(&self) -> Result<String>;
}

/// Token provider holding a fixed token string
///
/// Used in tests and by callers that already performed authentication.
#[derive(Clone, Debug)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Create a provider that always returns `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Token provider reading a named environment variable at call time
///
/// Reading at call time (rather than at construction) means a token rotated
/// mid-process is picked up on the next batch.
#[derive(Clone, Debug)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    /// Environment variable consulted by [`EnvTokenProvider::default`]
    pub const DEFAULT_VAR: &'static str = "HAZARD_API_TOKEN";

    /// Create a provider reading the environment variable `var`
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn access_token(&self) -> Result<String> {
        match std::env::var(&self.var) {
            Ok(token) if !token.is_empty() => Ok(token),
            _ => Err(Error::Auth(format!(
                "environment variable {} is not set",
                self.var
            ))),
        }
    }
}
