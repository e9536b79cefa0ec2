//! Bearer token sources for the wallet client.

use crate::error::{WalletError, WalletResult};

/// Supplies the bearer token for each request.
///
/// Asked on every call, so a provider backed by a file or keychain sees
/// token changes without rebuilding the client.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> WalletResult<String>;
}

/// A token fixed at construction
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> WalletResult<String> {
        if self.0.trim().is_empty() {
            return Err(WalletError::MissingToken);
        }
        Ok(self.0.clone())
    }
}

/// A token read from an environment variable on each request
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvToken {
    fn bearer_token(&self) -> WalletResult<String> {
        match std::env::var(&self.var) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(WalletError::MissingToken),
        }
    }
}
