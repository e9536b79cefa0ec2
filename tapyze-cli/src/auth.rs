use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tapyze_wallet::{CredentialProvider, WalletError, WalletResult};
use tracing::warn;

use crate::state::ensure_tapyze_home;

/// Takes precedence over the stored token
pub const TOKEN_ENV: &str = "TAPYZE_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
}

fn auth_path() -> Result<PathBuf> {
    Ok(ensure_tapyze_home()?.join("auth.json"))
}

pub fn load_auth_from(p: &Path) -> Result<AuthState> {
    if !p.exists() {
        return Ok(AuthState::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_auth_to(auth: &AuthState, p: &Path) -> Result<()> {
    let s = serde_json::to_string_pretty(auth)?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

fn prompt_secret(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

pub fn paste_token() -> Result<()> {
    let p = auth_path()?;
    let token = prompt_secret("Paste wallet bearer token")?;
    if token.is_empty() {
        bail!("no token entered");
    }
    let token = token.strip_prefix("Bearer ").unwrap_or(&token).to_string();
    save_auth_to(&AuthState { token: Some(token) }, &p)?;
    println!("Saved token to {}", p.display());
    Ok(())
}

pub fn clear_token() -> Result<()> {
    let p = auth_path()?;
    save_auth_to(&AuthState::default(), &p)?;
    println!("Cleared token in {}", p.display());
    Ok(())
}

/// Token from `TAPYZE_TOKEN`, else from `auth.json` in the state directory
#[derive(Debug, Clone)]
pub struct StoredToken {
    path: PathBuf,
}

impl StoredToken {
    pub fn new() -> Result<Self> {
        Ok(Self { path: auth_path()? })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialProvider for StoredToken {
    fn bearer_token(&self) -> WalletResult<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                return Ok(token);
            }
        }
        match load_auth_from(&self.path) {
            Ok(AuthState { token: Some(token) }) if !token.trim().is_empty() => Ok(token),
            Ok(_) => Err(WalletError::MissingToken),
            Err(err) => {
                warn!(error = %err, "could not read stored token");
                Err(WalletError::MissingToken)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_auth_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_auth_from(&dir.path().join("auth.json")).unwrap();
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn test_stored_token_reads_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("auth.json");
        save_auth_to(
            &AuthState {
                token: Some("tok-abc".to_string()),
            },
            &p,
        )
        .unwrap();

        // Only meaningful when the override variable is unset in the test env
        if std::env::var(TOKEN_ENV).is_err() {
            assert_eq!(StoredToken::at(&p).bearer_token().unwrap(), "tok-abc");
        }
    }

    #[test]
    fn test_cleared_token_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("auth.json");
        save_auth_to(&AuthState::default(), &p).unwrap();
        if std::env::var(TOKEN_ENV).is_err() {
            assert!(matches!(
                StoredToken::at(&p).bearer_token(),
                Err(WalletError::MissingToken)
            ));
        }
    }
}
