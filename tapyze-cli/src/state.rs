use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Overrides the state directory (default `~/.tapyze`)
pub const HOME_ENV: &str = "TAPYZE_HOME";

pub fn tapyze_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tapyze"))
}

pub fn ensure_tapyze_home() -> Result<PathBuf> {
    let dir = tapyze_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
