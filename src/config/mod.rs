use anyhow::Context;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::errors::{GenResult, GenerationError};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub api_base: String,
    /// Falls back to `GEMINI_API_KEY` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub out_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gemini-pro".into(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key: None,
            out_dir: ".copygen".into(),
        }
    }
}

impl Config {
    /// Read a TOML config file. Missing keys take their default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        debug!(path = %path.display(), model = %cfg.model, "config loaded");
        Ok(cfg)
    }

    /// Resolve the API key once, preferring the config file over the environment.
    pub fn api_key(&self) -> GenResult<ApiKey> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        ApiKey::resolve(self.api_key.as_deref(), from_env.as_deref())
    }
}

/// A non-empty API key. Holding one is proof the credential check passed.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn resolve(configured: Option<&str>, env: Option<&str>) -> GenResult<Self> {
        configured
            .into_iter()
            .chain(env)
            .map(str::trim)
            .find(|k| !k.is_empty())
            .map(|k| ApiKey(k.to_string()))
            .ok_or(GenerationError::MissingCredential)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copygen.toml");
        std::fs::write(&path, "model = \"gemini-1.5-flash\"\n").unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.model, "gemini-1.5-flash");
        assert_eq!(cfg.api_base, Config::default().api_base);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "model = [").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn configured_key_wins_over_env() {
        let key = ApiKey::resolve(Some("from-file"), Some("from-env")).unwrap();
        assert_eq!(key.expose(), "from-file");
    }

    #[test]
    fn blank_keys_are_missing() {
        let err = ApiKey::resolve(Some("  "), None).unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential));
        let key = ApiKey::resolve(Some(""), Some("env-key")).unwrap();
        assert_eq!(key.expose(), "env-key");
    }

    #[test]
    fn startup_key_comes_from_env() {
        let cfg = Config::default();

        std::env::set_var(API_KEY_ENV, "env-secret");
        let key = cfg.api_key().unwrap();
        assert_eq!(key.expose(), "env-secret");

        std::env::remove_var(API_KEY_ENV);
        let err = cfg.api_key().unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential));
    }

    #[test]
    fn debug_hides_the_key() {
        let key = ApiKey::resolve(None, Some("secret")).unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }
}
