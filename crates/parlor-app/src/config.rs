//! Startup configuration: one small TOML file, loaded once.

use std::path::Path;

use anyhow::{Context, Result, bail};
use parlor_client::Credential;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ServerConfig {
    /// Base URL of the chat service API.
    pub url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Pre-selected room; skips the selection screen when set.
    #[serde(default)]
    pub room: Option<String>,
}

impl Config {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// The configured credential. Exactly one form must be present; a
    /// missing or ambiguous credential is fatal before the main loop.
    pub(crate) fn credential(&self) -> Result<Credential> {
        match (
            &self.server.token,
            &self.server.username,
            &self.server.password,
        ) {
            (Some(token), None, None) => Ok(Credential::Token(token.clone())),
            (None, Some(username), Some(password)) => Ok(Credential::Login {
                username: username.clone(),
                password: password.clone(),
            }),
            (None, None, None) => {
                bail!("config is missing a credential: set server.token or server.username + server.password")
            }
            _ => bail!(
                "config must set either server.token or server.username + server.password, not a mix"
            ),
        }
    }
}
