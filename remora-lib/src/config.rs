//! Connection configuration shared by the GUI and the CLI.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::fs::config_dir;

const FILE_NAME: &str = "client.toml";

/// Shared handle to the connection configuration.
pub type Cfg = Arc<RwLock<ClientConfig>>;

/// Where the backend lives and how to authenticate against it, serialized
/// to TOML in the XDG config directory.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub server_url: String,
    pub token: String,
}

impl ClientConfig {
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn save(&self) {
        self.save_to(&Self::path());
    }

    pub(crate) fn load_from(path: &Path) -> Self {
        if path.exists() {
            let contents = fs::read_to_string(path).unwrap_or_default();
            toml::from_str(&contents).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    pub(crate) fn save_to(&self, path: &Path) {
        let contents = toml::to_string_pretty(self).expect("config must serialize");

        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        if let Err(error) = fs::write(path, contents) {
            tracing::error!(%error, path = %path.display(), "failed to save client config");
        }
    }

    fn path() -> PathBuf {
        config_dir().join(FILE_NAME)
    }

    pub fn is_complete(&self) -> bool {
        !self.server_url.is_empty() && !self.token.is_empty()
    }

    /// Forget the stored token after the backend rejects it.
    pub fn clear_token(&mut self) {
        self.token.clear();
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");

        let config = ClientConfig {
            server_url: "http://127.0.0.1:3000".into(),
            token: "secret".into(),
        };
        config.save_to(&path);

        let loaded = ClientConfig::load_from(&path);
        assert_eq!(loaded.server_url, config.server_url);
        assert_eq!(loaded.token, config.token);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ClientConfig::load_from(&dir.path().join("nope.toml"));
        assert!(!loaded.is_complete());
    }
}
