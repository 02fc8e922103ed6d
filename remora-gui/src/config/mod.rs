use std::fs;

use remora_lib::fs::config_dir;
use serde::{Deserialize, Serialize};

use crate::config::theme::Theme;

pub mod theme;

const FILE_NAME: &str = "gui.toml";

/// GUI-only configuration, serialized to TOML. Connection settings live in
/// the lib's [`remora_lib::ClientConfig`].
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GuiConfig {
    pub theme: Theme,
}

impl GuiConfig {
    pub fn load() -> Self {
        let path = config_dir().join(FILE_NAME);

        if path.exists() {
            let contents = fs::read_to_string(path).unwrap_or_default();
            toml::from_str(&contents).unwrap_or_default()
        } else {
            let cfg = Self::default();
            cfg.save();
            cfg
        }
    }

    pub fn save(&self) {
        let contents = toml::to_string_pretty(self).expect("config must serialize");

        if let Err(error) = fs::write(config_dir().join(FILE_NAME), contents) {
            tracing::error!(%error, "failed to save GUI config");
        }
    }

    pub fn theme(&self) -> iced::Theme {
        (&self.theme).into()
    }
}
