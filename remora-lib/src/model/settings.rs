use serde::{Deserialize, Serialize};

/// Backend-wide settings, fetched and submitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub command_prefix: String,
    pub reply_when_mentioned: bool,
    pub stream_output: bool,
    pub max_context_messages: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            command_prefix: "/".into(),
            reply_when_mentioned: true,
            stream_output: false,
            max_context_messages: 20,
        }
    }
}
