use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two server-side history stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum HistoryKind {
    /// Conversation turns as the model saw them.
    #[display("Chat history")]
    Chat,
    /// Raw incoming messages.
    #[display("Message history")]
    Message,
}

impl HistoryKind {
    pub const ALL: [HistoryKind; 2] = [HistoryKind::Chat, HistoryKind::Message];

    pub fn path_root(self) -> &'static str {
        match self {
            HistoryKind::Chat => "/api/history",
            HistoryKind::Message => "/api/message-history",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}
