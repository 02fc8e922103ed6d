use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A saved prompt template plus trigger and model configuration.
///
/// Disguise presets share this shape; they only live under a different API
/// namespace (see [`crate::api::PresetKind`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub mode: PresetMode,
    pub trigger: TriggerConfig,
    pub model: ModelConfig,
    // Declared last so serialized presets keep `content` as the final key,
    // which the export file format requires.
    pub content: Vec<PresetItem>,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PresetMode {
    #[default]
    #[display("Chat")]
    Chat,
    #[display("Agent")]
    Agent,
}

impl PresetMode {
    pub const ALL: [PresetMode; 2] = [PresetMode::Chat, PresetMode::Agent];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriggerConfig {
    pub on_mention: bool,
    pub on_keyword: bool,
    pub keywords: Vec<String>,
}

/// Upstream model connection settings.
///
/// `chat_api_key`, `chat_base_url` and `chat_model` are the sensitive
/// fields the export codec can strip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelConfig {
    pub chat_model: String,
    pub chat_base_url: String,
    pub chat_api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// One entry of a preset's content list.
///
/// On the wire this is a flag-tagged union: placeholder items carry
/// `is_variable_placeholder: true` plus `variable_name`/`config`, message
/// items carry `role`/`content`. The codec below keeps the two variants
/// mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireItem", into = "WireItem")]
pub struct PresetItem {
    pub enabled: bool,
    pub custom_name: Option<String>,
    pub body: ItemBody,
}

impl PresetItem {
    pub fn message(role: Role, content: impl Into<String>) -> Self {
        Self {
            enabled: true,
            custom_name: None,
            body: ItemBody::Message {
                role,
                content: content.into(),
            },
        }
    }

    pub fn placeholder(kind: PlaceholderKind) -> Self {
        Self {
            enabled: true,
            custom_name: None,
            body: ItemBody::Placeholder {
                variable_name: kind,
                config: kind.default_config(),
            },
        }
    }

    /// Label shown in list rows: the custom name when set, otherwise a
    /// summary derived from the body.
    pub fn label(&self) -> String {
        match &self.custom_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self.body.summary(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemBody {
    Message {
        role: Role,
        content: String,
    },
    Placeholder {
        variable_name: PlaceholderKind,
        config: PlaceholderConfig,
    },
}

impl ItemBody {
    pub fn summary(&self) -> String {
        match self {
            ItemBody::Message { role, content } => {
                let mut preview: String = content.chars().take(40).collect();
                if preview.len() < content.len() {
                    preview.push('…');
                }
                format!("{role}: {preview}")
            }
            ItemBody::Placeholder { variable_name, .. } => variable_name.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ItemBody::Placeholder { .. })
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[display("system")]
    System,
    #[display("user")]
    User,
    #[display("assistant")]
    Assistant,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::System, Role::User, Role::Assistant];
}

/// Dynamic insertion points a placeholder item can stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    #[display("Chat history")]
    ChatHistory,
    #[display("Message history")]
    MessageHistory,
    #[display("User input")]
    UserInput,
}

impl PlaceholderKind {
    pub const ALL: [PlaceholderKind; 3] = [
        PlaceholderKind::ChatHistory,
        PlaceholderKind::MessageHistory,
        PlaceholderKind::UserInput,
    ];

    /// Config a freshly inserted placeholder of this kind starts with.
    pub fn default_config(self) -> PlaceholderConfig {
        match self {
            PlaceholderKind::ChatHistory => PlaceholderConfig {
                max_length: Some(10),
                limit: None,
            },
            PlaceholderKind::MessageHistory => PlaceholderConfig {
                max_length: None,
                limit: Some(10),
            },
            PlaceholderKind::UserInput => PlaceholderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceholderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ItemCodecError {
    #[error("placeholder item is missing `variable_name`")]
    MissingVariableName,
    #[error("message item is missing `role`")]
    MissingRole,
}

/// Flat wire shape of a content item. Only used by the codec.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireItem {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    is_variable_placeholder: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variable_name: Option<PlaceholderKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<PlaceholderConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_name: Option<String>,
}

fn default_true() -> bool {
    true
}

impl From<PresetItem> for WireItem {
    fn from(item: PresetItem) -> Self {
        // Empty custom names are dropped rather than round-tripped.
        let custom_name = item.custom_name.filter(|name| !name.is_empty());

        match item.body {
            ItemBody::Message { role, content } => Self {
                is_variable_placeholder: false,
                variable_name: None,
                config: None,
                role: Some(role),
                content: Some(content),
                enabled: item.enabled,
                custom_name,
            },
            ItemBody::Placeholder {
                variable_name,
                config,
            } => Self {
                is_variable_placeholder: true,
                variable_name: Some(variable_name),
                config: Some(config),
                role: None,
                content: None,
                enabled: item.enabled,
                custom_name,
            },
        }
    }
}

impl TryFrom<WireItem> for PresetItem {
    type Error = ItemCodecError;

    fn try_from(wire: WireItem) -> Result<Self, Self::Error> {
        let body = if wire.is_variable_placeholder {
            let variable_name = wire
                .variable_name
                .ok_or(ItemCodecError::MissingVariableName)?;
            ItemBody::Placeholder {
                variable_name,
                config: wire.config.unwrap_or_else(|| variable_name.default_config()),
            }
        } else {
            ItemBody::Message {
                role: wire.role.ok_or(ItemCodecError::MissingRole)?,
                content: wire.content.unwrap_or_default(),
            }
        };

        Ok(Self {
            enabled: wire.enabled,
            custom_name: wire.custom_name,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn keys(value: &Value) -> Vec<String> {
        value
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn placeholder_wire_form_has_no_message_keys() {
        let item = PresetItem::placeholder(PlaceholderKind::ChatHistory);
        let value = serde_json::to_value(&item).unwrap();

        let keys = keys(&value);
        assert!(!keys.contains(&"role".to_string()));
        assert!(!keys.contains(&"content".to_string()));
        assert_eq!(value.get("is_variable_placeholder"), Some(&json!(true)));
        assert_eq!(value.get("variable_name"), Some(&json!("chat_history")));
        assert_eq!(
            value.get("config"),
            Some(&json!({ "maxLength": 10 })),
        );
    }

    #[test]
    fn message_wire_form_has_no_placeholder_keys() {
        let item = PresetItem::message(Role::System, "You are a helpful bot.");
        let value = serde_json::to_value(&item).unwrap();

        let keys = keys(&value);
        assert!(!keys.contains(&"variable_name".to_string()));
        assert!(!keys.contains(&"config".to_string()));
        assert!(!keys.contains(&"is_variable_placeholder".to_string()));
        assert_eq!(value.get("role"), Some(&json!("system")));
    }

    #[test]
    fn empty_custom_name_is_dropped() {
        let mut item = PresetItem::message(Role::User, "hi");
        item.custom_name = Some(String::new());

        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("custom_name").is_none());
    }

    #[test]
    fn legacy_item_without_flag_decodes_as_message() {
        let item: PresetItem =
            serde_json::from_value(json!({ "role": "assistant", "content": "ok" })).unwrap();

        assert!(item.enabled, "enabled defaults to true");
        assert_eq!(
            item.body,
            ItemBody::Message {
                role: Role::Assistant,
                content: "ok".into()
            }
        );
    }

    #[test]
    fn placeholder_without_variable_name_is_rejected() {
        let result: Result<PresetItem, _> =
            serde_json::from_value(json!({ "is_variable_placeholder": true }));

        assert!(result.is_err());
    }

    #[test]
    fn message_history_default_config_uses_limit() {
        let config = PlaceholderKind::MessageHistory.default_config();
        assert_eq!(config.limit, Some(10));
        assert_eq!(config.max_length, None);
    }

    #[test]
    fn preset_serializes_content_as_last_key() {
        let preset = Preset {
            name: "default".into(),
            ..Preset::default()
        };

        let raw = serde_json::to_string(&preset).unwrap();
        let content_pos = raw.find("\"content\"").unwrap();
        for key in ["\"name\"", "\"mode\"", "\"trigger\"", "\"model\""] {
            assert!(raw.find(key).unwrap() < content_pos);
        }
    }
}
