use serde::{Deserialize, Serialize};

/// Plugin config values are an open JSON object keyed by field name.
pub type PluginConfig = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
    #[serde(default)]
    pub status: String,
}

/// One entry of a plugin's data-driven config schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub kind: ConfigFieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl ConfigField {
    /// Label shown next to the input, falling back to the key.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConfigFieldKind {
    Text,
    Number,
    Boolean,
    Select { options: Vec<String> },
    /// Options are fetched from the voice speaker endpoint at edit time.
    Speaker,
}

/// A synthesizer voice offered by the qq-voice plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
#[display("{name}")]
pub struct Speaker {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_field_kind_is_tagged_by_type() {
        let field: ConfigField = serde_json::from_value(json!({
            "key": "voice",
            "label": "Voice",
            "type": "select",
            "options": ["a", "b"],
        }))
        .unwrap();

        assert_eq!(
            field.kind,
            ConfigFieldKind::Select {
                options: vec!["a".into(), "b".into()]
            }
        );
    }

    #[test]
    fn display_label_falls_back_to_key() {
        let field: ConfigField =
            serde_json::from_value(json!({ "key": "apiKey", "type": "text" })).unwrap();

        assert_eq!(field.display_label(), "apiKey");
    }
}
