//! Backup file codec for presets.
//!
//! The on-disk format is a JSON array of preset objects with `content` as
//! the last key. Export can strip the sensitive model fields; import
//! validates the whole file before anything touches the network.

use serde::Serialize;
use thiserror::Error;

use crate::model::{ModelConfig, Preset, PresetItem, PresetMode, TriggerConfig};

/// Whether exported presets keep their model credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redaction {
    Keep,
    Strip,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("backup file is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("expected a top-level JSON array of presets")]
    NotAnArray,
    #[error("preset at index {index} is malformed: {source}")]
    BadPreset {
        index: usize,
        source: serde_json::Error,
    },
}

pub fn export_presets(presets: &[Preset], redaction: Redaction) -> serde_json::Result<String> {
    let records: Vec<ExportPreset<'_>> = presets
        .iter()
        .map(|preset| ExportPreset::new(preset, redaction))
        .collect();

    serde_json::to_string_pretty(&records)
}

/// Parse and validate a backup file. Rejects anything that is not an array
/// of decodable presets, so a bad file never produces a partial import.
pub fn import_presets(raw: &str) -> Result<Vec<Preset>, ImportError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    let serde_json::Value::Array(entries) = value else {
        return Err(ImportError::NotAnArray);
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry).map_err(|source| ImportError::BadPreset { index, source })
        })
        .collect()
}

/// Export shape: field order fixes the key order in the file, with
/// `content` last.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportPreset<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    name: &'a str,
    mode: PresetMode,
    trigger: &'a TriggerConfig,
    model: ExportModelConfig<'a>,
    content: &'a [PresetItem],
}

impl<'a> ExportPreset<'a> {
    fn new(preset: &'a Preset, redaction: Redaction) -> Self {
        Self {
            id: preset.id.as_deref(),
            name: &preset.name,
            mode: preset.mode,
            trigger: &preset.trigger,
            model: ExportModelConfig::new(&preset.model, redaction),
            content: &preset.content,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportModelConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_base_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_api_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ExportModelConfig<'a> {
    fn new(model: &'a ModelConfig, redaction: Redaction) -> Self {
        let sensitive = |value: &'a str| match redaction {
            Redaction::Keep => Some(value),
            Redaction::Strip => None,
        };

        Self {
            chat_model: sensitive(&model.chat_model),
            chat_base_url: sensitive(&model.chat_base_url),
            chat_api_key: sensitive(&model.chat_api_key),
            temperature: model.temperature,
            max_tokens: model.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlaceholderKind, PresetItem, Role};

    fn sample_preset() -> Preset {
        Preset {
            id: Some("p1".into()),
            name: "default".into(),
            model: ModelConfig {
                chat_model: "gpt-4o".into(),
                chat_base_url: "https://llm.example".into(),
                chat_api_key: "sk-secret".into(),
                temperature: Some(0.7),
                max_tokens: None,
            },
            content: vec![
                PresetItem::message(Role::System, "A"),
                PresetItem::placeholder(PlaceholderKind::ChatHistory),
            ],
            ..Preset::default()
        }
    }

    #[test]
    fn import_rejects_non_array_top_level() {
        let result = import_presets(r#"{"name": "not a list"}"#);
        assert!(matches!(result, Err(ImportError::NotAnArray)));
    }

    #[test]
    fn import_rejects_malformed_entry_with_index() {
        let result = import_presets(r#"[{"name": "ok"}, {"content": 3}]"#);
        assert!(matches!(result, Err(ImportError::BadPreset { index: 1, .. })));
    }

    #[test]
    fn import_round_trips_an_export() {
        let exported = export_presets(&[sample_preset()], Redaction::Keep).unwrap();
        let imported = import_presets(&exported).unwrap();

        assert_eq!(imported, vec![sample_preset()]);
    }

    #[test]
    fn strip_redaction_removes_sensitive_fields_only() {
        let exported = export_presets(&[sample_preset()], Redaction::Strip).unwrap();

        assert!(!exported.contains("sk-secret"));
        assert!(!exported.contains("chatApiKey"));
        assert!(!exported.contains("chatBaseUrl"));
        assert!(!exported.contains("chatModel"));
        // Non-sensitive model settings survive.
        assert!(exported.contains("temperature"));
    }

    #[test]
    fn export_puts_content_last_in_each_record() {
        let exported = export_presets(&[sample_preset()], Redaction::Keep).unwrap();
        let content_pos = exported.find("\"content\"").unwrap();

        for key in ["\"id\"", "\"name\"", "\"mode\"", "\"model\""] {
            assert!(exported.find(key).unwrap() < content_pos);
        }
    }
}
