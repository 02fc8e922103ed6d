//! In-memory edit buffer for a preset's content list.
//!
//! One [`ItemEditor`] backs one open preset form. Items have no identity
//! beyond their position, so every mutation invalidates previously handed
//! out indices and the view re-renders from scratch afterwards. Nothing is
//! sent to the backend until the whole preset is submitted.

use crate::model::{ItemBody, PlaceholderKind, PresetItem, Role};

#[derive(Debug, Clone, Default)]
pub struct ItemEditor {
    items: Vec<PresetItem>,
}

impl ItemEditor {
    pub fn new(items: Vec<PresetItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[PresetItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&PresetItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a placeholder with its kind's default config.
    pub fn insert_placeholder(&mut self, kind: PlaceholderKind) {
        self.items.push(PresetItem::placeholder(kind));
    }

    /// Append a message item collected from the add-item form.
    pub fn insert_message(&mut self, role: Role, content: String) {
        self.items.push(PresetItem::message(role, content));
    }

    pub fn remove(&mut self, index: usize) -> Option<PresetItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Move the item at `from` so it ends up at index `to`: remove at the
    /// old index, insert at the new one. Returns false when `from` is out
    /// of bounds; `to` is clamped to the shrunken list.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() {
            return false;
        }

        let item = self.items.remove(from);
        let to = to.min(self.items.len());
        self.items.insert(to, item);

        true
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Commit an inline rename. An empty or whitespace-only name clears
    /// the custom name so the item falls back to its summary label.
    pub fn rename(&mut self, index: usize, name: &str) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                let trimmed = name.trim();
                item.custom_name = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                };
                true
            }
            None => false,
        }
    }

    /// Merge the item edit dialog's result back into the buffer. Variant
    /// switches are total: the old body is discarded wholesale, so a
    /// message turned placeholder cannot drag `role`/`content` along.
    pub fn replace_body(&mut self, index: usize, body: ItemBody) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.body = body;
                true
            }
            None => false,
        }
    }

    /// Hand the buffer back for submission with the parent preset.
    pub fn into_items(self) -> Vec<PresetItem> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlaceholderConfig;

    fn sample() -> ItemEditor {
        ItemEditor::new(vec![
            PresetItem::message(Role::System, "A"),
            PresetItem::placeholder(PlaceholderKind::ChatHistory),
        ])
    }

    #[test]
    fn reorder_moves_identity_and_keeps_length() {
        let mut editor = sample();
        let moved = editor.get(1).cloned().unwrap();

        assert!(editor.reorder(1, 0));

        assert_eq!(editor.len(), 2);
        assert_eq!(editor.get(0), Some(&moved));
        assert_eq!(
            editor.get(1),
            Some(&PresetItem::message(Role::System, "A"))
        );
    }

    #[test]
    fn reorder_to_end_clamps() {
        let mut editor = sample();
        assert!(editor.reorder(0, 99));
        assert_eq!(editor.len(), 2);
        assert_eq!(editor.get(1), Some(&PresetItem::message(Role::System, "A")));
    }

    #[test]
    fn reorder_out_of_bounds_is_a_no_op() {
        let mut editor = sample();
        assert!(!editor.reorder(5, 0));
        assert_eq!(editor.len(), 2);
    }

    #[test]
    fn inserted_chat_history_placeholder_gets_default_config() {
        let mut editor = ItemEditor::default();
        editor.insert_placeholder(PlaceholderKind::ChatHistory);

        let Some(PresetItem {
            body: ItemBody::Placeholder { config, .. },
            ..
        }) = editor.get(0)
        else {
            panic!("expected a placeholder item");
        };

        assert_eq!(
            config,
            &PlaceholderConfig {
                max_length: Some(10),
                limit: None
            }
        );
    }

    #[test]
    fn rename_with_blank_clears_custom_name() {
        let mut editor = sample();
        assert!(editor.rename(0, "Greeting"));
        assert_eq!(
            editor.get(0).unwrap().custom_name.as_deref(),
            Some("Greeting")
        );

        assert!(editor.rename(0, "   "));
        assert_eq!(editor.get(0).unwrap().custom_name, None);
    }

    #[test]
    fn replace_body_switches_variant_cleanly() {
        let mut editor = sample();
        let body = ItemBody::Placeholder {
            variable_name: PlaceholderKind::UserInput,
            config: PlaceholderConfig::default(),
        };

        assert!(editor.replace_body(0, body.clone()));
        assert_eq!(editor.get(0).unwrap().body, body);

        // The swapped item must serialize without any message keys left.
        let value = serde_json::to_value(editor.get(0).unwrap()).unwrap();
        assert!(value.get("role").is_none());
        assert!(value.get("content").is_none());
    }

    #[test]
    fn remove_shrinks_and_returns_item() {
        let mut editor = sample();
        let removed = editor.remove(0).unwrap();
        assert_eq!(removed, PresetItem::message(Role::System, "A"));
        assert_eq!(editor.len(), 1);
        assert!(editor.remove(7).is_none());
    }
}
