use serde::{Deserialize, Serialize};

use crate::model::Scope;

/// Maps a chat scope to the preset used there.
///
/// Uniqueness by `(scope, context_id)` is enforced server-side; a PUT for
/// an existing pair replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(rename = "assignmentType")]
    pub scope: Scope,
    // Serialized even when absent: a global assignment must carry an
    // explicit `contextId: null`.
    pub context_id: Option<String>,
    pub preset_id: String,
}

impl Assignment {
    /// Build an assignment, discarding any leftover context selection when
    /// the scope is global.
    pub fn new(scope: Scope, context_id: Option<String>, preset_id: impl Into<String>) -> Self {
        let context_id = match scope {
            Scope::Global => None,
            Scope::Private | Scope::Group => context_id,
        };

        Self {
            scope,
            context_id,
            preset_id: preset_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn global_assignment_serializes_null_context() {
        // A stale context selection from the form must not leak through.
        let assignment = Assignment::new(Scope::Global, Some("12345".into()), "p1");
        let value = serde_json::to_value(&assignment).unwrap();

        assert_eq!(
            value,
            json!({
                "assignmentType": "GLOBAL",
                "contextId": null,
                "presetId": "p1",
            })
        );
    }

    #[test]
    fn group_assignment_keeps_context() {
        let assignment = Assignment::new(Scope::Group, Some("67890".into()), "p2");
        assert_eq!(assignment.context_id.as_deref(), Some("67890"));
    }
}
