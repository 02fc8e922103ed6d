use serde::{Deserialize, Serialize};

use crate::model::Scope;

/// One allow-list entry. Membership is the whole story; there are no
/// per-entry permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessControlEntry {
    #[serde(rename = "type")]
    pub scope: Scope,
    pub context_id: String,
}
