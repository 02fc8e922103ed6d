use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
#[display("{nickname} ({user_id})")]
pub struct Friend {
    pub user_id: String,
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
#[display("{group_name} ({group_id})")]
pub struct Group {
    pub group_id: String,
    pub group_name: String,
}
