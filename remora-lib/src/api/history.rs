use reqwest::Method;
use serde::Serialize;

use crate::{
    api::{ApiClient, Result},
    model::{HistoryEntry, HistoryKind, Scope},
};

impl ApiClient {
    pub async fn history(
        &self,
        kind: HistoryKind,
        scope: Scope,
        context_id: &str,
        limit: u32,
    ) -> Result<Vec<HistoryEntry>> {
        let path = format!("{}/{}/{context_id}", kind.path_root(), scope.path_segment());
        let request = self
            .request(Method::GET, &path)
            .query(&[("limit", limit)]);

        let response = self.send(request).await?;
        let raw = response.text().await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Delete the most recent `count` entries.
    pub async fn delete_history(
        &self,
        kind: HistoryKind,
        scope: Scope,
        context_id: &str,
        count: u32,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct Body {
            count: u32,
        }

        let path = format!("{}/{}/{context_id}", kind.path_root(), scope.path_segment());
        self.delete_with_body(&path, &Body { count }).await
    }
}
