use serde::Serialize;

use crate::{
    api::{ApiClient, PresetKind, Result},
    model::{Assignment, Scope},
};

impl ApiClient {
    pub async fn assignments(&self, kind: PresetKind) -> Result<Vec<Assignment>> {
        self.get_json(kind.assignments_root()).await
    }

    /// Create or replace the assignment for `(scope, context)`.
    pub async fn put_assignment(&self, kind: PresetKind, assignment: &Assignment) -> Result<()> {
        self.put_unit(kind.assignments_root(), assignment).await
    }

    pub async fn delete_assignment(
        &self,
        kind: PresetKind,
        scope: Scope,
        context_id: Option<&str>,
    ) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            assignment_type: Scope,
            context_id: Option<&'a str>,
        }

        self.delete_with_body(
            kind.assignments_root(),
            &Body {
                assignment_type: scope,
                context_id,
            },
        )
        .await
    }
}
