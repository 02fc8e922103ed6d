use crate::{
    api::{ApiClient, Result},
    model::AccessControlEntry,
};

impl ApiClient {
    pub async fn access_list(&self) -> Result<Vec<AccessControlEntry>> {
        self.get_json("/api/access-control").await
    }

    pub async fn add_access(&self, entry: &AccessControlEntry) -> Result<()> {
        self.post_unit("/api/access-control", entry).await
    }

    pub async fn remove_access(&self, entry: &AccessControlEntry) -> Result<()> {
        self.delete_with_body("/api/access-control", entry).await
    }
}
