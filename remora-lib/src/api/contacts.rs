use crate::{
    api::{ApiClient, Result},
    model::{Friend, Group},
};

impl ApiClient {
    pub async fn friends(&self) -> Result<Vec<Friend>> {
        self.get_json("/api/contacts/friends").await
    }

    pub async fn groups(&self) -> Result<Vec<Group>> {
        self.get_json("/api/contacts/groups").await
    }
}
