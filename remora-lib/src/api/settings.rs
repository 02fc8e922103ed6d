use crate::{
    api::{ApiClient, Result},
    model::Settings,
};

impl ApiClient {
    pub async fn settings(&self) -> Result<Settings> {
        self.get_json("/api/settings").await
    }

    pub async fn update_settings(&self, settings: &Settings) -> Result<()> {
        self.put_unit("/api/settings", settings).await
    }
}
