use crate::{
    api::{ApiClient, Result},
    model::{ConfigField, Plugin, PluginConfig, Speaker},
};

impl ApiClient {
    pub async fn plugins(&self) -> Result<Vec<Plugin>> {
        self.get_json("/api/plugins").await
    }

    pub async fn plugin_config(&self, name: &str) -> Result<PluginConfig> {
        self.get_json(&format!("/api/plugins/{name}/config")).await
    }

    pub async fn update_plugin_config(&self, name: &str, config: &PluginConfig) -> Result<()> {
        self.put_unit(&format!("/api/plugins/{name}/config"), config)
            .await
    }

    pub async fn plugin_config_definition(&self, name: &str) -> Result<Vec<ConfigField>> {
        self.get_json(&format!("/api/plugins/{name}/config/definition"))
            .await
    }

    pub async fn set_plugin_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        let verb = if enabled { "enable" } else { "disable" };
        self.post_empty(&format!("/api/plugins/{name}/{verb}")).await
    }

    /// Voices offered by the qq-voice plugin, used to populate `Speaker`
    /// config fields.
    pub async fn voice_speakers(&self) -> Result<Vec<Speaker>> {
        self.get_json("/api/plugins/qq-voice/speakers").await
    }
}
