use crate::{
    api::{ApiClient, Result},
    model::Preset,
};

/// Which persona namespace an operation targets.
///
/// Disguise presets are structurally identical to normal presets but live
/// under their own API prefix and assignment table. Keeping the selector
/// explicit lets one view component serve both without shared state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PresetKind {
    #[default]
    Normal,
    Disguise,
}

impl PresetKind {
    pub(crate) fn presets_root(self) -> &'static str {
        match self {
            PresetKind::Normal => "/api/presets",
            PresetKind::Disguise => "/api/disguise/presets",
        }
    }

    pub(crate) fn assignments_root(self) -> &'static str {
        match self {
            PresetKind::Normal => "/api/assignments",
            PresetKind::Disguise => "/api/disguise/assignments",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PresetKind::Normal => "Presets",
            PresetKind::Disguise => "Disguise presets",
        }
    }
}

impl ApiClient {
    pub async fn presets(&self, kind: PresetKind) -> Result<Vec<Preset>> {
        self.get_json(kind.presets_root()).await
    }

    pub async fn preset(&self, kind: PresetKind, id: &str) -> Result<Preset> {
        self.get_json(&format!("{}/{id}", kind.presets_root())).await
    }

    pub async fn create_preset(&self, kind: PresetKind, preset: &Preset) -> Result<Preset> {
        self.post_json(kind.presets_root(), preset).await
    }

    pub async fn update_preset(&self, kind: PresetKind, id: &str, preset: &Preset) -> Result<()> {
        self.put_unit(&format!("{}/{id}", kind.presets_root()), preset)
            .await
    }

    pub async fn delete_preset(&self, kind: PresetKind, id: &str) -> Result<()> {
        self.delete(&format!("{}/{id}", kind.presets_root())).await
    }

    /// Submit a whole batch of presets parsed from a backup file.
    pub async fn import_presets(&self, kind: PresetKind, presets: &[Preset]) -> Result<()> {
        self.post_unit(&format!("{}/import", kind.presets_root()), presets)
            .await
    }
}
