//! Wire-level data model for the Remora console.
//!
//! Every type here is exchanged verbatim with the backend as JSON. The
//! console holds no derived state: the only invariants it owns are "array
//! order defines item order" inside a preset's content list, and the
//! tagged-union exclusivity enforced by [`preset::PresetItem`]'s codec.

use serde::{Deserialize, Serialize};

mod access;
mod assignment;
mod contact;
mod history;
mod plugin;
mod preset;
mod settings;
mod variable;

pub use access::AccessControlEntry;
pub use assignment::Assignment;
pub use contact::{Friend, Group};
pub use history::{HistoryEntry, HistoryKind};
pub use plugin::{ConfigField, ConfigFieldKind, Plugin, PluginConfig, Speaker};
pub use preset::{
    ItemBody, ModelConfig, PlaceholderConfig, PlaceholderKind, Preset, PresetItem, PresetMode,
    Role, TriggerConfig,
};
pub use settings::Settings;
pub use variable::{GlobalVariable, LocalVariableDefinition, LocalVariableInstance};

/// A chat scope: the whole backend, one private chat, or one group.
///
/// Shared by assignments, access control, history lookups and local
/// variable instances. The backend spells these in UPPERCASE.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Scope {
    Global,
    Private,
    Group,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Global, Scope::Private, Scope::Group];

    /// Scopes that identify a concrete context (everything except global).
    pub const CONTEXTUAL: [Scope; 2] = [Scope::Private, Scope::Group];

    /// Path segment used by the history endpoints.
    pub fn path_segment(self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Private => "private",
            Scope::Group => "group",
        }
    }
}
