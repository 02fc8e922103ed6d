//! Core library for the Remora console: the typed data model, the REST API
//! client, the preset content editor, the backup codec and the plugin
//! event stream. Both the GUI and the CLI sit on top of this crate.

pub mod api;
pub mod config;
pub mod editor;
pub mod events;
pub mod fs;
pub mod model;
pub mod transfer;

pub use api::{ApiClient, Error, PresetKind, Result};
pub use config::{Cfg, ClientConfig};
pub use editor::ItemEditor;
pub use events::{PluginEvent, ReconnectPolicy};
