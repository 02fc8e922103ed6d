use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;
use remora_lib::{
    ApiClient, PresetKind,
    transfer::{self, Redaction},
};

use crate::Result;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List presets
    List,
    /// Show one preset as JSON
    Show { id: String },
    /// Delete a preset
    Delete { id: String },
    /// Write all presets to a backup file
    Export {
        path: PathBuf,
        /// Blank out API keys and model endpoints
        #[arg(long)]
        strip_secrets: bool,
    },
    /// Load presets from a backup file
    Import { path: PathBuf },
}

pub async fn handle(client: &ApiClient, kind: PresetKind, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List => {
            for preset in client.presets(kind).await? {
                let id = preset.id.as_deref().unwrap_or("-");
                println!(
                    "{}  {}  {} items",
                    id.dimmed(),
                    preset.name.bold(),
                    preset.content.len()
                );
            }
        }
        Command::Show { id } => {
            let preset = client.preset(kind, id).await?;
            println!("{}", serde_json::to_string_pretty(&preset)?);
        }
        Command::Delete { id } => {
            client.delete_preset(kind, id).await?;
            println!("Deleted {id}");
        }
        Command::Export { path, strip_secrets } => {
            let presets = client.presets(kind).await?;
            let redaction = if *strip_secrets {
                Redaction::Strip
            } else {
                Redaction::Keep
            };

            std::fs::write(path, transfer::export_presets(&presets, redaction)?)?;
            println!("Exported {} presets to {}", presets.len(), path.display());
        }
        Command::Import { path } => {
            let raw = std::fs::read_to_string(path)?;
            let presets = transfer::import_presets(&raw)?;

            client.import_presets(kind, &presets).await?;
            println!("Imported {} presets", presets.len());
        }
    }

    Ok(())
}
