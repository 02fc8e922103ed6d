use clap::Subcommand;
use colored::Colorize;
use remora_lib::ApiClient;

use crate::Result;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List plugins and their status
    List,
    /// Enable a plugin
    Enable { name: String },
    /// Disable a plugin
    Disable { name: String },
    /// Show a plugin's config as JSON
    Config { name: String },
}

pub async fn handle(client: &ApiClient, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List => {
            for plugin in client.plugins().await? {
                let state = if plugin.enabled {
                    "enabled".green()
                } else {
                    "disabled".red()
                };
                println!("{:<24} {state}  {}", plugin.name.bold(), plugin.description);
            }
        }
        Command::Enable { name } => {
            client.set_plugin_enabled(name, true).await?;
            println!("Enabled {name}");
        }
        Command::Disable { name } => {
            client.set_plugin_enabled(name, false).await?;
            println!("Disabled {name}");
        }
        Command::Config { name } => {
            let config = client.plugin_config(name).await?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
