use clap::Subcommand;
use colored::Colorize;
use remora_lib::{
    ApiClient, PresetKind,
    model::{Assignment, Scope},
};

use crate::Result;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List assignments
    List,
    /// Assign a preset to a scope
    Set {
        /// global, private or group
        scope: Scope,
        preset_id: String,
        /// Friend or group id; required for private and group scopes
        #[arg(long)]
        context: Option<String>,
    },
    /// Remove an assignment
    Clear {
        /// global, private or group
        scope: Scope,
        /// Friend or group id; required for private and group scopes
        #[arg(long)]
        context: Option<String>,
    },
}

pub async fn handle(client: &ApiClient, kind: PresetKind, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List => {
            for assignment in client.assignments(kind).await? {
                let context = assignment.context_id.as_deref().unwrap_or("*");
                println!(
                    "{:<8} {:<16} {}",
                    assignment.scope.to_string().bold(),
                    context,
                    assignment.preset_id.dimmed()
                );
            }
        }
        Command::Set {
            scope,
            preset_id,
            context,
        } => {
            let assignment = Assignment::new(*scope, context.clone(), preset_id.clone());
            client.put_assignment(kind, &assignment).await?;
            println!("Assigned {preset_id} to {scope}");
        }
        Command::Clear { scope, context } => {
            client
                .delete_assignment(kind, *scope, context.as_deref())
                .await?;
            println!("Cleared the {scope} assignment");
        }
    }

    Ok(())
}
