use clap::{Parser, Subcommand};
use colored::Colorize;
use remora_lib::{ApiClient, ClientConfig, PresetKind};
use thiserror::Error;

mod assignment;
mod plugin;
mod preset;

#[derive(Parser, Debug)]
#[command(name = "remora")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Target the disguise namespace instead of the normal one
    #[arg(short, long, global = true)]
    disguise: bool,

    /// Override the configured backend URL
    #[arg(long, global = true)]
    server: Option<String>,

    /// Override the configured bearer token
    #[arg(long, global = true)]
    token: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Operate on presets
    #[command(subcommand)]
    Preset(preset::Command),
    /// Operate on preset assignments
    #[command(subcommand)]
    Assignment(assignment::Command),
    /// Operate on plugins
    #[command(subcommand)]
    Plugin(plugin::Command),
    /// Store connection settings for later runs
    Login { server: String, token: String },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] remora_lib::Error),
    #[error(transparent)]
    Import(#[from] remora_lib::transfer::ImportError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
    #[error("no connection configured, run `remora login <server> <token>` first")]
    NotConfigured,
}

pub type Result<T> = std::result::Result<T, CliError>;

#[tokio::main]
async fn main() -> sysexits::ExitCode {
    human_panic::setup_panic!();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => sysexits::ExitCode::Ok,
        Err(error) => {
            eprintln!("{}", error.to_string().red());
            match error {
                CliError::Api(remora_lib::Error::Unauthorized) => sysexits::ExitCode::NoPerm,
                CliError::Api(remora_lib::Error::Transport(_)) => sysexits::ExitCode::Unavailable,
                CliError::NotConfigured => sysexits::ExitCode::Config,
                CliError::Io(_) => sysexits::ExitCode::IoErr,
                _ => sysexits::ExitCode::Software,
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Command::Login { server, token } = &cli.command {
        let config = ClientConfig {
            server_url: server.clone(),
            token: token.clone(),
        };
        let client = ApiClient::from_config(&config)?;
        client.auth_status().await?;
        config.save();
        println!("Connected to {}", config.server_url.bold());
        return Ok(());
    }

    let client = client(&cli)?;
    let kind = if cli.disguise {
        PresetKind::Disguise
    } else {
        PresetKind::Normal
    };

    match &cli.command {
        Command::Preset(cmd) => preset::handle(&client, kind, cmd).await,
        Command::Assignment(cmd) => assignment::handle(&client, kind, cmd).await,
        Command::Plugin(cmd) => plugin::handle(&client, cmd).await,
        Command::Login { .. } => Ok(()),
    }
}

fn client(cli: &Cli) -> Result<ApiClient> {
    let mut config = ClientConfig::load();

    if let Some(server) = &cli.server {
        config.server_url = server.clone();
    }
    if let Some(token) = &cli.token {
        config.token = token.clone();
    }

    if !config.is_complete() {
        return Err(CliError::NotConfigured);
    }

    tracing::debug!(server_url = %config.server_url, "resolved backend");
    Ok(ApiClient::from_config(&config)?)
}
