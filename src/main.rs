use anyhow::Result;
use clap::{Parser, Subcommand};

use plantdash::{app, cli, config};

#[derive(Debug, Parser)]
#[command(name = "plantdash")]
#[command(about = "Terminal dashboard for manufacturing event analytics")]
struct App {
    /// Backend base URL (overrides config file and environment)
    #[arg(long)]
    api_url: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that the backend is reachable and report what it serves
    Health,
    /// Show, initialize, or locate the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write the annotated default config to ~/.plantdash/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

fn main() -> Result<()> {
    let args = App::parse();

    let mut config = config::load();
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        config.api.timeout_secs = secs;
    }

    match args.command {
        None => app::run_dashboard(&config),
        Some(Commands::Health) => cli::run_health(&config),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Path => cli::run_config_path(),
        },
    }
}
