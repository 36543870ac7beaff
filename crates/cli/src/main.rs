//! Plugfetch CLI - fetch plugin releases into a local plugin directory.

mod commands;
mod discovery;
mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::Result;

#[derive(Parser)]
#[command(name = "plugfetch")]
#[command(
    author,
    version,
    about = "Resolve and install plugin releases from GitHub"
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Plugin id to operate on
    #[arg(long, global = true, value_name = "ID")]
    plugin_id: Option<String>,

    /// Directory plugins are installed into
    #[arg(long, global = true, value_name = "DIR")]
    plugin_dir: Option<PathBuf>,

    /// JSON file listing known plugins (replaces the built-in list)
    #[arg(long, global = true, value_name = "FILE")]
    registry: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a plugin release, replacing any installed version
    Fetch {
        /// Restrict to stable (i.e., non-prerelease) releases
        #[arg(long)]
        stable: bool,

        /// Semver exact match, range (e.g., ">=1.0.0 <2.0.0 || >=3.0.0 !3.0.1-beta.1"), or wildcard (e.g., 0.8.x)
        #[arg(long, default_value = "", value_name = "EXPR")]
        match_version: String,
    },

    /// List plugins that can be fetched
    List,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let registry = discovery::load_registry(cli.registry.as_deref())?;

    match cli.command {
        Commands::Fetch {
            stable,
            match_version,
        } => {
            let plugin_dir = discovery::plugin_dir(cli.plugin_dir)?;
            let request = commands::fetch::FetchRequest {
                plugin_id: cli.plugin_id.as_deref(),
                plugin_dir: &plugin_dir,
                match_version: &match_version,
                stable_only: stable,
            };

            commands::fetch::execute(registry, request).await
        }

        Commands::List => commands::list::execute(&registry, cli.verbose),
    }
}
