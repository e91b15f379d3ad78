//! token-sync command line interface
//!
//! ```bash
//! # Push local tokens to the remote file
//! token-sync export
//!
//! # Preview what an import would change
//! token-sync import --dry-run --verbose
//!
//! # Compare local tokens with the Tokens Studio files
//! token-sync diff --studio
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use token_sync::cli::CliError;
use token_sync::cli::commands::{self, CommandContext, GlobalOptions};

#[derive(Parser)]
#[command(name = "token-sync")]
#[command(version)]
#[command(about = "Sync design tokens with Figma variables and Tokens Studio files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file, relative to the project root (default: token-sync.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Project root; configured directories, the config file and .env are relative to it
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Override the token source directory
    #[arg(long, global = true)]
    tokens_dir: Option<String>,

    /// Debug logging and detailed listings
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create remote variables from the local tokens
    Export {
        /// Build and print the batch without sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Pull remote variables into the local token sources
    Import {
        /// Show what would change without writing files
        #[arg(long)]
        dry_run: bool,

        /// Replace imported categories instead of merging
        #[arg(long)]
        overwrite: bool,
    },

    /// Compare local tokens with the remote file or the Tokens Studio files
    Diff {
        /// Compare with the Tokens Studio files instead of the remote file
        #[arg(long)]
        studio: bool,
    },

    /// Tokens Studio leaf-format files
    Studio {
        #[command(subcommand)]
        command: StudioCommands,
    },
}

#[derive(Subcommand)]
enum StudioCommands {
    /// Write the local tokens as leaf-format files
    Push,

    /// Regenerate the token sources from the leaf-format files
    Pull {
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "token_sync=debug"
    } else {
        "token_sync=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let options = GlobalOptions {
        config: cli.config,
        root: cli.root,
        tokens_dir: cli.tokens_dir,
    };
    let context = CommandContext::load(&options)?;

    match cli.command {
        Commands::Export { dry_run } => {
            commands::export::handle_export(&context, dry_run, cli.verbose).await
        }
        Commands::Import { dry_run, overwrite } => {
            commands::import::handle_import(&context, dry_run, cli.verbose, overwrite).await
        }
        Commands::Diff { studio } => commands::diff::handle_diff(&context, studio, cli.verbose).await,
        Commands::Studio { command } => match command {
            StudioCommands::Push => commands::studio::handle_studio_push(&context).await,
            StudioCommands::Pull { dry_run } => {
                commands::studio::handle_studio_pull(&context, dry_run).await
            }
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            ExitCode::from(e.exit_code().clamp(1, 255) as u8)
        }
    }
}
