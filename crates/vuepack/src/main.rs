//! vuepack CLI - packs single-file components into plain scripts and stylesheets.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::Overrides;

#[derive(Parser)]
#[command(name = "vuepack")]
#[command(about = "Packs single-file components into plain scripts and stylesheets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to vuepack.toml config file
    #[arg(short, long, default_value = "vuepack.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default vuepack.toml and an example component
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Pack every component document once
    Build {
        /// Source directory (defaults to config or "src")
        #[arg(short, long)]
        src: Option<PathBuf>,

        /// Output directory (defaults to config or "build")
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Inject a loader for each component's stylesheet
        #[arg(long)]
        auto_link_css: bool,

        /// Write components.json with every registration
        #[arg(long)]
        manifest: bool,
    },

    /// Pack once, then repack documents as they change
    Watch {
        /// Source directory (defaults to config or "src")
        #[arg(short, long)]
        src: Option<PathBuf>,

        /// Output directory (defaults to config or "build")
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Inject a loader for each component's stylesheet
        #[arg(long)]
        auto_link_css: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build {
            src,
            out,
            auto_link_css,
            manifest,
        } => {
            let overrides = Overrides {
                src,
                out,
                auto_link_css,
                manifest,
            };
            commands::build::run(&cli.config, overrides).await?;
        }
        Commands::Watch {
            src,
            out,
            auto_link_css,
        } => {
            let overrides = Overrides {
                src,
                out,
                auto_link_css,
                manifest: false,
            };
            commands::watch::run(&cli.config, overrides).await?;
        }
    }

    Ok(())
}
