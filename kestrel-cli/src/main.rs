//! kestrel CLI

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{CrudCommand, NewCommand, SyncCommand};

#[derive(Parser)]
#[command(name = "kestrel")]
#[command(version)]
#[command(about = "Developer workflow tool for server-rendered web projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project from the starter template
    New {
        /// Project name (must be a valid crate name)
        name: String,
    },
    /// Apply starter-template updates to the current project
    Sync,
    /// Generate CRUD artifacts for a model declared in kestrel.toml
    Crud {
        /// Model name from the manifest, or `all` for every model
        model: String,
        /// Fields to leave out of generation
        #[arg(short = 'e', long = "exclude", value_name = "FIELD")]
        exclude: Vec<String>,
        /// Generate only Rust source artifacts
        #[arg(long, conflicts_with = "only_templates")]
        only_source: bool,
        /// Generate only HTML page templates
        #[arg(long)]
        only_templates: bool,
        /// Directory of custom .html.hbs page blueprints
        #[arg(long, value_name = "DIR")]
        blueprints: Option<PathBuf>,
        /// Mount the model at the application root as the landing resource
        #[arg(long)]
        entry_point: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::New { name } => {
            let cmd = NewCommand::new(name)?;
            cmd.execute()?;
        }
        Commands::Sync => {
            SyncCommand::execute()?;
        }
        Commands::Crud {
            model,
            exclude,
            only_source,
            only_templates,
            blueprints,
            entry_point,
        } => {
            let cmd = CrudCommand::new(model, exclude, only_source, only_templates, blueprints, entry_point);
            cmd.execute()?;
        }
    }

    Ok(())
}
