//! Project bootstrap command

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use kestrel::project::ProjectTemplate;

/// Create a new kestrel project from the starter template.
pub struct NewCommand {
    name: String,
    output_dir: PathBuf,
}

impl NewCommand {
    /// Validate the project name and target directory.
    ///
    /// # Errors
    ///
    /// Fails when `name` is not a valid crate name or a directory with that
    /// name already exists.
    pub fn new(name: String) -> Result<Self> {
        if !is_valid_crate_name(&name) {
            anyhow::bail!(
                "Invalid project name: {name}. Must be a valid Rust crate name (lowercase, alphanumeric, hyphens, underscores)"
            );
        }

        let output_dir = PathBuf::from(&name);
        if output_dir.exists() {
            anyhow::bail!(
                "Directory '{name}' already exists. Choose a different name or remove the existing directory."
            );
        }

        Ok(Self { name, output_dir })
    }

    /// Generate the starter tree and print next steps.
    ///
    /// # Errors
    ///
    /// Fails when a starter file cannot be rendered or written.
    pub fn execute(&self) -> Result<()> {
        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style("project:").bold(),
            style(&self.name).cyan().bold()
        );
        println!();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message("Rendering starter template...");

        ProjectTemplate::new(&self.name)
            .generate(&self.output_dir)
            .with_context(|| format!("Failed to generate project in '{}'", self.name))?;

        spinner.finish_and_clear();
        self.print_success();

        Ok(())
    }

    fn print_success(&self) {
        println!("{}", style("✓ Project created!").green().bold());
        println!();
        println!("{}", style("Next steps:").bold());
        println!();
        println!("  {} Navigate to the project:", style("1.").cyan());
        println!(
            "     {} {}",
            style("$").dim(),
            style(format!("cd {}", self.name)).cyan()
        );
        println!();
        println!("  {} Declare your models:", style("2.").cyan());
        println!("     {}", style("edit kestrel.toml").cyan());
        println!();
        println!("  {} Generate CRUD for a model:", style("3.").cyan());
        println!(
            "     {} {}",
            style("$").dim(),
            style("kestrel crud <Model>").cyan()
        );
        println!();
        println!("  {} Run the server:", style("4.").cyan());
        println!("     {} {}", style("$").dim(), style("cargo run").cyan());
        println!(
            "     {}",
            style("http://127.0.0.1:3000").cyan().underlined()
        );
    }
}

/// Validate that a string is a valid Rust crate name.
fn is_valid_crate_name(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    if !first.is_ascii_lowercase() && first != '_' {
        return false;
    }
    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
