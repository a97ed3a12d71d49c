//! Template sync command

use anyhow::{Context, Result};
use console::style;

use kestrel::{SyncEngine, SyncStatus};

/// Apply starter-template updates to the project in the current directory.
pub struct SyncCommand;

impl SyncCommand {
    /// Run the sync engine and print the per-file report.
    ///
    /// # Errors
    ///
    /// Fails when the current directory is not a kestrel project or a new
    /// template file cannot be written.
    pub fn execute() -> Result<()> {
        let project_root =
            std::env::current_dir().context("Failed to get current directory")?;

        println!(
            "{} {}",
            style("Syncing").cyan().bold(),
            style("project with starter template...").bold()
        );
        println!();

        let report = SyncEngine::new(project_root)
            .run()
            .context("Sync failed")?;

        for entry in &report.entries {
            match entry.status {
                SyncStatus::UpToDate => {}
                SyncStatus::Written => {
                    println!(
                        "  {} {}",
                        style("+").green().bold(),
                        entry.path.display()
                    );
                }
                SyncStatus::Modified { added, removed } => {
                    println!(
                        "  {} {} {}",
                        style("~").yellow().bold(),
                        entry.path.display(),
                        style(format!("(local edits, +{added}/-{removed} upstream)")).dim()
                    );
                }
            }
        }

        println!();
        if report.written() == 0 && report.modified() == 0 {
            println!("{}", style("✓ Already up to date.").green().bold());
        } else {
            println!(
                "{} {} written, {} left untouched because of local edits.",
                style("✓").green().bold(),
                report.written(),
                report.modified()
            );
        }

        Ok(())
    }
}
