//! CRUD generation command

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use kestrel::schema::ModelSchema;
use kestrel::{
    naming, project, ArtifactEmitter, EmitOptions, ManifestSchemaProvider, ModelSchemaProvider,
    WriteAction,
};

/// Generate CRUD artifacts for one manifest model, or for all of them.
pub struct CrudCommand {
    model: String,
    exclude: Vec<String>,
    only_source: bool,
    only_templates: bool,
    blueprints: Option<PathBuf>,
    entry_point: bool,
}

impl CrudCommand {
    #[must_use]
    pub fn new(
        model: String,
        exclude: Vec<String>,
        only_source: bool,
        only_templates: bool,
        blueprints: Option<PathBuf>,
        entry_point: bool,
    ) -> Self {
        Self {
            model,
            exclude,
            only_source,
            only_templates,
            blueprints,
            entry_point,
        }
    }

    /// Plan and write artifacts for the selected models.
    ///
    /// # Errors
    ///
    /// Fails when the manifest is missing or malformed, a field is
    /// unsupported, a custom blueprint fails to compile, or a file cannot be
    /// written. Planning happens before any write, so a failing run leaves
    /// the project untouched.
    pub fn execute(&self) -> Result<()> {
        self.check_flags()?;

        let project_root =
            std::env::current_dir().context("Failed to get current directory")?;
        let project_name = project::package_name(&project_root)
            .context("Not inside a kestrel project (no Cargo.toml with a package name)")?;

        let provider = ManifestSchemaProvider::discover(&project_root)?;
        let models: Vec<ModelSchema> = if self.model == "all" {
            provider.models()?
        } else {
            vec![provider.model(&self.model)?]
        };

        let emitter = ArtifactEmitter::new(EmitOptions {
            only_source: self.only_source,
            only_templates: self.only_templates,
            entry_point: self.entry_point,
            exclude: self.exclude.clone(),
            blueprint_dir: self.blueprints.clone(),
            project_name,
        })?;

        // Plan everything up front so a bad model aborts with zero writes.
        let plans = models
            .iter()
            .map(|model| emitter.plan(model))
            .collect::<kestrel::Result<Vec<_>>>()?;

        for plan in &plans {
            println!(
                "{} {}",
                style("Generating CRUD for").cyan().bold(),
                style(&plan.model).green().bold()
            );

            let written = emitter.write(&project_root, plan)?;
            for (artifact, file) in plan.artifacts.iter().zip(&written) {
                let verb = match file.action {
                    WriteAction::Created => style("created").green(),
                    WriteAction::Merged => style("merged").yellow(),
                    WriteAction::Unchanged => style("unchanged").dim(),
                };
                println!(
                    "  {} {} {} {}",
                    style("✓").green(),
                    style(file.path.display()).dim(),
                    verb,
                    style(format!("({})", artifact.description)).dim()
                );
            }
            println!();
        }

        self.print_next_steps(&models);
        Ok(())
    }

    /// `--entry-point` hands one model the root path; every model at once
    /// would collide there.
    fn check_flags(&self) -> Result<()> {
        if self.entry_point && self.model == "all" {
            anyhow::bail!("--entry-point applies to a single model, not `all`");
        }
        Ok(())
    }

    fn print_next_steps(&self, models: &[ModelSchema]) {
        println!("{}", style("Next steps:").cyan().bold());
        for model in models {
            let snake = naming::snake(&model.name);
            if !self.only_templates {
                println!(
                    "  Add {} to src/forms/mod.rs, src/views/mod.rs, and src/routes/mod.rs",
                    style(format!("pub mod {snake};")).yellow()
                );
                println!(
                    "  Merge {} into the router in src/routes/mod.rs",
                    style(format!("{snake}::routes()")).yellow()
                );
            }
            println!(
                "  Create the {} table before running the server",
                style(naming::table_name(&model.name)).yellow()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(model: &str, entry_point: bool) -> CrudCommand {
        CrudCommand::new(model.to_string(), Vec::new(), false, false, None, entry_point)
    }

    #[test]
    fn entry_point_with_all_is_rejected() {
        assert!(command("all", true).check_flags().is_err());
    }

    #[test]
    fn entry_point_with_a_single_model_is_accepted() {
        assert!(command("Post", true).check_flags().is_ok());
        assert!(command("all", false).check_flags().is_ok());
    }
}
