//! Starter project template
//!
//! Renders the built-in starter tree for `kestrel new`. The sync engine
//! re-renders the same tree to compute template updates, so everything here
//! must stay deterministic for a given project name.

use std::fs;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde_json::json;

use crate::error::{Error, Result};
use crate::naming;

pub mod files;

/// Starter files: output path -> blueprint source.
const FILES: &[(&str, &str)] = &[
    ("Cargo.toml", files::CARGO_TOML),
    ("README.md", files::README_MD),
    (".gitignore", files::GITIGNORE),
    ("kestrel.toml", files::MANIFEST_SEED),
    ("src/main.rs", files::MAIN_RS),
    ("src/lib.rs", files::LIB_RS),
    ("src/error.rs", files::ERROR_RS),
    ("src/state.rs", files::STATE_RS),
    ("src/forms/mod.rs", files::FORMS_MOD),
    ("src/views/mod.rs", files::VIEWS_MOD),
    ("src/views/home.rs", files::VIEWS_HOME),
    ("src/routes/mod.rs", files::ROUTES_MOD),
    ("templates/layouts/base.html", files::TEMPLATE_BASE),
    ("templates/home.html", files::TEMPLATE_HOME),
    ("static/css/app.css", files::STATIC_CSS),
];

/// Directories the starter tree ships even when empty.
const DIRS: &[&str] = &["tests", "templates/layouts", "static/css"];

/// One rendered starter file.
#[derive(Debug)]
pub struct RenderedFile {
    /// Path relative to the project root
    pub path: PathBuf,
    /// Rendered content
    pub content: String,
}

/// Renders the starter tree for one project name.
pub struct ProjectTemplate {
    name: String,
    handlebars: Handlebars<'static>,
}

impl ProjectTemplate {
    /// Create a template for the given project name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let mut handlebars = Handlebars::new();
        // Generating code and config, not HTML-for-browsers.
        handlebars.register_escape_fn(handlebars::no_escape);
        Self {
            name: name.to_string(),
            handlebars,
        }
    }

    /// Render every starter file in memory.
    ///
    /// # Errors
    ///
    /// Returns a render error when a starter blueprint fails to render.
    pub fn render_all(&self) -> Result<Vec<RenderedFile>> {
        let snake = self.name.replace('-', "_");
        let context = json!({
            "project_name": self.name,
            "project_snake": snake,
            "project_title": naming::title(&snake),
        });

        FILES
            .iter()
            .map(|(path, source)| {
                let content = self
                    .handlebars
                    .render_template(source, &context)
                    .map_err(|err| Error::Render {
                        name: (*path).to_string(),
                        source: Box::new(err),
                    })?;
                Ok(RenderedFile {
                    path: PathBuf::from(path),
                    content,
                })
            })
            .collect()
    }

    /// Write the starter tree under `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns render or I/O errors; `output_dir` handling (existence checks)
    /// is the caller's concern.
    pub fn generate(&self, output_dir: &Path) -> Result<()> {
        for dir in DIRS {
            fs::create_dir_all(output_dir.join(dir))?;
        }
        for file in self.render_all()? {
            let path = output_dir.join(&file.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, file.content)?;
        }
        Ok(())
    }
}

/// Read the package name from a project's `Cargo.toml`.
///
/// # Errors
///
/// Returns [`Error::ProjectName`] when the manifest is missing or carries no
/// `package.name`.
pub fn package_name(project_root: &Path) -> Result<String> {
    let path = project_root.join("Cargo.toml");
    let raw = fs::read_to_string(&path).map_err(|_| Error::ProjectName(path.clone()))?;
    let doc: toml::Value = toml::from_str(&raw).map_err(|_| Error::ProjectName(path.clone()))?;
    doc.get("package")
        .and_then(|package| package.get("name"))
        .and_then(toml::Value::as_str)
        .map(str::to_string)
        .ok_or(Error::ProjectName(path))
}
