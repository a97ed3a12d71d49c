//! Error types for schema resolution, classification, and artifact emission

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during project generation and sync
///
/// Every variant is terminal for the current invocation; nothing is silently
/// recovered. The taxonomy follows the three failure classes of the tool:
/// resolution (model/manifest/blueprint not found), unsupported input
/// (unclassifiable field), and write/merge failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Model identifier does not resolve in the project's registry
    #[error("model '{0}' not found in the project manifest")]
    ModelNotFound(String),

    /// No model manifest in the project root
    #[error("no model manifest found at {0}")]
    ManifestNotFound(PathBuf),

    /// Model manifest is not valid TOML
    #[error("failed to parse model manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    /// Field declares a type tag with no classification rule
    #[error("field '{field}' has unsupported type tag '{tag}'")]
    UnsupportedField {
        /// Name of the offending field
        field: String,
        /// The declared type tag
        tag: String,
    },

    /// Reference field without a target model
    #[error("field '{field}' is a reference but declares no target model")]
    MissingRelationTarget {
        /// Name of the offending field
        field: String,
    },

    /// Custom blueprint directory contains no usable templates
    #[error("no .hbs blueprints found in {0}")]
    EmptyBlueprintDir(PathBuf),

    /// A begin marker has no matching end marker
    #[error("marker region '{0}' is not terminated")]
    UnterminatedMarker(String),

    /// An end marker appears without a matching begin marker
    #[error("end marker '{0}' has no matching begin marker")]
    DanglingEndMarker(String),

    /// A blueprint failed to compile
    #[error("invalid blueprint '{name}': {source}")]
    Blueprint {
        /// Blueprint name
        name: String,
        /// Underlying template error
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// A blueprint failed to render
    #[error("failed to render blueprint '{name}': {source}")]
    Render {
        /// Blueprint name
        name: String,
        /// Underlying render error
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// Project name could not be determined from the project's `Cargo.toml`
    #[error("could not determine project name from {0}")]
    ProjectName(PathBuf),

    /// Filesystem failure while reading or writing generated files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
