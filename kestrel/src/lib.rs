//! kestrel: developer-workflow tooling for server-rendered web projects
//!
//! Three concerns live here, behind the `kestrel` CLI:
//!
//! - **Project bootstrap** ([`project`]): render the starter tree for a new
//!   project.
//! - **Template sync** ([`sync`]): apply starter-template updates to an
//!   existing project without touching local edits.
//! - **CRUD generation** ([`schema`], [`classify`], [`emit`]): introspect the
//!   project's model registry, classify each field by semantic type, and emit
//!   the form, view, route, template, and test artifacts for a model.
//!
//! Generation is deliberately staged: introspection produces normalized
//! [`schema::FieldDescriptor`]s, classification maps each descriptor to
//! exactly one generation strategy, and emission renders the full plan in
//! memory before a single file is written. Unsupported input therefore fails
//! a run before it can leave a partial scaffold behind.
//!
//! Generated files carry named marker regions (see [`emit::markers`]); only
//! the inside of a region is ever regenerated, so hand-written code around
//! the markers survives re-runs.

// Lint configuration is handled at the workspace level in Cargo.toml
// Additional crate-specific allows:
#![allow(clippy::module_name_repetitions)] // ModelSchema, EmitOptions etc. echo their module names

pub mod classify;
pub mod emit;
pub mod error;
pub mod naming;
pub mod project;
pub mod schema;
pub mod sync;

pub use classify::{Classification, ClassifiedField, ViewPlacement, WidgetKind};
pub use emit::{ArtifactEmitter, ArtifactKind, EmitOptions, GenerationPlan, WriteAction};
pub use error::{Error, Result};
pub use schema::manifest::ManifestSchemaProvider;
pub use schema::{FieldDescriptor, ModelSchema, ModelSchemaProvider};
pub use sync::{SyncEngine, SyncReport, SyncStatus};
