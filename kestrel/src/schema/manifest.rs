//! TOML model manifest adapter
//!
//! The default [`ModelSchemaProvider`]: reads the project's `kestrel.toml`
//! registry. Models and fields are arrays of tables, so declaration order is
//! preserved exactly as written:
//!
//! ```toml
//! [[model]]
//! name = "Post"
//!
//! [[model.field]]
//! name = "title"
//! type = "string"
//!
//! [[model.field]]
//! name = "author"
//! type = "reference"
//! references = "User"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::classify;
use crate::error::{Error, Result};
use crate::naming;
use crate::schema::{FieldDescriptor, ModelSchema, ModelSchemaProvider};

/// Manifest file name expected in the project root.
pub const MANIFEST_FILE: &str = "kestrel.toml";

/// Reads model schemas from the project's `kestrel.toml`.
#[derive(Debug)]
pub struct ManifestSchemaProvider {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ManifestDoc {
    #[serde(default, rename = "model")]
    models: Vec<ModelDecl>,
}

#[derive(Debug, Deserialize)]
struct ModelDecl {
    name: String,
    plural: Option<String>,
    #[serde(default, rename = "field")]
    fields: Vec<FieldDecl>,
}

#[derive(Debug, Deserialize)]
struct FieldDecl {
    name: String,
    #[serde(rename = "type")]
    type_tag: String,
    label: Option<String>,
    #[serde(default)]
    nullable: bool,
    default: Option<String>,
    references: Option<String>,
}

impl ManifestSchemaProvider {
    /// Point the provider at a manifest file.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Locate the manifest in a project root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestNotFound`] when `kestrel.toml` does not exist
    /// under `project_root`.
    pub fn discover(project_root: &Path) -> Result<Self> {
        let path = project_root.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(Error::ManifestNotFound(path));
        }
        Ok(Self::new(path))
    }

    fn normalize(decl: ModelDecl) -> Result<ModelSchema> {
        let fields = decl
            .fields
            .into_iter()
            .map(Self::normalize_field)
            .collect::<Result<Vec<_>>>()?;
        Ok(ModelSchema::new(&decl.name, decl.plural, fields))
    }

    fn normalize_field(decl: FieldDecl) -> Result<FieldDescriptor> {
        // Unknown tags surface here, before any artifact is planned.
        if !classify::supports(&decl.type_tag) {
            return Err(Error::UnsupportedField {
                field: decl.name,
                tag: decl.type_tag,
            });
        }
        let relation = if decl.type_tag == "reference" {
            match decl.references {
                Some(target) => Some(target),
                None => return Err(Error::MissingRelationTarget { field: decl.name }),
            }
        } else {
            None
        };
        let label = decl.label.unwrap_or_else(|| naming::label(&decl.name));
        Ok(FieldDescriptor {
            name: decl.name,
            type_tag: decl.type_tag,
            label,
            nullable: decl.nullable,
            default: decl.default,
            relation,
        })
    }
}

impl ModelSchemaProvider for ManifestSchemaProvider {
    fn models(&self) -> Result<Vec<ModelSchema>> {
        let raw = fs::read_to_string(&self.path)?;
        let doc: ManifestDoc = toml::from_str(&raw)?;
        doc.models.into_iter().map(Self::normalize).collect()
    }
}
