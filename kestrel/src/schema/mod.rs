//! Model schema introspection
//!
//! A [`ModelSchemaProvider`] is the seam between the generator and whatever
//! mechanism the host project uses to declare its data models. Adapters
//! return [`ModelSchema`] values whose fields are normalized
//! [`FieldDescriptor`]s in declaration order; everything downstream
//! (classification, emission) works only on descriptors and never touches
//! the model-definition mechanism itself.
//!
//! The built-in adapter is [`manifest::ManifestSchemaProvider`], which reads
//! the project's declarative `kestrel.toml` registry.

use crate::error::{Error, Result};
use crate::naming;

pub mod manifest;

/// Normalized representation of one model attribute.
///
/// Immutable once introspected; all generation decisions for the field are
/// derived from this descriptor and its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as declared, e.g. `published_at`
    pub name: String,
    /// Declared type tag, e.g. `string`, `boolean`, `reference`
    pub type_tag: String,
    /// Human-readable label; derived from the name when not declared
    pub label: String,
    /// Whether the field may be absent
    pub nullable: bool,
    /// Declared default value, verbatim from the registry
    pub default: Option<String>,
    /// Target model name for `reference` fields
    pub relation: Option<String>,
}

/// One introspected model: name plus ordered field descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    /// Model name in `PascalCase`, e.g. `Post`, `UserProfile`
    pub name: String,
    /// Plural spelling used for tables and routes, e.g. `posts`
    pub plural: String,
    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
    /// Build a schema, deriving the plural from the model name when the
    /// registry does not declare one.
    #[must_use]
    pub fn new(name: &str, plural: Option<String>, fields: Vec<FieldDescriptor>) -> Self {
        let plural = plural.unwrap_or_else(|| naming::table_name(name));
        Self {
            name: name.to_string(),
            plural,
            fields,
        }
    }
}

/// Capability implemented by host-framework adapters.
///
/// Any mechanism that can enumerate a project's models (a declarative
/// manifest, parsed model source, a live schema dump) plugs in here.
pub trait ModelSchemaProvider {
    /// All registered models, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a resolution or unsupported-input error when the registry
    /// cannot be read or contains an unclassifiable field.
    fn models(&self) -> Result<Vec<ModelSchema>>;

    /// Resolve a single model by name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelNotFound`] when the identifier does not resolve.
    fn model(&self, name: &str) -> Result<ModelSchema> {
        self.models()?
            .into_iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::ModelNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(Vec<ModelSchema>);

    impl ModelSchemaProvider for FixedProvider {
        fn models(&self) -> Result<Vec<ModelSchema>> {
            Ok(self.0.clone())
        }
    }

    fn post_schema() -> ModelSchema {
        ModelSchema::new(
            "Post",
            None,
            vec![FieldDescriptor {
                name: "title".to_string(),
                type_tag: "string".to_string(),
                label: "Title".to_string(),
                nullable: false,
                default: None,
                relation: None,
            }],
        )
    }

    #[test]
    fn plural_derived_from_name() {
        let schema = ModelSchema::new("Category", None, vec![]);
        assert_eq!(schema.plural, "categories");
    }

    #[test]
    fn explicit_plural_wins() {
        let schema = ModelSchema::new("Person", Some("people".to_string()), vec![]);
        assert_eq!(schema.plural, "people");
    }

    #[test]
    fn model_lookup_is_case_insensitive() {
        let provider = FixedProvider(vec![post_schema()]);
        assert!(provider.model("post").is_ok());
        assert!(provider.model("Post").is_ok());
    }

    #[test]
    fn missing_model_is_a_resolution_error() {
        let provider = FixedProvider(vec![post_schema()]);
        let err = provider.model("Article").unwrap_err();
        assert!(matches!(err, Error::ModelNotFound(name) if name == "Article"));
    }
}
