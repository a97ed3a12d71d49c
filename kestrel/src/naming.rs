//! Naming-convention helpers for generated code
//!
//! All artifact paths, table names, route paths, and labels derive from the
//! model name through these functions, so generation stays deterministic.

use inflector::Inflector;

/// Convert to `snake_case`.
#[must_use]
pub fn snake(input: &str) -> String {
    input.to_snake_case()
}

/// Convert to kebab-case.
#[must_use]
pub fn kebab(input: &str) -> String {
    input.to_kebab_case()
}

/// Pluralize a word.
///
/// The inflector crate has known gaps for irregular plurals, which is
/// acceptable here since model names are overwhelmingly regular words.
/// A model can override the result with an explicit `plural` in the manifest.
#[must_use]
pub fn plural(input: &str) -> String {
    input.to_plural()
}

/// Table name for a model: `snake_case` plural.
///
/// ```
/// assert_eq!(kestrel::naming::table_name("UserProfile"), "user_profiles");
/// ```
#[must_use]
pub fn table_name(model: &str) -> String {
    plural(&snake(model))
}

/// Human-readable title, e.g. `UserProfile` -> `User Profile`.
#[must_use]
pub fn title(input: &str) -> String {
    input.to_title_case()
}

/// Human-readable plural title, e.g. `UserProfile` -> `User Profiles`.
#[must_use]
pub fn plural_title(input: &str) -> String {
    plural(&title(input))
}

/// Form label for a field name, e.g. `published_at` -> `Published At`.
#[must_use]
pub fn label(field: &str) -> String {
    field.to_title_case()
}
