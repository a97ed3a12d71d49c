//! Field classification
//!
//! Maps a declared type tag to its generation strategy: which form widget to
//! render, which generated surfaces the field appears on, and which widget
//! fragment the emitter selects. The mapping is a pure, table-driven lookup;
//! supporting a new type tag means adding a [`Rule`] row, not control flow.

use crate::error::{Error, Result};
use crate::schema::{FieldDescriptor, ModelSchema};

/// Form widget selected for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Single-line `<input type="text">`
    TextInput,
    /// Multi-line `<textarea>`
    TextArea,
    /// `<input type="email">`
    EmailInput,
    /// `<input type="url">`
    UrlInput,
    /// `<input type="number">`
    NumberInput,
    /// `<input type="checkbox">`
    Checkbox,
    /// `<input type="date">`
    DateInput,
    /// `<input type="time">`
    TimeInput,
    /// `<input type="datetime-local">`
    DateTimeInput,
    /// `<textarea>` holding a JSON document
    JsonEditor,
    /// `<select>` over the rows of a referenced model
    Select,
}

/// A generated surface a field can appear on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPlacement {
    /// Column in the list page
    List,
    /// Row in the detail page
    Detail,
    /// Input in the create/update form
    Form,
}

/// One classification table row.
#[derive(Debug)]
pub struct Rule {
    /// Declared type tag this row covers
    pub tag: &'static str,
    /// Widget to render in forms
    pub widget: WidgetKind,
    /// Surfaces the field appears on
    pub placements: &'static [ViewPlacement],
    /// Widget fragment the emitter renders for the field
    pub fragment: &'static str,
    /// Rust type of the field in generated source
    pub rust_type: &'static str,
}

const ALL: &[ViewPlacement] = &[ViewPlacement::List, ViewPlacement::Detail, ViewPlacement::Form];
const DETAIL_FORM: &[ViewPlacement] = &[ViewPlacement::Detail, ViewPlacement::Form];

/// The classification table.
///
/// Long-form content (`text`, `json`) and opaque identifiers (`uuid`, `time`)
/// are kept off list columns; everything else shows on all three surfaces.
pub const RULES: &[Rule] = &[
    Rule {
        tag: "string",
        widget: WidgetKind::TextInput,
        placements: ALL,
        fragment: "text_input",
        rust_type: "String",
    },
    Rule {
        tag: "text",
        widget: WidgetKind::TextArea,
        placements: DETAIL_FORM,
        fragment: "text_area",
        rust_type: "String",
    },
    Rule {
        tag: "slug",
        widget: WidgetKind::TextInput,
        placements: ALL,
        fragment: "text_input",
        rust_type: "String",
    },
    Rule {
        tag: "email",
        widget: WidgetKind::EmailInput,
        placements: ALL,
        fragment: "email_input",
        rust_type: "String",
    },
    Rule {
        tag: "url",
        widget: WidgetKind::UrlInput,
        placements: ALL,
        fragment: "url_input",
        rust_type: "String",
    },
    Rule {
        tag: "integer",
        widget: WidgetKind::NumberInput,
        placements: ALL,
        fragment: "number_input",
        rust_type: "i32",
    },
    Rule {
        tag: "bigint",
        widget: WidgetKind::NumberInput,
        placements: ALL,
        fragment: "number_input",
        rust_type: "i64",
    },
    Rule {
        tag: "float",
        widget: WidgetKind::NumberInput,
        placements: ALL,
        fragment: "number_input",
        rust_type: "f32",
    },
    Rule {
        tag: "double",
        widget: WidgetKind::NumberInput,
        placements: ALL,
        fragment: "number_input",
        rust_type: "f64",
    },
    Rule {
        tag: "decimal",
        widget: WidgetKind::NumberInput,
        placements: ALL,
        fragment: "number_input",
        rust_type: "rust_decimal::Decimal",
    },
    Rule {
        tag: "boolean",
        widget: WidgetKind::Checkbox,
        placements: ALL,
        fragment: "checkbox",
        rust_type: "bool",
    },
    Rule {
        tag: "date",
        widget: WidgetKind::DateInput,
        placements: ALL,
        fragment: "date_input",
        rust_type: "chrono::NaiveDate",
    },
    Rule {
        tag: "time",
        widget: WidgetKind::TimeInput,
        placements: DETAIL_FORM,
        fragment: "time_input",
        rust_type: "chrono::NaiveTime",
    },
    Rule {
        tag: "datetime",
        widget: WidgetKind::DateTimeInput,
        placements: ALL,
        fragment: "datetime_input",
        rust_type: "chrono::NaiveDateTime",
    },
    Rule {
        tag: "json",
        widget: WidgetKind::JsonEditor,
        placements: DETAIL_FORM,
        fragment: "json_editor",
        rust_type: "serde_json::Value",
    },
    Rule {
        tag: "uuid",
        widget: WidgetKind::TextInput,
        placements: DETAIL_FORM,
        fragment: "text_input",
        rust_type: "uuid::Uuid",
    },
    Rule {
        tag: "reference",
        widget: WidgetKind::Select,
        placements: ALL,
        fragment: "select",
        rust_type: "i64",
    },
];

/// Whether a type tag has a classification rule.
#[must_use]
pub fn supports(tag: &str) -> bool {
    rule_for(tag).is_some()
}

fn rule_for(tag: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.tag == tag)
}

/// Generation strategy for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Widget to render in forms
    pub widget: WidgetKind,
    /// Surfaces the field appears on
    pub placements: &'static [ViewPlacement],
    /// Widget fragment id
    pub fragment: &'static str,
}

impl Classification {
    /// Whether the field appears on the given surface.
    #[must_use]
    pub fn appears_on(&self, placement: ViewPlacement) -> bool {
        self.placements.contains(&placement)
    }
}

/// A descriptor paired with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedField {
    /// The introspected descriptor
    pub descriptor: FieldDescriptor,
    /// Its generation strategy
    pub classification: Classification,
    /// Rust type in generated source, `Option`-wrapped when nullable
    pub rust_type: String,
}

/// Classify one descriptor.
///
/// Pure: the same descriptor always yields the same classification.
///
/// # Errors
///
/// Returns [`Error::UnsupportedField`] when the declared tag has no table row.
pub fn classify(descriptor: &FieldDescriptor) -> Result<ClassifiedField> {
    let rule = rule_for(&descriptor.type_tag).ok_or_else(|| Error::UnsupportedField {
        field: descriptor.name.clone(),
        tag: descriptor.type_tag.clone(),
    })?;
    let rust_type = if descriptor.nullable {
        format!("Option<{}>", rule.rust_type)
    } else {
        rule.rust_type.to_string()
    };
    Ok(ClassifiedField {
        descriptor: descriptor.clone(),
        classification: Classification {
            widget: rule.widget,
            placements: rule.placements,
            fragment: rule.fragment,
        },
        rust_type,
    })
}

/// Classify every field of a model, in declaration order.
///
/// # Errors
///
/// Fails for the whole model on the first unclassifiable field; callers must
/// not emit partial artifacts.
pub fn classify_model(model: &ModelSchema) -> Result<Vec<ClassifiedField>> {
    model.fields.iter().map(classify).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, tag: &str) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            type_tag: tag.to_string(),
            label: crate::naming::label(name),
            nullable: false,
            default: None,
            relation: None,
        }
    }

    #[test]
    fn classification_is_pure() {
        let field = descriptor("title", "string");
        let first = classify(&field).unwrap();
        let second = classify(&field).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_rule_has_a_distinct_tag() {
        for (i, rule) in RULES.iter().enumerate() {
            assert!(
                RULES.iter().skip(i + 1).all(|other| other.tag != rule.tag),
                "duplicate rule for tag '{}'",
                rule.tag
            );
        }
    }

    #[test]
    fn text_stays_off_list_columns() {
        let classified = classify(&descriptor("body", "text")).unwrap();
        assert!(!classified.classification.appears_on(ViewPlacement::List));
        assert!(classified.classification.appears_on(ViewPlacement::Form));
        assert_eq!(classified.classification.widget, WidgetKind::TextArea);
    }

    #[test]
    fn boolean_maps_to_checkbox_everywhere() {
        let classified = classify(&descriptor("published", "boolean")).unwrap();
        assert_eq!(classified.classification.widget, WidgetKind::Checkbox);
        assert!(classified.classification.appears_on(ViewPlacement::List));
        assert_eq!(classified.rust_type, "bool");
    }

    #[test]
    fn nullable_wraps_rust_type_in_option() {
        let mut field = descriptor("age", "integer");
        field.nullable = true;
        let classified = classify(&field).unwrap();
        assert_eq!(classified.rust_type, "Option<i32>");
    }

    #[test]
    fn reference_selects_nested_widget() {
        let mut field = descriptor("author", "reference");
        field.relation = Some("User".to_string());
        let classified = classify(&field).unwrap();
        assert_eq!(classified.classification.widget, WidgetKind::Select);
        assert_eq!(classified.descriptor.relation.as_deref(), Some("User"));
        assert_eq!(classified.rust_type, "i64");
    }

    #[test]
    fn unknown_tag_is_an_unsupported_input_error() {
        let err = classify(&descriptor("shape", "polygon")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedField { tag, .. } if tag == "polygon"));
    }

    #[test]
    fn one_bad_field_fails_the_whole_model() {
        let model = ModelSchema::new(
            "Gadget",
            None,
            vec![descriptor("name", "string"), descriptor("shape", "polygon")],
        );
        assert!(classify_model(&model).is_err());
    }
}
