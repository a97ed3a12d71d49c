//! Artifact emission
//!
//! Turns a classified model into a [`GenerationPlan`], the full set of
//! rendered artifacts for one model, and writes the plan into the project
//! tree. The plan is built entirely in memory first: if any field fails to
//! classify or any blueprint fails to render, nothing touches the
//! filesystem, so a failed run never leaves a partial scaffold behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde_json::{json, Value};
use walkdir::WalkDir;

use crate::classify::{self, ClassifiedField, ViewPlacement};
use crate::error::{Error, Result};
use crate::naming;
use crate::schema::ModelSchema;

pub mod blueprints;
pub mod markers;

/// Suffix custom HTML blueprints must carry.
const HTML_BLUEPRINT_SUFFIX: &str = ".html.hbs";

/// The kinds of artifact one generation run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Form struct source
    Form,
    /// View handler source
    Views,
    /// URL route table source
    Routes,
    /// HTML page template
    Template,
    /// Integration test source
    Tests,
}

/// One rendered artifact, not yet written.
#[derive(Debug)]
pub struct PlannedArtifact {
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Path relative to the project root
    pub path: PathBuf,
    /// Rendered content
    pub content: String,
    /// Short description for user feedback
    pub description: String,
}

/// Ordered artifacts for one model; created fresh per invocation.
#[derive(Debug)]
pub struct GenerationPlan {
    /// Model the plan was built for
    pub model: String,
    /// Artifacts in emission order
    pub artifacts: Vec<PlannedArtifact>,
}

/// What happened to one planned artifact on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    /// File did not exist and was created
    Created,
    /// File existed; marked regions were replaced
    Merged,
    /// File already had identical content; nothing written
    Unchanged,
}

/// Per-file outcome of [`ArtifactEmitter::write`].
#[derive(Debug)]
pub struct WrittenFile {
    /// Path relative to the project root
    pub path: PathBuf,
    /// Outcome for this file
    pub action: WriteAction,
}

/// Knobs for one generation run.
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Generate only Rust source artifacts
    pub only_source: bool,
    /// Generate only HTML template artifacts
    pub only_templates: bool,
    /// Mount the model at the application root (`/`) as its landing resource
    pub entry_point: bool,
    /// Field names to leave out of generation
    pub exclude: Vec<String>,
    /// Directory of custom `.html.hbs` blueprints replacing the built-ins
    pub blueprint_dir: Option<PathBuf>,
    /// Host project package name, used by generated integration tests
    pub project_name: String,
}

/// Renders and writes CRUD artifacts for classified models.
#[derive(Debug)]
pub struct ArtifactEmitter {
    handlebars: Handlebars<'static>,
    /// HTML page blueprints by name (`list`, `detail`, `form`, or custom)
    pages: BTreeMap<String, String>,
    options: EmitOptions,
}

impl ArtifactEmitter {
    /// Build an emitter, compiling every blueprint up front.
    ///
    /// # Errors
    ///
    /// Returns a blueprint error if any template fails to compile, or
    /// [`Error::EmptyBlueprintDir`] when a custom blueprint directory holds
    /// no `.html.hbs` files.
    pub fn new(options: EmitOptions) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        // Generating code, not HTML-for-browsers; escaping would corrupt it.
        handlebars.register_escape_fn(handlebars::no_escape);

        let sources = [
            ("form_rs", blueprints::FORM_RS),
            ("views_rs", blueprints::VIEWS_RS),
            ("routes_rs", blueprints::ROUTES_RS),
            ("tests_rs", blueprints::TESTS_RS),
        ];
        for (name, source) in sources {
            register(&mut handlebars, name, source)?;
        }
        for (id, source) in blueprints::WIDGET_FRAGMENTS {
            register(&mut handlebars, id, source)?;
        }

        let pages = match &options.blueprint_dir {
            Some(dir) => Self::load_custom_pages(dir)?,
            None => BTreeMap::from([
                ("list".to_string(), blueprints::LIST_HTML.to_string()),
                ("detail".to_string(), blueprints::DETAIL_HTML.to_string()),
                ("form".to_string(), blueprints::FORM_HTML.to_string()),
            ]),
        };
        for (name, source) in &pages {
            register(&mut handlebars, &page_template_id(name), source)?;
        }

        Ok(Self {
            handlebars,
            pages,
            options,
        })
    }

    /// Collect `*.html.hbs` files from a user-supplied blueprint directory.
    fn load_custom_pages(dir: &Path) -> Result<BTreeMap<String, String>> {
        let mut pages = BTreeMap::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| {
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("unreadable blueprint directory"))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(stem) = file_name.strip_suffix(HTML_BLUEPRINT_SUFFIX) {
                let source = fs::read_to_string(entry.path())?;
                pages.insert(stem.to_string(), source);
            }
        }
        if pages.is_empty() {
            return Err(Error::EmptyBlueprintDir(dir.to_path_buf()));
        }
        Ok(pages)
    }

    /// Build the full generation plan for one model.
    ///
    /// # Errors
    ///
    /// Fails without side effects when a field cannot be classified or a
    /// blueprint fails to render.
    pub fn plan(&self, model: &ModelSchema) -> Result<GenerationPlan> {
        let mut kept = model.clone();
        kept.fields.retain(|field| {
            !self
                .options
                .exclude
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&field.name))
        });
        let classified = classify::classify_model(&kept)?;
        let context = self.model_context(&kept, &classified)?;

        let snake = naming::snake(&model.name);
        let mut artifacts = Vec::new();

        if !self.options.only_templates {
            artifacts.push(PlannedArtifact {
                kind: ArtifactKind::Form,
                path: PathBuf::from(format!("src/forms/{snake}.rs")),
                content: self.render("form_rs", &context)?,
                description: format!("form payload for {}", model.name),
            });
            artifacts.push(PlannedArtifact {
                kind: ArtifactKind::Views,
                path: PathBuf::from(format!("src/views/{snake}.rs")),
                content: self.render("views_rs", &context)?,
                description: format!("CRUD handlers for {}", model.name),
            });
            artifacts.push(PlannedArtifact {
                kind: ArtifactKind::Routes,
                path: PathBuf::from(format!("src/routes/{snake}.rs")),
                content: self.render("routes_rs", &context)?,
                description: format!("route table for {}", model.name),
            });
            artifacts.push(PlannedArtifact {
                kind: ArtifactKind::Tests,
                path: PathBuf::from(format!("tests/{snake}_crud.rs")),
                content: self.render("tests_rs", &context)?,
                description: format!("integration tests for {}", model.name),
            });
        }

        if !self.options.only_source {
            for name in self.pages.keys() {
                let path = self.page_output_path(&snake, name);
                artifacts.push(PlannedArtifact {
                    kind: ArtifactKind::Template,
                    path,
                    content: self.render(&page_template_id(name), &context)?,
                    description: format!("{name} page for {}", model.name),
                });
            }
        }

        Ok(GenerationPlan {
            model: model.name.clone(),
            artifacts,
        })
    }

    /// Write a plan into the project tree, merging marked regions where
    /// files already exist. Returns one outcome per artifact.
    ///
    /// # Errors
    ///
    /// Returns write errors (I/O, broken markers) for the offending file.
    pub fn write(&self, project_root: &Path, plan: &GenerationPlan) -> Result<Vec<WrittenFile>> {
        let mut written = Vec::with_capacity(plan.artifacts.len());
        for artifact in &plan.artifacts {
            let full_path = project_root.join(&artifact.path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let action = if full_path.exists() {
                let existing = fs::read_to_string(&full_path)?;
                let merged = markers::merge(&existing, &artifact.content)?;
                if merged == existing {
                    WriteAction::Unchanged
                } else {
                    fs::write(&full_path, merged)?;
                    WriteAction::Merged
                }
            } else {
                fs::write(&full_path, &artifact.content)?;
                WriteAction::Created
            };
            written.push(WrittenFile {
                path: artifact.path.clone(),
                action,
            });
        }
        Ok(written)
    }

    /// Output path for an HTML page artifact.
    fn page_output_path(&self, snake: &str, page: &str) -> PathBuf {
        // An entry-point resource owns the template root, and its list page
        // becomes the index.
        if self.options.entry_point {
            let name = if page == "list" { "index" } else { page };
            PathBuf::from(format!("templates/{name}.html"))
        } else {
            PathBuf::from(format!("templates/{snake}/{page}.html"))
        }
    }

    fn render(&self, name: &str, context: &Value) -> Result<String> {
        self.handlebars
            .render(name, context)
            .map_err(|source| Error::Render {
                name: name.to_string(),
                source: Box::new(source),
            })
    }

    /// Assemble the template context for one model.
    fn model_context(&self, model: &ModelSchema, classified: &[ClassifiedField]) -> Result<Value> {
        let snake = naming::snake(&model.name);
        let table = model.plural.clone();
        let base = format!("/{}", naming::kebab(&table));
        let entry = self.options.entry_point;

        let list_path = if entry { "/".to_string() } else { base.clone() };
        let new_path = if entry { "/new".to_string() } else { format!("{base}/new") };
        let item_path = if entry { "/{id}".to_string() } else { format!("{base}/{{id}}") };
        let edit_path = format!("{item_path}/edit");
        let delete_path = format!("{item_path}/delete");

        // Literal Askama expressions, injected so blueprints never have to
        // spell double braces themselves.
        let id_expr = format!("{{{{ {snake}.id }}}}");
        let detail_url_expr = if entry {
            format!("/{id_expr}")
        } else {
            format!("{base}/{id_expr}")
        };
        let edit_url_expr = format!("{detail_url_expr}/edit");
        let delete_url_expr = format!("{detail_url_expr}/delete");

        let (list_template_path, detail_template_path, form_template_path) = if entry {
            ("index.html".to_string(), "detail.html".to_string(), "form.html".to_string())
        } else {
            (
                format!("{snake}/list.html"),
                format!("{snake}/detail.html"),
                format!("{snake}/form.html"),
            )
        };

        let fields = classified
            .iter()
            .map(|field| self.field_context(&snake, field))
            .collect::<Result<Vec<_>>>()?;
        let on = |placement: ViewPlacement| -> Vec<Value> {
            classified
                .iter()
                .zip(&fields)
                .filter(|(f, _)| f.classification.appears_on(placement))
                .map(|(_, ctx)| ctx.clone())
                .collect()
        };
        let list_fields = on(ViewPlacement::List);
        let detail_fields = on(ViewPlacement::Detail);
        let form_fields = on(ViewPlacement::Form);

        let insert_columns = form_fields
            .iter()
            .filter_map(|f| f["name"].as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let insert_placeholders = vec!["?"; form_fields.len()].join(", ");
        let update_assignments = form_fields
            .iter()
            .filter_map(|f| f["name"].as_str())
            .map(|name| format!("{name} = ?"))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(json!({
            "model_name": model.name,
            "model_snake": snake,
            "model_title": naming::title(&model.name),
            "plural_title": naming::plural_title(&model.name),
            "table_name": table,
            "project_snake": self.options.project_name.replace('-', "_"),
            "list_path": list_path,
            "new_path": new_path,
            "item_path": item_path,
            "edit_path": edit_path,
            "delete_path": delete_path,
            "list_template_path": list_template_path,
            "detail_template_path": detail_template_path,
            "form_template_path": form_template_path,
            "detail_url_expr": detail_url_expr,
            "edit_url_expr": edit_url_expr,
            "delete_url_expr": delete_url_expr,
            "action_expr": "{{ action }}",
            "insert_columns": insert_columns,
            "insert_placeholders": insert_placeholders,
            "update_assignments": update_assignments,
            "fields": fields,
            "list_fields": list_fields,
            "detail_fields": detail_fields,
            "form_fields": form_fields,
        }))
    }

    /// Context for one field, including its pre-rendered widget markup.
    fn field_context(&self, model_snake: &str, field: &ClassifiedField) -> Result<Value> {
        let descriptor = &field.descriptor;
        let step = match descriptor.type_tag.as_str() {
            "integer" | "bigint" => Some("1"),
            "float" | "double" | "decimal" => Some("any"),
            _ => None,
        };
        let target_title = descriptor.relation.as_deref().map(naming::title);
        let mut context = json!({
            "name": descriptor.name,
            "label": descriptor.label,
            "rust_type": field.rust_type,
            "nullable": descriptor.nullable,
            "default": descriptor.default,
            "fragment": field.classification.fragment,
            "value_expr": format!("{{{{ {model_snake}.{} }}}}", descriptor.name),
            "step": step,
            "target": descriptor.relation,
            "target_title": target_title,
        });
        let input_html = self.render(field.classification.fragment, &context)?;
        context["input_html"] = Value::String(input_html);
        Ok(context)
    }
}

fn page_template_id(name: &str) -> String {
    format!("page_{name}")
}

fn register(handlebars: &mut Handlebars<'static>, name: &str, source: &str) -> Result<()> {
    handlebars
        .register_template_string(name, source)
        .map_err(|source| Error::Blueprint {
            name: name.to_string(),
            source: Box::new(source),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;

    fn field(name: &str, tag: &str) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            type_tag: tag.to_string(),
            label: naming::label(name),
            nullable: false,
            default: None,
            relation: None,
        }
    }

    fn article_model() -> ModelSchema {
        ModelSchema::new(
            "Article",
            None,
            vec![field("title", "text"), field("published", "boolean")],
        )
    }

    fn emitter() -> ArtifactEmitter {
        ArtifactEmitter::new(EmitOptions {
            project_name: "demo-app".to_string(),
            ..EmitOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn plan_covers_all_artifact_kinds() {
        let plan = emitter().plan(&article_model()).unwrap();
        let kinds: Vec<_> = plan.artifacts.iter().map(|a| a.kind).collect();
        assert!(kinds.contains(&ArtifactKind::Form));
        assert!(kinds.contains(&ArtifactKind::Views));
        assert!(kinds.contains(&ArtifactKind::Routes));
        assert!(kinds.contains(&ArtifactKind::Tests));
        assert_eq!(
            kinds.iter().filter(|k| **k == ArtifactKind::Template).count(),
            3
        );
    }

    #[test]
    fn form_artifact_exposes_one_widget_per_form_field() {
        let plan = emitter().plan(&article_model()).unwrap();
        let form_page = plan
            .artifacts
            .iter()
            .find(|a| a.path.ends_with("article/form.html"))
            .unwrap();
        assert!(form_page.content.contains("<textarea id=\"title\""));
        assert!(form_page.content.contains("type=\"checkbox\" id=\"published\""));
    }

    #[test]
    fn views_artifact_exposes_full_crud() {
        let plan = emitter().plan(&article_model()).unwrap();
        let views = plan
            .artifacts
            .iter()
            .find(|a| a.kind == ArtifactKind::Views)
            .unwrap();
        for handler in ["pub async fn list", "pub async fn detail", "pub async fn create", "pub async fn update", "pub async fn destroy"] {
            assert!(views.content.contains(handler), "missing {handler}");
        }
        assert!(views.content.contains("pub struct Article"));
        assert!(views.content.contains("pub title: String"));
        assert!(views.content.contains("pub published: bool"));
    }

    #[test]
    fn routes_artifact_mounts_the_resource() {
        let plan = emitter().plan(&article_model()).unwrap();
        let routes = plan
            .artifacts
            .iter()
            .find(|a| a.kind == ArtifactKind::Routes)
            .unwrap();
        assert!(routes.content.contains("\"/articles\""));
        assert!(routes.content.contains("\"/articles/{id}\""));
        assert!(routes.content.contains("views::article::destroy"));
    }

    #[test]
    fn list_page_skips_long_form_content() {
        let plan = emitter().plan(&article_model()).unwrap();
        let list_page = plan
            .artifacts
            .iter()
            .find(|a| a.path.ends_with("article/list.html"))
            .unwrap();
        // `text` fields are detail/form only; `boolean` shows as a column.
        assert!(!list_page.content.contains("<th>Title</th>"));
        assert!(list_page.content.contains("<th>Published</th>"));
        assert!(list_page.content.contains("{% for article in articles %}"));
        assert!(list_page.content.contains("{{ article.published }}"));
    }

    #[test]
    fn generated_sql_matches_form_fields() {
        let plan = emitter().plan(&article_model()).unwrap();
        let views = plan
            .artifacts
            .iter()
            .find(|a| a.kind == ArtifactKind::Views)
            .unwrap();
        assert!(views
            .content
            .contains("INSERT INTO articles (title, published) VALUES (?, ?)"));
        assert!(views
            .content
            .contains("UPDATE articles SET title = ?, published = ? WHERE id = ?"));
    }

    #[test]
    fn unsupported_field_aborts_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let model = ModelSchema::new(
            "Gadget",
            None,
            vec![field("name", "string"), field("shape", "polygon")],
        );
        let err = emitter().plan(&model).unwrap_err();
        assert!(matches!(err, Error::UnsupportedField { .. }));
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn write_then_rewrite_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = emitter();
        let plan = emitter.plan(&article_model()).unwrap();

        let first = emitter.write(dir.path(), &plan).unwrap();
        assert!(first.iter().all(|w| w.action == WriteAction::Created));

        let second = emitter.write(dir.path(), &plan).unwrap();
        assert!(second.iter().all(|w| w.action == WriteAction::Unchanged));
    }

    #[test]
    fn rewrite_preserves_hand_written_code() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = emitter();
        let plan = emitter.plan(&article_model()).unwrap();
        emitter.write(dir.path(), &plan).unwrap();

        let form_path = dir.path().join("src/forms/article.rs");
        let mut edited = fs::read_to_string(&form_path).unwrap();
        edited.push_str("\nimpl ArticleForm {\n    pub fn validate(&self) {}\n}\n");
        fs::write(&form_path, &edited).unwrap();

        let written = emitter.write(dir.path(), &plan).unwrap();
        let form_outcome = written
            .iter()
            .find(|w| w.path.ends_with("src/forms/article.rs"))
            .unwrap();
        assert_eq!(form_outcome.action, WriteAction::Unchanged);
        assert!(fs::read_to_string(&form_path)
            .unwrap()
            .contains("pub fn validate"));
    }

    #[test]
    fn excluded_fields_are_left_out() {
        let emitter = ArtifactEmitter::new(EmitOptions {
            exclude: vec!["published".to_string()],
            project_name: "demo-app".to_string(),
            ..EmitOptions::default()
        })
        .unwrap();
        let plan = emitter.plan(&article_model()).unwrap();
        let form = plan
            .artifacts
            .iter()
            .find(|a| a.kind == ArtifactKind::Form)
            .unwrap();
        assert!(form.content.contains("pub title: String"));
        assert!(!form.content.contains("published"));
    }

    #[test]
    fn only_templates_skips_source_artifacts() {
        let emitter = ArtifactEmitter::new(EmitOptions {
            only_templates: true,
            project_name: "demo-app".to_string(),
            ..EmitOptions::default()
        })
        .unwrap();
        let plan = emitter.plan(&article_model()).unwrap();
        assert!(plan.artifacts.iter().all(|a| a.kind == ArtifactKind::Template));
    }

    #[test]
    fn entry_point_owns_the_root_path() {
        let emitter = ArtifactEmitter::new(EmitOptions {
            entry_point: true,
            project_name: "demo-app".to_string(),
            ..EmitOptions::default()
        })
        .unwrap();
        let plan = emitter.plan(&article_model()).unwrap();
        let routes = plan
            .artifacts
            .iter()
            .find(|a| a.kind == ArtifactKind::Routes)
            .unwrap();
        assert!(routes.content.contains("\"/\""));
        assert!(routes.content.contains("\"/{id}\""));
        assert!(plan
            .artifacts
            .iter()
            .any(|a| a.path == PathBuf::from("templates/index.html")));
    }

    #[test]
    fn custom_blueprints_replace_builtin_pages() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("card.html.hbs"),
            "<div class=\"card\">{{model_title}}</div>\n",
        )
        .unwrap();
        let emitter = ArtifactEmitter::new(EmitOptions {
            blueprint_dir: Some(dir.path().to_path_buf()),
            project_name: "demo-app".to_string(),
            ..EmitOptions::default()
        })
        .unwrap();
        let plan = emitter.plan(&article_model()).unwrap();
        let templates: Vec<_> = plan
            .artifacts
            .iter()
            .filter(|a| a.kind == ArtifactKind::Template)
            .collect();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].path, PathBuf::from("templates/article/card.html"));
        assert!(templates[0].content.contains("Article"));
    }

    #[test]
    fn empty_blueprint_dir_is_a_resolution_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArtifactEmitter::new(EmitOptions {
            blueprint_dir: Some(dir.path().to_path_buf()),
            ..EmitOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::EmptyBlueprintDir(_)));
    }
}
