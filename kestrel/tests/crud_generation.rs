//! End-to-end generation: bootstrap a project, declare models, generate CRUD.

use std::fs;
use std::path::Path;

use kestrel::project::ProjectTemplate;
use kestrel::{
    ArtifactEmitter, EmitOptions, Error, ManifestSchemaProvider, ModelSchemaProvider, WriteAction,
};

const MANIFEST: &str = r#"
[[model]]
name = "Article"

[[model.field]]
name = "title"
type = "string"

[[model.field]]
name = "body"
type = "text"

[[model.field]]
name = "published"
type = "boolean"
"#;

fn bootstrap(manifest: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    ProjectTemplate::new("demo").generate(dir.path()).unwrap();
    fs::write(dir.path().join("kestrel.toml"), manifest).unwrap();
    dir
}

fn emitter_for(root: &Path) -> ArtifactEmitter {
    ArtifactEmitter::new(EmitOptions {
        project_name: kestrel::project::package_name(root).unwrap(),
        ..EmitOptions::default()
    })
    .unwrap()
}

#[test]
fn generates_the_full_artifact_set() {
    let dir = bootstrap(MANIFEST);
    let provider = ManifestSchemaProvider::discover(dir.path()).unwrap();
    let model = provider.model("Article").unwrap();

    let emitter = emitter_for(dir.path());
    let plan = emitter.plan(&model).unwrap();
    let written = emitter.write(dir.path(), &plan).unwrap();

    assert!(written.iter().all(|f| f.action == WriteAction::Created));
    for path in [
        "src/forms/article.rs",
        "src/views/article.rs",
        "src/routes/article.rs",
        "tests/article_crud.rs",
        "templates/article/list.html",
        "templates/article/detail.html",
        "templates/article/form.html",
    ] {
        assert!(dir.path().join(path).exists(), "missing {path}");
    }

    let views = fs::read_to_string(dir.path().join("src/views/article.rs")).unwrap();
    assert!(views.contains("pub struct Article"));
    assert!(views.contains("pub title: String"));
    assert!(views.contains("pub published: bool"));
    // text fields stay off the list page
    let list = fs::read_to_string(dir.path().join("templates/article/list.html")).unwrap();
    assert!(list.contains("title"));
    assert!(!list.contains("article.body"));
}

#[test]
fn every_manifest_model_can_be_generated_in_one_run() {
    let dir = bootstrap(
        r#"
[[model]]
name = "Post"

[[model.field]]
name = "title"
type = "string"

[[model]]
name = "Comment"

[[model.field]]
name = "post"
type = "reference"
references = "Post"
"#,
    );
    let provider = ManifestSchemaProvider::discover(dir.path()).unwrap();
    let emitter = emitter_for(dir.path());

    let models = provider.models().unwrap();
    assert_eq!(models.len(), 2);
    for model in &models {
        let plan = emitter.plan(model).unwrap();
        emitter.write(dir.path(), &plan).unwrap();
    }

    for path in [
        "src/views/post.rs",
        "src/routes/post.rs",
        "templates/post/list.html",
        "src/views/comment.rs",
        "src/routes/comment.rs",
        "templates/comment/form.html",
    ] {
        assert!(dir.path().join(path).exists(), "missing {path}");
    }
    let form = fs::read_to_string(dir.path().join("templates/comment/form.html")).unwrap();
    assert!(form.contains("<select id=\"post\""));
}

#[test]
fn regeneration_is_a_no_op() {
    let dir = bootstrap(MANIFEST);
    let provider = ManifestSchemaProvider::discover(dir.path()).unwrap();
    let model = provider.model("Article").unwrap();
    let emitter = emitter_for(dir.path());
    let plan = emitter.plan(&model).unwrap();

    emitter.write(dir.path(), &plan).unwrap();
    let second = emitter.write(dir.path(), &plan).unwrap();
    assert!(second.iter().all(|f| f.action == WriteAction::Unchanged));
}

#[test]
fn hand_written_code_outside_regions_survives() {
    let dir = bootstrap(MANIFEST);
    let provider = ManifestSchemaProvider::discover(dir.path()).unwrap();
    let model = provider.model("Article").unwrap();
    let emitter = emitter_for(dir.path());
    let plan = emitter.plan(&model).unwrap();
    emitter.write(dir.path(), &plan).unwrap();

    let form_path = dir.path().join("src/forms/article.rs");
    let mut form = fs::read_to_string(&form_path).unwrap();
    form.push_str("\nfn my_custom_validation() {}\n");
    fs::write(&form_path, &form).unwrap();

    let written = emitter.write(dir.path(), &plan).unwrap();
    let entry = written
        .iter()
        .find(|f| f.path == Path::new("src/forms/article.rs"))
        .unwrap();
    assert_eq!(entry.action, WriteAction::Unchanged);
    let after = fs::read_to_string(&form_path).unwrap();
    assert!(after.contains("fn my_custom_validation"));
}

#[test]
fn unsupported_field_aborts_before_any_write() {
    let dir = bootstrap(
        r#"
[[model]]
name = "Widget"

[[model.field]]
name = "name"
type = "string"

[[model.field]]
name = "blob"
type = "binary"
"#,
    );
    let provider = ManifestSchemaProvider::discover(dir.path()).unwrap();
    let err = provider.model("Widget").unwrap_err();
    assert!(matches!(err, Error::UnsupportedField { .. }));
    assert!(!dir.path().join("src/forms/widget.rs").exists());
}

#[test]
fn entry_point_mounts_templates_at_the_root() {
    let dir = bootstrap(MANIFEST);
    let provider = ManifestSchemaProvider::discover(dir.path()).unwrap();
    let model = provider.model("Article").unwrap();

    let emitter = ArtifactEmitter::new(EmitOptions {
        project_name: "demo".to_string(),
        entry_point: true,
        ..EmitOptions::default()
    })
    .unwrap();
    let plan = emitter.plan(&model).unwrap();
    emitter.write(dir.path(), &plan).unwrap();

    assert!(dir.path().join("templates/index.html").exists());
    assert!(dir.path().join("templates/detail.html").exists());
    let routes = fs::read_to_string(dir.path().join("src/routes/article.rs")).unwrap();
    assert!(routes.contains("\"/\""));
    assert!(routes.contains("\"/{id}\""));
}
