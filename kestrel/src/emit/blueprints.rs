//! Built-in artifact blueprints
//!
//! Handlebars sources for every generated artifact, plus the per-widget
//! fragments the form blueprint is assembled from. Values that must land in
//! the output as literal Askama expressions (`{{ post.title }}`) are injected
//! through context variables, never written here, so the two template
//! languages cannot collide.

/// Form struct blueprint -> `src/forms/{model}.rs`
pub const FORM_RS: &str = r"// kestrel:begin:imports
use serde::{Deserialize, Serialize};
// kestrel:end:imports

// kestrel:begin:form
/// Form payload for creating or updating a {{model_title}}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct {{model_name}}Form {
{{#each form_fields}}    pub {{name}}: {{rust_type}},
{{/each}}}
// kestrel:end:form
";

/// View handlers blueprint -> `src/views/{model}.rs`
pub const VIEWS_RS: &str = r#"// kestrel:begin:imports
use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::forms::{{model_snake}}::{{model_name}}Form;
use crate::state::AppState;
// kestrel:end:imports

// kestrel:begin:model
/// A {{model_title}} row as stored by the application.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct {{model_name}} {
    pub id: i64,
{{#each fields}}    pub {{name}}: {{rust_type}},
{{/each}}}
// kestrel:end:model

// kestrel:begin:views
#[derive(Template)]
#[template(path = "{{list_template_path}}")]
struct ListTemplate {
    {{table_name}}: Vec<{{model_name}}>,
}

#[derive(Template)]
#[template(path = "{{detail_template_path}}")]
struct DetailTemplate {
    {{model_snake}}: {{model_name}},
}

#[derive(Template)]
#[template(path = "{{form_template_path}}")]
struct FormTemplate {
    action: String,
}

/// GET {{list_path}}
pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let {{table_name}} = sqlx::query_as::<_, {{model_name}}>("SELECT * FROM {{table_name}} ORDER BY id DESC")
        .fetch_all(&state.db)
        .await?;
    let page = ListTemplate { {{table_name}} };
    Ok(Html(page.render()?))
}

/// GET {{item_path}}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let {{model_snake}} = sqlx::query_as::<_, {{model_name}}>("SELECT * FROM {{table_name}} WHERE id = ?")
        .bind(id)
        .fetch_one(&state.db)
        .await?;
    let page = DetailTemplate { {{model_snake}} };
    Ok(Html(page.render()?))
}

/// GET {{new_path}}
pub async fn new_form() -> Result<Html<String>, AppError> {
    let page = FormTemplate { action: "{{list_path}}".to_string() };
    Ok(Html(page.render()?))
}

/// POST {{list_path}}
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<{{model_name}}Form>,
) -> Result<Redirect, AppError> {
    sqlx::query("INSERT INTO {{table_name}} ({{insert_columns}}) VALUES ({{insert_placeholders}})")
{{#each form_fields}}        .bind(form.{{name}})
{{/each}}        .execute(&state.db)
        .await?;
    Ok(Redirect::to("{{list_path}}"))
}

/// GET {{edit_path}}
pub async fn edit_form(Path(id): Path<i64>) -> Result<Html<String>, AppError> {
    let page = FormTemplate { action: format!("{{edit_path}}") };
    Ok(Html(page.render()?))
}

/// POST {{edit_path}}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<{{model_name}}Form>,
) -> Result<Redirect, AppError> {
    sqlx::query("UPDATE {{table_name}} SET {{update_assignments}} WHERE id = ?")
{{#each form_fields}}        .bind(form.{{name}})
{{/each}}        .bind(id)
        .execute(&state.db)
        .await?;
    Ok(Redirect::to(&format!("{{item_path}}")))
}

/// POST {{delete_path}}
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    sqlx::query("DELETE FROM {{table_name}} WHERE id = ?")
        .bind(id)
        .execute(&state.db)
        .await?;
    Ok(Redirect::to("{{list_path}}"))
}
// kestrel:end:views
"#;

/// Route table blueprint -> `src/routes/{model}.rs`
pub const ROUTES_RS: &str = r#"// kestrel:begin:imports
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;
use crate::views;
// kestrel:end:imports

// kestrel:begin:routes
/// Route table for {{model_title}}: list, detail, create, update, delete.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("{{list_path}}", get(views::{{model_snake}}::list).post(views::{{model_snake}}::create))
        .route("{{new_path}}", get(views::{{model_snake}}::new_form))
        .route("{{item_path}}", get(views::{{model_snake}}::detail))
        .route("{{edit_path}}", get(views::{{model_snake}}::edit_form).post(views::{{model_snake}}::update))
        .route("{{delete_path}}", post(views::{{model_snake}}::destroy))
}
// kestrel:end:routes
"#;

/// Integration test blueprint -> `tests/{model}_crud.rs`
pub const TESTS_RS: &str = r#"// kestrel:begin:imports
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use {{project_snake}}::routes;
use {{project_snake}}::state::AppState;
// kestrel:end:imports

// kestrel:begin:tests
#[tokio::test]
async fn {{model_snake}}_list_responds() {
    let state = AppState::for_tests().await;
    let app = routes::{{model_snake}}::routes().with_state(state);

    let response = app
        .oneshot(Request::builder().uri("{{list_path}}").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn {{model_snake}}_new_form_responds() {
    let state = AppState::for_tests().await;
    let app = routes::{{model_snake}}::routes().with_state(state);

    let response = app
        .oneshot(Request::builder().uri("{{new_path}}").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
// kestrel:end:tests
"#;

/// List page blueprint -> `templates/{model}/list.html`
pub const LIST_HTML: &str = r#"{% extends "layouts/base.html" %}

{% block content %}
<!-- kestrel:begin:content -->
<h1>{{plural_title}}</h1>
<p><a href="{{new_path}}">New {{model_title}}</a></p>
<table>
  <thead>
    <tr>
{{#each list_fields}}      <th>{{label}}</th>
{{/each}}      <th></th>
    </tr>
  </thead>
  <tbody>
    {% for {{model_snake}} in {{table_name}} %}
    <tr>
{{#each list_fields}}      <td>{{value_expr}}</td>
{{/each}}      <td><a href="{{detail_url_expr}}">View</a></td>
    </tr>
    {% endfor %}
  </tbody>
</table>
<!-- kestrel:end:content -->
{% endblock %}
"#;

/// Detail page blueprint -> `templates/{model}/detail.html`
pub const DETAIL_HTML: &str = r#"{% extends "layouts/base.html" %}

{% block content %}
<!-- kestrel:begin:content -->
<h1>{{model_title}}</h1>
<dl>
{{#each detail_fields}}  <dt>{{label}}</dt>
  <dd>{{value_expr}}</dd>
{{/each}}</dl>
<p>
  <a href="{{edit_url_expr}}">Edit</a>
  <a href="{{list_path}}">Back</a>
</p>
<form method="post" action="{{delete_url_expr}}">
  <button type="submit">Delete</button>
</form>
<!-- kestrel:end:content -->
{% endblock %}
"#;

/// Create/update form page blueprint -> `templates/{model}/form.html`
pub const FORM_HTML: &str = r#"{% extends "layouts/base.html" %}

{% block content %}
<!-- kestrel:begin:content -->
<h1>{{model_title}}</h1>
<form method="post" action="{{action_expr}}">
{{#each form_fields}}  <p>
{{input_html}}  </p>
{{/each}}  <button type="submit">Save</button>
</form>
<!-- kestrel:end:content -->
{% endblock %}
"#;

/// Widget fragments, keyed by the fragment ids in the classification table.
pub const WIDGET_FRAGMENTS: &[(&str, &str)] = &[
    (
        "text_input",
        r#"    <label for="{{name}}">{{label}}</label>
    <input type="text" id="{{name}}" name="{{name}}"{{#unless nullable}} required{{/unless}}>
"#,
    ),
    (
        "text_area",
        r#"    <label for="{{name}}">{{label}}</label>
    <textarea id="{{name}}" name="{{name}}" rows="10"{{#unless nullable}} required{{/unless}}></textarea>
"#,
    ),
    (
        "email_input",
        r#"    <label for="{{name}}">{{label}}</label>
    <input type="email" id="{{name}}" name="{{name}}"{{#unless nullable}} required{{/unless}}>
"#,
    ),
    (
        "url_input",
        r#"    <label for="{{name}}">{{label}}</label>
    <input type="url" id="{{name}}" name="{{name}}"{{#unless nullable}} required{{/unless}}>
"#,
    ),
    (
        "number_input",
        r#"    <label for="{{name}}">{{label}}</label>
    <input type="number" id="{{name}}" name="{{name}}" step="{{step}}"{{#unless nullable}} required{{/unless}}>
"#,
    ),
    (
        "checkbox",
        r#"    <label for="{{name}}">
      <input type="checkbox" id="{{name}}" name="{{name}}" value="true">
      {{label}}
    </label>
"#,
    ),
    (
        "date_input",
        r#"    <label for="{{name}}">{{label}}</label>
    <input type="date" id="{{name}}" name="{{name}}"{{#unless nullable}} required{{/unless}}>
"#,
    ),
    (
        "time_input",
        r#"    <label for="{{name}}">{{label}}</label>
    <input type="time" id="{{name}}" name="{{name}}"{{#unless nullable}} required{{/unless}}>
"#,
    ),
    (
        "datetime_input",
        r#"    <label for="{{name}}">{{label}}</label>
    <input type="datetime-local" id="{{name}}" name="{{name}}"{{#unless nullable}} required{{/unless}}>
"#,
    ),
    (
        "json_editor",
        r#"    <label for="{{name}}">{{label}}</label>
    <textarea id="{{name}}" name="{{name}}" rows="10" class="json-editor"{{#unless nullable}} required{{/unless}}></textarea>
"#,
    ),
    (
        "select",
        r#"    <label for="{{name}}">{{label}}</label>
    <select id="{{name}}" name="{{name}}"{{#unless nullable}} required{{/unless}}>
      <option value="">Choose a {{target_title}}</option>
    </select>
"#,
    ),
];
