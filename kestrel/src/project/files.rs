//! Starter project file contents

/// Cargo.toml for new projects
pub const CARGO_TOML: &str = r#"[package]
name = "{{project_name}}"
version = "0.1.0"
edition = "2021"
rust-version = "1.75"

[dependencies]
axum = "0.8"
tokio = { version = "1", features = ["full"] }
askama = "0.12"
serde = { version = "1", features = ["derive"] }
serde_json = "1"
sqlx = { version = "0.8", features = ["runtime-tokio", "sqlite", "chrono", "uuid", "json"] }
chrono = { version = "0.4", features = ["serde"] }
uuid = { version = "1", features = ["v4", "serde"] }
rust_decimal = "1"
thiserror = "2"
anyhow = "1"
tracing = "0.1"
tracing-subscriber = { version = "0.3", features = ["env-filter"] }

[dev-dependencies]
tower = { version = "0.5", features = ["util"] }
http-body-util = "0.1"
"#;

/// README.md for new projects
pub const README_MD: &str = r"# {{project_name}}

A server-rendered web application scaffolded with kestrel.

## Quick Start

1. Start the development build:
   ```bash
   cargo run
   ```

2. Open http://127.0.0.1:3000

## Working with models

Declare models in `kestrel.toml`, then generate their CRUD surface:

```bash
kestrel crud Post
```

That emits a form payload, view handlers, a route table, page templates,
and integration tests for the model. Regeneration only replaces the marked
regions of each file, so code you add outside the markers is safe.

To pick up starter-template updates later:

```bash
kestrel sync
```
";

/// .gitignore for new projects
pub const GITIGNORE: &str = r"/target
*.db
.env
";

/// kestrel.toml model registry seed
pub const MANIFEST_SEED: &str = r#"# Model registry for `kestrel crud`.
#
# Models and fields are arrays of tables; declaration order is generation
# order. Supported field types: string, text, slug, email, url, integer,
# bigint, float, double, decimal, boolean, date, time, datetime, json,
# uuid, reference.
#
# [[model]]
# name = "Post"
#
# [[model.field]]
# name = "title"
# type = "string"
#
# [[model.field]]
# name = "body"
# type = "text"
#
# [[model.field]]
# name = "published"
# type = "boolean"
"#;

/// src/main.rs for new projects
pub const MAIN_RS: &str = r#"//! {{project_name}} entry point

use anyhow::Result;
use {{project_snake}}::routes;
use {{project_snake}}::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let state = AppState::new("sqlite:{{project_snake}}.db").await?;
    let app = routes::routes().with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("listening on http://127.0.0.1:3000");
    axum::serve(listener, app).await?;

    Ok(())
}
"#;

/// src/lib.rs for new projects
pub const LIB_RS: &str = r"//! {{project_title}} application library

pub mod error;
pub mod forms;
pub mod routes;
pub mod state;
pub mod views;
";

/// src/error.rs for new projects
pub const ERROR_RS: &str = r#"//! Application error type

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Template rendering failure
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "something went wrong").into_response()
    }
}
"#;

/// src/state.rs for new projects
pub const STATE_RS: &str = r#"//! Shared application state

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Connect to the application database.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let db = SqlitePoolOptions::new().connect(database_url).await?;
        Ok(Self { db })
    }

    /// In-memory database for tests.
    pub async fn for_tests() -> Self {
        let db = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        Self { db }
    }
}
"#;

/// src/forms/mod.rs for new projects
pub const FORMS_MOD: &str = r"//! Form payloads
//!
//! `kestrel crud` generates one module per model here; register each with a
//! `pub mod` line.
";

/// src/views/mod.rs for new projects
pub const VIEWS_MOD: &str = r"//! View handlers
//!
//! `kestrel crud` generates one module per model here; register each with a
//! `pub mod` line.

pub mod home;
";

/// src/views/home.rs for new projects
pub const VIEWS_HOME: &str = r#"//! Home page

use askama::Template;
use axum::response::Html;

use crate::error::AppError;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate;

/// GET /
pub async fn index() -> Result<Html<String>, AppError> {
    Ok(Html(HomeTemplate.render()?))
}
"#;

/// src/routes/mod.rs for new projects
pub const ROUTES_MOD: &str = r#"//! Route registration
//!
//! Generated route tables live in sibling modules; merge each into the
//! top-level router below.

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::views;

/// Top-level router for the application.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(views::home::index))
}
"#;

/// templates/layouts/base.html for new projects
pub const TEMPLATE_BASE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{project_title}}</title>
    <link rel="stylesheet" href="/static/css/app.css">
  </head>
  <body>
    <main>
      {% block content %}{% endblock %}
    </main>
  </body>
</html>
"#;

/// templates/home.html for new projects
pub const TEMPLATE_HOME: &str = r#"{% extends "layouts/base.html" %}

{% block content %}
<h1>{{project_title}}</h1>
<p>Declare models in <code>kestrel.toml</code>, then run
<code>kestrel crud &lt;Model&gt;</code> to scaffold them.</p>
{% endblock %}
"#;

/// static/css/app.css for new projects
pub const STATIC_CSS: &str = r"body {
  margin: 0 auto;
  max-width: 60rem;
  padding: 2rem;
  font-family: system-ui, sans-serif;
  line-height: 1.5;
}

table {
  border-collapse: collapse;
  width: 100%;
}

th, td {
  border-bottom: 1px solid #ddd;
  padding: 0.5rem;
  text-align: left;
}

label {
  display: block;
  font-weight: 600;
}

input, textarea, select {
  margin: 0.25rem 0 1rem;
  padding: 0.4rem;
  width: 100%;
  box-sizing: border-box;
}
";
