//! Fixtures shared by command tests: a temp project and a fake RPC server

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::cli::GlobalArgs;

/// Queries received by the fake server, in arrival order
#[derive(Clone, Default)]
pub(crate) struct Received {
    queries: Arc<Mutex<Vec<String>>>,
    keys: Arc<Mutex<Vec<String>>>,
}

impl Received {
    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

/// Accepts every query except those containing `BROKEN`
async fn exec_sql(
    State(received): State<Received>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, String) {
    let query = body["query"].as_str().unwrap_or_default().to_string();
    let key = headers
        .get("apikey")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    received.keys.lock().unwrap().push(key);
    received.queries.lock().unwrap().push(query.clone());

    if query.contains("BROKEN") {
        (
            StatusCode::BAD_REQUEST,
            r#"{"code":"42P01","message":"relation \"broken\" does not exist"}"#.to_string(),
        )
    } else {
        (StatusCode::NO_CONTENT, String::new())
    }
}

/// Start the fake server and return its base URL
pub(crate) async fn spawn_rpc_server() -> (String, Received) {
    let received = Received::default();
    let app = Router::new()
        .route("/rest/v1/rpc/exec_sql", post(exec_sql))
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}

/// Create a project with `migrun.yml` and the given migration files
pub(crate) fn project(config_yaml: &str, files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("migrun.yml"), config_yaml).unwrap();
    let migrations = dir.path().join("migrations");
    fs::create_dir_all(&migrations).unwrap();
    for (name, sql) in files {
        fs::write(migrations.join(name), sql).unwrap();
    }
    dir
}

pub(crate) fn global_args(project_dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.to_path_buf(),
        config: None,
        target: None,
    }
}
