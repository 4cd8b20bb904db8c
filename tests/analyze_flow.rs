// tests/analyze_flow.rs
//
// Upload/analysis flow against a local mock backend.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

use explainit::api::ApiClient;
use explainit::controller::{AnalysisOutcome, SessionController};
use explainit::repl::render;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn controller_for(addr: SocketAddr) -> SessionController {
    SessionController::new(ApiClient::new(format!("http://{}", addr)))
}

fn sample_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("sample")
        .suffix(".py")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn sample_analysis() -> Value {
    json!({
        "functions": [
            {
                "name": "parse",
                "line_number": 12,
                "parameter_count": 2,
                "risk_score": {"risk_level": "high", "risk_reason": "uses eval"}
            },
            {
                "name": "emit",
                "line_number": 30,
                "parameter_count": 1,
                "risk_score": {"risk_level": "low", "risk_reason": "no risky calls"}
            }
        ],
        "source_code": "def parse(a, b):\n    return eval(a)\n"
    })
}

#[tokio::test]
async fn analyze_renders_each_function_in_order() {
    let app = Router::new().route("/analyze", post(|| async { Json(sample_analysis()) }));
    let addr = serve(app).await;
    let mut controller = controller_for(addr);

    let file = sample_file("def parse(a, b): ...\n");
    let outcome = controller.open(file.path()).await.unwrap();
    assert!(matches!(
        outcome,
        AnalysisOutcome::Ready { function_count: 2 }
    ));

    let names: Vec<&str> = controller
        .session()
        .functions()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["parse", "emit"]);

    let listing = render::function_list(controller.session().analysis().unwrap());
    assert!(listing.contains("parse()"));
    assert!(listing.contains("Line: 12 | Params: 2"));
    assert!(listing.contains("[HIGH]"));
    assert!(listing.contains("uses eval"));
}

#[tokio::test]
async fn analyze_empty_function_list_is_the_empty_state() {
    let app = Router::new().route(
        "/analyze",
        post(|| async { Json(json!({"functions": []})) }),
    );
    let addr = serve(app).await;
    let mut controller = controller_for(addr);

    let file = sample_file("# nothing here\n");
    let outcome = controller.open(file.path()).await.unwrap();
    assert!(matches!(outcome, AnalysisOutcome::Empty));
    assert!(controller.session().functions().is_empty());
}

#[tokio::test]
async fn analyze_server_error_surfaces_the_reason() {
    let app = Router::new().route(
        "/analyze",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "analyzer crashed") }),
    );
    let addr = serve(app).await;
    let mut controller = controller_for(addr);

    let file = sample_file("def f(): ...\n");
    let outcome = controller.open(file.path()).await.unwrap();
    match outcome {
        AnalysisOutcome::Failed(reason) => {
            assert!(reason.contains("500"), "reason was: {}", reason);
            assert!(reason.contains("analyzer crashed"), "reason was: {}", reason);
        }
        other => panic!("expected Failed, got {:?}", other),
    }
    // No entries rendered, but the file stays loaded for a manual retry
    assert!(controller.session().functions().is_empty());
    assert!(controller.session().file().is_some());
}

#[tokio::test]
async fn analyze_malformed_body_is_a_failure() {
    let app = Router::new().route("/analyze", post(|| async { "surprise, not json" }));
    let addr = serve(app).await;
    let mut controller = controller_for(addr);

    let file = sample_file("def f(): ...\n");
    let outcome = controller.open(file.path()).await.unwrap();
    assert!(matches!(outcome, AnalysisOutcome::Failed(_)));
    assert!(controller.session().analysis().is_none());
}

#[derive(Clone, Default)]
struct UploadState {
    fields: Arc<Mutex<Vec<(String, String, usize)>>>,
}

async fn capture_upload(
    State(state): State<UploadState>,
    mut multipart: Multipart,
) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        state
            .fields
            .lock()
            .unwrap()
            .push((name, file_name, bytes.len()));
    }
    Json(json!({"functions": []}))
}

#[tokio::test]
async fn analyze_uploads_the_file_as_the_sole_multipart_field() {
    let state = UploadState::default();
    let app = Router::new()
        .route("/analyze", post(capture_upload))
        .with_state(state.clone());
    let addr = serve(app).await;
    let mut controller = controller_for(addr);

    let content = "def parse(a, b):\n    return eval(a)\n";
    let file = sample_file(content);
    controller.open(file.path()).await.unwrap();

    let fields = state.fields.lock().unwrap();
    assert_eq!(fields.len(), 1);
    let (field_name, file_name, size) = &fields[0];
    assert_eq!(field_name, "file");
    assert!(file_name.ends_with(".py"), "file name was: {}", file_name);
    assert_eq!(*size, content.len());
}
