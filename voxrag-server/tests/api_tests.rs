//! End-to-end tests for the HTTP surface, run against an in-memory
//! corpus, the deterministic hash embedder, and a mock generator.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use voxrag_model::{Generator, MockGenerator};
use voxrag_retrieval::{HashEmbedder, InMemoryVectorStore, RagConfig, RetrievalEngine};
use voxrag_server::{api_routes, AppState};

const EMBEDDING_DIMENSIONS: usize = 128;

fn test_app(reply: &str) -> (Router, Arc<MockGenerator>) {
    let engine = RetrievalEngine::builder()
        .config(RagConfig::default())
        .embedder(Arc::new(HashEmbedder::new(EMBEDDING_DIMENSIONS)))
        .store(Arc::new(InMemoryVectorStore::new()))
        .build()
        .expect("engine builds with embedder and store set");

    let generator = Arc::new(MockGenerator::new(reply));
    let state = AppState {
        engine: Arc::new(engine),
        generator: generator.clone() as Arc<dyn Generator>,
    };
    (api_routes(state), generator)
}

fn json_request(uri: &str, method: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

async fn add_document(app: &Router, text: &str, source: &str) -> Value {
    let request = json_request(
        "/add-document",
        "POST",
        json!({ "text": text, "metadata": { "source": source } }),
    );
    let response = app.clone().oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);
    response_json(response).await
}

#[tokio::test]
async fn add_then_query_round_trip() {
    let (app, generator) = test_app("The aroma is sweet.");

    let added = add_document(
        &app,
        "O café da bola verde possui aroma doce. A torra é média e a origem é brasileira.",
        "cafe.txt",
    )
    .await;
    assert_eq!(added["status"], "success");
    assert_eq!(added["document_id"], "cafe.txt");
    assert!(added["chunks_added"].as_u64().unwrap() >= 1);

    let request = json_request(
        "/query",
        "POST",
        json!({ "question": "Qual o aroma do café da bola verde?" }),
    );
    let response = app.clone().oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["answer"], "The aroma is sweet.");
    assert_eq!(body["model"], "mock");
    assert_eq!(generator.calls(), 1);

    let sources = body["sources"].as_array().expect("sources is an array");
    assert!(!sources.is_empty());
    assert_eq!(sources[0]["metadata"]["source"], "cafe.txt");
    assert!(sources[0]["similarity"].as_f64().unwrap() > 0.1);
}

#[tokio::test]
async fn empty_corpus_answers_without_calling_generator() {
    let (app, generator) = test_app("should never be returned");

    let request = json_request("/query", "POST", json!({ "question": "anything at all?" }));
    let response = app.oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert!(body["answer"]
        .as_str()
        .unwrap()
        .contains("knowledge base is empty"));
    assert_eq!(body["sources"].as_array().unwrap().len(), 0);
    assert!(body.get("model").is_none());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn low_confidence_reports_threshold_without_calling_generator() {
    let (app, generator) = test_app("should never be returned");
    add_document(&app, "alpha beta gamma delta.", "notes.txt").await;

    let request = json_request(
        "/query",
        "POST",
        json!({ "question": "alpha beta", "similarity_threshold": 0.99 }),
    );
    let response = app.oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let answer = body["answer"].as_str().unwrap();
    assert!(answer.contains("below the similarity threshold"));
    assert!(answer.contains("0.99"));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn blank_question_is_rejected() {
    let (app, _) = test_app("unused");
    let request = json_request("/query", "POST", json!({ "question": "   " }));
    let response = app.oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("question"));
}

#[tokio::test]
async fn invalid_query_parameters_are_rejected() {
    let (app, _) = test_app("unused");

    let request = json_request("/query", "POST", json!({ "question": "q", "top_k": 0 }));
    let response = app.clone().oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = json_request(
        "/query",
        "POST",
        json!({ "question": "q", "similarity_threshold": 1.5 }),
    );
    let response = app.oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_document_text_is_rejected() {
    let (app, _) = test_app("unused");
    let request = json_request("/add-document", "POST", json!({ "text": "  \n " }));
    let response = app.oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn clear_then_stats_shows_empty_corpus() {
    let (app, _) = test_app("unused");
    add_document(&app, "Some short document to be wiped.", "wipe.txt").await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/clear-database")
        .body(Body::empty())
        .expect("request builds");
    let response = app.clone().oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .uri("/stats")
        .body(Body::empty())
        .expect("request builds");
    let response = app.oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["total_documents"], 0);
    assert_eq!(body["embedding_dimension"], EMBEDDING_DIMENSIONS as u64);
    assert_eq!(body["model"], "mock");
}

#[tokio::test]
async fn non_pdf_upload_is_rejected() {
    let (app, _) = test_app("unused");

    let body = concat!(
        "--X-BOUNDARY\r\n",
        "Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n",
        "Content-Type: text/plain\r\n",
        "\r\n",
        "plain text, not a pdf\r\n",
        "--X-BOUNDARY--\r\n",
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload-pdf")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=X-BOUNDARY")
        .body(Body::from(body))
        .expect("request builds");

    let response = app.oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let parsed = response_json(response).await;
    assert!(parsed["detail"].as_str().unwrap().contains("notes.txt"));
}

#[tokio::test]
async fn source_previews_are_truncated() {
    let (app, _) = test_app("answer");

    // A single long sentence stays in one chunk and exceeds the preview
    // window, so the response must carry a truncated excerpt.
    let words: Vec<String> = (0..60).map(|i| format!("token{i}")).collect();
    let text = format!("{}.", words.join(" "));
    assert!(text.chars().count() > 200);
    add_document(&app, &text, "long.txt").await;

    let request = json_request("/query", "POST", json!({ "question": text.clone() }));
    let response = app.oneshot(request).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let content = body["sources"][0]["content"].as_str().unwrap();
    assert!(content.ends_with("..."));
    assert_eq!(content.chars().count(), 203);
}
