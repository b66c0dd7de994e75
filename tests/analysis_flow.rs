//! End-to-end: HTTP classifiers (mocked) -> score -> history on disk -> overlay

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use neuroshield_core::api::{self, AppContext};
use neuroshield_core::constants;
use neuroshield_core::logic::config::AppConfig;
use neuroshield_core::logic::inference::InferenceClient;
use neuroshield_core::logic::storage::{FileStore, KeyValueStore};

fn model_path(model: &str) -> String {
    format!("/{}", model)
}

async fn mount(server: &MockServer, model: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(model_path(model)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn context(server: &MockServer, data_dir: &Path, token: Option<&str>) -> AppContext {
    let config = AppConfig {
        inference_base_url: server.uri(),
        env_token: None,
        request_timeout_secs: 5,
        data_dir: data_dir.to_path_buf(),
    };
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(data_dir).unwrap());
    let client = InferenceClient::new(config.inference_config(token.map(str::to_string))).unwrap();
    AppContext::with_parts(config, store, Arc::new(client))
}

#[tokio::test]
async fn distressed_text_is_scored_persisted_and_escalated() {
    let server = MockServer::start().await;
    mount(
        &server,
        constants::MODEL_TEXT_EMOTION,
        json!([[{"label": "fear", "score": 0.81}, {"label": "joy", "score": 0.02}]]),
    )
    .await;
    mount(
        &server,
        constants::MODEL_TOXICITY,
        json!([[{"label": "normal", "score": 0.3}, {"label": "offensive", "score": 0.66}]]),
    )
    .await;
    mount(
        &server,
        constants::MODEL_SELF_HARM_PROXY,
        json!([[{"label": "toxic", "score": 0.52}]]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&server, dir.path(), None);

    let report = api::analyze_text(&ctx, "I am scared of everything").await.unwrap();
    // 1 + 3 (negative) + 7 (offensive 0.66) + 3 (fear) = 14 -> 7
    assert_eq!(report.score.value(), 7);
    assert!(report.intervention_triggered);
    assert!(api::get_emergency_status(&ctx).visible);

    api::dismiss_emergency(&ctx);
    assert!(!api::get_emergency_status(&ctx).visible);

    // history is on disk and visible to a fresh context
    let reopened = context(&server, dir.path(), None);
    let history = api::get_score_history(&reopened);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].score.value(), 7);

    let summary = api::get_dashboard_summary(&reopened);
    assert_eq!(summary.highest, 7);
    assert_eq!(summary.mood, "High Risk");
}

#[tokio::test]
async fn image_upload_is_sent_as_binary_to_both_models() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(model_path(constants::MODEL_FACIAL_EMOTION)))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[{"label": "happy", "score": 0.9}]])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(model_path(constants::MODEL_IMAGE_LABELS)))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"label": "beach wagon", "score": 0.4}])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("selfie.png");
    tokio::fs::write(&image, [0x89u8, b'P', b'N', b'G']).await.unwrap();

    let ctx = context(&server, dir.path(), None);
    let report = api::analyze_image_file(&ctx, &image).await.unwrap();

    // 1 + 1 (neutral) = 2 -> 1
    assert_eq!(report.score.value(), 1);
    assert_eq!(report.facial_emotion, "happy");
    assert!(!report.depressive_indicators);
    assert!(!report.intervention_triggered);
    assert!(!api::get_emergency_status(&ctx).visible);
}

#[tokio::test]
async fn auth_failure_surfaces_hint_and_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer hf_expired"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Authorization header is invalid"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&server, dir.path(), Some("hf_expired"));

    let err = api::analyze_text(&ctx, "hello").await.unwrap_err();
    assert!(err.contains("inference API error 401: Authorization header is invalid"));
    assert!(err.contains("token"));

    assert!(api::get_score_history(&ctx).is_empty());
    assert!(!api::get_emergency_status(&ctx).visible);
    // only the first classifier was tried
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
