use std::sync::Arc;

use evalbox_core::api::ApiClient;
use evalbox_core::eval::{EvalSettings, Severity, evaluate};
use evalbox_core::state::{HistoryEntry, PersistedState};
use evalbox_core::storage::{MemoryStorage, SharedStorage};
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fresh_state() -> (PersistedState, SharedStorage) {
    let storage: SharedStorage = Arc::new(MemoryStorage::new());
    (PersistedState::load(Arc::clone(&storage)), storage)
}

#[tokio::test]
async fn test_successful_evaluation_records_original_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(body_string("foobar"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Heslo je 42"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let (mut state, storage) = fresh_state();

    let evaluation = evaluate(&client, "foo bar", &EvalSettings::default()).await;
    evaluation.record(&mut state);

    assert_eq!(evaluation.notice.severity, Severity::Success);
    assert_eq!(
        state.history(),
        &[HistoryEntry::new("foo bar", "Heslo je 42")]
    );
    // Persisted immediately.
    assert_eq!(PersistedState::load(storage).history().len(), 1);
}

#[tokio::test]
async fn test_response_without_marker_is_a_warning() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Try again"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let (mut state, _) = fresh_state();

    let evaluation = evaluate(&client, "guess", &EvalSettings::default()).await;
    evaluation.record(&mut state);

    assert_eq!(evaluation.notice.severity, Severity::Warning);
    assert_eq!(evaluation.notice.message, "Try again");
    assert_eq!(state.history().len(), 1);
}

#[tokio::test]
async fn test_server_error_leaves_history_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let (mut state, _) = fresh_state();
    state.append_entry(HistoryEntry::new("old", "Heslo"));
    let settings = EvalSettings::default();

    let evaluation = evaluate(&client, "x", &settings).await;
    evaluation.record(&mut state);

    assert_eq!(evaluation.notice.severity, Severity::Error);
    assert_eq!(evaluation.notice.message, settings.error_message);
    assert_eq!(state.history(), &[HistoryEntry::new("old", "Heslo")]);
}

#[tokio::test]
async fn test_custom_eval_path_and_marker() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/run"))
        .respond_with(ResponseTemplate::new(200).set_body_string("PASSWORD: swordfish"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let settings = EvalSettings {
        path: "api/run".into(),
        success_marker: "PASSWORD".into(),
        error_message: "failed".into(),
    };

    let evaluation = evaluate(&client, "open sesame", &settings).await;
    assert_eq!(evaluation.notice.severity, Severity::Success);
}
