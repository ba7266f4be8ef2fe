use std::sync::{Arc, Mutex};

use evalbox_core::api::{ApiClient, Callbacks, Outcome, QueryParams, UploadFile};
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string, body_string_contains, header, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records which callback fired, and with what.
fn recording_callbacks() -> (Callbacks, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (s, e) = (Arc::clone(&log), Arc::clone(&log));
    let callbacks = Callbacks::none()
        .on_success(move |body| {
            s.lock()
                .unwrap()
                .push(format!("success:{}", body.unwrap_or_default()));
        })
        .on_error(move |msg| e.lock().unwrap().push(format!("error:{msg}")));
    (callbacks, log)
}

#[tokio::test]
async fn test_fetch_returns_body_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\":\"parsed\"}"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let (callbacks, log) = recording_callbacks();
    let outcome = client
        .fetch("/items", &QueryParams::new().with("page", 2), callbacks)
        .await;

    assert_eq!(outcome, Outcome::Success(Some("{\"not\":\"parsed\"}".into())));
    assert_eq!(*log.lock().unwrap(), vec!["success:{\"not\":\"parsed\"}".to_string()]);
}

#[tokio::test]
async fn test_repeated_query_values_reach_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let query = QueryParams::new()
        .with("tag", vec!["a", "b"])
        .with("missing", None::<String>);
    client.fetch("search", &query, Callbacks::none()).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("tag=a&tag=b"));
}

#[tokio::test]
async fn test_submit_raw_body_is_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .and(body_string("foobar"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let outcome = client
        .submit("/eval", &QueryParams::new(), "foobar", Callbacks::none(), true)
        .await;

    assert_eq!(outcome, Outcome::Success(Some("ok".into())));
}

#[tokio::test]
async fn test_submit_serializes_json_when_not_raw() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .and(body_string("\"foobar\""))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let outcome = client
        .submit("notes", &QueryParams::new(), "foobar", Callbacks::none(), false)
        .await;

    assert_eq!(outcome, Outcome::Success(Some(String::new())));
}

#[tokio::test]
async fn test_replace_and_remove_send_json_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/items/1"))
        .and(body_json(json!({"name": "x"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("replaced"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/items/1"))
        .and(body_json(json!({"force": true})))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let replaced = client
        .replace("/items/1", &QueryParams::new(), &json!({"name": "x"}), Callbacks::none())
        .await;
    let removed = client
        .remove("/items/1", &QueryParams::new(), &json!({"force": true}), Callbacks::none())
        .await;

    assert_eq!(replaced, Outcome::Success(Some("replaced".into())));
    assert!(removed.is_success());
}

#[tokio::test]
async fn test_error_status_reports_text_and_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/eval"))
        .respond_with(ResponseTemplate::new(500).set_body_string("trace..."))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let (callbacks, log) = recording_callbacks();
    let outcome = client
        .submit("/eval", &QueryParams::new(), "x", callbacks, true)
        .await;

    assert_eq!(outcome, Outcome::Error("Internal Server Error [500]".into()));
    assert_eq!(*log.lock().unwrap(), vec!["error:Internal Server Error [500]".to_string()]);
}

#[tokio::test]
async fn test_transport_failure_reports_error_only() {
    // Bind and drop a listener so nothing is accepting on the port.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = ApiClient::new(&uri).unwrap();
    let (callbacks, log) = recording_callbacks();
    let outcome = client.fetch("/eval", &QueryParams::new(), callbacks).await;

    let Outcome::Error(reason) = outcome else {
        panic!("expected transport error, got {outcome:?}");
    };
    assert!(!reason.is_empty());
    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("error:"));
}

#[tokio::test]
async fn test_upload_sends_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(query_param("kind", "source"))
        .and(header_contains_multipart())
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"prog.txt\""))
        .and(body_string_contains("print 42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("stored"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let file = UploadFile::new("prog.txt", b"print 42".to_vec());
    let outcome = client
        .upload_file(
            "/upload",
            file,
            &QueryParams::new().with("kind", "source"),
            Callbacks::none(),
        )
        .await;

    assert_eq!(outcome, Outcome::Success(Some("stored".into())));
}

fn header_contains_multipart() -> impl wiremock::Match {
    struct MultipartContentType;

    impl wiremock::Match for MultipartContentType {
        fn matches(&self, request: &wiremock::Request) -> bool {
            request
                .headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with("multipart/form-data"))
        }
    }

    MultipartContentType
}
