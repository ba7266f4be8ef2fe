//! HTTP request client.
//!
//! A thin wrapper over `reqwest` with verb-shaped operations. Each call
//! builds `<base_url><path>?<query>`, sends it, and reports exactly one
//! [`Outcome`], both to the optional [`Callbacks`] and as the return value.
//! There is no retry, timeout, cancellation or concurrency limit.

mod outcome;
mod query;

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tokio::fs;

pub use outcome::{Callbacks, Outcome};
pub use query::{QueryParams, QueryValue, format_url};

const JSON_CONTENT_TYPE: &str = "application/json";

/// A file to send with [`ApiClient::upload_file`].
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            mime: None,
        }
    }

    /// Reads a file from disk, using its file name as the part name.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

enum Payload {
    Empty,
    Json(String),
    Raw(String),
    Multipart(Form),
}

/// Request client bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    ///
    /// The URL must parse; a trailing `/` is added if missing so paths
    /// concatenate cleanly.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http(base_url, reqwest::Client::new())
    }

    pub fn with_http(base_url: &str, http: reqwest::Client) -> Result<Self> {
        let trimmed = base_url.trim();
        url::Url::parse(trimmed).with_context(|| format!("Invalid base URL: {trimmed}"))?;
        let base_url = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the full request URL for `path` and `query`.
    pub fn url_for(&self, path: &str, query: &QueryParams) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format_url(&format!("{}{path}", self.base_url), query)
    }

    /// GET.
    pub async fn fetch(&self, path: &str, query: &QueryParams, callbacks: Callbacks) -> Outcome {
        self.send(Method::GET, path, query, Payload::Empty, callbacks)
            .await
    }

    /// POST. With `raw_body`, a string body is sent verbatim; otherwise the
    /// body is serialized to JSON.
    pub async fn submit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &QueryParams,
        body: &B,
        callbacks: Callbacks,
        raw_body: bool,
    ) -> Outcome {
        let payload = if raw_body {
            raw_payload(body)
        } else {
            json_payload(body)
        };
        self.send_payload(Method::POST, path, query, payload, callbacks)
            .await
    }

    /// PUT with a JSON body.
    pub async fn replace<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &QueryParams,
        body: &B,
        callbacks: Callbacks,
    ) -> Outcome {
        self.send_payload(Method::PUT, path, query, json_payload(body), callbacks)
            .await
    }

    /// DELETE with a JSON body.
    pub async fn remove<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &QueryParams,
        body: &B,
        callbacks: Callbacks,
    ) -> Outcome {
        self.send_payload(Method::DELETE, path, query, json_payload(body), callbacks)
            .await
    }

    /// POST multipart with a single field named `file`.
    pub async fn upload_file(
        &self,
        path: &str,
        file: UploadFile,
        query: &QueryParams,
        callbacks: Callbacks,
    ) -> Outcome {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(mime) = file.mime.as_deref() {
            part = match part.mime_str(mime) {
                Ok(part) => part,
                Err(e) => {
                    let outcome = Outcome::Error(e.to_string());
                    callbacks.dispatch(&outcome);
                    return outcome;
                }
            };
        }
        let form = Form::new().part("file", part);
        self.send(Method::POST, path, query, Payload::Multipart(form), callbacks)
            .await
    }

    async fn send_payload(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        payload: Result<Payload, String>,
        callbacks: Callbacks,
    ) -> Outcome {
        match payload {
            Ok(payload) => self.send(method, path, query, payload, callbacks).await,
            Err(message) => {
                let outcome = Outcome::Error(message);
                callbacks.dispatch(&outcome);
                outcome
            }
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        payload: Payload,
        callbacks: Callbacks,
    ) -> Outcome {
        let url = self.url_for(path, query);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http.request(method.clone(), &url);
        request = match payload {
            Payload::Empty => {
                request.header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            }
            Payload::Json(body) | Payload::Raw(body) => request
                .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
                .body(body),
            Payload::Multipart(form) => request.multipart(form),
        };

        let outcome = match request.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    match response.text().await {
                        Ok(text) => Outcome::Success(Some(text)),
                        Err(e) => {
                            tracing::debug!(%url, "failed to read response body: {e}");
                            Outcome::Success(None)
                        }
                    }
                } else {
                    Outcome::Error(status_error(status))
                }
            }
            Err(e) => Outcome::Error(e.to_string()),
        };

        match &outcome {
            Outcome::Success(_) => tracing::debug!(%method, %url, "request succeeded"),
            Outcome::Error(message) => tracing::warn!(%method, %url, "request failed: {message}"),
        }

        callbacks.dispatch(&outcome);
        outcome
    }
}

/// Formats a non-success status as `"<statusText> [<statusCode>]"`.
pub fn status_error(status: StatusCode) -> String {
    format!(
        "{} [{}]",
        status.canonical_reason().unwrap_or_default(),
        status.as_u16()
    )
}

fn json_payload<B: Serialize + ?Sized>(body: &B) -> Result<Payload, String> {
    serde_json::to_string(body)
        .map(Payload::Json)
        .map_err(|e| e.to_string())
}

/// Raw bodies are caller-serialized: strings go out untouched, anything
/// else falls back to its JSON text.
fn raw_payload<B: Serialize + ?Sized>(body: &B) -> Result<Payload, String> {
    let text = match serde_json::to_value(body).map_err(|e| e.to_string())? {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    };
    Ok(Payload::Raw(text))
}
