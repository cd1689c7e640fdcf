use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{FailureKind, NotificationRequest, NotifyReceipt, RequestError, UploadReceipt};

pub const DEFAULT_BACKEND_BASE_URL: &str = "http://127.0.0.1:8000";
pub const UPLOAD_STUDENTS_PATH: &str = "upload-students";
pub const NOTIFY_PATH: &str = "notify";

/// Multipart field carrying the spreadsheet.
const FILE_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Origin (and optional path prefix) all requests are issued against.
    pub base_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait PlacementBackend: Send + Sync {
    async fn upload_students(&self, path: &Path) -> Result<UploadReceipt, RequestError>;

    async fn notify_students(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotifyReceipt, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// No request timeout is configured; a request lasts until it settles or is cancelled.
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl PlacementBackend for ReqwestBackend {
    async fn upload_students(&self, path: &Path) -> Result<UploadReceipt, RequestError> {
        let url = endpoint_url(&self.settings.base_url, UPLOAD_STUDENTS_PATH)?;
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            RequestError::new(
                FailureKind::ReadFile,
                format!("failed to read {}: {err}", path.display()),
            )
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| FILE_FIELD.to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.essence_str())
            .map_err(map_reqwest_error)?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn notify_students(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotifyReceipt, RequestError> {
        let url = endpoint_url(&self.settings.base_url, NOTIFY_PATH)?;
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }
}

/// Joins an endpoint onto the base URL, keeping any path prefix of the base.
pub fn endpoint_url(base_url: &str, endpoint: &str) -> Result<Url, RequestError> {
    let mut base = Url::parse(base_url)
        .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    base.join(endpoint)
        .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RequestError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        return Err(RequestError::new(
            FailureKind::Backend {
                status: status.as_u16(),
            },
            backend_detail(&body, status),
        ));
    }

    serde_json::from_slice(&body)
        .map_err(|err| RequestError::new(FailureKind::Decode, err.to_string()))
}

/// Text of the `detail` field; non-string details are rendered as compact JSON.
fn backend_detail(body: &[u8], status: StatusCode) -> String {
    let detail = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|mut value| value.get_mut("detail").map(serde_json::Value::take));
    match detail {
        Some(serde_json::Value::String(text)) => text,
        Some(serde_json::Value::Null) | None => status.to_string(),
        Some(other) => other.to_string(),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_decode() {
        return RequestError::new(FailureKind::Decode, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}
