use std::fmt;

use serde::{Deserialize, Serialize};

pub type RequestId = u64;

/// JSON body of `POST /notify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub internship_name: String,
    /// Non-finite values serialize as `null`.
    pub min_cgpa: f64,
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    pub total_students: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotifyReceipt {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendReply {
    Uploaded(UploadReceipt),
    Notified(NotifyReceipt),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    RequestStarted {
        request_id: RequestId,
        endpoint: &'static str,
    },
    RequestCompleted {
        request_id: RequestId,
        result: Result<BackendReply, RequestError>,
    },
}

/// A failed request. `message` is what the operator sees after `Error: `.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn cancelled() -> Self {
        Self::new(FailureKind::Cancelled, "request cancelled")
    }

    /// True when the backend answered and reported the failure itself.
    pub fn is_backend_reported(&self) -> bool {
        matches!(self.kind, FailureKind::Backend { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Backend { status: u16 },
    Network,
    Decode,
    ReadFile,
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Backend { status } => write!(f, "backend status {status}"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "unexpected response body"),
            FailureKind::ReadFile => write!(f, "file read error"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
