//! Placement client: HTTP calls to the placement backend and the request worker.
mod backend;
mod client;
mod types;

pub use backend::{
    endpoint_url, ClientSettings, PlacementBackend, ReqwestBackend, DEFAULT_BACKEND_BASE_URL,
    NOTIFY_PATH, UPLOAD_STUDENTS_PATH,
};
pub use client::ClientHandle;
pub use types::{
    BackendReply, ClientEvent, FailureKind, NotificationRequest, NotifyReceipt, RequestError,
    RequestId, UploadReceipt,
};
