use std::path::Path;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use placement_client::{
    BackendReply, ClientEvent, ClientHandle, ClientSettings, FailureKind, NotificationRequest,
    NotifyReceipt, PlacementBackend, RequestError, ReqwestBackend, UploadReceipt,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

/// Backend whose requests never settle on their own.
struct HangingBackend;

#[async_trait::async_trait]
impl PlacementBackend for HangingBackend {
    async fn upload_students(&self, _path: &Path) -> Result<UploadReceipt, RequestError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(UploadReceipt { total_students: 0 })
    }

    async fn notify_students(
        &self,
        _request: &NotificationRequest,
    ) -> Result<NotifyReceipt, RequestError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(NotifyReceipt {
            message: String::new(),
        })
    }
}

/// Backend that panics inside the request task.
struct PanickingBackend;

#[async_trait::async_trait]
impl PlacementBackend for PanickingBackend {
    async fn upload_students(&self, _path: &Path) -> Result<UploadReceipt, RequestError> {
        panic!("spreadsheet reader crashed");
    }

    async fn notify_students(
        &self,
        _request: &NotificationRequest,
    ) -> Result<NotifyReceipt, RequestError> {
        panic!("notifier crashed");
    }
}

fn next_completion(rx: &mpsc::Receiver<ClientEvent>) -> ClientEvent {
    loop {
        let event = rx.recv_timeout(WAIT).expect("client event");
        if matches!(event, ClientEvent::RequestCompleted { .. }) {
            return event;
        }
    }
}

fn sample_request() -> NotificationRequest {
    NotificationRequest {
        internship_name: "Internship A".to_string(),
        min_cgpa: 7.5,
        required_skills: vec!["Go".to_string()],
    }
}

#[test]
fn cancelled_request_reports_cancelled() {
    let (event_tx, event_rx) = mpsc::channel();
    let handle = ClientHandle::new(Arc::new(HangingBackend), event_tx).expect("worker starts");

    handle.notify_students(3, sample_request());
    let started = event_rx.recv_timeout(WAIT).expect("started event");
    assert_eq!(
        started,
        ClientEvent::RequestStarted {
            request_id: 3,
            endpoint: "notify",
        }
    );

    handle.cancel(3);
    match next_completion(&event_rx) {
        ClientEvent::RequestCompleted { request_id, result } => {
            assert_eq!(request_id, 3);
            assert_eq!(result.unwrap_err().kind, FailureKind::Cancelled);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn cancelling_unknown_request_is_harmless() {
    let (event_tx, event_rx) = mpsc::channel();
    let handle = ClientHandle::new(Arc::new(HangingBackend), event_tx).expect("worker starts");

    handle.cancel(42);
    assert!(event_rx.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn handle_delivers_backend_reply() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/notify"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Notified 1 eligible students." })),
            )
            .mount(&server)
            .await;
        server
    });

    let backend = ReqwestBackend::new(ClientSettings {
        base_url: server.uri(),
    })
    .unwrap();
    let (event_tx, event_rx) = mpsc::channel();
    let handle = ClientHandle::new(Arc::new(backend), event_tx).expect("worker starts");

    handle.notify_students(1, sample_request());
    assert_eq!(
        next_completion(&event_rx),
        ClientEvent::RequestCompleted {
            request_id: 1,
            result: Ok(BackendReply::Notified(NotifyReceipt {
                message: "Notified 1 eligible students.".to_string(),
            })),
        }
    );
}

#[test]
fn panicking_request_still_completes() {
    let (event_tx, event_rx) = mpsc::channel();
    let handle =
        ClientHandle::new(Arc::new(PanickingBackend), event_tx).expect("worker starts");

    handle.upload_students(5, "students.xlsx");
    match next_completion(&event_rx) {
        ClientEvent::RequestCompleted { request_id, result } => {
            assert_eq!(request_id, 5);
            assert_eq!(result.unwrap_err().kind, FailureKind::Network);
        }
        other => panic!("unexpected event {other:?}"),
    }

    // The worker keeps serving after a crashed task.
    handle.notify_students(6, sample_request());
    match next_completion(&event_rx) {
        ClientEvent::RequestCompleted { request_id, .. } => assert_eq!(request_id, 6),
        other => panic!("unexpected event {other:?}"),
    }
}
