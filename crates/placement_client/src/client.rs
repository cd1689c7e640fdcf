use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;

use placement_logging::{placement_debug, placement_error};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::backend::{NOTIFY_PATH, UPLOAD_STUDENTS_PATH};
use crate::{
    BackendReply, ClientEvent, FailureKind, NotificationRequest, PlacementBackend, RequestError,
    RequestId,
};

enum ClientCommand {
    Submit(RequestCommand),
    Cancel { request_id: RequestId },
}

enum RequestCommand {
    Upload {
        request_id: RequestId,
        path: PathBuf,
    },
    Notify {
        request_id: RequestId,
        request: NotificationRequest,
    },
}

impl RequestCommand {
    fn request_id(&self) -> RequestId {
        match self {
            RequestCommand::Upload { request_id, .. } | RequestCommand::Notify { request_id, .. } => {
                *request_id
            }
        }
    }

    fn endpoint(&self) -> &'static str {
        match self {
            RequestCommand::Upload { .. } => UPLOAD_STUDENTS_PATH,
            RequestCommand::Notify { .. } => NOTIFY_PATH,
        }
    }
}

/// Owns the request worker. Every request runs as its own task with a
/// cancellation token; results are delivered on the event channel.
///
/// Every submitted request produces exactly one `RequestCompleted`, even when
/// the worker is gone or the task panics.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_tx: mpsc::Sender<ClientEvent>,
}

impl ClientHandle {
    pub fn new(
        backend: Arc<dyn PlacementBackend>,
        event_tx: mpsc::Sender<ClientEvent>,
    ) -> Result<Self, RequestError> {
        let runtime = Runtime::new().map_err(|err| {
            RequestError::new(
                FailureKind::Network,
                format!("failed to start request runtime: {err}"),
            )
        })?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        let worker_events = event_tx.clone();
        thread::spawn(move || run_worker(runtime, backend, cmd_rx, worker_events));

        Ok(Self { cmd_tx, event_tx })
    }

    pub fn upload_students(&self, request_id: RequestId, path: impl Into<PathBuf>) {
        self.submit(RequestCommand::Upload {
            request_id,
            path: path.into(),
        });
    }

    pub fn notify_students(&self, request_id: RequestId, request: NotificationRequest) {
        self.submit(RequestCommand::Notify { request_id, request });
    }

    /// Cancels a pending request. Unknown or finished ids are ignored.
    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(ClientCommand::Cancel { request_id });
    }

    fn submit(&self, command: RequestCommand) {
        let request_id = command.request_id();
        if self.cmd_tx.send(ClientCommand::Submit(command)).is_err() {
            placement_error!("Request worker stopped; failing request_id={}", request_id);
            let _ = self.event_tx.send(ClientEvent::RequestCompleted {
                request_id,
                result: Err(RequestError::new(
                    FailureKind::Network,
                    "request worker stopped",
                )),
            });
        }
    }
}

fn run_worker(
    runtime: Runtime,
    backend: Arc<dyn PlacementBackend>,
    cmd_rx: mpsc::Receiver<ClientCommand>,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let tokens = TokenRegistry::default();

    while let Ok(command) = cmd_rx.recv() {
        let command = match command {
            ClientCommand::Submit(command) => command,
            ClientCommand::Cancel { request_id } => {
                if tokens.cancel(request_id) {
                    placement_debug!("Cancelled request_id={}", request_id);
                }
                continue;
            }
        };

        let request_id = command.request_id();
        let token = tokens.register(request_id);
        let _ = event_tx.send(ClientEvent::RequestStarted {
            request_id,
            endpoint: command.endpoint(),
        });

        let backend = backend.clone();
        let event_tx = event_tx.clone();
        let tokens = tokens.clone();
        runtime.spawn(async move {
            let task = tokio::spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => Err(RequestError::cancelled()),
                    result = execute(backend.as_ref(), command) => result,
                }
            });
            let result = task.await.unwrap_or_else(|err| {
                placement_error!("Request task {} aborted: {}", request_id, err);
                Err(RequestError::new(
                    FailureKind::Network,
                    format!("request task aborted: {err}"),
                ))
            });
            tokens.forget(request_id);
            let _ = event_tx.send(ClientEvent::RequestCompleted { request_id, result });
        });
    }
}

async fn execute(
    backend: &dyn PlacementBackend,
    command: RequestCommand,
) -> Result<BackendReply, RequestError> {
    match command {
        RequestCommand::Upload { path, .. } => backend
            .upload_students(&path)
            .await
            .map(BackendReply::Uploaded),
        RequestCommand::Notify { request, .. } => backend
            .notify_students(&request)
            .await
            .map(BackendReply::Notified),
    }
}

#[derive(Clone, Default)]
struct TokenRegistry {
    inner: Arc<Mutex<HashMap<RequestId, CancellationToken>>>,
}

impl TokenRegistry {
    fn register(&self, request_id: RequestId) -> CancellationToken {
        let token = CancellationToken::new();
        self.lock().insert(request_id, token.clone());
        token
    }

    fn cancel(&self, request_id: RequestId) -> bool {
        match self.lock().remove(&request_id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn forget(&self, request_id: RequestId) {
        self.lock().remove(&request_id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<RequestId, CancellationToken>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn request_settles_when_worker_is_gone() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        drop(cmd_rx);
        let (event_tx, event_rx) = mpsc::channel();
        let handle = ClientHandle { cmd_tx, event_tx };

        handle.upload_students(1, "students.xlsx");

        match event_rx.recv_timeout(Duration::from_secs(1)) {
            Ok(ClientEvent::RequestCompleted { request_id, result }) => {
                assert_eq!(request_id, 1);
                let err = result.unwrap_err();
                assert_eq!(err.kind, FailureKind::Network);
                assert_eq!(err.message, "request worker stopped");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn cancel_without_worker_is_silent() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        drop(cmd_rx);
        let (event_tx, event_rx) = mpsc::channel();
        let handle = ClientHandle { cmd_tx, event_tx };

        handle.cancel(1);
        assert!(event_rx.try_recv().is_err());
    }
}
