use std::sync::{mpsc, Arc};
use std::thread;

use placement_client::{
    BackendReply, ClientEvent, ClientHandle, FailureKind, NotificationRequest, PlacementBackend,
    RequestError, RequestId,
};
use placement_core::{Effect, EligibilityCriteria, Failure, Msg, Reply};
use placement_logging::{placement_debug, placement_info, placement_warn};

use super::app::ConsoleEvent;

/// Receives the effects produced by `update`.
pub trait EffectSink {
    fn enqueue(&self, effects: Vec<Effect>);
}

pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(
        backend: Arc<dyn PlacementBackend>,
        events: mpsc::Sender<ConsoleEvent>,
    ) -> Result<Self, RequestError> {
        let (client_tx, client_rx) = mpsc::channel();
        let client = ClientHandle::new(backend, client_tx)?;
        spawn_event_loop(client_rx, events);
        Ok(Self { client })
    }
}

impl EffectSink for EffectRunner {
    fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::UploadStudents { request_id, path } => {
                    placement_info!("UploadStudents request_id={} path={:?}", request_id, path);
                    self.client.upload_students(request_id, path);
                }
                Effect::NotifyStudents {
                    request_id,
                    criteria,
                } => {
                    placement_info!(
                        "NotifyStudents request_id={} internship={:?} skills={}",
                        request_id,
                        criteria.internship_name,
                        criteria.required_skills.len()
                    );
                    self.client
                        .notify_students(request_id, to_notification_request(criteria));
                }
                Effect::CancelRequest { request_id } => {
                    placement_info!("CancelRequest request_id={}", request_id);
                    self.client.cancel(request_id);
                }
            }
        }
    }
}

fn spawn_event_loop(client_rx: mpsc::Receiver<ClientEvent>, events: mpsc::Sender<ConsoleEvent>) {
    thread::spawn(move || {
        while let Ok(event) = client_rx.recv() {
            match event {
                ClientEvent::RequestStarted {
                    request_id,
                    endpoint,
                } => {
                    placement_debug!("Request {} started: POST /{}", request_id, endpoint);
                }
                ClientEvent::RequestCompleted { request_id, result } => {
                    if let Err(err) = &result {
                        if err.kind == FailureKind::Cancelled {
                            placement_debug!("Request {} cancelled", request_id);
                        } else {
                            placement_warn!("Request {} failed ({}): {}", request_id, err.kind, err);
                        }
                    }
                    let msg = completion_msg(request_id, result);
                    if events.send(ConsoleEvent::Core(msg)).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

pub(crate) fn completion_msg(
    request_id: RequestId,
    result: Result<BackendReply, RequestError>,
) -> Msg {
    match result {
        Ok(BackendReply::Uploaded(receipt)) => Msg::RequestSucceeded {
            request_id,
            reply: Reply::Uploaded {
                total_students: receipt.total_students,
            },
        },
        Ok(BackendReply::Notified(receipt)) => Msg::RequestSucceeded {
            request_id,
            reply: Reply::Notified {
                message: receipt.message,
            },
        },
        Err(err) if err.is_backend_reported() => Msg::RequestFailed {
            request_id,
            failure: Failure::Backend {
                detail: err.message,
            },
        },
        Err(err) => Msg::RequestFailed {
            request_id,
            failure: Failure::Transport { error: err.message },
        },
    }
}

fn to_notification_request(criteria: EligibilityCriteria) -> NotificationRequest {
    NotificationRequest {
        internship_name: criteria.internship_name,
        min_cgpa: criteria.min_cgpa,
        required_skills: criteria.required_skills,
    }
}
