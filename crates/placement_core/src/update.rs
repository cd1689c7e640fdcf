use crate::{AppState, Effect, Failure, Msg, Panel, Reply, StatusKind};

pub const SELECT_FILE_PROMPT: &str = "Please select a file first";
pub const FILL_DETAILS_PROMPT: &str = "Please fill all internship details";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(path) => {
            state.select_file(path);
            Vec::new()
        }
        Msg::FileCleared => {
            state.clear_file();
            Vec::new()
        }
        Msg::NameChanged(value) => {
            state.set_name(value);
            Vec::new()
        }
        Msg::ThresholdChanged(value) => {
            state.set_threshold(value);
            Vec::new()
        }
        Msg::SkillsChanged(value) => {
            state.set_skills(value);
            Vec::new()
        }
        Msg::UploadClicked => {
            // Both buttons are disabled while any request is pending.
            if state.is_busy() {
                return (state, Vec::new());
            }
            match state.selection().map(|selection| selection.path().to_path_buf()) {
                Some(path) => {
                    let request_id = state.begin_request(Panel::Upload);
                    vec![Effect::UploadStudents { request_id, path }]
                }
                None => {
                    state.set_status(StatusKind::Error, SELECT_FILE_PROMPT);
                    Vec::new()
                }
            }
        }
        Msg::NotifyClicked => {
            if state.is_busy() {
                return (state, Vec::new());
            }
            if state.draft().is_complete() {
                let criteria = state.draft().to_criteria();
                let request_id = state.begin_request(Panel::Notify);
                vec![Effect::NotifyStudents {
                    request_id,
                    criteria,
                }]
            } else {
                state.set_status(StatusKind::Error, FILL_DETAILS_PROMPT);
                Vec::new()
            }
        }
        Msg::RequestSucceeded { request_id, reply } => {
            if state.settle(request_id).is_some() {
                let text = match reply {
                    Reply::Uploaded { total_students } => {
                        format!("Successfully uploaded! Total students: {total_students}")
                    }
                    Reply::Notified { message } => message,
                };
                state.set_status(StatusKind::Success, text);
            }
            Vec::new()
        }
        Msg::RequestFailed {
            request_id,
            failure,
        } => {
            if state.settle(request_id).is_some() {
                let text = match failure {
                    Failure::Backend { detail } => format!("Error: {detail}"),
                    Failure::Transport { error } => format!("Error: {error}"),
                };
                state.set_status(StatusKind::Error, text);
            }
            Vec::new()
        }
        Msg::Reset => match state.reset() {
            Some(request_id) => vec![Effect::CancelRequest { request_id }],
            None => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
