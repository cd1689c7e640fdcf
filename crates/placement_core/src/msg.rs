use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a spreadsheet file.
    FileSelected(PathBuf),
    /// User cleared the file picker.
    FileCleared,
    /// User edited the internship name.
    NameChanged(String),
    /// User edited the minimum CGPA field (raw text).
    ThresholdChanged(String),
    /// User edited the comma-separated skills field (raw text).
    SkillsChanged(String),
    /// User clicked "Upload Students Data".
    UploadClicked,
    /// User clicked "Notify Eligible Students".
    NotifyClicked,
    /// Backend answered a request with a 2xx response.
    RequestSucceeded {
        request_id: crate::RequestId,
        reply: Reply,
    },
    /// Request completed with a non-2xx response or could not complete.
    RequestFailed {
        request_id: crate::RequestId,
        failure: Failure,
    },
    /// View was left; all state is discarded.
    Reset,
    /// Fallback for input that maps to nothing.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Uploaded { total_students: u64 },
    Notified { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The backend reported an error through its `detail` field.
    Backend { detail: String },
    /// Network, file or decoding failure.
    Transport { error: String },
}
