use std::path::{Path, PathBuf};

use crate::criteria::{parse_threshold, split_skills, EligibilityCriteria};
use crate::view_model::{AppViewModel, BannerView};

pub type RequestId = u64;

/// File extensions the upload picker offers by default.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// True if the path ends in one of [`SPREADSHEET_EXTENSIONS`] (case-insensitive).
pub fn has_spreadsheet_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Upload,
    Notify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSelection {
    path: PathBuf,
}

impl UploadSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name shown next to the picker; falls back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Raw notification form fields, kept as typed until submit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationDraft {
    pub name: String,
    pub threshold: String,
    pub skills: String,
}

impl NotificationDraft {
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.threshold.is_empty() && !self.skills.is_empty()
    }

    pub fn to_criteria(&self) -> EligibilityCriteria {
        EligibilityCriteria {
            internship_name: self.name.clone(),
            min_cgpa: parse_threshold(&self.threshold),
            required_skills: split_skills(&self.skills),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    panel: Panel,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    selection: Option<UploadSelection>,
    draft: NotificationDraft,
    status: Option<StatusMessage>,
    in_flight: Option<InFlight>,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.is_busy();
        AppViewModel {
            selected_file: self.selection.as_ref().map(UploadSelection::file_name),
            name: self.draft.name.clone(),
            threshold: self.draft.threshold.clone(),
            skills: self.draft.skills.clone(),
            busy,
            upload_enabled: !busy,
            notify_enabled: !busy,
            pending_panel: self.in_flight.map(|flight| flight.panel),
            banner: self
                .status
                .as_ref()
                .filter(|status| !status.text.is_empty())
                .map(|status| BannerView {
                    text: status.text.clone(),
                    kind: status.kind,
                }),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn selection(&self) -> Option<&UploadSelection> {
        self.selection.as_ref()
    }

    pub fn draft(&self) -> &NotificationDraft {
        &self.draft
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Id of the request currently holding the busy flag, if any.
    pub fn in_flight_request(&self) -> Option<RequestId> {
        self.in_flight.map(|flight| flight.request_id)
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn select_file(&mut self, path: PathBuf) {
        self.selection = Some(UploadSelection::new(path));
        self.mark_dirty();
    }

    pub(crate) fn clear_file(&mut self) {
        if self.selection.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_name(&mut self, value: String) {
        self.draft.name = value;
        self.mark_dirty();
    }

    pub(crate) fn set_threshold(&mut self, value: String) {
        self.draft.threshold = value;
        self.mark_dirty();
    }

    pub(crate) fn set_skills(&mut self, value: String) {
        self.draft.skills = value;
        self.mark_dirty();
    }

    pub(crate) fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
        self.mark_dirty();
    }

    /// Takes the busy flag for a new request and returns its id.
    pub(crate) fn begin_request(&mut self, panel: Panel) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight = Some(InFlight { request_id, panel });
        self.mark_dirty();
        request_id
    }

    /// Releases the busy flag if `request_id` is the in-flight request.
    /// Returns `None` for stale or unknown ids.
    pub(crate) fn settle(&mut self, request_id: RequestId) -> Option<Panel> {
        match self.in_flight {
            Some(flight) if flight.request_id == request_id => {
                self.in_flight = None;
                self.mark_dirty();
                Some(flight.panel)
            }
            _ => None,
        }
    }

    /// Discards all view state and returns the request that must be cancelled.
    /// Request ids keep increasing so an abandoned id is never reused.
    pub(crate) fn reset(&mut self) -> Option<RequestId> {
        let abandoned = self.in_flight_request();
        *self = Self {
            last_request_id: self.last_request_id,
            dirty: true,
            ..Self::default()
        };
        abandoned
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
