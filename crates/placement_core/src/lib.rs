//! Placement core: pure state machine and view-model helpers.
mod criteria;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use criteria::{parse_threshold, split_skills, EligibilityCriteria};
pub use effect::Effect;
pub use msg::{Failure, Msg, Reply};
pub use state::{
    has_spreadsheet_extension, AppState, NotificationDraft, Panel, RequestId, StatusKind,
    StatusMessage, UploadSelection, SPREADSHEET_EXTENSIONS,
};
pub use update::{update, FILL_DETAILS_PROMPT, SELECT_FILE_PROMPT};
pub use view_model::{AppViewModel, BannerView};
