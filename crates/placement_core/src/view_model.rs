use crate::{Panel, StatusKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub selected_file: Option<String>,
    pub name: String,
    pub threshold: String,
    pub skills: String,
    pub busy: bool,
    pub upload_enabled: bool,
    pub notify_enabled: bool,
    /// Panel whose request holds the busy flag.
    pub pending_panel: Option<Panel>,
    /// Present only when the status text is non-empty.
    pub banner: Option<BannerView>,
}
