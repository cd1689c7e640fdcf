use placement_core::{AppViewModel, BannerView, StatusKind, SPREADSHEET_EXTENSIONS};

use super::constants::*;

/// Renders the whole console as text lines, top to bottom.
#[allow(clippy::vec_init_then_push)]
pub fn render(view: &AppViewModel) -> Vec<String> {
    let (upload_label, notify_label) = if view.busy {
        (BUTTON_UPLOAD_BUSY, BUTTON_NOTIFY_BUSY)
    } else {
        (BUTTON_UPLOAD, BUTTON_NOTIFY)
    };

    let mut lines = Vec::new();

    lines.push(TITLE.to_string());
    lines.push(String::new());

    lines.push(format!("== {UPLOAD_TITLE} =="));
    lines.push(format!(
        "  {LABEL_FILE} ({}): {}",
        extension_hint(),
        view.selected_file.as_deref().unwrap_or("(none)")
    ));
    lines.push(format!("  {}", button(upload_label, view.upload_enabled)));
    lines.push(String::new());

    lines.push(format!("== {NOTIFY_TITLE} =="));
    lines.push(field_line(LABEL_NAME, &view.name, PLACEHOLDER_NAME));
    lines.push(field_line(LABEL_THRESHOLD, &view.threshold, PLACEHOLDER_THRESHOLD));
    lines.push(field_line(LABEL_SKILLS, &view.skills, PLACEHOLDER_SKILLS));
    lines.push(format!("  {}", button(notify_label, view.notify_enabled)));

    if let Some(banner) = &view.banner {
        lines.push(String::new());
        lines.push(banner_line(banner));
    }

    lines
}

pub fn banner_line(banner: &BannerView) -> String {
    let mark = match banner.kind {
        StatusKind::Success => MARK_SUCCESS,
        StatusKind::Error => MARK_ERROR,
    };
    format!("{mark} {}", banner.text)
}

fn field_line(label: &str, value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        format!("  {label}: (e.g. {placeholder})")
    } else {
        format!("  {label}: {value}")
    }
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[ {label} ]")
    } else {
        format!("( {label} ) disabled")
    }
}

fn extension_hint() -> String {
    SPREADSHEET_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn idle_view_shows_placeholders_and_enabled_buttons() {
        let view = AppViewModel {
            upload_enabled: true,
            notify_enabled: true,
            ..AppViewModel::default()
        };
        let lines = render(&view);

        assert!(lines.contains(&"  Select Excel File (.xlsx,.xls): (none)".to_string()));
        assert!(lines.contains(&"  [ Upload Students Data ]".to_string()));
        assert!(lines.contains(&"  Minimum CGPA: (e.g. 7.5)".to_string()));
        assert!(lines.contains(&"  [ Notify Eligible Students ]".to_string()));
        assert!(!lines.iter().any(|line| line.starts_with("[OK]")));
    }

    #[test]
    fn busy_view_disables_both_buttons() {
        let view = AppViewModel {
            busy: true,
            ..AppViewModel::default()
        };
        let lines = render(&view);

        assert!(lines.contains(&"  ( Uploading... ) disabled".to_string()));
        assert!(lines.contains(&"  ( Sending Notifications... ) disabled".to_string()));
    }

    #[test]
    fn banner_mark_follows_kind() {
        let error = BannerView {
            text: "Error: bad file".to_string(),
            kind: StatusKind::Error,
        };
        let success = BannerView {
            text: "Error budget respected".to_string(),
            kind: StatusKind::Success,
        };

        assert_eq!(banner_line(&error), "[ERROR] Error: bad file");
        assert_eq!(banner_line(&success), "[OK] Error budget respected");
    }
}
