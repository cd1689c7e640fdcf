use std::sync::Once;

use placement_core::{
    update, AppState, EligibilityCriteria, Effect, Failure, Msg, Panel, Reply, StatusKind,
    FILL_DETAILS_PROMPT,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(placement_logging::initialize_for_tests);
}

fn fill(name: &str, threshold: &str, skills: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::NameChanged(name.to_string()));
    let (state, _) = update(state, Msg::ThresholdChanged(threshold.to_string()));
    let (state, _) = update(state, Msg::SkillsChanged(skills.to_string()));
    state
}

#[test]
fn notify_builds_trimmed_criteria() {
    init_logging();
    let (state, effects) = update(fill("Internship A", "7.5", "Go, SQL"), Msg::NotifyClicked);

    assert_eq!(
        effects,
        vec![Effect::NotifyStudents {
            request_id: 1,
            criteria: EligibilityCriteria {
                internship_name: "Internship A".to_string(),
                min_cgpa: 7.5,
                required_skills: vec!["Go".to_string(), "SQL".to_string()],
            },
        }]
    );
    assert!(state.view().busy);
    assert_eq!(state.view().pending_panel, Some(Panel::Notify));
}

#[test]
fn notify_with_any_empty_field_prompts_without_request() {
    init_logging();
    for (name, threshold, skills) in [
        ("", "7.5", "Go"),
        ("Internship A", "", "Go"),
        ("Internship A", "7.5", ""),
    ] {
        let (state, effects) = update(fill(name, threshold, skills), Msg::NotifyClicked);

        assert!(effects.is_empty());
        let view = state.view();
        assert!(!view.busy);
        let banner = view.banner.expect("banner shown");
        assert_eq!(banner.text, FILL_DETAILS_PROMPT);
        assert_eq!(banner.kind, StatusKind::Error);
    }
}

#[test]
fn notify_success_shows_backend_message_verbatim() {
    init_logging();
    let (state, _) = update(fill("Internship A", "7.5", "Go"), Msg::NotifyClicked);
    let (state, _) = update(
        state,
        Msg::RequestSucceeded {
            request_id: 1,
            reply: Reply::Notified {
                message: "Notified 3 eligible students.".to_string(),
            },
        },
    );

    let view = state.view();
    assert!(!view.busy);
    let banner = view.banner.expect("banner shown");
    assert_eq!(banner.text, "Notified 3 eligible students.");
    assert_eq!(banner.kind, StatusKind::Success);
}

#[test]
fn success_styling_ignores_error_substring() {
    init_logging();
    let (state, _) = update(fill("Internship A", "7.5", "Go"), Msg::NotifyClicked);
    let (state, _) = update(
        state,
        Msg::RequestSucceeded {
            request_id: 1,
            reply: Reply::Notified {
                message: "Error handling internship notified 0 students.".to_string(),
            },
        },
    );

    assert_eq!(
        state.view().banner.map(|banner| banner.kind),
        Some(StatusKind::Success)
    );
}

#[test]
fn empty_backend_message_hides_banner() {
    init_logging();
    let (state, _) = update(fill("Internship A", "7.5", "Go"), Msg::NotifyClicked);
    let (state, _) = update(
        state,
        Msg::RequestSucceeded {
            request_id: 1,
            reply: Reply::Notified {
                message: String::new(),
            },
        },
    );

    assert!(!state.view().busy);
    assert_eq!(state.view().banner, None);
}

#[test]
fn notify_failure_keeps_form_contents() {
    init_logging();
    let (state, _) = update(fill("Internship A", "7.5", "Go, SQL"), Msg::NotifyClicked);
    let (state, _) = update(
        state,
        Msg::RequestFailed {
            request_id: 1,
            failure: Failure::Backend {
                detail: "students.xlsx not found".to_string(),
            },
        },
    );

    let view = state.view();
    assert_eq!(view.name, "Internship A");
    assert_eq!(view.threshold, "7.5");
    assert_eq!(view.skills, "Go, SQL");
    assert_eq!(
        view.banner.map(|banner| banner.text),
        Some("Error: students.xlsx not found".to_string())
    );
}

#[test]
fn whitespace_only_field_counts_as_present() {
    init_logging();
    let (_state, effects) = update(fill(" ", "7", "Go"), Msg::NotifyClicked);
    assert_eq!(effects.len(), 1);
}
