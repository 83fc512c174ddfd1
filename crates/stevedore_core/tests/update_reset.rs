use std::path::PathBuf;

use serde_json::json;
use stevedore_core::{update, ConsoleEntry, ConsoleSeverity, Msg};

mod common;

#[test]
fn reset_restores_draft_and_clears_session_state() {
    let (state, _) = update(common::import_panel(), Msg::SocketOpened);
    let (state, _) = update(
        state,
        Msg::GroupUpdated {
            group: "Reader".to_string(),
            value: json!({ "selected": "PdfReader" }),
        },
    );
    let (state, _) = update(state, Msg::FilesPicked(vec![PathBuf::from("a.txt")]));
    let (state, _) = update(state, Msg::TextAdded("snippet".to_string()));
    let (state, _) = update(
        state,
        Msg::ConsoleMessage(ConsoleEntry::new(ConsoleSeverity::Info, "working")),
    );

    let (state, effects) = update(state, Msg::ResetClicked);
    let view = state.view();

    assert!(effects.is_empty());
    assert!(view.console.is_empty());
    assert!(view.files.is_empty());
    assert!(view.texts.is_empty());

    // The draft is deeply equal to the original configuration again.
    let original = common::sample_config();
    for group in &view.groups {
        assert_eq!(Some(&group.value), original.get(&group.name));
    }
}

#[test]
fn draft_edits_are_independent_until_committed() {
    let state = common::import_panel();
    let updated = json!({ "selected": "PdfReader" });
    let (state, _) = update(
        state,
        Msg::GroupUpdated {
            group: "Reader".to_string(),
            value: updated.clone(),
        },
    );

    let reader = state
        .view()
        .groups
        .iter()
        .find(|group| group.name == "Reader")
        .expect("reader group")
        .clone();
    assert_eq!(reader.value, updated);

    // Reset proves the original copy was never touched by the edit.
    let (state, _) = update(state, Msg::ResetClicked);
    let reader = state
        .view()
        .groups
        .iter()
        .find(|group| group.name == "Reader")
        .expect("reader group")
        .clone();
    assert_eq!(
        Some(&reader.value),
        common::sample_config().get("Reader")
    );
}

#[test]
fn reset_after_commit_restores_the_committed_draft() {
    let updated = json!({ "selected": "PdfReader" });
    let (state, _) = update(
        common::import_panel(),
        Msg::GroupUpdated {
            group: "Reader".to_string(),
            value: updated.clone(),
        },
    );
    // No files or texts: the click only commits the draft.
    let (state, _) = update(state, Msg::ActionClicked);

    let (state, _) = update(
        state,
        Msg::GroupUpdated {
            group: "Reader".to_string(),
            value: json!({ "selected": "UnstructuredReader" }),
        },
    );
    let (state, _) = update(state, Msg::ResetClicked);

    // Reset lands on the committed value, not the construction-time one.
    let reader = state
        .view()
        .groups
        .iter()
        .find(|group| group.name == "Reader")
        .expect("reader group")
        .clone();
    assert_eq!(reader.value, updated);
}

#[test]
fn allow_list_filters_rendered_groups_in_draft_order() {
    let view = common::import_panel().view();
    let names: Vec<_> = view.groups.iter().map(|group| group.name.clone()).collect();

    // Generator exists in the draft but is not allow-listed; the survivors
    // keep the order they were inserted in.
    assert_eq!(names, vec!["Reader".to_string(), "Embedder".to_string()]);
}
