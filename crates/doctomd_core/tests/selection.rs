use std::path::PathBuf;
use std::sync::Once;

use doctomd_core::{update, AppState, Effect, FileCandidate, Msg, MAX_FILES};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn candidate(name: &str, size_bytes: u64) -> FileCandidate {
    FileCandidate {
        name: name.to_string(),
        size_bytes,
        path: PathBuf::from(format!("/tmp/{name}")),
    }
}

fn pick(state: AppState, names: &[&str]) -> (AppState, Vec<Effect>) {
    let candidates = names.iter().map(|name| candidate(name, 2048)).collect();
    update(state, Msg::FilesPicked(candidates))
}

#[test]
fn mixed_extensions_adds_only_the_valid_subset_in_order() {
    init_logging();
    let state = AppState::new();

    let (mut next, effects) = pick(state, &["a.docx", "notes.pdf", "B.DOC", "image.png"]);
    let view = next.view();

    assert_eq!(view.file_count, 2);
    let names: Vec<_> = view.files.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["a.docx", "B.DOC"]);
    assert_eq!(
        effects,
        vec![Effect::ShowNotice {
            message: "Some files were skipped. Only .doc and .docx files are allowed.".to_string(),
        }]
    );
    assert!(next.consume_dirty());
}

#[test]
fn selection_never_exceeds_max_files_across_calls() {
    init_logging();
    let state = AppState::new();

    let first: Vec<_> = (0..7).map(|i| format!("doc{i}.docx")).collect();
    let first_refs: Vec<&str> = first.iter().map(String::as_str).collect();
    let (state, effects) = pick(state, &first_refs);
    assert!(effects.is_empty());

    let second: Vec<_> = (7..13).map(|i| format!("doc{i}.docx")).collect();
    let second_refs: Vec<&str> = second.iter().map(String::as_str).collect();
    let (mut state, effects) = pick(state, &second_refs);

    assert_eq!(state.view().file_count, MAX_FILES);
    assert_eq!(
        effects,
        vec![Effect::ShowNotice {
            message: "Maximum 10 files allowed. Only 3 files were added.".to_string(),
        }]
    );
    // The prefix that fit is kept, in input order.
    let names: Vec<_> = state
        .view()
        .files
        .iter()
        .map(|row| row.name.clone())
        .collect();
    assert_eq!(names[7..], ["doc7.docx", "doc8.docx", "doc9.docx"]);
    assert!(state.consume_dirty());
}

#[test]
fn one_oversized_drop_is_clamped_to_capacity() {
    init_logging();
    let names: Vec<_> = (0..12).map(|i| format!("doc{i}.docx")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();

    let (state, effects) = pick(AppState::new(), &refs);

    assert_eq!(state.view().file_count, MAX_FILES);
    assert_eq!(
        effects,
        vec![Effect::ShowNotice {
            message: "Maximum 10 files allowed. Only 10 files were added.".to_string(),
        }]
    );
}

#[test]
fn skip_and_capacity_notices_both_fire_for_one_drop() {
    init_logging();
    let names: Vec<_> = (0..9).map(|i| format!("doc{i}.docx")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let (state, _effects) = pick(AppState::new(), &refs);

    let (state, effects) = pick(state, &["skip.pdf", "a.doc", "b.doc"]);

    assert_eq!(state.view().file_count, MAX_FILES);
    assert_eq!(
        effects,
        vec![
            Effect::ShowNotice {
                message: "Some files were skipped. Only .doc and .docx files are allowed."
                    .to_string(),
            },
            Effect::ShowNotice {
                message: "Maximum 10 files allowed. Only 1 files were added.".to_string(),
            },
        ]
    );
}

#[test]
fn remove_shifts_later_entries_down() {
    init_logging();
    let (mut state, _effects) = pick(AppState::new(), &["a.docx", "b.docx", "c.docx"]);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::RemoveClicked { index: 1 });

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.file_count, 2);
    let names: Vec<_> = view.files.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["a.docx", "c.docx"]);
    assert!(state.consume_dirty());
}

#[test]
fn remove_with_stale_index_is_a_silent_noop() {
    init_logging();
    let (mut state, _effects) = pick(AppState::new(), &["a.docx", "b.docx"]);
    assert!(state.consume_dirty());
    let before = state.clone();

    let (mut state, effects) = update(state, Msg::RemoveClicked { index: 5 });

    assert!(effects.is_empty());
    assert_eq!(state, before);
    assert!(!state.consume_dirty());
}

#[test]
fn clear_empties_selection_and_hides_the_list() {
    init_logging();
    let (state, _effects) = pick(AppState::new(), &["a.docx", "b.doc"]);

    let (mut state, effects) = update(state, Msg::ClearClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.file_count, 0);
    assert!(!view.file_list_visible);
    assert!(state.consume_dirty());
}

#[test]
fn file_rows_carry_icon_and_formatted_size() {
    init_logging();
    let candidates = vec![candidate("old.doc", 512), candidate("new.docx", 1536)];
    let (state, _effects) = update(AppState::new(), Msg::FilesPicked(candidates));

    let view = state.view();
    assert!(view.file_list_visible);
    assert_eq!(view.files[0].icon, "📄");
    assert_eq!(view.files[0].size_label, "512 B");
    assert_eq!(view.files[1].icon, "📝");
    assert_eq!(view.files[1].size_label, "1.5 KB");
}

#[test]
fn empty_pick_rerenders_without_notices() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::FilesPicked(Vec::new()));

    assert!(effects.is_empty());
    assert_eq!(state.view().file_count, 0);
    assert!(state.consume_dirty());
}
