use std::path::PathBuf;
use std::sync::Once;

use doctomd_core::{update, AppState, FileCandidate, Msg, ViewPhase};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn state_with_one_file() -> AppState {
    let candidates = vec![FileCandidate {
        name: "a.docx".to_string(),
        size_bytes: 1024,
        path: PathBuf::from("/tmp/a.docx"),
    }];
    let (state, _effects) = update(AppState::new(), Msg::FilesPicked(candidates));
    state
}

#[test]
fn missing_engine_disables_convert_and_shows_the_banner() {
    init_logging();
    let state = state_with_one_file();

    let (mut state, effects) = update(
        state,
        Msg::CapabilityProbed {
            installed: false,
            message: "Pandoc is not installed. Please install Pandoc to use this service."
                .to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.convert_enabled);
    assert_eq!(
        view.capability_warning.as_deref(),
        Some("Pandoc is not installed. Please install Pandoc to use this service.")
    );
    assert!(state.consume_dirty());

    // Even a stray click on the disabled control starts nothing.
    let (state, effects) = update(state, Msg::ConvertClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().phase, ViewPhase::Selecting);
}

#[test]
fn available_engine_keeps_convert_enabled_without_a_banner() {
    init_logging();
    let state = state_with_one_file();

    let (state, _effects) = update(
        state,
        Msg::CapabilityProbed {
            installed: true,
            message: "Pandoc is installed and ready".to_string(),
        },
    );

    let view = state.view();
    assert!(view.convert_enabled);
    assert!(view.capability_warning.is_none());
}

#[test]
fn unknown_status_is_not_treated_as_unavailable() {
    init_logging();
    // A failed probe never reaches the state; the control stays enabled.
    let state = state_with_one_file();
    let view = state.view();

    assert!(view.convert_enabled);
    assert!(view.capability_warning.is_none());
}
