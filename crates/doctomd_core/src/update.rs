use crate::{
    AppState, CapabilityStatus, ConversionOutcome, DocKind, Effect, Msg, SelectedFile, ViewPhase,
    MAX_FILES,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesPicked(candidates) => {
            let total = candidates.len();
            let mut valid = Vec::with_capacity(total);
            for candidate in candidates {
                if let Some(kind) = DocKind::from_name(&candidate.name) {
                    valid.push(SelectedFile {
                        name: candidate.name,
                        size_bytes: candidate.size_bytes,
                        path: candidate.path,
                        kind,
                    });
                }
            }

            let mut effects = Vec::new();
            if valid.len() != total {
                effects.push(Effect::ShowNotice {
                    message: "Some files were skipped. Only .doc and .docx files are allowed."
                        .to_string(),
                });
            }

            // The extension and capacity checks are independent; both
            // notices may fire for one drop.
            let remaining = state.remaining_capacity();
            if valid.len() > remaining {
                valid.truncate(remaining);
                effects.push(Effect::ShowNotice {
                    message: format!(
                        "Maximum {MAX_FILES} files allowed. Only {} files were added.",
                        valid.len()
                    ),
                });
            }

            state.append_files(valid);
            effects
        }
        Msg::RemoveClicked { index } => {
            state.remove_file(index);
            Vec::new()
        }
        Msg::ClearClicked => {
            state.clear_selection();
            Vec::new()
        }
        Msg::ConvertClicked => {
            // The control is rendered disabled when the engine is missing;
            // a stray click must still not start an upload.
            if state.phase() != ViewPhase::Selecting || !state.capability_allows_submit() {
                return (state, Vec::new());
            }
            if state.selected_files().is_empty() {
                return (
                    state,
                    vec![Effect::ShowNotice {
                        message: "Please select at least one file.".to_string(),
                    }],
                );
            }
            let files = state.selected_files().to_vec();
            state.begin_upload();
            vec![Effect::SubmitBatch { files }]
        }
        Msg::ProgressTicked { increment } => {
            state.apply_progress(increment);
            Vec::new()
        }
        Msg::UploadSucceeded { batch_id, results } => {
            if state.phase() != ViewPhase::Uploading {
                return (state, Vec::new());
            }
            state.complete_upload(batch_id, results);
            vec![Effect::ScheduleResultsReveal]
        }
        Msg::UploadFailed { message } => {
            if state.phase() == ViewPhase::Uploading {
                state.fail_upload(message);
            }
            Vec::new()
        }
        Msg::RevealDelayElapsed => {
            state.reveal_results();
            Vec::new()
        }
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
        Msg::DownloadAllClicked => match state.batch_id() {
            Some(batch_id) => vec![Effect::OpenBundleDownload {
                batch_id: batch_id.to_string(),
            }],
            None => Vec::new(),
        },
        Msg::DownloadFileClicked { index } => match state.result(index) {
            Some(result) => match &result.outcome {
                ConversionOutcome::Converted {
                    markdown_filename,
                    download_url,
                } => vec![Effect::DownloadFile {
                    url: download_url.clone(),
                    filename: markdown_filename.clone(),
                }],
                ConversionOutcome::Failed { .. } => Vec::new(),
            },
            None => Vec::new(),
        },
        Msg::CapabilityProbed { installed, message } => {
            state.set_capability(CapabilityStatus { installed, message });
            Vec::new()
        }
    };

    (state, effects)
}
