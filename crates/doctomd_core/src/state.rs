use std::path::PathBuf;

use crate::view_model::{AppViewModel, FileRowView, ResultRowView};

/// Maximum number of files accepted per batch, enforced client-side.
pub const MAX_FILES: usize = 10;

/// Display ceiling for the simulated progress indicator while the upload
/// request is still outstanding.
pub const PROGRESS_CAP: u8 = 90;

/// Document flavor accepted by the conversion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Doc,
    Docx,
}

impl DocKind {
    /// Derives the kind from the lowercase suffix of a filename.
    ///
    /// A name without a dot is compared whole, matching the picker's
    /// suffix-popping behavior.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        let suffix = lower.rsplit('.').next().unwrap_or(&lower);
        match suffix {
            "doc" => Some(DocKind::Doc),
            "docx" => Some(DocKind::Docx),
            _ => None,
        }
    }
}

/// A file handle as delivered by the picker, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

/// A validated file awaiting submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub path: PathBuf,
    pub kind: DocKind,
}

/// Mutually exclusive display phase. Exactly one panel is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    #[default]
    Selecting,
    Uploading,
    Results,
    Error,
}

/// Availability of the server-side conversion engine, as reported once at
/// startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityStatus {
    pub installed: bool,
    pub message: String,
}

/// Per-file outcome of a completed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub original_filename: String,
    pub outcome: ConversionOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Converted {
        markdown_filename: String,
        download_url: String,
    },
    Failed {
        error_message: Option<String>,
    },
}

/// The upload session: selection, display phase, batch results, capability,
/// and the simulated progress indicator. Mutated only through `update`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    selection: Vec<SelectedFile>,
    phase: ViewPhase,
    batch_id: Option<String>,
    results: Vec<ConversionResult>,
    error_message: Option<String>,
    capability: Option<CapabilityStatus>,
    progress_percent: u8,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects the state into render data for the visible panel.
    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            capability_warning: self
                .capability
                .as_ref()
                .filter(|status| !status.installed)
                .map(|status| status.message.clone()),
            convert_enabled: self.capability_allows_submit(),
            file_count: self.selection.len(),
            file_list_visible: !self.selection.is_empty(),
            files: self.selection.iter().map(FileRowView::from_selected).collect(),
            progress_percent: self.progress_percent,
            results: self.results.iter().map(ResultRowView::from_result).collect(),
            error_message: self.error_message.clone(),
            download_all_enabled: self.batch_id.is_some(),
        }
    }

    /// Returns whether the state changed since the last call, clearing the
    /// flag. The app re-renders only when this reports true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub(crate) fn selected_files(&self) -> &[SelectedFile] {
        &self.selection
    }

    pub(crate) fn remaining_capacity(&self) -> usize {
        MAX_FILES.saturating_sub(self.selection.len())
    }

    /// Appends already-validated, already-clamped files to the selection.
    pub(crate) fn append_files(&mut self, files: Vec<SelectedFile>) {
        self.selection.extend(files);
        self.dirty = true;
    }

    /// Removes the file at `index`. A stale index is a silent no-op.
    pub(crate) fn remove_file(&mut self, index: usize) {
        if index < self.selection.len() {
            self.selection.remove(index);
            self.dirty = true;
        }
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
        self.dirty = true;
    }

    /// The convert control is disabled only by a confirmed-missing engine.
    /// An unknown status (probe not yet answered, or failed) leaves it
    /// enabled.
    pub(crate) fn capability_allows_submit(&self) -> bool {
        self.capability
            .as_ref()
            .map(|status| status.installed)
            .unwrap_or(true)
    }

    pub(crate) fn set_capability(&mut self, status: CapabilityStatus) {
        self.capability = Some(status);
        self.dirty = true;
    }

    pub(crate) fn begin_upload(&mut self) {
        self.phase = ViewPhase::Uploading;
        self.progress_percent = 0;
        self.error_message = None;
        self.results.clear();
        self.dirty = true;
    }

    /// Advances the simulated indicator, never past the cap. Ignored outside
    /// the uploading phase so a late tick cannot mutate a hidden panel.
    pub(crate) fn apply_progress(&mut self, increment: u8) {
        if self.phase != ViewPhase::Uploading || self.progress_percent >= PROGRESS_CAP {
            return;
        }
        let next = self
            .progress_percent
            .saturating_add(increment)
            .min(PROGRESS_CAP);
        if next != self.progress_percent {
            self.progress_percent = next;
            self.dirty = true;
        }
    }

    pub(crate) fn complete_upload(&mut self, batch_id: String, results: Vec<ConversionResult>) {
        self.progress_percent = 100;
        self.batch_id = Some(batch_id);
        self.results = results;
        self.dirty = true;
    }

    /// Switches to the results panel once the reveal delay has elapsed.
    pub(crate) fn reveal_results(&mut self) {
        if self.phase == ViewPhase::Uploading && self.batch_id.is_some() {
            self.phase = ViewPhase::Results;
            self.dirty = true;
        }
    }

    pub(crate) fn fail_upload(&mut self, message: String) {
        self.phase = ViewPhase::Error;
        self.error_message = Some(message);
        self.dirty = true;
    }

    pub(crate) fn batch_id(&self) -> Option<&str> {
        self.batch_id.as_deref()
    }

    pub(crate) fn result(&self, index: usize) -> Option<&ConversionResult> {
        self.results.get(index)
    }

    /// Returns to the selection panel, discarding the finished batch.
    pub(crate) fn reset(&mut self) {
        if !matches!(self.phase, ViewPhase::Results | ViewPhase::Error) {
            return;
        }
        self.selection.clear();
        self.batch_id = None;
        self.results.clear();
        self.error_message = None;
        self.progress_percent = 0;
        self.phase = ViewPhase::Selecting;
        self.dirty = true;
    }
}
