use crate::format::format_file_size;
use crate::{ConversionOutcome, ConversionResult, DocKind, SelectedFile, ViewPhase};

/// Fallback text for failure rows without a server-provided message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Conversion failed";

/// Render data for the visible panel. Pure projection of `AppState`;
/// contains everything a surface needs and nothing it must compute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: ViewPhase,
    /// Persistent banner text when the conversion engine is missing.
    pub capability_warning: Option<String>,
    pub convert_enabled: bool,
    pub file_count: usize,
    /// The file list is hidden while the selection is empty.
    pub file_list_visible: bool,
    pub files: Vec<FileRowView>,
    pub progress_percent: u8,
    pub results: Vec<ResultRowView>,
    pub error_message: Option<String>,
    pub download_all_enabled: bool,
}

/// One row of the selected-files list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub name: String,
    pub size_label: String,
    pub icon: &'static str,
}

impl FileRowView {
    pub(crate) fn from_selected(file: &SelectedFile) -> Self {
        Self {
            name: file.name.clone(),
            size_label: format_file_size(file.size_bytes),
            icon: icon_for(file.kind),
        }
    }
}

fn icon_for(kind: DocKind) -> &'static str {
    match kind {
        DocKind::Doc => "📄",
        DocKind::Docx => "📝",
    }
}

/// One row of the results panel, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultRowView {
    Converted {
        original: String,
        markdown: String,
        download_url: String,
    },
    Failed {
        original: String,
        message: String,
    },
}

impl ResultRowView {
    pub(crate) fn from_result(result: &ConversionResult) -> Self {
        match &result.outcome {
            ConversionOutcome::Converted {
                markdown_filename,
                download_url,
            } => ResultRowView::Converted {
                original: result.original_filename.clone(),
                markdown: markdown_filename.clone(),
                download_url: download_url.clone(),
            },
            ConversionOutcome::Failed { error_message } => ResultRowView::Failed {
                original: result.original_filename.clone(),
                message: error_message
                    .clone()
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            },
        }
    }
}
