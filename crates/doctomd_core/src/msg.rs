use crate::{ConversionResult, FileCandidate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User dropped or picked files; candidates are not yet validated.
    FilesPicked(Vec<FileCandidate>),
    /// User clicked the remove affordance of a file row.
    RemoveClicked { index: usize },
    /// User clicked Clear.
    ClearClicked,
    /// User clicked Convert.
    ConvertClicked,
    /// The simulated-progress ticker fired while the upload is outstanding.
    ProgressTicked { increment: u8 },
    /// The batch upload returned a success response.
    UploadSucceeded {
        batch_id: String,
        results: Vec<ConversionResult>,
    },
    /// The batch upload failed; `message` is already display-ready.
    UploadFailed { message: String },
    /// The short pause between the 100% snap and the results panel ended.
    RevealDelayElapsed,
    /// User clicked New Conversion or Try Again.
    ResetClicked,
    /// User clicked Download All.
    DownloadAllClicked,
    /// User clicked the download link of a single result row.
    DownloadFileClicked { index: usize },
    /// The startup capability probe answered.
    CapabilityProbed { installed: bool, message: String },
}
