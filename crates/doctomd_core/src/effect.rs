use crate::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the service whether the conversion engine is available.
    ProbeCapability,
    /// POST the selection as one multipart batch.
    SubmitBatch { files: Vec<SelectedFile> },
    /// Fire `Msg::RevealDelayElapsed` after the configured pause.
    ScheduleResultsReveal,
    /// Fetch the zip bundle for a finished batch.
    OpenBundleDownload { batch_id: String },
    /// Fetch one converted file through its result-row link.
    DownloadFile { url: String, filename: String },
    /// Surface a transient, non-blocking warning.
    ShowNotice { message: String },
}
