use std::path::PathBuf;

use serde::Deserialize;

/// Wire payload of `GET /api/check-pandoc/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PandocStatus {
    pub pandoc_installed: bool,
    pub message: String,
}

/// Wire payload of a successful `POST /api/upload/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchResponse {
    pub id: String,
    pub files: Vec<FileResult>,
}

/// One per-file row of the upload response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileResult {
    pub original_filename: String,
    pub status: String,
    #[serde(default)]
    pub markdown_filename: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl FileResult {
    /// Whether the service reports this row as converted. Any other status
    /// string counts as a failure.
    pub fn is_converted(&self) -> bool {
        self.status == "converted"
    }
}

/// Body shape of a non-2xx upload response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UploadRejection {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

/// One file queued for upload: the display name plus the local bytes to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEntry {
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The service answered with a non-success status; the message is
    /// already extracted for display.
    #[error("{0}")]
    Rejected(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response payload: {0}")]
    Payload(String),
    #[error("could not read {filename}: {message}")]
    FileRead { filename: String, message: String },
    #[error("io error: {0}")]
    Io(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Everything the engine reports back to the session loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The one-shot startup capability probe answered or failed.
    CapabilityChecked {
        result: Result<PandocStatus, ServiceError>,
    },
    /// Simulated-progress step emitted while an upload is outstanding.
    UploadProgress { increment: u8 },
    /// The batch upload finished, one way or the other. Never followed by
    /// further `UploadProgress` events for that submission.
    UploadFinished {
        result: Result<BatchResponse, ServiceError>,
    },
    /// The zip bundle landed on disk.
    BundleSaved {
        result: Result<PathBuf, ServiceError>,
    },
    /// A single converted file landed on disk.
    FileSaved {
        result: Result<PathBuf, ServiceError>,
    },
}
