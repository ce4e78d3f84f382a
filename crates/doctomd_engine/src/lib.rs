//! DocToMD engine: HTTP client for the conversion service and effect execution.
mod api;
mod engine;
mod progress;
mod types;

pub use api::{
    extract_error_message, ConvertService, HttpConvertService, ServiceSettings,
    GENERIC_UPLOAD_ERROR,
};
pub use engine::{EngineConfig, EngineHandle};
pub use progress::TickerSettings;
pub use types::{
    BatchResponse, EngineEvent, FileResult, PandocStatus, ServiceError, UploadEntry,
    UploadRejection,
};
