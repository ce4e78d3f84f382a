//! DocToMD core: pure upload-session state machine and view-model helpers.
mod effect;
mod format;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use format::format_file_size;
pub use msg::Msg;
pub use state::{
    AppState, CapabilityStatus, ConversionOutcome, ConversionResult, DocKind, FileCandidate,
    SelectedFile, ViewPhase, MAX_FILES, PROGRESS_CAP,
};
pub use update::update;
pub use view_model::{AppViewModel, FileRowView, ResultRowView, GENERIC_FAILURE_MESSAGE};
