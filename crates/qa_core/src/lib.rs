//! Q&A core: pure upload/analysis state machine and view-model helpers.
mod controller;
mod effect;
mod msg;
mod record;
mod state;
mod store;
mod update;
mod validate;
mod view_model;

pub use controller::Controller;
pub use effect::{Effect, ExportKind};
pub use msg::Msg;
pub use record::{QaRecord, ResultSet};
pub use state::{AppState, RequestId, RequestState};
pub use store::ResultStore;
pub use update::update;
pub use validate::{validate, UploadCandidate, ValidationResult, PDF_MEDIA_TYPE, REJECTION_REASON};
pub use view_model::{
    AnswerView, AppViewModel, ExportStatus, OptionView, QaRowView, RequestStatus,
};

/// Message shown when the analysis service fails without a usable `detail`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Error processing PDF";
