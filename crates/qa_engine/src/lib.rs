//! Q&A engine: analysis requests, exports and effect execution.
mod client;
mod engine;
pub mod export;
mod persist;
mod types;

pub use client::{AnalysisClient, AnalysisSettings, ReqwestAnalysisClient, DEFAULT_ENDPOINT};
pub use engine::{EngineConfig, EngineHandle, UNKNOWN_GENERATED_AT};
pub use export::{
    export_document, export_snapshot, layout_document, parse_snapshot, render_pdf, DirectorySink,
    DocumentLayout, DocumentPage, ExportError, Exporter, LayoutConfig, SaveSink, TextBlock,
    TextStyle, DOCUMENT_FILENAME, SNAPSHOT_FILENAME,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{AnalysisError, EngineEvent, FailureKind};
