//! Document and snapshot exports of a result set.
//!
//! Both exports are pure functions of the records they are given; the
//! [`Exporter`] only adds the clock and the save sink around them.
mod layout;
mod metrics;
mod pdf;
mod sink;
mod snapshot;
mod wrap;

use std::path::PathBuf;
use std::sync::Arc;

use engine_logging::engine_info;
use qa_core::QaRecord;

use crate::persist::PersistError;

pub use layout::{
    layout_document, DocumentLayout, DocumentPage, FontSpec, LayoutConfig, Rgb, TextBlock,
    TextStyle, DOCUMENT_TITLE,
};
pub use metrics::{text_width_mm, FontFace};
pub use pdf::render_pdf;
pub use sink::{DirectorySink, SaveSink};
pub use snapshot::{export_snapshot, parse_snapshot};
pub use wrap::wrap_text;

pub const DOCUMENT_FILENAME: &str = "academic_qa_results.pdf";
pub const SNAPSHOT_FILENAME: &str = "academic_qa_results.json";

/// Produces the "Generated:" timestamp shown in the document header.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("pdf error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("pdf write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Lays out and renders `records` into PDF bytes.
///
/// Output is byte-identical for identical inputs.
pub fn export_document(
    records: &[QaRecord],
    generated_at: &str,
    config: &LayoutConfig,
) -> Result<Vec<u8>, ExportError> {
    let layout = layout_document(records, generated_at, config);
    render_pdf(&layout, config)
}

/// Runs both exports and hands the output to a save sink under the fixed
/// filenames.
pub struct Exporter {
    layout: LayoutConfig,
    clock: Clock,
    sink: Box<dyn SaveSink>,
}

impl Exporter {
    pub fn new(layout: LayoutConfig, clock: Clock, sink: Box<dyn SaveSink>) -> Self {
        Self {
            layout,
            clock,
            sink,
        }
    }

    pub fn export_document(&self, records: &[QaRecord]) -> Result<PathBuf, ExportError> {
        let generated_at = (self.clock)();
        let bytes = export_document(records, &generated_at, &self.layout)?;
        let path = self.sink.save(DOCUMENT_FILENAME, &bytes)?;
        engine_info!(
            "Exported {} records to {:?} ({} bytes)",
            records.len(),
            path,
            bytes.len()
        );
        Ok(path)
    }

    pub fn export_snapshot(&self, records: &[QaRecord]) -> Result<PathBuf, ExportError> {
        let json = export_snapshot(records)?;
        let path = self.sink.save(SNAPSHOT_FILENAME, json.as_bytes())?;
        engine_info!("Exported {} records to {:?}", records.len(), path);
        Ok(path)
    }
}
