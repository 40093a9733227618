use qa_core::QaRecord;

use super::ExportError;

/// Pretty-printed JSON (2-space indent) of the full result set.
///
/// Field order follows [`QaRecord`] and option keys keep their order, so an
/// unchanged result set always exports to the same bytes.
pub fn export_snapshot(records: &[QaRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn parse_snapshot(text: &str) -> Result<Vec<QaRecord>, ExportError> {
    Ok(serde_json::from_str(text)?)
}
