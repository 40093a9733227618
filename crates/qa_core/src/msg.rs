use crate::{ExportKind, QaRecord, RequestId, UploadCandidate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file (or cleared the picker).
    FileSelected(Option<UploadCandidate>),
    /// User asked to analyze the currently selected file.
    SubmitClicked,
    /// Direct submission of a candidate, bypassing the selection.
    SubmitFile(Option<UploadCandidate>),
    /// Engine: the analysis service returned results.
    AnalysisSucceeded {
        request_id: RequestId,
        records: Vec<QaRecord>,
    },
    /// Engine: the analysis request failed.
    AnalysisFailed {
        request_id: RequestId,
        message: String,
    },
    /// User clicked "Export as PDF".
    ExportDocumentClicked,
    /// User clicked "Export as JSON".
    ExportSnapshotClicked,
    /// Engine finished an export; `Ok` carries the saved location.
    ExportCompleted {
        kind: ExportKind,
        result: Result<String, String>,
    },
    /// User expanded or collapsed one result row.
    ResultToggled { index: usize },
}
