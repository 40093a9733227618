use crate::{RequestId, ResultSet, UploadCandidate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one analysis request for `candidate`.
    SubmitAnalysis {
        request_id: RequestId,
        candidate: UploadCandidate,
    },
    /// Render `snapshot` as a paginated document and hand it to the save sink.
    ExportDocument { snapshot: ResultSet },
    /// Serialize `snapshot` and hand it to the save sink.
    ExportSnapshot { snapshot: ResultSet },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Document,
    Snapshot,
}
