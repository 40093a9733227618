use crate::view_model::{
    AnswerView, AppViewModel, ExportStatus, OptionView, QaRowView, RequestStatus,
};
use crate::{ExportKind, QaRecord, ResultSet, ResultStore, UploadCandidate};

/// Identifies one submission; increases by one per accepted submit.
pub type RequestId = u64;

/// Lifecycle of the analysis request. Exactly one value is live at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting {
        request_id: RequestId,
    },
    Succeeded(ResultSet),
    Failed(String),
}

impl RequestState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, RequestState::Submitting { .. })
    }

    fn status(&self) -> RequestStatus {
        match self {
            RequestState::Idle => RequestStatus::Idle,
            RequestState::Submitting { .. } => RequestStatus::Submitting,
            RequestState::Succeeded(_) => RequestStatus::Succeeded,
            RequestState::Failed(_) => RequestStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    request: RequestState,
    selected: Option<UploadCandidate>,
    results: ResultStore,
    last_request_id: RequestId,
    expanded: Option<usize>,
    last_export: Option<ExportStatus>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_state(&self) -> &RequestState {
        &self.request
    }

    pub fn selected(&self) -> Option<&UploadCandidate> {
        self.selected.as_ref()
    }

    pub fn results(&self) -> ResultSet {
        self.results.current()
    }

    pub fn view(&self) -> AppViewModel {
        let records = self.results.current();
        let error = match &self.request {
            RequestState::Failed(message) => Some(message.clone()),
            _ => None,
        };
        let is_loading = self.request.is_submitting();
        AppViewModel {
            status: self.request.status(),
            file_name: self.selected.as_ref().map(|c| c.name().to_string()),
            is_loading,
            can_submit: self.selected.is_some() && !is_loading,
            error,
            result_count: records.len(),
            results: records
                .iter()
                .enumerate()
                .map(|(index, record)| row_view(index, record, self.expanded == Some(index)))
                .collect(),
            last_export: self.last_export.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn in_flight(&self) -> Option<RequestId> {
        match self.request {
            RequestState::Submitting { request_id } => Some(request_id),
            _ => None,
        }
    }

    pub(crate) fn select(&mut self, candidate: UploadCandidate) {
        self.selected = Some(candidate);
        if matches!(self.request, RequestState::Failed(_)) {
            self.request = RequestState::Idle;
        }
        self.mark_dirty();
    }

    pub(crate) fn reject(&mut self, reason: String) {
        self.selected = None;
        self.request = RequestState::Failed(reason);
        self.mark_dirty();
    }

    /// Moves to `Submitting` and clears the previous results.
    pub(crate) fn begin_submission(&mut self) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.results.clear();
        self.expanded = None;
        self.last_export = None;
        self.request = RequestState::Submitting { request_id };
        self.mark_dirty();
        request_id
    }

    pub(crate) fn complete_success(&mut self, records: Vec<QaRecord>) {
        let snapshot = self.results.replace(records);
        self.request = RequestState::Succeeded(snapshot);
        self.selected = None;
        self.mark_dirty();
    }

    pub(crate) fn complete_failure(&mut self, message: String) {
        self.request = RequestState::Failed(message);
        self.selected = None;
        self.mark_dirty();
    }

    pub(crate) fn toggle_expanded(&mut self, index: usize) -> bool {
        if index >= self.results.len() {
            return false;
        }
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
        self.mark_dirty();
        true
    }

    pub(crate) fn record_export(&mut self, kind: ExportKind, result: Result<String, String>) {
        self.last_export = Some(ExportStatus { kind, result });
        self.mark_dirty();
    }
}

fn row_view(index: usize, record: &QaRecord, expanded: bool) -> QaRowView {
    let answer = match &record.options {
        Some(options) => AnswerView::MultipleChoice(
            options
                .iter()
                .map(|(key, text)| OptionView {
                    key: key.clone(),
                    text: text.clone(),
                    selected: record.answer == *key,
                })
                .collect(),
        ),
        None => AnswerView::FreeText(record.answer.clone()),
    };
    QaRowView {
        number: index + 1,
        question: record.question.clone(),
        expanded,
        answer,
    }
}
