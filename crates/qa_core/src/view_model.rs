use crate::ExportKind;

/// Coarse request status for renderers that do not need the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStatus {
    pub kind: ExportKind,
    pub result: Result<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: RequestStatus,
    pub file_name: Option<String>,
    pub is_loading: bool,
    pub can_submit: bool,
    pub error: Option<String>,
    pub result_count: usize,
    pub results: Vec<QaRowView>,
    pub last_export: Option<ExportStatus>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaRowView {
    /// 1-based display number.
    pub number: usize,
    pub question: String,
    pub expanded: bool,
    pub answer: AnswerView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerView {
    FreeText(String),
    MultipleChoice(Vec<OptionView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub key: String,
    pub text: String,
    pub selected: bool,
}
