use std::sync::Arc;

/// The only media type the analysis service accepts.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Human-readable reason for any rejected or missing file.
pub const REJECTION_REASON: &str = "Please select a PDF file";

/// A file picked by the user, as declared by the picker.
///
/// Bytes are shared so the candidate can travel through effects without
/// copying the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    name: String,
    declared_type: String,
    bytes: Arc<[u8]>,
}

impl UploadCandidate {
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            bytes: Arc::from(bytes.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted(UploadCandidate),
    Rejected(String),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }
}

/// Classifies a candidate by its declared media type.
///
/// The comparison is an exact, case-sensitive match; file contents are not
/// inspected.
pub fn validate(candidate: Option<&UploadCandidate>) -> ValidationResult {
    match candidate {
        Some(candidate) if candidate.declared_type == PDF_MEDIA_TYPE => {
            ValidationResult::Accepted(candidate.clone())
        }
        _ => ValidationResult::Rejected(REJECTION_REASON.to_string()),
    }
}
