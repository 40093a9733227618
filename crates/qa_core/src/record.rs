use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Shared, read-only snapshot of analysis results in display order.
pub type ResultSet = Arc<[QaRecord]>;

/// One generated question with either a free-text answer or a
/// multiple-choice answer key into `options`.
///
/// Field order here is the serialized field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    pub question: String,
    pub answer: String,
    /// Choice key to choice text, in the order the service sent them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<IndexMap<String, String>>,
}

impl QaRecord {
    pub fn free_text(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            options: None,
        }
    }

    pub fn multiple_choice<K, V>(
        question: impl Into<String>,
        options: impl IntoIterator<Item = (K, V)>,
        answer: impl Into<String>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            question: question.into(),
            answer: answer.into(),
            options: Some(
                options
                    .into_iter()
                    .map(|(key, text)| (key.into(), text.into()))
                    .collect(),
            ),
        }
    }

    pub fn is_multiple_choice(&self) -> bool {
        self.options.is_some()
    }

    /// True when `key` is the answer of a multiple-choice record.
    pub fn is_selected(&self, key: &str) -> bool {
        self.is_multiple_choice() && self.answer == key
    }

    /// Whether the answer key names one of the options.
    pub fn answer_in_options(&self) -> bool {
        self.options
            .as_ref()
            .is_some_and(|options| options.contains_key(&self.answer))
    }
}
