//! Due-date advisor port.

use crate::board::domain::parse_iso_date;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for advisor calls.
pub type AdvisorResult<T> = Result<T, AdvisorError>;

/// Suggests a due date from a free-text task description.
#[async_trait]
pub trait DueDateAdvisor: Send + Sync {
    /// Returns a suggested due date with a short rationale.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError`] when no suggestion could be produced.
    async fn suggest(&self, description: &str) -> AdvisorResult<DueDateSuggestion>;
}

/// Advisor output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDateSuggestion {
    /// Suggested date, ISO-8601.
    #[serde(rename = "suggestedDueDate")]
    pub suggested_date: String,
    /// Why this date was picked.
    pub reasoning: String,
}

impl DueDateSuggestion {
    /// Creates a suggestion.
    #[must_use]
    pub fn new(suggested_date: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            suggested_date: suggested_date.into(),
            reasoning: reasoning.into(),
        }
    }

    /// Parses the suggested date.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.suggested_date)
    }
}

/// Errors returned by advisor implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdvisorError {
    /// The advisor could not be reached.
    #[error("due-date advisor unavailable: {0}")]
    Unavailable(String),

    /// The advisor answered with something unusable.
    #[error("invalid advisor response: {0}")]
    InvalidResponse(String),
}
