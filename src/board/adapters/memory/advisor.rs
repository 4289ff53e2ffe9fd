//! Advisor returning a preset answer.

use async_trait::async_trait;

use crate::board::ports::{AdvisorError, AdvisorResult, DueDateAdvisor, DueDateSuggestion};

/// Advisor that answers every request with the same outcome.
#[derive(Debug, Clone)]
pub struct FixedDueDateAdvisor {
    outcome: AdvisorResult<DueDateSuggestion>,
}

impl FixedDueDateAdvisor {
    /// Always suggests `suggestion`.
    #[must_use]
    pub const fn suggesting(suggestion: DueDateSuggestion) -> Self {
        Self {
            outcome: Ok(suggestion),
        }
    }

    /// Always fails with `error`.
    #[must_use]
    pub const fn failing(error: AdvisorError) -> Self {
        Self {
            outcome: Err(error),
        }
    }

    /// Always reports the advisor as unavailable.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::failing(AdvisorError::Unavailable("no advisor configured".to_owned()))
    }
}

#[async_trait]
impl DueDateAdvisor for FixedDueDateAdvisor {
    async fn suggest(&self, _description: &str) -> AdvisorResult<DueDateSuggestion> {
        self.outcome.clone()
    }
}
