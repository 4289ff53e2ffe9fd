//! Board behaviour settings.

use serde::{Deserialize, Serialize};

/// Settings for board validation and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Whether adds and edits require a due date.
    pub require_due_date: bool,
    /// Whether due dates before today are rejected when set.
    pub reject_past_due_dates: bool,
    /// Days ahead within which a due date counts as due soon.
    pub due_soon_days: i64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            require_due_date: true,
            reject_past_due_dates: true,
            due_soon_days: 3,
        }
    }
}

impl BoardConfig {
    /// Creates a configuration that accepts tasks without due dates and
    /// due dates in the past.
    ///
    /// Useful for importing existing boards.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            require_due_date: false,
            reject_past_due_dates: false,
            ..Default::default()
        }
    }
}
