//! Registry of people tasks can be assigned to.

use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Ordered set of unique assignee names.
///
/// Removing a name does not touch tasks already assigned to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssigneeRegistry {
    names: Vec<String>,
}

impl AssigneeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Builds a registry from names, trimming them and dropping blanks and
    /// duplicates while keeping first-seen order.
    #[must_use]
    pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        let mut registry = Self::new();
        for name in names {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                registry.insert(trimmed);
            }
        }
        registry
    }

    /// Adds `name` if absent. Returns whether the set changed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyAssigneeName`] for blank names.
    pub fn add(&mut self, name: impl Into<String>) -> Result<bool, ValidationError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyAssigneeName);
        }
        Ok(self.insert(trimmed))
    }

    fn insert(&mut self, trimmed: &str) -> bool {
        if self.contains(trimmed) {
            return false;
        }
        self.names.push(trimmed.to_owned());
        true
    }

    /// Removes `name` if present. Returns whether the set changed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|existing| existing != name.trim());
        self.names.len() != before
    }

    /// Returns `true` when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    /// Returns the names in insertion order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
