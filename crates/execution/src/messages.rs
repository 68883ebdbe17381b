//! Ordered message bag attached to each execution result

use serde::{Deserialize, Serialize};

/// Message key for informational messages.
pub const MSG_MESSAGE: &str = "Message";

/// Message key for error messages.
pub const MSG_ERROR_MESSAGE: &str = "Error Message";

/// Message key for formatted error traces.
pub const MSG_STACKTRACE: &str = "Stack Trace";

/// Message key for the aggregated child-state summary.
pub const MSG_COMPOSITE: &str = "Composite Execution Result";

/// Message key for report entries.
pub const MSG_REPORT: &str = "Report";

/// Ordered mapping of message id to message text.
///
/// Entries preserve insertion order. Adding a message under an existing
/// id appends to the existing text with a line separator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageBag {
    entries: Vec<(String, String)>,
}

impl MessageBag {
    /// Create an empty message bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message under an id.
    ///
    /// If the id already exists, the message is appended to the existing
    /// text separated by a newline.
    pub fn add(&mut self, id: &str, message: &str) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(key, _)| key == id) {
            existing.push('\n');
            existing.push_str(message);
            return;
        }
        self.entries.push((id.to_string(), message.to_string()));
    }

    /// Replace the message under an id, adding it if absent
    pub fn add_or_replace(&mut self, id: &str, message: &str) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(key, _)| key == id) {
            message.clone_into(existing);
            return;
        }
        self.entries.push((id.to_string(), message.to_string()));
    }

    /// Get the message under an id
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, message)| message.as_str())
    }

    /// Check if a message exists under an id
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, message)| (key.as_str(), message.as_str()))
    }

    /// Number of distinct message ids
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the bag is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
