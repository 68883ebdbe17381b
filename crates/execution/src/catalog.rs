//! Message catalog with positional argument formatting

use std::collections::HashMap;

/// Lookup and formatting of human-readable messages.
///
/// Every description and completion message produced by the core goes
/// through this port, keeping the wording in one replaceable place.
pub trait MessageProvider {
    /// Look up the message registered under a key
    fn message(&self, key: &str) -> String;

    /// Look up a message and substitute `{0}`, `{1}`, ... placeholders
    fn message_with_args(&self, key: &str, args: &[&str]) -> String;
}

/// Message catalog backed by `key = value` property lines.
///
/// Lines starting with `#` and blank lines are ignored. Missing keys
/// resolve to a bracketed placeholder rather than an error, so a typo
/// in a key degrades a message instead of an operation.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    entries: HashMap<String, String>,
}

impl MessageCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from property-style text
    pub fn from_properties(text: &str) -> Self {
        let mut entries = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                entries.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { entries }
    }

    /// Register a message under a key
    pub fn insert(&mut self, key: &str, message: &str) {
        self.entries.insert(key.to_string(), message.to_string());
    }
}

impl MessageProvider for MessageCatalog {
    fn message(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("[missing message: {key}]"))
    }

    fn message_with_args(&self, key: &str, args: &[&str]) -> String {
        format_positional(&self.message(key), args)
    }
}

/// Substitute `{0}`, `{1}`, ... placeholders in a template
fn format_positional(template: &str, args: &[&str]) -> String {
    let mut formatted = template.to_string();
    for (index, arg) in args.iter().enumerate() {
        formatted = formatted.replace(&format!("{{{index}}}"), arg);
    }
    formatted
}
