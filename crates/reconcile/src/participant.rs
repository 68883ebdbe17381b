//! Resolved attribute participants
//!
//! A participant is the outcome of resolving one attribute name against
//! one side of the model pair (declared or live). Resolution failures
//! are data, not errors: a participant in `Failed` state carries the
//! resolution error and lets traversal of sibling attributes continue.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resolution outcome of a participant's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueState {
    /// The attribute resolved to a value
    Success,
    /// The attribute exists but its value is nil
    Nil,
    /// The attribute could not be resolved
    Failed,
}

/// Resolved view of one attribute on one model side.
///
/// Invariant: a `Success` or `Nil` participant never carries a
/// resolution error; a `Failed` participant always does.
#[derive(Debug, Clone)]
pub struct ResolvedParticipant {
    name: String,
    value: Option<Value>,
    value_state: ValueState,
    resolution_error: Option<Error>,
}

impl ResolvedParticipant {
    /// Create a successfully resolved participant
    pub fn successful(name: &str, value: Value) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value),
            value_state: ValueState::Success,
            resolution_error: None,
        }
    }

    /// Create a participant whose attribute exists with a nil value
    pub fn nil(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            value_state: ValueState::Nil,
            resolution_error: None,
        }
    }

    /// Create a participant whose resolution failed
    pub fn failed(name: &str, error: Error) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            value_state: ValueState::Failed,
            resolution_error: Some(error),
        }
    }

    /// Attribute name this participant was resolved for
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved value, if any
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Resolution outcome
    pub fn value_state(&self) -> ValueState {
        self.value_state
    }

    /// Resolution error of a failed participant
    pub fn resolution_error(&self) -> Option<&Error> {
        self.resolution_error.as_ref()
    }

    /// Check if the value resolved successfully
    pub fn is_success(&self) -> bool {
        self.value_state == ValueState::Success
    }

    /// Check if the attribute exists with a nil value
    pub fn is_nil(&self) -> bool {
        self.value_state == ValueState::Nil
    }

    /// Check if resolution failed
    pub fn is_failed(&self) -> bool {
        self.value_state == ValueState::Failed
    }

    /// Coarse type descriptor of the resolved value
    pub fn type_name(&self) -> &'static str {
        match &self.value {
            Some(Value::Object(_)) => "object",
            Some(Value::Array(_)) => "collection",
            Some(Value::String(_)) => "string",
            Some(Value::Number(_)) => "number",
            Some(Value::Bool(_)) => "boolean",
            Some(Value::Null) | None => "nil",
        }
    }

    /// Single-line rendering of the value for descriptions and reports
    pub fn value_as_single_line(&self) -> String {
        match &self.value {
            Some(Value::String(text)) => text.clone(),
            Some(value) => value.to_string(),
            None => "nil".to_string(),
        }
    }

    /// Resolution error text, or an empty string for resolved participants
    pub fn error_as_single_line(&self) -> String {
        self.resolution_error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}
