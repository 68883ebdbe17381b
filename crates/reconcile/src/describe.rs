//! Human-readable node descriptions

use crate::node::{NodeKind, ResolvedNode};
use crate::participant::ResolvedParticipant;

/// Generation of the one-line description used for a node's execution
/// result and for report entries.
pub trait DescribeNode {
    /// Describe a resolved node
    fn describe(&self, node: &ResolvedNode) -> String;
}

/// Default description formats:
/// objects `name:type`, collections `name:type[]`,
/// enumerations and primitives `name=value`, unresolved `name (unresolved)`.
#[derive(Debug, Default)]
pub struct DefaultDescriptionGenerator;

impl DefaultDescriptionGenerator {
    /// Create a description generator
    pub fn new() -> Self {
        Self
    }

    fn resolved_side(node: &ResolvedNode) -> &ResolvedParticipant {
        if node.primary().is_success() || node.primary().is_nil() {
            node.primary()
        } else {
            node.secondary()
        }
    }
}

impl DescribeNode for DefaultDescriptionGenerator {
    fn describe(&self, node: &ResolvedNode) -> String {
        let participant = Self::resolved_side(node);
        let name = participant.name();
        match node.kind() {
            NodeKind::Object => format!("{name}:{}", participant.type_name()),
            NodeKind::Collection => format!("{name}:{}[]", element_type_name(participant)),
            NodeKind::Enumeration | NodeKind::Primitive => {
                format!("{name}={}", participant.value_as_single_line())
            }
            NodeKind::Unresolved => format!("{name} (unresolved)"),
        }
    }
}

fn element_type_name(participant: &ResolvedParticipant) -> &'static str {
    use serde_json::Value;
    match participant
        .value()
        .and_then(Value::as_array)
        .and_then(|items| items.first())
    {
        Some(Value::Object(_)) => "object",
        Some(Value::Array(_)) => "collection",
        Some(Value::String(_)) => "string",
        Some(Value::Number(_)) => "number",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Null) | None => "nil",
    }
}
