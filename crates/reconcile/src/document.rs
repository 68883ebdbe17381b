//! JSON document resolver
//!
//! Resolves attributes and collection entries against `serde_json`
//! documents. One instance serves as the primary resolver over the
//! declared document and another as the secondary resolver over the
//! live snapshot; the contract is identical on both sides.

use crate::error::{Error, Result};
use crate::node::{NodeKind, ResolvedNode};
use crate::participant::ResolvedParticipant;
use crate::resolver::{ModelResolver, find_attribute_key};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Model resolver over JSON documents.
///
/// Attributes registered as enumerations classify scalar values as
/// `Enumeration` instead of `Primitive`; the set stands in for schema
/// knowledge the document itself does not carry.
#[derive(Debug, Default, Clone)]
pub struct DocumentResolver {
    enumerations: BTreeSet<String>,
}

impl DocumentResolver {
    /// Create a resolver with no registered enumeration attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver classifying the given attribute names as
    /// enumerations (matched case-insensitively)
    pub fn with_enumerations<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            enumerations: names
                .into_iter()
                .map(str::to_ascii_lowercase)
                .collect(),
        }
    }

    fn classify(&self, participant: &ResolvedParticipant) -> NodeKind {
        match participant.value() {
            Some(Value::Object(_)) => NodeKind::Object,
            Some(Value::Array(_)) => NodeKind::Collection,
            _ if self
                .enumerations
                .contains(&participant.name().to_ascii_lowercase()) =>
            {
                NodeKind::Enumeration
            }
            _ => NodeKind::Primitive,
        }
    }
}

impl ModelResolver for DocumentResolver {
    fn resolve_attribute_names(&self, participant: &ResolvedParticipant) -> Result<Vec<String>> {
        match participant.value() {
            Some(Value::Object(map)) => Ok(map.keys().cloned().collect()),
            _ => Err(Error::ResolutionFailed(format!(
                "participant [{}] is not an introspectable object",
                participant.name()
            ))),
        }
    }

    fn resolve_attribute(
        &self,
        name: &str,
        participant: &ResolvedParticipant,
    ) -> ResolvedParticipant {
        let Some(Value::Object(map)) = participant.value() else {
            return ResolvedParticipant::failed(
                name,
                Error::ResolutionFailed(format!(
                    "attribute [{name}] cannot be resolved on [{}]",
                    participant.name()
                )),
            );
        };
        match find_attribute_key(name, map.keys().map(String::as_str)) {
            Some(key) => match &map[key] {
                Value::Null => ResolvedParticipant::nil(name),
                value => ResolvedParticipant::successful(name, value.clone()),
            },
            None => ResolvedParticipant::failed(
                name,
                Error::ResolutionFailed(format!(
                    "attribute [{name}] not found on [{}]",
                    participant.name()
                )),
            ),
        }
    }

    fn resolve_collection_values(
        &self,
        participant: &ResolvedParticipant,
    ) -> Result<BTreeMap<String, ResolvedParticipant>> {
        let Some(Value::Array(items)) = participant.value() else {
            return Err(Error::ResolutionFailed(format!(
                "participant [{}] is not a collection",
                participant.name()
            )));
        };
        let mut values = BTreeMap::new();
        for (index, item) in items.iter().enumerate() {
            let id = item
                .get("name")
                .and_then(Value::as_str)
                .map_or_else(|| index.to_string(), str::to_string);
            values.insert(id.clone(), ResolvedParticipant::successful(&id, item.clone()));
        }
        Ok(values)
    }

    fn create_resolved_type(
        &self,
        primary: ResolvedParticipant,
        secondary: ResolvedParticipant,
    ) -> Rc<ResolvedNode> {
        let kind = if primary.is_success() || primary.is_nil() {
            self.classify(&primary)
        } else if secondary.is_success() || secondary.is_nil() {
            self.classify(&secondary)
        } else {
            NodeKind::Unresolved
        };
        ResolvedNode::new(kind, primary, secondary)
    }
}
