//! Model resolver contract and attribute name matching
//!
//! One resolver is implemented per model source; a traversal uses a
//! pair of them, primary for the declared model and secondary for the
//! live snapshot. Resolvers never raise for "attribute not found", only
//! for introspection failures of the node itself.

use crate::error::{Error, Result};
use crate::node::ResolvedNode;
use crate::participant::ResolvedParticipant;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Resolution of attributes and collection entries against one side of
/// the model pair.
pub trait ModelResolver {
    /// Enumerate the attribute names of a resolved participant.
    ///
    /// Fails when the participant's underlying node cannot be
    /// introspected (wrong shape, failed resolution upstream).
    fn resolve_attribute_names(&self, participant: &ResolvedParticipant) -> Result<Vec<String>>;

    /// Resolve one attribute by name on a participant.
    ///
    /// Name matching is case-insensitive and singular/plural tolerant.
    /// A missing attribute yields a `Failed` participant, never an error.
    fn resolve_attribute(
        &self,
        name: &str,
        participant: &ResolvedParticipant,
    ) -> ResolvedParticipant;

    /// Expand a collection participant into one entry per element,
    /// keyed by the element's identity. An empty collection yields an
    /// empty mapping.
    fn resolve_collection_values(
        &self,
        participant: &ResolvedParticipant,
    ) -> Result<BTreeMap<String, ResolvedParticipant>>;

    /// Synthesize a placeholder for a collection id present on the
    /// other side but absent here. The placeholder is what makes
    /// create/delete candidates visible to the convergence visitors.
    fn create_missing_collection_value(&self, id: &str) -> ResolvedParticipant {
        ResolvedParticipant::failed(
            id,
            Error::ResolutionFailed(format!("collection entry [{id}] doesn't exist")),
        )
    }

    /// Classify a participant pair into a resolved node.
    ///
    /// Classification follows the participant this resolver resolved
    /// successfully; the caller picks which resolver classifies based
    /// on which side succeeded.
    fn create_resolved_type(
        &self,
        primary: ResolvedParticipant,
        secondary: ResolvedParticipant,
    ) -> Rc<ResolvedNode>;
}

/// Check whether a requested attribute name matches a candidate.
///
/// Matching is case-insensitive and tolerates a singular/plural
/// difference in either direction, so `VirtualHostName` matches an
/// underlying `virtualHostNames` attribute.
pub fn attribute_name_matches(requested: &str, candidate: &str) -> bool {
    let requested = requested.to_ascii_lowercase();
    let candidate = candidate.to_ascii_lowercase();
    if requested == candidate {
        return true;
    }
    requested.strip_suffix('s') == Some(candidate.as_str())
        || candidate.strip_suffix('s') == Some(requested.as_str())
}

/// Find the key matching a requested name among candidate keys.
///
/// When several candidates match after normalization, the last match
/// wins and a warning names both attributes.
pub fn find_attribute_key<'a>(
    requested: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<&'a str> {
    let mut found: Option<&str> = None;
    for candidate in candidates {
        if attribute_name_matches(requested, candidate) {
            if let Some(previous) = found {
                log::warn!(
                    "attribute name [{requested}] matches both [{previous}] and [{candidate}], using [{candidate}]"
                );
            }
            found = Some(candidate);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(attribute_name_matches("port", "port"));
    }

    #[test]
    fn test_case_insensitive_match() {
        assert!(attribute_name_matches("ListenPort", "listenport"));
    }

    #[test]
    fn test_singular_matches_plural() {
        assert!(attribute_name_matches("VirtualHostName", "VirtualHostNames"));
    }

    #[test]
    fn test_plural_matches_singular() {
        assert!(attribute_name_matches("targets", "Target"));
    }

    #[test]
    fn test_unrelated_names_do_not_match() {
        assert!(!attribute_name_matches("port", "host"));
        assert!(!attribute_name_matches("ports", "port-list"));
    }

    #[test]
    fn test_find_attribute_key_prefers_last_on_collision() {
        let keys = ["Foo", "Foos"];
        let found = find_attribute_key("foo", keys.iter().copied());
        assert_eq!(found, Some("Foos"));
    }

    #[test]
    fn test_find_attribute_key_none() {
        let keys = ["host", "port"];
        assert!(find_attribute_key("cluster", keys.iter().copied()).is_none());
    }
}
