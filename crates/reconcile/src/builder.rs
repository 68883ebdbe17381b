//! Builder visitor expanding resolved nodes into children
//!
//! Expansion happens during traversal, node by node: objects expand
//! into one child per declared attribute name, collections into the
//! union of declared and live entry ids. The union is what makes
//! create candidates (declared-only) and delete candidates (live-only)
//! visible downstream as nodes with one failed participant side.

use crate::node::{NodeKind, ResolvedNode};
use crate::participant::ResolvedParticipant;
use crate::resolver::ModelResolver;
use crate::visitor::ResolvedModelVisitor;
use execution::ExecutionResult;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Pre-order visitor computing a node's children from the resolver pair
pub struct ModelBuilderVisitor {
    primary: Rc<dyn ModelResolver>,
    secondary: Rc<dyn ModelResolver>,
}

impl ModelBuilderVisitor {
    /// Create a builder over a declared-model and live-model resolver
    pub fn new(primary: Rc<dyn ModelResolver>, secondary: Rc<dyn ModelResolver>) -> Self {
        Self { primary, secondary }
    }

    fn classify(
        &self,
        primary: ResolvedParticipant,
        secondary: ResolvedParticipant,
    ) -> Rc<ResolvedNode> {
        if primary.is_success() || primary.is_nil() {
            self.primary.create_resolved_type(primary, secondary)
        } else if secondary.is_success() || secondary.is_nil() {
            self.secondary.create_resolved_type(primary, secondary)
        } else {
            log::debug!(
                "node [{}] unresolved on both sides: [{}] / [{}]",
                primary.name(),
                primary.error_as_single_line(),
                secondary.error_as_single_line()
            );
            ResolvedNode::unresolved(primary, secondary)
        }
    }

    /// Attribute names come from the declared side; a live-only object
    /// (delete candidate) expands from the live side instead so its
    /// subtree is still visible downstream.
    fn expand_object(&self, node: &Rc<ResolvedNode>) -> crate::Result<()> {
        let names = if node.primary().is_failed() {
            self.secondary.resolve_attribute_names(node.secondary())?
        } else {
            self.primary.resolve_attribute_names(node.primary())?
        };
        for name in names {
            let primary = self.primary.resolve_attribute(&name, node.primary());
            let secondary = self.secondary.resolve_attribute(&name, node.secondary());
            node.add_child(self.classify(primary, secondary));
        }
        Ok(())
    }

    fn expand_collection(&self, node: &Rc<ResolvedNode>) -> crate::Result<()> {
        let primary_values = self.side_values(&*self.primary, node.primary())?;
        let secondary_values = self.side_values(&*self.secondary, node.secondary())?;

        let mut ids: BTreeSet<String> = primary_values.keys().cloned().collect();
        ids.extend(secondary_values.keys().cloned());

        for id in ids {
            let primary = primary_values
                .get(&id)
                .cloned()
                .unwrap_or_else(|| self.primary.create_missing_collection_value(&id));
            let secondary = secondary_values
                .get(&id)
                .cloned()
                .unwrap_or_else(|| self.secondary.create_missing_collection_value(&id));
            node.add_child(self.classify(primary, secondary));
        }
        Ok(())
    }

    /// Collection values of one side. A side whose participant failed
    /// resolution contributes no entries, so a collection missing from
    /// one model still expands from the other.
    fn side_values(
        &self,
        resolver: &dyn ModelResolver,
        participant: &ResolvedParticipant,
    ) -> crate::Result<BTreeMap<String, ResolvedParticipant>> {
        if participant.is_failed() {
            return Ok(BTreeMap::new());
        }
        resolver.resolve_collection_values(participant)
    }
}

impl ResolvedModelVisitor for ModelBuilderVisitor {
    fn visit(&self, node: &Rc<ResolvedNode>, result: &ExecutionResult) -> anyhow::Result<()> {
        let expansion = match node.kind() {
            NodeKind::Object => self.expand_object(node),
            NodeKind::Collection => self.expand_collection(node),
            _ => return Ok(()),
        };
        // an expansion failure terminates this subtree's result, it
        // never propagates out of the visitor
        if let Err(error) = expansion {
            result.complete_as_raw_error(&error);
        }
        Ok(())
    }
}
