//! Traversal director
//!
//! Orchestrates the recursive walk over a resolved node tree: gates
//! each subtree through the traversal strategy, creates one execution
//! result per visited node, runs the pre-order visitors, recurses,
//! runs the post-order visitors, and aggregates the node's final state.

use crate::describe::DescribeNode;
use crate::node::ResolvedNode;
use crate::session::SessionHandle;
use crate::strategy::TraversalStrategy;
use crate::visitor::ResolvedModelVisitor;
use execution::{ExecutionResult, MessageCatalog};
use std::rc::Rc;

/// Driver of the pre-order/post-order walk.
///
/// Visitor order within each array is configuration and is preserved.
/// Errors from visitors are contained per node: a node whose result is
/// still executing when an error escapes is completed as an error, and
/// traversal of the remaining tree continues.
pub struct TraversalDirector {
    pre_order: Vec<Box<dyn ResolvedModelVisitor>>,
    post_order: Vec<Box<dyn ResolvedModelVisitor>>,
    strategy: Box<dyn TraversalStrategy>,
    describer: Box<dyn DescribeNode>,
    messages: Rc<MessageCatalog>,
}

impl TraversalDirector {
    /// Create a director from its visitor arrays and collaborators
    pub fn new(
        pre_order: Vec<Box<dyn ResolvedModelVisitor>>,
        post_order: Vec<Box<dyn ResolvedModelVisitor>>,
        strategy: Box<dyn TraversalStrategy>,
        describer: Box<dyn DescribeNode>,
        messages: Rc<MessageCatalog>,
    ) -> Self {
        Self {
            pre_order,
            post_order,
            strategy,
            describer,
            messages,
        }
    }

    /// Inject the resource session into every visitor, then traverse
    /// the tree rooted at `node`, recording under `parent_result`.
    pub fn start_traversal(
        &mut self,
        session: SessionHandle,
        node: &Rc<ResolvedNode>,
        parent_result: &ExecutionResult,
    ) {
        for visitor in &mut self.pre_order {
            visitor.set_session(Rc::clone(&session));
        }
        for visitor in &mut self.post_order {
            visitor.set_session(Rc::clone(&session));
        }
        self.traverse(node, parent_result);
    }

    /// Traverse one subtree.
    ///
    /// A declined strategy gate skips the subtree silently, creating no
    /// result. A failed `add_child` (continuation lockout) returns
    /// after the lockout has already marked `parent_result` interrupted.
    pub fn traverse(&self, node: &Rc<ResolvedNode>, parent_result: &ExecutionResult) {
        if !self.strategy.continue_traversal(node) {
            log::debug!("traversal skipped for [{}]", node.primary().name());
            return;
        }

        let description = self.describer.describe(node);
        let current = match parent_result.add_child(&description) {
            Ok(result) => result,
            Err(error) => {
                log::debug!("traversal interrupted at [{description}]: {error}");
                return;
            }
        };

        if let Err(error) = self.visit_node(node, &current) {
            log::debug!("visitor failed at [{description}]: {error}");
            if current.is_executing() {
                current.complete_as_raw_error(error.as_ref());
            }
            return;
        }

        // a visitor may already have completed this node's result
        if !current.is_executing() {
            return;
        }
        current.complete_as_computed_with(
            self.messages.as_ref(),
            "traverse.succeed",
            &[],
            "traverse.failed",
            &[],
        );
    }

    fn visit_node(
        &self,
        node: &Rc<ResolvedNode>,
        current: &ExecutionResult,
    ) -> anyhow::Result<()> {
        for visitor in &self.pre_order {
            visitor.visit(node, current)?;
        }
        for child in node.children() {
            self.traverse(&child, current);
        }
        for visitor in &self.post_order {
            visitor.visit(node, current)?;
        }
        Ok(())
    }
}
