//! Traversal strategy port

use crate::node::ResolvedNode;
use execution::ContinuationPolicy;
use std::rc::Rc;

/// Gate consulted before each subtree is traversed.
///
/// A strategy that declines produces a silent skip: no execution result
/// is created for the subtree.
pub trait TraversalStrategy {
    /// Decide whether the subtree rooted at `node` should be traversed
    fn continue_traversal(&self, node: &ResolvedNode) -> bool;
}

/// Strategy that always traverses
#[derive(Debug, Default)]
pub struct UnconditionalTraversal;

impl TraversalStrategy for UnconditionalTraversal {
    fn continue_traversal(&self, _node: &ResolvedNode) -> bool {
        true
    }
}

/// Strategy consulting a continuation policy before each subtree.
///
/// Cancellation and an abort-on-failure lockout both stop newly
/// started subtrees; already running ones are not pre-empted.
pub struct ContinuationStrategy {
    policy: Rc<ContinuationPolicy>,
}

impl ContinuationStrategy {
    /// Create a strategy over the policy of a result tree
    pub fn new(policy: Rc<ContinuationPolicy>) -> Self {
        Self { policy }
    }
}

impl TraversalStrategy for ContinuationStrategy {
    fn continue_traversal(&self, _node: &ResolvedNode) -> bool {
        self.policy.continue_execution()
    }
}
