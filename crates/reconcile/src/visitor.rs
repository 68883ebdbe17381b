//! Visitor port for resolved model nodes

use crate::node::ResolvedNode;
use crate::session::SessionHandle;
use execution::ExecutionResult;
use std::rc::Rc;

/// Action applied to each resolved node during traversal.
///
/// Visitors match on [`crate::NodeKind`] to decide what a node means to
/// them. A visitor records its outcome into `result` (usually into a
/// freshly added child); an error returned here is caught at the
/// traversal boundary and completes the node's result as an error, it
/// never unwinds past the director.
pub trait ResolvedModelVisitor {
    /// Receive the resource session before a traversal starts.
    ///
    /// Visitors that do not touch the live resource keep the default
    /// no-op.
    fn set_session(&mut self, _session: SessionHandle) {}

    /// Visit one resolved node with its execution result
    fn visit(&self, node: &Rc<ResolvedNode>, result: &ExecutionResult) -> anyhow::Result<()>;
}
