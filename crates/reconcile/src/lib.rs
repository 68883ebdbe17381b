//! # Reconcile
//!
//! Dual-source model reconciliation: walk a declared configuration
//! model and a live resource model in lock-step, classify each paired
//! node, and drive convergence actions while recording the outcome as
//! an [`execution::ExecutionResult`] tree.
//!
//! ## Core Concepts
//!
//! - **ResolvedParticipant**: the outcome of resolving one attribute on
//!   one side of the model pair (declared or live)
//! - **ResolvedNode**: a classified pair of participants with a closed
//!   kind set (Object, Enumeration, Collection, Primitive, Unresolved)
//! - **ModelResolver**: per-model-source resolution of attribute names,
//!   values, and collection entries; [`DocumentResolver`] implements it
//!   over JSON documents
//! - **ResolvedModelVisitor**: pluggable actions over classified nodes;
//!   the builder visitor expands children, the convergence visitors
//!   create, delete, and test attributes against the live session
//! - **TraversalDirector**: orchestrates the pre-order/post-order walk
//!   with a continuation strategy and per-node error containment
//!
//! ## Example
//!
//! ```
//! use reconcile::{
//!     CreateVisitor, DefaultDescriptionGenerator, DocumentResolver,
//!     DocumentSession, ModelBuilderVisitor, ModelResolver, ResolvedNode,
//!     ResolvedParticipant, TraversalDirector, UnconditionalTraversal,
//! };
//! use execution::ExecutionResult;
//! use serde_json::json;
//! use std::rc::Rc;
//!
//! let declared = json!({ "Name": "prod" });
//! let live = json!({ "Name": "old" });
//!
//! let resolver = Rc::new(DocumentResolver::new());
//! let messages = Rc::new(reconcile::default_catalog());
//! let mut director = TraversalDirector::new(
//!     vec![
//!         Box::new(ModelBuilderVisitor::new(
//!             Rc::clone(&resolver) as Rc<dyn ModelResolver>,
//!             Rc::clone(&resolver) as Rc<dyn ModelResolver>,
//!         )),
//!         Box::new(CreateVisitor::new(messages.clone())),
//!     ],
//!     vec![],
//!     Box::new(UnconditionalTraversal),
//!     Box::new(DefaultDescriptionGenerator::new()),
//!     messages,
//! );
//!
//! let root = ResolvedNode::root_object(
//!     ResolvedParticipant::successful("domain", declared),
//!     ResolvedParticipant::successful("domain", live.clone()),
//! );
//! let session = DocumentSession::new(live).into_handle();
//! let result = ExecutionResult::new("deploy");
//! director.start_traversal(session, &root, &result);
//! assert!(result.first_child().unwrap().is_success());
//! ```

pub mod builder;
pub mod converge;
pub mod describe;
pub mod director;
pub mod document;
pub mod error;
pub mod node;
pub mod participant;
pub mod resolver;
pub mod session;
pub mod strategy;
pub mod visitor;

// Re-export main types at crate root
pub use builder::ModelBuilderVisitor;
pub use converge::{CreateVisitor, DeleteVisitor, ReportVisitor, TestVisitor};
pub use describe::{DefaultDescriptionGenerator, DescribeNode};
pub use director::TraversalDirector;
pub use document::DocumentResolver;
pub use error::{Error, Result};
pub use node::{NodeKind, ResolvedNode};
pub use participant::{ResolvedParticipant, ValueState};
pub use resolver::{ModelResolver, attribute_name_matches, find_attribute_key};
pub use session::{DocumentSession, Session, SessionHandle};
pub use strategy::{ContinuationStrategy, TraversalStrategy, UnconditionalTraversal};
pub use visitor::ResolvedModelVisitor;

use execution::MessageCatalog;

/// Message catalog with the crate's built-in execution messages
pub fn default_catalog() -> MessageCatalog {
    MessageCatalog::from_properties(include_str!("messages.properties"))
}
