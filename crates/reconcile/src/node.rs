//! Resolved node tree with a closed kind set
//!
//! A resolved node pairs the declared-model and live-model views of one
//! model location and classifies the pair. The tree is rebuilt on every
//! traversal pass by the builder visitor; it is never persisted.

use crate::participant::ResolvedParticipant;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Classification of a resolved node pair.
///
/// The set is closed: visitors match on it exhaustively instead of
/// implementing one callback per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A structured object with named attributes
    Object,
    /// A value constrained to an enumerated set
    Enumeration,
    /// An ordered or keyed collection of elements
    Collection,
    /// A scalar leaf value
    Primitive,
    /// Neither side of the model could resolve this node
    Unresolved,
}

/// One node of the resolved model tree.
///
/// Children are attached by the builder visitor during traversal and
/// preserve insertion order. The parent link is weak, so dropping the
/// root drops the whole tree.
#[derive(Debug)]
pub struct ResolvedNode {
    kind: NodeKind,
    primary: ResolvedParticipant,
    secondary: ResolvedParticipant,
    parent: RefCell<Weak<ResolvedNode>>,
    children: RefCell<Vec<Rc<ResolvedNode>>>,
}

impl ResolvedNode {
    /// Create a detached node of the given kind
    pub fn new(
        kind: NodeKind,
        primary: ResolvedParticipant,
        secondary: ResolvedParticipant,
    ) -> Rc<Self> {
        Rc::new(Self {
            kind,
            primary,
            secondary,
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        })
    }

    /// Create a root object node for a declared/live model pair
    pub fn root_object(
        primary: ResolvedParticipant,
        secondary: ResolvedParticipant,
    ) -> Rc<Self> {
        Self::new(NodeKind::Object, primary, secondary)
    }

    /// Create an unresolved node for a pair neither side could resolve
    pub fn unresolved(
        primary: ResolvedParticipant,
        secondary: ResolvedParticipant,
    ) -> Rc<Self> {
        Self::new(NodeKind::Unresolved, primary, secondary)
    }

    /// Classification of this node
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Declared-model participant
    pub fn primary(&self) -> &ResolvedParticipant {
        &self.primary
    }

    /// Live-model participant
    pub fn secondary(&self) -> &ResolvedParticipant {
        &self.secondary
    }

    /// Attach a child, wiring its parent link to this node
    pub fn add_child(self: &Rc<Self>, child: Rc<ResolvedNode>) {
        *child.parent.borrow_mut() = Rc::downgrade(self);
        self.children.borrow_mut().push(child);
    }

    /// Children in insertion order
    pub fn children(&self) -> Vec<Rc<ResolvedNode>> {
        self.children.borrow().clone()
    }

    /// Number of children
    pub fn number_of_children(&self) -> usize {
        self.children.borrow().len()
    }

    /// Parent node, or `None` for the root
    pub fn parent(&self) -> Option<Rc<ResolvedNode>> {
        self.parent.borrow().upgrade()
    }

    /// Check if this node is the root of its tree
    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// First child whose primary participant has the given name
    pub fn child_by_primary_name(&self, name: &str) -> Option<Rc<ResolvedNode>> {
        self.children
            .borrow()
            .iter()
            .find(|child| child.primary().name() == name)
            .cloned()
    }

    /// Attribute names from the root (exclusive) down to this node.
    ///
    /// The root contributes no segment, so the root's own path is empty.
    pub fn path(self: &Rc<Self>) -> Vec<String> {
        let mut segments = Vec::new();
        let mut current = Rc::clone(self);
        while let Some(parent) = current.parent() {
            segments.push(current.primary().name().to_string());
            current = parent;
        }
        segments.reverse();
        segments
    }
}
