//! Convergence visitors
//!
//! Each visitor is a thin adapter from a classified node to one action
//! against the live resource, recorded as a freshly added child of the
//! node's execution result. Collection nodes are bookkeeping only;
//! their elements carry the real actions. Unresolved nodes are skipped
//! by convergence and surface only in the report.

use crate::node::{NodeKind, ResolvedNode};
use crate::session::{DocumentSession, SessionHandle};
use crate::visitor::ResolvedModelVisitor;
use anyhow::Context;
use execution::{ExecutionResult, MSG_REPORT, MessageCatalog};
use serde_json::Value;
use std::rc::Rc;

fn with_document<T>(
    session: Option<&SessionHandle>,
    action: impl FnOnce(&mut DocumentSession) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let handle = session.context("no session bound to visitor")?;
    let mut guard = handle.borrow_mut();
    let document = guard
        .as_any_mut()
        .downcast_mut::<DocumentSession>()
        .context("session is not a document session")?;
    action(document)
}

fn live_only(node: &ResolvedNode) -> bool {
    node.primary().is_failed() && node.secondary().is_success()
}

enum CreateAction {
    /// Insert a declared-only collection entry into the live collection
    AddEntry { path: Vec<String>, value: Value },
    /// Write the declared value of an attribute into the live object
    SetAttribute {
        path: Vec<String>,
        name: String,
        value: Value,
    },
    /// Declared and live values already agree
    AlreadyConverged,
}

/// Create-or-update visitor: the declared side wins.
///
/// Declared-only collection entries are inserted whole; attribute
/// nodes whose live value differs (or is absent) are overwritten with
/// the declared value.
pub struct CreateVisitor {
    session: Option<SessionHandle>,
    messages: Rc<MessageCatalog>,
}

impl CreateVisitor {
    /// Create the visitor with its message catalog
    pub fn new(messages: Rc<MessageCatalog>) -> Self {
        Self {
            session: None,
            messages,
        }
    }

    fn plan(node: &Rc<ResolvedNode>) -> Option<CreateAction> {
        let parent = node.parent()?;
        let name = node.primary().name().to_string();
        match node.kind() {
            NodeKind::Collection | NodeKind::Unresolved => None,
            NodeKind::Object => {
                if !node.primary().is_success() || !node.secondary().is_failed() {
                    return None;
                }
                let value = node.primary().value()?.clone();
                if parent.kind() == NodeKind::Collection {
                    Some(CreateAction::AddEntry {
                        path: parent.path(),
                        value,
                    })
                } else {
                    Some(CreateAction::SetAttribute {
                        path: parent.path(),
                        name,
                        value,
                    })
                }
            }
            NodeKind::Enumeration | NodeKind::Primitive => {
                if !node.primary().is_success() {
                    return None;
                }
                if node.secondary().is_success()
                    && node.secondary().value() == node.primary().value()
                {
                    return Some(CreateAction::AlreadyConverged);
                }
                Some(CreateAction::SetAttribute {
                    path: parent.path(),
                    name,
                    value: node.primary().value()?.clone(),
                })
            }
        }
    }
}

impl ResolvedModelVisitor for CreateVisitor {
    fn set_session(&mut self, session: SessionHandle) {
        self.session = Some(session);
    }

    fn visit(&self, node: &Rc<ResolvedNode>, result: &ExecutionResult) -> anyhow::Result<()> {
        let Some(action) = Self::plan(node) else {
            return Ok(());
        };
        let name = node.primary().name().to_string();
        let child = result.add_child(&format!("Apply [{name}]"))?;
        let outcome = match action {
            CreateAction::AlreadyConverged => {
                child.complete_as_successful(self.messages.as_ref(), "create.converged", &[&name]);
                return Ok(());
            }
            CreateAction::AddEntry { path, value } => {
                let applied = with_document(self.session.as_ref(), |session| {
                    session.add_collection_entry(&path, value)
                });
                applied.map(|()| "create.created")
            }
            CreateAction::SetAttribute { path, name, value } => {
                let applied = with_document(self.session.as_ref(), |session| {
                    session.set_attribute(&path, &name, value)
                });
                applied.map(|()| "create.applied")
            }
        };
        match outcome {
            Ok(key) => child.complete_as_successful(self.messages.as_ref(), key, &[&name]),
            Err(error) => child.complete_as_error(
                self.messages.as_ref(),
                "create.error",
                &[&name],
                error.as_ref(),
            ),
        }
        Ok(())
    }
}

/// Delete visitor: removes live-only attributes and collection entries.
///
/// Only the topmost live-only node of a branch is removed; descendants
/// disappear with it and are skipped.
pub struct DeleteVisitor {
    session: Option<SessionHandle>,
    messages: Rc<MessageCatalog>,
}

impl DeleteVisitor {
    /// Create the visitor with its message catalog
    pub fn new(messages: Rc<MessageCatalog>) -> Self {
        Self {
            session: None,
            messages,
        }
    }
}

impl ResolvedModelVisitor for DeleteVisitor {
    fn set_session(&mut self, session: SessionHandle) {
        self.session = Some(session);
    }

    fn visit(&self, node: &Rc<ResolvedNode>, result: &ExecutionResult) -> anyhow::Result<()> {
        if node.kind() == NodeKind::Unresolved || !live_only(node) {
            return Ok(());
        }
        let Some(parent) = node.parent() else {
            return Ok(());
        };
        // an ancestor removal already covers this node
        if live_only(&parent) {
            return Ok(());
        }

        let name = node.primary().name().to_string();
        let child = result.add_child(&format!("Delete [{name}]"))?;
        let path = parent.path();
        let removed = with_document(self.session.as_ref(), |session| {
            if parent.kind() == NodeKind::Collection {
                session.remove_collection_entry(&path, &name)
            } else {
                session.remove_attribute(&path, &name)
            }
        });
        match removed {
            Ok(()) => {
                child.complete_as_successful(self.messages.as_ref(), "delete.removed", &[&name]);
            }
            Err(error) => child.complete_as_error(
                self.messages.as_ref(),
                "delete.error",
                &[&name],
                error.as_ref(),
            ),
        }
        Ok(())
    }
}

/// Test visitor: compares declared and live values without touching
/// the session, recording one success or failure per leaf attribute.
pub struct TestVisitor {
    messages: Rc<MessageCatalog>,
}

impl TestVisitor {
    /// Create the visitor with its message catalog
    pub fn new(messages: Rc<MessageCatalog>) -> Self {
        Self { messages }
    }
}

impl ResolvedModelVisitor for TestVisitor {
    fn visit(&self, node: &Rc<ResolvedNode>, result: &ExecutionResult) -> anyhow::Result<()> {
        if node.is_root() {
            return Ok(());
        }
        let name = node.primary().name().to_string();
        match node.kind() {
            NodeKind::Collection | NodeKind::Unresolved => Ok(()),
            NodeKind::Object => {
                if node.primary().is_failed() || node.secondary().is_failed() {
                    let child = result.add_child(&format!("Test [{name}]"))?;
                    child.complete_as_failure(self.messages.as_ref(), "test.missing", &[&name]);
                }
                Ok(())
            }
            NodeKind::Enumeration | NodeKind::Primitive => {
                let child = result.add_child(&format!("Test [{name}]"))?;
                if node.primary().is_failed() || node.secondary().is_failed() {
                    child.complete_as_failure(self.messages.as_ref(), "test.missing", &[&name]);
                } else if node.primary().value() == node.secondary().value() {
                    child.complete_as_successful(self.messages.as_ref(), "test.succeed", &[&name]);
                } else {
                    child.complete_as_failure(
                        self.messages.as_ref(),
                        "test.failed",
                        &[
                            &name,
                            &node.primary().value_as_single_line(),
                            &node.secondary().value_as_single_line(),
                        ],
                    );
                }
                Ok(())
            }
        }
    }
}

/// Report visitor: appends one read-only report line per node,
/// including unresolved nodes, under the report message key.
pub struct ReportVisitor {
    describer: Box<dyn crate::describe::DescribeNode>,
}

impl ReportVisitor {
    /// Create the visitor with a description generator
    pub fn new(describer: Box<dyn crate::describe::DescribeNode>) -> Self {
        Self { describer }
    }

    fn status(node: &ResolvedNode) -> &'static str {
        match (
            node.primary().is_failed(),
            node.secondary().is_failed(),
        ) {
            (false, false) => "declared+live",
            (false, true) => "declared only",
            (true, false) => "live only",
            (true, true) => "unresolved",
        }
    }
}

impl ResolvedModelVisitor for ReportVisitor {
    fn visit(&self, node: &Rc<ResolvedNode>, result: &ExecutionResult) -> anyhow::Result<()> {
        let line = format!("{} [{}]", self.describer.describe(node), Self::status(node));
        result.add_message(MSG_REPORT, &line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_catalog;
    use crate::describe::DefaultDescriptionGenerator;
    use crate::error::Error;
    use crate::participant::ResolvedParticipant;
    use execution::ExecutionState;
    use serde_json::json;

    fn messages() -> Rc<MessageCatalog> {
        Rc::new(default_catalog())
    }

    fn session(document: Value) -> SessionHandle {
        DocumentSession::new(document).into_handle()
    }

    fn document_of(handle: &SessionHandle) -> Value {
        let guard = handle.borrow();
        guard
            .as_any()
            .downcast_ref::<DocumentSession>()
            .unwrap()
            .document()
            .clone()
    }

    /// domain { Servers: [entry] } tree with one attribute under the entry
    struct Fixture {
        root: Rc<ResolvedNode>,
        servers: Rc<ResolvedNode>,
        entry: Rc<ResolvedNode>,
        attribute: Rc<ResolvedNode>,
    }

    fn collection_fixture(
        entry_primary: ResolvedParticipant,
        entry_secondary: ResolvedParticipant,
        attribute_primary: ResolvedParticipant,
        attribute_secondary: ResolvedParticipant,
    ) -> Fixture {
        let root = ResolvedNode::root_object(
            ResolvedParticipant::successful("domain", json!({})),
            ResolvedParticipant::successful("domain", json!({})),
        );
        let servers = ResolvedNode::new(
            NodeKind::Collection,
            ResolvedParticipant::successful("Servers", json!([])),
            ResolvedParticipant::successful("Servers", json!([])),
        );
        root.add_child(Rc::clone(&servers));
        let entry = ResolvedNode::new(NodeKind::Object, entry_primary, entry_secondary);
        servers.add_child(Rc::clone(&entry));
        let attribute =
            ResolvedNode::new(NodeKind::Primitive, attribute_primary, attribute_secondary);
        entry.add_child(Rc::clone(&attribute));
        Fixture {
            root,
            servers,
            entry,
            attribute,
        }
    }

    #[test]
    fn test_create_inserts_declared_only_entry() {
        let fixture = collection_fixture(
            ResolvedParticipant::successful("node-2", json!({ "name": "node-2", "Port": 7003 })),
            ResolvedParticipant::failed("node-2", Error::ResolutionFailed("absent".to_string())),
            ResolvedParticipant::successful("Port", json!(7003)),
            ResolvedParticipant::failed("Port", Error::ResolutionFailed("absent".to_string())),
        );
        let handle = session(json!({ "Servers": [{ "name": "admin" }] }));
        let mut visitor = CreateVisitor::new(messages());
        visitor.set_session(Rc::clone(&handle));

        let result = ExecutionResult::new("servers");
        visitor.visit(&fixture.entry, &result).unwrap();

        let child = result.first_child().unwrap();
        assert!(child.is_success());
        assert_eq!(child.description(), "Apply [node-2]");
        assert_eq!(
            document_of(&handle)["Servers"],
            json!([{ "name": "admin" }, { "name": "node-2", "Port": 7003 }])
        );
    }

    #[test]
    fn test_create_overwrites_differing_attribute() {
        let fixture = collection_fixture(
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("Port", json!(7001)),
            ResolvedParticipant::successful("Port", json!(9999)),
        );
        let handle = session(json!({ "Servers": [{ "name": "admin", "Port": 9999 }] }));
        let mut visitor = CreateVisitor::new(messages());
        visitor.set_session(Rc::clone(&handle));

        let result = ExecutionResult::new("entry");
        visitor.visit(&fixture.attribute, &result).unwrap();

        assert!(result.first_child().unwrap().is_success());
        assert_eq!(
            document_of(&handle)["Servers"][0]["Port"],
            json!(7001)
        );
    }

    #[test]
    fn test_create_skips_converged_attribute() {
        let fixture = collection_fixture(
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("Port", json!(7001)),
            ResolvedParticipant::successful("Port", json!(7001)),
        );
        let handle = session(json!({ "Servers": [{ "name": "admin", "Port": 7001 }] }));
        let mut visitor = CreateVisitor::new(messages());
        visitor.set_session(Rc::clone(&handle));

        let result = ExecutionResult::new("entry");
        visitor.visit(&fixture.attribute, &result).unwrap();

        let child = result.first_child().unwrap();
        assert!(child.is_success());
        assert_eq!(
            child.message(execution::MSG_MESSAGE),
            Some("Attribute [Port] already converged.".to_string())
        );
        assert_eq!(document_of(&handle)["Servers"][0]["Port"], json!(7001));
    }

    #[test]
    fn test_create_ignores_live_only_and_collection_nodes() {
        let fixture = collection_fixture(
            ResolvedParticipant::failed("stale", Error::ResolutionFailed("absent".to_string())),
            ResolvedParticipant::successful("stale", json!({ "name": "stale" })),
            ResolvedParticipant::failed("Port", Error::ResolutionFailed("absent".to_string())),
            ResolvedParticipant::successful("Port", json!(1)),
        );
        let visitor = CreateVisitor::new(messages());
        let result = ExecutionResult::new("servers");
        visitor.visit(&fixture.servers, &result).unwrap();
        visitor.visit(&fixture.entry, &result).unwrap();
        assert_eq!(result.number_of_children(), 0);
    }

    #[test]
    fn test_delete_removes_live_only_entry() {
        let fixture = collection_fixture(
            ResolvedParticipant::failed("stale", Error::ResolutionFailed("absent".to_string())),
            ResolvedParticipant::successful("stale", json!({ "name": "stale" })),
            ResolvedParticipant::failed("Port", Error::ResolutionFailed("absent".to_string())),
            ResolvedParticipant::successful("Port", json!(1)),
        );
        let handle = session(json!({ "Servers": [{ "name": "admin" }, { "name": "stale" }] }));
        let mut visitor = DeleteVisitor::new(messages());
        visitor.set_session(Rc::clone(&handle));

        let result = ExecutionResult::new("servers");
        assert_eq!(fixture.root.number_of_children(), 1);
        visitor.visit(&fixture.entry, &result).unwrap();
        // the entry's own attribute vanished with it and is skipped
        visitor.visit(&fixture.attribute, &result).unwrap();

        assert_eq!(result.number_of_children(), 1);
        assert!(result.first_child().unwrap().is_success());
        assert_eq!(document_of(&handle)["Servers"], json!([{ "name": "admin" }]));
    }

    #[test]
    fn test_delete_removes_live_only_attribute() {
        let fixture = collection_fixture(
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::failed("Legacy", Error::ResolutionFailed("absent".to_string())),
            ResolvedParticipant::successful("Legacy", json!(true)),
        );
        let handle = session(json!({ "Servers": [{ "name": "admin", "Legacy": true }] }));
        let mut visitor = DeleteVisitor::new(messages());
        visitor.set_session(Rc::clone(&handle));

        let result = ExecutionResult::new("entry");
        visitor.visit(&fixture.attribute, &result).unwrap();

        assert!(result.first_child().unwrap().is_success());
        assert_eq!(
            document_of(&handle)["Servers"][0],
            json!({ "name": "admin" })
        );
    }

    #[test]
    fn test_test_visitor_records_match_and_mismatch() {
        let matching = collection_fixture(
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("Port", json!(7001)),
            ResolvedParticipant::successful("Port", json!(7001)),
        );
        let visitor = TestVisitor::new(messages());
        let result = ExecutionResult::new("entry");
        visitor.visit(&matching.attribute, &result).unwrap();
        assert!(result.first_child().unwrap().is_success());

        let differing = collection_fixture(
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("Port", json!(7001)),
            ResolvedParticipant::successful("Port", json!(9999)),
        );
        let result = ExecutionResult::new("entry");
        visitor.visit(&differing.attribute, &result).unwrap();
        let child = result.first_child().unwrap();
        assert!(child.is_failed());
        assert_eq!(
            child.message(execution::MSG_ERROR_MESSAGE),
            Some("Attribute [Port] mismatch: declared [7001], live [9999].".to_string())
        );
    }

    #[test]
    fn test_test_visitor_flags_one_sided_attribute() {
        let fixture = collection_fixture(
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("Port", json!(7001)),
            ResolvedParticipant::failed("Port", Error::ResolutionFailed("absent".to_string())),
        );
        let visitor = TestVisitor::new(messages());
        let result = ExecutionResult::new("entry");
        visitor.visit(&fixture.attribute, &result).unwrap();
        assert!(result.first_child().unwrap().is_failed());
    }

    #[test]
    fn test_test_visitor_aggregation() {
        let fixture = collection_fixture(
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("Port", json!(7001)),
            ResolvedParticipant::successful("Port", json!(9999)),
        );
        let visitor = TestVisitor::new(messages());
        let result = ExecutionResult::new("entry");
        visitor.visit(&fixture.attribute, &result).unwrap();
        result.set_state(ExecutionState::Computed);
        assert!(result.is_failed());
    }

    #[test]
    fn test_report_visitor_includes_unresolved_nodes() {
        let node = ResolvedNode::unresolved(
            ResolvedParticipant::failed("ghost", Error::ResolutionFailed("a".to_string())),
            ResolvedParticipant::failed("ghost", Error::ResolutionFailed("b".to_string())),
        );
        let visitor = ReportVisitor::new(Box::new(DefaultDescriptionGenerator::new()));
        let result = ExecutionResult::new("root");
        visitor.visit(&node, &result).unwrap();
        assert_eq!(
            result.message(MSG_REPORT),
            Some("ghost (unresolved) [unresolved]".to_string())
        );
    }

    #[test]
    fn test_report_lines_append_per_node() {
        let fixture = collection_fixture(
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("admin", json!({ "name": "admin" })),
            ResolvedParticipant::successful("Port", json!(7001)),
            ResolvedParticipant::failed("Port", Error::ResolutionFailed("absent".to_string())),
        );
        let visitor = ReportVisitor::new(Box::new(DefaultDescriptionGenerator::new()));
        let result = ExecutionResult::new("root");
        visitor.visit(&fixture.entry, &result).unwrap();
        visitor.visit(&fixture.attribute, &result).unwrap();
        assert_eq!(
            result.message(MSG_REPORT),
            Some("admin:object [declared+live]\nPort=7001 [declared only]".to_string())
        );
    }
}
