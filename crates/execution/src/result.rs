//! Hierarchical execution result tree
//!
//! An [`ExecutionResult`] is one node of the outcome tree for a unit of
//! work. Nodes are stored in an arena owned by the tree; the public
//! handle is cheap to clone and addresses its node by index, so parent
//! links never form reference cycles.

use crate::catalog::MessageProvider;
use crate::error::{Error, Result, error_chain};
use crate::messages::{
    MSG_COMPOSITE, MSG_ERROR_MESSAGE, MSG_MESSAGE, MSG_STACKTRACE, MessageBag,
};
use crate::policy::ContinuationPolicy;
use crate::repository::ResultRepository;
use crate::state::ExecutionState;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Index of a result node within its tree
pub type ResultId = usize;

#[derive(Debug)]
struct Node {
    description: String,
    state: ExecutionState,
    parent: Option<ResultId>,
    children: Vec<ResultId>,
    messages: MessageBag,
    started: Instant,
    /// Frozen the instant the state first leaves `Executing`
    elapsed: Option<Duration>,
}

impl Node {
    fn new(description: &str, parent: Option<ResultId>) -> Self {
        Self {
            description: description.to_string(),
            state: ExecutionState::Executing,
            parent,
            children: Vec::new(),
            messages: MessageBag::new(),
            started: Instant::now(),
            elapsed: None,
        }
    }
}

struct Tree {
    nodes: Vec<Node>,
    policy: Rc<ContinuationPolicy>,
    repository: Option<Rc<dyn ResultRepository>>,
}

/// Handle to one node of an execution result tree.
///
/// A result is created in `Executing` state, either as the root of a new
/// tree or through [`ExecutionResult::add_child`]. All results of one
/// tree share the root's continuation policy and repository.
#[derive(Clone)]
pub struct ExecutionResult {
    tree: Rc<RefCell<Tree>>,
    id: ResultId,
}

impl ExecutionResult {
    /// Create a root result without a repository
    pub fn new(description: &str) -> Self {
        Self::build_root(description, None)
    }

    /// Create a root result whose tree notifies the given repository
    pub fn with_repository(description: &str, repository: Rc<dyn ResultRepository>) -> Self {
        Self::build_root(description, Some(repository))
    }

    fn build_root(description: &str, repository: Option<Rc<dyn ResultRepository>>) -> Self {
        assert!(!description.is_empty(), "description is undefined");
        let tree = Tree {
            nodes: vec![Node::new(description, None)],
            policy: Rc::new(ContinuationPolicy::new()),
            repository,
        };
        let result = Self {
            tree: Rc::new(RefCell::new(tree)),
            id: 0,
        };
        result.notify_repository();
        result
    }

    /// Add a child result in `Executing` state.
    ///
    /// Fails with [`Error::Interrupted`] when the continuation policy
    /// forbids further execution; this result is forced to `Interrupted`
    /// before the error is returned.
    pub fn add_child(&self, description: &str) -> Result<ExecutionResult> {
        assert!(!description.is_empty(), "description is undefined");
        self.enforce_continuation_policy()?;

        let child_id = {
            let mut tree = self.tree.borrow_mut();
            let id = tree.nodes.len();
            tree.nodes.push(Node::new(description, Some(self.id)));
            tree.nodes[self.id].children.push(id);
            id
        };
        let child = ExecutionResult {
            tree: Rc::clone(&self.tree),
            id: child_id,
        };
        child.notify_repository();
        Ok(child)
    }

    fn enforce_continuation_policy(&self) -> Result<()> {
        let policy = self.continuation_policy();
        if policy.continue_execution() {
            return Ok(());
        }
        self.set_state(ExecutionState::Interrupted);
        let reason = if policy.is_cancelled() {
            "execution was cancelled".to_string()
        } else {
            let failed = policy
                .failed_result()
                .map(|failed| failed.description)
                .unwrap_or_default();
            format!("failure in result [{failed}] with continue-on-failure disabled")
        };
        Err(Error::Interrupted(reason))
    }

    /// Id of this result within its tree
    pub fn id(&self) -> ResultId {
        self.id
    }

    /// Description of what is executing
    pub fn description(&self) -> String {
        self.tree.borrow().nodes[self.id].description.clone()
    }

    /// Current state
    pub fn state(&self) -> ExecutionState {
        self.tree.borrow().nodes[self.id].state
    }

    /// Check if the state is `Executing`
    pub fn is_executing(&self) -> bool {
        self.state() == ExecutionState::Executing
    }

    /// Check if the state is `Success`
    pub fn is_success(&self) -> bool {
        self.state() == ExecutionState::Success
    }

    /// Check if the state is `Failure`
    pub fn is_failed(&self) -> bool {
        self.state() == ExecutionState::Failure
    }

    /// Check if the state is `Error`
    pub fn is_error(&self) -> bool {
        self.state() == ExecutionState::Error
    }

    /// Check if the state is `Interrupted`
    pub fn is_interrupted(&self) -> bool {
        self.state() == ExecutionState::Interrupted
    }

    /// Check if this result is the root of its tree
    pub fn is_root(&self) -> bool {
        self.tree.borrow().nodes[self.id].parent.is_none()
    }

    /// Parent result, or `None` for the root
    pub fn parent(&self) -> Option<ExecutionResult> {
        let parent = self.tree.borrow().nodes[self.id].parent;
        parent.map(|id| ExecutionResult {
            tree: Rc::clone(&self.tree),
            id,
        })
    }

    /// Child results in insertion order
    pub fn children(&self) -> Vec<ExecutionResult> {
        let ids = self.tree.borrow().nodes[self.id].children.clone();
        ids.into_iter()
            .map(|id| ExecutionResult {
                tree: Rc::clone(&self.tree),
                id,
            })
            .collect()
    }

    /// Number of child results
    pub fn number_of_children(&self) -> usize {
        self.tree.borrow().nodes[self.id].children.len()
    }

    /// Children currently in the given state, in insertion order
    pub fn children_with_state(&self, state: ExecutionState) -> Vec<ExecutionResult> {
        self.children()
            .into_iter()
            .filter(|child| child.state() == state)
            .collect()
    }

    /// First child result, if any
    pub fn first_child(&self) -> Option<ExecutionResult> {
        self.children().into_iter().next()
    }

    /// Root result of the tree this result belongs to
    pub fn root_result(&self) -> ExecutionResult {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Continuation policy shared by the tree
    pub fn continuation_policy(&self) -> Rc<ContinuationPolicy> {
        Rc::clone(&self.tree.borrow().policy)
    }

    /// Cancel the continuation policy of the tree
    pub fn set_cancelled(&self) {
        self.continuation_policy().set_cancelled();
    }

    /// Instant this result was created
    pub fn start_time(&self) -> Instant {
        self.tree.borrow().nodes[self.id].started
    }

    /// Execution time. Frozen the instant the state first leaves
    /// `Executing`; does not restart if the state returns to `Executing`.
    pub fn elapsed(&self) -> Duration {
        let tree = self.tree.borrow();
        let node = &tree.nodes[self.id];
        node.elapsed.unwrap_or_else(|| node.started.elapsed())
    }

    /// Snapshot of the message bag
    pub fn messages(&self) -> MessageBag {
        self.tree.borrow().nodes[self.id].messages.clone()
    }

    /// Message stored under an id, if any
    pub fn message(&self, id: &str) -> Option<String> {
        self.tree.borrow().nodes[self.id]
            .messages
            .get(id)
            .map(str::to_string)
    }

    /// Add a message, appending if the id already exists
    pub fn add_message(&self, id: &str, message: &str) {
        log::debug!("message [{id}] added to [{}]", self.tree.borrow().nodes[self.id].description);
        self.tree.borrow_mut().nodes[self.id].messages.add(id, message);
    }

    /// Replace the message under an id, adding it if absent
    pub fn add_or_replace_message(&self, id: &str, message: &str) {
        self.tree.borrow_mut().nodes[self.id]
            .messages
            .add_or_replace(id, message);
    }

    /// Set the state of this result.
    ///
    /// Setting [`ExecutionState::Computed`] aggregates the child states
    /// and immediately resolves to a terminal state. Every call notifies
    /// the repository; a change to a non-success state records this
    /// result on the continuation policy, and a parent already in a
    /// terminal state is re-aggregated (widening only).
    pub fn set_state(&self, state: ExecutionState) {
        self.apply_state(state, true);
    }

    fn apply_state(&self, state: ExecutionState, notify_parent: bool) {
        let previous = {
            let mut tree = self.tree.borrow_mut();
            let node = &mut tree.nodes[self.id];
            let previous = node.state;
            node.state = state;
            if state != ExecutionState::Executing && node.elapsed.is_none() {
                node.elapsed = Some(node.started.elapsed());
            }
            previous
        };
        log::debug!("state set to [{state}] for [{}]", self.description());

        if state == ExecutionState::Computed {
            self.compute_state(previous);
        }
        self.notify_policy();
        self.notify_repository();
        if notify_parent {
            self.notify_parent();
        }
    }

    /// Aggregate the child states into this result's own state.
    ///
    /// Any child still executing is first forced to `Error`, then the
    /// dominance order is applied across all children and the previous
    /// state of this result. Zero children resolve to `Success`.
    fn compute_state(&self, previous: ExecutionState) {
        let child_ids = self.tree.borrow().nodes[self.id].children.clone();

        for id in &child_ids {
            let executing = self.tree.borrow().nodes[*id].state == ExecutionState::Executing;
            if executing {
                let child = ExecutionResult {
                    tree: Rc::clone(&self.tree),
                    id: *id,
                };
                child.add_message(
                    MSG_MESSAGE,
                    "State is forced to error due to state not being set explicit.",
                );
                child.add_message(MSG_STACKTRACE, "n/a");
                // parent notification suppressed: this node is mid-aggregation
                child.apply_state(ExecutionState::Error, false);
            }
        }

        let mut successful = 0usize;
        let mut failed = 0usize;
        let mut errors = 0usize;
        let mut interrupted = 0usize;
        {
            let tree = self.tree.borrow();
            for id in &child_ids {
                match tree.nodes[*id].state {
                    ExecutionState::Success => successful += 1,
                    ExecutionState::Failure => failed += 1,
                    ExecutionState::Interrupted => interrupted += 1,
                    _ => errors += 1,
                }
            }
        }

        let summary = format!(
            "Results: {}, successful: {successful}, failures: {failed}, errors: {errors}, interrupted: {interrupted}.",
            child_ids.len()
        );
        self.add_or_replace_message(MSG_COMPOSITE, &summary);

        let resolved = if previous == ExecutionState::Error || errors > 0 {
            ExecutionState::Error
        } else if previous == ExecutionState::Interrupted || interrupted > 0 {
            ExecutionState::Interrupted
        } else if previous == ExecutionState::Failure || failed > 0 {
            ExecutionState::Failure
        } else {
            ExecutionState::Success
        };
        self.tree.borrow_mut().nodes[self.id].state = resolved;
        log::debug!("state computed to [{resolved}] for [{}]", self.description());
    }

    fn notify_policy(&self) {
        let state = self.state();
        if matches!(
            state,
            ExecutionState::Failure | ExecutionState::Error | ExecutionState::Interrupted
        ) {
            self.continuation_policy()
                .record_failure(self.id, &self.description());
        }
    }

    fn notify_repository(&self) {
        let repository = self.tree.borrow().repository.clone();
        if let Some(repository) = repository {
            repository.notify_of_result_state_change(self);
        }
    }

    fn notify_parent(&self) {
        if let Some(parent) = self.parent() {
            if !parent.is_executing() {
                parent.set_state(ExecutionState::Computed);
            }
        }
    }

    /// Complete with `Success` and a catalog message
    pub fn complete_as_successful(
        &self,
        messages: &dyn MessageProvider,
        key: &str,
        args: &[&str],
    ) {
        let message = messages.message_with_args(key, args);
        self.add_message(MSG_MESSAGE, &message);
        self.set_state(ExecutionState::Success);
    }

    /// Complete with `Failure` and a catalog message
    pub fn complete_as_failure(&self, messages: &dyn MessageProvider, key: &str, args: &[&str]) {
        let message = messages.message_with_args(key, args);
        self.add_message(MSG_ERROR_MESSAGE, &message);
        self.set_state(ExecutionState::Failure);
    }

    /// Complete with `Interrupted` and a catalog message
    pub fn complete_as_interrupted(&self, messages: &dyn MessageProvider, key: &str) {
        let message = messages.message(key);
        self.add_message(MSG_MESSAGE, &message);
        self.set_state(ExecutionState::Interrupted);
    }

    /// Complete with `Error`, recording a catalog message and the
    /// error's formatted source chain
    pub fn complete_as_error(
        &self,
        messages: &dyn MessageProvider,
        key: &str,
        args: &[&str],
        error: &(dyn std::error::Error + 'static),
    ) {
        let message = messages.message_with_args(key, args);
        self.add_message(MSG_ERROR_MESSAGE, &message);
        self.add_message(MSG_STACKTRACE, &error_chain(error));
        self.set_state(ExecutionState::Error);
    }

    /// Complete with `Error` directly from an error value
    pub fn complete_as_raw_error(&self, error: &(dyn std::error::Error + 'static)) {
        self.add_message(MSG_ERROR_MESSAGE, &error.to_string());
        self.add_message(MSG_STACKTRACE, &error_chain(error));
        self.set_state(ExecutionState::Error);
    }

    /// Complete by aggregating the child states, with a catalog message
    pub fn complete_as_computed(&self, messages: &dyn MessageProvider, key: &str, args: &[&str]) {
        let message = messages.message_with_args(key, args);
        self.add_message(MSG_MESSAGE, &message);
        self.set_state(ExecutionState::Computed);
    }

    /// Complete by aggregating the child states, with separate success
    /// and failure catalog messages.
    ///
    /// The failure message receives the failed and errored child counts
    /// as its first two positional arguments, ahead of `failure_args`.
    pub fn complete_as_computed_with(
        &self,
        messages: &dyn MessageProvider,
        success_key: &str,
        success_args: &[&str],
        failure_key: &str,
        failure_args: &[&str],
    ) {
        self.set_state(ExecutionState::Computed);
        if self.is_success() {
            let message = messages.message_with_args(success_key, success_args);
            self.add_message(MSG_MESSAGE, &message);
            return;
        }
        let failed = self
            .children_with_state(ExecutionState::Failure)
            .len()
            .to_string();
        let errors = self
            .children_with_state(ExecutionState::Error)
            .len()
            .to_string();
        let mut args: Vec<&str> = vec![&failed, &errors];
        args.extend_from_slice(failure_args);
        let message = messages.message_with_args(failure_key, &args);
        self.add_message(MSG_MESSAGE, &message);
    }
}

impl fmt::Debug for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionResult")
            .field("id", &self.id)
            .field("description", &self.description())
            .field("state", &self.state())
            .field("children", &self.number_of_children())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MessageCatalog;
    use crate::repository::RecordingRepository;

    fn catalog() -> MessageCatalog {
        MessageCatalog::from_properties(
            "done = Completed {0}.\n\
             oops = Operation {0} blew up.\n\
             failed = Operation failed.\n\
             summary.ok = All good.\n\
             summary.bad = {0} failures and {1} errors in {2}.\n\
             stopped = Operation interrupted.\n",
        )
    }

    #[test]
    fn test_root_starts_executing() {
        let root = ExecutionResult::new("root");
        assert!(root.is_executing());
        assert!(root.is_root());
        assert_eq!(root.description(), "root");
        assert_eq!(root.number_of_children(), 0);
    }

    #[test]
    #[should_panic(expected = "description is undefined")]
    fn test_empty_description_is_rejected() {
        let _ = ExecutionResult::new("");
    }

    #[test]
    fn test_add_child_preserves_order() {
        let root = ExecutionResult::new("root");
        root.add_child("a").unwrap();
        root.add_child("b").unwrap();
        root.add_child("c").unwrap();
        let descriptions: Vec<String> = root
            .children()
            .iter()
            .map(ExecutionResult::description)
            .collect();
        assert_eq!(descriptions, vec!["a", "b", "c"]);
        assert_eq!(root.first_child().unwrap().description(), "a");
    }

    #[test]
    fn test_child_is_not_root_and_knows_parent() {
        let root = ExecutionResult::new("root");
        let child = root.add_child("child").unwrap();
        assert!(!child.is_root());
        assert_eq!(child.parent().unwrap().id(), root.id());
        assert_eq!(child.root_result().id(), root.id());
    }

    #[test]
    fn test_root_result_from_grandchild() {
        let root = ExecutionResult::new("root");
        let child = root.add_child("child").unwrap();
        let grandchild = child.add_child("grandchild").unwrap();
        assert_eq!(grandchild.root_result().description(), "root");
    }

    #[test]
    fn test_message_append_semantics() {
        let root = ExecutionResult::new("root");
        root.add_message("Message", "one");
        root.add_message("Message", "two");
        assert_eq!(root.message("Message"), Some("one\ntwo".to_string()));
    }

    #[test]
    fn test_elapsed_freezes_on_leaving_executing() {
        let root = ExecutionResult::new("root");
        root.set_state(ExecutionState::Success);
        let frozen = root.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(root.elapsed(), frozen);
        // returning to executing does not restart the clock
        root.set_state(ExecutionState::Executing);
        assert_eq!(root.elapsed(), frozen);
    }

    #[test]
    fn test_computed_with_no_children_is_success() {
        let root = ExecutionResult::new("root");
        root.set_state(ExecutionState::Computed);
        assert!(root.is_success());
        assert_eq!(
            root.message(MSG_COMPOSITE),
            Some("Results: 0, successful: 0, failures: 0, errors: 0, interrupted: 0.".to_string())
        );
    }

    #[test]
    fn test_computed_aggregates_child_error() {
        let root = ExecutionResult::new("root");
        let a = root.add_child("a").unwrap();
        let b = root.add_child("b").unwrap();
        a.set_state(ExecutionState::Success);
        b.set_state(ExecutionState::Error);
        root.set_state(ExecutionState::Computed);
        assert!(root.is_error());
        assert_eq!(
            root.message(MSG_COMPOSITE),
            Some("Results: 2, successful: 1, failures: 0, errors: 1, interrupted: 0.".to_string())
        );
    }

    #[test]
    fn test_computed_failure_dominates_success() {
        let root = ExecutionResult::new("root");
        root.add_child("a").unwrap().set_state(ExecutionState::Success);
        root.add_child("b").unwrap().set_state(ExecutionState::Failure);
        root.set_state(ExecutionState::Computed);
        assert!(root.is_failed());
    }

    #[test]
    fn test_computed_interrupted_dominates_failure() {
        let root = ExecutionResult::new("root");
        root.add_child("a").unwrap().set_state(ExecutionState::Failure);
        root.add_child("b")
            .unwrap()
            .set_state(ExecutionState::Interrupted);
        root.set_state(ExecutionState::Computed);
        assert!(root.is_interrupted());
    }

    #[test]
    fn test_computed_forces_executing_child_to_error() {
        let root = ExecutionResult::new("root");
        let child = root.add_child("never finished").unwrap();
        root.set_state(ExecutionState::Computed);
        assert!(root.is_error());
        assert!(child.is_error());
        assert_eq!(
            child.message(MSG_MESSAGE),
            Some("State is forced to error due to state not being set explicit.".to_string())
        );
        assert_eq!(child.message(MSG_STACKTRACE), Some("n/a".to_string()));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let root = ExecutionResult::new("root");
        root.add_child("a").unwrap().set_state(ExecutionState::Success);
        root.add_child("b").unwrap().set_state(ExecutionState::Failure);
        root.set_state(ExecutionState::Computed);
        let first_state = root.state();
        let first_summary = root.message(MSG_COMPOSITE);
        root.set_state(ExecutionState::Computed);
        assert_eq!(root.state(), first_state);
        assert_eq!(root.message(MSG_COMPOSITE), first_summary);
    }

    #[test]
    fn test_late_child_failure_widens_completed_parent() {
        let root = ExecutionResult::new("root");
        let a = root.add_child("a").unwrap();
        a.set_state(ExecutionState::Success);
        root.set_state(ExecutionState::Computed);
        assert!(root.is_success());

        // a child changing after the parent completed re-aggregates it
        let b = root.add_child("b").unwrap();
        b.set_state(ExecutionState::Failure);
        assert!(root.is_failed());
    }

    #[test]
    fn test_child_success_never_narrows_parent_state() {
        let root = ExecutionResult::new("root");
        root.add_child("a").unwrap().set_state(ExecutionState::Error);
        root.set_state(ExecutionState::Computed);
        assert!(root.is_error());

        let b = root.add_child("b").unwrap();
        b.set_state(ExecutionState::Success);
        assert!(root.is_error());
    }

    #[test]
    fn test_widening_propagates_to_root() {
        let root = ExecutionResult::new("root");
        let mid = root.add_child("mid").unwrap();
        let leaf = mid.add_child("leaf").unwrap();
        leaf.set_state(ExecutionState::Success);
        mid.set_state(ExecutionState::Computed);
        root.set_state(ExecutionState::Computed);
        assert!(root.is_success());

        let late = mid.add_child("late").unwrap();
        late.set_state(ExecutionState::Error);
        assert!(mid.is_error());
        assert!(root.is_error());
    }

    #[test]
    fn test_cancellation_locks_out_add_child() {
        let root = ExecutionResult::new("root");
        let child = root.add_child("child").unwrap();
        root.set_cancelled();

        let err = child.add_child("grandchild").unwrap_err();
        assert!(matches!(err, Error::Interrupted(_)));
        assert!(child.is_interrupted());

        let err = root.add_child("another").unwrap_err();
        assert!(matches!(err, Error::Interrupted(_)));
        assert!(root.is_interrupted());
    }

    #[test]
    fn test_abort_on_failure_locks_out_add_child() {
        let root = ExecutionResult::new("root");
        root.continuation_policy().disable_continue_on_failure();

        let first = root.add_child("first").unwrap();
        first.set_state(ExecutionState::Failure);

        let err = root.add_child("second").unwrap_err();
        assert!(matches!(err, Error::Interrupted(_)));
        assert!(root.is_interrupted());

        // the recorded failure is the first failing child, unchanged
        let failed = root.continuation_policy().failed_result().unwrap();
        assert_eq!(failed.id, first.id());
        assert_eq!(failed.description, "first");
    }

    #[test]
    fn test_continue_on_failure_allows_later_children() {
        let root = ExecutionResult::new("root");
        let a = root.add_child("A").unwrap();
        let b = root.add_child("B").unwrap();
        a.set_state(ExecutionState::Success);
        b.set_state(ExecutionState::Error);
        root.set_state(ExecutionState::Computed);
        assert!(root.is_error());

        // continue-on-failure is the default, so C is added normally
        let c = root.add_child("C").unwrap();
        c.set_state(ExecutionState::Success);
        root.set_state(ExecutionState::Computed);
        assert!(root.is_error());
        assert_eq!(
            root.message(MSG_COMPOSITE),
            Some("Results: 3, successful: 2, failures: 0, errors: 1, interrupted: 0.".to_string())
        );
    }

    #[test]
    fn test_repository_notified_on_construction_and_state_changes() {
        let repository = Rc::new(RecordingRepository::new());
        let root =
            ExecutionResult::with_repository("root", Rc::clone(&repository) as Rc<dyn ResultRepository>);
        let child = root.add_child("child").unwrap();
        child.set_state(ExecutionState::Success);

        let events = repository.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].description, "root");
        assert_eq!(events[0].state, ExecutionState::Executing);
        assert_eq!(events[1].description, "child");
        assert_eq!(events[1].state, ExecutionState::Executing);
        assert_eq!(events[2].description, "child");
        assert_eq!(events[2].state, ExecutionState::Success);
    }

    #[test]
    fn test_repository_sees_construction_before_state_change_per_result() {
        let repository = Rc::new(RecordingRepository::new());
        let root =
            ExecutionResult::with_repository("root", Rc::clone(&repository) as Rc<dyn ResultRepository>);
        let child = root.add_child("child").unwrap();
        child.set_state(ExecutionState::Failure);
        root.set_state(ExecutionState::Computed);

        for id in [root.id(), child.id()] {
            let states: Vec<ExecutionState> = repository
                .events()
                .into_iter()
                .filter(|event| event.id == id)
                .map(|event| event.state)
                .collect();
            assert_eq!(states.first(), Some(&ExecutionState::Executing));
        }
    }

    #[test]
    fn test_complete_as_successful() {
        let root = ExecutionResult::new("root");
        root.complete_as_successful(&catalog(), "done", &["deploy"]);
        assert!(root.is_success());
        assert_eq!(root.message(MSG_MESSAGE), Some("Completed deploy.".to_string()));
    }

    #[test]
    fn test_complete_as_failure_records_error_message() {
        let root = ExecutionResult::new("root");
        root.complete_as_failure(&catalog(), "failed", &[]);
        assert!(root.is_failed());
        assert_eq!(
            root.message(MSG_ERROR_MESSAGE),
            Some("Operation failed.".to_string())
        );
    }

    #[test]
    fn test_complete_as_error_records_message_and_trace() {
        let root = ExecutionResult::new("root");
        let error = std::io::Error::other("connection refused");
        root.complete_as_error(&catalog(), "oops", &["deploy"], &error);
        assert!(root.is_error());
        assert_eq!(
            root.message(MSG_ERROR_MESSAGE),
            Some("Operation deploy blew up.".to_string())
        );
        assert_eq!(
            root.message(MSG_STACKTRACE),
            Some("connection refused".to_string())
        );
    }

    #[test]
    fn test_complete_as_interrupted() {
        let root = ExecutionResult::new("root");
        root.complete_as_interrupted(&catalog(), "stopped");
        assert!(root.is_interrupted());
        assert_eq!(
            root.message(MSG_MESSAGE),
            Some("Operation interrupted.".to_string())
        );
    }

    #[test]
    fn test_complete_as_computed_with_dual_keys_success() {
        let root = ExecutionResult::new("root");
        root.add_child("a").unwrap().set_state(ExecutionState::Success);
        root.complete_as_computed_with(&catalog(), "summary.ok", &[], "summary.bad", &["deploy"]);
        assert!(root.is_success());
        assert_eq!(root.message(MSG_MESSAGE), Some("All good.".to_string()));
    }

    #[test]
    fn test_complete_as_computed_with_dual_keys_failure_counts() {
        let root = ExecutionResult::new("root");
        root.add_child("a").unwrap().set_state(ExecutionState::Failure);
        root.add_child("b").unwrap().set_state(ExecutionState::Error);
        root.complete_as_computed_with(&catalog(), "summary.ok", &[], "summary.bad", &["deploy"]);
        assert!(root.is_error());
        assert_eq!(
            root.message(MSG_MESSAGE),
            Some("1 failures and 1 errors in deploy.".to_string())
        );
    }
}
