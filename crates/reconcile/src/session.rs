//! Resource session port and the document-backed session
//!
//! The session is the opaque live-model handle threaded through a
//! traversal. The director only propagates it; concrete visitors
//! downcast to the session type they understand.

use crate::resolver::find_attribute_key;
use anyhow::{Context, bail};
use serde_json::Value;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// Opaque handle to the live resource a traversal converges.
///
/// The core never inspects a session; visitors downcast through
/// [`Session::as_any`] to the concrete type they were built for.
pub trait Session: 'static {
    /// Self as `Any` for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Self as mutable `Any` for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Shared session handle passed to visitors via `set_session`.
///
/// Single-writer per traversal; the core provides no session locking.
pub type SessionHandle = Rc<RefCell<dyn Session>>;

/// Session owning a mutable JSON document as the live model.
///
/// Convergence visitors edit the document through a path API whose
/// segments use the same relaxed name matching as attribute resolution.
/// Array segments match the element's `"name"` member first, then a
/// numeric index.
#[derive(Debug)]
pub struct DocumentSession {
    document: Value,
}

impl DocumentSession {
    /// Create a session over a live-model document
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// Wrap this session into the shared handle visitors receive
    pub fn into_handle(self) -> SessionHandle {
        Rc::new(RefCell::new(self))
    }

    /// Current state of the document
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Read an attribute under a path, if present
    pub fn attribute(&self, path: &[String], name: &str) -> Option<Value> {
        let target = navigate(&self.document, path)?;
        let map = target.as_object()?;
        let key = find_attribute_key(name, map.keys().map(String::as_str))?;
        map.get(key).cloned()
    }

    /// Set an attribute under a path, replacing a relaxed-matching
    /// existing key or inserting under the given name
    pub fn set_attribute(
        &mut self,
        path: &[String],
        name: &str,
        value: Value,
    ) -> anyhow::Result<()> {
        let target = navigate_mut(&mut self.document, path)?;
        let Value::Object(map) = target else {
            bail!("path [{}] is not an object", path.join("/"));
        };
        let key = find_attribute_key(name, map.keys().map(String::as_str))
            .map_or_else(|| name.to_string(), str::to_string);
        map.insert(key, value);
        Ok(())
    }

    /// Remove an attribute under a path. Removing an absent attribute
    /// is a no-op.
    pub fn remove_attribute(&mut self, path: &[String], name: &str) -> anyhow::Result<()> {
        let target = navigate_mut(&mut self.document, path)?;
        let Value::Object(map) = target else {
            bail!("path [{}] is not an object", path.join("/"));
        };
        if let Some(key) = find_attribute_key(name, map.keys().map(String::as_str)) {
            let key = key.to_string();
            map.remove(&key);
        }
        Ok(())
    }

    /// Append an element to a collection under a path
    pub fn add_collection_entry(&mut self, path: &[String], value: Value) -> anyhow::Result<()> {
        let target = navigate_mut(&mut self.document, path)?;
        let Value::Array(items) = target else {
            bail!("path [{}] is not a collection", path.join("/"));
        };
        items.push(value);
        Ok(())
    }

    /// Remove a collection element by id under a path
    pub fn remove_collection_entry(&mut self, path: &[String], id: &str) -> anyhow::Result<()> {
        let target = navigate_mut(&mut self.document, path)?;
        let Value::Array(items) = target else {
            bail!("path [{}] is not a collection", path.join("/"));
        };
        if let Some(index) = position_of(items, id) {
            items.remove(index);
        }
        Ok(())
    }
}

impl Session for DocumentSession {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn element_name(item: &Value) -> Option<&str> {
    item.get("name").and_then(Value::as_str)
}

fn position_of(items: &[Value], segment: &str) -> Option<usize> {
    if let Some(index) = items.iter().position(|item| element_name(item) == Some(segment)) {
        return Some(index);
    }
    segment
        .parse::<usize>()
        .ok()
        .filter(|index| *index < items.len())
}

fn navigate<'a>(document: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = document;
    for segment in path {
        current = match current {
            Value::Object(map) => {
                let key = find_attribute_key(segment, map.keys().map(String::as_str))?;
                map.get(key)?
            }
            Value::Array(items) => &items[position_of(items, segment)?],
            _ => return None,
        };
    }
    Some(current)
}

fn navigate_mut<'a>(document: &'a mut Value, path: &[String]) -> anyhow::Result<&'a mut Value> {
    let mut current = document;
    for segment in path {
        current = match current {
            Value::Object(map) => {
                let key = find_attribute_key(segment, map.keys().map(String::as_str))
                    .map(str::to_string)
                    .with_context(|| format!("path segment [{segment}] not found"))?;
                map.get_mut(&key)
                    .with_context(|| format!("path segment [{segment}] not found"))?
            }
            Value::Array(items) => {
                let index = position_of(items, segment)
                    .with_context(|| format!("collection entry [{segment}] not found"))?;
                &mut items[index]
            }
            _ => bail!("path segment [{segment}] reached a scalar"),
        };
    }
    Ok(current)
}
