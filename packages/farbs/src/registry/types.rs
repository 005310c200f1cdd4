//! Types shared by the registries and the scan engine.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use super::handler::{Component, ComponentFactory};
use crate::error::Result;

/// Properties read from namespace attributes, keyed by property name.
pub type Properties = BTreeMap<String, String>;

/// A live component as stored in the instance registry.
pub type Instance = Rc<RefCell<dyn Component>>;

/// A constructor as stored in the class registry.
pub type Class = Rc<dyn ComponentFactory>;

/// A named function as stored in the method registry.
///
/// Arguments arrive as a slice, so a method can take any number of them.
pub type Method = Rc<dyn Fn(&[Value]) -> Result<Value>>;

/// One node the scanner instantiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedNode {
    /// Instance registry key (the node id, possibly generated).
    pub id: String,
    /// Class key read from the marker attribute.
    pub class: String,
    /// Properties applied to the instance.
    pub properties: Properties,
}

/// Outcome of a scan pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Instantiated nodes in document order.
    pub instantiated: Vec<ScannedNode>,
    /// Ids assigned to nodes that had none.
    pub generated_ids: Vec<String>,
    /// Class keys that had no registered constructor.
    pub unresolved: Vec<String>,
    /// Whether an unresolved class cut the pass short.
    pub aborted: bool,
}

impl ScanReport {
    /// Ids of the instantiated nodes, in order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.instantiated.iter().map(|n| n.id.as_str()).collect()
    }

    /// Whether every marked node was instantiated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}
