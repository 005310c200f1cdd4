//! Checkbox components.

use serde_json::{json, Value};

use crate::config::CHECKBOX_CHANGE_TOPIC;
use crate::context::{Farbs, WeakFarbs};
use crate::dom::NodeRef;
use crate::error::Result;
use crate::registry::{Component, Properties};

const CHECKED_ATTRIBUTE: &str = "checked";

fn set_checked(node: &NodeRef, checked: bool) {
    if checked {
        node.set_attribute(CHECKED_ATTRIBUTE, CHECKED_ATTRIBUTE);
    } else {
        node.remove_attribute(CHECKED_ATTRIBUTE);
    }
}

/// Checkbox that calls a method from the method registry on change.
///
/// The method name comes from the `data-farbs_onchange` attribute. The
/// method receives `[node id, checked]`.
#[derive(Debug)]
pub struct Checkbox {
    node: NodeRef,
    farbs: WeakFarbs,
    /// Name of the method to call on change.
    pub onchange: Option<String>,
    /// Every other property applied by the scanner.
    pub properties: Properties,
}

impl Checkbox {
    /// # Errors
    /// Never fails.
    pub fn new(node: &NodeRef, farbs: &Farbs) -> Result<Self> {
        Ok(Self {
            node: node.clone(),
            farbs: farbs.downgrade(),
            onchange: None,
            properties: Properties::new(),
        })
    }

    #[must_use]
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.node.has_attribute(CHECKED_ATTRIBUTE)
    }

    /// Set the checked state and call the `onchange` method.
    ///
    /// Returns the method's result, or `None` if no method is configured or
    /// registered.
    ///
    /// # Errors
    /// Whatever the method returns.
    pub fn change(&self, checked: bool) -> Result<Option<Value>> {
        set_checked(&self.node, checked);

        let (Some(method), Some(farbs)) = (&self.onchange, self.farbs.upgrade()) else {
            return Ok(None);
        };
        let id = self.node.id().unwrap_or_default();
        farbs.call_method(method, &[json!(id), json!(checked)])
    }
}

impl Component for Checkbox {
    fn set_property(&mut self, name: &str, value: &str) {
        match name {
            "onchange" => self.onchange = Some(value.to_string()),
            _ => {
                self.properties.insert(name.to_string(), value.to_string());
            }
        }
    }
}

/// Checkbox that publishes its changes on `/Checkbox/change`.
///
/// The payload is `["checkbox", checked]`.
#[derive(Debug)]
pub struct PublishingCheckbox {
    node: NodeRef,
    farbs: WeakFarbs,
    pub properties: Properties,
}

impl PublishingCheckbox {
    /// # Errors
    /// Never fails.
    pub fn new(node: &NodeRef, farbs: &Farbs) -> Result<Self> {
        Ok(Self {
            node: node.clone(),
            farbs: farbs.downgrade(),
            properties: Properties::new(),
        })
    }

    #[must_use]
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.node.has_attribute(CHECKED_ATTRIBUTE)
    }

    /// Set the checked state and publish it.
    ///
    /// # Errors
    /// The first subscriber error.
    pub fn change(&self, checked: bool) -> Result<()> {
        set_checked(&self.node, checked);

        match self.farbs.upgrade() {
            Some(farbs) => farbs.publish(CHECKBOX_CHANGE_TOPIC, &json!(["checkbox", checked])),
            None => Ok(()),
        }
    }
}

impl Component for PublishingCheckbox {
    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }
}
