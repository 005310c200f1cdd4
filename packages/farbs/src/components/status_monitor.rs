//! Status monitor listening for checkbox changes.

use serde_json::Value;

use crate::config::CHECKBOX_CHANGE_TOPIC;
use crate::context::{Farbs, WeakFarbs};
use crate::dom::NodeRef;
use crate::error::Result;
use crate::pubsub::Subscriber;
use crate::registry::{Component, Properties};

/// Appends a `<p>` line to its node for every `/Checkbox/change` event.
///
/// The subscription is made at construction; call [`StatusMonitor::destroy`]
/// to remove it.
#[derive(Debug)]
pub struct StatusMonitor {
    node: NodeRef,
    farbs: WeakFarbs,
    subscriber: Subscriber,
    pub properties: Properties,
}

impl StatusMonitor {
    /// # Errors
    /// Never fails.
    pub fn new(node: &NodeRef, farbs: &Farbs) -> Result<Self> {
        let target = node.clone();
        let subscriber = farbs.subscribe_fn(CHECKBOX_CHANGE_TOPIC, move |payload| {
            let line = format!(
                "Change monitored. Type: {}, new value is: {}",
                display(payload.get(0)),
                display(payload.get(1))
            );
            target.append_element("p").append_text(line);
            Ok(())
        });

        Ok(Self {
            node: node.clone(),
            farbs: farbs.downgrade(),
            subscriber,
            properties: Properties::new(),
        })
    }

    #[must_use]
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// Lines written so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.node
            .element_children()
            .into_iter()
            .filter(|child| child.tag_name() == Some("p"))
            .map(|child| child.text_content())
            .collect()
    }

    /// Unsubscribe from checkbox changes.
    pub fn destroy(&self) {
        if let Some(farbs) = self.farbs.upgrade() {
            farbs.unsubscribe(CHECKBOX_CHANGE_TOPIC, &self.subscriber);
        }
    }
}

impl Component for StatusMonitor {
    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }
}

/// Render a payload entry the way it reads in a sentence.
fn display(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "undefined".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_monitor_records_changes() {
        let farbs = Farbs::new();
        let node = NodeRef::new_element("div");
        let monitor = StatusMonitor::new(&node, &farbs).unwrap();

        farbs
            .publish(CHECKBOX_CHANGE_TOPIC, &json!(["checkbox", true]))
            .unwrap();

        assert_eq!(
            monitor.messages(),
            ["Change monitored. Type: checkbox, new value is: true"]
        );
    }

    #[test]
    fn test_monitor_destroy_unsubscribes() {
        let farbs = Farbs::new();
        let node = NodeRef::new_element("div");
        let monitor = StatusMonitor::new(&node, &farbs).unwrap();
        assert_eq!(farbs.subscriber_count(CHECKBOX_CHANGE_TOPIC), 1);

        monitor.destroy();
        farbs
            .publish(CHECKBOX_CHANGE_TOPIC, &json!(["checkbox", false]))
            .unwrap();

        assert_eq!(farbs.subscriber_count(CHECKBOX_CHANGE_TOPIC), 0);
        assert!(monitor.messages().is_empty());
    }

    #[test]
    fn test_monitor_handles_missing_payload() {
        let farbs = Farbs::new();
        let node = NodeRef::new_element("div");
        let monitor = StatusMonitor::new(&node, &farbs).unwrap();

        farbs.publish_empty(CHECKBOX_CHANGE_TOPIC).unwrap();

        assert_eq!(
            monitor.messages(),
            ["Change monitored. Type: undefined, new value is: undefined"]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(display(Some(&json!("x"))), "x");
        assert_eq!(display(Some(&json!(3))), "3");
        assert_eq!(display(None), "undefined");
    }
}
