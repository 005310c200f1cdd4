//! Topic-based publish/subscribe.
//!
//! The [`ListenerTable`] holds subscribers per topic. Publishing goes
//! through the [`Farbs`](crate::Farbs) context, which dispatches to a
//! snapshot of the table so subscribers may subscribe or unsubscribe while
//! a topic is being published.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::error::Result;

/// A subscriber callback.
///
/// Subscribers are matched by identity: clones of one `Subscriber` are the
/// same subscriber, two `Subscriber`s built from identical closures are not.
#[derive(Clone)]
pub struct Subscriber(Rc<dyn Fn(&Value) -> Result<()>>);

impl Subscriber {
    pub fn new(callback: impl Fn(&Value) -> Result<()> + 'static) -> Self {
        Self(Rc::new(callback))
    }

    /// Invoke the callback with a payload.
    ///
    /// # Errors
    /// Whatever the callback returns.
    pub fn call(&self, payload: &Value) -> Result<()> {
        (self.0)(payload)
    }

    /// Whether both handles are the same subscriber.
    #[must_use]
    pub fn ptr_eq(&self, other: &Subscriber) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscriber")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Subscribers per topic, in subscription order.
///
/// A topic that was never subscribed to behaves exactly like one whose
/// subscribers were all removed.
#[derive(Debug, Default)]
pub struct ListenerTable {
    topics: HashMap<String, Vec<Subscriber>>,
}

impl ListenerTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber to a topic. The same subscriber may be added
    /// more than once; each entry is removed separately.
    pub fn subscribe(&mut self, topic: impl Into<String>, subscriber: Subscriber) {
        self.topics.entry(topic.into()).or_default().push(subscriber);
    }

    /// Remove the first entry of `subscriber` from a topic.
    ///
    /// Returns `false` if the topic or the subscriber was not found.
    pub fn unsubscribe(&mut self, topic: &str, subscriber: &Subscriber) -> bool {
        let Some(subscribers) = self.topics.get_mut(topic) else {
            return false;
        };
        match subscribers.iter().position(|s| s.ptr_eq(subscriber)) {
            Some(index) => {
                subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Copy of the current subscribers of a topic.
    #[must_use]
    pub fn subscribers(&self, topic: &str) -> Vec<Subscriber> {
        self.topics.get(topic).cloned().unwrap_or_default()
    }

    /// Number of entries for a topic, duplicates included.
    #[must_use]
    pub fn count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, Vec::len)
    }

    /// Topics that currently have at least one subscriber, sorted.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self
            .topics
            .iter()
            .filter(|(_, subscribers)| !subscribers.is_empty())
            .map(|(topic, _)| topic.clone())
            .collect();
        topics.sort();
        topics
    }

    pub fn clear(&mut self) {
        self.topics.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Subscriber {
        Subscriber::new(|_| Ok(()))
    }

    #[test]
    fn test_subscribe_creates_topic() {
        let mut table = ListenerTable::new();
        let listener = noop();

        table.subscribe("__TOPIC__", listener.clone());

        assert_eq!(table.count("__TOPIC__"), 1);
        assert!(table.subscribers("__TOPIC__")[0].ptr_eq(&listener));
    }

    #[test]
    fn test_subscribe_keeps_duplicates() {
        let mut table = ListenerTable::new();
        let listener = noop();

        table.subscribe("__TOPIC__", listener.clone());
        table.subscribe("__TOPIC__", listener.clone());

        let subscribers = table.subscribers("__TOPIC__");
        assert_eq!(subscribers.len(), 2);
        assert!(subscribers.iter().all(|s| s.ptr_eq(&listener)));
    }

    #[test]
    fn test_unsubscribe_keeps_order_of_others() {
        let mut table = ListenerTable::new();
        let listener = noop();
        let listener2 = noop();
        let listener3 = noop();

        table.subscribe("__TOPIC__", listener3.clone());
        table.subscribe("__TOPIC__", listener.clone());
        table.subscribe("__TOPIC__", listener2.clone());

        assert!(table.unsubscribe("__TOPIC__", &listener));

        let subscribers = table.subscribers("__TOPIC__");
        assert_eq!(subscribers.len(), 2);
        assert!(subscribers[0].ptr_eq(&listener3));
        assert!(subscribers[1].ptr_eq(&listener2));
    }

    #[test]
    fn test_unsubscribe_removes_one_duplicate_at_a_time() {
        let mut table = ListenerTable::new();
        let listener = noop();

        table.subscribe("__TOPIC__", listener.clone());
        table.subscribe("__TOPIC__", listener.clone());

        assert!(table.unsubscribe("__TOPIC__", &listener));
        assert_eq!(table.count("__TOPIC__"), 1);
        assert!(table.unsubscribe("__TOPIC__", &listener));
        assert_eq!(table.count("__TOPIC__"), 0);
        assert!(!table.unsubscribe("__TOPIC__", &listener));
    }

    #[test]
    fn test_unsubscribe_unknown_topic_is_noop() {
        let mut table = ListenerTable::new();
        assert!(!table.unsubscribe("nothing", &noop()));
        assert!(table.topics().is_empty());
    }

    #[test]
    fn test_identity_not_equality() {
        let mut table = ListenerTable::new();
        let a = noop();
        let b = noop();

        table.subscribe("t", a.clone());

        assert!(!table.unsubscribe("t", &b));
        assert_eq!(table.count("t"), 1);
    }

    #[test]
    fn test_topics_skip_emptied() {
        let mut table = ListenerTable::new();
        let listener = noop();
        table.subscribe("a", listener.clone());
        table.subscribe("b", listener.clone());
        table.unsubscribe("a", &listener);

        assert_eq!(table.topics(), ["b"]);
    }
}
