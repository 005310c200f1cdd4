//! The shared context handed to every component.
//!
//! A [`Farbs`] value owns the class, instance and method registries, the
//! listener table and the scan engine. It is a cheap handle: clones share the
//! same state, and [`Farbs::new`] creates an independent context, so tests
//! and separate widget trees never see each other's registrations.
//!
//! # Re-entrancy
//!
//! No registry borrow is held while user code runs. Constructors,
//! subscribers and methods may register, subscribe, unsubscribe or publish
//! on the context that is calling them.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::config::ScanConfig;
use crate::dom::{Document, NodeRef};
use crate::error::Result;
use crate::pubsub::{ListenerTable, Subscriber};
use crate::registry::{
    Class, Component, ComponentFactory, Instance, Method, Registry, ScanEngine, ScanReport,
};

#[derive(Default)]
struct Inner {
    classes: RefCell<Registry<Class>>,
    instances: RefCell<Registry<Instance>>,
    methods: RefCell<Registry<Method>>,
    listeners: RefCell<ListenerTable>,
    engine: ScanEngine,
}

/// Registries, listener table and scan engine behind one handle.
#[derive(Clone, Default)]
pub struct Farbs {
    inner: Rc<Inner>,
}

/// Non-owning handle to a [`Farbs`] context.
///
/// Components that keep their context around should hold one of these, since
/// the context's instance registry holds the component.
#[derive(Clone, Default)]
pub struct WeakFarbs {
    inner: Weak<Inner>,
}

impl WeakFarbs {
    /// The context, if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Farbs> {
        self.inner.upgrade().map(|inner| Farbs { inner })
    }
}

impl fmt::Debug for WeakFarbs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakFarbs")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl Farbs {
    /// Create an empty context with the default scan config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty context with a custom scan config.
    #[must_use]
    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                engine: ScanEngine::new(config),
                ..Inner::default()
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        self.inner.engine.config()
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakFarbs {
        WeakFarbs {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles share the same state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Farbs) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // --- class registry ---

    /// Register a constructor under a class id.
    pub fn register_class<F, C>(&self, id: impl Into<String>, ctor: F)
    where
        F: Fn(&NodeRef, &Farbs) -> Result<C> + 'static,
        C: Component,
    {
        self.register_factory(id, ctor);
    }

    /// Register any [`ComponentFactory`] under a class id.
    pub fn register_factory(&self, id: impl Into<String>, factory: impl ComponentFactory + 'static) {
        let class: Class = Rc::new(factory);
        self.inner.classes.borrow_mut().register(id, class);
    }

    #[must_use]
    pub fn class(&self, id: &str) -> Option<Class> {
        self.inner.classes.borrow().get(id)
    }

    #[must_use]
    pub fn has_class(&self, id: &str) -> bool {
        self.inner.classes.borrow().contains(id)
    }

    #[must_use]
    pub fn class_ids(&self) -> Vec<String> {
        self.inner.classes.borrow().ids()
    }

    // --- instance registry ---

    pub fn register_instance(&self, id: impl Into<String>, instance: Instance) {
        self.inner.instances.borrow_mut().register(id, instance);
    }

    #[must_use]
    pub fn instance(&self, id: &str) -> Option<Instance> {
        self.inner.instances.borrow().get(id)
    }

    #[must_use]
    pub fn instance_ids(&self) -> Vec<String> {
        self.inner.instances.borrow().ids()
    }

    // --- method registry ---

    pub fn register_method(
        &self,
        id: impl Into<String>,
        method: impl Fn(&[Value]) -> Result<Value> + 'static,
    ) {
        let method: Method = Rc::new(method);
        self.inner.methods.borrow_mut().register(id, method);
    }

    #[must_use]
    pub fn method(&self, id: &str) -> Option<Method> {
        self.inner.methods.borrow().get(id)
    }

    /// Call the method registered under `id`.
    ///
    /// Returns `Ok(None)` when nothing is registered under `id`.
    ///
    /// # Errors
    /// Whatever the method returns.
    pub fn call_method(&self, id: &str, args: &[Value]) -> Result<Option<Value>> {
        let Some(method) = self.method(id) else {
            tracing::debug!(method = %id, "No method registered, ignoring call");
            return Ok(None);
        };
        method(args).map(Some)
    }

    // --- pub/sub ---

    /// Subscribe to a topic.
    pub fn subscribe(&self, topic: impl Into<String>, subscriber: &Subscriber) {
        self.inner
            .listeners
            .borrow_mut()
            .subscribe(topic, subscriber.clone());
    }

    /// Wrap a closure in a [`Subscriber`], subscribe it and return it so it
    /// can be unsubscribed later.
    pub fn subscribe_fn(
        &self,
        topic: impl Into<String>,
        callback: impl Fn(&Value) -> Result<()> + 'static,
    ) -> Subscriber {
        let subscriber = Subscriber::new(callback);
        self.subscribe(topic, &subscriber);
        subscriber
    }

    /// Remove the first subscription of `subscriber` to a topic.
    ///
    /// Returns `false` when nothing matched.
    pub fn unsubscribe(&self, topic: &str, subscriber: &Subscriber) -> bool {
        self.inner
            .listeners
            .borrow_mut()
            .unsubscribe(topic, subscriber)
    }

    /// Deliver `payload` to every subscriber of `topic`, in subscription
    /// order.
    ///
    /// Delivery goes to the subscribers present when the call starts;
    /// changes made by subscribers during delivery apply from the next
    /// publish on.
    ///
    /// # Errors
    /// The first subscriber error stops delivery and is returned unchanged;
    /// later subscribers are not called.
    pub fn publish(&self, topic: &str, payload: &Value) -> Result<()> {
        let subscribers = self.inner.listeners.borrow().subscribers(topic);
        tracing::trace!(topic = %topic, subscribers = subscribers.len(), "Publishing");

        for subscriber in &subscribers {
            if let Err(err) = subscriber.call(payload) {
                tracing::warn!(topic = %topic, error = %err, "Subscriber failed, stopping delivery");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Publish a topic without data (subscribers receive `null`).
    ///
    /// # Errors
    /// See [`Farbs::publish`].
    pub fn publish_empty(&self, topic: &str) -> Result<()> {
        self.publish(topic, &Value::Null)
    }

    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.inner.listeners.borrow().count(topic)
    }

    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        self.inner.listeners.borrow().topics()
    }

    // --- scanning ---

    /// Instantiate components for every marked element below `root`.
    ///
    /// # Errors
    /// Returns `Construct` for the first failing constructor.
    pub fn parse(&self, root: &NodeRef) -> Result<ScanReport> {
        self.inner.engine.scan(root, self)
    }

    /// Scan a whole document, starting at its document element.
    ///
    /// # Errors
    /// See [`Farbs::parse`].
    pub fn parse_document(&self, document: &Document) -> Result<ScanReport> {
        self.parse(&document.root_element())
    }

    /// Empty every registry and the listener table.
    pub fn reset(&self) {
        self.inner.classes.borrow_mut().clear();
        self.inner.instances.borrow_mut().clear();
        self.inner.methods.borrow_mut().clear();
        self.inner.listeners.borrow_mut().clear();
    }
}

impl fmt::Debug for Farbs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Farbs")
            .field("config", self.config())
            .field("classes", &self.class_ids())
            .field("instances", &self.instance_ids())
            .field("topics", &self.topics())
            .finish()
    }
}
