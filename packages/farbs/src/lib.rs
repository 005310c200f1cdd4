//! farbs - Framework agnostic registry based skeleton for decoupled UI
//! components.
//!
//! Elements marked with a `data-farbs_type` attribute are instantiated from
//! registered constructors, receive their other `data-farbs_*` attributes as
//! properties and are tracked by element id. Components talk to each other
//! through topic-based publish/subscribe instead of direct references.
//!
//! # Example
//!
//! ```
//! use farbs::dom::Document;
//! use farbs::{Farbs, PropertyBag};
//!
//! let doc = Document::parse(
//!     r#"<html><body><div id="greeting" data-farbs_type="Bag" data-farbs_text="hi"/></body></html>"#,
//! )
//! .unwrap();
//!
//! let farbs = Farbs::new();
//! farbs.register_class("Bag", PropertyBag::new);
//! farbs.parse_document(&doc).unwrap();
//!
//! let instance = farbs.instance("greeting").unwrap();
//! let component = instance.borrow();
//! let bag = component.downcast_ref::<PropertyBag>().unwrap();
//! assert_eq!(bag.get("text"), Some("hi"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespace constants and scan settings
//! - [`error`]: Error types and Result alias
//! - [`dom`]: Document tree parsed from XML/XHTML
//! - [`registry`]: Keyed registries, component traits and the scan engine
//! - [`pubsub`]: Subscribers and the listener table
//! - [`context`]: The [`Farbs`] context tying registries and pub/sub together
//! - [`components`]: Example checkbox and status monitor components
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod components;
pub mod config;
pub mod context;
pub mod dom;
pub mod error;
pub mod pubsub;
pub mod registry;

pub use context::{Farbs, WeakFarbs};
pub use error::{FarbsError, Result};
pub use pubsub::{ListenerTable, Subscriber};
pub use registry::{Component, ComponentFactory, Instance, Properties, PropertyBag, ScanReport};
