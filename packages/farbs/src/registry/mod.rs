//! Registries and the scan engine.
//!
//! Classes, instances and methods live in plain keyed registries owned by
//! the [`Farbs`](crate::Farbs) context. The scan engine resolves marked nodes
//! against the class registry and fills the instance registry.

mod core;
mod engine;
mod handler;
mod types;

pub use core::Registry;
pub use engine::{next_generated_id, ScanEngine};
pub use handler::{AsAny, Component, ComponentFactory, PropertyBag};
pub use types::{Class, Instance, Method, Properties, ScanReport, ScannedNode};
