//! Owned document tree the scanner works on.
//!
//! Markup is parsed once with `roxmltree` and copied into shared, mutable
//! [`NodeRef`] handles so that the scanner can assign identifiers and
//! components can keep a handle to their node after the scan.

mod document;
mod node;

pub use document::Document;
pub use node::{Attribute, NodeRef};
