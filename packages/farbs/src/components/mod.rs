//! Example components.
//!
//! A checkbox that reports changes through the method registry, a checkbox
//! that publishes its changes, and a monitor that listens for them.

mod checkbox;
mod status_monitor;

pub use checkbox::{Checkbox, PublishingCheckbox};
pub use status_monitor::StatusMonitor;

use crate::context::Farbs;

/// Register the example classes on a context.
///
/// Registers `Checkbox`, `PublishingCheckbox` and `StatusMonitor`.
pub fn register_examples(farbs: &Farbs) {
    farbs.register_class("Checkbox", Checkbox::new);
    farbs.register_class("PublishingCheckbox", PublishingCheckbox::new);
    farbs.register_class("StatusMonitor", StatusMonitor::new);
}
