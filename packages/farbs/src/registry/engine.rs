//! Scan engine that instantiates registered classes for marked nodes.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::types::{Properties, ScanReport, ScannedNode};
use crate::config::{ScanConfig, UnresolvedClassPolicy, GENERATED_ID_PREFIX};
use crate::context::Farbs;
use crate::dom::NodeRef;
use crate::error::{FarbsError, Result};

/// Counter behind generated ids. Shared by every context in the process so
/// ids are never handed out twice.
static NEXT_UID: AtomicUsize = AtomicUsize::new(0);

/// Produce the next generated node id (`_farbs_widget_<n>`).
#[must_use]
pub fn next_generated_id() -> String {
    let uid = NEXT_UID.fetch_add(1, Ordering::Relaxed);
    format!("{GENERATED_ID_PREFIX}{uid}")
}

/// Engine that walks a subtree and instantiates components.
///
/// Marked nodes are visited in document order. Each one has its class
/// resolved from the context, gets an id if it has none, is constructed,
/// receives its namespace properties and is registered as an instance.
#[derive(Debug, Clone, Default)]
pub struct ScanEngine {
    config: ScanConfig,
}

impl ScanEngine {
    /// Create a new engine with the given config.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every marked element below `root`.
    ///
    /// The list of marked elements is taken before the first constructor
    /// runs, so constructors that change the tree do not change this pass.
    ///
    /// # Errors
    /// Returns `Construct` for the first constructor that fails. Instances
    /// registered before the failure stay registered.
    pub fn scan(&self, root: &NodeRef, farbs: &Farbs) -> Result<ScanReport> {
        let marker = self.config.type_attribute();
        let hits = root.select_with_attribute(&marker);
        let mut report = ScanReport::default();

        tracing::debug!(marker = %marker, hits = hits.len(), "Scanning subtree");

        for node in hits {
            let class = node.attribute(&marker).unwrap_or_default();

            let Some(ctor) = farbs.class(&class) else {
                report.unresolved.push(class.clone());
                match self.config.policy() {
                    UnresolvedClassPolicy::Abort => {
                        tracing::warn!(class = %class, "No class registered, stopping scan");
                        report.aborted = true;
                        break;
                    }
                    UnresolvedClassPolicy::Skip => {
                        tracing::warn!(class = %class, "No class registered, skipping node");
                        continue;
                    }
                }
            };

            let node_id = match node.id().filter(|id| !id.is_empty()) {
                Some(id) => id,
                None => {
                    let id = next_generated_id();
                    node.set_id(id.as_str());
                    report.generated_ids.push(id.clone());
                    id
                }
            };

            let instance = ctor.construct(&node, farbs).map_err(|err| match err {
                FarbsError::Construct { .. } => err,
                other => FarbsError::construct(&class, &node_id, other.to_string()),
            })?;

            let properties = self.properties(&node);
            instance.borrow_mut().apply_properties(&properties);
            farbs.register_instance(node_id.as_str(), instance);

            tracing::debug!(id = %node_id, class = %class, "Instantiated component");
            report.instantiated.push(ScannedNode {
                id: node_id,
                class,
                properties,
            });
        }

        Ok(report)
    }

    /// Collect the namespace properties of a node.
    ///
    /// Every `data-<namespace>_<name>` attribute except the marker is
    /// included; all other attributes are ignored.
    #[must_use]
    pub fn properties(&self, node: &NodeRef) -> Properties {
        node.attributes()
            .into_iter()
            .filter_map(|attr| {
                self.config
                    .property_name(&attr.name)
                    .map(|name| (name.to_string(), attr.value.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::registry::PropertyBag;

    fn fixture() -> Document {
        Document::parse(
            r#"<html><body>
                <div id="a" data-farbs_type="Bag"/>
                <div id="b" data-farbs_type="Missing"/>
                <div id="c" data-farbs_type="Bag"/>
            </body></html>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let first = next_generated_id();
        let second = next_generated_id();
        assert_ne!(first, second);
        assert!(first.starts_with(GENERATED_ID_PREFIX));
    }

    #[test]
    fn test_scan_aborts_on_unresolved_class() {
        let farbs = Farbs::new();
        farbs.register_class("Bag", PropertyBag::new);
        let engine = ScanEngine::default();

        let report = engine.scan(&fixture().root_element(), &farbs).unwrap();

        assert_eq!(report.ids(), ["a"]);
        assert_eq!(report.unresolved, ["Missing"]);
        assert!(report.aborted);
        assert!(farbs.instance("c").is_none());
    }

    #[test]
    fn test_scan_skips_unresolved_class() {
        let farbs = Farbs::new();
        farbs.register_class("Bag", PropertyBag::new);
        let engine =
            ScanEngine::new(ScanConfig::default().with_policy(UnresolvedClassPolicy::Skip));

        let report = engine.scan(&fixture().root_element(), &farbs).unwrap();

        assert_eq!(report.ids(), ["a", "c"]);
        assert!(!report.aborted);
        assert!(farbs.instance("b").is_none());
    }

    #[test]
    fn test_scan_wraps_constructor_error() {
        let farbs = Farbs::new();
        farbs.register_class("Bag", |_: &NodeRef, _: &Farbs| -> Result<PropertyBag> {
            Err(FarbsError::NodeNotFound("inner".to_string()))
        });

        let err = ScanEngine::default()
            .scan(&fixture().root_element(), &farbs)
            .unwrap_err();

        assert!(matches!(
            err,
            FarbsError::Construct { ref class, ref node_id, .. } if class == "Bag" && node_id == "a"
        ));
    }

    #[test]
    fn test_properties_only_from_namespace() {
        let doc = Document::parse(
            r#"<div data-farbs_type="X" data-farbs_foo="A" data-bar="C" bar="C" data-other_baz="D"/>"#,
        )
        .unwrap();
        let engine = ScanEngine::default();

        let properties = engine.properties(&doc.root_element());

        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get("foo").map(String::as_str), Some("A"));
    }
}
