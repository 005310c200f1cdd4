//! Configuration constants and scan settings.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{FarbsError, Result};

/// Default attribute namespace.
///
/// Marker and property attributes are spelled `data-<namespace>_<name>`.
pub const DEFAULT_NAMESPACE: &str = "farbs";

/// Attribute name suffix that marks a node as instantiable.
pub const TYPE_SUFFIX: &str = "type";

/// Attribute holding the node identifier.
pub const ID_ATTRIBUTE: &str = "id";

/// Prefix of identifiers generated for nodes without one.
pub const GENERATED_ID_PREFIX: &str = "_farbs_widget_";

/// Topic the example checkbox publishes on.
pub const CHECKBOX_CHANGE_TOPIC: &str = "/Checkbox/change";

/// Namespace pattern: a letter followed by letters, digits or dashes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NAMESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("valid regex"));

/// Validate an attribute namespace.
///
/// # Examples
/// ```
/// use farbs::config::validate_namespace;
///
/// assert!(validate_namespace("farbs").is_ok());
/// assert!(validate_namespace("my-app").is_ok());
/// assert!(validate_namespace("").is_err());
/// assert!(validate_namespace("no_underscores").is_err());
/// ```
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if NAMESPACE_PATTERN.is_match(namespace) {
        Ok(())
    } else {
        Err(FarbsError::InvalidNamespace(namespace.to_string()))
    }
}

/// What the scanner does when a marked node names a class that was never
/// registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnresolvedClassPolicy {
    /// Stop the whole pass at the first unresolved node. Nodes already
    /// instantiated stay registered, later nodes are not visited.
    #[default]
    Abort,
    /// Skip only the unresolved node and keep scanning.
    Skip,
}

/// Settings for a scan pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    namespace: String,
    policy: UnresolvedClassPolicy,
}

impl ScanConfig {
    /// Create a config for a custom namespace.
    ///
    /// # Errors
    /// Returns `InvalidNamespace` if the namespace is empty or contains
    /// characters that cannot appear before the `_` separator.
    pub fn new(namespace: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        validate_namespace(&namespace)?;
        Ok(Self {
            namespace,
            policy: UnresolvedClassPolicy::default(),
        })
    }

    /// Set the unresolved class policy.
    #[must_use]
    pub fn with_policy(mut self, policy: UnresolvedClassPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The attribute namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The unresolved class policy.
    #[must_use]
    pub fn policy(&self) -> UnresolvedClassPolicy {
        self.policy
    }

    /// Prefix shared by every attribute in the namespace, e.g. `data-farbs_`.
    #[must_use]
    pub fn attribute_prefix(&self) -> String {
        format!("data-{}_", self.namespace)
    }

    /// Name of the marker attribute, e.g. `data-farbs_type`.
    #[must_use]
    pub fn type_attribute(&self) -> String {
        format!("{}{TYPE_SUFFIX}", self.attribute_prefix())
    }

    /// Property name carried by a namespace attribute.
    ///
    /// Returns `None` for attributes outside the namespace and for the
    /// marker attribute itself.
    ///
    /// # Examples
    /// ```
    /// use farbs::config::ScanConfig;
    ///
    /// let config = ScanConfig::default();
    /// assert_eq!(config.property_name("data-farbs_onchange"), Some("onchange"));
    /// assert_eq!(config.property_name("data-farbs_type"), None);
    /// assert_eq!(config.property_name("data-other"), None);
    /// ```
    #[must_use]
    pub fn property_name<'a>(&self, attribute: &'a str) -> Option<&'a str> {
        attribute
            .strip_prefix("data-")
            .and_then(|rest| rest.strip_prefix(self.namespace.as_str()))
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|name| *name != TYPE_SUFFIX)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            policy: UnresolvedClassPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_namespace_valid() {
        assert!(validate_namespace("farbs").is_ok());
        assert!(validate_namespace("x").is_ok());
        assert!(validate_namespace("ui-kit2").is_ok());
    }

    #[test]
    fn test_validate_namespace_invalid() {
        assert!(validate_namespace("").is_err());
        assert!(validate_namespace("2fast").is_err());
        assert!(validate_namespace("with space").is_err());
        assert!(validate_namespace("snake_case").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.namespace(), "farbs");
        assert_eq!(config.policy(), UnresolvedClassPolicy::Abort);
        assert_eq!(config.type_attribute(), "data-farbs_type");
        assert_eq!(config.attribute_prefix(), "data-farbs_");
    }

    #[test]
    fn test_custom_namespace() {
        let config = ScanConfig::new("widgets")
            .unwrap()
            .with_policy(UnresolvedClassPolicy::Skip);
        assert_eq!(config.type_attribute(), "data-widgets_type");
        assert_eq!(config.policy(), UnresolvedClassPolicy::Skip);
        assert_eq!(config.property_name("data-widgets_label"), Some("label"));
        assert_eq!(config.property_name("data-farbs_label"), None);
    }

    #[test]
    fn test_property_name_requires_separator() {
        let config = ScanConfig::default();
        assert_eq!(config.property_name("data-farbsfoo"), None);
        assert_eq!(config.property_name("data-farbs"), None);
        assert_eq!(config.property_name("farbs_foo"), None);
        assert_eq!(config.property_name("data-farbs_"), Some(""));
    }
}
