//! Markup parsing into a [`NodeRef`] tree.

use roxmltree::ParsingOptions;

use super::node::NodeRef;
use crate::error::Result;

/// A parsed document.
#[derive(Debug, Clone)]
pub struct Document {
    root: NodeRef,
}

impl Document {
    /// Parse well-formed XML or XHTML.
    ///
    /// A `<!DOCTYPE>` declaration is accepted. Comments and processing
    /// instructions are dropped; element and text nodes are kept.
    ///
    /// # Errors
    /// Returns `XmlParse` if the markup is not well-formed.
    ///
    /// # Examples
    /// ```
    /// use farbs::dom::Document;
    ///
    /// let doc = Document::parse(r#"<!DOCTYPE html><html><body id="b"/></html>"#).unwrap();
    /// assert_eq!(doc.root_element().tag_name(), Some("html"));
    /// assert!(doc.find_by_id("b").is_some());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options)?;
        Ok(Self {
            root: copy_element(doc.root_element()),
        })
    }

    /// Wrap an existing element as a document.
    #[must_use]
    pub fn from_root(root: NodeRef) -> Self {
        Self { root }
    }

    /// The document element (`<html>` for XHTML input).
    #[must_use]
    pub fn root_element(&self) -> NodeRef {
        self.root.clone()
    }

    /// Find an element anywhere in the document by id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeRef> {
        self.root.find_by_id(id)
    }
}

/// Copy a roxmltree element and its subtree.
///
/// Attribute names lose their namespace prefix, matching how tag names are
/// read.
fn copy_element(source: roxmltree::Node<'_, '_>) -> NodeRef {
    let element = NodeRef::new_element(source.tag_name().name());
    for attr in source.attributes() {
        element.set_attribute(attr.name(), attr.value());
    }

    for child in source.children() {
        if child.is_element() {
            element.append_child(&copy_element(child));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                element.append_text(text);
            }
        }
    }

    element
}
