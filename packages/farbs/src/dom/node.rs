//! Shared, mutable node handles.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::ID_ATTRIBUTE;

/// A single `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

enum NodeData {
    Element {
        name: String,
        attributes: RefCell<Vec<Attribute>>,
    },
    Text(RefCell<String>),
}

struct Node {
    data: NodeData,
    parent: RefCell<Weak<Node>>,
    children: RefCell<Vec<NodeRef>>,
}

/// Handle to a node in a document tree.
///
/// Cloning a handle is cheap and yields another handle to the same node;
/// mutations through one handle are visible through every other.
#[derive(Clone)]
pub struct NodeRef(Rc<Node>);

impl NodeRef {
    /// Create a detached element.
    #[must_use]
    pub fn new_element(name: impl Into<String>) -> Self {
        Self::from_data(NodeData::Element {
            name: name.into(),
            attributes: RefCell::new(Vec::new()),
        })
    }

    /// Create a detached text node.
    #[must_use]
    pub fn new_text(text: impl Into<String>) -> Self {
        Self::from_data(NodeData::Text(RefCell::new(text.into())))
    }

    fn from_data(data: NodeData) -> Self {
        Self(Rc::new(Node {
            data,
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        }))
    }

    /// Whether both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self.0.data, NodeData::Element { .. })
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.0.data, NodeData::Text(_))
    }

    /// Tag name of an element, `None` for text nodes.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match &self.0.data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            NodeData::Text(_) => None,
        }
    }

    /// Value of the named attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        match &self.0.data {
            NodeData::Element { attributes, .. } => attributes
                .borrow()
                .iter()
                .find(|attr| attr.name == name)
                .map(|attr| attr.value.clone()),
            NodeData::Text(_) => None,
        }
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        match &self.0.data {
            NodeData::Element { attributes, .. } => {
                attributes.borrow().iter().any(|attr| attr.name == name)
            }
            NodeData::Text(_) => false,
        }
    }

    /// Set an attribute, replacing an existing value in place.
    ///
    /// Text nodes carry no attributes; the call is ignored for them.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        let NodeData::Element { attributes, .. } = &self.0.data else {
            return;
        };
        let name = name.into();
        let value = value.into();
        let mut attributes = attributes.borrow_mut();
        match attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => attributes.push(Attribute { name, value }),
        }
    }

    /// Remove an attribute, returning its old value.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        let NodeData::Element { attributes, .. } = &self.0.data else {
            return None;
        };
        let mut attributes = attributes.borrow_mut();
        let index = attributes.iter().position(|attr| attr.name == name)?;
        Some(attributes.remove(index).value)
    }

    /// All attributes in source order.
    #[must_use]
    pub fn attributes(&self) -> Vec<Attribute> {
        match &self.0.data {
            NodeData::Element { attributes, .. } => attributes.borrow().clone(),
            NodeData::Text(_) => Vec::new(),
        }
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.attribute(ID_ATTRIBUTE)
    }

    pub fn set_id(&self, id: impl Into<String>) {
        self.set_attribute(ID_ATTRIBUTE, id);
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeRef> {
        self.0.parent.borrow().upgrade().map(NodeRef)
    }

    /// Direct children, text nodes included.
    #[must_use]
    pub fn children(&self) -> Vec<NodeRef> {
        self.0.children.borrow().clone()
    }

    /// Direct element children.
    #[must_use]
    pub fn element_children(&self) -> Vec<NodeRef> {
        self.0
            .children
            .borrow()
            .iter()
            .filter(|child| child.is_element())
            .cloned()
            .collect()
    }

    /// All nodes below this one in document order, excluding this node.
    #[must_use]
    pub fn descendants(&self) -> Vec<NodeRef> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeRef> = self.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }
        out
    }

    /// Descendant elements carrying the named attribute, in document order.
    ///
    /// Like a `[name]` selector query, the node itself is not a candidate.
    #[must_use]
    pub fn select_with_attribute(&self, name: &str) -> Vec<NodeRef> {
        self.descendants()
            .into_iter()
            .filter(|node| node.has_attribute(name))
            .collect()
    }

    /// First element, this node included, whose id equals `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeRef> {
        std::iter::once(self.clone())
            .chain(self.descendants())
            .find(|node| node.id().as_deref() == Some(id))
    }

    /// Concatenated text of this node and everything below it.
    #[must_use]
    pub fn text_content(&self) -> String {
        if let NodeData::Text(text) = &self.0.data {
            return text.borrow().clone();
        }
        self.descendants()
            .iter()
            .filter_map(|node| match &node.0.data {
                NodeData::Text(text) => Some(text.borrow().clone()),
                NodeData::Element { .. } => None,
            })
            .collect()
    }

    /// Append `child` as the last child, detaching it from any previous parent.
    pub fn append_child(&self, child: &NodeRef) {
        child.detach();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    /// Create an element, append it and return it.
    pub fn append_element(&self, name: impl Into<String>) -> NodeRef {
        let element = NodeRef::new_element(name);
        self.append_child(&element);
        element
    }

    /// Create a text node, append it and return it.
    pub fn append_text(&self, text: impl Into<String>) -> NodeRef {
        let node = NodeRef::new_text(text);
        self.append_child(&node);
        node
    }

    /// Remove this node from its parent.
    pub fn detach(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent
            .0
            .children
            .borrow_mut()
            .retain(|sibling| !sibling.ptr_eq(self));
        *self.0.parent.borrow_mut() = Weak::new();
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.data {
            NodeData::Element { name, attributes } => f
                .debug_struct("Element")
                .field("name", name)
                .field("attributes", &attributes.borrow())
                .field("children", &self.0.children.borrow().len())
                .finish(),
            NodeData::Text(text) => f.debug_tuple("Text").field(&text.borrow()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> NodeRef {
        // <root><a><b/></a>text<c/></root>
        let root = NodeRef::new_element("root");
        let a = root.append_element("a");
        a.append_element("b");
        root.append_text("text");
        root.append_element("c");
        root
    }

    fn names(nodes: &[NodeRef]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| n.tag_name().unwrap_or("#text").to_string())
            .collect()
    }

    #[test]
    fn test_descendants_document_order() {
        let root = tree();
        assert_eq!(names(&root.descendants()), ["a", "b", "#text", "c"]);
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let node = NodeRef::new_element("div");
        node.set_attribute("x", "1");
        node.set_attribute("y", "2");
        node.set_attribute("x", "3");

        let attrs = node.attributes();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].name, "x");
        assert_eq!(attrs[0].value, "3");
    }

    #[test]
    fn test_text_node_ignores_attributes() {
        let text = NodeRef::new_text("hi");
        text.set_attribute("id", "nope");
        assert!(text.id().is_none());
        assert!(text.attributes().is_empty());
    }

    #[test]
    fn test_select_with_attribute_excludes_self() {
        let root = tree();
        root.set_attribute("mark", "");
        let c = root.element_children()[1].clone();
        c.set_attribute("mark", "");

        let hits = root.select_with_attribute("mark");
        assert_eq!(hits.len(), 1);
        assert!(hits[0].ptr_eq(&c));
    }

    #[test]
    fn test_find_by_id() {
        let root = tree();
        let b = root.element_children()[0].element_children()[0].clone();
        b.set_id("bee");

        assert!(root.find_by_id("bee").is_some_and(|n| n.ptr_eq(&b)));
        assert!(root.find_by_id("missing").is_none());
    }

    #[test]
    fn test_append_child_moves_node() {
        let root = tree();
        let a = root.element_children()[0].clone();
        let c = root.element_children()[1].clone();

        a.append_child(&c);

        assert_eq!(root.element_children().len(), 1);
        assert!(c.parent().is_some_and(|p| p.ptr_eq(&a)));
    }

    #[test]
    fn test_text_content() {
        let root = NodeRef::new_element("p");
        root.append_text("Hello ");
        root.append_element("b").append_text("world");
        assert_eq!(root.text_content(), "Hello world");
    }

    #[test]
    fn test_remove_attribute() {
        let node = NodeRef::new_element("input");
        node.set_attribute("checked", "checked");
        assert_eq!(node.remove_attribute("checked"), Some("checked".to_string()));
        assert!(!node.has_attribute("checked"));
        assert_eq!(node.remove_attribute("checked"), None);
    }
}
