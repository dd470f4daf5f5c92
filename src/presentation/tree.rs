//! The element builder: nested descriptors in, a UI tree out.
//!
//! [`el`] turns a tag name, a property map, and nested children into one
//! [`Node`]. Recognized property keys get special handling (`class`,
//! `style`, and behavior keys following the `on<Event>` naming pattern);
//! everything else, including a recognized key with a mismatched value
//! type, is attached as a literal attribute verbatim. There is no
//! validation layer and no state shared between calls: every call returns
//! a fresh, unattached node. Structural equality is derived so whole trees
//! can be compared.

use std::collections::BTreeMap;

use super::events::Intent;

/// Value side of a property map entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    /// Plain text value.
    Text(String),
    /// Boolean flag attribute.
    Flag(bool),
    /// Style map: terminal style property to value.
    Style(BTreeMap<String, String>),
    /// Behavior to bind under an `on*` key.
    Handler(Intent),
}

impl PropValue {
    /// Literal attribute rendering, used when a value lands outside its
    /// special-cased key.
    fn into_literal(self) -> String {
        match self {
            Self::Text(value) => value,
            Self::Flag(value) => value.to_string(),
            Self::Style(map) => map
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect::<Vec<_>>()
                .join("; "),
            Self::Handler(intent) => format!("{intent:?}"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Intent> for PropValue {
    fn from(value: Intent) -> Self {
        Self::Handler(value)
    }
}

/// Builds one property entry.
pub fn prop(key: &str, value: impl Into<PropValue>) -> (String, PropValue) {
    (key.to_string(), value.into())
}

/// Builds a style-map property value from property/value pairs.
#[must_use]
pub fn style<const N: usize>(pairs: [(&str, &str); N]) -> PropValue {
    PropValue::Style(
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect(),
    )
}

/// One child slot: text, a node, nothing, or a nested list.
///
/// Lists are flattened into the parent's children and absent entries are
/// skipped, so views can map collections and splice optional fragments
/// without special cases.
#[derive(Debug, Clone, PartialEq)]
pub enum Kid {
    /// Nothing; skipped.
    None,
    /// A text child, inserted as a text node.
    Text(String),
    /// An already-built node.
    One(Node),
    /// A nested list of children.
    Many(Vec<Kid>),
}

/// Builds a text child.
pub fn text(value: impl Into<String>) -> Kid {
    Kid::Text(value.into())
}

impl From<Node> for Kid {
    fn from(node: Node) -> Self {
        Self::One(node)
    }
}

impl From<Option<Node>> for Kid {
    fn from(node: Option<Node>) -> Self {
        match node {
            Some(node) => Self::One(node),
            None => Self::None,
        }
    }
}

impl From<Vec<Kid>> for Kid {
    fn from(kids: Vec<Kid>) -> Self {
        Self::Many(kids)
    }
}

/// One node of the UI tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A text node.
    Text(String),
    /// An element node.
    Element(Element),
}

impl Node {
    /// Returns the element, when this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and everything below it.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Element(element) => element.text_content(),
        }
    }

    /// First element in document order carrying the class, including the
    /// root itself.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.as_element()
            .and_then(|element| element.find_by_class(class))
    }
}

/// An element node: tag, attributes, classes, styles, behaviors, children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    handlers: BTreeMap<String, Intent>,
    children: Vec<Node>,
}

impl Element {
    /// Returns the tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns a plain attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns the class list.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// True when the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns one style property value.
    #[must_use]
    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }

    /// Returns the behavior bound under `event` (lowercased event name).
    #[must_use]
    pub fn handler(&self, event: &str) -> Option<Intent> {
        self.handlers.get(event).copied()
    }

    /// Returns the children in document order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Iterates the direct element children.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Iterates this element and every element below it, depth-first in
    /// document order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First descendant (or self) carrying the class.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.descendants().find(|element| element.has_class(class))
    }

    /// Every descendant (or self) with the given tag, in document order.
    #[must_use]
    pub fn elements_by_tag(&self, tag: &str) -> Vec<&Element> {
        self.descendants()
            .filter(|element| element.tag == tag)
            .collect()
    }

    /// Concatenated text of every text node below this element.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(value) => out.push_str(value),
                Node::Element(element) => out.push_str(&element.text_content()),
            }
        }
        out
    }
}

/// Depth-first element iterator.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        for child in element.children.iter().rev() {
            if let Node::Element(e) = child {
                self.stack.push(e);
            }
        }
        Some(element)
    }
}

/// Builds one element node from a tag, a property map, and children.
pub fn el<P, K>(tag: &str, props: P, children: K) -> Node
where
    P: IntoIterator<Item = (String, PropValue)>,
    K: IntoIterator<Item = Kid>,
{
    let mut element = Element {
        tag: tag.to_string(),
        attrs: BTreeMap::new(),
        classes: Vec::new(),
        styles: BTreeMap::new(),
        handlers: BTreeMap::new(),
        children: Vec::new(),
    };

    for (key, value) in props {
        match value {
            PropValue::Text(list) if key == "class" => {
                element
                    .classes
                    .extend(list.split_whitespace().map(str::to_string));
            }
            PropValue::Style(map) if key == "style" => {
                element.styles.extend(map);
            }
            PropValue::Handler(intent) if key.starts_with("on") && key.len() > 2 => {
                element.handlers.insert(key[2..].to_ascii_lowercase(), intent);
            }
            other => {
                element.attrs.insert(key, other.into_literal());
            }
        }
    }

    for kid in children {
        flatten_into(&mut element.children, kid);
    }

    Node::Element(element)
}

fn flatten_into(out: &mut Vec<Node>, kid: Kid) {
    match kid {
        Kid::None => {}
        Kid::Text(value) => out.push(Node::Text(value)),
        Kid::One(node) => out.push(node),
        Kid::Many(kids) => {
            for kid in kids {
                flatten_into(out, kid);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EventId;

    #[test]
    fn test_class_prop_splits_into_class_list() {
        let node = el("li", [prop("class", "party-item selected")], []);

        let element = node.as_element().unwrap();
        assert!(element.has_class("party-item"));
        assert!(element.has_class("selected"));
        assert!(element.attr("class").is_none());
    }

    #[test]
    fn test_style_prop_merges_into_style_map() {
        let node = el(
            "div",
            [prop("style", style([("fg", "red"), ("bold", "true")]))],
            [],
        );

        let element = node.as_element().unwrap();
        assert_eq!(element.style("fg"), Some("red"));
        assert_eq!(element.style("bold"), Some("true"));
    }

    #[test]
    fn test_on_prefixed_handler_binds_lowercased_event() {
        let node = el("li", [prop("onClick", Intent::Select(EventId(3)))], []);

        let element = node.as_element().unwrap();
        assert_eq!(element.handler("click"), Some(Intent::Select(EventId(3))));
        assert!(element.attr("onClick").is_none());
    }

    #[test]
    fn test_plain_attrs_are_set_verbatim() {
        let node = el("input", [prop("name", "date"), prop("required", true)], []);

        let element = node.as_element().unwrap();
        assert_eq!(element.attr("name"), Some("date"));
        assert_eq!(element.attr("required"), Some("true"));
    }

    #[test]
    fn test_malformed_props_become_literal_attributes() {
        // A handler without the on prefix and a style map under the wrong
        // key both degrade to literal attributes.
        let node = el(
            "div",
            [
                prop("click", Intent::SubmitForm),
                prop("theme", style([("fg", "red")])),
            ],
            [],
        );

        let element = node.as_element().unwrap();
        assert!(element.handler("click").is_none());
        assert_eq!(element.attr("click"), Some("SubmitForm"));
        assert_eq!(element.attr("theme"), Some("fg: red"));
    }

    #[test]
    fn test_children_flatten_and_skip_absent() {
        let rows: Vec<Kid> = vec![
            el("li", [], [text("one")]).into(),
            el("li", [], [text("two")]).into(),
        ];
        let node = el(
            "ul",
            [],
            [Kid::from(rows), Kid::None, text("tail"), Kid::from(None)],
        );

        let element = node.as_element().unwrap();
        assert_eq!(element.children().len(), 3);
        assert_eq!(element.elements_by_tag("li").len(), 2);
        assert_eq!(element.text_content(), "onetwotail");
    }

    #[test]
    fn test_string_children_become_text_nodes() {
        let node = el("strong", [], [text("When: ")]);

        let element = node.as_element().unwrap();
        assert_eq!(element.children(), &[Node::Text("When: ".to_string())]);
    }

    #[test]
    fn test_every_call_returns_a_fresh_equal_node() {
        let build = || {
            el(
                "section",
                [prop("class", "party-list")],
                [el("h2", [], [text("Upcoming Parties")]).into()],
            )
        };

        let first = build();
        let second = build();

        // Structurally equal, independently owned.
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_by_class_walks_document_order() {
        let node = el(
            "main",
            [],
            [
                el("section", [prop("class", "party-list")], []).into(),
                el("section", [prop("class", "party-details")], []).into(),
            ],
        );

        let details = node.find_by_class("party-details").unwrap();
        assert_eq!(details.tag(), "section");
        assert!(node.find_by_class("missing").is_none());
    }
}
