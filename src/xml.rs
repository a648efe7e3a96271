//! The minimal XML tree that the document model encodes onto and decodes from.
//!
//! Parsing is event-based via `quick-xml`; the events are folded into an owned
//! tree of [`Node`] values. Serialization is deterministic: two-space
//! indentation, text-only elements emitted inline, childless elements
//! self-closed. Whitespace-only text between elements is dropped at parse
//! time; all other text content is kept untouched.

use std::fmt;
use std::io::{BufRead, Write};

use indexmap::IndexMap;
use quick_xml::{Reader, escape::escape, events::Event};

use crate::{error::Error, traits::Parser};

/// One node of the XML tree.
///
/// The set of kinds is closed: decoders pattern-match on it and reject the
/// non-element arms with [`Error::InvalidNodeType`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    /// The node kind as it appears in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Element(_) => "element",
            Node::Text(_) => "text",
            Node::Comment(_) => "comment",
        }
    }

    /// Returns the inner element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// An XML element: a tag name, attributes in insertion order, and child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// The tag name, including any namespace prefix (e.g. `xsi:schemaLocation`
    /// stays qualified).
    pub name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, coercing the value to its string form.
    ///
    /// A new attribute is appended; re-setting an existing one keeps its
    /// original position.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl ToString) {
        self.attributes.insert(name.into(), value.to_string());
    }

    /// Looks up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Iterates over attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Appends a child node.
    pub fn add_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Appends a child element.
    pub fn add_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Appends a leaf child element containing only the given text.
    pub fn append_text_element(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let mut element = Element::new(name);
        element.add_child(Node::Text(content.into()));
        self.add_element(element);
    }

    /// All child nodes in document order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Child element nodes only, in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// The first child element with the given tag name, if any.
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|element| element.name == name)
    }

    /// The concatenated text content of this element's direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        indent(f, depth)?;
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }
        if self.children.is_empty() {
            return write!(f, "/>");
        }
        if self.children.iter().all(|node| matches!(node, Node::Text(_))) {
            write!(f, ">")?;
            for node in &self.children {
                if let Node::Text(text) = node {
                    write!(f, "{}", escape(text))?;
                }
            }
            return write!(f, "</{}>", self.name);
        }
        write!(f, ">")?;
        for node in &self.children {
            writeln!(f)?;
            match node {
                Node::Element(element) => element.fmt_at(f, depth + 1)?,
                Node::Text(text) => {
                    indent(f, depth + 1)?;
                    write!(f, "{}", escape(text))?;
                }
                Node::Comment(comment) => {
                    indent(f, depth + 1)?;
                    write!(f, "<!--{}-->", comment)?;
                }
            }
        }
        writeln!(f)?;
        indent(f, depth)?;
        write!(f, "</{}>", self.name)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 0)
    }
}

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("  ")?;
    }
    Ok(())
}

/// A whole XML document: one root element plus the UTF-8 declaration emitted
/// on serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Document { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serializes the document, declaration included, without a trailing
    /// newline.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        write!(f, "{}", self.root)
    }
}

impl Parser for Document {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().expand_empty_elements = true;

        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let mut element = Element::new(String::from_utf8_lossy(e.name().as_ref()));
                    for attr in e.attributes().with_checks(false) {
                        let attr = attr.map_err(|e| Error::Malformed(e.to_string()))?;
                        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                        let value = attr.unescape_value()?.into_owned();
                        element.set_attribute(name, value);
                    }
                    stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(element) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.add_element(element),
                            None if root.is_none() => root = Some(element),
                            None => {
                                return Err(Error::Malformed(
                                    "document has more than one root element".to_string(),
                                ));
                            }
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(Error::XmlParse)?;
                    if !text.trim().is_empty() {
                        if let Some(parent) = stack.last_mut() {
                            parent.add_child(Node::Text(text.into_owned()));
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.add_child(Node::Text(text));
                    }
                }
                Ok(Event::Comment(e)) => {
                    let comment = String::from_utf8_lossy(e.as_ref()).into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.add_child(Node::Comment(comment));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        match root {
            Some(root) => Ok(Document { root }),
            None => Err(Error::Malformed("document has no root element".to_string())),
        }
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        writer.write_all(self.to_string().as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use proptest::prelude::*;

    #[test]
    fn test_parse_basic_document() {
        let xml = indoc! {r#"
            <root>
              <child name="a">text</child>
              <child name="b"/>
            </root>
        "#};
        let document = Document::from_str(xml).unwrap();
        let root = document.root();
        assert_eq!(root.name, "root");
        let children: Vec<_> = root.child_elements().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].attribute("name"), Some("a"));
        assert_eq!(children[0].text(), "text");
        assert_eq!(children[1].attribute("name"), Some("b"));
        assert_eq!(children[1].text(), "");
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let xml = r#"<tool tool-id="com.example" tool-version="1.0" tool-name="Example" build-num="97"/>"#;
        let document = Document::from_str(xml).unwrap();
        let names: Vec<_> = document.root().attributes().map(|(name, _)| name).collect();
        assert_eq!(names, ["tool-id", "tool-version", "tool-name", "build-num"]);
    }

    #[test]
    fn test_set_attribute_coerces_to_string() {
        let mut element = Element::new("tool");
        element.set_attribute("build-num", 97);
        assert_eq!(element.attribute("build-num"), Some("97"));
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        let xml = "<root>\n  <child>  kept  </child>\n</root>";
        let document = Document::from_str(xml).unwrap();
        let root = document.root();
        // Only the element child survives; the indentation text nodes do not.
        assert_eq!(root.children().count(), 1);
        let child = root.find_child("child").unwrap();
        assert_eq!(child.text(), "  kept  ");
    }

    #[test]
    fn test_escaped_content_round_trips() {
        let xml = "<root attr=\"a &amp; b\">1 &lt; 2</root>";
        let document = Document::from_str(xml).unwrap();
        assert_eq!(document.root().attribute("attr"), Some("a & b"));
        assert_eq!(document.root().text(), "1 < 2");
        let reparsed = Document::from_str(&document.to_text()).unwrap();
        assert_eq!(document, reparsed);
    }

    #[test]
    fn test_comments_are_kept() {
        let xml = "<root><!-- marker --><child/></root>";
        let document = Document::from_str(xml).unwrap();
        let kinds: Vec<_> = document.root().children().map(Node::kind).collect();
        assert_eq!(kinds, ["comment", "element"]);
    }

    #[test]
    fn test_display_layout() {
        let mut root = Element::new("root");
        root.set_attribute("version", "1.2");
        let mut child = Element::new("child");
        child.append_text_element("leaf", "text");
        root.add_element(child);
        let expected = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <root version="1.2">
              <child>
                <leaf>text</leaf>
              </child>
            </root>"#};
        assert_eq!(Document::new(root).to_text(), expected);
    }

    #[test]
    fn test_childless_element_self_closes() {
        let element = Element::new("note");
        assert_eq!(element.to_string(), "<note/>");
    }

    #[test]
    fn test_empty_input_has_no_root() {
        let result = Document::from_str("");
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn test_node_kind_names() {
        assert_eq!(Node::Element(Element::new("x")).kind(), "element");
        assert_eq!(Node::Text("x".to_string()).kind(), "text");
        assert_eq!(Node::Comment("x".to_string()).kind(), "comment");
    }

    proptest! {
        #[test]
        fn test_text_and_attributes_survive_round_trip(
            text in "[ -~]{0,40}",
            value in "[ -~]{0,40}",
        ) {
            // Whitespace-only (but non-empty) text is defined to be dropped.
            prop_assume!(text.is_empty() || !text.trim().is_empty());

            let mut root = Element::new("root");
            root.set_attribute("value", value.as_str());
            root.add_child(Node::Text(text.clone()));

            let document = Document::new(root);
            let reparsed = Document::from_str(&document.to_text()).unwrap();
            prop_assert_eq!(reparsed.root().text(), text);
            prop_assert_eq!(reparsed.root().attribute("value"), Some(value.as_str()));
        }
    }
}
