//! Translation entries: the `<trans-unit>` element and its codec.

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    xml::{Element, Node},
};

/// One translation string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Identifier for this string. Often matches the source text, but any
    /// opaque identifier works. Uniqueness across a file is a caller concern.
    pub id: String,

    /// The original text.
    pub source: String,

    /// The translated text.
    pub target: String,

    /// Context notes for translators. `Some("")` means a note element was
    /// present but empty, which is distinct from no note at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub note: Option<String>,

    /// The XML whitespace processing behaviour: `default` or `preserve`.
    pub xml_space: String,
}

impl Entry {
    /// Creates an entry with no note and `default` whitespace handling.
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Entry {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            note: None,
            xml_space: "default".to_string(),
        }
    }

    /// Encodes this entry as a `<trans-unit>` element.
    ///
    /// The `note` child, when present, always comes last.
    pub fn to_xml(&self) -> Element {
        let mut unit = Element::new("trans-unit");
        unit.set_attribute("id", self.id.as_str());
        unit.set_attribute("xml:space", self.xml_space.as_str());

        unit.append_text_element("source", self.source.as_str());
        unit.append_text_element("target", self.target.as_str());

        if let Some(note) = &self.note {
            unit.append_text_element("note", note.as_str());
        }

        unit
    }

    /// Encodes this entry as an XML string.
    pub fn to_text(&self) -> String {
        self.to_xml().to_string()
    }

    /// Decodes the given node into an `Entry`, if possible.
    pub fn from_node(node: Option<&Node>) -> Result<Self, Error> {
        let element = validate_node(node)?;

        let id = element
            .attribute("id")
            .ok_or_else(|| Error::MissingAttribute("id".to_string()))?
            .to_string();
        let source = element
            .find_child("source")
            .ok_or_else(|| Error::MissingElement("source".to_string()))?
            .text();
        let target = element
            .find_child("target")
            .ok_or_else(|| Error::MissingElement("target".to_string()))?
            .text();
        // Presence of the element is authoritative: an empty <note></note>
        // decodes to Some(""), not None.
        let note = element.find_child("note").map(Element::text);
        let xml_space = element
            .attribute("xml:space")
            .unwrap_or("default")
            .to_string();

        Ok(Entry {
            id,
            source,
            target,
            note,
            xml_space,
        })
    }
}

fn validate_node(node: Option<&Node>) -> Result<&Element, Error> {
    let node = node.ok_or_else(|| Error::MissingInput("Entry XML is nil".to_string()))?;
    let element = node
        .as_element()
        .ok_or_else(|| Error::InvalidNodeType(node.kind()))?;
    if element.name != "trans-unit" {
        return Err(Error::WrongRootElement(
            "the root node must be <trans-unit>".to_string(),
        ));
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;
    use crate::xml::Document;
    use indoc::indoc;

    fn root_node(xml: &str) -> Node {
        Node::Element(Document::from_str(xml).unwrap().root().clone())
    }

    #[test]
    fn test_encode_basic_entry() {
        let entry = Entry::new("greeting", "Hello", "Bonjour");
        let expected = indoc! {r#"
            <trans-unit id="greeting" xml:space="default">
              <source>Hello</source>
              <target>Bonjour</target>
            </trans-unit>"#};
        assert_eq!(entry.to_text(), expected);
    }

    #[test]
    fn test_encode_note_comes_last() {
        let mut entry = Entry::new("greeting", "Hello", "Bonjour");
        entry.note = Some("An informal greeting".to_string());
        let children: Vec<_> = entry.to_xml().child_elements().map(|e| e.name.clone()).collect();
        assert_eq!(children, ["source", "target", "note"]);
    }

    #[test]
    fn test_encode_without_note_omits_the_element() {
        let entry = Entry::new("greeting", "Hello", "Bonjour");
        assert!(entry.to_xml().find_child("note").is_none());
    }

    #[test]
    fn test_encode_xml_space_attribute() {
        let mut entry = Entry::new("raw", " padded ", " rembourré ");
        entry.xml_space = "preserve".to_string();
        assert_eq!(entry.to_xml().attribute("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_decode_full_entry() {
        let node = root_node(indoc! {r#"
            <trans-unit id="CFBundleDisplayName" xml:space="preserve">
              <source>Woo</source>
              <target>Woof</target>
              <note>Bundle display name</note>
            </trans-unit>
        "#});
        let entry = Entry::from_node(Some(&node)).unwrap();
        assert_eq!(entry.id, "CFBundleDisplayName");
        assert_eq!(entry.source, "Woo");
        assert_eq!(entry.target, "Woof");
        assert_eq!(entry.note.as_deref(), Some("Bundle display name"));
        assert_eq!(entry.xml_space, "preserve");
    }

    #[test]
    fn test_decode_without_note() {
        let node = root_node(
            r#"<trans-unit id="a" xml:space="default"><source>s</source><target>t</target></trans-unit>"#,
        );
        let entry = Entry::from_node(Some(&node)).unwrap();
        assert_eq!(entry.note, None);
    }

    #[test]
    fn test_decode_empty_note_is_present_but_empty() {
        let node = root_node(
            r#"<trans-unit id="a"><source>s</source><target>t</target><note></note></trans-unit>"#,
        );
        let entry = Entry::from_node(Some(&node)).unwrap();
        assert_eq!(entry.note.as_deref(), Some(""));
    }

    #[test]
    fn test_decode_missing_xml_space_defaults() {
        let node = root_node(r#"<trans-unit id="a"><source>s</source><target>t</target></trans-unit>"#);
        let entry = Entry::from_node(Some(&node)).unwrap();
        assert_eq!(entry.xml_space, "default");
    }

    #[test]
    fn test_decode_rejects_nil() {
        let error = Entry::from_node(None).unwrap_err();
        assert_eq!(error.to_string(), "Entry XML is nil");
    }

    #[test]
    fn test_decode_rejects_non_element_nodes() {
        let node = Node::Text("<trans-unit/>".to_string());
        let error = Entry::from_node(Some(&node)).unwrap_err();
        assert_eq!(error.to_string(), "expected an XML element, got text node");
    }

    #[test]
    fn test_decode_rejects_wrong_root_element() {
        let node = root_node("<xml/>");
        let error = Entry::from_node(Some(&node)).unwrap_err();
        assert!(error.to_string().contains("<trans-unit>"));
    }

    #[test]
    fn test_decode_rejects_missing_id() {
        let node = root_node(r#"<trans-unit><source>s</source><target>t</target></trans-unit>"#);
        let error = Entry::from_node(Some(&node)).unwrap_err();
        assert!(matches!(error, Error::MissingAttribute(ref name) if name == "id"));
    }

    #[test]
    fn test_decode_rejects_missing_source_or_target() {
        let node = root_node(r#"<trans-unit id="a"><target>t</target></trans-unit>"#);
        let error = Entry::from_node(Some(&node)).unwrap_err();
        assert!(matches!(error, Error::MissingElement(ref name) if name == "source"));

        let node = root_node(r#"<trans-unit id="a"><source>s</source></trans-unit>"#);
        let error = Entry::from_node(Some(&node)).unwrap_err();
        assert!(matches!(error, Error::MissingElement(ref name) if name == "target"));
    }

    #[test]
    fn test_round_trip_with_note() {
        let mut entry = Entry::new("greeting", "Hello", "Bonjour");
        entry.note = Some("An informal greeting".to_string());
        let node = Node::Element(entry.to_xml());
        assert_eq!(Entry::from_node(Some(&node)).unwrap(), entry);
    }
}
