//! Translatable files: the `<file>` element, its headers, and its body.

use serde::{Deserialize, Serialize};

use crate::{
    entry::Entry,
    error::Error,
    header::Header,
    xml::{Element, Node},
};

const DEFAULT_DATATYPE: &str = "plaintext";

/// One file for translation: metadata plus ordered headers and entries.
///
/// The `original`, `source_language`, and `target_language` fields are opaque
/// identifiers; nothing in this crate interprets them beyond the basename
/// lookup on [`crate::Bundle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// The file's name in the original project.
    pub original: String,

    /// The locale code of the source language.
    pub source_language: String,

    /// The locale code of the translated language. Matches `source_language`
    /// for files that have not been translated yet.
    pub target_language: String,

    /// The kind of data the file holds. Defaults to `plaintext`.
    pub datatype: String,

    /// The file's headers, in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub headers: Vec<Header>,

    /// The file's translation entries, in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl File {
    /// Creates a file with no headers, no entries, and the default datatype.
    pub fn new(
        original: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        File {
            original: original.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            datatype: DEFAULT_DATATYPE.to_string(),
            headers: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Appends a header to the file.
    pub fn add_header(&mut self, header: Header) {
        self.headers.push(header);
    }

    /// Appends a translation entry to the file.
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Encodes this file as a `<file>` element.
    ///
    /// The `<header>` block, when present, precedes the `<body>` block; an
    /// empty collection emits no block at all.
    pub fn to_xml(&self) -> Element {
        let mut file = Element::new("file");
        file.set_attribute("original", self.original.as_str());
        file.set_attribute("source-language", self.source_language.as_str());
        file.set_attribute("target-language", self.target_language.as_str());
        file.set_attribute("datatype", self.datatype.as_str());

        add_header_block(&mut file, &self.headers);
        add_body_block(&mut file, &self.entries);

        file
    }

    /// Encodes this file as an XML string.
    pub fn to_text(&self) -> String {
        self.to_xml().to_string()
    }

    /// Decodes the given node into a `File`, parsing all child headers and
    /// translation entries.
    pub fn from_node(node: Option<&Node>) -> Result<Self, Error> {
        let element = validate_node(node)?;

        let mut file = File {
            original: required_attribute(element, "original")?,
            source_language: required_attribute(element, "source-language")?,
            target_language: required_attribute(element, "target-language")?,
            datatype: element
                .attribute("datatype")
                .unwrap_or(DEFAULT_DATATYPE)
                .to_string(),
            headers: Vec::new(),
            entries: Vec::new(),
        };

        // Both blocks are optional; a file with no <header> or no <body>
        // decodes to empty collections.
        if let Some(header) = element.find_child("header") {
            for node in header.children() {
                if node.as_element().is_some() {
                    file.add_header(Header::from_node(Some(node))?);
                }
            }
        }
        if let Some(body) = element.find_child("body") {
            for node in body.children() {
                if node.as_element().is_some() {
                    file.add_entry(Entry::from_node(Some(node))?);
                }
            }
        }

        Ok(file)
    }
}

fn validate_node(node: Option<&Node>) -> Result<&Element, Error> {
    let node = node.ok_or_else(|| Error::MissingInput("File XML is nil".to_string()))?;
    let element = node
        .as_element()
        .ok_or_else(|| Error::InvalidNodeType(node.kind()))?;
    if element.name != "file" {
        return Err(Error::WrongRootElement(
            "the root node must be <file>".to_string(),
        ));
    }
    Ok(element)
}

fn required_attribute(element: &Element, name: &str) -> Result<String, Error> {
    element
        .attribute(name)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingAttribute(name.to_string()))
}

fn add_header_block(file: &mut Element, headers: &[Header]) {
    if headers.is_empty() {
        return;
    }
    let mut header = Element::new("header");
    for h in headers {
        header.add_element(h.to_xml());
    }
    file.add_element(header);
}

fn add_body_block(file: &mut Element, entries: &[Entry]) {
    if entries.is_empty() {
        return;
    }
    let mut body = Element::new("body");
    for entry in entries {
        body.add_element(entry.to_xml());
    }
    file.add_element(body);
}
