//! File headers: arbitrary named elements carrying key/value attributes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    xml::{Element, Node},
};

/// One header of a translation file.
///
/// Headers are heterogeneous: each instance names its own wrapping element
/// (e.g. a `<tool>` identification element), with the payload carried entirely
/// in attributes. Attribute order is preserved through encode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// The XML tag name this header is encoded as.
    pub element: String,

    /// Attribute names mapped to values, in insertion order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl Header {
    /// Creates a header with the given element name and no attributes.
    pub fn new(element: impl Into<String>) -> Self {
        Header {
            element: element.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Sets an attribute, coercing the value to its string form.
    ///
    /// Coercion happens here, at construction time, so a numeric build number
    /// is already `"97"` by the time the header is encoded.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl ToString) {
        self.attributes.insert(name.into(), value.to_string());
    }

    /// Encodes this header as its XML element.
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(self.element.as_str());
        for (name, value) in &self.attributes {
            element.set_attribute(name.as_str(), value.as_str());
        }
        element
    }

    /// Encodes this header as an XML string.
    pub fn to_text(&self) -> String {
        self.to_xml().to_string()
    }

    /// Decodes the given node into a `Header`, if possible.
    pub fn from_node(node: Option<&Node>) -> Result<Self, Error> {
        let node = node.ok_or_else(|| Error::MissingInput("Header XML is nil".to_string()))?;
        let element = match node {
            Node::Element(element) => element,
            other => return Err(Error::InvalidNodeType(other.kind())),
        };

        Ok(Header {
            element: element.name.clone(),
            attributes: element
                .attributes()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        })
    }
}
