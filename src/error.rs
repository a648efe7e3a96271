//! All error types for the xliffcodec crate.
//!
//! These are returned from all fallible operations (parsing, decoding, file I/O).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The input handed to a decoder was absent.
    ///
    /// Each decoder reports its own message ("Bundle XML is nil",
    /// "File XML is nil", "Entry XML is nil", "Header XML is nil").
    #[error("{0}")]
    MissingInput(String),

    /// A decoder received a node that is not an XML element.
    #[error("expected an XML element, got {0} node")]
    InvalidNodeType(&'static str),

    /// A decoder received an element with the wrong tag name.
    #[error("wrong root element: {0}")]
    WrongRootElement(String),

    /// A required child element was absent during decoding.
    #[error("missing required element <{0}>")]
    MissingElement(String),

    /// A required attribute was absent during decoding.
    #[error("missing required attribute `{0}`")]
    MissingAttribute(String),

    /// The input is not usable XML at the structural level.
    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
