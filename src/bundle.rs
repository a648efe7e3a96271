//! Bundles: a whole XLIFF document holding one or more files for translation.

use std::io::{BufRead, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    file::File,
    traits::Parser,
    xml::{Document, Element},
};

const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:1.2";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XLIFF_VERSION: &str = "1.2";
const XLIFF_SCHEMA_LOCATION: &str = "urn:oasis:names:tc:xliff:document:1.2 http://docs.oasis-open.org/xliff/v1.2/os/xliff-core-1.2-strict.xsd";

/// A collection of files for translation.
///
/// This is the document root of the codec: decoding starts here and fans out
/// to [`File`], and encoding always stamps the root `<xliff>` element with the
/// XLIFF 1.2 namespace set, no matter how the bundle was built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bundle {
    /// The translated files in this bundle, in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub files: Vec<File>,

    /// The path this bundle was read from, when loaded via [`Bundle::from_path`].
    /// Not part of the XML payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub origin: Option<String>,
}

impl Bundle {
    /// Creates an empty bundle, suitable for building an XLIFF file by hand.
    pub fn new() -> Self {
        Bundle::default()
    }

    /// Appends a file to the bundle.
    pub fn add_file(&mut self, file: File) {
        self.files.push(file);
    }

    /// Finds files by name.
    ///
    /// Matches on the final path segment of each file's `original` field, so
    /// `file_named("InfoPlist.strings")` finds a file whose `original` is
    /// `Resources/en.lproj/InfoPlist.strings`. Several files may share a
    /// basename, so the whole set of matches is returned.
    pub fn file_named(&self, name: &str) -> Vec<&File> {
        self.files
            .iter()
            .filter(|file| basename(&file.original) == name)
            .collect()
    }

    /// Encodes this bundle as an XLIFF document.
    pub fn to_document(&self) -> Document {
        let mut root = Element::new("xliff");
        attach_xliff_metadata(&mut root);
        for file in &self.files {
            root.add_element(file.to_xml());
        }
        Document::new(root)
    }

    /// Encodes this bundle as an XLIFF document string.
    pub fn to_text(&self) -> String {
        self.to_document().to_text()
    }

    /// Parses the XLIFF file at the given path and records the path as the
    /// bundle's origin.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut bundle = Self::read_from(path.as_ref())?;
        bundle.origin = Some(path.as_ref().display().to_string());
        Ok(bundle)
    }

    /// Decodes an XML document into a `Bundle`, if possible.
    ///
    /// Root children other than `<file>` are skipped; a decode error in any
    /// file fails the whole bundle.
    pub fn from_document(document: Option<&Document>) -> Result<Self, Error> {
        let document =
            document.ok_or_else(|| Error::MissingInput("Bundle XML is nil".to_string()))?;
        let root = document.root();
        if root.name != "xliff" {
            return Err(Error::WrongRootElement(
                "root node must be <xliff>".to_string(),
            ));
        }

        let mut bundle = Bundle::new();
        for node in root.children() {
            let Some(element) = node.as_element() else {
                continue;
            };
            if element.name == "file" {
                bundle.add_file(File::from_node(Some(node))?);
            }
        }

        Ok(bundle)
    }
}

impl Parser for Bundle {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let document = Document::from_reader(reader)?;
        Bundle::from_document(Some(&document))
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        writer.write_all(self.to_text().as_bytes())?;
        Ok(())
    }
}

/// Stamps the required XLIFF 1.2 metadata onto the root node.
fn attach_xliff_metadata(root: &mut Element) {
    root.set_attribute("xmlns", XLIFF_NAMESPACE);
    root.set_attribute("xmlns:xsi", XSI_NAMESPACE);
    root.set_attribute("version", XLIFF_VERSION);
    root.set_attribute("xsi:schemaLocation", XLIFF_SCHEMA_LOCATION);
}

fn basename(original: &str) -> &str {
    original.rsplit('/').next().unwrap_or(original)
}
