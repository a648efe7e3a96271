#![forbid(unsafe_code)]
//! XLIFF 1.2 codec for Rust.
//!
//! Reads XLIFF documents into a strongly-typed model (`Bundle` → `File` →
//! `Header`/`Entry`) and writes that model back out as XML. Decoding and
//! re-encoding this crate's own output is byte-identical; arbitrary
//! well-formed XLIFF round-trips structurally.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xliffcodec::{Bundle, Parser};
//!
//! let bundle = Bundle::from_path("translations/en-fr.xliff")?;
//! for file in &bundle.files {
//!     for entry in &file.entries {
//!         println!("{} => {}", entry.source, entry.target);
//!     }
//! }
//! bundle.write_to("translations/en-fr-copy.xliff")?;
//! # Ok::<(), xliffcodec::Error>(())
//! ```
//!
//! Or build a document by hand:
//!
//! ```rust
//! use xliffcodec::{Bundle, Entry, File};
//!
//! let mut file = File::new("Localizable.strings", "en", "fr");
//! file.add_entry(Entry::new("greeting", "Hello", "Bonjour"));
//!
//! let mut bundle = Bundle::new();
//! bundle.add_file(file);
//! assert!(bundle.to_text().contains("<trans-unit id=\"greeting\""));
//! ```
//!
//! # Features
//!
//! - 🔄 Structural round-trip between XLIFF 1.2 XML and the typed model
//! - 🦀 Idiomatic, modular, and ergonomic Rust API
//! - 📦 Designed for CLI tools, CI/CD pipelines, and library integration
//! - 📖 Typed decode errors that distinguish absent, mistyped, and misnamed input

pub mod bundle;
pub mod entry;
pub mod error;
pub mod file;
pub mod header;
pub mod traits;
pub mod xml;

// Re-export most used types for easy consumption
pub use crate::{
    bundle::Bundle,
    entry::Entry,
    error::Error,
    file::File,
    header::Header,
    traits::Parser,
    xml::{Document, Element, Node},
};
