//! JSON Import/Export für Pfad-Dokumente.
//!
//! Ein Dokument beschreibt einen Pfad als Startpunkt plus Liste von Segmenten,
//! jeweils mit Zielpunkt, Art, Fahrtrichtung und optionalen Form-Parametern.

pub mod document;
pub mod parser;
pub mod writer;

pub use document::{PathDocument, SegmentEntry};
pub use parser::parse_path_document;
pub use writer::write_path_document;
