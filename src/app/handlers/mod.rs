//! Feature-Handler für PathCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod drag;
pub mod editing;
pub mod file_io;
pub mod options;
