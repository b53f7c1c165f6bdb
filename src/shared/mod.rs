//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die `core`, `app` und die Binary gemeinsam nutzen.

pub mod options;

pub use options::GeometryOptions;
pub use options::{HANDLE_ANGLE_TOLERANCE, NODE_ANGLE_TOLERANCE, SNAP_DISTANCE};
