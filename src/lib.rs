//! Robot Path Editor Library.
//! Geometrie-Kern, Editor-Zustand und Dokument-I/O als Library exportiert
//! für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod io;
pub mod shared;

pub use app::{DragSession, DragTarget, EditorState, PathCommand, PathController, PathIntent};
pub use core::{
    Adapter, AdapterAttribute, AdapterIcon, ConstraintSolver, Line, NodeId, PathError, PathModel,
    SegmentDirection, SegmentEnd, SegmentId, SegmentKind, SegmentShape, SolverPhase,
};
pub use io::{parse_path_document, write_path_document, PathDocument};
pub use shared::GeometryOptions;
