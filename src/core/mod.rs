//! Geometrie-Kern: Linien, Segment-Formen, Pfad-Modell, Constraint-Solver.
//!
//! Arbeitet ausschließlich in Feld-Einheiten (Zoll); keine Darstellungs-Transformation.

pub mod adapter;
pub mod bezier;
pub mod constraint;
pub mod geometry;
pub mod line;
/// Pfad-Modell
///
/// Nodes und Segmente als Arena mit stabilen IDs:
/// - PathModel: Kette mit Struktur-Änderungen und Neuberechnung
/// - PathNode: Wegpunkt mit Drehwinkeln
/// - PathSegment: Verbindung mit Form und Fahrtrichtung
pub mod path;
pub mod segment;
pub mod spatial;

pub use adapter::{Adapter, AdapterAttribute, AdapterIcon, AdapterValue};
pub use bezier::CubicBezier;
pub use constraint::{Constraint, ConstraintSolver, SolverPhase};
pub use geometry::Circle;
pub use line::Line;
pub use path::{NodeId, PathError, PathModel, PathNode, PathSegment, SegmentId};
pub use segment::{
    ArcShape, BezierShape, SampleQuality, SegmentDirection, SegmentEnd, SegmentKind,
    SegmentShape, StraightShape,
};
pub use spatial::{SpatialIndex, SpatialMatch};
