//! Snap-Constraints für einen Drag-Vorgang.
//!
//! Pro Geste werden Kandidaten-Linien (Positions-Snap) und Richtungen
//! (Winkel-Snap) gesammelt. Bei mehreren passenden Kandidaten entscheidet
//! die Reihenfolge des Hinzufügens, nicht die Nähe zum Rohwert.

use super::geometry::{delta_heading, normalize_angle};
use super::line::Line;
use super::path::{NodeId, PathError, PathModel, SegmentId};
use super::segment::SegmentKind;
use crate::shared::options::SNAP_DISTANCE;
use glam::DVec2;
use indexmap::IndexSet;
use std::f64::consts::{FRAC_PI_2, PI};

/// Kandidaten-Linie samt der Nodes, die sie begründen.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub line: Line,
    pub nodes: IndexSet<NodeId>,
}

/// Zustand des Solvers innerhalb einer Geste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverPhase {
    /// Keine Geste aktiv
    #[default]
    Idle,
    /// Constraints werden gesammelt
    Active,
    /// Position wurde aufgelöst
    Resolved,
}

/// Sammelt Constraints und löst Position bzw. Winkel auf.
#[derive(Debug, Clone)]
pub struct ConstraintSolver {
    snap_distance: f64,
    constraints: Vec<Constraint>,
    angle_constraints: Vec<f64>,
    position: Option<DVec2>,
    snapped: bool,
    phase: SolverPhase,
    mouse: Option<DVec2>,
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        Self::new(SNAP_DISTANCE)
    }
}

impl ConstraintSolver {
    /// Erstellt einen Solver mit gegebenem Snap-Abstand (Feld-Einheiten).
    pub fn new(snap_distance: f64) -> Self {
        Self {
            snap_distance,
            constraints: Vec::new(),
            angle_constraints: Vec::new(),
            position: None,
            snapped: false,
            phase: SolverPhase::Idle,
            mouse: None,
        }
    }

    pub fn set_snap_distance(&mut self, snap_distance: f64) {
        self.snap_distance = snap_distance;
    }

    pub fn snap_distance(&self) -> f64 {
        self.snap_distance
    }

    /// Beginnt eine neue Geste: verwirft alle Constraints.
    pub fn reset_constraints(&mut self, mouse: DVec2) {
        self.constraints.clear();
        self.angle_constraints.clear();
        self.position = None;
        self.snapped = false;
        self.mouse = Some(mouse);
        self.phase = SolverPhase::Active;
    }

    /// Hängt eine Kandidaten-Linie an (keine Deduplizierung).
    pub fn add_constraint(&mut self, line: Line, nodes: impl IntoIterator<Item = NodeId>) {
        self.constraints.push(Constraint {
            line,
            nodes: nodes.into_iter().collect(),
        });
    }

    /// Horizontale und vertikale Linie durch einen Node.
    pub fn add_cardinal_constraints(&mut self, node: NodeId, position: DVec2) {
        self.add_constraint(Line::new(position, 0.0), [node]);
        self.add_constraint(Line::new(position, FRAC_PI_2), [node]);
    }

    /// Tangente von `segment` am Node `node`.
    ///
    /// Eine Gerade begründet die Linie mit beiden Endpunkten (Kollinearität),
    /// Bogen und Bézier nur mit dem abgefragten Node.
    pub fn add_segment_constraint(
        &mut self,
        path: &PathModel,
        segment: SegmentId,
        node: NodeId,
    ) -> Result<(), PathError> {
        let seg = path
            .segment(segment)
            .ok_or(PathError::UnknownSegment(segment))?;
        let end = seg
            .end_at(node)
            .ok_or(PathError::NotAdjacent { segment, node })?;
        let position = path
            .node(node)
            .map(|n| n.position())
            .ok_or(PathError::UnknownNode(node))?;
        let line = Line::new(position, seg.shape().theta_at(end));
        if seg.kind() == SegmentKind::Straight {
            self.add_constraint(line, [seg.previous(), seg.next()]);
        } else {
            self.add_constraint(line, [node]);
        }
        Ok(())
    }

    /// Registriert eine Richtung für den Winkel-Snap.
    pub fn add_angle_constraint(&mut self, theta: f64) {
        self.angle_constraints.push(normalize_angle(theta));
    }

    /// Richtungen 0 und π/2 (Gegenrichtungen werden beim Auflösen mitgeprüft).
    pub fn add_cardinal_angle_constraints(&mut self) {
        self.add_angle_constraint(0.0);
        self.add_angle_constraint(FRAC_PI_2);
    }

    /// Löst die Position auf.
    ///
    /// Nur Linien innerhalb des Snap-Abstands zählen. Keine → Rohwert,
    /// eine → Projektion, mehrere → Schnittpunkt der ersten beiden (falls
    /// definiert und nah genug), sonst Projektion auf die erste.
    pub fn constrain_position(&mut self, raw: DVec2) -> DVec2 {
        let mut nearby = self
            .constraints
            .iter()
            .filter(|c| c.line.distance_to(raw) <= self.snap_distance);

        let (position, snapped) = match (nearby.next(), nearby.next()) {
            (None, _) => (raw, false),
            (Some(first), None) => (first.line.closest_point(raw), true),
            (Some(first), Some(second)) => match first.line.intersection(&second.line) {
                Some(p) if p.distance(raw) <= self.snap_distance => (p, true),
                _ => (first.line.closest_point(raw), true),
            },
        };

        if snapped {
            log::debug!("Position {:?} → {:?}", raw, position);
        }
        self.position = Some(position);
        self.snapped = snapped;
        self.mouse = Some(raw);
        self.phase = SolverPhase::Resolved;
        position
    }

    /// Erste registrierte Richtung (oder deren Gegenrichtung) innerhalb
    /// von `tolerance` um `raw`; `None` wenn keine passt.
    pub fn constrain_angle(&self, raw: f64, tolerance: f64) -> Option<f64> {
        self.angle_constraints.iter().find_map(|&theta| {
            [theta, normalize_angle(theta + PI)]
                .into_iter()
                .find(|candidate| delta_heading(raw, *candidate).abs() <= tolerance)
        })
    }

    /// Markiert das Ergebnis als gesnappt (z.B. nach einem Winkel-Snap).
    pub fn mark_snapped(&mut self, position: DVec2) {
        self.position = Some(position);
        self.snapped = true;
        self.phase = SolverPhase::Resolved;
    }

    /// Beendet die Geste.
    pub fn finish(&mut self) {
        self.constraints.clear();
        self.angle_constraints.clear();
        self.position = None;
        self.snapped = false;
        self.mouse = None;
        self.phase = SolverPhase::Idle;
    }

    pub fn snapped(&self) -> bool {
        self.snapped
    }

    /// Zuletzt aufgelöste Position.
    pub fn position(&self) -> Option<DVec2> {
        self.position
    }

    /// Zuletzt übergebene Mausposition.
    pub fn mouse(&self) -> Option<DVec2> {
        self.mouse
    }

    pub fn phase(&self) -> SolverPhase {
        self.phase
    }

    /// Alle Constraints in Reihenfolge des Hinzufügens (für Snap-Hilfslinien).
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn angle_constraints(&self) -> &[f64] {
        &self.angle_constraints
    }
}
