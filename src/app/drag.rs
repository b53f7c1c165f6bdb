//! Drag-Sessions: Node verschieben, Bézier-Anfasser ziehen, Bogen ausbeulen.
//!
//! Beim Start werden die Constraints der Geste einmalig gesammelt (die
//! Nachbarn bewegen sich während des Drags nicht). Jede Mausbewegung wird
//! über den Solver aufgelöst und sofort ins Pfad-Modell geschrieben.

use super::EditorState;
use crate::core::geometry::{heading, left_normal};
use crate::core::{
    ConstraintSolver, NodeId, PathError, PathModel, SegmentEnd, SegmentId, SegmentShape,
};
use crate::shared::GeometryOptions;
use glam::DVec2;

/// Was gezogen wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// Ein Node
    Node(NodeId),
    /// Ein Bézier-Anfasser
    Handle { segment: SegmentId, end: SegmentEnd },
    /// Der freie Mittelpunkt eines Kreisbogens
    ArcMidpoint(SegmentId),
}

/// Laufender Drag-Vorgang.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Gezogenes Element
    pub target: DragTarget,
    /// Versatz Element − Maus beim Start (verhindert Springen)
    pub grab_offset: DVec2,
    /// Vorheriger Nachbar-Node (nur Node-Drag)
    previous: Option<NodeId>,
}

/// Sucht das Element unter dem Cursor: Node vor Anfasser vor Bogen-Mittelpunkt.
pub fn pick_drag_target(
    path: &PathModel,
    field_pos: DVec2,
    options: &GeometryOptions,
) -> Option<DragTarget> {
    if let Some(node) = path.nearest_node(field_pos, options.node_pick_radius) {
        return Some(DragTarget::Node(node));
    }

    let radius = options.node_pick_radius;
    let mut best: Option<(f64, DragTarget)> = None;
    for id in path.segment_ids() {
        let Some(segment) = path.segment(id) else {
            continue;
        };
        let candidates: Vec<(DVec2, DragTarget)> = match segment.shape() {
            SegmentShape::Bezier(b) => [SegmentEnd::Start, SegmentEnd::End]
                .into_iter()
                .map(|end| (b.control_point(end), DragTarget::Handle { segment: id, end }))
                .collect(),
            SegmentShape::Arc(a) => vec![(a.midpoint(), DragTarget::ArcMidpoint(id))],
            SegmentShape::Straight(_) => Vec::new(),
        };
        for (point, target) in candidates {
            let distance = point.distance(field_pos);
            if distance <= radius && best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, target));
            }
        }
    }
    best.map(|(_, target)| target)
}

/// Position des gezogenen Elements (für den Greif-Versatz).
fn target_position(path: &PathModel, target: DragTarget) -> Result<DVec2, PathError> {
    match target {
        DragTarget::Node(node) => path
            .node(node)
            .map(|n| n.position())
            .ok_or(PathError::UnknownNode(node)),
        DragTarget::Handle { segment, end } => match path.segment(segment).map(|s| s.shape()) {
            Some(SegmentShape::Bezier(b)) => Ok(b.control_point(end)),
            Some(_) => Err(PathError::NotABezier(segment)),
            None => Err(PathError::UnknownSegment(segment)),
        },
        DragTarget::ArcMidpoint(segment) => match path.segment(segment).map(|s| s.shape()) {
            Some(SegmentShape::Arc(a)) => Ok(a.midpoint()),
            Some(_) => Err(PathError::NotAnArc(segment)),
            None => Err(PathError::UnknownSegment(segment)),
        },
    }
}

/// Vorheriger und nächster Nachbar eines Nodes.
fn neighbors(path: &PathModel, node: NodeId) -> (Option<NodeId>, Option<NodeId>) {
    let Some(n) = path.node(node) else {
        return (None, None);
    };
    let previous = n
        .incoming()
        .and_then(|s| path.segment(s))
        .map(|s| s.previous());
    let next = n.outgoing().and_then(|s| path.segment(s)).map(|s| s.next());
    (previous, next)
}

/// Constraints für einen Node-Drag in stabiler Reihenfolge:
/// äußere Tangente des vorherigen Nachbarn, äußere Tangente des nächsten,
/// Achsen durch den vorherigen, Achsen durch den nächsten.
fn collect_node_constraints(
    solver: &mut ConstraintSolver,
    path: &PathModel,
    node: NodeId,
) -> Result<Option<NodeId>, PathError> {
    let (previous, next) = neighbors(path, node);

    if let Some(prev) = previous {
        if let Some(other) = path.node(prev).and_then(|n| n.incoming()) {
            solver.add_segment_constraint(path, other, prev)?;
        }
    }
    if let Some(next) = next {
        if let Some(other) = path.node(next).and_then(|n| n.outgoing()) {
            solver.add_segment_constraint(path, other, next)?;
        }
    }
    for id in [previous, next].into_iter().flatten() {
        if let Some(n) = path.node(id) {
            solver.add_cardinal_constraints(id, n.position());
        }
    }

    if let Some(prev_node) = previous.and_then(|id| path.node(id)) {
        if prev_node.incoming().is_some() {
            solver.add_angle_constraint(prev_node.turn_angles().0);
        }
    }
    solver.add_cardinal_angle_constraints();
    Ok(previous)
}

/// Richtungs-Constraints für einen Anfasser: Tangente des Nachbar-Segments am
/// Anker-Node, danach die Achsen.
fn collect_handle_constraints(
    solver: &mut ConstraintSolver,
    path: &PathModel,
    segment: SegmentId,
    end: SegmentEnd,
) -> Result<(), PathError> {
    let seg = path
        .segment(segment)
        .ok_or(PathError::UnknownSegment(segment))?;
    let anchor = match end {
        SegmentEnd::Start => seg.previous(),
        SegmentEnd::End => seg.next(),
    };
    let anchor_node = path.node(anchor).ok_or(PathError::UnknownNode(anchor))?;
    let neighbor_tangent = match end {
        SegmentEnd::Start => anchor_node
            .incoming()
            .and_then(|s| path.segment(s))
            .map(|s| s.shape().end_theta()),
        SegmentEnd::End => anchor_node
            .outgoing()
            .and_then(|s| path.segment(s))
            .map(|s| s.shape().start_theta()),
    };
    if let Some(theta) = neighbor_tangent {
        solver.add_angle_constraint(theta);
    }
    solver.add_cardinal_angle_constraints();
    Ok(())
}

/// Startet eine Drag-Session.
pub fn begin(state: &mut EditorState, target: DragTarget, field_pos: DVec2) -> anyhow::Result<()> {
    if state.drag.is_some() {
        end(state);
    }
    let path = state
        .path
        .as_mut()
        .ok_or_else(|| anyhow::anyhow!("Kein Pfad geladen"))?;

    let grab_offset = target_position(path, target)? - field_pos;
    state.solver.set_snap_distance(state.options.snap_distance);
    state.solver.reset_constraints(field_pos);

    let previous = match target {
        DragTarget::Node(node) => collect_node_constraints(&mut state.solver, path, node)?,
        DragTarget::Handle { segment, end } => {
            collect_handle_constraints(&mut state.solver, path, segment, end)?;
            None
        }
        DragTarget::ArcMidpoint(_) => None,
    };

    path.begin_interaction();
    state.drag = Some(DragSession {
        target,
        grab_offset,
        previous,
    });
    log::debug!(
        "Drag gestartet: {:?}, {} Constraints",
        target,
        state.solver.constraints().len()
    );
    Ok(())
}

/// Schreibt eine Mausbewegung in den Pfad.
pub fn update(state: &mut EditorState, field_pos: DVec2) -> anyhow::Result<()> {
    let Some(session) = state.drag else {
        return Ok(());
    };
    let path = state
        .path
        .as_mut()
        .ok_or_else(|| anyhow::anyhow!("Kein Pfad geladen"))?;
    let raw = field_pos + session.grab_offset;
    let solver = &mut state.solver;

    match session.target {
        DragTarget::Node(node) => {
            let mut position = solver.constrain_position(raw);
            if !solver.snapped() {
                let anchor = session.previous.and_then(|id| path.node(id)).map(|n| n.position());
                if let Some(anchor) = anchor {
                    let raw_theta = heading(anchor, raw);
                    if let Some(theta) =
                        solver.constrain_angle(raw_theta, state.options.node_angle_tolerance)
                    {
                        position = anchor + DVec2::from_angle(theta) * anchor.distance(raw);
                        solver.mark_snapped(position);
                    }
                }
            }
            path.move_node(node, position)?;
        }
        DragTarget::Handle { segment, end } => {
            let seg = path
                .segment(segment)
                .ok_or(PathError::UnknownSegment(segment))?;
            let anchor_id = match end {
                SegmentEnd::Start => seg.previous(),
                SegmentEnd::End => seg.next(),
            };
            let anchor = path
                .node(anchor_id)
                .map(|n| n.position())
                .ok_or(PathError::UnknownNode(anchor_id))?;

            let mut offset = solver.constrain_position(raw) - anchor;
            if offset.length() > 0.0 {
                let raw_theta = offset.y.atan2(offset.x);
                if let Some(theta) =
                    solver.constrain_angle(raw_theta, state.options.handle_angle_tolerance)
                {
                    offset = DVec2::from_angle(theta) * offset.length();
                    solver.mark_snapped(anchor + offset);
                }
            }
            path.set_bezier_control_offset(segment, end, offset)?;
        }
        DragTarget::ArcMidpoint(segment) => {
            let seg = path
                .segment(segment)
                .ok_or(PathError::UnknownSegment(segment))?;
            let (start, end) = seg.shape().endpoints();
            let chord_mid = (start + end) * 0.5;
            let position = solver.constrain_position(raw);
            let perp_distance = (position - chord_mid).dot(left_normal(heading(start, end)));
            path.set_arc_perp_distance(segment, perp_distance)?;
        }
    }
    Ok(())
}

/// Beendet die Drag-Session: präzise Neuabtastung und Solver-Reset.
pub fn end(state: &mut EditorState) {
    let Some(session) = state.drag.take() else {
        return;
    };
    if let Some(path) = state.path.as_mut() {
        path.end_interaction();
    }
    state.solver.finish();
    log::debug!("Drag beendet: {:?}", session.target);
}
