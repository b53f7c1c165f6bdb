//! Handler für Struktur- und Parameter-Änderungen am Pfad.

use crate::app::EditorState;
use crate::core::{NodeId, PathModel, SegmentDirection, SegmentEnd, SegmentId, SegmentKind};
use glam::DVec2;

/// Ersetzt den Pfad durch einen neuen mit einem Start-Node.
pub fn new_path(state: &mut EditorState, start: DVec2) {
    crate::app::drag::end(state);
    let path = PathModel::new(start, state.options.clone());
    state.selected_node = Some(path.start_node());
    state.path = Some(path);
    state.current_file_path = None;
    log::info!("Neuer Pfad bei {:?}", start);
}

/// Beendet eine laufende Drag-Session vor einer Struktur-Änderung.
fn end_active_drag(state: &mut EditorState) {
    if state.drag.is_some() {
        log::debug!("Struktur-Änderung während Drag, Session wird beendet");
        crate::app::drag::end(state);
    }
}

/// Hängt einen Node ans Ende der Kette an und selektiert ihn.
pub fn append_node(
    state: &mut EditorState,
    position: DVec2,
    kind: SegmentKind,
) -> anyhow::Result<()> {
    end_active_drag(state);
    let (node, _) = state.path_mut()?.append_node(position, kind);
    state.selected_node = Some(node);
    Ok(())
}

/// Teilt ein Segment und selektiert den neuen Node.
pub fn insert_node(
    state: &mut EditorState,
    segment: SegmentId,
    position: DVec2,
) -> anyhow::Result<()> {
    end_active_drag(state);
    let node = state.path_mut()?.insert_node(segment, position)?;
    state.selected_node = Some(node);
    Ok(())
}

/// Entfernt einen Node; eine darauf zeigende Selektion wird aufgehoben.
pub fn remove_node(state: &mut EditorState, node: NodeId) -> anyhow::Result<()> {
    end_active_drag(state);
    state.path_mut()?.remove_node(node)?;
    if state.selected_node == Some(node) {
        state.selected_node = None;
    }
    Ok(())
}

/// Setzt oder löscht die Node-Selektion.
pub fn select_node(state: &mut EditorState, node: Option<NodeId>) {
    state.selected_node = node;
}

/// Wechselt die Segment-Art.
pub fn set_segment_kind(
    state: &mut EditorState,
    segment: SegmentId,
    kind: SegmentKind,
) -> anyhow::Result<()> {
    end_active_drag(state);
    state.path_mut()?.set_segment_shape(segment, kind)?;
    Ok(())
}

/// Setzt die Fahrtrichtung eines Segments.
pub fn set_segment_direction(
    state: &mut EditorState,
    segment: SegmentId,
    direction: SegmentDirection,
) -> anyhow::Result<()> {
    state.path_mut()?.set_segment_direction(segment, direction)?;
    Ok(())
}

/// Setzt den Bogen-Versatz (z.B. aus einem Eingabefeld).
pub fn set_arc_perp_distance(
    state: &mut EditorState,
    segment: SegmentId,
    perp_distance: f64,
) -> anyhow::Result<()> {
    state.path_mut()?.set_arc_perp_distance(segment, perp_distance)?;
    Ok(())
}

/// Setzt einen Bézier-Anfasser (z.B. aus einem Eingabefeld).
pub fn set_bezier_control_offset(
    state: &mut EditorState,
    segment: SegmentId,
    end: SegmentEnd,
    offset: DVec2,
) -> anyhow::Result<()> {
    state
        .path_mut()?
        .set_bezier_control_offset(segment, end, offset)?;
    Ok(())
}
