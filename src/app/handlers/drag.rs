//! Handler für Drag-Gesten.

use crate::app::drag::{self, DragTarget};
use crate::app::EditorState;
use glam::DVec2;

/// Startet eine Drag-Session auf dem gepickten Element.
pub fn begin(state: &mut EditorState, target: DragTarget, field_pos: DVec2) -> anyhow::Result<()> {
    drag::begin(state, target, field_pos)
}

/// Verarbeitet eine Mausbewegung.
pub fn update(state: &mut EditorState, field_pos: DVec2) -> anyhow::Result<()> {
    drag::update(state, field_pos)
}

/// Beendet die Drag-Session.
pub fn end(state: &mut EditorState) {
    drag::end(state);
}
