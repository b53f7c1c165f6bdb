//! Handler für die Laufzeit-Optionen.

use crate::app::EditorState;
use crate::shared::GeometryOptions;

/// Übernimmt neue Optionen in Zustand, Pfad und Solver.
fn apply(state: &mut EditorState, options: GeometryOptions) {
    state.solver.set_snap_distance(options.snap_distance);
    if let Some(path) = state.path.as_mut() {
        path.set_options(options.clone());
    }
    state.options = options;
}

/// Übernimmt Optionen und speichert sie neben der Binary.
pub fn apply_options(state: &mut EditorState, options: GeometryOptions) -> anyhow::Result<()> {
    apply(state, options);
    state.options.save_to_file(&GeometryOptions::config_path())
}

/// Setzt alle Optionen auf Standardwerte zurück und speichert sie.
pub fn reset_options(state: &mut EditorState) -> anyhow::Result<()> {
    apply(state, GeometryOptions::default());
    state.options.save_to_file(&GeometryOptions::config_path())
}
