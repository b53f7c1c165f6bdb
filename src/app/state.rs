//! Zustand des Editors: geladener Pfad, Optionen, Solver und Drag-Session.

use super::drag::DragSession;
use super::CommandLog;
use crate::core::{Constraint, ConstraintSolver, NodeId, PathModel};
use crate::shared::GeometryOptions;
use std::path::PathBuf;

/// Hauptzustand der Anwendung
#[derive(Debug)]
pub struct EditorState {
    /// Aktuell bearbeiteter Pfad (None = noch kein Pfad angelegt/geladen)
    pub path: Option<PathModel>,
    /// Laufzeit-Optionen
    pub options: GeometryOptions,
    /// Snap-Solver der aktuellen Geste
    pub solver: ConstraintSolver,
    /// Laufende Drag-Session
    pub drag: Option<DragSession>,
    /// Selektierter Node
    pub selected_node: Option<NodeId>,
    /// Pfad der zuletzt geladenen/gespeicherten Datei
    pub current_file_path: Option<PathBuf>,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Erstellt einen leeren Zustand mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(GeometryOptions::default())
    }

    /// Erstellt einen leeren Zustand mit den übergebenen Optionen.
    pub fn with_options(options: GeometryOptions) -> Self {
        Self {
            path: None,
            solver: ConstraintSolver::new(options.snap_distance),
            options,
            drag: None,
            selected_node: None,
            current_file_path: None,
            command_log: CommandLog::new(),
        }
    }

    /// Gibt die Anzahl der Nodes zurück (für UI-Anzeige)
    pub fn node_count(&self) -> usize {
        self.path.as_ref().map_or(0, |p| p.node_count())
    }

    /// Gibt die Anzahl der Segmente zurück (für UI-Anzeige)
    pub fn segment_count(&self) -> usize {
        self.path.as_ref().map_or(0, |p| p.segment_count())
    }

    /// Ob die letzte Drag-Position gesnappt wurde (UI-Hervorhebung).
    pub fn snapped(&self) -> bool {
        self.drag.is_some() && self.solver.snapped()
    }

    /// Aktive Constraints für Snap-Hilfslinien (leer ohne Drag).
    pub fn active_constraints(&self) -> &[Constraint] {
        if self.drag.is_some() {
            self.solver.constraints()
        } else {
            &[]
        }
    }

    /// Pfad oder Fehler, wenn keiner geladen ist.
    pub fn path_mut(&mut self) -> anyhow::Result<&mut PathModel> {
        self.path
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("Kein Pfad geladen"))
    }
}
