//! Application Controller für zentrale Event-Verarbeitung.

use super::{EditorState, PathCommand, PathIntent};

/// Orchestriert Eingabe-Events und Pfad-Änderungen auf den EditorState.
#[derive(Default)]
pub struct PathController;

impl PathController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut EditorState,
        intent: PathIntent,
    ) -> anyhow::Result<()> {
        let commands = super::intent_mapping::map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    /// Führt mutierende Commands auf dem EditorState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut EditorState,
        command: PathCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Datei-I/O ===
            PathCommand::NewPath { start } => handlers::editing::new_path(state, start),
            PathCommand::LoadPath { path } => handlers::file_io::load(state, path)?,
            PathCommand::SavePath { path } => handlers::file_io::save(state, path)?,

            // === Struktur ===
            PathCommand::AppendNode { position, kind } => {
                handlers::editing::append_node(state, position, kind)?
            }
            PathCommand::InsertNode { segment, position } => {
                handlers::editing::insert_node(state, segment, position)?
            }
            PathCommand::RemoveNode { node } => handlers::editing::remove_node(state, node)?,
            PathCommand::SelectNode { node } => handlers::editing::select_node(state, node),

            // === Segment-Parameter ===
            PathCommand::SetSegmentKind { segment, kind } => {
                handlers::editing::set_segment_kind(state, segment, kind)?
            }
            PathCommand::SetSegmentDirection { segment, direction } => {
                handlers::editing::set_segment_direction(state, segment, direction)?
            }
            PathCommand::SetArcPerpDistance {
                segment,
                perp_distance,
            } => handlers::editing::set_arc_perp_distance(state, segment, perp_distance)?,
            PathCommand::SetBezierControlOffset {
                segment,
                end,
                offset,
            } => handlers::editing::set_bezier_control_offset(state, segment, end, offset)?,

            // === Drag ===
            PathCommand::BeginDrag { target, field_pos } => {
                handlers::drag::begin(state, target, field_pos)?
            }
            PathCommand::UpdateDrag { field_pos } => handlers::drag::update(state, field_pos)?,
            PathCommand::EndDrag => handlers::drag::end(state),

            // === Optionen ===
            PathCommand::ApplyOptions { options } => {
                handlers::options::apply_options(state, options)?
            }
            PathCommand::ResetOptions => handlers::options::reset_options(state)?,
        }

        Ok(())
    }
}

