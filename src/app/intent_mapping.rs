//! Mapping von UI-Intents auf mutierende Path-Commands.

use super::drag::{pick_drag_target, DragTarget};
use super::{EditorState, PathCommand, PathIntent};
use crate::core::SegmentDirection;

/// Übersetzt einen `PathIntent` in eine Sequenz ausführbarer `PathCommand`s.
///
/// Treffer-Tests gegen den Pfad passieren hier; liegt nichts unter dem
/// Cursor, entsteht kein Command.
pub fn map_intent_to_commands(state: &EditorState, intent: PathIntent) -> Vec<PathCommand> {
    match intent {
        PathIntent::NewPathRequested { start } => vec![PathCommand::NewPath { start }],
        PathIntent::OpenRequested { path } => vec![PathCommand::LoadPath { path }],
        PathIntent::SaveRequested => vec![PathCommand::SavePath { path: None }],
        PathIntent::SaveAsRequested { path } => vec![PathCommand::SavePath { path: Some(path) }],
        PathIntent::AppendNodeRequested { field_pos, kind } => {
            if state.path.is_some() {
                vec![PathCommand::AppendNode {
                    position: field_pos,
                    kind,
                }]
            } else {
                vec![PathCommand::NewPath { start: field_pos }]
            }
        }
        PathIntent::InsertNodeRequested { field_pos } => state
            .path
            .as_ref()
            .and_then(|p| p.segment_at(field_pos))
            .map(|segment| PathCommand::InsertNode {
                segment,
                position: field_pos,
            })
            .into_iter()
            .collect(),
        PathIntent::RemoveNodeRequested { field_pos } => state
            .path
            .as_ref()
            .and_then(|p| p.nearest_node(field_pos, state.options.node_pick_radius))
            .map(|node| PathCommand::RemoveNode { node })
            .into_iter()
            .collect(),
        PathIntent::RemoveSelectedRequested => state
            .selected_node
            .map(|node| PathCommand::RemoveNode { node })
            .into_iter()
            .collect(),
        PathIntent::NodePickRequested { field_pos } => {
            let node = state
                .path
                .as_ref()
                .and_then(|p| p.nearest_node(field_pos, state.options.node_pick_radius));
            vec![PathCommand::SelectNode { node }]
        }
        PathIntent::SegmentKindRequested { field_pos, kind } => state
            .path
            .as_ref()
            .and_then(|p| p.segment_at(field_pos))
            .map(|segment| PathCommand::SetSegmentKind { segment, kind })
            .into_iter()
            .collect(),
        PathIntent::SegmentDirectionToggled { field_pos } => {
            let Some(path) = state.path.as_ref() else {
                return Vec::new();
            };
            let Some(segment) = path.segment_at(field_pos).and_then(|id| path.segment(id)) else {
                return Vec::new();
            };
            let direction = match segment.direction() {
                SegmentDirection::Forward => SegmentDirection::Reverse,
                SegmentDirection::Reverse => SegmentDirection::Forward,
            };
            vec![PathCommand::SetSegmentDirection {
                segment: segment.id(),
                direction,
            }]
        }
        PathIntent::DragStarted { field_pos } => {
            let Some(target) = state
                .path
                .as_ref()
                .and_then(|p| pick_drag_target(p, field_pos, &state.options))
            else {
                return Vec::new();
            };
            let mut commands = Vec::with_capacity(2);
            if let DragTarget::Node(node) = target {
                commands.push(PathCommand::SelectNode { node: Some(node) });
            }
            commands.push(PathCommand::BeginDrag { target, field_pos });
            commands
        }
        PathIntent::DragMoved { field_pos } => {
            if state.drag.is_some() {
                vec![PathCommand::UpdateDrag { field_pos }]
            } else {
                Vec::new()
            }
        }
        PathIntent::DragEnded => {
            if state.drag.is_some() {
                vec![PathCommand::EndDrag]
            } else {
                Vec::new()
            }
        }
        PathIntent::OptionsChanged { options } => vec![PathCommand::ApplyOptions { options }],
        PathIntent::OptionsResetRequested => vec![PathCommand::ResetOptions],
    }
}

#[cfg(test)]
mod tests;
