use crate::app::drag::DragTarget;
use crate::app::{EditorState, PathCommand, PathIntent};
use crate::core::{NodeId, PathModel, SegmentDirection, SegmentId, SegmentKind};
use glam::DVec2;

use super::map_intent_to_commands;

fn state_with_line() -> EditorState {
    let mut state = EditorState::new();
    let mut path = PathModel::new(DVec2::ZERO, state.options.clone());
    path.append_node(DVec2::new(10.0, 0.0), SegmentKind::Straight);
    state.path = Some(path);
    state
}

#[test]
fn save_requested_maps_to_save_without_path() {
    let state = EditorState::new();

    let commands = map_intent_to_commands(&state, PathIntent::SaveRequested);

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], PathCommand::SavePath { path: None }));
}

#[test]
fn append_without_path_starts_new_path() {
    let state = EditorState::new();

    let commands = map_intent_to_commands(
        &state,
        PathIntent::AppendNodeRequested {
            field_pos: DVec2::new(1.0, 2.0),
            kind: SegmentKind::Arc,
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], PathCommand::NewPath { .. }));
}

#[test]
fn insert_off_path_maps_to_nothing() {
    let state = state_with_line();

    let hit = map_intent_to_commands(
        &state,
        PathIntent::InsertNodeRequested {
            field_pos: DVec2::new(5.0, 0.3),
        },
    );
    let miss = map_intent_to_commands(
        &state,
        PathIntent::InsertNodeRequested {
            field_pos: DVec2::new(5.0, 4.0),
        },
    );

    assert!(matches!(
        hit[0],
        PathCommand::InsertNode {
            segment: SegmentId(1),
            ..
        }
    ));
    assert!(miss.is_empty());
}

#[test]
fn direction_toggle_flips_current_direction() {
    let state = state_with_line();

    let commands = map_intent_to_commands(
        &state,
        PathIntent::SegmentDirectionToggled {
            field_pos: DVec2::new(3.0, 0.0),
        },
    );

    assert!(matches!(
        commands[0],
        PathCommand::SetSegmentDirection {
            direction: SegmentDirection::Reverse,
            ..
        }
    ));
}

#[test]
fn drag_on_node_selects_then_begins_drag() {
    let state = state_with_line();

    let commands = map_intent_to_commands(
        &state,
        PathIntent::DragStarted {
            field_pos: DVec2::new(9.6, 0.2),
        },
    );

    assert_eq!(commands.len(), 2);
    assert!(matches!(
        commands[0],
        PathCommand::SelectNode {
            node: Some(NodeId(2))
        }
    ));
    assert!(matches!(
        commands[1],
        PathCommand::BeginDrag {
            target: DragTarget::Node(NodeId(2)),
            ..
        }
    ));
}

#[test]
fn drag_moves_without_session_are_dropped() {
    let state = state_with_line();

    let commands = map_intent_to_commands(
        &state,
        PathIntent::DragMoved {
            field_pos: DVec2::ONE,
        },
    );

    assert!(commands.is_empty());
}
