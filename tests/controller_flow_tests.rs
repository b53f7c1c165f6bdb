//! Integrationstests für den Intent/Command-Fluss über den PathController.

use glam::DVec2;
use robot_path_editor::core::SampleQuality;
use robot_path_editor::{
    DragTarget, EditorState, PathCommand, PathController, PathIntent, SegmentDirection,
    SegmentKind,
};

fn state_with_three_nodes(controller: &mut PathController) -> EditorState {
    let mut state = EditorState::new();
    for (x, y) in [(0.0, 0.0), (20.0, 0.0), (20.0, 20.0)] {
        controller
            .handle_intent(
                &mut state,
                PathIntent::AppendNodeRequested {
                    field_pos: DVec2::new(x, y),
                    kind: SegmentKind::Straight,
                },
            )
            .expect("AppendNodeRequested sollte ohne Fehler durchlaufen");
    }
    state
}

#[test]
fn test_first_append_creates_path() {
    let mut controller = PathController::new();
    let state = state_with_three_nodes(&mut controller);

    assert_eq!(state.node_count(), 3);
    assert_eq!(state.segment_count(), 2);
    assert!(matches!(
        state.command_log.entries().first(),
        Some(PathCommand::NewPath { .. })
    ));

    let path = state.path.as_ref().expect("Pfad erwartet");
    assert_eq!(state.selected_node, Some(path.end_node()));
}

#[test]
fn test_insert_and_remove_via_intents() {
    let mut controller = PathController::new();
    let mut state = state_with_three_nodes(&mut controller);

    controller
        .handle_intent(
            &mut state,
            PathIntent::InsertNodeRequested {
                field_pos: DVec2::new(10.0, 0.2),
            },
        )
        .expect("InsertNodeRequested sollte ohne Fehler durchlaufen");
    assert_eq!(state.node_count(), 4);

    let inserted = state.selected_node.expect("Eingefügter Node sollte selektiert sein");
    let position = state
        .path
        .as_ref()
        .and_then(|p| p.node(inserted))
        .map(|n| n.position())
        .expect("Node erwartet");
    assert_eq!(position, DVec2::new(10.0, 0.2));

    controller
        .handle_intent(&mut state, PathIntent::RemoveSelectedRequested)
        .expect("RemoveSelectedRequested sollte ohne Fehler durchlaufen");
    assert_eq!(state.node_count(), 3);
    assert_eq!(state.selected_node, None);
    assert!(state.path.as_ref().is_some_and(|p| p.chain_is_consistent()));
}

#[test]
fn test_kind_and_direction_change_on_segment_under_cursor() {
    let mut controller = PathController::new();
    let mut state = state_with_three_nodes(&mut controller);
    let cursor = DVec2::new(20.2, 10.0);

    controller
        .handle_intent(
            &mut state,
            PathIntent::SegmentKindRequested {
                field_pos: cursor,
                kind: SegmentKind::Bezier,
            },
        )
        .expect("SegmentKindRequested sollte ohne Fehler durchlaufen");
    controller
        .handle_intent(&mut state, PathIntent::SegmentDirectionToggled { field_pos: cursor })
        .expect("SegmentDirectionToggled sollte ohne Fehler durchlaufen");

    let path = state.path.as_ref().expect("Pfad erwartet");
    let second = path
        .segment(path.segment_ids()[1])
        .expect("Segment erwartet");
    assert_eq!(second.kind(), SegmentKind::Bezier);
    assert_eq!(second.direction(), SegmentDirection::Reverse);

    let first = path
        .segment(path.segment_ids()[0])
        .expect("Segment erwartet");
    assert_eq!(first.kind(), SegmentKind::Straight);
}

#[test]
fn test_miss_produces_no_command() {
    let mut controller = PathController::new();
    let mut state = state_with_three_nodes(&mut controller);
    let logged = state.command_log.len();

    controller
        .handle_intent(
            &mut state,
            PathIntent::RemoveNodeRequested {
                field_pos: DVec2::new(-50.0, -50.0),
            },
        )
        .expect("Fehlklick sollte ohne Fehler durchlaufen");

    assert_eq!(state.command_log.len(), logged);
    assert_eq!(state.node_count(), 3);
}

#[test]
fn test_removing_last_node_is_error() {
    let mut controller = PathController::new();
    let mut state = EditorState::new();
    controller
        .handle_intent(
            &mut state,
            PathIntent::NewPathRequested {
                start: DVec2::ZERO,
            },
        )
        .expect("NewPathRequested sollte ohne Fehler durchlaufen");

    let result = controller.handle_intent(
        &mut state,
        PathIntent::RemoveNodeRequested {
            field_pos: DVec2::ZERO,
        },
    );

    assert!(result.is_err());
    assert_eq!(state.node_count(), 1);
}

#[test]
fn test_save_without_known_file_is_error() {
    let mut controller = PathController::new();
    let mut state = state_with_three_nodes(&mut controller);

    let result = controller.handle_intent(&mut state, PathIntent::SaveRequested);

    assert!(result.is_err());
    assert!(matches!(
        state.command_log.entries().last(),
        Some(PathCommand::SavePath { path: None })
    ));
}

#[test]
fn test_save_as_and_reopen() {
    let mut controller = PathController::new();
    let mut state = state_with_three_nodes(&mut controller);
    let file = std::env::temp_dir().join(format!(
        "robot_path_editor_flow_{}.json",
        std::process::id()
    ));

    controller
        .handle_intent(&mut state, PathIntent::SaveAsRequested { path: file.clone() })
        .expect("SaveAsRequested sollte ohne Fehler durchlaufen");
    assert_eq!(state.current_file_path.as_deref(), Some(file.as_path()));

    let mut reopened = EditorState::new();
    controller
        .handle_intent(&mut reopened, PathIntent::OpenRequested { path: file.clone() })
        .expect("OpenRequested sollte ohne Fehler durchlaufen");
    let _ = std::fs::remove_file(&file);

    assert_eq!(reopened.node_count(), 3);
    let original = state.path.as_ref().expect("Pfad erwartet");
    let loaded = reopened.path.as_ref().expect("Pfad erwartet");
    let positions = |p: &robot_path_editor::PathModel| -> Vec<DVec2> {
        p.node_ids()
            .into_iter()
            .filter_map(|id| p.node(id).map(|n| n.position()))
            .collect()
    };
    assert_eq!(positions(original), positions(loaded));
}

#[test]
fn test_removing_dragged_node_ends_drag() {
    let mut controller = PathController::new();
    let mut state = state_with_three_nodes(&mut controller);

    controller
        .handle_intent(
            &mut state,
            PathIntent::DragStarted {
                field_pos: DVec2::new(20.0, 0.0),
            },
        )
        .expect("DragStarted sollte ohne Fehler durchlaufen");
    assert!(matches!(
        state.drag.map(|d| d.target),
        Some(DragTarget::Node(_))
    ));
    assert!(!state.active_constraints().is_empty());

    controller
        .handle_intent(&mut state, PathIntent::RemoveSelectedRequested)
        .expect("RemoveSelectedRequested sollte ohne Fehler durchlaufen");

    assert!(state.drag.is_none());
    assert!(state.active_constraints().is_empty());
    assert_eq!(
        state.path.as_ref().map(|p| p.quality()),
        Some(SampleQuality::Precise)
    );

    controller
        .handle_intent(
            &mut state,
            PathIntent::DragMoved {
                field_pos: DVec2::new(25.0, 3.0),
            },
        )
        .expect("DragMoved nach Entfernen sollte ohne Fehler durchlaufen");
    assert_eq!(state.node_count(), 2);
    assert!(state.path.as_ref().is_some_and(|p| p.chain_is_consistent()));
}

#[test]
fn test_kind_change_during_handle_drag_ends_drag() {
    let mut controller = PathController::new();
    let mut state = state_with_three_nodes(&mut controller);
    let cursor = DVec2::new(20.2, 10.0);
    controller
        .handle_intent(
            &mut state,
            PathIntent::SegmentKindRequested {
                field_pos: cursor,
                kind: SegmentKind::Bezier,
            },
        )
        .expect("SegmentKindRequested sollte ohne Fehler durchlaufen");

    // Standard-Anfasser liegt ein Drittel entlang der Sehne (20,0) → (20,20)
    controller
        .handle_intent(
            &mut state,
            PathIntent::DragStarted {
                field_pos: DVec2::new(20.0, 20.0 / 3.0),
            },
        )
        .expect("DragStarted sollte ohne Fehler durchlaufen");
    assert!(matches!(
        state.drag.map(|d| d.target),
        Some(DragTarget::Handle { .. })
    ));

    controller
        .handle_intent(
            &mut state,
            PathIntent::SegmentKindRequested {
                field_pos: cursor,
                kind: SegmentKind::Straight,
            },
        )
        .expect("SegmentKindRequested sollte ohne Fehler durchlaufen");
    assert!(state.drag.is_none());

    controller
        .handle_intent(
            &mut state,
            PathIntent::DragMoved {
                field_pos: DVec2::new(24.0, 8.0),
            },
        )
        .expect("DragMoved nach Art-Wechsel sollte ohne Fehler durchlaufen");

    let path = state.path.as_ref().expect("Pfad erwartet");
    let second = path
        .segment(path.segment_ids()[1])
        .expect("Segment erwartet");
    assert_eq!(second.kind(), SegmentKind::Straight);
}
