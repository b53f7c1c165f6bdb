//! Integrationstests für das Laden und Schreiben von Pfad-Dokumenten.

use robot_path_editor::{
    parse_path_document, write_path_document, AdapterAttribute, GeometryOptions, PathDocument,
    SegmentDirection, SegmentKind, SegmentShape,
};

const SAMPLE: &str = include_str!("fixtures/sample_path.json");

#[test]
fn test_sample_document_builds_full_chain() {
    let path = parse_path_document(SAMPLE, GeometryOptions::default())
        .expect("Beispiel-Dokument sollte ladbar sein");

    assert_eq!(path.node_count(), 4);
    assert_eq!(path.segment_count(), 3);
    assert!(path.chain_is_consistent());

    let kinds: Vec<SegmentKind> = path
        .segment_ids()
        .into_iter()
        .filter_map(|id| path.segment(id).map(|s| s.kind()))
        .collect();
    assert_eq!(
        kinds,
        vec![SegmentKind::Straight, SegmentKind::Arc, SegmentKind::Bezier]
    );
}

#[test]
fn test_sample_document_shape_parameters() {
    let path = parse_path_document(SAMPLE, GeometryOptions::default())
        .expect("Beispiel-Dokument sollte ladbar sein");
    let ids = path.segment_ids();

    let arc = path.segment(ids[1]).expect("Bogen-Segment erwartet");
    let SegmentShape::Arc(shape) = arc.shape() else {
        panic!("Kreisbogen erwartet");
    };
    assert_eq!(shape.perp_distance(), -6.0);
    assert!(!shape.positive());

    let bezier = path.segment(ids[2]).expect("Bézier-Segment erwartet");
    assert_eq!(bezier.direction(), SegmentDirection::Reverse);
    let distance = bezier
        .adapter()
        .raw(AdapterAttribute::Distance)
        .expect("Strecke erwartet");
    assert!(distance < -36.0, "Rückwärts-Strecke erwartet, war {distance}");
}

#[test]
fn test_written_document_reloads_identically() {
    let path = parse_path_document(SAMPLE, GeometryOptions::default())
        .expect("Beispiel-Dokument sollte ladbar sein");

    let written = write_path_document(&path).expect("Schreiben sollte gelingen");
    let reloaded = parse_path_document(&written, GeometryOptions::default())
        .expect("Geschriebenes Dokument sollte ladbar sein");

    assert_eq!(
        PathDocument::from_model(&path),
        PathDocument::from_model(&reloaded)
    );
}

#[test]
fn test_unknown_kind_is_rejected() {
    let json = r#"{ "start": [0, 0], "segments": [ { "kind": "spiral", "to": [1, 0] } ] }"#;

    assert!(parse_path_document(json, GeometryOptions::default()).is_err());
}
