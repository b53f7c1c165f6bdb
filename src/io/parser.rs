//! Parser für Pfad-Dokumente.

use super::document::PathDocument;
use crate::core::{PathModel, SegmentEnd, SegmentKind};
use crate::shared::GeometryOptions;
use anyhow::{Context, Result};

/// Parst ein JSON-Dokument und baut daraus einen Pfad.
pub fn parse_path_document(json_content: &str, options: GeometryOptions) -> Result<PathModel> {
    let document: PathDocument =
        serde_json::from_str(json_content).context("Pfad-Dokument ist kein gültiges JSON")?;
    build_path(&document, options)
}

/// Baut einen Pfad aus einem bereits deserialisierten Dokument.
pub fn build_path(document: &PathDocument, options: GeometryOptions) -> Result<PathModel> {
    let mut path = PathModel::new(document.start, options);

    for (index, entry) in document.segments.iter().enumerate() {
        let (_, segment) = path.append_node(entry.to, entry.kind);
        path.set_segment_direction(segment, entry.direction)?;

        match entry.kind {
            SegmentKind::Arc => {
                if let Some(perp_distance) = entry.perp_distance {
                    path.set_arc_perp_distance(segment, perp_distance)?;
                }
            }
            SegmentKind::Bezier => {
                if let Some(offset) = entry.control_offset1 {
                    path.set_bezier_control_offset(segment, SegmentEnd::Start, offset)?;
                }
                if let Some(offset) = entry.control_offset2 {
                    path.set_bezier_control_offset(segment, SegmentEnd::End, offset)?;
                }
            }
            SegmentKind::Straight => {}
        }

        let ignored = match entry.kind {
            SegmentKind::Arc => entry.control_offset1.is_some() || entry.control_offset2.is_some(),
            SegmentKind::Bezier => entry.perp_distance.is_some(),
            SegmentKind::Straight => {
                entry.perp_distance.is_some()
                    || entry.control_offset1.is_some()
                    || entry.control_offset2.is_some()
            }
        };
        if ignored {
            log::warn!(
                "Segment {}: Parameter passen nicht zur Art {:?} und werden ignoriert",
                index,
                entry.kind
            );
        }
    }

    log::info!(
        "Pfad geladen: {} Nodes, {} Segmente, Länge {:.3}",
        path.node_count(),
        path.segment_count(),
        path.total_length()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SegmentDirection, SegmentShape};
    use approx::assert_relative_eq;
    use glam::DVec2;

    #[test]
    fn test_parse_minimal_document() {
        let json = r#"{ "start": [0.0, 0.0], "segments": [ { "to": [10.0, 0.0] } ] }"#;
        let path = parse_path_document(json, GeometryOptions::default()).expect("Parse");
        assert_eq!(path.node_count(), 2);
        assert_relative_eq!(path.total_length(), 10.0);
    }

    #[test]
    fn test_parse_all_kinds() {
        let json = r#"{
            "start": [0.0, 0.0],
            "segments": [
                { "kind": "arc", "to": [10.0, 0.0], "perp_distance": 5.0 },
                { "kind": "bezier", "to": [20.0, 10.0], "direction": "reverse",
                  "control_offset1": [3.0, -3.0], "control_offset2": [0.0, -4.0] },
                { "kind": "straight", "to": [20.0, 20.0] }
            ]
        }"#;
        let path = parse_path_document(json, GeometryOptions::default()).expect("Parse");
        let ids = path.segment_ids();
        assert_eq!(ids.len(), 3);

        match path.segment(ids[0]).unwrap().shape() {
            SegmentShape::Arc(arc) => {
                assert_eq!(arc.perp_distance(), 5.0);
                assert!(arc.positive());
            }
            other => panic!("Bogen erwartet, erhalten: {other:?}"),
        }
        let bezier = path.segment(ids[1]).unwrap();
        assert_eq!(bezier.direction(), SegmentDirection::Reverse);
        match bezier.shape() {
            SegmentShape::Bezier(b) => {
                assert_eq!(b.control_point(SegmentEnd::Start), DVec2::new(13.0, -3.0));
                assert_eq!(b.control_point(SegmentEnd::End), DVec2::new(20.0, 6.0));
            }
            other => panic!("Bézier erwartet, erhalten: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(parse_path_document("{ start: }", GeometryOptions::default()).is_err());
        assert!(parse_path_document(r#"{ "segments": [] }"#, GeometryOptions::default()).is_err());
    }
}
