//! Writer für Pfad-Dokumente.

use super::document::PathDocument;
use crate::core::PathModel;
use anyhow::Result;

/// Serialisiert einen Pfad als formatiertes JSON.
pub fn write_path_document(path: &PathModel) -> Result<String> {
    let document = PathDocument::from_model(path);
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SegmentDirection, SegmentKind};
    use crate::io::parse_path_document;
    use crate::shared::GeometryOptions;
    use glam::DVec2;

    #[test]
    fn test_written_document_rebuilds_same_description() {
        let mut path = PathModel::new(DVec2::new(1.0, 2.0), GeometryOptions::default());
        let (_, arc) = path.append_node(DVec2::new(11.0, 2.0), SegmentKind::Arc);
        path.set_arc_perp_distance(arc, -3.0).unwrap();
        let (_, line) = path.append_node(DVec2::new(11.0, 12.0), SegmentKind::Straight);
        path.set_segment_direction(line, SegmentDirection::Reverse).unwrap();

        let json = write_path_document(&path).expect("Serialisierung");
        assert!(json.contains("\"perp_distance\": -3.0"));
        assert!(!json.contains("control_offset1"));

        let rebuilt = parse_path_document(&json, GeometryOptions::default()).expect("Parse");
        assert_eq!(
            PathDocument::from_model(&rebuilt),
            PathDocument::from_model(&path)
        );
    }
}
