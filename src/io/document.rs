//! Serialisierbare Beschreibung eines Pfads.

use crate::core::{PathModel, SegmentDirection, SegmentEnd, SegmentKind, SegmentShape};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Ein Pfad als Startpunkt und geordnete Segment-Liste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathDocument {
    /// Position des Start-Nodes
    pub start: DVec2,
    /// Segmente in Ketten-Reihenfolge
    #[serde(default)]
    pub segments: Vec<SegmentEntry>,
}

/// Ein Segment bis zum nächsten Node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentEntry {
    /// Segment-Art
    #[serde(default)]
    pub kind: SegmentKind,
    /// Position des Ziel-Nodes
    pub to: DVec2,
    /// Fahrtrichtung
    #[serde(default)]
    pub direction: SegmentDirection,
    /// Bogen-Versatz (nur `arc`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perp_distance: Option<f64>,
    /// Erster Anfasser-Versatz (nur `bezier`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_offset1: Option<DVec2>,
    /// Zweiter Anfasser-Versatz (nur `bezier`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_offset2: Option<DVec2>,
}

impl PathDocument {
    /// Beschreibt den aktuellen Zustand eines Pfads.
    pub fn from_model(path: &PathModel) -> Self {
        let start = path
            .node(path.start_node())
            .map(|n| n.position())
            .unwrap_or(DVec2::ZERO);

        let segments = path
            .segment_ids()
            .into_iter()
            .filter_map(|id| path.segment(id))
            .filter_map(|segment| {
                let to = path.node(segment.next())?.position();
                let mut entry = SegmentEntry {
                    kind: segment.kind(),
                    to,
                    direction: segment.direction(),
                    perp_distance: None,
                    control_offset1: None,
                    control_offset2: None,
                };
                match segment.shape() {
                    SegmentShape::Straight(_) => {}
                    SegmentShape::Arc(arc) => entry.perp_distance = Some(arc.perp_distance()),
                    SegmentShape::Bezier(bezier) => {
                        entry.control_offset1 = Some(bezier.control_offset(SegmentEnd::Start));
                        entry.control_offset2 = Some(bezier.control_offset(SegmentEnd::End));
                    }
                }
                Some(entry)
            })
            .collect();

        Self { start, segments }
    }
}
