use crate::app::drag::DragTarget;
use crate::core::{NodeId, SegmentDirection, SegmentEnd, SegmentId, SegmentKind};
use crate::shared::GeometryOptions;
use glam::DVec2;
use std::path::PathBuf;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum PathCommand {
    /// Pfad durch einen neuen ersetzen
    NewPath { start: DVec2 },
    /// Pfad-Dokument laden
    LoadPath { path: PathBuf },
    /// Pfad speichern (`None` = aktueller Dateipfad)
    SavePath { path: Option<PathBuf> },
    /// Node anhängen
    AppendNode { position: DVec2, kind: SegmentKind },
    /// Segment teilen
    InsertNode { segment: SegmentId, position: DVec2 },
    /// Node entfernen
    RemoveNode { node: NodeId },
    /// Selektion setzen oder aufheben
    SelectNode { node: Option<NodeId> },
    /// Segment-Art wechseln
    SetSegmentKind { segment: SegmentId, kind: SegmentKind },
    /// Fahrtrichtung setzen
    SetSegmentDirection {
        segment: SegmentId,
        direction: SegmentDirection,
    },
    /// Bogen-Versatz setzen
    SetArcPerpDistance { segment: SegmentId, perp_distance: f64 },
    /// Bézier-Anfasser setzen
    SetBezierControlOffset {
        segment: SegmentId,
        end: SegmentEnd,
        offset: DVec2,
    },
    /// Drag-Session starten
    BeginDrag { target: DragTarget, field_pos: DVec2 },
    /// Drag-Session fortschreiben
    UpdateDrag { field_pos: DVec2 },
    /// Drag-Session beenden
    EndDrag,
    /// Optionen übernehmen und speichern
    ApplyOptions { options: GeometryOptions },
    /// Optionen zurücksetzen und speichern
    ResetOptions,
}
