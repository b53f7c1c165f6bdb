use crate::core::SegmentKind;
use crate::shared::GeometryOptions;
use glam::DVec2;
use std::path::PathBuf;

/// Path-Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
///
/// Alle Positionen sind bereits in Feld-Einheiten umgerechnet.
#[derive(Debug, Clone)]
pub enum PathIntent {
    /// Neuen Pfad mit einem Start-Node anlegen
    NewPathRequested { start: DVec2 },
    /// Pfad-Dokument öffnen
    OpenRequested { path: PathBuf },
    /// Unter dem aktuellen Pfad speichern
    SaveRequested,
    /// Unter neuem Pfad speichern
    SaveAsRequested { path: PathBuf },
    /// Node am Ende der Kette anhängen
    AppendNodeRequested { field_pos: DVec2, kind: SegmentKind },
    /// Node in das Segment unter dem Cursor einfügen
    InsertNodeRequested { field_pos: DVec2 },
    /// Node unter dem Cursor entfernen
    RemoveNodeRequested { field_pos: DVec2 },
    /// Selektierten Node entfernen
    RemoveSelectedRequested,
    /// Node per Klick selektieren
    NodePickRequested { field_pos: DVec2 },
    /// Art des Segments unter dem Cursor wechseln
    SegmentKindRequested { field_pos: DVec2, kind: SegmentKind },
    /// Fahrtrichtung des Segments unter dem Cursor umschalten
    SegmentDirectionToggled { field_pos: DVec2 },
    /// Maustaste gedrückt (Drag-Beginn)
    DragStarted { field_pos: DVec2 },
    /// Maus bewegt während eines Drags
    DragMoved { field_pos: DVec2 },
    /// Maustaste losgelassen
    DragEnded,
    /// Optionen aus dem Options-Dialog übernehmen
    OptionsChanged { options: GeometryOptions },
    /// Optionen auf Standardwerte zurücksetzen
    OptionsResetRequested,
}
