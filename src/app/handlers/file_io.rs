//! Handler für Datei-Operationen (Laden, Speichern).

use crate::app::EditorState;
use crate::io::{parse_path_document, write_path_document};
use anyhow::Context;
use std::path::PathBuf;

/// Lädt ein Pfad-Dokument und ersetzt den aktuellen Pfad.
pub fn load(state: &mut EditorState, path: PathBuf) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Datei nicht lesbar: {}", path.display()))?;
    let model = parse_path_document(&content, state.options.clone())?;

    crate::app::drag::end(state);
    state.selected_node = None;
    state.path = Some(model);
    state.current_file_path = Some(path);
    Ok(())
}

/// Speichert den Pfad.
///
/// `None` speichert unter dem aktuell bekannten Dateipfad,
/// `Some(p)` explizit unter dem neuen Pfad `p`.
pub fn save(state: &mut EditorState, path: Option<PathBuf>) -> anyhow::Result<()> {
    let target = path
        .or_else(|| state.current_file_path.clone())
        .ok_or_else(|| anyhow::anyhow!("Kein Dateipfad zum Speichern bekannt"))?;
    let model = state
        .path
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Kein Pfad geladen"))?;

    let content = write_path_document(model)?;
    std::fs::write(&target, content)
        .with_context(|| format!("Datei nicht schreibbar: {}", target.display()))?;
    log::info!("Pfad gespeichert nach: {}", target.display());
    state.current_file_path = Some(target);
    Ok(())
}
