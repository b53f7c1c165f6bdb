//! Minimales Command-Log der ausgeführten Pfad-Commands.

use super::PathCommand;

/// Speichert ausgeführte Commands in Reihenfolge.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<PathCommand>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen ausgeführten Command hinzu.
    /// Begrenzt auf MAX_ENTRIES, ältere Einträge werden verworfen.
    ///
    /// `UpdateDrag` wird pro Mausbewegung erzeugt und nur zusammengefasst
    /// geloggt: ein direkt folgendes `UpdateDrag` ersetzt das vorige.
    pub fn record(&mut self, command: &PathCommand) {
        if matches!(command, PathCommand::UpdateDrag { .. })
            && matches!(self.entries.last(), Some(PathCommand::UpdateDrag { .. }))
        {
            self.entries.pop();
        }
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(command.clone());
    }

    /// Gibt die Anzahl der geloggten Commands zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Commands vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[PathCommand] {
        &self.entries
    }
}
