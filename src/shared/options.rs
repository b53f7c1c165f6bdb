//! Zentrale Konfiguration für den Geometrie-Kern.
//!
//! `GeometryOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Snapping ────────────────────────────────────────────────────────

/// Snap-Abstand (Feld-Einheiten): Constraints weiter entfernt werden ignoriert.
pub const SNAP_DISTANCE: f64 = 2.0;
/// Winkel-Toleranz (Radiant) beim Draggen von Nodes.
pub const NODE_ANGLE_TOLERANCE: f64 = 0.1;
/// Winkel-Toleranz (Radiant) beim Draggen von Bézier-Anfassern.
pub const HANDLE_ANGLE_TOLERANCE: f64 = 0.05;

// ── Treffer-Tests ──────────────────────────────────────────────────

/// Halbe Trefferbreite von Segmenten (Feld-Einheiten).
pub const HIT_THICKNESS: f64 = 1.0;
/// Pick-Radius für Nodes (Feld-Einheiten).
pub const NODE_PICK_RADIUS: f64 = 2.0;

// ── Segment-Geometrie ──────────────────────────────────────────────

/// Minimaler Betrag des Bogen-Versatzes; verhindert kollineare Dreipunkt-Fits.
pub const ARC_MIN_PERP_DISTANCE: f64 = 0.01;
/// Winkeländerungen unterhalb dieser Schwelle gelten als geradeaus (Icon-Wahl).
pub const TURN_STRAIGHT_TOLERANCE: f64 = 1e-3;
/// Anzahl Parameter-Schritte der schnellen Bézier-Abtastung.
pub const BEZIER_FAST_SAMPLES: usize = 24;
/// Anzahl Parameter-Schritte der groben Bézier-Polylinie für Treffer-Tests.
pub const BEZIER_HIT_SAMPLES: usize = 12;
/// Maximaler Bogenlängen-Abstand der präzisen Bézier-Abtastung (Feld-Einheiten).
pub const BEZIER_SAMPLE_SPACING: f64 = 1.0;
/// Toleranz der numerischen Integration und Nullstellensuche.
pub const QUADRATURE_TOLERANCE: f64 = 1e-9;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Geometrie-Optionen.
/// Wird als `robot_path_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometryOptions {
    // ── Snapping ────────────────────────────────────────────────
    /// Snap-Abstand in Feld-Einheiten
    pub snap_distance: f64,
    /// Winkel-Toleranz beim Node-Drag (Radiant)
    pub node_angle_tolerance: f64,
    /// Winkel-Toleranz beim Anfasser-Drag (Radiant)
    pub handle_angle_tolerance: f64,

    // ── Treffer-Tests ───────────────────────────────────────────
    /// Halbe Trefferbreite von Segmenten
    pub hit_thickness: f64,
    /// Pick-Radius für Nodes
    #[serde(default = "default_node_pick_radius")]
    pub node_pick_radius: f64,

    // ── Segmente ────────────────────────────────────────────────
    /// Minimaler Betrag des Bogen-Versatzes
    pub arc_min_perp_distance: f64,
    /// Schwelle für "geradeaus" bei der Icon-Wahl
    #[serde(default = "default_turn_straight_tolerance")]
    pub turn_straight_tolerance: f64,
    /// Parameter-Schritte der schnellen Bézier-Abtastung
    pub bezier_fast_samples: usize,
    /// Parameter-Schritte der groben Treffer-Polylinie
    #[serde(default = "default_bezier_hit_samples")]
    pub bezier_hit_samples: usize,
    /// Bogenlängen-Abstand der präzisen Bézier-Abtastung
    pub bezier_sample_spacing: f64,
    /// Toleranz für Quadratur und Nullstellensuche
    pub quadrature_tolerance: f64,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            snap_distance: SNAP_DISTANCE,
            node_angle_tolerance: NODE_ANGLE_TOLERANCE,
            handle_angle_tolerance: HANDLE_ANGLE_TOLERANCE,

            hit_thickness: HIT_THICKNESS,
            node_pick_radius: NODE_PICK_RADIUS,

            arc_min_perp_distance: ARC_MIN_PERP_DISTANCE,
            turn_straight_tolerance: TURN_STRAIGHT_TOLERANCE,
            bezier_fast_samples: BEZIER_FAST_SAMPLES,
            bezier_hit_samples: BEZIER_HIT_SAMPLES,
            bezier_sample_spacing: BEZIER_SAMPLE_SPACING,
            quadrature_tolerance: QUADRATURE_TOLERANCE,
        }
    }
}

/// Serde-Default für `node_pick_radius` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_node_pick_radius() -> f64 {
    NODE_PICK_RADIUS
}

/// Serde-Default für `turn_straight_tolerance` (Abwärtskompatibilität).
fn default_turn_straight_tolerance() -> f64 {
    TURN_STRAIGHT_TOLERANCE
}

/// Serde-Default für `bezier_hit_samples` (Abwärtskompatibilität).
fn default_bezier_hit_samples() -> usize {
    BEZIER_HIT_SAMPLES
}

impl GeometryOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("robot_path_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("robot_path_editor.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_roundtrip() {
        let mut opts = GeometryOptions::default();
        opts.snap_distance = 3.5;
        opts.bezier_fast_samples = 40;
        let text = toml::to_string_pretty(&opts).expect("Serialisierung");
        let parsed: GeometryOptions = toml::from_str(&text).expect("Deserialisierung");
        assert_eq!(parsed, opts);
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let text = r#"
            snap_distance = 1.5
            node_angle_tolerance = 0.1
            handle_angle_tolerance = 0.05
            hit_thickness = 0.5
            arc_min_perp_distance = 0.01
            bezier_fast_samples = 16
            bezier_sample_spacing = 2.0
            quadrature_tolerance = 1e-8
        "#;
        let parsed: GeometryOptions = toml::from_str(text).expect("Deserialisierung");
        assert_eq!(parsed.snap_distance, 1.5);
        assert_eq!(parsed.node_pick_radius, NODE_PICK_RADIUS);
        assert_eq!(parsed.bezier_hit_samples, BEZIER_HIT_SAMPLES);
        assert_eq!(parsed.turn_straight_tolerance, TURN_STRAIGHT_TOLERANCE);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let opts = GeometryOptions::load_from_file(std::path::Path::new(
            "/definitiv/nicht/vorhanden/robot_path_editor.toml",
        ));
        assert_eq!(opts, GeometryOptions::default());
    }
}
