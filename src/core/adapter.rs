//! Adapter: Werte-Container, den UI und Code-Generierung pro Node/Segment lesen.
//!
//! Der Geometrie-Kern schreibt die Werte nach jeder Änderung neu; die äußere
//! Schicht liest sie pro Frame (Pull-Modell, kein Observer-Graph).

use super::geometry::round_for_code;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Benannte Attribute, die ein Adapter bereitstellt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterAttribute {
    /// Node-Position X
    X,
    /// Node-Position Y
    Y,
    /// Startpunkt X
    X1,
    /// Startpunkt Y
    Y1,
    /// Endpunkt X
    X2,
    /// Endpunkt Y
    Y2,
    /// Vorzeichenbehaftete Strecke (negativ bei Rückwärtsfahrt)
    Distance,
    /// Kreisbogen-Radius
    Radius,
    /// Bogenlänge (vorzeichenbehaftet wie `Distance`)
    ArcLength,
    /// Tangente am Start bzw. eingehende Tangente am Node
    Theta1,
    /// Tangente am Ende bzw. ausgehende Tangente am Node
    Theta2,
    /// Kreismittelpunkt X
    CenterX,
    /// Kreismittelpunkt Y
    CenterY,
    /// Erster Bézier-Kontrollpunkt X (absolut)
    Control1X,
    /// Erster Bézier-Kontrollpunkt Y (absolut)
    Control1Y,
    /// Zweiter Bézier-Kontrollpunkt X (absolut)
    Control2X,
    /// Zweiter Bézier-Kontrollpunkt Y (absolut)
    Control2Y,
}

impl AdapterAttribute {
    /// Name des Attributs, wie ihn Templates referenzieren.
    pub fn name(&self) -> &'static str {
        match self {
            AdapterAttribute::X => "x",
            AdapterAttribute::Y => "y",
            AdapterAttribute::X1 => "x1",
            AdapterAttribute::Y1 => "y1",
            AdapterAttribute::X2 => "x2",
            AdapterAttribute::Y2 => "y2",
            AdapterAttribute::Distance => "distance",
            AdapterAttribute::Radius => "radius",
            AdapterAttribute::ArcLength => "arc_length",
            AdapterAttribute::Theta1 => "theta1",
            AdapterAttribute::Theta2 => "theta2",
            AdapterAttribute::CenterX => "center_x",
            AdapterAttribute::CenterY => "center_y",
            AdapterAttribute::Control1X => "control1_x",
            AdapterAttribute::Control1Y => "control1_y",
            AdapterAttribute::Control2X => "control2_x",
            AdapterAttribute::Control2Y => "control2_y",
        }
    }

    /// Winkel-Attribute werden in Grad angezeigt.
    pub fn is_angle(&self) -> bool {
        matches!(self, AdapterAttribute::Theta1 | AdapterAttribute::Theta2)
    }
}

/// Symbol für die UI, aus der Geometrie abgeleitet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterIcon {
    /// Vorwärts geradeaus
    #[default]
    Forward,
    /// Rückwärts geradeaus
    Reverse,
    /// Linkskurve (positive Winkeländerung)
    TurnLeft,
    /// Rechtskurve (negative Winkeländerung)
    TurnRight,
}

impl AdapterIcon {
    /// Wählt Links/Rechts anhand des Vorzeichens der Winkeländerung.
    ///
    /// Änderungen unterhalb von `straight_tolerance` gelten als geradeaus.
    pub fn from_turn(delta: f64, straight_tolerance: f64, reversed: bool) -> Self {
        if delta.abs() <= straight_tolerance {
            if reversed {
                AdapterIcon::Reverse
            } else {
                AdapterIcon::Forward
            }
        } else if delta > 0.0 {
            AdapterIcon::TurnLeft
        } else {
            AdapterIcon::TurnRight
        }
    }
}

/// Einzelner Adapter-Wert: Rohwert, Code-Wert und Anzeige-Text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterValue {
    /// Ungerundeter Wert in Feld-Einheiten bzw. Radiant
    pub raw: f64,
    /// Auf 3 Nachkommastellen gerundeter Wert für generierten Code
    pub code: f64,
    /// Formatierter Anzeige-Text
    pub display: String,
}

impl AdapterValue {
    fn new(attribute: AdapterAttribute, raw: f64) -> Self {
        let display = if attribute.is_angle() {
            format!("{:.2}°", raw.to_degrees())
        } else {
            format!("{:.4} in", raw)
        };
        Self {
            raw,
            code: round_for_code(raw),
            display,
        }
    }
}

/// Werte-Container eines Nodes oder Segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Adapter {
    values: IndexMap<AdapterAttribute, AdapterValue>,
    icon: AdapterIcon,
}

impl Adapter {
    /// Erstellt einen leeren Adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt einen Wert (überschreibt vorhandene Einträge).
    pub fn set(&mut self, attribute: AdapterAttribute, raw: f64) {
        self.values.insert(attribute, AdapterValue::new(attribute, raw));
    }

    /// Setzt das Symbol.
    pub fn set_icon(&mut self, icon: AdapterIcon) {
        self.icon = icon;
    }

    /// Entfernt alle Werte (beim Wechsel der Segment-Art).
    pub fn clear(&mut self) {
        self.values.clear();
        self.icon = AdapterIcon::default();
    }

    /// Liefert den vollständigen Wert eines Attributs.
    pub fn get(&self, attribute: AdapterAttribute) -> Option<&AdapterValue> {
        self.values.get(&attribute)
    }

    /// Liefert den Rohwert eines Attributs.
    pub fn raw(&self, attribute: AdapterAttribute) -> Option<f64> {
        self.get(attribute).map(|v| v.raw)
    }

    /// Liefert den gerundeten Code-Wert eines Attributs.
    pub fn code(&self, attribute: AdapterAttribute) -> Option<f64> {
        self.get(attribute).map(|v| v.code)
    }

    /// Aktuelles Symbol.
    pub fn icon(&self) -> AdapterIcon {
        self.icon
    }

    /// Iterator über alle Attribute in Schreibreihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = (AdapterAttribute, &AdapterValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Anzahl gesetzter Attribute.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Gibt `true` zurück, wenn keine Attribute gesetzt sind.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
