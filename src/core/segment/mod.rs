//! Segment-Form (Gerade / Kreisbogen / Bézier) als geschlossener Summentyp.
//!
//! Jede Variante leitet aus den beiden Endpunkten (und ihren eigenen
//! unabhängigen Parametern) Tangenten, Länge, Treffer-Test und Adapter-Werte ab.
//! `update()` muss nach jeder Endpunkt- oder Parameteränderung aufgerufen werden;
//! das übernimmt `PathModel`.

mod arc;
mod bezier;
mod straight;

pub use arc::ArcShape;
pub use bezier::BezierShape;
pub use straight::StraightShape;

use super::adapter::{Adapter, AdapterAttribute};
use crate::shared::GeometryOptions;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Art eines Segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Gerade Strecke
    #[default]
    Straight,
    /// Kreisbogen durch drei Punkte
    Arc,
    /// Kubische Bézier-Kurve
    Bezier,
}

/// Fahrtrichtung auf einem Segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentDirection {
    /// Vorwärtsfahrt
    #[default]
    Forward,
    /// Rückwärtsfahrt (Strecken-Werte negativ)
    Reverse,
}

impl SegmentDirection {
    /// Vorzeichen für Strecken-Werte.
    pub fn sign(&self) -> f64 {
        match self {
            SegmentDirection::Forward => 1.0,
            SegmentDirection::Reverse => -1.0,
        }
    }
}

/// Endpunkt eines Segments (wählt z.B. den Bézier-Anfasser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentEnd {
    /// Beim vorherigen Node
    Start,
    /// Beim nächsten Node
    End,
}

/// Abtast-Qualität für Bézier-Kurven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleQuality {
    /// Gleichmäßig im Parameter (während einer Interaktion)
    Fast,
    /// Gleichmäßig in der Bogenlänge (Ruhezustand)
    #[default]
    Precise,
}

/// Form-Zustand eines Segments.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentShape {
    /// Gerade Strecke
    Straight(StraightShape),
    /// Kreisbogen mit freiem Mittelpunkt
    Arc(ArcShape),
    /// Kubische Bézier-Kurve mit relativen Anfassern
    Bezier(BezierShape),
}

impl SegmentShape {
    /// Erstellt eine Form der gewünschten Art mit aus den Endpunkten abgeleiteten Standardparametern.
    pub fn new(
        kind: SegmentKind,
        start: DVec2,
        end: DVec2,
        quality: SampleQuality,
        options: &GeometryOptions,
    ) -> Self {
        let mut shape = match kind {
            SegmentKind::Straight => SegmentShape::Straight(StraightShape::default()),
            SegmentKind::Arc => {
                SegmentShape::Arc(ArcShape::with_default_bulge(start, end, options))
            }
            SegmentKind::Bezier => {
                SegmentShape::Bezier(BezierShape::with_default_handles(start, end))
            }
        };
        shape.update(start, end, quality, options);
        shape
    }

    /// Art der Form.
    pub fn kind(&self) -> SegmentKind {
        match self {
            SegmentShape::Straight(_) => SegmentKind::Straight,
            SegmentShape::Arc(_) => SegmentKind::Arc,
            SegmentShape::Bezier(_) => SegmentKind::Bezier,
        }
    }

    /// Berechnet alle abgeleiteten Werte aus den aktuellen Endpunkten neu.
    pub fn update(
        &mut self,
        start: DVec2,
        end: DVec2,
        quality: SampleQuality,
        options: &GeometryOptions,
    ) {
        match self {
            SegmentShape::Straight(s) => s.update(start, end),
            SegmentShape::Arc(s) => s.update(start, end, options),
            SegmentShape::Bezier(s) => s.update(start, end, quality, options),
        }
    }

    /// Tangente am Start (Radiant).
    pub fn start_theta(&self) -> f64 {
        match self {
            SegmentShape::Straight(s) => s.theta(),
            SegmentShape::Arc(s) => s.start_theta(),
            SegmentShape::Bezier(s) => s.start_theta(),
        }
    }

    /// Tangente am Ende (Radiant, Fahrtrichtung).
    pub fn end_theta(&self) -> f64 {
        match self {
            SegmentShape::Straight(s) => s.theta(),
            SegmentShape::Arc(s) => s.end_theta(),
            SegmentShape::Bezier(s) => s.end_theta(),
        }
    }

    /// Tangente am gewünschten Endpunkt.
    pub fn theta_at(&self, end: SegmentEnd) -> f64 {
        match end {
            SegmentEnd::Start => self.start_theta(),
            SegmentEnd::End => self.end_theta(),
        }
    }

    /// Unsignierte Länge entlang der Form.
    pub fn length(&self) -> f64 {
        match self {
            SegmentShape::Straight(s) => s.length(),
            SegmentShape::Arc(s) => s.arc_length(),
            SegmentShape::Bezier(s) => s.length(),
        }
    }

    /// Prüft ob `point` das Segment innerhalb von `thickness` berührt.
    pub fn is_touching(&self, point: DVec2, thickness: f64, options: &GeometryOptions) -> bool {
        match self {
            SegmentShape::Straight(s) => s.is_touching(point, thickness),
            SegmentShape::Arc(s) => s.is_touching(point, thickness),
            SegmentShape::Bezier(s) => s.is_touching(point, thickness, options.bezier_hit_samples),
        }
    }

    /// Schreibt alle Werte in den Adapter (vorherige Werte werden verworfen).
    pub fn write_adapter(
        &self,
        adapter: &mut Adapter,
        direction: SegmentDirection,
        options: &GeometryOptions,
    ) {
        adapter.clear();
        let (start, end) = self.endpoints();
        adapter.set(AdapterAttribute::X1, start.x);
        adapter.set(AdapterAttribute::Y1, start.y);
        adapter.set(AdapterAttribute::X2, end.x);
        adapter.set(AdapterAttribute::Y2, end.y);
        adapter.set(AdapterAttribute::Theta1, self.start_theta());
        adapter.set(AdapterAttribute::Theta2, self.end_theta());
        match self {
            SegmentShape::Straight(s) => s.write_adapter(adapter, direction),
            SegmentShape::Arc(s) => s.write_adapter(adapter, direction),
            SegmentShape::Bezier(s) => s.write_adapter(adapter, direction, options),
        }
    }

    /// Zuletzt übernommene Endpunkte.
    pub fn endpoints(&self) -> (DVec2, DVec2) {
        match self {
            SegmentShape::Straight(s) => (s.start, s.end),
            SegmentShape::Arc(s) => (s.start, s.end),
            SegmentShape::Bezier(s) => (s.start, s.end),
        }
    }

    /// Polylinie zur Darstellung durch den externen Renderer.
    pub fn polyline(&self) -> Vec<DVec2> {
        match self {
            SegmentShape::Straight(s) => vec![s.start, s.end],
            SegmentShape::Arc(s) => s.polyline(32),
            SegmentShape::Bezier(s) => s.polyline().to_vec(),
        }
    }
}
