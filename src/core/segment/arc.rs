//! Kreisbogen durch vorherigen Node, freien Mittelpunkt und nächsten Node.
//!
//! Einziger unabhängiger Parameter ist `perp_distance`: der vorzeichenbehaftete
//! Versatz des Bogen-Mittelpunkts von der Sehnenmitte entlang der linken Normalen.

use super::SegmentDirection;
use crate::core::adapter::{Adapter, AdapterAttribute, AdapterIcon};
use crate::core::geometry::{arc_from_three_points, heading, left_normal, normalize_angle};
use crate::shared::GeometryOptions;
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Zustand eines Kreisbogen-Segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcShape {
    perp_distance: f64,
    pub(crate) start: DVec2,
    pub(crate) end: DVec2,
    midpoint: DVec2,
    center: DVec2,
    radius: f64,
    /// Überstrichener Winkel (unsigniert)
    sweep: f64,
    /// Winkel des Startpunkts um den Mittelpunkt in Anzeige-Orientierung
    start_display_angle: f64,
    positive: bool,
    start_theta: f64,
    end_theta: f64,
}

/// Winkel eines Vektors in Anzeige-Orientierung (Y-Achse nach unten).
fn display_angle(v: DVec2) -> f64 {
    (-v.y).atan2(v.x)
}

/// Klemmt den Versatz betragsmäßig auf mindestens `min` (Vorzeichen bleibt, 0 → positiv).
fn clamp_perp_distance(value: f64, min: f64) -> f64 {
    if value.abs() >= min {
        value
    } else if value < 0.0 {
        -min
    } else {
        min
    }
}

impl ArcShape {
    /// Erstellt einen Bogen mit explizitem Versatz (noch ohne abgeleitete Werte).
    pub fn new(perp_distance: f64, options: &GeometryOptions) -> Self {
        Self {
            perp_distance: clamp_perp_distance(perp_distance, options.arc_min_perp_distance),
            start: DVec2::ZERO,
            end: DVec2::ZERO,
            midpoint: DVec2::ZERO,
            center: DVec2::ZERO,
            radius: 0.0,
            sweep: 0.0,
            start_display_angle: 0.0,
            positive: true,
            start_theta: 0.0,
            end_theta: 0.0,
        }
    }

    /// Standard-Bogen: Versatz = ein Viertel der Sehnenlänge nach links.
    pub(super) fn with_default_bulge(start: DVec2, end: DVec2, options: &GeometryOptions) -> Self {
        Self::new(start.distance(end) / 4.0, options)
    }

    /// Setzt den Versatz (geklemmt). `update()` muss danach aufgerufen werden.
    pub fn set_perp_distance(&mut self, value: f64, options: &GeometryOptions) {
        self.perp_distance = clamp_perp_distance(value, options.arc_min_perp_distance);
    }

    pub(super) fn update(&mut self, start: DVec2, end: DVec2, options: &GeometryOptions) {
        self.perp_distance = clamp_perp_distance(self.perp_distance, options.arc_min_perp_distance);
        self.start = start;
        self.end = end;

        let chord_theta = heading(start, end);
        let chord_mid = (start + end) * 0.5;
        self.midpoint = chord_mid + left_normal(chord_theta) * self.perp_distance;

        let Some(circle) = arc_from_three_points(start, self.midpoint, end) else {
            // Nur bei Sehnenlänge 0 möglich: wie eine Gerade behandeln
            log::debug!("Bogen ohne Sehne bei {:?}, degeneriert", start);
            self.center = chord_mid;
            self.radius = 0.0;
            self.sweep = 0.0;
            self.start_display_angle = 0.0;
            self.positive = self.perp_distance > 0.0;
            self.start_theta = chord_theta;
            self.end_theta = chord_theta;
            return;
        };
        self.center = circle.center;
        self.radius = circle.radius;

        let a0 = display_angle(start - circle.center);
        let am = display_angle(self.midpoint - circle.center);
        let a1 = display_angle(end - circle.center);
        let rel_mid = (am - a0).rem_euclid(TAU);
        let rel_end = (a1 - a0).rem_euclid(TAU);

        self.start_display_angle = a0;
        self.positive = rel_mid > 0.0 && rel_mid < rel_end;
        self.sweep = if self.positive { rel_end } else { TAU - rel_end };

        // positive = gegen den Uhrzeigersinn in Anzeige-Orientierung,
        // also im Uhrzeigersinn im Feld: Tangente = Mittelpunktswinkel - 90°
        let tangent_offset = if self.positive { -FRAC_PI_2 } else { FRAC_PI_2 };
        self.start_theta = normalize_angle(heading(circle.center, start) + tangent_offset);
        self.end_theta = normalize_angle(heading(circle.center, end) + tangent_offset);
    }

    /// Vorzeichenbehafteter Versatz des Bogen-Mittelpunkts.
    pub fn perp_distance(&self) -> f64 {
        self.perp_distance
    }

    /// Freier Mittelpunkt auf dem Bogen (Anfasser).
    pub fn midpoint(&self) -> DVec2 {
        self.midpoint
    }

    /// Kreismittelpunkt.
    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Kreisradius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Umlaufsinn: `true` = gegen den Uhrzeigersinn in Anzeige-Orientierung.
    pub fn positive(&self) -> bool {
        self.positive
    }

    /// Überstrichener Winkel (Radiant, unsigniert).
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Bogenlänge.
    pub fn arc_length(&self) -> f64 {
        self.radius * self.sweep
    }

    pub fn start_theta(&self) -> f64 {
        self.start_theta
    }

    pub fn end_theta(&self) -> f64 {
        self.end_theta
    }

    /// Prüft ob der Anzeige-Winkel `angle` innerhalb des überstrichenen Bereichs liegt.
    fn contains_display_angle(&self, angle: f64) -> bool {
        let rel = (angle - self.start_display_angle).rem_euclid(TAU);
        if self.positive {
            rel <= self.sweep
        } else {
            rel == 0.0 || TAU - rel <= self.sweep
        }
    }

    pub(super) fn is_touching(&self, point: DVec2, thickness: f64) -> bool {
        if point.distance(self.start) <= thickness || point.distance(self.end) <= thickness {
            return true;
        }
        if self.radius <= 0.0 {
            return false;
        }
        let ring_distance = (point.distance(self.center) - self.radius).abs();
        ring_distance <= thickness
            && self.contains_display_angle(display_angle(point - self.center))
    }

    /// Punkte entlang des Bogens vom Start zum Ende.
    pub fn polyline(&self, steps: usize) -> Vec<DVec2> {
        if self.radius <= 0.0 {
            return vec![self.start, self.end];
        }
        let steps = steps.max(1);
        let signed_sweep = if self.positive { self.sweep } else { -self.sweep };
        (0..=steps)
            .map(|i| {
                let a = self.start_display_angle + signed_sweep * i as f64 / steps as f64;
                // Anzeige-Winkel zurück ins Feld: Y spiegeln
                self.center + DVec2::new(a.cos(), -a.sin()) * self.radius
            })
            .collect()
    }

    pub(super) fn write_adapter(&self, adapter: &mut Adapter, direction: SegmentDirection) {
        adapter.set(AdapterAttribute::Radius, self.radius);
        adapter.set(AdapterAttribute::ArcLength, self.arc_length() * direction.sign());
        adapter.set(AdapterAttribute::CenterX, self.center.x);
        adapter.set(AdapterAttribute::CenterY, self.center.y);
        // Icon aus dem Umlaufsinn; die Winkeldifferenz ist ab 180° Sweep mehrdeutig
        adapter.set_icon(if self.positive {
            AdapterIcon::TurnRight
        } else {
            AdapterIcon::TurnLeft
        });
    }
}
