//! Reine Geometrie-Funktionen in Feld-Einheiten.
//!
//! Layer-neutral: wird von `line`, `segment`, `path` und `constraint` genutzt.

use glam::DVec2;
use std::f64::consts::{PI, TAU};

/// Toleranz (Radiant), ab der zwei Richtungen als parallel gelten.
pub const PARALLEL_TOLERANCE: f64 = 1e-6;

/// Kreis aus Mittelpunkt und Radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Mittelpunkt
    pub center: DVec2,
    /// Radius
    pub radius: f64,
}

/// Richtungswinkel von `from` nach `to` (Radiant).
pub fn heading(from: DVec2, to: DVec2) -> f64 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Normalisiert einen Winkel auf (-π, π].
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Vorzeichenbehaftete Winkeldifferenz `to - from`, normalisiert auf (-π, π].
///
/// Positiv = Linkskurve.
pub fn delta_heading(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Prüft ob zwei Richtungen parallel oder antiparallel sind.
pub fn is_parallel(theta1: f64, theta2: f64) -> bool {
    let delta = (theta1 - theta2).rem_euclid(PI);
    delta < PARALLEL_TOLERANCE || PI - delta < PARALLEL_TOLERANCE
}

/// Linker Normalenvektor (Richtung + 90°).
pub fn left_normal(theta: f64) -> DVec2 {
    DVec2::from_angle(theta + PI / 2.0)
}

/// Abstand eines Punkts zur unendlichen Geraden durch `a` und `b`.
///
/// Bei `a == b` wird der Punktabstand zurückgegeben.
pub fn point_line_distance(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len = ab.length();
    if len < f64::EPSILON {
        return point.distance(a);
    }
    (point - a).perp_dot(ab).abs() / len
}

/// Abstand eines Punkts zur Strecke `a`–`b`.
pub fn point_segment_distance(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < f64::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Umkreis durch drei Punkte (geschlossene Formel).
///
/// Gibt `None` zurück, wenn die Punkte (nahezu) kollinear sind.
pub fn arc_from_three_points(a: DVec2, b: DVec2, c: DVec2) -> Option<Circle> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        return None;
    }
    let a_sq = a.length_squared();
    let b_sq = b.length_squared();
    let c_sq = c.length_squared();
    let center = DVec2::new(
        (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d,
        (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d,
    );
    Some(Circle {
        center,
        radius: center.distance(a),
    })
}

/// Rundet auf 3 Nachkommastellen (Wert für die Code-Generierung).
pub fn round_for_code(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    // -0.0 vermeiden
    if rounded == 0.0 { 0.0 } else { rounded }
}
