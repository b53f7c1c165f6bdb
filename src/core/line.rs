//! Unendliche Gerade aus Aufpunkt und Richtungswinkel.

use super::geometry::{heading, is_parallel};
use glam::DVec2;

/// Gerade durch `point` mit Richtung `theta` (Radiant, 0 = +X, gegen den Uhrzeigersinn positiv).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Aufpunkt der Geraden (Feld-Einheiten)
    pub point: DVec2,
    /// Richtungswinkel in Radiant
    pub theta: f64,
}

impl Line {
    /// Erstellt eine Gerade aus Aufpunkt und Richtungswinkel.
    pub fn new(point: DVec2, theta: f64) -> Self {
        Self { point, theta }
    }

    /// Gerade durch zwei Punkte (Richtung a → b).
    pub fn through(a: DVec2, b: DVec2) -> Self {
        Self::new(a, heading(a, b))
    }

    /// Einheitsvektor in Richtung der Geraden.
    pub fn direction(&self) -> DVec2 {
        DVec2::from_angle(self.theta)
    }

    /// Schnittpunkt zweier Geraden.
    ///
    /// Gibt `None` zurück, wenn die Richtungen innerhalb von `1e-6` rad parallel sind.
    /// Aufrufer (Solver, Arc-State) müssen diesen Fall selbst behandeln.
    pub fn intersection(&self, other: &Line) -> Option<DVec2> {
        if is_parallel(self.theta, other.theta) {
            return None;
        }
        let d1 = self.direction();
        let d2 = other.direction();
        let det = d1.perp_dot(d2);
        let t = (other.point - self.point).perp_dot(d2) / det;
        Some(self.point + d1 * t)
    }

    /// Orthogonale Projektion von `point` auf die Gerade.
    pub fn closest_point(&self, point: DVec2) -> DVec2 {
        let dir = self.direction();
        self.point + dir * (point - self.point).dot(dir)
    }

    /// Abstand eines Punkts zur Geraden.
    pub fn distance_to(&self, point: DVec2) -> f64 {
        (point - self.point).perp_dot(self.direction()).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_intersection_axes() {
        let horizontal = Line::new(DVec2::new(0.0, 3.0), 0.0);
        let vertical = Line::new(DVec2::new(5.0, -2.0), FRAC_PI_2);
        let hit = horizontal.intersection(&vertical).expect("Schnittpunkt erwartet");
        assert_relative_eq!(hit.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(hit.y, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intersection_lies_on_both_lines() {
        for i in 0..36 {
            for j in 0..36 {
                let a = i as f64 * PI / 18.0;
                let b = j as f64 * PI / 18.0 + 0.013;
                let l1 = Line::new(DVec2::new(1.0, -2.0), a);
                let l2 = Line::new(DVec2::new(-4.0, 7.5), b);
                if is_parallel(a, b) {
                    assert!(l1.intersection(&l2).is_none());
                    continue;
                }
                let p = l1.intersection(&l2).expect("Schnittpunkt erwartet");
                assert!(l1.distance_to(p) < 1e-6, "l1 verfehlt bei {i}/{j}");
                assert!(l2.distance_to(p) < 1e-6, "l2 verfehlt bei {i}/{j}");
            }
        }
    }

    #[test]
    fn test_parallel_and_antiparallel_return_none() {
        let l1 = Line::new(DVec2::ZERO, FRAC_PI_4);
        let l2 = Line::new(DVec2::new(0.0, 1.0), FRAC_PI_4 + 5e-7);
        let l3 = Line::new(DVec2::new(3.0, 1.0), FRAC_PI_4 + PI);
        assert!(l1.intersection(&l2).is_none());
        assert!(l1.intersection(&l3).is_none());
    }

    #[test]
    fn test_closest_point_is_minimal() {
        let line = Line::through(DVec2::new(0.0, 0.0), DVec2::new(4.0, 2.0));
        let p = DVec2::new(1.0, 5.0);
        let closest = line.closest_point(p);
        assert!(line.distance_to(closest) < 1e-9);
        let best = p.distance(closest);
        for k in -20..=20 {
            let q = line.point + line.direction() * (k as f64 * 0.5);
            assert!(best <= p.distance(q) + 1e-12);
        }
        // Verbindungsvektor steht senkrecht auf der Geraden
        assert_relative_eq!((p - closest).dot(line.direction()), 0.0, epsilon = 1e-9);
    }
}
