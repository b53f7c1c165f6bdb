//! Kubische Bézier-Kurven: Auswertung, Bogenlänge und Arc-Length-Abtastung.
//!
//! Zwei Abtast-Modi:
//! - schnell: gleichmäßig im Parameter `t` (für interaktives Draggen)
//! - langsam: gleichmäßig in der Bogenlänge (numerische Integration von |B'(t)|
//!   mit adaptiver Simpson-Quadratur, Nullstellensuche pro Schritt)

use glam::DVec2;

/// Maximale Rekursionstiefe der adaptiven Simpson-Quadratur.
const MAX_QUADRATURE_DEPTH: u32 = 24;
/// Maximale Iterationen der Nullstellensuche.
const MAX_ROOT_ITERATIONS: u32 = 64;
/// Abbruch-Toleranz der Nullstellensuche im Parameterraum.
const ROOT_PARAM_TOLERANCE: f64 = 1e-12;

/// Kubische Bézier-Kurve aus vier Kontrollpunkten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
}

impl CubicBezier {
    /// Erstellt eine Kurve aus vier Kontrollpunkten.
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
    pub fn point(&self, t: f64) -> DVec2 {
        let inv = 1.0 - t;
        let inv2 = inv * inv;
        let t2 = t * t;
        inv2 * inv * self.p0
            + 3.0 * inv2 * t * self.p1
            + 3.0 * inv * t2 * self.p2
            + t2 * t * self.p3
    }

    /// B'(t) = 3(1-t)²·(P1-P0) + 6(1-t)t·(P2-P1) + 3t²·(P3-P2)
    pub fn derivative(&self, t: f64) -> DVec2 {
        let inv = 1.0 - t;
        3.0 * inv * inv * (self.p1 - self.p0)
            + 6.0 * inv * t * (self.p2 - self.p1)
            + 3.0 * t * t * (self.p3 - self.p2)
    }

    /// Bogenlänge zwischen `t0` und `t1` (∫|B'(t)| dt).
    pub fn arc_length_between(&self, t0: f64, t1: f64, tolerance: f64) -> f64 {
        if t1 <= t0 {
            return 0.0;
        }
        let speed = |t: f64| self.derivative(t).length();
        adaptive_simpson(&speed, t0, t1, tolerance)
    }

    /// Gesamte Bogenlänge der Kurve.
    pub fn arc_length(&self, tolerance: f64) -> f64 {
        self.arc_length_between(0.0, 1.0, tolerance)
    }

    /// Schnelle Abtastung: `samples + 1` Punkte gleichmäßig im Parameter.
    pub fn sample_uniform(&self, samples: usize) -> Vec<DVec2> {
        let samples = samples.max(1);
        (0..=samples)
            .map(|i| self.point(i as f64 / samples as f64))
            .collect()
    }

    /// Langsame Abtastung: Punkte mit gleichem Bogenlängen-Abstand.
    ///
    /// Der Abstand wird so gewählt, dass `ceil(L / max_spacing)` gleich lange
    /// Teilstücke entstehen. Findet die Nullstellensuche im Intervall `[t, 1]`
    /// keine Lösung, wird `t = 1` angenommen und die Abtastung beendet.
    pub fn sample_by_arc_length(&self, max_spacing: f64, tolerance: f64) -> Vec<DVec2> {
        let total = self.arc_length(tolerance);
        if total < f64::EPSILON || max_spacing <= 0.0 {
            return vec![self.p0, self.p3];
        }

        let segment_count = (total / max_spacing).ceil().max(1.0) as usize;
        let step = total / segment_count as f64;

        let mut points = Vec::with_capacity(segment_count + 1);
        points.push(self.p0);

        let mut t = 0.0;
        for _ in 1..segment_count {
            match self.solve_step(t, step, tolerance) {
                Some(next_t) if next_t < 1.0 => {
                    t = next_t;
                    points.push(self.point(t));
                }
                _ => {
                    log::warn!(
                        "Bézier-Abtastung: keine Nullstelle ab t={:.4}, Kurvenende angenommen",
                        t
                    );
                    break;
                }
            }
        }

        points.push(self.p3);
        points
    }

    /// Sucht `t' ∈ [t_start, 1]` mit `∫_{t_start}^{t'} |B'| = step`.
    ///
    /// Die Bogenlänge ist monoton in `t'`, daher genügt eine Regula-falsi-Suche
    /// (Illinois-Variante) auf dem Klammerintervall.
    fn solve_step(&self, t_start: f64, step: f64, tolerance: f64) -> Option<f64> {
        let f = |t: f64| self.arc_length_between(t_start, t, tolerance) - step;

        let mut lo = t_start;
        let mut hi = 1.0;
        let mut f_lo = -step;
        let mut f_hi = f(hi);
        if f_hi < 0.0 {
            return None;
        }
        if f_hi.abs() <= tolerance {
            return Some(hi);
        }

        let mut side = 0i8;
        for _ in 0..MAX_ROOT_ITERATIONS {
            let mut t = (lo * f_hi - hi * f_lo) / (f_hi - f_lo);
            if !(lo..=hi).contains(&t) || !t.is_finite() {
                t = 0.5 * (lo + hi);
            }
            let f_t = f(t);
            if f_t.abs() <= tolerance || (hi - lo) < ROOT_PARAM_TOLERANCE {
                return Some(t);
            }
            if f_t > 0.0 {
                hi = t;
                f_hi = f_t;
                if side == 1 {
                    f_lo *= 0.5;
                }
                side = 1;
            } else {
                lo = t;
                f_lo = f_t;
                if side == -1 {
                    f_hi *= 0.5;
                }
                side = -1;
            }
        }
        Some(0.5 * (lo + hi))
    }
}

/// Adaptive Simpson-Quadratur von `f` auf `[a, b]`.
pub fn adaptive_simpson(f: &impl Fn(f64) -> f64, a: f64, b: f64, tolerance: f64) -> f64 {
    let fa = f(a);
    let fb = f(b);
    let m = 0.5 * (a + b);
    let fm = f(m);
    let whole = simpson(a, b, fa, fm, fb);
    simpson_step(f, a, b, fa, fm, fb, whole, tolerance, MAX_QUADRATURE_DEPTH)
}

fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

#[allow(clippy::too_many_arguments)]
fn simpson_step(
    f: &impl Fn(f64) -> f64,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tolerance: f64,
    depth: u32,
) -> f64 {
    let m = 0.5 * (a + b);
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = f(lm);
    let frm = f(rm);
    let left = simpson(a, m, fa, flm, fm);
    let right = simpson(m, b, fm, frm, fb);
    let delta = left + right - whole;
    if depth == 0 || delta.abs() <= 15.0 * tolerance {
        return left + right + delta / 15.0;
    }
    simpson_step(f, a, m, fa, flm, fm, left, tolerance * 0.5, depth - 1)
        + simpson_step(f, m, b, fm, frm, fb, right, tolerance * 0.5, depth - 1)
}
