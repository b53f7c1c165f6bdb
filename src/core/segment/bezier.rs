//! Kubisches Bézier-Segment mit zwei relativen Kontrollpunkt-Versätzen.

use super::{SampleQuality, SegmentDirection, SegmentEnd};
use crate::core::adapter::{Adapter, AdapterAttribute, AdapterIcon};
use crate::core::bezier::CubicBezier;
use crate::core::geometry::{delta_heading, heading, point_segment_distance};
use crate::shared::GeometryOptions;
use glam::DVec2;

/// Versätze kürzer als dieser Wert gelten als nicht gesetzt (Tangenten-Fallback).
const MIN_HANDLE_LENGTH: f64 = 1e-9;

/// Zustand eines Bézier-Segments.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierShape {
    /// Versatz des ersten Kontrollpunkts vom vorherigen Node
    control_offset1: DVec2,
    /// Versatz des zweiten Kontrollpunkts vom nächsten Node
    control_offset2: DVec2,
    pub(crate) start: DVec2,
    pub(crate) end: DVec2,
    curve: CubicBezier,
    polyline: Vec<DVec2>,
    quality: SampleQuality,
    length: f64,
    start_theta: f64,
    end_theta: f64,
}

impl BezierShape {
    /// Erstellt eine Kurve mit expliziten Versätzen (noch ohne abgeleitete Werte).
    pub fn new(control_offset1: DVec2, control_offset2: DVec2) -> Self {
        Self {
            control_offset1,
            control_offset2,
            start: DVec2::ZERO,
            end: DVec2::ZERO,
            curve: CubicBezier::new(DVec2::ZERO, DVec2::ZERO, DVec2::ZERO, DVec2::ZERO),
            polyline: Vec::new(),
            quality: SampleQuality::Precise,
            length: 0.0,
            start_theta: 0.0,
            end_theta: 0.0,
        }
    }

    /// Standard-Anfasser: je ein Drittel der Sehne entlang der Sehne (entspricht einer Geraden).
    pub(super) fn with_default_handles(start: DVec2, end: DVec2) -> Self {
        let third = (end - start) / 3.0;
        Self::new(third, -third)
    }

    /// Setzt einen Versatz. `update()` muss danach aufgerufen werden.
    pub fn set_control_offset(&mut self, end: SegmentEnd, offset: DVec2) {
        match end {
            SegmentEnd::Start => self.control_offset1 = offset,
            SegmentEnd::End => self.control_offset2 = offset,
        }
    }

    /// Versatz am gewünschten Ende.
    pub fn control_offset(&self, end: SegmentEnd) -> DVec2 {
        match end {
            SegmentEnd::Start => self.control_offset1,
            SegmentEnd::End => self.control_offset2,
        }
    }

    /// Absolute Position des Kontrollpunkts am gewünschten Ende.
    pub fn control_point(&self, end: SegmentEnd) -> DVec2 {
        match end {
            SegmentEnd::Start => self.curve.p1,
            SegmentEnd::End => self.curve.p2,
        }
    }

    pub(super) fn update(
        &mut self,
        start: DVec2,
        end: DVec2,
        quality: SampleQuality,
        options: &GeometryOptions,
    ) {
        self.start = start;
        self.end = end;
        self.curve = CubicBezier::new(
            start,
            start + self.control_offset1,
            end + self.control_offset2,
            end,
        );
        self.quality = quality;
        self.polyline = match quality {
            SampleQuality::Fast => self.curve.sample_uniform(options.bezier_fast_samples),
            SampleQuality::Precise => self
                .curve
                .sample_by_arc_length(options.bezier_sample_spacing, options.quadrature_tolerance),
        };
        self.length = self.curve.arc_length(options.quadrature_tolerance);

        let chord = heading(start, end);
        let c = &self.curve;
        self.start_theta = if self.control_offset1.length() > MIN_HANDLE_LENGTH {
            heading(c.p0, c.p1)
        } else if c.p2.distance(c.p0) > MIN_HANDLE_LENGTH {
            heading(c.p0, c.p2)
        } else {
            chord
        };
        self.end_theta = if self.control_offset2.length() > MIN_HANDLE_LENGTH {
            heading(c.p2, c.p3)
        } else if c.p3.distance(c.p1) > MIN_HANDLE_LENGTH {
            heading(c.p1, c.p3)
        } else {
            chord
        };
    }

    /// Zugrunde liegende Kurve.
    pub fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    /// Aktuelle Abtastung (schnell oder präzise, siehe `quality()`).
    pub fn polyline(&self) -> &[DVec2] {
        &self.polyline
    }

    /// Qualität der aktuellen Abtastung.
    pub fn quality(&self) -> SampleQuality {
        self.quality
    }

    /// Bogenlänge.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn start_theta(&self) -> f64 {
        self.start_theta
    }

    pub fn end_theta(&self) -> f64 {
        self.end_theta
    }

    /// Treffer-Test gegen eine grobe Polylinie.
    ///
    /// Neben den Einzelstrecken wird pro Dreier-Fenster auch die Sehne geprüft,
    /// das vergrößert die Trefferfläche auf der Innenseite der Krümmung.
    pub(super) fn is_touching(&self, point: DVec2, thickness: f64, samples: usize) -> bool {
        let coarse = self.curve.sample_uniform(samples);
        if coarse
            .windows(2)
            .any(|w| point_segment_distance(point, w[0], w[1]) <= thickness)
        {
            return true;
        }
        coarse
            .windows(3)
            .any(|w| point_segment_distance(point, w[0], w[2]) <= thickness)
    }

    pub(super) fn write_adapter(
        &self,
        adapter: &mut Adapter,
        direction: SegmentDirection,
        options: &GeometryOptions,
    ) {
        adapter.set(AdapterAttribute::Distance, self.length * direction.sign());
        adapter.set(AdapterAttribute::Control1X, self.curve.p1.x);
        adapter.set(AdapterAttribute::Control1Y, self.curve.p1.y);
        adapter.set(AdapterAttribute::Control2X, self.curve.p2.x);
        adapter.set(AdapterAttribute::Control2Y, self.curve.p2.y);
        adapter.set_icon(AdapterIcon::from_turn(
            delta_heading(self.start_theta, self.end_theta),
            options.turn_straight_tolerance,
            direction == SegmentDirection::Reverse,
        ));
    }
}
