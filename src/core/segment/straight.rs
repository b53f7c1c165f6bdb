//! Gerade Strecke zwischen zwei Nodes.

use super::SegmentDirection;
use crate::core::adapter::{Adapter, AdapterAttribute, AdapterIcon};
use crate::core::geometry::{heading, point_segment_distance};
use glam::DVec2;

/// Gerade: keine eigenen Parameter, Tangente = Sehnenrichtung an beiden Enden.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StraightShape {
    pub(crate) start: DVec2,
    pub(crate) end: DVec2,
    theta: f64,
    length: f64,
}

impl StraightShape {
    pub(super) fn update(&mut self, start: DVec2, end: DVec2) {
        self.start = start;
        self.end = end;
        self.theta = heading(start, end);
        self.length = start.distance(end);
    }

    /// Sehnenrichtung (bei Länge 0: 0.0).
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Euklidische Länge.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub(super) fn is_touching(&self, point: DVec2, thickness: f64) -> bool {
        point_segment_distance(point, self.start, self.end) <= thickness
    }

    pub(super) fn write_adapter(&self, adapter: &mut Adapter, direction: SegmentDirection) {
        adapter.set(AdapterAttribute::Distance, self.length * direction.sign());
        adapter.set_icon(match direction {
            SegmentDirection::Forward => AdapterIcon::Forward,
            SegmentDirection::Reverse => AdapterIcon::Reverse,
        });
    }
}
