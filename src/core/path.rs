//! Der Pfad: Kette aus Nodes und typisierten Segmenten.
//!
//! Nodes und Segmente liegen in einer Arena und referenzieren sich über IDs
//! (`incoming`/`outgoing` bzw. `previous`/`next`). Jeder Mutator hält die
//! Adapter sofort konsistent: Endpunkte setzen → Segment-Adapter →
//! Drehwinkel der angrenzenden Nodes.

use super::adapter::{Adapter, AdapterAttribute, AdapterIcon};
use super::geometry::delta_heading;
use super::segment::{SampleQuality, SegmentDirection, SegmentEnd, SegmentKind, SegmentShape};
use super::spatial::SpatialIndex;
use crate::shared::GeometryOptions;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Stabile ID eines Nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Stabile ID eines Segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Fehlbedienung der Pfad-Struktur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Node {0} existiert nicht")]
    UnknownNode(NodeId),
    #[error("Segment {0} existiert nicht")]
    UnknownSegment(SegmentId),
    #[error("Node {0} ist der einzige Node und kann nicht entfernt werden")]
    LastNode(NodeId),
    #[error("Segment {0} ist kein Kreisbogen")]
    NotAnArc(SegmentId),
    #[error("Segment {0} ist keine Bézier-Kurve")]
    NotABezier(SegmentId),
    #[error("Node {node} ist kein Endpunkt von Segment {segment}")]
    NotAdjacent { segment: SegmentId, node: NodeId },
}

/// Wegpunkt des Pfads.
#[derive(Debug, Clone)]
pub struct PathNode {
    id: NodeId,
    position: DVec2,
    incoming: Option<SegmentId>,
    outgoing: Option<SegmentId>,
    turn_angles: (f64, f64),
    adapter: Adapter,
}

impl PathNode {
    fn new(id: NodeId, position: DVec2) -> Self {
        Self {
            id,
            position,
            incoming: None,
            outgoing: None,
            turn_angles: (0.0, 0.0),
            adapter: Adapter::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Position in Feld-Einheiten.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Eingehendes Segment (`None` beim Start-Node).
    pub fn incoming(&self) -> Option<SegmentId> {
        self.incoming
    }

    /// Ausgehendes Segment (`None` beim End-Node).
    pub fn outgoing(&self) -> Option<SegmentId> {
        self.outgoing
    }

    /// Eingehende und ausgehende Tangente am Node.
    ///
    /// Endpunkte nutzen ihre einzige Tangente für beide Werte,
    /// ein isolierter Node liefert `(0, 0)`.
    pub fn turn_angles(&self) -> (f64, f64) {
        self.turn_angles
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }
}

/// Verbindung zweier aufeinanderfolgender Nodes.
#[derive(Debug, Clone)]
pub struct PathSegment {
    id: SegmentId,
    previous: NodeId,
    next: NodeId,
    direction: SegmentDirection,
    shape: SegmentShape,
    adapter: Adapter,
}

impl PathSegment {
    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn previous(&self) -> NodeId {
        self.previous
    }

    pub fn next(&self) -> NodeId {
        self.next
    }

    pub fn direction(&self) -> SegmentDirection {
        self.direction
    }

    pub fn shape(&self) -> &SegmentShape {
        &self.shape
    }

    pub fn kind(&self) -> SegmentKind {
        self.shape.kind()
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    /// Welches Ende des Segments am Node `node` liegt.
    pub fn end_at(&self, node: NodeId) -> Option<SegmentEnd> {
        if node == self.previous {
            Some(SegmentEnd::Start)
        } else if node == self.next {
            Some(SegmentEnd::End)
        } else {
            None
        }
    }
}

/// Pfad aus genau einer Kette von Nodes.
#[derive(Debug, Clone)]
pub struct PathModel {
    nodes: HashMap<NodeId, PathNode>,
    segments: HashMap<SegmentId, PathSegment>,
    start_node: NodeId,
    next_node_id: u64,
    next_segment_id: u64,
    quality: SampleQuality,
    options: GeometryOptions,
    spatial_index: SpatialIndex,
}

impl PathModel {
    /// Erstellt einen Pfad mit einem einzelnen Start-Node.
    pub fn new(start: DVec2, options: GeometryOptions) -> Self {
        let start_node = NodeId(1);
        let mut nodes = HashMap::new();
        nodes.insert(start_node, PathNode::new(start_node, start));
        let mut path = Self {
            nodes,
            segments: HashMap::new(),
            start_node,
            next_node_id: 2,
            next_segment_id: 1,
            quality: SampleQuality::Precise,
            options,
            spatial_index: SpatialIndex::empty(),
        };
        path.refresh_node(start_node);
        path.rebuild_spatial_index();
        path
    }

    // ── Lesender Zugriff ────────────────────────────────────────

    pub fn options(&self) -> &GeometryOptions {
        &self.options
    }

    /// Ersetzt die Optionen und berechnet alle Adapter neu.
    pub fn set_options(&mut self, options: GeometryOptions) {
        self.options = options;
        self.refresh_all();
    }

    pub fn node(&self, id: NodeId) -> Option<&PathNode> {
        self.nodes.get(&id)
    }

    pub fn segment(&self, id: SegmentId) -> Option<&PathSegment> {
        self.segments.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    /// Letzter Node der Kette.
    pub fn end_node(&self) -> NodeId {
        self.node_ids().last().copied().unwrap_or(self.start_node)
    }

    /// Aktuelle Bézier-Abtastqualität.
    pub fn quality(&self) -> SampleQuality {
        self.quality
    }

    /// Node-IDs in Ketten-Reihenfolge.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.nodes.len());
        let mut current = Some(self.start_node);
        while let Some(id) = current {
            let Some(node) = self.nodes.get(&id) else {
                break;
            };
            ids.push(id);
            if ids.len() > self.nodes.len() {
                debug_assert!(false, "Zyklus in der Node-Kette");
                break;
            }
            current = node
                .outgoing
                .and_then(|s| self.segments.get(&s))
                .map(|s| s.next);
        }
        ids
    }

    /// Segment-IDs in Ketten-Reihenfolge.
    pub fn segment_ids(&self) -> Vec<SegmentId> {
        self.node_ids()
            .into_iter()
            .filter_map(|id| self.nodes.get(&id).and_then(|n| n.outgoing))
            .collect()
    }

    /// Summe der unsignierten Segment-Längen.
    pub fn total_length(&self) -> f64 {
        self.segments.values().map(|s| s.shape.length()).sum()
    }

    /// Nächster Node innerhalb von `radius`.
    pub fn nearest_node(&self, position: DVec2, radius: f64) -> Option<NodeId> {
        self.spatial_index
            .nearest(position)
            .filter(|m| m.distance <= radius)
            .map(|m| m.node_id)
    }

    /// Erstes Segment (Ketten-Reihenfolge), das `position` berührt.
    pub fn segment_at(&self, position: DVec2) -> Option<SegmentId> {
        self.segment_ids().into_iter().find(|id| {
            self.segments.get(id).is_some_and(|s| {
                s.shape
                    .is_touching(position, self.options.hit_thickness, &self.options)
            })
        })
    }

    /// Prüft die Ketten-Invarianten: genau ein Start, genau ein Ende,
    /// alle Verweise gültig und wechselseitig.
    pub fn chain_is_consistent(&self) -> bool {
        let starts = self.nodes.values().filter(|n| n.incoming.is_none()).count();
        let ends = self.nodes.values().filter(|n| n.outgoing.is_none()).count();
        if starts != 1 || ends != 1 {
            return false;
        }
        if self.nodes.get(&self.start_node).and_then(|n| n.incoming).is_some() {
            return false;
        }
        let links_ok = self.segments.values().all(|s| {
            self.nodes.get(&s.previous).and_then(|n| n.outgoing) == Some(s.id)
                && self.nodes.get(&s.next).and_then(|n| n.incoming) == Some(s.id)
        });
        links_ok
            && self.segments.len() + 1 == self.nodes.len()
            && self.node_ids().len() == self.nodes.len()
    }

    // ── Struktur-Änderungen ─────────────────────────────────────

    /// Hängt einen Node ans Ende der Kette an.
    pub fn append_node(&mut self, position: DVec2, kind: SegmentKind) -> (NodeId, SegmentId) {
        let previous = self.end_node();
        let previous_position = self.nodes.get(&previous).map_or(position, |n| n.position);

        let node_id = self.allocate_node_id();
        let segment_id = self.allocate_segment_id();

        let mut node = PathNode::new(node_id, position);
        node.incoming = Some(segment_id);
        self.nodes.insert(node_id, node);
        if let Some(prev) = self.nodes.get_mut(&previous) {
            prev.outgoing = Some(segment_id);
        }
        self.segments.insert(
            segment_id,
            PathSegment {
                id: segment_id,
                previous,
                next: node_id,
                direction: SegmentDirection::Forward,
                shape: SegmentShape::new(
                    kind,
                    previous_position,
                    position,
                    self.quality,
                    &self.options,
                ),
                adapter: Adapter::new(),
            },
        );

        self.refresh_segment(segment_id);
        self.refresh_node(previous);
        self.refresh_node(node_id);
        self.rebuild_spatial_index();
        debug_assert!(self.chain_is_consistent());
        log::debug!("Node {} angehängt über {} ({:?})", node_id, segment_id, kind);
        (node_id, segment_id)
    }

    /// Teilt `after_segment` durch einen neuen Node bei `position`.
    ///
    /// Das geteilte Segment behält Art und Parameter (previous → neu),
    /// die Lücke (neu → next) füllt ein neues Segment gleicher Art und
    /// Richtung mit Standardparametern.
    pub fn insert_node(
        &mut self,
        after_segment: SegmentId,
        position: DVec2,
    ) -> Result<NodeId, PathError> {
        let segment = self
            .segments
            .get(&after_segment)
            .ok_or(PathError::UnknownSegment(after_segment))?;
        let previous = segment.previous;
        let next = segment.next;
        let kind = segment.shape.kind();
        let direction = segment.direction;
        let next_position = self
            .nodes
            .get(&next)
            .map(|n| n.position)
            .ok_or(PathError::UnknownNode(next))?;

        let node_id = self.allocate_node_id();
        let gap_id = self.allocate_segment_id();

        let mut node = PathNode::new(node_id, position);
        node.incoming = Some(after_segment);
        node.outgoing = Some(gap_id);
        self.nodes.insert(node_id, node);
        if let Some(next_node) = self.nodes.get_mut(&next) {
            next_node.incoming = Some(gap_id);
        }
        if let Some(segment) = self.segments.get_mut(&after_segment) {
            segment.next = node_id;
        }
        self.segments.insert(
            gap_id,
            PathSegment {
                id: gap_id,
                previous: node_id,
                next,
                direction,
                shape: SegmentShape::new(
                    kind,
                    position,
                    next_position,
                    self.quality,
                    &self.options,
                ),
                adapter: Adapter::new(),
            },
        );

        self.refresh_segment(after_segment);
        self.refresh_segment(gap_id);
        self.refresh_node(previous);
        self.refresh_node(node_id);
        self.refresh_node(next);
        self.rebuild_spatial_index();
        debug_assert!(self.chain_is_consistent());
        log::debug!(
            "Node {} in {} eingefügt, neues Segment {}",
            node_id,
            after_segment,
            gap_id
        );
        Ok(node_id)
    }

    /// Entfernt einen Node.
    ///
    /// Mittlerer Node: das eingehende Segment wird bis zum nächsten Node
    /// verlängert, das ausgehende entfällt (Bézier übernimmt dessen zweiten
    /// Anfasser). Endpunkt: das anhängende Segment entfällt.
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<(), PathError> {
        let node = self
            .nodes
            .get(&node_id)
            .ok_or(PathError::UnknownNode(node_id))?;
        if self.nodes.len() == 1 {
            return Err(PathError::LastNode(node_id));
        }
        let incoming = node.incoming;
        let outgoing = node.outgoing;

        match (incoming, outgoing) {
            (Some(inc), Some(out)) => {
                let removed = self
                    .segments
                    .remove(&out)
                    .ok_or(PathError::UnknownSegment(out))?;
                let next = removed.next;
                let inherited_offset = match &removed.shape {
                    SegmentShape::Bezier(b) => Some(b.control_offset(SegmentEnd::End)),
                    _ => None,
                };
                let previous = {
                    let segment = self
                        .segments
                        .get_mut(&inc)
                        .ok_or(PathError::UnknownSegment(inc))?;
                    segment.next = next;
                    if let (SegmentShape::Bezier(b), Some(offset)) =
                        (&mut segment.shape, inherited_offset)
                    {
                        b.set_control_offset(SegmentEnd::End, offset);
                    }
                    segment.previous
                };
                if let Some(next_node) = self.nodes.get_mut(&next) {
                    next_node.incoming = Some(inc);
                }
                self.nodes.remove(&node_id);
                self.refresh_segment(inc);
                self.refresh_node(previous);
                self.refresh_node(next);
            }
            (None, Some(out)) => {
                let removed = self
                    .segments
                    .remove(&out)
                    .ok_or(PathError::UnknownSegment(out))?;
                if let Some(next_node) = self.nodes.get_mut(&removed.next) {
                    next_node.incoming = None;
                }
                self.start_node = removed.next;
                self.nodes.remove(&node_id);
                self.refresh_node(removed.next);
            }
            (Some(inc), None) => {
                let removed = self
                    .segments
                    .remove(&inc)
                    .ok_or(PathError::UnknownSegment(inc))?;
                if let Some(prev_node) = self.nodes.get_mut(&removed.previous) {
                    prev_node.outgoing = None;
                }
                self.nodes.remove(&node_id);
                self.refresh_node(removed.previous);
            }
            (None, None) => return Err(PathError::LastNode(node_id)),
        }

        self.rebuild_spatial_index();
        debug_assert!(self.chain_is_consistent());
        log::debug!("Node {} entfernt", node_id);
        Ok(())
    }

    /// Verschiebt einen Node und propagiert genau eine Ebene weit:
    /// beide angrenzenden Segmente, dann der Node selbst und die Nachbar-Nodes.
    pub fn move_node(&mut self, node_id: NodeId, position: DVec2) -> Result<(), PathError> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(PathError::UnknownNode(node_id))?;
        node.position = position;
        let incoming = node.incoming;
        let outgoing = node.outgoing;

        let mut neighbors = Vec::with_capacity(2);
        if let Some(inc) = incoming {
            self.refresh_segment(inc);
            if let Some(s) = self.segments.get(&inc) {
                neighbors.push(s.previous);
            }
        }
        if let Some(out) = outgoing {
            self.refresh_segment(out);
            if let Some(s) = self.segments.get(&out) {
                neighbors.push(s.next);
            }
        }
        self.refresh_node(node_id);
        for neighbor in neighbors {
            self.refresh_node(neighbor);
        }
        self.rebuild_spatial_index();
        Ok(())
    }

    // ── Segment-Parameter ───────────────────────────────────────

    /// Wechselt die Segment-Art; alte Parameter werden verworfen.
    pub fn set_segment_shape(
        &mut self,
        segment_id: SegmentId,
        kind: SegmentKind,
    ) -> Result<(), PathError> {
        let (start, end) = self.segment_endpoints(segment_id)?;
        let segment = self
            .segments
            .get_mut(&segment_id)
            .ok_or(PathError::UnknownSegment(segment_id))?;
        if segment.shape.kind() == kind {
            return Ok(());
        }
        segment.shape = SegmentShape::new(kind, start, end, self.quality, &self.options);
        log::debug!("Segment {} → {:?}", segment_id, kind);
        self.refresh_segment_and_ends(segment_id);
        Ok(())
    }

    /// Setzt die Fahrtrichtung eines Segments.
    pub fn set_segment_direction(
        &mut self,
        segment_id: SegmentId,
        direction: SegmentDirection,
    ) -> Result<(), PathError> {
        let segment = self
            .segments
            .get_mut(&segment_id)
            .ok_or(PathError::UnknownSegment(segment_id))?;
        segment.direction = direction;
        self.refresh_segment_and_ends(segment_id);
        Ok(())
    }

    /// Setzt den Versatz eines Kreisbogens (geklemmt).
    pub fn set_arc_perp_distance(
        &mut self,
        segment_id: SegmentId,
        perp_distance: f64,
    ) -> Result<(), PathError> {
        let segment = self
            .segments
            .get_mut(&segment_id)
            .ok_or(PathError::UnknownSegment(segment_id))?;
        let SegmentShape::Arc(arc) = &mut segment.shape else {
            return Err(PathError::NotAnArc(segment_id));
        };
        arc.set_perp_distance(perp_distance, &self.options);
        self.refresh_segment_and_ends(segment_id);
        Ok(())
    }

    /// Setzt den Anfasser-Versatz einer Bézier-Kurve am gewünschten Ende.
    pub fn set_bezier_control_offset(
        &mut self,
        segment_id: SegmentId,
        end: SegmentEnd,
        offset: DVec2,
    ) -> Result<(), PathError> {
        let segment = self
            .segments
            .get_mut(&segment_id)
            .ok_or(PathError::UnknownSegment(segment_id))?;
        let SegmentShape::Bezier(bezier) = &mut segment.shape else {
            return Err(PathError::NotABezier(segment_id));
        };
        bezier.set_control_offset(end, offset);
        self.refresh_segment_and_ends(segment_id);
        Ok(())
    }

    // ── Interaktion ─────────────────────────────────────────────

    /// Schaltet auf schnelle Bézier-Abtastung (während eines Drags).
    pub fn begin_interaction(&mut self) {
        self.quality = SampleQuality::Fast;
    }

    /// Zurück zur präzisen Abtastung; alle Bézier-Segmente werden neu abgetastet.
    pub fn end_interaction(&mut self) {
        if self.quality == SampleQuality::Precise {
            return;
        }
        self.quality = SampleQuality::Precise;
        let beziers: Vec<SegmentId> = self
            .segments
            .values()
            .filter(|s| s.shape.kind() == SegmentKind::Bezier)
            .map(|s| s.id)
            .collect();
        for id in &beziers {
            self.refresh_segment(*id);
        }
        log::debug!("{} Bézier-Segmente präzise neu abgetastet", beziers.len());
    }

    // ── Interne Neuberechnung ───────────────────────────────────

    fn allocate_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    fn allocate_segment_id(&mut self) -> SegmentId {
        let id = SegmentId(self.next_segment_id);
        self.next_segment_id += 1;
        id
    }

    fn segment_endpoints(&self, segment_id: SegmentId) -> Result<(DVec2, DVec2), PathError> {
        let segment = self
            .segments
            .get(&segment_id)
            .ok_or(PathError::UnknownSegment(segment_id))?;
        let start = self
            .nodes
            .get(&segment.previous)
            .ok_or(PathError::UnknownNode(segment.previous))?;
        let end = self
            .nodes
            .get(&segment.next)
            .ok_or(PathError::UnknownNode(segment.next))?;
        Ok((start.position, end.position))
    }

    /// Form und Adapter eines Segments aus den aktuellen Node-Positionen.
    fn refresh_segment(&mut self, segment_id: SegmentId) {
        let Some(segment) = self.segments.get_mut(&segment_id) else {
            debug_assert!(false, "Segment {segment_id} fehlt");
            return;
        };
        let (Some(start), Some(end)) = (
            self.nodes.get(&segment.previous),
            self.nodes.get(&segment.next),
        ) else {
            debug_assert!(false, "Segment {segment_id} verweist auf fehlende Nodes");
            return;
        };
        segment
            .shape
            .update(start.position, end.position, self.quality, &self.options);
        segment
            .shape
            .write_adapter(&mut segment.adapter, segment.direction, &self.options);
    }

    fn refresh_segment_and_ends(&mut self, segment_id: SegmentId) {
        self.refresh_segment(segment_id);
        if let Some((previous, next)) = self
            .segments
            .get(&segment_id)
            .map(|s| (s.previous, s.next))
        {
            self.refresh_node(previous);
            self.refresh_node(next);
        }
    }

    /// Drehwinkel und Adapter eines Nodes aus den Tangenten der Nachbar-Segmente.
    fn refresh_node(&mut self, node_id: NodeId) {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            debug_assert!(false, "Node {node_id} fehlt");
            return;
        };
        let incoming = node
            .incoming
            .and_then(|s| self.segments.get(&s))
            .map(|s| s.shape.end_theta());
        let outgoing_segment = node.outgoing.and_then(|s| self.segments.get(&s));
        let outgoing = outgoing_segment.map(|s| s.shape.start_theta());
        let reversed = outgoing_segment.is_some_and(|s| s.direction == SegmentDirection::Reverse);

        node.turn_angles = match (incoming, outgoing) {
            (Some(theta1), Some(theta2)) => (theta1, theta2),
            (Some(theta), None) | (None, Some(theta)) => (theta, theta),
            (None, None) => (0.0, 0.0),
        };

        let (theta1, theta2) = node.turn_angles;
        let adapter = &mut node.adapter;
        adapter.clear();
        adapter.set(AdapterAttribute::X, node.position.x);
        adapter.set(AdapterAttribute::Y, node.position.y);
        adapter.set(AdapterAttribute::Theta1, theta1);
        adapter.set(AdapterAttribute::Theta2, theta2);
        adapter.set_icon(AdapterIcon::from_turn(
            delta_heading(theta1, theta2),
            self.options.turn_straight_tolerance,
            reversed,
        ));
    }

    fn refresh_all(&mut self) {
        let segment_ids: Vec<SegmentId> = self.segments.keys().copied().collect();
        for id in segment_ids {
            self.refresh_segment(id);
        }
        let node_ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for id in node_ids {
            self.refresh_node(id);
        }
    }

    fn rebuild_spatial_index(&mut self) {
        self.spatial_index =
            SpatialIndex::from_positions(self.nodes.values().map(|n| (n.id, n.position)));
    }
}
