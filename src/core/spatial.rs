//! Spatial-Index (KD-Tree) für das Picken von Path-Nodes.

use glam::DVec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::path::NodeId;

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// ID des gefundenen Nodes
    pub node_id: NodeId,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

/// Read-only Spatial-Index über allen Nodes eines Pfads.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    node_ids: Vec<NodeId>,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            node_ids: Vec::new(),
        }
    }

    /// Baut einen neuen Index aus `(id, position)`-Paaren.
    pub fn from_positions(positions: impl IntoIterator<Item = (NodeId, DVec2)>) -> Self {
        let mut entries: Vec<(NodeId, DVec2)> = positions.into_iter().collect();
        entries.sort_unstable_by_key(|(id, _)| *id);

        let points: Vec<[f64; 2]> = entries.iter().map(|(_, p)| [p.x, p.y]).collect();
        let tree: KdTree<f64, 2> = (&points).into();
        let node_ids = entries.into_iter().map(|(id, _)| id).collect();

        Self { tree, node_ids }
    }

    /// Gibt die Anzahl indexierter Nodes zurück.
    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    /// Gibt `true` zurück, wenn keine Nodes im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Findet den nächsten Node zur gegebenen Feldposition.
    pub fn nearest(&self, query: DVec2) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self.tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        let node_id = *self.node_ids.get(result.item as usize)?;

        Some(SpatialMatch {
            node_id,
            distance: result.distance.sqrt(),
        })
    }

    /// Findet alle Nodes innerhalb eines Radius, nach Distanz sortiert.
    pub fn within_radius(&self, query: DVec2, radius: f64) -> Vec<SpatialMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&[query.x, query.y], radius * radius)
            .into_iter()
            .filter_map(|entry| {
                let node_id = *self.node_ids.get(entry.item as usize)?;
                Some(SpatialMatch {
                    node_id,
                    distance: entry.distance.sqrt(),
                })
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> SpatialIndex {
        SpatialIndex::from_positions([
            (NodeId(1), DVec2::new(0.0, 0.0)),
            (NodeId(2), DVec2::new(10.0, 0.0)),
            (NodeId(3), DVec2::new(4.0, 3.0)),
        ])
    }

    #[test]
    fn nearest_returns_expected_node() {
        let index = sample_index();
        let nearest = index
            .nearest(DVec2::new(3.9, 2.9))
            .expect("Treffer erwartet");

        assert_eq!(nearest.node_id, NodeId(3));
        assert!(nearest.distance < 0.2);
    }

    #[test]
    fn radius_query_returns_sorted_matches() {
        let index = sample_index();
        let matches = index.within_radius(DVec2::new(0.0, 0.0), 6.0);

        let ids: Vec<NodeId> = matches.into_iter().map(|m| m.node_id).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(3)]);
    }

    #[test]
    fn empty_index_has_no_entries() {
        let index = SpatialIndex::empty();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.nearest(DVec2::new(0.0, 0.0)).is_none());
    }
}
