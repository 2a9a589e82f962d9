//! All-pairs shortest distances via Floyd-Warshall.
//!
//! The matrix is a dense row-major `Vec<f64>` over the facilities in
//! ascending-id order, with `f64::INFINITY` as the internal no-route
//! sentinel. The sentinel never escapes: the public surface answers in
//! `Option<f64>`, where `None` covers both an unknown id and an
//! unreachable pair. Intended for small networks; the solve is O(V^3)
//! time and O(V^2) memory.

use std::collections::HashMap;

use tracing::debug;

use crate::types::FacilityId;

use super::FacilityGraph;

/// Snapshot of shortest-path distances between every facility pair.
///
/// Produced by [`FacilityGraph::all_pairs_shortest_paths`]; detached from
/// the graph, so later mutations do not invalidate it.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    /// Facilities covered by the snapshot, ascending.
    ids: Vec<FacilityId>,
    /// Id to row/column position.
    index: HashMap<FacilityId, usize>,
    /// Row-major `n * n` distances, `INFINITY` where no route exists.
    dist: Vec<f64>,
}

impl DistanceMatrix {
    /// Shortest-route weight between two facilities.
    ///
    /// `None` when either id is not in the snapshot or when no route
    /// connects the pair. Callers that need to tell the cases apart can
    /// consult [`ids`](Self::ids) first. The distance from a facility to
    /// itself is `Some(0.0)`.
    #[must_use]
    pub fn distance(&self, a: &FacilityId, b: &FacilityId) -> Option<f64> {
        let (&i, &j) = (self.index.get(a)?, self.index.get(b)?);
        let d = self.dist[i * self.ids.len() + j];
        d.is_finite().then_some(d)
    }

    /// Largest finite shortest-route weight between any two distinct
    /// facilities, ignoring disconnected pairs.
    ///
    /// `None` when the snapshot holds fewer than two facilities or no two
    /// of them are connected.
    #[must_use]
    pub fn diameter(&self) -> Option<f64> {
        let n = self.ids.len();
        let mut widest: Option<f64> = None;
        for i in 0..n {
            for j in (i + 1)..n {
                let d = self.dist[i * n + j];
                if d.is_finite() && widest.is_none_or(|w| d > w) {
                    widest = Some(d);
                }
            }
        }
        widest
    }

    /// Facilities covered by the snapshot, ascending by id.
    #[must_use]
    pub fn ids(&self) -> &[FacilityId] {
        &self.ids
    }

    /// Number of facilities in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when the snapshot covers no facilities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<P> FacilityGraph<P> {
    /// Solve shortest-path distances between every pair of facilities.
    ///
    /// O(V^3); prefer [`shortest_path`](Self::shortest_path) when only a
    /// few pairs matter.
    #[must_use]
    pub fn all_pairs_shortest_paths(&self) -> DistanceMatrix {
        let ids: Vec<FacilityId> = self.ids.keys().cloned().collect();
        let n = ids.len();
        let index: HashMap<FacilityId, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let positions: HashMap<_, usize> = self
            .ids
            .values()
            .enumerate()
            .map(|(i, &node)| (node, i))
            .collect();

        let mut dist = vec![f64::INFINITY; n * n];
        for i in 0..n {
            dist[i * n + i] = 0.0;
        }
        for (i, &node) in self.ids.values().enumerate() {
            for (neighbor, weight) in self.sorted_neighbors(node) {
                if let Some(&j) = positions.get(&neighbor) {
                    dist[i * n + j] = weight;
                    dist[j * n + i] = weight;
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let through_k = dist[i * n + k];
                if !through_k.is_finite() {
                    continue;
                }
                for j in 0..n {
                    let relayed = through_k + dist[k * n + j];
                    if relayed < dist[i * n + j] {
                        dist[i * n + j] = relayed;
                    }
                }
            }
        }

        debug!(
            nodes = n,
            edges = self.edge_count(),
            "Computed all-pairs distance matrix"
        );
        DistanceMatrix { ids, index, dist }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> FacilityGraph<()> {
        // a - b - c, plus isolated d
        let mut network = FacilityGraph::new();
        for id in ["a", "b", "c", "d"] {
            network.add_node(FacilityId::new(id), ()).unwrap();
        }
        network.add_edge(&"a".into(), &"b".into(), 2.0, None).unwrap();
        network.add_edge(&"b".into(), &"c".into(), 3.0, None).unwrap();
        network
    }

    #[test]
    fn relays_through_intermediate_nodes() {
        let matrix = line().all_pairs_shortest_paths();
        assert_eq!(matrix.distance(&"a".into(), &"c".into()), Some(5.0));
        assert_eq!(matrix.distance(&"c".into(), &"a".into()), Some(5.0));
    }

    #[test]
    fn self_distance_is_zero() {
        let matrix = line().all_pairs_shortest_paths();
        assert_eq!(matrix.distance(&"d".into(), &"d".into()), Some(0.0));
    }

    #[test]
    fn unreachable_and_unknown_are_none() {
        let matrix = line().all_pairs_shortest_paths();
        assert_eq!(matrix.distance(&"a".into(), &"d".into()), None);
        assert_eq!(matrix.distance(&"a".into(), &"nope".into()), None);
    }

    #[test]
    fn diameter_ignores_disconnected_pairs() {
        let matrix = line().all_pairs_shortest_paths();
        assert_eq!(matrix.diameter(), Some(5.0));
    }

    #[test]
    fn empty_matrix_has_no_diameter() {
        let matrix = FacilityGraph::<()>::new().all_pairs_shortest_paths();
        assert!(matrix.is_empty());
        assert_eq!(matrix.diameter(), None);
    }
}
