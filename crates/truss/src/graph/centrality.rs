//! Betweenness centrality via Brandes' accumulation.
//!
//! Path counting is hop-based: every connection counts as one hop and edge
//! weights are ignored, so "shortest" here means fewest connections. That
//! makes a facility's score a pure topology measure (how often it sits on
//! fewest-hop routes between other facilities), independent of how the
//! routes are weighted. One BFS plus one dependency accumulation per
//! source, O(V * E) overall.

use std::collections::{BTreeMap, HashMap, VecDeque};

use tracing::debug;

use crate::types::FacilityId;

use super::FacilityGraph;

impl<P> FacilityGraph<P> {
    /// Raw betweenness scores: for each facility, the number of
    /// fewest-hop routes between other facility pairs passing through it,
    /// counted fractionally when a pair has several such routes.
    ///
    /// Each unordered pair is counted once. The center of a star with `k`
    /// leaves scores `k * (k - 1) / 2`; every leaf scores zero.
    #[must_use]
    pub fn betweenness_centrality_raw(&self) -> BTreeMap<FacilityId, f64> {
        let order = self.ordered_indices();
        let n = order.len();
        let slot: HashMap<_, usize> = order
            .iter()
            .enumerate()
            .map(|(i, &node)| (node, i))
            .collect();
        let adjacency: Vec<Vec<usize>> = order
            .iter()
            .map(|&node| {
                self.sorted_neighbors(node)
                    .into_iter()
                    .filter_map(|(neighbor, _)| slot.get(&neighbor).copied())
                    .collect()
            })
            .collect();

        let mut score = vec![0.0_f64; n];
        for source in 0..n {
            // Forward sweep: BFS recording, for every reached facility,
            // its hop distance, its fewest-hop route count (sigma), and
            // the predecessors those routes arrive through.
            let mut settled: Vec<usize> = Vec::with_capacity(n);
            let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
            let mut sigma = vec![0.0_f64; n];
            let mut hops = vec![-1_i64; n];
            let mut queue = VecDeque::new();

            sigma[source] = 1.0;
            hops[source] = 0;
            queue.push_back(source);
            while let Some(v) = queue.pop_front() {
                settled.push(v);
                for &w in &adjacency[v] {
                    if hops[w] < 0 {
                        hops[w] = hops[v] + 1;
                        queue.push_back(w);
                    }
                    if hops[w] == hops[v] + 1 {
                        sigma[w] += sigma[v];
                        preds[w].push(v);
                    }
                }
            }

            // Backward sweep: walk the settle order in reverse, pushing
            // each facility's dependency back onto its predecessors.
            let mut delta = vec![0.0_f64; n];
            for &w in settled.iter().rev() {
                for &v in &preds[w] {
                    delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
                }
                if w != source {
                    score[w] += delta[w];
                }
            }
        }

        // Running every facility as a source counts each unordered pair
        // from both endpoints.
        for value in &mut score {
            *value /= 2.0;
        }

        debug!(nodes = n, "Computed betweenness centrality");
        self.ids
            .keys()
            .cloned()
            .zip(score)
            .collect()
    }

    /// Betweenness normalized to `[0, 1]` by the number of facility pairs
    /// excluding the scored one, `(n - 1) * (n - 2) / 2`.
    ///
    /// With two or fewer facilities no pair can route through a third, so
    /// the raw zeros are returned as-is.
    #[must_use]
    pub fn betweenness_centrality(&self) -> BTreeMap<FacilityId, f64> {
        let mut scores = self.betweenness_centrality_raw();
        let n = self.node_count();
        if n > 2 {
            #[allow(clippy::cast_precision_loss)]
            let pairs = ((n - 1) * (n - 2)) as f64 / 2.0;
            for value in scores.values_mut() {
                *value /= pairs;
            }
        }
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(ids: &[&str]) -> FacilityGraph<()> {
        let mut network = FacilityGraph::new();
        for id in ids {
            network.add_node(FacilityId::new(*id), ()).unwrap();
        }
        for pair in ids.windows(2) {
            network
                .add_edge(&pair[0].into(), &pair[1].into(), 1.0, None)
                .unwrap();
        }
        network
    }

    #[test]
    fn middle_of_a_chain_carries_the_crossing_pair() {
        let scores = chain(&["a", "b", "c"]).betweenness_centrality_raw();
        assert_eq!(scores[&"a".into()], 0.0);
        assert_eq!(scores[&"b".into()], 1.0);
        assert_eq!(scores[&"c".into()], 0.0);
    }

    #[test]
    fn triangle_has_no_intermediaries() {
        let mut network = chain(&["a", "b", "c"]);
        network.add_edge(&"a".into(), &"c".into(), 1.0, None).unwrap();
        let scores = network.betweenness_centrality_raw();
        assert!(scores.values().all(|&s| s == 0.0));
    }

    #[test]
    fn normalization_divides_by_pair_count() {
        // Four-facility chain: b sits on (a,c) and (a,d), c on (a,d) and
        // (b,d). Raw 2.0 each, three pairs exclude the scored facility.
        let scores = chain(&["a", "b", "c", "d"]).betweenness_centrality();
        assert!((scores[&"b".into()] - 2.0 / 3.0).abs() < 1e-9);
        assert!((scores[&"c".into()] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_network_scores_nothing() {
        let scores = FacilityGraph::<()>::new().betweenness_centrality();
        assert!(scores.is_empty());
    }
}
