//! Weighted routing: single-pair shortest path and nearest-match scan.
//!
//! Both queries run the same Dijkstra scan with an early-exit hook, so a
//! nearest-match search pays only for the region it actually explores.
//! Unreachability is an answer, not a failure: the scan reports `None` and
//! the caller decides what that means.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use ordered_float::OrderedFloat;
use petgraph::stable_graph::NodeIndex;
use tracing::trace;

use crate::error::Result;
use crate::types::{FacilityId, NearestMatch, WeightedPath};

use super::FacilityGraph;

impl<P> FacilityGraph<P> {
    /// Cheapest route between two facilities by total edge weight.
    ///
    /// Returns `Ok(None)` when the endpoints are in different components.
    /// A facility routed to itself yields the single-node path with weight
    /// zero. Among equal-weight routes the result is deterministic: the
    /// scan settles equal distances in arena order and keeps the first
    /// minimal predecessor it finds.
    ///
    /// Runs in O((V + E) log V).
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`](crate::Error::NodeNotFound) if either
    /// endpoint is undeclared.
    pub fn shortest_path(
        &self,
        source: &FacilityId,
        target: &FacilityId,
    ) -> Result<Option<WeightedPath>> {
        let (start, goal) = (self.index_of(source)?, self.index_of(target)?);
        if start == goal {
            return Ok(Some(WeightedPath {
                nodes: vec![source.clone()],
                total_weight: 0.0,
            }));
        }

        let (prev, hit) = self.dijkstra_scan(start, |settled| settled == goal);
        let Some((_, total_weight)) = hit else {
            trace!(%source, %target, "No route between facilities");
            return Ok(None);
        };
        let Some(indices) = unwind(&prev, start, goal) else {
            return Ok(None);
        };
        let nodes = indices
            .into_iter()
            .map(|index| self.id_of(index).clone())
            .collect();
        Ok(Some(WeightedPath {
            nodes,
            total_weight,
        }))
    }

    /// Closest facility (by route weight) satisfying a caller predicate,
    /// together with the route to it.
    ///
    /// The starting facility itself is never a candidate, so this answers
    /// "where is the nearest *other* depot with stock". Returns `Ok(None)`
    /// when no reachable facility matches. Equal-distance candidates
    /// resolve deterministically by scan settle order.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`](crate::Error::NodeNotFound) if `start` is
    /// undeclared.
    pub fn nearest_matching<F>(
        &self,
        start: &FacilityId,
        mut predicate: F,
    ) -> Result<Option<NearestMatch>>
    where
        F: FnMut(&FacilityId, &P) -> bool,
    {
        let origin = self.index_of(start)?;
        let (prev, hit) = self.dijkstra_scan(origin, |settled| {
            if settled == origin {
                return false;
            }
            let facility = &self.graph[settled];
            predicate(&facility.id, &facility.payload)
        });

        let Some((found, total_weight)) = hit else {
            return Ok(None);
        };
        let Some(indices) = unwind(&prev, origin, found) else {
            return Ok(None);
        };
        let nodes = indices
            .into_iter()
            .map(|index| self.id_of(index).clone())
            .collect();
        Ok(Some(NearestMatch {
            id: self.id_of(found).clone(),
            path: WeightedPath {
                nodes,
                total_weight,
            },
        }))
    }

    /// Dijkstra scan from `source`, stopping early when `stop` accepts a
    /// settled node.
    ///
    /// Returns the predecessor map and the accepted node with its settled
    /// distance, or `None` if the reachable region is exhausted first.
    /// Distances settle in nondecreasing order, so the first accepted node
    /// is a nearest one.
    fn dijkstra_scan(
        &self,
        source: NodeIndex,
        mut stop: impl FnMut(NodeIndex) -> bool,
    ) -> (HashMap<NodeIndex, NodeIndex>, Option<(NodeIndex, f64)>) {
        let mut dist: HashMap<NodeIndex, f64> = HashMap::new();
        let mut prev: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut heap = BinaryHeap::new();

        dist.insert(source, 0.0);
        heap.push(Reverse((OrderedFloat(0.0), source)));

        while let Some(Reverse((OrderedFloat(reached), node))) = heap.pop() {
            // Stale queue entry: the node was re-pushed with a better
            // distance after this entry was enqueued.
            if dist.get(&node).is_some_and(|&best| reached > best) {
                continue;
            }
            if stop(node) {
                return (prev, Some((node, reached)));
            }
            for (neighbor, weight) in self.sorted_neighbors(node) {
                let candidate = reached + weight;
                if dist.get(&neighbor).is_none_or(|&best| candidate < best) {
                    dist.insert(neighbor, candidate);
                    prev.insert(neighbor, node);
                    heap.push(Reverse((OrderedFloat(candidate), neighbor)));
                }
            }
        }
        (prev, None)
    }
}

/// Rebuild the source-to-target index path from a predecessor map.
fn unwind(
    prev: &HashMap<NodeIndex, NodeIndex>,
    source: NodeIndex,
    target: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let mut path = vec![target];
    let mut cursor = target;
    while cursor != source {
        cursor = *prev.get(&cursor)?;
        path.push(cursor);
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(value: usize) -> NodeIndex {
        NodeIndex::new(value)
    }

    #[test]
    fn unwind_rebuilds_path_in_source_to_target_order() {
        let prev = HashMap::from([(index(3), index(2)), (index(2), index(0))]);
        let path = unwind(&prev, index(0), index(3)).unwrap();
        assert_eq!(path, vec![index(0), index(2), index(3)]);
    }

    #[test]
    fn unwind_of_source_is_the_single_node() {
        let prev = HashMap::new();
        let path = unwind(&prev, index(7), index(7)).unwrap();
        assert_eq!(path, vec![index(7)]);
    }

    #[test]
    fn unwind_detects_broken_chain() {
        let prev = HashMap::from([(index(3), index(2))]);
        assert!(unwind(&prev, index(0), index(3)).is_none());
    }
}
