//! Order-of-visit traversal and network-shape queries.
//!
//! The breadth-first and depth-first walks are lazy iterators: each `next`
//! call settles exactly one facility, so a caller can stop early without
//! paying for the rest of the component. Neighbors are always expanded in
//! ascending-id order, which pins the full visit sequence for a given
//! graph state. Restarting a walk is just constructing a new iterator;
//! traversal never mutates the network.

use std::collections::{HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;

use crate::error::Result;
use crate::types::FacilityId;

use super::FacilityGraph;

/// Lazy breadth-first walk over one connected component.
///
/// Yields facilities in nondecreasing hop distance from the start, nearer
/// ids first within a hop ring.
pub struct BreadthFirst<'a, P> {
    network: &'a FacilityGraph<P>,
    queue: VecDeque<NodeIndex>,
    discovered: HashSet<NodeIndex>,
}

impl<'a, P> Iterator for BreadthFirst<'a, P> {
    type Item = &'a FacilityId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        for (neighbor, _) in self.network.sorted_neighbors(node) {
            if self.discovered.insert(neighbor) {
                self.queue.push_back(neighbor);
            }
        }
        Some(self.network.id_of(node))
    }
}

/// Lazy depth-first (preorder) walk over one connected component.
///
/// Follows the smallest-id unvisited neighbor as deep as it goes before
/// backtracking.
pub struct DepthFirst<'a, P> {
    network: &'a FacilityGraph<P>,
    stack: Vec<NodeIndex>,
    visited: HashSet<NodeIndex>,
}

impl<'a, P> Iterator for DepthFirst<'a, P> {
    type Item = &'a FacilityId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.stack.pop()?;
            // The stack may hold stale entries for facilities reached by a
            // deeper branch since they were pushed.
            if !self.visited.insert(node) {
                continue;
            }
            for (neighbor, _) in self.network.sorted_neighbors(node).into_iter().rev() {
                if !self.visited.contains(&neighbor) {
                    self.stack.push(neighbor);
                }
            }
            return Some(self.network.id_of(node));
        }
    }
}

impl<P> FacilityGraph<P> {
    /// Walk the component of `start` breadth-first.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`](crate::Error::NodeNotFound) if `start` is
    /// undeclared.
    pub fn breadth_first(&self, start: &FacilityId) -> Result<BreadthFirst<'_, P>> {
        let origin = self.index_of(start)?;
        Ok(BreadthFirst {
            network: self,
            queue: VecDeque::from([origin]),
            discovered: HashSet::from([origin]),
        })
    }

    /// Walk the component of `start` depth-first, preorder.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`](crate::Error::NodeNotFound) if `start` is
    /// undeclared.
    pub fn depth_first(&self, start: &FacilityId) -> Result<DepthFirst<'_, P>> {
        let origin = self.index_of(start)?;
        Ok(DepthFirst {
            network: self,
            stack: vec![origin],
            visited: HashSet::new(),
        })
    }

    /// True when any component contains a cycle.
    ///
    /// An edge reaching an already-seen facility closes a cycle unless it
    /// leads straight back to the facility we arrived from. Skipping only
    /// the arrival edge is sound because each pair holds at most one
    /// connection.
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        for &start in self.ids.values() {
            if visited.contains(&start) {
                continue;
            }
            let mut stack: Vec<(NodeIndex, Option<NodeIndex>)> = vec![(start, None)];
            visited.insert(start);
            while let Some((node, arrived_from)) = stack.pop() {
                for (neighbor, _) in self.sorted_neighbors(node) {
                    if Some(neighbor) == arrived_from {
                        continue;
                    }
                    if !visited.insert(neighbor) {
                        return true;
                    }
                    stack.push((neighbor, Some(node)));
                }
            }
        }
        false
    }

    /// Connected components as sorted member lists, ordered by each
    /// component's smallest id.
    #[must_use]
    pub fn connected_components(&self) -> Vec<Vec<FacilityId>> {
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut components = Vec::new();
        for &start in self.ids.values() {
            if visited.contains(&start) {
                continue;
            }
            let mut members = Vec::new();
            let mut queue = VecDeque::from([start]);
            visited.insert(start);
            while let Some(node) = queue.pop_front() {
                members.push(self.id_of(node).clone());
                for (neighbor, _) in self.sorted_neighbors(node) {
                    if visited.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
            members.sort();
            components.push(members);
        }
        components
    }

    /// True when every facility can reach every other. Vacuously true for
    /// the empty and single-facility networks.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let Some(&start) = self.ids.values().next() else {
            return true;
        };
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for (neighbor, _) in self.sorted_neighbors(node) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        visited.len() == self.ids.len()
    }

    /// Fraction of possible connections present, in `[0, 1]`. Zero for
    /// networks with fewer than two facilities.
    #[must_use]
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n <= 1 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let possible = (n * (n - 1)) as f64 / 2.0;
        #[allow(clippy::cast_precision_loss)]
        let actual = self.edge_count() as f64;
        actual / possible
    }
}
