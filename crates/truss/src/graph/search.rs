//! Longest simple path by exhaustive backtracking.
//!
//! Longest path is NP-hard, so this search enumerates every simple route
//! between the endpoints and is exponential in the worst case. It is meant
//! for small networks or bounded runs: the caller can supply a cancel
//! callback, polled once per facility expansion, and a cancelled search
//! still reports the best route it had found along with a flag saying the
//! enumeration was cut short.

use std::collections::HashSet;

use petgraph::stable_graph::NodeIndex;
use tracing::debug;

use crate::error::Result;
use crate::types::{FacilityId, PathSearch, WeightedPath};

use super::FacilityGraph;

/// Backtracking state for one search. `current` mirrors the recursion
/// stack; `visited` enforces simplicity.
struct LongestSearch<'g, P, C> {
    network: &'g FacilityGraph<P>,
    goal: NodeIndex,
    visited: HashSet<NodeIndex>,
    current: Vec<NodeIndex>,
    best: Option<(Vec<NodeIndex>, f64)>,
    cancel: C,
}

impl<P, C: FnMut() -> bool> LongestSearch<'_, P, C> {
    /// Extend the current route through `node`. Returns false as soon as
    /// the cancel callback fires; the partial best stays recorded.
    fn explore(&mut self, node: NodeIndex, weight: f64) -> bool {
        if (self.cancel)() {
            return false;
        }
        self.visited.insert(node);
        self.current.push(node);

        if node == self.goal {
            // A simple route ending at the goal cannot pass through it,
            // so there is nothing to extend here.
            if self.best.as_ref().is_none_or(|(_, best)| weight > *best) {
                self.best = Some((self.current.clone(), weight));
            }
        } else {
            for (neighbor, step) in self.network.sorted_neighbors(node) {
                if !self.visited.contains(&neighbor)
                    && !self.explore(neighbor, weight + step)
                {
                    return false;
                }
            }
        }

        self.current.pop();
        self.visited.remove(&node);
        true
    }
}

impl<P> FacilityGraph<P> {
    /// Heaviest simple route between two facilities, trying every simple
    /// route via backtracking.
    ///
    /// `Ok(None)` when the endpoints are disconnected. The route from a
    /// facility to itself is the single-node route with weight zero. Among
    /// equal-weight routes the first one found in ascending-neighbor
    /// exploration order wins.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`](crate::Error::NodeNotFound) if either
    /// endpoint is undeclared.
    pub fn longest_simple_path(
        &self,
        source: &FacilityId,
        target: &FacilityId,
    ) -> Result<Option<WeightedPath>> {
        Ok(self
            .longest_simple_path_with(source, target, || false)?
            .best)
    }

    /// [`longest_simple_path`](Self::longest_simple_path) with a cancel
    /// callback, polled once per facility expansion.
    ///
    /// When the callback returns true the search stops where it is and
    /// reports [`PathSearch`] with `exhausted: false` and whatever best
    /// route had been recorded, possibly none. A completed search always
    /// has `exhausted: true`.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`](crate::Error::NodeNotFound) if either
    /// endpoint is undeclared.
    pub fn longest_simple_path_with(
        &self,
        source: &FacilityId,
        target: &FacilityId,
        cancel: impl FnMut() -> bool,
    ) -> Result<PathSearch> {
        let (start, goal) = (self.index_of(source)?, self.index_of(target)?);
        if start == goal {
            return Ok(PathSearch {
                best: Some(WeightedPath {
                    nodes: vec![source.clone()],
                    total_weight: 0.0,
                }),
                exhausted: true,
            });
        }

        let mut search = LongestSearch {
            network: self,
            goal,
            visited: HashSet::new(),
            current: Vec::new(),
            best: None,
            cancel,
        };
        let exhausted = search.explore(start, 0.0);
        if !exhausted {
            debug!(%source, %target, "Longest-route search cancelled");
        }
        let best = search.best.map(|(indices, total_weight)| WeightedPath {
            nodes: indices
                .into_iter()
                .map(|index| self.id_of(index).clone())
                .collect(),
            total_weight,
        });
        Ok(PathSearch { best, exhausted })
    }
}
