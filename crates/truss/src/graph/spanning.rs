//! Minimum spanning forests via Kruskal and Prim.
//!
//! Both algorithms handle disconnected networks by producing one tree per
//! connected component; an isolated facility is a single-member tree with
//! no edges. The two forests always agree on total weight and on component
//! membership, though with equal-weight edges they may select different
//! edge sets. Trees are ordered by their smallest member id and members
//! are listed ascending, so output depends only on graph state.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use ordered_float::OrderedFloat;
use petgraph::stable_graph::NodeIndex;

use crate::types::{FacilityId, SpanningEdge, SpanningForest, SpanningTree};

use super::FacilityGraph;

impl<P> FacilityGraph<P> {
    /// Minimum spanning forest by Kruskal's algorithm.
    ///
    /// Candidate edges are taken in ascending weight order (equal weights
    /// fall back to endpoint-id order) and joined through a union-find,
    /// O(E log E) overall.
    #[must_use]
    pub fn minimum_spanning_forest_kruskal(&self) -> SpanningForest {
        let order = self.ordered_indices();
        let n = order.len();
        let slot: HashMap<NodeIndex, usize> = order
            .iter()
            .enumerate()
            .map(|(i, &node)| (node, i))
            .collect();

        // One entry per edge, endpoints as ascending-id slots. The scan
        // visits facilities and neighbors in id order, so equal-weight
        // candidates keep (a, b) order through the stable sort.
        let mut candidates: Vec<(f64, usize, usize)> = Vec::with_capacity(self.edge_count());
        for (i, &node) in order.iter().enumerate() {
            for (neighbor, weight) in self.sorted_neighbors(node) {
                if let Some(&j) = slot.get(&neighbor)
                    && j > i
                {
                    candidates.push((weight, i, j));
                }
            }
        }
        candidates.sort_by(|x, y| x.0.total_cmp(&y.0));

        let mut components = UnionFind::new(n);
        let mut picked: Vec<(usize, usize, f64)> = Vec::new();
        for (weight, i, j) in candidates {
            if components.union(i, j) {
                picked.push((i, j, weight));
                if picked.len() + 1 == n {
                    break;
                }
            }
        }

        // Group members and picked edges by component root. Scanning slots
        // ascending means each tree is created at its smallest member, so
        // the forest comes out ordered without an extra sort.
        let mut tree_of_root: HashMap<usize, usize> = HashMap::new();
        let mut trees: Vec<SpanningTree> = Vec::new();
        for (i, &node) in order.iter().enumerate() {
            let root = components.find(i);
            let at = *tree_of_root.entry(root).or_insert_with(|| {
                trees.push(SpanningTree {
                    members: Vec::new(),
                    edges: Vec::new(),
                    weight: 0.0,
                });
                trees.len() - 1
            });
            trees[at].members.push(self.id_of(node).clone());
        }
        for (i, j, weight) in picked {
            let root = components.find(i);
            if let Some(&at) = tree_of_root.get(&root) {
                trees[at].edges.push(SpanningEdge::new(
                    self.id_of(order[i]).clone(),
                    self.id_of(order[j]).clone(),
                    weight,
                ));
                trees[at].weight += weight;
            }
        }
        SpanningForest { trees }
    }

    /// Minimum spanning forest by Prim's algorithm.
    ///
    /// Each component is grown from its lexicographically smallest
    /// facility id, pulling the cheapest frontier edge from a priority
    /// queue, O(E log V) overall.
    #[must_use]
    pub fn minimum_spanning_forest_prim(&self) -> SpanningForest {
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut trees = Vec::new();
        // Ascending-id scan: the first unvisited facility is the smallest
        // member of its component and becomes that tree's growth root.
        for &root in self.ids.values() {
            if visited.contains(&root) {
                continue;
            }
            trees.push(self.prim_tree(root, &mut visited));
        }
        SpanningForest { trees }
    }

    fn prim_tree(&self, root: NodeIndex, visited: &mut HashSet<NodeIndex>) -> SpanningTree {
        let mut reached = vec![root];
        let mut edges = Vec::new();
        let mut total = 0.0;
        let mut frontier: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeIndex, NodeIndex)>> =
            BinaryHeap::new();

        visited.insert(root);
        for (neighbor, weight) in self.sorted_neighbors(root) {
            frontier.push(Reverse((OrderedFloat(weight), neighbor, root)));
        }
        while let Some(Reverse((OrderedFloat(weight), to, from))) = frontier.pop() {
            // A frontier entry may point at a facility pulled in through a
            // cheaper edge since it was queued.
            if !visited.insert(to) {
                continue;
            }
            edges.push(SpanningEdge::new(
                self.id_of(from).clone(),
                self.id_of(to).clone(),
                weight,
            ));
            total += weight;
            reached.push(to);
            for (neighbor, weight) in self.sorted_neighbors(to) {
                if !visited.contains(&neighbor) {
                    frontier.push(Reverse((OrderedFloat(weight), neighbor, to)));
                }
            }
        }

        let mut members: Vec<FacilityId> = reached
            .into_iter()
            .map(|node| self.id_of(node).clone())
            .collect();
        members.sort();
        SpanningTree {
            members,
            edges,
            weight: total,
        }
    }
}

/// Disjoint-set forest with path halving and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Representative of `x`'s set. Halves the path as it walks, keeping
    /// later finds near-constant.
    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets holding `a` and `b`. False when they already share
    /// a set, which is exactly the cycle test Kruskal needs.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}
