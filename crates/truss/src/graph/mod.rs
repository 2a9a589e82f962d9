//! Core facility-network graph: storage, mutation, and accessors.
//!
//! # Architecture
//!
//! The network is stored in two cooperating structures:
//! - `StableUnGraph<Facility<P>, Connection>` - the node/edge arena. Stable
//!   indices survive removals, and removing a node drops its incident edges
//!   in the same call, so the adjacency can never dangle.
//! - `BTreeMap<FacilityId, NodeIndex>` - the id index mapping external keys
//!   to arena indices. Every node in the arena has exactly one entry here.
//!
//! The graph is strictly undirected: one stored edge per unordered pair,
//! visible from both endpoints with the same weight. Nodes must be declared
//! before edges may reference them; nothing is auto-created.
//!
//! ## Determinism
//!
//! The ordered id index gives ascending-id iteration everywhere a scan order
//! is observable: traversal orders, record export, matrix and forest layouts.
//! Priority-queue ties inside the algorithms are broken by arena insertion
//! order. Given the same sequence of mutations, every query is a pure
//! function of graph state.
//!
//! # Performance Characteristics
//!
//! - Mutations: O(log V) id lookup plus O(1) arena work (O(deg) for node
//!   removal).
//! - Neighbor listing: O(deg log deg) due to the ascending-id sort.
//! - Algorithm costs are documented on each query method; the all-pairs
//!   matrix and the longest-path search are intended for small networks.

mod centrality;
mod matrix;
mod route;
mod search;
mod spanning;
mod traversal;

pub use matrix::DistanceMatrix;
pub use traversal::{BreadthFirst, DepthFirst};

use std::collections::BTreeMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::types::{Connection, EdgeRecord, FacilityId, NodeRecord};

/// Node weight stored in the arena: the external id plus the caller payload.
#[derive(Debug, Clone)]
struct Facility<P> {
    id: FacilityId,
    payload: P,
}

/// A weighted undirected network of facilities.
///
/// Nodes carry a stable external [`FacilityId`] and an opaque payload `P`
/// that the engine never interprets. Edges carry a finite non-negative
/// weight and an optional label. All mutations are atomic: validation
/// completes before any state changes, so a returned [`Error`] guarantees
/// the graph is untouched.
#[derive(Debug, Clone)]
pub struct FacilityGraph<P> {
    /// Arena of nodes and undirected connections.
    graph: StableUnGraph<Facility<P>, Connection>,
    /// External id to arena index. Ordered, so iteration is ascending by id.
    ids: BTreeMap<FacilityId, NodeIndex>,
}

impl<P> Default for FacilityGraph<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> FacilityGraph<P> {
    /// Create an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: StableUnGraph::default(),
            ids: BTreeMap::new(),
        }
    }

    /// Build a network from caller-supplied node and edge records.
    ///
    /// Records are applied in order with full validation, so edge records
    /// may only reference nodes declared in `nodes`.
    ///
    /// # Errors
    ///
    /// Any failure [`add_node`](Self::add_node) or
    /// [`add_edge`](Self::add_edge) can produce, for the first offending
    /// record.
    pub fn from_records<N, E>(nodes: N, edges: E) -> Result<Self>
    where
        N: IntoIterator<Item = NodeRecord<P>>,
        E: IntoIterator<Item = EdgeRecord>,
    {
        let mut network = Self::new();
        for node in nodes {
            network.add_node(node.id, node.payload)?;
        }
        for edge in edges {
            network.add_edge(&edge.a, &edge.b, edge.weight, edge.label)?;
        }
        debug!(
            nodes = network.node_count(),
            edges = network.edge_count(),
            "Built facility network from records"
        );
        Ok(network)
    }

    // === Mutation ===

    /// Declare a new facility.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateNode`] if the id is already declared. Re-declaring
    /// is never a silent overwrite; callers that want no-op semantics can
    /// match on the variant.
    pub fn add_node(&mut self, id: FacilityId, payload: P) -> Result<()> {
        if self.ids.contains_key(&id) {
            return Err(Error::DuplicateNode(id));
        }
        let index = self.graph.add_node(Facility {
            id: id.clone(),
            payload,
        });
        self.ids.insert(id, index);
        Ok(())
    }

    /// Remove a facility and every connection incident to it, returning the
    /// payload.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`] if the id is not declared.
    pub fn remove_node(&mut self, id: &FacilityId) -> Result<P> {
        let index = self.index_of(id)?;
        let dropped_edges = self.graph.edges(index).count();
        let facility = self
            .graph
            .remove_node(index)
            .ok_or_else(|| Error::NodeNotFound(id.clone()))?;
        self.ids.remove(id);
        trace!(%id, dropped_edges, "Removed facility");
        Ok(facility.payload)
    }

    /// Connect two facilities with a weighted, optionally labeled edge.
    ///
    /// The connection is undirected: afterwards each endpoint lists the
    /// other among its neighbors with the same weight.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeNotFound`] if either endpoint is undeclared.
    /// - [`Error::SelfLoop`] if `a == b`.
    /// - [`Error::InvalidWeight`] if `weight` is negative or non-finite.
    /// - [`Error::DuplicateEdge`] if the pair is already connected.
    pub fn add_edge(
        &mut self,
        a: &FacilityId,
        b: &FacilityId,
        weight: f64,
        label: Option<String>,
    ) -> Result<()> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);
        if a == b {
            return Err(Error::SelfLoop(a.clone()));
        }
        validate_weight(a, b, weight)?;
        if self.graph.find_edge(ia, ib).is_some() {
            return Err(Error::DuplicateEdge(a.clone(), b.clone()));
        }
        self.graph.add_edge(ia, ib, Connection { weight, label });
        Ok(())
    }

    /// Disconnect two facilities, returning the removed connection data.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeNotFound`] if either endpoint is undeclared.
    /// - [`Error::SelfLoop`] if `a == b`.
    /// - [`Error::EdgeNotFound`] if the pair is not connected.
    pub fn remove_edge(&mut self, a: &FacilityId, b: &FacilityId) -> Result<Connection> {
        let edge = self.edge_between(a, b)?;
        self.graph
            .remove_edge(edge)
            .ok_or_else(|| Error::EdgeNotFound(a.clone(), b.clone()))
    }

    /// Change the weight of an existing connection in place. The label is
    /// preserved.
    ///
    /// # Errors
    ///
    /// Same validation as [`add_edge`](Self::add_edge), except that the
    /// connection must already exist ([`Error::EdgeNotFound`] otherwise).
    pub fn update_edge_weight(
        &mut self,
        a: &FacilityId,
        b: &FacilityId,
        new_weight: f64,
    ) -> Result<()> {
        let edge = self.edge_between(a, b)?;
        validate_weight(a, b, new_weight)?;
        let connection = self
            .graph
            .edge_weight_mut(edge)
            .ok_or_else(|| Error::EdgeNotFound(a.clone(), b.clone()))?;
        connection.weight = new_weight;
        Ok(())
    }

    // === Accessors ===

    /// Number of declared facilities.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of connections.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when no facilities are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True when a facility with this id is declared.
    #[must_use]
    pub fn contains_node(&self, id: &FacilityId) -> bool {
        self.ids.contains_key(id)
    }

    /// True when the two facilities are directly connected. Unknown ids are
    /// simply not connected.
    #[must_use]
    pub fn contains_edge(&self, a: &FacilityId, b: &FacilityId) -> bool {
        match (self.ids.get(a), self.ids.get(b)) {
            (Some(&ia), Some(&ib)) => self.graph.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    /// Borrow a facility's payload.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`] if the id is not declared.
    pub fn payload(&self, id: &FacilityId) -> Result<&P> {
        let index = self.index_of(id)?;
        Ok(&self.graph[index].payload)
    }

    /// Mutably borrow a facility's payload for in-place updates.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`] if the id is not declared.
    pub fn payload_mut(&mut self, id: &FacilityId) -> Result<&mut P> {
        let index = self.index_of(id)?;
        Ok(&mut self.graph[index].payload)
    }

    /// Iterate all facility ids in ascending order.
    pub fn facility_ids(&self) -> impl Iterator<Item = &FacilityId> {
        self.ids.keys()
    }

    /// List a facility's neighbors with their connection data, ascending by
    /// neighbor id.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`] if the id is not declared.
    pub fn neighbors(&self, id: &FacilityId) -> Result<Vec<(&FacilityId, &Connection)>> {
        let index = self.index_of(id)?;
        let mut adjacent: Vec<(&FacilityId, &Connection)> = self
            .graph
            .edges(index)
            .map(|edge| (self.id_of(edge.target()), edge.weight()))
            .collect();
        adjacent.sort_by(|x, y| x.0.cmp(y.0));
        Ok(adjacent)
    }

    /// Number of connections incident to a facility.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`] if the id is not declared.
    pub fn degree(&self, id: &FacilityId) -> Result<usize> {
        let index = self.index_of(id)?;
        Ok(self.graph.edges(index).count())
    }

    /// Borrow the connection data between two facilities.
    ///
    /// # Errors
    ///
    /// Same lookups as [`remove_edge`](Self::remove_edge).
    pub fn connection(&self, a: &FacilityId, b: &FacilityId) -> Result<&Connection> {
        let edge = self.edge_between(a, b)?;
        self.graph
            .edge_weight(edge)
            .ok_or_else(|| Error::EdgeNotFound(a.clone(), b.clone()))
    }

    // === Records ===

    /// Export the network as flat records a caller can persist.
    ///
    /// Deterministic canonical form: nodes ascending by id; each edge once,
    /// endpoints in `a < b` orientation, sorted by `(a, b)`.
    #[must_use]
    pub fn to_records(&self) -> (Vec<NodeRecord<P>>, Vec<EdgeRecord>)
    where
        P: Clone,
    {
        let nodes = self
            .ids
            .iter()
            .map(|(id, &index)| NodeRecord {
                id: id.clone(),
                payload: self.graph[index].payload.clone(),
            })
            .collect();

        let mut edges = Vec::with_capacity(self.edge_count());
        for (id, &index) in &self.ids {
            let mut partners: Vec<(&FacilityId, &Connection)> = self
                .graph
                .edges(index)
                .map(|edge| (self.id_of(edge.target()), edge.weight()))
                .filter(|(other, _)| *other > id)
                .collect();
            partners.sort_by(|x, y| x.0.cmp(y.0));
            for (other, connection) in partners {
                edges.push(EdgeRecord {
                    a: id.clone(),
                    b: other.clone(),
                    weight: connection.weight,
                    label: connection.label.clone(),
                });
            }
        }
        (nodes, edges)
    }

    // === Internal helpers shared by the algorithm modules ===

    /// Resolve an external id to its arena index.
    fn index_of(&self, id: &FacilityId) -> Result<NodeIndex> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| Error::NodeNotFound(id.clone()))
    }

    /// External id of an arena index. Indices always come from the id index
    /// or live arena iteration, so the lookup cannot miss.
    fn id_of(&self, index: NodeIndex) -> &FacilityId {
        &self.graph[index].id
    }

    /// Look up the edge between two declared, distinct facilities.
    fn edge_between(&self, a: &FacilityId, b: &FacilityId) -> Result<EdgeIndex> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);
        if a == b {
            return Err(Error::SelfLoop(a.clone()));
        }
        self.graph
            .find_edge(ia, ib)
            .ok_or_else(|| Error::EdgeNotFound(a.clone(), b.clone()))
    }

    /// Adjacent (index, weight) pairs in ascending neighbor-id order.
    ///
    /// Every algorithm expands neighbors through this helper, which is what
    /// makes traversal orders and tie-breaks reproducible.
    fn sorted_neighbors(&self, index: NodeIndex) -> Vec<(NodeIndex, f64)> {
        let mut adjacent: Vec<(NodeIndex, f64)> = self
            .graph
            .edges(index)
            .map(|edge| (edge.target(), edge.weight().weight))
            .collect();
        adjacent.sort_by(|x, y| self.id_of(x.0).cmp(self.id_of(y.0)));
        adjacent
    }

    /// Arena indices in ascending-id order.
    fn ordered_indices(&self) -> Vec<NodeIndex> {
        self.ids.values().copied().collect()
    }
}

/// Check the edge-weight invariant: finite and non-negative.
fn validate_weight(a: &FacilityId, b: &FacilityId, weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidWeight {
            a: a.clone(),
            b: b.clone(),
            weight,
        })
    }
}
