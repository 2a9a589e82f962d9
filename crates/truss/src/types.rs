//! Domain types for the facility network.
//!
//! These types fall into three groups:
//! - **Identity**: [`FacilityId`] names a node in the network.
//! - **Records**: [`NodeRecord`] and [`EdgeRecord`] are the flat tuples a
//!   caller persists; the engine itself never touches a file.
//! - **Results**: [`WeightedPath`], [`PathSearch`], [`NearestMatch`],
//!   [`SpanningForest`] and friends carry query outcomes.
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Id type | Newtype over `String` | Stable external keys, ordered for deterministic iteration |
//! | Weights | `f64`, validated at the graph boundary | Finite and non-negative by construction |
//! | Payloads | Generic, unconstrained | The engine never interprets them |
//! | Spanning edges | Canonical `a < b` orientation | Undirected; makes edge sets comparable |

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identity
// ============================================================================

/// Unique identifier for a facility (hospital, depot, parking lot, ...).
///
/// Identifiers are externally supplied and stable for the life of the node.
/// The ordering is lexicographic, which is also the tie-break and iteration
/// order used throughout the engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(String);

impl FacilityId {
    /// Create a new facility id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FacilityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FacilityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for FacilityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Stored edge data
// ============================================================================

/// Data stored on one connection between two facilities.
///
/// The endpoints live in the graph structure itself; this is only the
/// per-edge payload (weight plus an optional caller-defined label such as
/// `"highway"` or `"M32 bridge"`).
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Finite, non-negative weight (distance, time, or cost). Zero means
    /// co-located facilities.
    pub weight: f64,
    /// Optional textual label; never interpreted by the engine.
    pub label: Option<String>,
}

// ============================================================================
// Persistence records
// ============================================================================

/// A node declaration suitable for persistence or bulk construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord<P> {
    /// Facility identifier.
    pub id: FacilityId,
    /// Opaque payload owned by the caller.
    pub payload: P,
}

/// An edge declaration suitable for persistence or bulk construction.
///
/// [`FacilityGraph::to_records`](crate::FacilityGraph::to_records) emits each
/// edge exactly once in canonical orientation (`a < b`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// First endpoint.
    pub a: FacilityId,
    /// Second endpoint.
    pub b: FacilityId,
    /// Connection weight.
    pub weight: f64,
    /// Optional connection label.
    pub label: Option<String>,
}

impl EdgeRecord {
    /// Create an unlabeled edge record.
    #[must_use]
    pub fn new(a: impl Into<FacilityId>, b: impl Into<FacilityId>, weight: f64) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            weight,
            label: None,
        }
    }

    /// Attach a label to the record.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

// ============================================================================
// Query results
// ============================================================================

/// An ordered walk through the network together with its total weight.
///
/// Paths always contain at least one node; a path from a facility to itself
/// is `[a]` with weight 0.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPath {
    /// Facilities in visit order, endpoints included.
    pub nodes: Vec<FacilityId>,
    /// Sum of the weights of the traversed connections.
    pub total_weight: f64,
}

impl WeightedPath {
    /// Number of connections traversed (one less than the node count).
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

impl fmt::Display for WeightedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{node}")?;
        }
        write!(f, " ({})", self.total_weight)
    }
}

/// Outcome of a cancellable longest-path search.
///
/// A cancelled search is not an error: it reports the best path found before
/// the cancellation hook fired, with [`exhausted`](Self::exhausted) set to
/// `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSearch {
    /// Best simple path found, if the target was reached at all.
    pub best: Option<WeightedPath>,
    /// True when the search space was fully explored.
    pub exhausted: bool,
}

/// The nearest facility satisfying a caller predicate, with the route to it.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestMatch {
    /// The matching facility.
    pub id: FacilityId,
    /// Minimum-weight route from the start to the match.
    pub path: WeightedPath,
}

// ============================================================================
// Spanning forest
// ============================================================================

/// One edge selected into a spanning tree, in canonical `a < b` orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningEdge {
    /// Lexicographically smaller endpoint.
    pub a: FacilityId,
    /// Lexicographically larger endpoint.
    pub b: FacilityId,
    /// Connection weight.
    pub weight: f64,
}

impl SpanningEdge {
    /// Create a spanning edge, swapping endpoints into canonical order.
    #[must_use]
    pub fn new(a: FacilityId, b: FacilityId, weight: f64) -> Self {
        if a <= b {
            Self { a, b, weight }
        } else {
            Self { a: b, b: a, weight }
        }
    }
}

/// Minimum spanning tree of one connected component.
///
/// An isolated facility yields a tree with one member, no edges, and
/// weight 0.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    /// Facilities in this component, ascending by id.
    pub members: Vec<FacilityId>,
    /// Selected edges; always `members.len() - 1` of them.
    pub edges: Vec<SpanningEdge>,
    /// Sum of the selected edge weights.
    pub weight: f64,
}

/// Minimum spanning forest: one [`SpanningTree`] per connected component,
/// ordered by each tree's smallest member id.
///
/// On a connected graph the forest holds exactly one tree; a forest with
/// more trees than one is how disconnection surfaces to the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpanningForest {
    /// Per-component trees.
    pub trees: Vec<SpanningTree>,
}

impl SpanningForest {
    /// Total weight across all trees.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.trees.iter().map(|t| t.weight).sum()
    }

    /// Total number of selected edges across all trees.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.trees.iter().map(|t| t.edges.len()).sum()
    }

    /// True when the forest is a single tree spanning every facility.
    #[must_use]
    pub fn is_single_tree(&self) -> bool {
        self.trees.len() == 1
    }
}
