//! Error types for facility-network operations.
//!
//! ## Error Philosophy
//!
//! Only **structural failures** are errors: referencing a facility that was
//! never declared, inserting a duplicate, violating an edge invariant. Every
//! mutation validates completely before touching state, so a returned error
//! guarantees the graph is unchanged (atomic mutation).
//!
//! Outcomes that are merely empty are **not** errors:
//! - an unreachable target in a shortest-path query is `Ok(None)`,
//! - an isolated facility yields an empty spanning tree,
//! - the centrality table of an empty graph is empty,
//! - a cancelled longest-path search reports what it found so far.

use thiserror::Error;

use crate::types::FacilityId;

/// Result type for facility-network operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural failures from graph mutations and lookups.
///
/// Each variant carries the offending id(s) so callers can report precisely
/// which reference was wrong. All variants are comparable, which keeps test
/// assertions exact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A node with this id already exists.
    #[error("duplicate node: {0}")]
    DuplicateNode(FacilityId),

    /// No node with this id has been declared.
    #[error("node not found: {0}")]
    NodeNotFound(FacilityId),

    /// Both endpoints of the edge are the same node.
    #[error("self loop rejected on node: {0}")]
    SelfLoop(FacilityId),

    /// The two nodes are already connected; at most one edge per pair.
    #[error("duplicate edge: {0} <-> {1}")]
    DuplicateEdge(FacilityId, FacilityId),

    /// No edge exists between the two nodes.
    #[error("edge not found: {0} <-> {1}")]
    EdgeNotFound(FacilityId, FacilityId),

    /// Edge weights must be finite and non-negative.
    #[error("invalid weight {weight} for edge {a} <-> {b}: must be finite and >= 0")]
    InvalidWeight {
        /// First endpoint of the rejected edge.
        a: FacilityId,
        /// Second endpoint of the rejected edge.
        b: FacilityId,
        /// The rejected weight value.
        weight: f64,
    },
}
