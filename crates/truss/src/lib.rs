//! # Truss: Facility-Network Graph Analytics
//!
//! Truss models a fleet of facilities (depots, hubs, rental branches) as a
//! weighted undirected graph and answers routing and structure questions
//! about it: cheapest and heaviest routes, all-pairs distance matrices,
//! minimum spanning forests, betweenness centrality, traversal orders, and
//! connectivity shape.
//!
//! ## Design Philosophy
//!
//! - **Declared topology** - Facilities are added explicitly before edges
//!   may reference them; nothing is auto-created on the way
//! - **Atomic mutations** - Validation completes before state changes, so
//!   an error always means an untouched graph
//! - **Absence is an answer** - Unreachable targets and empty searches come
//!   back as `None`/empty, never as errors; errors are reserved for
//!   structural misuse
//! - **Deterministic output** - Every query is a pure function of graph
//!   state, with ascending-id ordering wherever order is observable
//!
//! ## Quick Start
//!
//! ```
//! use truss::{FacilityGraph, FacilityId};
//!
//! let [atlanta, boston, chicago, denver] =
//!     ["atlanta", "boston", "chicago", "denver"].map(FacilityId::new);
//!
//! let mut network = FacilityGraph::new();
//! for id in [&atlanta, &boston, &chicago, &denver] {
//!     network.add_node(id.clone(), ())?;
//! }
//! network.add_edge(&atlanta, &boston, 1.0, None)?;
//! network.add_edge(&boston, &chicago, 2.0, None)?;
//! network.add_edge(&atlanta, &chicago, 4.0, None)?;
//! network.add_edge(&chicago, &denver, 1.0, None)?;
//!
//! // Cheapest route relays through boston rather than the direct edge.
//! let route = network.shortest_path(&atlanta, &denver)?.unwrap();
//! assert_eq!(route.to_string(), "atlanta -> boston -> chicago -> denver (4)");
//!
//! // The spanning forest drops the redundant atlanta-chicago edge.
//! let forest = network.minimum_spanning_forest_kruskal();
//! assert_eq!(forest.total_weight(), 4.0);
//! # Ok::<(), truss::Error>(())
//! ```

mod error;
mod graph;
mod types;

pub use error::{Error, Result};
pub use graph::{BreadthFirst, DepthFirst, DistanceMatrix, FacilityGraph};
pub use types::{
    Connection, EdgeRecord, FacilityId, NearestMatch, NodeRecord, PathSearch, SpanningEdge,
    SpanningForest, SpanningTree, WeightedPath,
};
