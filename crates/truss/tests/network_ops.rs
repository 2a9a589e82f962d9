//! Integration tests for network construction and mutation through the
//! public API:
//! - Node lifecycle (declare, inspect, update, remove)
//! - Edge lifecycle and the undirected-edge invariants
//! - Validation failures leaving the network untouched
//! - Record export/import and JSON serialization

use truss::{EdgeRecord, Error, FacilityGraph, FacilityId, NodeRecord};

fn id(name: &str) -> FacilityId {
    FacilityId::new(name)
}

/// Hub-and-spoke network with stock counts as payloads.
///
/// ```text
///        north
///          |
///          1
///          |
/// west -2- hub -3- east
/// ```
fn depot_network() -> FacilityGraph<u32> {
    let mut network = FacilityGraph::new();
    for (name, stock) in [("hub", 10), ("north", 0), ("west", 4), ("east", 7)] {
        network.add_node(id(name), stock).expect("declare facility");
    }
    network
        .add_edge(&id("hub"), &id("north"), 1.0, None)
        .expect("hub-north");
    network
        .add_edge(&id("hub"), &id("west"), 2.0, Some("gravel road".into()))
        .expect("hub-west");
    network
        .add_edge(&id("hub"), &id("east"), 3.0, None)
        .expect("hub-east");
    network
}

// ============================================================================
// Node Lifecycle
// ============================================================================

#[test]
fn declared_facilities_are_countable_and_ordered() {
    let network = depot_network();

    assert_eq!(network.node_count(), 4);
    assert!(!network.is_empty());
    assert!(network.contains_node(&id("hub")));
    assert!(!network.contains_node(&id("south")));

    let ids: Vec<&str> = network.facility_ids().map(FacilityId::as_str).collect();
    assert_eq!(ids, ["east", "hub", "north", "west"], "ascending id order");
}

#[test]
fn duplicate_declaration_is_rejected_without_clobbering_payload() {
    let mut network = depot_network();

    let err = network.add_node(id("hub"), 99).unwrap_err();
    assert_eq!(err, Error::DuplicateNode(id("hub")));
    assert_eq!(*network.payload(&id("hub")).unwrap(), 10, "payload untouched");
    assert_eq!(network.node_count(), 4);
}

#[test]
fn removing_a_facility_returns_payload_and_drops_its_edges() {
    let mut network = depot_network();

    let stock = network.remove_node(&id("hub")).expect("remove hub");
    assert_eq!(stock, 10);
    assert_eq!(network.node_count(), 3);
    assert_eq!(network.edge_count(), 0, "all incident edges dropped");
    assert!(network.neighbors(&id("north")).unwrap().is_empty());
}

#[test]
fn removed_id_can_be_declared_again() {
    let mut network = depot_network();
    network.remove_node(&id("north")).expect("remove north");

    network.add_node(id("north"), 42).expect("redeclare north");
    assert_eq!(*network.payload(&id("north")).unwrap(), 42);
    assert!(
        network.neighbors(&id("north")).unwrap().is_empty(),
        "redeclared facility starts unconnected"
    );
}

#[test]
fn payload_mut_updates_in_place() {
    let mut network = depot_network();

    *network.payload_mut(&id("west")).unwrap() += 6;
    assert_eq!(*network.payload(&id("west")).unwrap(), 10);
}

#[test]
fn unknown_facility_lookups_are_node_not_found() {
    let mut network = depot_network();
    let ghost = id("ghost");

    assert_eq!(network.payload(&ghost).unwrap_err(), Error::NodeNotFound(ghost.clone()));
    assert_eq!(network.remove_node(&ghost).unwrap_err(), Error::NodeNotFound(ghost.clone()));
    assert_eq!(network.degree(&ghost).unwrap_err(), Error::NodeNotFound(ghost));
}

// ============================================================================
// Edge Lifecycle
// ============================================================================

#[test]
fn connections_are_visible_from_both_endpoints() {
    let network = depot_network();

    assert!(network.contains_edge(&id("hub"), &id("west")));
    assert!(network.contains_edge(&id("west"), &id("hub")));

    let from_hub = network.connection(&id("hub"), &id("west")).unwrap();
    let from_west = network.connection(&id("west"), &id("hub")).unwrap();
    assert_eq!(from_hub.weight, 2.0);
    assert_eq!(from_hub, from_west);
    assert_eq!(from_hub.label.as_deref(), Some("gravel road"));

    let (neighbor, connection) = network.neighbors(&id("west")).unwrap()[0];
    assert_eq!(neighbor, &id("hub"));
    assert_eq!(connection.weight, 2.0);
}

#[test]
fn neighbors_list_ascending_with_degree_to_match() {
    let network = depot_network();

    let listed: Vec<&str> = network
        .neighbors(&id("hub"))
        .unwrap()
        .into_iter()
        .map(|(neighbor, _)| neighbor.as_str())
        .collect();
    assert_eq!(listed, ["east", "north", "west"]);
    assert_eq!(network.degree(&id("hub")).unwrap(), 3);
    assert_eq!(network.degree(&id("east")).unwrap(), 1);
}

#[test]
fn duplicate_connection_is_rejected_in_either_orientation() {
    let mut network = depot_network();

    let err = network.add_edge(&id("north"), &id("hub"), 9.0, None).unwrap_err();
    assert_eq!(err, Error::DuplicateEdge(id("north"), id("hub")));
    assert_eq!(
        network.connection(&id("hub"), &id("north")).unwrap().weight,
        1.0,
        "existing connection untouched"
    );
}

#[test]
fn self_connection_is_rejected() {
    let mut network = depot_network();

    let err = network.add_edge(&id("hub"), &id("hub"), 1.0, None).unwrap_err();
    assert_eq!(err, Error::SelfLoop(id("hub")));
    assert_eq!(network.edge_count(), 3);
}

#[test]
fn connecting_an_undeclared_facility_is_node_not_found() {
    let mut network = depot_network();

    let err = network.add_edge(&id("hub"), &id("south"), 1.0, None).unwrap_err();
    assert_eq!(err, Error::NodeNotFound(id("south")));
    assert!(
        !network.contains_node(&id("south")),
        "edges never declare facilities implicitly"
    );
    assert_eq!(network.edge_count(), 3);
}

#[test]
fn removing_a_connection_returns_it_and_keeps_the_facilities() {
    let mut network = depot_network();

    let removed = network.remove_edge(&id("west"), &id("hub")).expect("remove edge");
    assert_eq!(removed.weight, 2.0);
    assert_eq!(removed.label.as_deref(), Some("gravel road"));
    assert_eq!(network.edge_count(), 2);
    assert!(network.contains_node(&id("west")));
    assert_eq!(
        network.remove_edge(&id("west"), &id("hub")).unwrap_err(),
        Error::EdgeNotFound(id("west"), id("hub"))
    );
}

#[test]
fn zero_weight_connection_is_legal() {
    let mut network = depot_network();

    network
        .add_edge(&id("north"), &id("west"), 0.0, None)
        .expect("zero-weight connection");
    assert_eq!(network.connection(&id("north"), &id("west")).unwrap().weight, 0.0);
}

// ============================================================================
// Weight Updates and Atomicity
// ============================================================================

#[test]
fn weight_update_keeps_the_label() {
    let mut network = depot_network();

    network
        .update_edge_weight(&id("hub"), &id("west"), 5.5)
        .expect("update weight");
    let connection = network.connection(&id("west"), &id("hub")).unwrap();
    assert_eq!(connection.weight, 5.5);
    assert_eq!(connection.label.as_deref(), Some("gravel road"));
}

#[test]
fn invalid_weight_update_leaves_the_old_weight() {
    let mut network = depot_network();

    for bad in [-3.0, f64::NAN, f64::INFINITY] {
        let err = network.update_edge_weight(&id("hub"), &id("east"), bad).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { .. }), "rejected {bad}");
    }
    assert_eq!(network.connection(&id("hub"), &id("east")).unwrap().weight, 3.0);
}

#[test]
fn updating_a_missing_connection_is_edge_not_found() {
    let mut network = depot_network();

    let err = network.update_edge_weight(&id("north"), &id("east"), 1.0).unwrap_err();
    assert_eq!(err, Error::EdgeNotFound(id("north"), id("east")));
}

#[test]
fn failed_insert_leaves_no_partial_state() {
    let mut network = FacilityGraph::new();
    network.add_node(id("a"), ()).unwrap();
    network.add_node(id("b"), ()).unwrap();

    assert!(network.add_edge(&id("a"), &id("b"), -1.0, None).is_err());
    assert_eq!(network.edge_count(), 0);
    assert!(!network.contains_edge(&id("a"), &id("b")));

    assert!(network.add_edge(&id("a"), &id("b"), 1.0, None).is_ok(), "clean retry succeeds");
}

// ============================================================================
// Records and Serialization
// ============================================================================

#[test]
fn exported_records_are_canonical() {
    let mut network = FacilityGraph::new();
    for name in ["delta", "alpha", "charlie", "bravo"] {
        network.add_node(id(name), ()).unwrap();
    }
    // Insert in scrambled orientation; export must still come out a < b.
    network.add_edge(&id("delta"), &id("alpha"), 4.0, None).unwrap();
    network.add_edge(&id("charlie"), &id("bravo"), 2.0, None).unwrap();
    network.add_edge(&id("bravo"), &id("alpha"), 1.0, None).unwrap();

    let (nodes, edges) = network.to_records();
    let node_ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids, ["alpha", "bravo", "charlie", "delta"]);

    let pairs: Vec<(&str, &str)> = edges.iter().map(|e| (e.a.as_str(), e.b.as_str())).collect();
    assert_eq!(
        pairs,
        [("alpha", "bravo"), ("alpha", "delta"), ("bravo", "charlie")],
        "edges sorted with endpoints in ascending orientation"
    );
}

#[test]
fn records_round_trip_through_from_records() {
    let network = depot_network();
    let (nodes, edges) = network.to_records();

    let rebuilt = FacilityGraph::from_records(nodes.clone(), edges.clone())
        .expect("rebuild from own records");
    let (nodes_again, edges_again) = rebuilt.to_records();

    assert_eq!(nodes, nodes_again);
    assert_eq!(edges, edges_again);
    assert_eq!(rebuilt.connection(&id("hub"), &id("west")).unwrap().label.as_deref(), Some("gravel road"));
}

#[test]
fn from_records_rejects_edges_to_undeclared_facilities() {
    let nodes = vec![NodeRecord { id: id("a"), payload: () }];
    let edges = vec![EdgeRecord::new(id("a"), id("b"), 1.0)];

    let err = FacilityGraph::from_records(nodes, edges).unwrap_err();
    assert_eq!(err, Error::NodeNotFound(id("b")));
}

#[test]
fn records_survive_json() {
    let network = depot_network();
    let (nodes, edges) = network.to_records();

    let payload = serde_json::to_string(&(nodes.clone(), edges.clone())).expect("serialize");
    let (nodes_back, edges_back): (Vec<NodeRecord<u32>>, Vec<EdgeRecord>) =
        serde_json::from_str(&payload).expect("deserialize");

    assert_eq!(nodes, nodes_back);
    assert_eq!(edges, edges_back);

    let rebuilt = FacilityGraph::from_records(nodes_back, edges_back).expect("rebuild");
    assert_eq!(rebuilt.node_count(), network.node_count());
    assert_eq!(rebuilt.edge_count(), network.edge_count());
}
