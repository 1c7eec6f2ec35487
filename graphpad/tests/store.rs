use graphpad::geometry::limits::{MAX_NODE_ID, MAX_TEXT_LEN};
use graphpad::store::EntityStore;
use graphpad::{Edge, EdgeKey, LoadError, Node};

fn node(id: u32, title: &str, x: f64, y: f64) -> Node {
    Node { id, title: title.to_string(), x, y }
}

fn abc() -> EntityStore {
    let mut s = EntityStore::new();
    s.add_node("A", 0.0, 0.0);
    s.add_node("B", 100.0, 0.0);
    s.add_node("C", 100.0, 100.0);
    s
}

#[test]
fn first_node_on_empty_store_gets_id_one() {
    let mut s = EntityStore::new();
    let id = s.add_node("X", 5.0, 5.0);
    assert_eq!(id, Some(1));
    assert_eq!(s.node_count(), 1);
    let n = s.node(1).unwrap();
    assert_eq!((n.title.as_str(), n.x, n.y), ("X", 5.0, 5.0));
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut s = abc();
    assert!(s.remove_node(3).is_some());
    assert_eq!(s.add_node("D", 0.0, 0.0), Some(4));
}

#[test]
fn replace_all_resets_allocator_to_max_loaded_id() {
    let mut s = abc();
    s.replace_all(vec![node(7, "x", 0.0, 0.0), node(3, "y", 1.0, 1.0)], vec![])
        .unwrap();
    assert_eq!(s.next_id(), 8);
    assert_eq!(s.add_node("z", 0.0, 0.0), Some(8));
}

#[test]
fn replace_all_with_empty_set_restarts_at_one() {
    let mut s = abc();
    s.replace_all(vec![], vec![]).unwrap();
    assert!(s.is_empty());
    assert_eq!(s.add_node("fresh", 0.0, 0.0), Some(1));
}

#[test]
fn reconnect_in_reverse_replaces_existing_edge() {
    let mut s = abc();
    assert_eq!(s.add_edge(1, 2, "there"), Some(EdgeKey::new(1, 2)));
    assert_eq!(s.add_edge(2, 1, "back"), Some(EdgeKey::new(2, 1)));
    assert_eq!(s.edge_count(), 1);
    assert_eq!(s.edges()[0], Edge::new(2, 1, "back"));
    assert!(!s.contains_edge(EdgeKey::new(1, 2)));
}

#[test]
fn reconnect_in_same_direction_keeps_one_edge() {
    let mut s = abc();
    s.add_edge(1, 2, "old");
    s.add_edge(1, 2, "");
    assert_eq!(s.edge_count(), 1);
    assert_eq!(s.edge(EdgeKey::new(1, 2)).unwrap().label, "");
}

#[test]
fn unrelated_connections_survive_a_reconnect() {
    let mut s = abc();
    s.add_edge(1, 2, "");
    s.add_edge(2, 3, "");
    s.add_edge(2, 1, "");
    assert_eq!(s.edge_count(), 2);
    assert!(s.contains_edge(EdgeKey::new(2, 3)));
}

#[test]
fn self_loop_is_rejected() {
    let mut s = abc();
    s.add_edge(1, 2, "");
    assert_eq!(s.add_edge(1, 1, ""), None);
    assert_eq!(s.edge_count(), 1);
}

#[test]
fn edge_to_missing_node_is_rejected() {
    let mut s = abc();
    assert_eq!(s.add_edge(1, 42, ""), None);
    assert_eq!(s.edge_count(), 0);
}

#[test]
fn removing_a_node_cascades_to_its_edges() {
    let mut s = abc();
    s.add_edge(1, 2, "");
    s.add_edge(2, 3, "");
    let mut cascaded = s.remove_node(2).unwrap();
    cascaded.sort();
    assert_eq!(cascaded, vec![EdgeKey::new(1, 2), EdgeKey::new(2, 3)]);
    let ids: Vec<u32> = s.nodes().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(s.edge_count(), 0);
    assert!(s.is_consistent());
}

#[test]
fn removals_of_absent_entities_are_noops() {
    let mut s = abc();
    assert!(s.remove_node(42).is_none());
    assert!(!s.remove_edge(EdgeKey::new(1, 2)));
    assert_eq!(s.node_count(), 3);
}

#[test]
fn dangling_reference_leaves_store_untouched() {
    let mut s = abc();
    s.add_edge(1, 2, "keep");
    let err = s
        .replace_all(
            vec![node(1, "A", 0.0, 0.0), node(2, "B", 1.0, 1.0)],
            vec![Edge::new(1, 9, "")],
        )
        .unwrap_err();
    assert!(matches!(err, LoadError::DanglingReference { id: 9 }));
    assert_eq!(err.code(), "dangling_reference");
    assert_eq!(s.node_count(), 3);
    assert_eq!(s.edge(EdgeKey::new(1, 2)).unwrap().label, "keep");
    assert_eq!(s.next_id(), 4);
}

#[test]
fn duplicate_node_ids_are_rejected() {
    let mut s = EntityStore::new();
    let err = s
        .replace_all(vec![node(1, "A", 0.0, 0.0), node(1, "B", 0.0, 0.0)], vec![])
        .unwrap_err();
    assert!(matches!(err, LoadError::DuplicateNode { id: 1 }));
    assert!(s.is_empty());
}

#[test]
fn self_loop_in_replacement_is_rejected() {
    let mut s = EntityStore::new();
    let err = s
        .replace_all(vec![node(1, "A", 0.0, 0.0)], vec![Edge::new(1, 1, "")])
        .unwrap_err();
    assert_eq!(err.code(), "invalid_structure");
}

#[test]
fn duplicate_connection_in_replacement_keeps_the_later_edge() {
    let mut s = EntityStore::new();
    s.replace_all(
        vec![node(1, "A", 0.0, 0.0), node(2, "B", 0.0, 0.0)],
        vec![Edge::new(1, 2, "a"), Edge::new(2, 1, "b")],
    )
    .unwrap();
    assert_eq!(s.edges(), &[Edge::new(2, 1, "b")]);
}

#[test]
fn move_rename_relabel_in_place() {
    let mut s = abc();
    s.add_edge(1, 3, "");
    assert!(s.move_node(1, -20.5, 1e9));
    assert!(!s.move_node(1, f64::NAN, 0.0));
    assert!(!s.move_node(99, 0.0, 0.0));
    assert_eq!(s.node(1).unwrap().pos().x, -20.5);
    assert!(s.rename_node(2, "Bee"));
    assert!(s.relabel_edge(EdgeKey::new(1, 3), "via"));
    assert!(!s.relabel_edge(EdgeKey::new(3, 1), "nope"));
    assert_eq!(s.node(2).unwrap().title, "Bee");
    assert_eq!(s.edge(EdgeKey::new(1, 3)).unwrap().label, "via");
}

#[test]
fn allocator_stops_at_the_id_ceiling() {
    let mut s = EntityStore::new();
    s.replace_all(vec![node(MAX_NODE_ID - 1, "A", 0.0, 0.0)], vec![]).unwrap();
    assert_eq!(s.add_node("last", 0.0, 0.0), Some(MAX_NODE_ID));
    assert_eq!(s.add_node("one too many", 0.0, 0.0), None);
    assert_eq!(s.add_node("still none", 0.0, 0.0), None);
    assert_eq!(s.node_count(), 2);
    assert!(s.contains_node(MAX_NODE_ID - 1));
}

#[test]
fn load_rejects_ids_above_the_ceiling() {
    let mut s = abc();
    let err = s.replace_all(vec![node(MAX_NODE_ID + 1, "A", 0.0, 0.0)], vec![]).unwrap_err();
    assert!(matches!(err, LoadError::CapsExceeded { what: "node id", .. }));
    assert_eq!(s.node_count(), 3);
    s.replace_all(vec![node(MAX_NODE_ID, "A", 0.0, 0.0)], vec![]).unwrap();
    assert_eq!(s.add_node("B", 0.0, 0.0), None);
}

#[test]
fn live_mutations_honour_load_caps() {
    let mut s = abc();
    s.add_edge(1, 2, "keep");
    let long = "x".repeat(MAX_TEXT_LEN + 1);
    let at_cap = "y".repeat(MAX_TEXT_LEN);

    assert_eq!(s.add_node("nan", f64::NAN, 0.0), None);
    assert_eq!(s.add_node("inf", 0.0, f64::INFINITY), None);
    assert_eq!(s.add_node(long.clone(), 0.0, 0.0), None);
    assert_eq!(s.node_count(), 3);
    assert_eq!(s.next_id(), 4);

    assert!(!s.rename_node(1, long.clone()));
    assert_eq!(s.node(1).unwrap().title, "A");
    assert!(!s.relabel_edge(EdgeKey::new(1, 2), long.clone()));
    assert_eq!(s.add_edge(2, 1, long), None);
    assert_eq!(s.edge(EdgeKey::new(1, 2)).unwrap().label, "keep");

    assert!(s.rename_node(1, at_cap.clone()));
    assert_eq!(s.add_node(at_cap, 1.0, 1.0), Some(4));
}
