use crate::geometry::math::seg_distance_sq;
use crate::model::{EdgeKey, Hit, NodeId, Point};
use crate::store::EntityStore;

/// Nearest node whose centre lies within `radius` of `p`. Later nodes are
/// drawn on top, so they win ties.
pub fn node_at(store: &EntityStore, p: Point, radius: f64) -> Option<NodeId> {
    let r2 = radius * radius;
    let mut best: Option<(NodeId, f64)> = None;
    for n in store.nodes() {
        let d2 = n.pos().dist2(p);
        if d2 <= r2 && best.map_or(true, |(_, bd)| d2 <= bd) {
            best = Some((n.id, d2));
        }
    }
    best.map(|(id, _)| id)
}

/// Nodes first, then edges as straight segments between live endpoints,
/// else the canvas.
pub fn pick_impl(store: &EntityStore, p: Point, node_radius: f64, edge_tol: f64) -> Hit {
    if let Some(id) = node_at(store, p, node_radius) {
        return Hit::Node(id);
    }
    let tol2 = edge_tol * edge_tol;
    let mut best_edge: Option<(EdgeKey, f64)> = None;
    for e in store.edges() {
        let (Some(a), Some(b)) = (store.node(e.source), store.node(e.target)) else {
            continue;
        };
        let (d2, _) = seg_distance_sq(p, a.pos(), b.pos());
        if d2 <= tol2 && best_edge.map_or(true, |(_, bd)| d2 < bd) {
            best_edge = Some((e.key(), d2));
        }
    }
    match best_edge {
        Some((key, _)) => Hit::Edge(key),
        None => Hit::Canvas,
    }
}
