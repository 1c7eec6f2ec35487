//! Owning collections of nodes and edges plus the node id allocator.

use crate::error::LoadError;
use crate::geometry::limits;
use crate::model::{Edge, EdgeKey, Node, NodeId};
use log::{debug, warn};
use std::collections::HashSet;

#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    // Highest id handed out this session; the next node gets last_id + 1.
    last_id: NodeId,
}

impl EntityStore {
    pub fn new() -> Self {
        EntityStore::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.iter().find(|e| e.key() == key)
    }

    /// The edge joining `a` and `b` in either direction, if any.
    pub fn connection(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.key().connects(a, b))
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn contains_edge(&self, key: EdgeKey) -> bool {
        self.edge(key).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Id the next `add_node` will allocate.
    pub fn next_id(&self) -> NodeId {
        self.last_id + 1
    }

    // Nodes

    /// Appends a node under a fresh id. `None` for non-finite coordinates,
    /// an over-long title, or once the id space is used up.
    pub fn add_node(&mut self, title: impl Into<String>, x: f64, y: f64) -> Option<NodeId> {
        if !limits::in_coord_bounds(x) || !limits::in_coord_bounds(y) {
            return None;
        }
        let title = title.into();
        if !limits::in_text_bounds(&title) {
            return None;
        }
        if self.last_id >= limits::MAX_NODE_ID {
            warn!("node ids exhausted at {}", self.last_id);
            return None;
        }
        self.last_id += 1;
        let id = self.last_id;
        self.nodes.push(Node { id, title, x, y });
        debug!("node {} added at ({}, {})", id, x, y);
        Some(id)
    }

    /// Removes the node and every edge touching it. Returns the keys of the
    /// cascaded edges, or `None` when the node was not present.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Vec<EdgeKey>> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        self.nodes.remove(idx);
        let mut cascaded = Vec::new();
        self.edges.retain(|e| {
            let key = e.key();
            if key.touches(id) {
                cascaded.push(key);
                false
            } else {
                true
            }
        });
        debug!("node {} removed, {} incident edges dropped", id, cascaded.len());
        Some(cascaded)
    }

    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> bool {
        if !limits::in_coord_bounds(x) || !limits::in_coord_bounds(y) {
            return false;
        }
        match self.node_mut(id) {
            Some(n) => {
                n.x = x;
                n.y = y;
                true
            }
            None => false,
        }
    }

    pub fn rename_node(&mut self, id: NodeId, title: impl Into<String>) -> bool {
        let title = title.into();
        if !limits::in_text_bounds(&title) {
            return false;
        }
        match self.node_mut(id) {
            Some(n) => {
                n.title = title;
                true
            }
            None => false,
        }
    }

    // Edges

    /// Inserts `source -> target`. Self-loops, edges to absent nodes and
    /// over-long labels are rejected with `None`. Any existing connection between the two nodes,
    /// in either direction, is replaced.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        label: impl Into<String>,
    ) -> Option<EdgeKey> {
        if source == target {
            return None;
        }
        if !self.contains_node(source) || !self.contains_node(target) {
            return None;
        }
        let label = label.into();
        if !limits::in_text_bounds(&label) {
            return None;
        }
        let before = self.edges.len();
        self.edges.retain(|e| !e.key().connects(source, target));
        if self.edges.len() != before {
            debug!("connection {} <-> {} replaced", source, target);
        }
        let edge = Edge::new(source, target, label);
        let key = edge.key();
        self.edges.push(edge);
        debug!("edge {} -> {} added", source, target);
        Some(key)
    }

    pub fn remove_edge(&mut self, key: EdgeKey) -> bool {
        match self.edges.iter().position(|e| e.key() == key) {
            Some(idx) => {
                self.edges.remove(idx);
                debug!("edge {} -> {} removed", key.source, key.target);
                true
            }
            None => false,
        }
    }

    pub fn relabel_edge(&mut self, key: EdgeKey, label: impl Into<String>) -> bool {
        let label = label.into();
        if !limits::in_text_bounds(&label) {
            return false;
        }
        match self.edges.iter_mut().find(|e| e.key() == key) {
            Some(e) => {
                e.label = label;
                true
            }
            None => false,
        }
    }

    // Bulk

    /// Atomically replaces both collections. Edge endpoints are resolved
    /// against the incoming node set; on any failure the store is left as it
    /// was. The allocator restarts from the highest loaded id (0 when empty).
    pub fn replace_all(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<(), LoadError> {
        let mut ids = HashSet::with_capacity(nodes.len());
        for n in &nodes {
            if n.id > limits::MAX_NODE_ID {
                return Err(LoadError::CapsExceeded {
                    what: "node id",
                    cap: limits::MAX_NODE_ID as usize,
                });
            }
            if !ids.insert(n.id) {
                return Err(LoadError::DuplicateNode { id: n.id });
            }
        }
        let mut resolved: Vec<Edge> = Vec::with_capacity(edges.len());
        for e in edges {
            for id in [e.source, e.target] {
                if !ids.contains(&id) {
                    return Err(LoadError::DanglingReference { id });
                }
            }
            if e.source == e.target {
                return Err(LoadError::SelfLoop { id: e.source });
            }
            if let Some(idx) = resolved.iter().position(|r| r.key().connects(e.source, e.target)) {
                warn!(
                    "duplicate connection {} <-> {} in document, keeping the later edge",
                    e.source, e.target
                );
                resolved.remove(idx);
            }
            resolved.push(e);
        }
        self.last_id = nodes.iter().map(|n| n.id).max().unwrap_or(0);
        self.nodes = nodes;
        self.edges = resolved;
        debug!(
            "store replaced: {} nodes, {} edges, next id {}",
            self.nodes.len(),
            self.edges.len(),
            self.next_id()
        );
        Ok(())
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.last_id = 0;
    }

    /// Every edge resolves to two distinct present nodes and no two edges
    /// join the same pair.
    pub fn is_consistent(&self) -> bool {
        let mut pairs = HashSet::new();
        self.edges.iter().all(|e| {
            let pair = (e.source.min(e.target), e.source.max(e.target));
            e.source != e.target
                && self.contains_node(e.source)
                && self.contains_node(e.target)
                && pairs.insert(pair)
        })
    }
}
