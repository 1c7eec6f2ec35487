//! Document exchange: `{ nodes: [{id, title, x, y}], edges: [{source, target, label}] }`.

use crate::error::LoadError;
use crate::geometry::limits;
use crate::model::{Edge, Node, NodeId};
use crate::store::EntityStore;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transport-neutral form of the store. Edges carry endpoint ids only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub title: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub label: String,
}

impl Document {
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_value(v: Value) -> Result<Self, LoadError> {
        Ok(serde_json::from_value(v)?)
    }

    /// Checks ingestion caps and numeric sanity, then splits into entities.
    /// Endpoint resolution happens in `EntityStore::replace_all`.
    pub fn into_entities(self) -> Result<(Vec<Node>, Vec<Edge>), LoadError> {
        if self.nodes.len() > limits::MAX_NODES {
            return Err(LoadError::CapsExceeded { what: "nodes", cap: limits::MAX_NODES });
        }
        if self.edges.len() > limits::MAX_EDGES {
            return Err(LoadError::CapsExceeded { what: "edges", cap: limits::MAX_EDGES });
        }
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for n in self.nodes {
            if !limits::in_coord_bounds(n.x) || !limits::in_coord_bounds(n.y) {
                return Err(LoadError::OutOfBounds { id: n.id });
            }
            if !limits::in_text_bounds(&n.title) {
                return Err(LoadError::CapsExceeded { what: "title length", cap: limits::MAX_TEXT_LEN });
            }
            nodes.push(Node { id: n.id, title: n.title, x: n.x, y: n.y });
        }
        let mut edges = Vec::with_capacity(self.edges.len());
        for e in self.edges {
            if !limits::in_text_bounds(&e.label) {
                return Err(LoadError::CapsExceeded { what: "label length", cap: limits::MAX_TEXT_LEN });
            }
            edges.push(Edge::new(e.source, e.target, e.label));
        }
        Ok((nodes, edges))
    }
}

pub fn to_document(store: &EntityStore) -> Document {
    let nodes = store
        .nodes()
        .iter()
        .map(|n| NodeRecord { id: n.id, title: n.title.clone(), x: n.x, y: n.y })
        .collect();
    let edges = store
        .edges()
        .iter()
        .map(|e| EdgeRecord { source: e.source, target: e.target, label: e.label.clone() })
        .collect();
    Document { nodes, edges }
}

pub fn to_json_impl(store: &EntityStore) -> Value {
    serde_json::to_value(to_document(store)).unwrap_or(Value::Null)
}

/// All-or-nothing load into `store`.
pub fn load_document(store: &mut EntityStore, doc: Document) -> Result<(), LoadError> {
    let (nodes, edges) = doc.into_entities().map_err(|e| {
        warn!("document rejected: {}", e);
        e
    })?;
    store.replace_all(nodes, edges).map_err(|e| {
        warn!("document rejected: {}", e);
        e
    })
}

pub fn from_json_impl_strict(store: &mut EntityStore, v: Value) -> Result<(), LoadError> {
    let doc = Document::from_json_value(v).map_err(|e| {
        warn!("document rejected: {}", e);
        e
    })?;
    load_document(store, doc)
}
