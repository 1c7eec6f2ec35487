use serde::{Deserialize, Serialize};

pub type NodeId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn dist2(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Natural key of an edge: the ordered endpoint pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: NodeId,
    pub target: NodeId,
}

impl EdgeKey {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        EdgeKey { source, target }
    }

    /// True when this key joins `a` and `b` in either direction.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }
}

/// Edges hold endpoint ids; the live nodes are resolved through the store.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub label: String,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, label: impl Into<String>) -> Self {
        Edge {
            source,
            target,
            label: label.into(),
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source, self.target)
    }
}

/// A node or an edge, by identity. Used for selection and label edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Entity {
    Node(NodeId),
    Edge(EdgeKey),
}

/// What the renderer reports under the pointer at press time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Hit {
    Canvas,
    Node(NodeId),
    Edge(EdgeKey),
}
