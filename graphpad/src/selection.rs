use crate::model::{EdgeKey, Entity, NodeId};

/// Single selection: one node, one edge, or nothing. Holding a single
/// `Option<Entity>` makes a simultaneous node and edge selection
/// unrepresentable.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionManager {
    current: Option<Entity>,
}

impl SelectionManager {
    pub fn new() -> Self {
        SelectionManager::default()
    }

    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        match self.current {
            Some(Entity::Node(id)) => Some(id),
            _ => None,
        }
    }

    pub fn selected_edge(&self) -> Option<EdgeKey> {
        match self.current {
            Some(Entity::Edge(key)) => Some(key),
            _ => None,
        }
    }

    pub fn select_node(&mut self, id: NodeId) {
        self.current = Some(Entity::Node(id));
    }

    pub fn select_edge(&mut self, key: EdgeKey) {
        self.current = Some(Entity::Edge(key));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Clears the selection if it is `id` or an edge touching `id`.
    /// Returns true when something was cleared.
    pub fn forget_node(&mut self, id: NodeId) -> bool {
        let stale = match self.current {
            Some(Entity::Node(n)) => n == id,
            Some(Entity::Edge(key)) => key.touches(id),
            None => false,
        };
        if stale {
            self.current = None;
        }
        stale
    }

    pub fn forget_edge(&mut self, key: EdgeKey) -> bool {
        if self.current == Some(Entity::Edge(key)) {
            self.current = None;
            return true;
        }
        false
    }
}
