use crate::model::NodeId;

/// Last-write-wins record of the node under the pointer, fed by the
/// renderer's enter/leave notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverTracker {
    node: Option<NodeId>,
}

impl HoverTracker {
    pub fn new() -> Self {
        HoverTracker::default()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.node
    }

    pub fn enter(&mut self, id: NodeId) {
        self.node = Some(id);
    }

    pub fn leave(&mut self) {
        self.node = None;
    }

    /// Drops the hover if it points at `id`; used when that node goes away.
    pub fn forget(&mut self, id: NodeId) {
        if self.node == Some(id) {
            self.node = None;
        }
    }
}
