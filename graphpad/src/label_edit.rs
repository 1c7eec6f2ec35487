use crate::model::Entity;

/// Modal text capture for a node title or an edge label. The editable
/// surface lives in the renderer; the session only holds the buffer and
/// whether focus is still requested.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelEditSession {
    target: Entity,
    buffer: String,
    focused: bool,
}

/// Text to write back when a session ends.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelCommit {
    pub target: Entity,
    pub text: String,
}

impl LabelEditSession {
    /// Starts editing `target`, seeding the buffer with its current text.
    pub fn open(target: Entity, current: impl Into<String>) -> Self {
        LabelEditSession {
            target,
            buffer: current.into(),
            focused: true,
        }
    }

    pub fn target(&self) -> Entity {
        self.target
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn update(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Commit key: stop requesting focus. The session stays open until blur.
    pub fn release_focus(&mut self) -> bool {
        std::mem::replace(&mut self.focused, false)
    }

    /// Blur: whatever text the surface holds is committed. There is no
    /// cancel path.
    pub fn finish(self, text: impl Into<String>) -> LabelCommit {
        LabelCommit {
            target: self.target,
            text: text.into(),
        }
    }
}
