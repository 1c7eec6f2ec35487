use crate::model::{Edge, Entity, Node, NodeId, Point};
use serde::Serialize;

/// Transient connector drawn while a connect drag is in progress.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Guide {
    pub from: Point,
    pub to: Point,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EditingView<'a> {
    pub target: Entity,
    pub text: &'a str,
    /// False once the commit key was pressed; the renderer should blur.
    pub focused: bool,
}

/// Everything a renderer needs to redraw, borrowed from the editor.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame<'a> {
    pub version: u64,
    pub nodes: &'a [Node],
    pub edges: &'a [Edge],
    pub selection: Option<Entity>,
    pub hovered: Option<NodeId>,
    pub guide: Option<Guide>,
    pub editing: Option<EditingView<'a>>,
}

pub type ChangeListener = Box<dyn FnMut(&Frame<'_>)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
