//! Pointer and keyboard state machine.
//!
//! Every gesture is interpreted once, at press time, into an [`Intent`]. A
//! press followed by a release that never travelled further than the
//! configured click distance is a click; anything else is a drag. Gestures
//! never fail: they either mutate the store or leave it untouched.

use crate::config::{EditorConfig, Modifiers};
use crate::frame::Guide;
use crate::geometry::limits;
use crate::hover::HoverTracker;
use crate::label_edit::LabelEditSession;
use crate::model::{EdgeKey, Entity, Hit, NodeId, Point};
use crate::selection::SelectionManager;
use crate::store::EntityStore;
use log::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Plain,
    Connect,
    Edit,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Dragging a connector guide out of `source`; `pointer` is its free end.
    ConnectDragging { source: NodeId, pointer: Point },
    /// Moving `node`; `grab` is the node centre relative to the press point.
    NodeDragging { node: NodeId, grab: Point },
    EditingLabel(LabelEditSession),
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::ConnectDragging { .. } => "connect_dragging",
            InteractionState::NodeDragging { .. } => "node_dragging",
            InteractionState::EditingLabel(_) => "editing_label",
        }
    }
}

/// The press that opened the current gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
    pub origin: Point,
    pub hit: Hit,
    pub intent: Intent,
    /// Set once the pointer strays beyond the click distance.
    pub travelled: bool,
}

/// Mutable view over the components a transition may touch.
pub struct Context<'a> {
    pub store: &'a mut EntityStore,
    pub selection: &'a mut SelectionManager,
    pub hover: &'a mut HoverTracker,
    pub config: &'a EditorConfig,
}

#[derive(Clone, Debug, Default)]
pub struct Interaction {
    state: InteractionState,
    gesture: Option<Gesture>,
}

fn finite(p: Point) -> bool {
    limits::in_coord_bounds(p.x) && limits::in_coord_bounds(p.y)
}

impl Interaction {
    pub fn new() -> Self {
        Interaction::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Idle with no press outstanding.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle) && self.gesture.is_none()
    }

    pub fn editing(&self) -> Option<&LabelEditSession> {
        match &self.state {
            InteractionState::EditingLabel(s) => Some(s),
            _ => None,
        }
    }

    pub fn guide(&self, store: &EntityStore) -> Option<Guide> {
        match &self.state {
            InteractionState::ConnectDragging { source, pointer } => store.node(*source).map(|n| Guide {
                from: n.pos(),
                to: *pointer,
            }),
            _ => None,
        }
    }

    /// Back to `Idle`, dropping any guide, drag or edit session.
    pub fn reset(&mut self) {
        if !self.is_idle() {
            debug!("interaction reset from {}", self.state.name());
        }
        self.state = InteractionState::Idle;
        self.gesture = None;
    }

    pub fn pointer_down(&mut self, cx: &mut Context<'_>, pos: Point, mods: Modifiers, hit: Hit) -> bool {
        if !finite(pos) {
            return false;
        }
        if !matches!(self.state, InteractionState::Idle) {
            debug!("press ignored while {}", self.state.name());
            return false;
        }
        let stale = match hit {
            Hit::Canvas => false,
            Hit::Node(id) => !cx.store.contains_node(id),
            Hit::Edge(key) => !cx.store.contains_edge(key),
        };
        if stale {
            debug!("press on stale shape {:?} ignored", hit);
            return false;
        }
        let intent = cx.config.intent(mods);
        self.gesture = Some(Gesture {
            origin: pos,
            hit,
            intent,
            travelled: false,
        });
        match (hit, intent) {
            (Hit::Canvas, Intent::Connect) => {
                let title = cx.store.next_id().to_string();
                cx.store.add_node(title, pos.x, pos.y).is_some()
            }
            (Hit::Node(id), Intent::Connect) => {
                let Some(from) = cx.store.node(id).map(|n| n.pos()) else {
                    return false;
                };
                self.state = InteractionState::ConnectDragging { source: id, pointer: from };
                debug!("connect drag from node {}", id);
                true
            }
            (Hit::Node(id), _) => {
                let Some(at) = cx.store.node(id).map(|n| n.pos()) else {
                    return false;
                };
                self.state = InteractionState::NodeDragging {
                    node: id,
                    grab: Point::new(at.x - pos.x, at.y - pos.y),
                };
                false
            }
            _ => false,
        }
    }

    pub fn pointer_move(&mut self, cx: &mut Context<'_>, pos: Point) -> bool {
        if !finite(pos) {
            return false;
        }
        let click2 = cx.config.click_distance * cx.config.click_distance;
        if let Some(g) = self.gesture.as_mut() {
            if !g.travelled && g.origin.dist2(pos) > click2 {
                g.travelled = true;
            }
        }
        match &mut self.state {
            InteractionState::ConnectDragging { pointer, .. } => {
                *pointer = pos;
                true
            }
            InteractionState::NodeDragging { node, grab } => {
                trace!("drag node {} to ({}, {})", node, pos.x + grab.x, pos.y + grab.y);
                cx.store.move_node(*node, pos.x + grab.x, pos.y + grab.y)
            }
            _ => false,
        }
    }

    pub fn pointer_up(&mut self, cx: &mut Context<'_>, pos: Point) -> bool {
        if matches!(self.state, InteractionState::EditingLabel(_)) {
            return false;
        }
        let click2 = cx.config.click_distance * cx.config.click_distance;
        let click = self
            .gesture
            .take()
            .filter(|g| !g.travelled && !(finite(pos) && g.origin.dist2(pos) > click2));
        match std::mem::take(&mut self.state) {
            InteractionState::ConnectDragging { source, .. } => {
                self.finish_connect(cx, source);
                true
            }
            InteractionState::NodeDragging { .. } | InteractionState::Idle => match click {
                Some(g) => self.click(cx, g),
                None => false,
            },
            InteractionState::EditingLabel(_) => false,
        }
    }

    fn finish_connect(&mut self, cx: &mut Context<'_>, source: NodeId) {
        match cx.hover.current() {
            Some(target) if target != source && cx.store.contains_node(target) => {
                // The connection being replaced may be the selected edge.
                if let Some(sel) = cx.selection.selected_edge() {
                    if sel.connects(source, target) {
                        cx.selection.clear();
                    }
                }
                cx.store.add_edge(source, target, "");
            }
            _ => debug!("connect drag from node {} ended without a target", source),
        }
    }

    fn click(&mut self, cx: &mut Context<'_>, g: Gesture) -> bool {
        match (g.hit, g.intent) {
            (Hit::Node(id), Intent::Edit) => self.open_edit(cx, Entity::Node(id)),
            (Hit::Edge(key), Intent::Edit) => self.open_edit(cx, Entity::Edge(key)),
            (Hit::Node(id), _) => {
                if !cx.store.contains_node(id) {
                    return false;
                }
                cx.selection.select_node(id);
                true
            }
            (Hit::Edge(key), _) => {
                if !cx.store.contains_edge(key) {
                    return false;
                }
                cx.selection.select_edge(key);
                true
            }
            (Hit::Canvas, _) => {
                let had = cx.selection.current().is_some();
                cx.selection.clear();
                had
            }
        }
    }

    fn open_edit(&mut self, cx: &mut Context<'_>, target: Entity) -> bool {
        let text = match target {
            Entity::Node(id) => cx.store.node(id).map(|n| n.title.clone()),
            Entity::Edge(key) => cx.store.edge(key).map(|e| e.label.clone()),
        };
        let Some(text) = text else {
            return false;
        };
        debug!("label edit opened on {:?}", target);
        self.state = InteractionState::EditingLabel(LabelEditSession::open(target, text));
        true
    }

    pub fn delete_key(&mut self, cx: &mut Context<'_>) -> bool {
        if !self.is_idle() {
            return false;
        }
        match cx.selection.current() {
            Some(Entity::Node(id)) => {
                cx.store.remove_node(id);
                cx.hover.forget(id);
                cx.selection.clear();
                true
            }
            Some(Entity::Edge(key)) => {
                cx.store.remove_edge(key);
                cx.selection.clear();
                true
            }
            None => false,
        }
    }

    pub fn edit_commit_key(&mut self) -> bool {
        match &mut self.state {
            InteractionState::EditingLabel(s) => s.release_focus(),
            _ => false,
        }
    }

    pub fn edit_input(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            InteractionState::EditingLabel(s) => {
                s.update(text);
                true
            }
            _ => false,
        }
    }

    /// Ends the edit session, committing `text` to its target. Text over
    /// the length cap is discarded and the old value kept.
    pub fn edit_blur(&mut self, cx: &mut Context<'_>, text: impl Into<String>) -> bool {
        match std::mem::take(&mut self.state) {
            InteractionState::EditingLabel(session) => {
                let commit = session.finish(text);
                let applied = match commit.target {
                    Entity::Node(id) => cx.store.rename_node(id, commit.text),
                    Entity::Edge(key) => cx.store.relabel_edge(key, commit.text),
                };
                if !applied {
                    debug!("label edit on {:?} dropped (target gone or text too long)", commit.target);
                }
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Abandons whatever references `id` (drag, guide or edit session).
    pub fn forget_node(&mut self, id: NodeId) {
        let stale = match &self.state {
            InteractionState::Idle => false,
            InteractionState::ConnectDragging { source, .. } => *source == id,
            InteractionState::NodeDragging { node, .. } => *node == id,
            InteractionState::EditingLabel(s) => match s.target() {
                Entity::Node(n) => n == id,
                Entity::Edge(key) => key.touches(id),
            },
        };
        if stale {
            self.reset();
        }
    }

    pub fn forget_edge(&mut self, key: EdgeKey) {
        if let InteractionState::EditingLabel(s) = &self.state {
            if s.target() == Entity::Edge(key) {
                self.reset();
            }
        }
    }
}
