//! Headless interaction core for a small directed-graph editor.
//!
//! [`Editor`] owns the entity store and the interaction state machine. The
//! renderer feeds it pointer, hover and keyboard events, and redraws from the
//! [`Frame`] handed to change listeners.

pub mod model;
pub mod config;
pub mod error;
pub mod frame;
pub mod hover;
pub mod interaction;
pub mod label_edit;
pub mod selection;
pub mod store;
pub mod geometry {
    pub mod limits;
    pub mod math;
}
pub mod algorithms {
    pub mod picking;
}
mod json;

pub use config::{EditorConfig, ModifierKey, Modifiers};
pub use error::{ConfigError, LoadError};
pub use frame::{ChangeListener, EditingView, Frame, Guide, ListenerId};
pub use interaction::{Intent, InteractionState};
pub use json::{Document, EdgeRecord, NodeRecord};
pub use model::{Edge, EdgeKey, Entity, Hit, Node, NodeId, Point};

use hover::HoverTracker;
use interaction::{Context, Interaction};
use log::debug;
use selection::SelectionManager;
use store::EntityStore;

/// External confirmation dialog consulted before a destructive clear.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub struct Editor {
    store: EntityStore,
    hover: HoverTracker,
    selection: SelectionManager,
    interaction: Interaction,
    config: EditorConfig,
    version: u64,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Editor {
            store: EntityStore::new(),
            hover: HoverTracker::new(),
            selection: SelectionManager::new(),
            interaction: Interaction::new(),
            config: EditorConfig::default(),
            version: 1,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn with_config(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Editor {
            config,
            ..Editor::new()
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Takes effect from the next press; a gesture in flight keeps the
    /// interpretation it started with.
    pub fn set_config(&mut self, config: EditorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Monotonic counter, bumped on every observable change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn selection(&self) -> Option<Entity> {
        self.selection.current()
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.selection.selected_node()
    }

    pub fn selected_edge(&self) -> Option<EdgeKey> {
        self.selection.selected_edge()
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hover.current()
    }

    pub fn state(&self) -> &InteractionState {
        self.interaction.state()
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            version: self.version,
            nodes: self.store.nodes(),
            edges: self.store.edges(),
            selection: self.selection.current(),
            hovered: self.hover.current(),
            guide: self.interaction.guide(&self.store),
            editing: self.interaction.editing().map(|s| EditingView {
                target: s.target(),
                text: s.buffer(),
                focused: s.is_focused(),
            }),
        }
    }

    // Change notification
    pub fn on_change(&mut self, listener: impl FnMut(&Frame<'_>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn changed(&mut self) {
        self.version = self.version.wrapping_add(1);
        if self.listeners.is_empty() {
            return;
        }
        let mut listeners = std::mem::take(&mut self.listeners);
        {
            let frame = self.frame();
            for (_, listener) in listeners.iter_mut() {
                listener(&frame);
            }
        }
        self.listeners = listeners;
    }

    fn settle(&mut self, changed: bool) -> bool {
        if changed {
            self.changed();
        }
        changed
    }

    fn split(&mut self) -> (&mut Interaction, Context<'_>) {
        (
            &mut self.interaction,
            Context {
                store: &mut self.store,
                selection: &mut self.selection,
                hover: &mut self.hover,
                config: &self.config,
            },
        )
    }

    // Input intake. Each returns true when a change notification was fired.
    pub fn on_pointer_down(&mut self, pos: Point, mods: Modifiers, hit: Hit) -> bool {
        let (machine, mut cx) = self.split();
        let changed = machine.pointer_down(&mut cx, pos, mods, hit);
        self.settle(changed)
    }

    pub fn on_pointer_move(&mut self, pos: Point) -> bool {
        let (machine, mut cx) = self.split();
        let changed = machine.pointer_move(&mut cx, pos);
        self.settle(changed)
    }

    pub fn on_pointer_up(&mut self, pos: Point) -> bool {
        let (machine, mut cx) = self.split();
        let changed = machine.pointer_up(&mut cx, pos);
        self.settle(changed)
    }

    /// Ignored for ids the store does not hold.
    pub fn on_hover_enter(&mut self, id: NodeId) -> bool {
        if !self.store.contains_node(id) {
            return false;
        }
        self.hover.enter(id);
        true
    }

    pub fn on_hover_leave(&mut self) {
        self.hover.leave();
    }

    pub fn on_delete_key(&mut self) -> bool {
        let (machine, mut cx) = self.split();
        let changed = machine.delete_key(&mut cx);
        self.settle(changed)
    }

    pub fn on_edit_commit_key(&mut self) -> bool {
        let changed = self.interaction.edit_commit_key();
        self.settle(changed)
    }

    pub fn on_edit_input(&mut self, text: impl Into<String>) -> bool {
        let changed = self.interaction.edit_input(text);
        self.settle(changed)
    }

    pub fn on_edit_blur(&mut self, text: impl Into<String>) -> bool {
        let (machine, mut cx) = self.split();
        let changed = machine.edit_blur(&mut cx, text);
        self.settle(changed)
    }

    /// Routes a key name through the configured delete and commit bindings.
    pub fn on_key_down(&mut self, key: &str) -> bool {
        if self.config.is_delete_key(key) {
            self.on_delete_key()
        } else if self.config.is_commit_key(key) {
            self.on_edit_commit_key()
        } else {
            false
        }
    }

    // Hit testing
    pub fn pick(&self, pos: Point) -> Hit {
        algorithms::picking::pick_impl(
            &self.store,
            pos,
            self.config.node_radius,
            self.config.edge_pick_tolerance,
        )
    }

    pub fn node_at(&self, pos: Point) -> Option<NodeId> {
        algorithms::picking::node_at(&self.store, pos, self.config.node_radius)
    }

    // Direct operations
    pub fn add_node(&mut self, title: impl Into<String>, x: f64, y: f64) -> Option<NodeId> {
        let id = self.store.add_node(title, x, y)?;
        self.changed();
        Some(id)
    }

    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(cascaded) = self.store.remove_node(id) else {
            return false;
        };
        self.selection.forget_node(id);
        self.hover.forget(id);
        self.interaction.forget_node(id);
        for key in cascaded {
            self.interaction.forget_edge(key);
        }
        self.changed();
        true
    }

    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        label: impl Into<String>,
    ) -> Option<EdgeKey> {
        let label = label.into();
        if source == target
            || !self.store.contains_node(source)
            || !self.store.contains_node(target)
            || !geometry::limits::in_text_bounds(&label)
        {
            return None;
        }
        if let Some(old) = self.store.connection(source, target).map(|e| e.key()) {
            self.selection.forget_edge(old);
            self.interaction.forget_edge(old);
        }
        let key = self.store.add_edge(source, target, label)?;
        self.changed();
        Some(key)
    }

    pub fn remove_edge(&mut self, key: EdgeKey) -> bool {
        if !self.store.remove_edge(key) {
            return false;
        }
        self.selection.forget_edge(key);
        self.interaction.forget_edge(key);
        self.changed();
        true
    }

    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> bool {
        let moved = self.store.move_node(id, x, y);
        self.settle(moved)
    }

    pub fn rename_node(&mut self, id: NodeId, title: impl Into<String>) -> bool {
        let renamed = self.store.rename_node(id, title);
        self.settle(renamed)
    }

    pub fn relabel_edge(&mut self, key: EdgeKey, label: impl Into<String>) -> bool {
        let relabeled = self.store.relabel_edge(key, label);
        self.settle(relabeled)
    }

    pub fn select_node(&mut self, id: NodeId) -> bool {
        if !self.store.contains_node(id) {
            return false;
        }
        self.selection.select_node(id);
        self.settle(true)
    }

    pub fn select_edge(&mut self, key: EdgeKey) -> bool {
        if !self.store.contains_edge(key) {
            return false;
        }
        self.selection.select_edge(key);
        self.settle(true)
    }

    pub fn clear_selection(&mut self) -> bool {
        let had = self.selection.current().is_some();
        self.selection.clear();
        self.settle(had)
    }

    // Documents
    pub fn to_document(&self) -> Document {
        json::to_document(&self.store)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(&self.store)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_document())
    }

    /// Replaces the whole graph. On error nothing changes, transient state
    /// included; on success every gesture, selection and hover is dropped.
    pub fn load_document(&mut self, doc: Document) -> Result<(), LoadError> {
        json::load_document(&mut self.store, doc)?;
        self.reset_transient();
        self.changed();
        Ok(())
    }

    pub fn load_json_value(&mut self, v: serde_json::Value) -> Result<(), LoadError> {
        json::from_json_impl_strict(&mut self.store, v)?;
        self.reset_transient();
        self.changed();
        Ok(())
    }

    pub fn load_json_str(&mut self, s: &str) -> Result<(), LoadError> {
        self.load_document(Document::from_json_str(s)?)
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.reset_transient();
        debug!("document cleared");
        self.changed();
    }

    /// Clears only if `confirm` agrees. A decline is a plain no-op.
    pub fn clear_with(&mut self, confirm: &mut impl Confirm) -> bool {
        if !confirm.confirm("Delete the whole graph?") {
            debug!("clear declined");
            return false;
        }
        self.clear();
        true
    }

    fn reset_transient(&mut self) {
        self.interaction.reset();
        self.selection.clear();
        self.hover.leave();
    }
}
