use crate::error;
use crate::interop::{arr_f32, arr_u32, new_obj, set_kv, to_js};
use crate::Editor;
use graphpad::geometry::limits;
use graphpad::{Document, EdgeKey, EditorConfig, Hit, Modifiers, Point};
use js_sys::Function;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Routes `log` output to the browser console. Safe to call more than once.
#[wasm_bindgen]
pub fn init_logging() {
    set_panic_hook();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"graphpad: logger already initialised".into());
    }
}

fn finite2(x: f64, y: f64) -> Option<JsValue> {
    if !x.is_finite() {
        return Some(error::non_finite("x"));
    }
    if !y.is_finite() {
        return Some(error::non_finite("y"));
    }
    None
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        crate::Editor::rs_new()
    }
    pub fn version(&self) -> u64 {
        self.rs_version()
    }

    /// Accepts a partial config object; omitted fields keep their defaults.
    pub fn configure_res(&mut self, v: JsValue) -> JsValue {
        let val = match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => val,
            Err(e) => return error::err("json_parse", format!("{}", e), None),
        };
        let applied = EditorConfig::from_json_value(val).and_then(|cfg| self.inner.set_config(cfg));
        match applied {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::config_failed(&e),
        }
    }
    pub fn config(&self) -> JsValue {
        to_js(self.inner.config())
    }

    // Nodes/Edges basic
    /// `undefined` for non-finite coordinates, an over-long title or once
    /// ids run out.
    pub fn add_node(&mut self, title: &str, x: f64, y: f64) -> Option<u32> {
        self.inner.add_node(title, x, y)
    }
    pub fn add_node_res(&mut self, title: &str, x: f64, y: f64) -> JsValue {
        if let Some(e) = finite2(x, y) {
            return e;
        }
        if !limits::in_text_bounds(title) {
            return error::text_too_long("title", title.len());
        }
        match self.inner.add_node(title, x, y) {
            Some(id) => error::ok(JsValue::from_f64(id as f64)),
            None => error::err("caps_exceeded", "node ids exhausted", None),
        }
    }
    pub fn remove_node(&mut self, id: u32) -> bool {
        self.inner.remove_node(id)
    }
    pub fn remove_node_res(&mut self, id: u32) -> JsValue {
        if !self.inner.store().contains_node(id) {
            return error::invalid_id("node", id);
        }
        error::ok(JsValue::from_bool(self.inner.remove_node(id)))
    }
    pub fn move_node(&mut self, id: u32, x: f64, y: f64) -> bool {
        self.inner.move_node(id, x, y)
    }
    pub fn move_node_res(&mut self, id: u32, x: f64, y: f64) -> JsValue {
        if let Some(e) = finite2(x, y) {
            return e;
        }
        if !self.inner.store().contains_node(id) {
            return error::invalid_id("node", id);
        }
        error::ok(JsValue::from_bool(self.inner.move_node(id, x, y)))
    }
    pub fn rename_node(&mut self, id: u32, title: &str) -> bool {
        self.inner.rename_node(id, title)
    }
    pub fn get_node(&self, id: u32) -> JsValue {
        match self.inner.store().node(id) {
            Some(n) => to_js(n),
            None => JsValue::NULL,
        }
    }
    pub fn node_count(&self) -> u32 {
        self.inner.store().node_count() as u32
    }

    pub fn add_edge(&mut self, source: u32, target: u32, label: &str) -> bool {
        self.inner.add_edge(source, target, label).is_some()
    }
    pub fn add_edge_res(&mut self, source: u32, target: u32, label: &str) -> JsValue {
        for id in [source, target] {
            if !self.inner.store().contains_node(id) {
                return error::invalid_id("node", id);
            }
        }
        if source == target {
            return error::invalid_edge(source, target, "edge endpoints cannot be the same node");
        }
        if !limits::in_text_bounds(label) {
            return error::text_too_long("label", label.len());
        }
        match self.inner.add_edge(source, target, label) {
            Some(key) => error::ok(to_js(&key)),
            None => error::invalid_edge(source, target, "failed to add edge"),
        }
    }
    pub fn remove_edge(&mut self, source: u32, target: u32) -> bool {
        self.inner.remove_edge(EdgeKey::new(source, target))
    }
    pub fn remove_edge_res(&mut self, source: u32, target: u32) -> JsValue {
        if !self.inner.remove_edge(EdgeKey::new(source, target)) {
            return error::invalid_edge(source, target, "no such edge");
        }
        error::ok(JsValue::TRUE)
    }
    pub fn relabel_edge(&mut self, source: u32, target: u32, label: &str) -> bool {
        self.inner.relabel_edge(EdgeKey::new(source, target), label)
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.store().edge_count() as u32
    }

    // Selection
    pub fn select_node(&mut self, id: u32) -> bool {
        self.inner.select_node(id)
    }
    pub fn select_edge(&mut self, source: u32, target: u32) -> bool {
        self.inner.select_edge(EdgeKey::new(source, target))
    }
    pub fn clear_selection(&mut self) -> bool {
        self.inner.clear_selection()
    }
    pub fn selection(&self) -> JsValue {
        to_js(&self.inner.selection())
    }
    pub fn state_name(&self) -> String {
        self.inner.state().name().to_string()
    }

    // Typed arrays getters
    pub fn get_node_data(&self) -> JsValue {
        let nodes = self.inner.store().nodes();
        let ids: Vec<u32> = nodes.iter().map(|n| n.id).collect();
        let pos: Vec<f32> = nodes.iter().flat_map(|n| [n.x as f32, n.y as f32]).collect();
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "positions", &arr_f32(&pos).into());
        obj.into()
    }
    pub fn get_edge_data(&self) -> JsValue {
        let endpoints: Vec<u32> = self
            .inner
            .store()
            .edges()
            .iter()
            .flat_map(|e| [e.source, e.target])
            .collect();
        let obj = new_obj();
        set_kv(&obj, "endpoints", &arr_u32(&endpoints).into());
        obj.into()
    }
    /// Full redraw snapshot: entities, selection, hover, guide and edit box.
    pub fn frame(&self) -> JsValue {
        to_js(&self.inner.frame())
    }

    // Picking
    pub fn pick(&self, x: f64, y: f64) -> JsValue {
        to_js(&self.inner.pick(Point::new(x, y)))
    }
    pub fn pick_res(&self, x: f64, y: f64) -> JsValue {
        if let Some(e) = finite2(x, y) {
            return e;
        }
        error::ok(self.pick(x, y))
    }

    // Pointer input. `mods` bits: 1 shift, 2 ctrl, 4 alt, 8 meta.
    pub fn pointer_down_canvas(&mut self, x: f64, y: f64, mods: u8) -> bool {
        self.inner.on_pointer_down(Point::new(x, y), Modifiers::from_bits(mods), Hit::Canvas)
    }
    pub fn pointer_down_node(&mut self, id: u32, x: f64, y: f64, mods: u8) -> bool {
        self.inner.on_pointer_down(Point::new(x, y), Modifiers::from_bits(mods), Hit::Node(id))
    }
    pub fn pointer_down_edge(&mut self, source: u32, target: u32, x: f64, y: f64, mods: u8) -> bool {
        let hit = Hit::Edge(EdgeKey::new(source, target));
        self.inner.on_pointer_down(Point::new(x, y), Modifiers::from_bits(mods), hit)
    }
    /// Press with hit testing done here instead of by the renderer.
    pub fn pointer_down_at(&mut self, x: f64, y: f64, mods: u8) -> bool {
        let p = Point::new(x, y);
        let hit = self.inner.pick(p);
        self.inner.on_pointer_down(p, Modifiers::from_bits(mods), hit)
    }
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.on_pointer_move(Point::new(x, y))
    }
    /// Move that also derives hover from the node under the pointer.
    pub fn pointer_move_at(&mut self, x: f64, y: f64) -> bool {
        let p = Point::new(x, y);
        match self.inner.node_at(p) {
            Some(id) if self.inner.hovered() != Some(id) => {
                self.inner.on_hover_enter(id);
            }
            None if self.inner.hovered().is_some() => self.inner.on_hover_leave(),
            _ => {}
        }
        self.inner.on_pointer_move(p)
    }
    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.inner.on_pointer_up(Point::new(x, y))
    }

    // Hover and keyboard
    pub fn hover_enter(&mut self, id: u32) -> bool {
        self.inner.on_hover_enter(id)
    }
    pub fn hover_leave(&mut self) {
        self.inner.on_hover_leave()
    }
    pub fn hovered(&self) -> Option<u32> {
        self.inner.hovered()
    }
    pub fn key_down(&mut self, key: &str) -> bool {
        self.inner.on_key_down(key)
    }
    pub fn delete_key(&mut self) -> bool {
        self.inner.on_delete_key()
    }
    pub fn edit_commit_key(&mut self) -> bool {
        self.inner.on_edit_commit_key()
    }
    pub fn edit_input(&mut self, text: &str) -> bool {
        self.inner.on_edit_input(text)
    }
    pub fn edit_blur(&mut self, text: &str) -> bool {
        self.inner.on_edit_blur(text)
    }

    // Documents
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.to_document())
    }
    pub fn to_json_string(&self) -> Option<String> {
        self.inner.to_json_string().ok()
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<Document>(v) {
            Ok(doc) => self.inner.load_document(doc).is_ok(),
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<Document>(v) {
            Ok(doc) => match self.inner.load_document(doc) {
                Ok(()) => error::ok(JsValue::TRUE),
                Err(e) => error::load_failed(&e),
            },
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }
    pub fn load_json_str_res(&mut self, s: &str) -> JsValue {
        match self.inner.load_json_str(s) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::load_failed(&e),
        }
    }
    pub fn clear(&mut self) {
        self.inner.clear()
    }
    /// Calls `confirm(prompt)` and clears only on a truthy answer.
    pub fn clear_confirmed(&mut self, confirm: &Function) -> bool {
        let mut ask = |prompt: &str| {
            confirm
                .call1(&JsValue::NULL, &JsValue::from_str(prompt))
                .map(|v| v.is_truthy())
                .unwrap_or(false)
        };
        self.inner.clear_with(&mut ask)
    }

    /// Registers `cb(frame)` for every change and returns a handle for
    /// `off_change`. The callback must not call back into this editor
    /// synchronously.
    pub fn on_change(&mut self, cb: Function) -> u32 {
        let id = self.inner.on_change(move |frame| {
            if let Err(e) = cb.call1(&JsValue::NULL, &to_js(frame)) {
                web_sys::console::error_2(&"graphpad: change listener threw".into(), &e);
            }
        });
        self.listeners.push(Some(id));
        (self.listeners.len() - 1) as u32
    }
    pub fn off_change(&mut self, handle: u32) -> bool {
        match self.listeners.get_mut(handle as usize).and_then(Option::take) {
            Some(id) => self.inner.remove_listener(id),
            None => false,
        }
    }
}
