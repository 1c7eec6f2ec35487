use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

#[wasm_bindgen]
pub struct Editor {
    pub(crate) inner: graphpad::Editor,
    // Handles given to JS index into this; a slot empties once unsubscribed.
    pub(crate) listeners: Vec<Option<graphpad::ListenerId>>,
}

impl Editor {
    pub fn rs_new() -> Editor { Editor { inner: graphpad::Editor::new(), listeners: Vec::new() } }
    pub fn rs_version(&self) -> u64 { self.inner.version() }
}
