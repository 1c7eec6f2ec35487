use crate::interop::{new_obj, set_kv};
use graphpad::{ConfigError, LoadError};
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

#[inline]
pub fn invalid_edge(source: u32, target: u32, message: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "source", &JsValue::from_f64(source as f64));
    set_kv(&d, "target", &JsValue::from_f64(target as f64));
    err("invalid_edge", message.to_string(), Some(d.into()))
}

#[inline]
pub fn text_too_long(param: &str, got: usize) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "max", &JsValue::from_f64(graphpad::geometry::limits::MAX_TEXT_LEN as f64));
    set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("caps_exceeded", format!("{} longer than the text cap", param), Some(d.into()))
}

pub fn load_failed(e: &LoadError) -> JsValue {
    let data = e.node_id().map(|id| {
        let d = new_obj();
        set_kv(&d, "id", &JsValue::from_f64(id as f64));
        JsValue::from(d)
    });
    err(e.code(), e.to_string(), data)
}

pub fn config_failed(e: &ConfigError) -> JsValue {
    err(e.code(), e.to_string(), None)
}
