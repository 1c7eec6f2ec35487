use graphpad_wasm::Editor;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn error_data(v: &JsValue, key: &str) -> JsValue {
    let err = Reflect::get(v, &JsValue::from_str("error")).unwrap();
    let data = Reflect::get(&err, &JsValue::from_str("data")).unwrap();
    Reflect::get(&data, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn invalid_ids_return_typed_errors() {
    let mut ed = Editor::new();
    let ver = ed.version();
    assert!(is_err(&ed.move_node_res(12345, 0.0, 0.0), "invalid_id"));
    assert!(is_err(&ed.remove_node_res(7), "invalid_id"));
    assert!(is_err(&ed.remove_edge_res(1, 2), "invalid_edge"));
    assert_eq!(ed.version(), ver, "state mutated on error");

    let a = ed.add_node("a", 0.0, 0.0).unwrap();
    assert!(is_err(&ed.add_edge_res(a, a, ""), "invalid_edge"));
    assert!(is_err(&ed.add_edge_res(a, 99, ""), "invalid_id"));
    assert_eq!(ed.edge_count(), 0);
}

#[wasm_bindgen_test]
fn non_finite_inputs_are_rejected() {
    let mut ed = Editor::new();
    assert!(is_err(&ed.add_node_res("a", f64::NAN, 0.0), "non_finite"));
    assert!(is_err(&ed.pick_res(0.0, f64::INFINITY), "non_finite"));
    assert_eq!(ed.node_count(), 0);
}

#[wasm_bindgen_test]
fn load_errors_carry_code_and_id() {
    let mut ed = Editor::new();
    ed.add_node("keep", 1.0, 2.0);
    let r = ed.load_json_str_res(
        r#"{"nodes":[{"id":1,"title":"a","x":0,"y":0}],"edges":[{"source":1,"target":9,"label":""}]}"#,
    );
    assert!(is_err(&r, "dangling_reference"));
    assert_eq!(error_data(&r, "id").as_f64(), Some(9.0));
    assert_eq!(ed.node_count(), 1);

    assert!(is_err(&ed.load_json_str_res("{nodes:"), "json_parse"));
    let dup = r#"{"nodes":[{"id":2,"title":"a","x":0,"y":0},{"id":2,"title":"b","x":0,"y":0}],"edges":[]}"#;
    assert!(is_err(&ed.load_json_str_res(dup), "duplicate_id"));
    assert_eq!(ed.node_count(), 1);
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    let mut ed = Editor::new();
    let cfg = js_sys::JSON::parse(r#"{"connect_modifier":"alt"}"#).unwrap();
    assert!(is_err(&ed.configure_res(cfg), "invalid_mode"));
    let cfg = js_sys::JSON::parse(r#"{"node_radius":-3}"#).unwrap();
    assert!(is_err(&ed.configure_res(cfg), "out_of_range"));
}

#[wasm_bindgen_test]
fn live_text_and_coordinates_share_the_load_caps() {
    let mut ed = Editor::new();
    assert_eq!(ed.add_node("nan", f64::NAN, 0.0), None);
    let long = "x".repeat(4 * 1024 + 1);
    assert!(is_err(&ed.add_node_res(&long, 0.0, 0.0), "caps_exceeded"));
    let a = ed.add_node("a", 0.0, 0.0).unwrap();
    let b = ed.add_node("b", 1.0, 0.0).unwrap();
    assert!(is_err(&ed.add_edge_res(a, b, &long), "caps_exceeded"));
    assert!(!ed.rename_node(a, &long));
    assert_eq!(ed.node_count(), 2);
    assert_eq!(ed.edge_count(), 0);

    let text = ed.to_json_string().unwrap();
    let r = Editor::new().load_json_str_res(&text);
    assert_eq!(Reflect::get(&r, &JsValue::from_str("ok")).unwrap().as_bool(), Some(true));
}
