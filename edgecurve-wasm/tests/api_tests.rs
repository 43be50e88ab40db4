#![cfg(target_arch = "wasm32")]

use edgecurve_wasm::Diagram;
use js_sys::{Float32Array, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(v: &JsValue, k: &str) -> JsValue {
    Reflect::get(v, &JsValue::from_str(k)).unwrap()
}

fn is_err(v: &JsValue, code: &str) -> bool {
    if get(v, "ok").as_bool() != Some(false) {
        return false;
    }
    get(&get(v, "error"), "code").as_string().map_or(false, |s| s == code)
}

fn value(v: &JsValue) -> JsValue {
    assert_eq!(get(v, "ok").as_bool(), Some(true));
    get(v, "value")
}

fn two_nodes(d: &mut Diagram) -> (u32, u32) {
    let a = value(&d.add_node_res(0.0, 0.0, 100.0, 80.0)).as_f64().unwrap() as u32;
    let b = value(&d.add_node_res(400.0, 0.0, 100.0, 80.0)).as_f64().unwrap() as u32;
    (a, b)
}

#[wasm_bindgen_test]
fn bezier_edge_path_and_points() {
    let mut d = Diagram::new();
    let (a, b) = two_nodes(&mut d);
    let e = d.add_edge(a, b).expect("edge id");
    assert_eq!(d.get_path(e).as_string().as_deref(), Some("M 50 0 C 150 0, 250 0, 350 0"));
    let pts = Float32Array::new(&value(&d.get_points_res(e)));
    assert_eq!(pts.to_vec(), vec![50.0, 0.0, 150.0, 0.0, 250.0, 0.0, 350.0, 0.0]);
}

#[wasm_bindgen_test]
fn adjust_control_returns_curve() {
    let mut d = Diagram::new();
    let (a, b) = two_nodes(&mut d);
    let e = d.add_edge(a, b).unwrap();
    let r = d.adjust_control_res(e, "sNext", 120.0, -40.0);
    let path = get(&value(&r), "path").as_string().unwrap();
    assert_eq!(path, "M 50 0 C 120 -40, 250 0, 350 0");
    let r = d.adjust_control_res(e, "1", 280.0, 40.0);
    let path = get(&value(&r), "path").as_string().unwrap();
    assert_eq!(path, "M 50 0 C 120 -40, 280 40, 350 0");
}

#[wasm_bindgen_test]
fn invalid_selector_is_typed_and_harmless() {
    let mut d = Diagram::new();
    let (a, b) = two_nodes(&mut d);
    let e = d.add_edge(a, b).unwrap();
    let before = d.get_path(e).as_string();
    let ver = d.geom_version();
    assert!(is_err(&d.adjust_control_res(e, "middle", 0.0, 0.0), "invalid_selector"));
    assert_eq!(d.get_path(e).as_string(), before);
    assert_eq!(d.geom_version(), ver);
}

#[wasm_bindgen_test]
fn typed_errors_for_bad_ids_and_kinds() {
    let mut d = Diagram::new();
    let (a, b) = two_nodes(&mut d);
    assert!(is_err(&d.add_edge_res(a, 99, "bezier"), "invalid_id"));
    assert!(is_err(&d.add_edge_res(a, a, "bezier"), "invalid_edge"));
    assert!(is_err(&d.add_edge_res(a, b, "spline"), "invalid_kind"));
    let line = value(&d.add_edge_res(a, b, "line")).as_f64().unwrap() as u32;
    assert!(is_err(&d.recompute_edge_res(line), "not_bezier"));
    assert!(is_err(&d.move_node_res(a, f32::NAN, 0.0), "non_finite"));
    assert!(is_err(&d.add_node_res(0.0, 0.0, -1.0, 10.0), "out_of_bounds"));
}

#[wasm_bindgen_test]
fn json_round_trip() {
    let mut d = Diagram::new();
    let (a, b) = two_nodes(&mut d);
    d.add_edge(a, b).unwrap();
    let doc = d.to_json();
    let mut other = Diagram::new();
    value(&other.from_json_res(doc));
    assert_eq!(other.edge_count(), 1);
    assert!(is_err(&other.from_json_res(JsValue::from_str("nope")), "json_parse"));
}

#[wasm_bindgen_test]
fn logging_levels() {
    value(&edgecurve_wasm::init_logging("debug"));
    assert!(is_err(&edgecurve_wasm::init_logging("chatty"), "invalid_level"));
}
