use edgecurve::error::{DocError, EdgeError, ThemeError};
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

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
pub fn invalid_selector(got: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_str(got));
    err("invalid_selector", "selector must be 'near-source' (sNext) or 'near-target' (ePre)", Some(d.into()))
}

#[inline]
pub fn invalid_kind(got: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_str(got));
    err("invalid_kind", "edge kind must be 'line' or 'bezier'", Some(d.into()))
}

#[inline]
pub fn serialize(e: serde_wasm_bindgen::Error) -> JsValue {
    err("serialize", e.to_string(), None)
}

pub fn edge(e: &EdgeError) -> JsValue {
    match e {
        EdgeError::InvalidSelector(got) => invalid_selector(got),
        EdgeError::NotInitialized => err("not_initialized", e.to_string(), None),
        EdgeError::UnknownNode(id) => invalid_id("node", *id),
        EdgeError::UnknownEdge(id) => invalid_id("edge", *id),
        EdgeError::NotBezier(id) => {
            let d = new_obj(); set_kv(&d, "edge", &JsValue::from_f64(*id as f64));
            err("not_bezier", e.to_string(), Some(d.into()))
        }
        EdgeError::SameNode => err("invalid_edge", e.to_string(), None),
        EdgeError::NonFinite(param) => non_finite(param),
        EdgeError::OutOfBounds(param) => {
            let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
            err("out_of_bounds", e.to_string(), Some(d.into()))
        }
        EdgeError::CapacityExceeded { .. } | EdgeError::TextTooLong(_) => err("caps_exceeded", e.to_string(), None),
    }
}

pub fn theme(e: &ThemeError) -> JsValue { err("invalid_theme", e.to_string(), None) }

pub fn document(e: &DocError) -> JsValue {
    match e {
        DocError::Json(_) => err("json_parse", e.to_string(), None),
        DocError::TooLarge { .. } => err("caps_exceeded", e.to_string(), None),
        _ => err("invalid_document", e.to_string(), None),
    }
}
