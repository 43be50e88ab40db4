use edgecurve::model::Point;
use js_sys::{Float32Array, Object, Reflect, Uint32Array};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_u32(slice: &[u32]) -> Uint32Array {
    let arr = Uint32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
pub fn arr_f32(slice: &[f32]) -> Float32Array {
    let arr = Float32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
/// Points flattened as `[x0, y0, x1, y1, ...]`.
pub fn points_f32(points: &[Point]) -> Float32Array {
    let flat: Vec<f32> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    arr_f32(&flat)
}
pub fn point_obj(p: Point) -> JsValue {
    let o = new_obj();
    set_kv(&o, "x", &JsValue::from_f64(p.x as f64));
    set_kv(&o, "y", &JsValue::from_f64(p.y as f64));
    o.into()
}
/// Plain JS objects rather than `Map`s for serde maps.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}
