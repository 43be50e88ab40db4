use crate::Diagram;
use crate::error;
use crate::interop;
use edgecurve::bezier::{ControlSlot, CurveSnapshot};
use edgecurve::model::{EdgeType, Point};
use edgecurve::theme::Theme;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn curve_obj(snap: &CurveSnapshot) -> JsValue {
    let obj = interop::new_obj();
    interop::set_kv(&obj, "points", &interop::points_f32(&snap.points_list).into());
    interop::set_kv(&obj, "path", &JsValue::from_str(&snap.path));
    obj.into()
}

/// Accepts the core selector names plus the numeric indices `0` and `1`.
fn slot_from_js(which: &str) -> Result<ControlSlot, JsValue> {
    match which {
        "0" => Ok(ControlSlot::NearSource),
        "1" => Ok(ControlSlot::NearTarget),
        other => other.parse::<ControlSlot>().map_err(|e| error::edge(&e)),
    }
}

#[wasm_bindgen]
impl Diagram {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Diagram {
        crate::Diagram::rs_new()
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }
    /// Ids of edges whose geometry changed since the last call.
    pub fn take_dirty_edges(&mut self) -> js_sys::Uint32Array {
        interop::arr_u32(&self.inner.take_dirty_edges())
    }

    // Theme
    pub fn set_theme_res(&mut self, v: JsValue) -> JsValue {
        let value = match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(v) => v,
            Err(e) => return error::err("json_parse", e.to_string(), None),
        };
        match Theme::from_json_value(value) {
            Ok(theme) => match self.inner.set_theme(theme) {
                Ok(()) => error::ok(JsValue::from_bool(true)),
                Err(e) => error::theme(&e),
            },
            Err(e) => error::theme(&e),
        }
    }
    pub fn get_theme(&self) -> JsValue {
        match interop::to_js(self.inner.theme()) {
            Ok(v) => error::ok(v),
            Err(e) => error::serialize(e),
        }
    }

    // Nodes
    pub fn add_node_res(&mut self, x: f32, y: f32, width: f32, height: f32) -> JsValue {
        match self.inner.add_node(x, y, width, height) {
            Ok(id) => error::ok(JsValue::from_f64(id as f64)),
            Err(e) => error::edge(&e),
        }
    }
    pub fn move_node(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.inner.move_node(id, x, y).is_ok()
    }
    pub fn move_node_res(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        match self.inner.move_node(id, x, y) {
            Ok(()) => error::ok(JsValue::from_bool(true)),
            Err(e) => error::edge(&e),
        }
    }
    pub fn remove_node_res(&mut self, id: u32) -> JsValue {
        match self.inner.remove_node(id) {
            Ok(()) => error::ok(JsValue::from_bool(true)),
            Err(e) => error::edge(&e),
        }
    }
    pub fn node_count(&self) -> u32 {
        self.inner.node_count()
    }

    // Edges
    pub fn add_edge(&mut self, source: u32, target: u32) -> Option<u32> {
        self.inner.add_edge(source, target, EdgeType::Bezier).ok()
    }
    pub fn add_edge_res(&mut self, source: u32, target: u32, kind: &str) -> JsValue {
        let Ok(kind) = kind.parse::<EdgeType>() else {
            return error::invalid_kind(kind);
        };
        match self.inner.add_edge(source, target, kind) {
            Ok(id) => error::ok(JsValue::from_f64(id as f64)),
            Err(e) => error::edge(&e),
        }
    }
    pub fn remove_edge_res(&mut self, id: u32) -> JsValue {
        match self.inner.remove_edge(id) {
            Ok(()) => error::ok(JsValue::from_bool(true)),
            Err(e) => error::edge(&e),
        }
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.edge_count()
    }
    pub fn reconnect_edge_res(&mut self, id: u32, source: u32, target: u32) -> JsValue {
        match self.inner.reconnect_edge(id, source, target) {
            Ok(()) => error::ok(JsValue::from_bool(true)),
            Err(e) => error::edge(&e),
        }
    }
    pub fn set_edge_text(&mut self, id: u32, text: Option<String>) -> JsValue {
        match self.inner.set_edge_text(id, text) {
            Ok(()) => error::ok(JsValue::from_bool(true)),
            Err(e) => error::edge(&e),
        }
    }

    // Curve operations
    pub fn recompute_edge_res(&mut self, id: u32) -> JsValue {
        match self.inner.recompute_edge(id) {
            Ok(snap) => error::ok(curve_obj(&snap)),
            Err(e) => error::edge(&e),
        }
    }
    pub fn set_edge_start_point_res(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        match self.inner.set_edge_start_point(id, Point::new(x, y)) {
            Ok(()) => error::ok(JsValue::from_bool(true)),
            Err(e) => error::edge(&e),
        }
    }
    pub fn set_edge_end_point_res(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        match self.inner.set_edge_end_point(id, Point::new(x, y)) {
            Ok(()) => error::ok(JsValue::from_bool(true)),
            Err(e) => error::edge(&e),
        }
    }
    /// `which` is "near-source"/"sNext" or "near-target"/"ePre".
    pub fn adjust_control_res(&mut self, id: u32, which: &str, x: f32, y: f32) -> JsValue {
        let slot = match slot_from_js(which) {
            Ok(s) => s,
            Err(e) => return e,
        };
        match self.inner.adjust_control(id, Point::new(x, y), slot) {
            Ok(snap) => error::ok(curve_obj(&snap)),
            Err(e) => error::edge(&e),
        }
    }
    pub fn get_path(&self, id: u32) -> JsValue {
        match self.inner.bezier_edge(id) {
            Ok(b) => JsValue::from_str(b.path()),
            Err(_) => JsValue::NULL,
        }
    }
    pub fn get_points_res(&self, id: u32) -> JsValue {
        match self.inner.bezier_edge(id) {
            Ok(b) => error::ok(interop::points_f32(b.points_list()).into()),
            Err(e) => error::edge(&e),
        }
    }
    pub fn text_anchor_res(&self, id: u32) -> JsValue {
        match self.inner.text_anchor(id) {
            Some(p) => error::ok(interop::point_obj(p)),
            None => error::invalid_id("edge", id),
        }
    }
    pub fn get_edge_res(&self, id: u32) -> JsValue {
        let Some(edge) = self.inner.edge(id) else {
            return error::invalid_id("edge", id);
        };
        match interop::to_js(&edge.data()) {
            Ok(v) => error::ok(v),
            Err(e) => error::serialize(e),
        }
    }

    // Documents
    pub fn to_json(&self) -> JsValue {
        match self.inner.to_json_value().map(|doc| interop::to_js(&doc)) {
            Ok(Ok(v)) => v,
            _ => JsValue::NULL,
        }
    }
    pub fn to_json_res(&self) -> JsValue {
        match self.inner.to_json_value() {
            Ok(doc) => match interop::to_js(&doc) {
                Ok(v) => error::ok(v),
                Err(e) => error::serialize(e),
            },
            Err(e) => error::document(&e),
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match self.inner.from_json_value(val) {
                Ok(()) => error::ok(JsValue::from_bool(true)),
                Err(e) => error::document(&e),
            },
            Err(e) => error::err("json_parse", e.to_string(), None),
        }
    }
    pub fn to_svg_paths(&self) -> JsValue {
        match interop::to_js(&self.inner.to_svg_paths()) {
            Ok(v) => v,
            Err(_) => JsValue::NULL,
        }
    }
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}
