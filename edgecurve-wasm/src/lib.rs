use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logging;

pub use api::set_panic_hook;
pub use logging::init_logging;

#[wasm_bindgen]
pub struct Diagram { pub(crate) inner: edgecurve::Diagram }

impl Diagram {
    pub fn rs_new() -> Diagram { Diagram { inner: edgecurve::Diagram::new() } }
    pub fn rs_geom_version(&self) -> u64 { self.inner.geom_version() }
}
