// Routes `log` records from the core crate to the browser console.

use crate::error;
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&msg),
            Level::Warn => console::warn_1(&msg),
            Level::Info => console::info_1(&msg),
            Level::Debug | Level::Trace => console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger at `level` ("off", "error", ... "trace").
/// Calling again only changes the level.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> JsValue {
    let filter = match level.parse::<LevelFilter>() {
        Ok(f) => f,
        Err(_) => return error::err("invalid_level", format!("unknown log level '{}'", level), None),
    };
    // Already installed on repeat calls.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
    error::ok(JsValue::from_bool(true))
}
