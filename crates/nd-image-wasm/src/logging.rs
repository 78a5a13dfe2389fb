//! Forwarding `log` records to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::str::FromStr;
use wasm_bindgen::prelude::*;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            Level::Info => console::info_1(&message),
            Level::Debug => console::debug_1(&message),
            Level::Trace => console::log_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger (once) and set the maximum level.
pub(crate) fn install(level: LevelFilter) {
    // Only the first call installs; later calls just adjust the level
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Parse a level name, defaulting to `warn`.
fn parse_level(level: Option<&str>) -> Result<LevelFilter, String> {
    match level {
        None => Ok(LevelFilter::Warn),
        Some(name) => {
            LevelFilter::from_str(name).map_err(|_| format!("Unknown log level: {}", name))
        }
    }
}

/// Route library logging to the console at `level`
/// (`off`, `error`, `warn`, `info`, `debug` or `trace`; default `warn`).
///
/// # Example (TypeScript)
///
/// ```typescript
/// init_logging('debug'); // show timer start/stop and cached resolutions
/// ```
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) -> Result<(), JsValue> {
    let level = parse_level(level.as_deref()).map_err(|e| JsValue::from_str(&e))?;
    install(level);
    Ok(())
}
