//! `log` backend: the browser console on wasm32, stderr elsewhere.

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::{Result, SheetviewError};

pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format!("[{}] {}", record.target(), record.args());
        write(record.level(), &message);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write(level: Level, message: &str) {
    let message = wasm_bindgen::JsValue::from_str(message);
    match level {
        Level::Error => web_sys::console::error_1(&message),
        Level::Warn => web_sys::console::warn_1(&message),
        Level::Info => web_sys::console::info_1(&message),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write(level: Level, message: &str) {
    eprintln!("{level:<5} {message}");
}

/// Install [`ConsoleLogger`] as the global logger.
///
/// # Errors
/// Fails if another logger was installed first.
pub fn init(level: LevelFilter) -> Result<()> {
    log::set_logger(&LOGGER)
        .map_err(|e| SheetviewError::Other(format!("logger: {e}")))?;
    log::set_max_level(level);
    Ok(())
}
