//! `log` backend that writes to the browser console.

use log::{LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    #[cfg(target_arch = "wasm32")]
    fn log(&self, record: &Record) {
        use log::Level;

        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("[{}] {}", record.target(), record.args());
        let msg = wasm_bindgen::JsValue::from_str(&msg);
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    // No console off the web; native hosts bring their own logger.
    #[cfg(not(target_arch = "wasm32"))]
    fn log(&self, _record: &Record) {}

    fn flush(&self) {}
}

/// Install the console logger once; later calls only adjust the level.
/// Returns `false` if a logger was already installed.
pub fn init(level: LevelFilter) -> bool {
    let installed = log::set_logger(&LOGGER).is_ok();
    log::set_max_level(level);
    if !installed {
        log::debug!("logger already installed, level set to {level}");
    }
    installed
}

/// Parse a level name (`"warn"`, `"debug"`, …). Unknown names yield `None`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}
