//! Console logging and panic reporting

use std::sync::Once;

use log::Level;

static INIT: Once = Once::new();

/// Route `log` records to the browser console
///
/// Only the first call installs the logger. An embedding page that already
/// installed its own keeps it.
pub fn init_logging(level: Level) {
    INIT.call_once(|| wasm_logger::init(wasm_logger::Config::new(level)));
}

/// Install the panic hook that routes panics to `console.error`
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
