//! Last-resort diagnostics for the logging pipeline itself
//!
//! Sink failures cannot be reported through the sinks that failed, so they
//! are written here instead. By default messages go to stderr. A process-wide
//! handler can be installed to redirect them (for example into a test
//! buffer or an external monitor).
//!
//! A handler that logs through a `Logger` whose sink fails again would loop
//! forever; nested writes on the same thread therefore bypass the handler
//! and go straight to stderr.

use parking_lot::RwLock;
use std::cell::Cell;
use std::sync::Arc;

/// Receives one diagnostic line per call
pub type SelfLogHandler = Arc<dyn Fn(&str) + Send + Sync>;

static HANDLER: RwLock<Option<SelfLogHandler>> = parking_lot::const_rwlock(None);

thread_local! {
    static IN_HANDLER: Cell<bool> = const { Cell::new(false) };
}

/// Route diagnostics to `handler` instead of stderr
pub fn enable(handler: SelfLogHandler) {
    *HANDLER.write() = Some(handler);
}

/// Restore the default stderr output
pub fn disable() {
    *HANDLER.write() = None;
}

pub fn write_line(message: &str) {
    let handler = HANDLER.read().clone();
    let handler = match handler {
        Some(handler) if !IN_HANDLER.with(Cell::get) => handler,
        _ => {
            eprintln!("{}", message);
            return;
        }
    };

    IN_HANDLER.with(|flag| flag.set(true));
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler(message)));
    IN_HANDLER.with(|flag| flag.set(false));

    if result.is_err() {
        eprintln!("[LOGGER CRITICAL] self-log handler panicked while reporting: {}", message);
    }
}

/// Extract a readable message from a caught panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
