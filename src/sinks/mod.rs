//! Sink implementations

pub mod background;
#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;
#[cfg(feature = "network")]
pub mod network;

pub use background::{BackgroundSink, OverflowPolicy, DEFAULT_SHUTDOWN_TIMEOUT};
#[cfg(feature = "console")]
pub use console::ConsoleSink;
#[cfg(feature = "file")]
pub use file::FileSink;
pub use memory::InMemorySink;
#[cfg(feature = "network")]
pub use network::NetworkSink;
