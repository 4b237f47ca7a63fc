//! Network sink for remote logging
//!
//! Streams events to a TCP endpoint as JSON lines, one object per event.

use crate::core::output_format::to_json;
use crate::core::{LogEvent, LoggerError, Result, Sink, TimestampFormat};
use parking_lot::Mutex;
use std::io::Write;
use std::net::TcpStream;
use std::time::Duration;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends events to a remote TCP server
///
/// # Example
///
/// ```no_run
/// use rust_structured_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .sink(NetworkSink::new("127.0.0.1:5170").expect("log collector reachable"))
///     .build();
/// logger.information("Shipped {OrderId}", &[&17]).unwrap();
/// ```
pub struct NetworkSink {
    stream: Mutex<Option<TcpStream>>,
    address: String,
    reconnect_on_error: bool,
    timestamp_format: TimestampFormat,
}

impl NetworkSink {
    /// Connect to `address` (e.g. `"localhost:5170"`)
    ///
    /// # Errors
    ///
    /// Returns error if the connection fails
    pub fn new(address: &str) -> Result<Self> {
        let stream = connect(address)?;
        Ok(Self {
            stream: Mutex::new(Some(stream)),
            address: address.to_string(),
            reconnect_on_error: true,
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Enable or disable one reconnect attempt after a failed write
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn send(&self, stream: &mut Option<TcpStream>, payload: &[u8]) -> Result<()> {
        let first_error = match stream.as_mut() {
            Some(s) => match s.write_all(payload) {
                Ok(()) => return Ok(()),
                Err(e) => e.to_string(),
            },
            None => "not connected".to_string(),
        };
        *stream = None;

        if !self.reconnect_on_error {
            return Err(LoggerError::sink("network", first_error));
        }

        let mut fresh = connect(&self.address).map_err(|reconnect_err| {
            LoggerError::sink(
                "network",
                format!("{} (reconnect: {})", first_error, reconnect_err),
            )
        })?;
        fresh.write_all(payload)?;
        *stream = Some(fresh);
        Ok(())
    }
}

fn connect(address: &str) -> Result<TcpStream> {
    let stream = TcpStream::connect(address)
        .map_err(|e| LoggerError::io_operation("connecting to log server", address, e))?;
    stream.set_write_timeout(Some(IO_TIMEOUT))?;
    stream.set_nodelay(true)?;
    Ok(stream)
}

impl Sink for NetworkSink {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        let mut payload = serde_json::to_vec(&to_json(event, &self.timestamp_format))?;
        payload.push(b'\n');

        let mut stream = self.stream.lock();
        self.send(&mut stream, &payload)
    }

    fn flush(&self) -> Result<()> {
        if let Some(stream) = self.stream.lock().as_mut() {
            stream.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "network"
    }
}
