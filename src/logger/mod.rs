//! Logger module
//!
//! Provides logging utilities for the responder:
//! - Server lifecycle logging through the global writer
//! - An injectable per-request log, silent by default
//! - Access logging with multiple formats
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogWriter;

use crate::config::{Config, LoggingConfig};
use std::net::SocketAddr;
use std::sync::Arc;

/// Per-request logging capability handed to the responder.
///
/// Every method defaults to doing nothing, so an implementation only
/// overrides what it wants to see.
pub trait RequestLog: Send + Sync {
    /// A request was answered
    fn access(&self, _entry: &AccessLogEntry) {}

    /// The payload file could not be served for a request
    fn payload_error(&self, _error: &crate::handler::PayloadError) {}

    /// A connection ended with a protocol or I/O error, or timed out
    fn connection_error(&self, _peer: &SocketAddr, _message: &str) {}
}

/// Request log that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRequestLog;

impl RequestLog for NoopRequestLog {}

/// Request log backed by a [`LogWriter`]
pub struct WriterRequestLog {
    writer: Arc<LogWriter>,
    format: String,
}

impl WriterRequestLog {
    pub fn new(writer: Arc<LogWriter>, format: impl Into<String>) -> Self {
        Self {
            writer,
            format: format.into(),
        }
    }
}

impl RequestLog for WriterRequestLog {
    fn access(&self, entry: &AccessLogEntry) {
        self.writer.write_access(&entry.format(&self.format));
    }

    fn payload_error(&self, error: &crate::handler::PayloadError) {
        self.writer.write_error(&format!("[ERROR] {error}"));
    }

    fn connection_error(&self, peer: &SocketAddr, message: &str) {
        self.writer
            .write_error(&format!("[ERROR] Connection from {peer}: {message}"));
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup. Returns the request log
/// matching `logging.access_log`.
pub fn init(config: &LoggingConfig) -> std::io::Result<Arc<dyn RequestLog>> {
    let writer = writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )?;
    Ok(request_log_for(config, writer))
}

/// Pick the request log for a logging configuration
pub fn request_log_for(config: &LoggingConfig, writer: Arc<LogWriter>) -> Arc<dyn RequestLog> {
    if config.access_log {
        Arc::new(WriterRequestLog::new(writer, config.access_log_format.clone()))
    } else {
        Arc::new(NoopRequestLog)
    }
}

/// Write to info log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Mock introspection endpoint started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!(
        "Serving {} at {}",
        config.responder.payload_file, config.responder.route
    ));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if config.logging.access_log {
        write_info(&format!(
            "Access log: {} ({})",
            config.logging.access_log_file.as_deref().unwrap_or("stdout"),
            config.logging.access_log_format
        ));
    }
    write_info("======================================\n");
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
