//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Server lifecycle logging
//! - Caching mode transitions
//! - Access logging in multiple formats
//! - Error and warning logging

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::cache::{CachingMode, ResourceError};
use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
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
    write_info("Cache demo server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Document root: {}", config.server.root));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    write_info(&format!(
        "Mode window: {}ms, Expires: +{}ms, max-age: {}s",
        config.cache.mode_reset_ms, config.cache.expires_ms, config.cache.max_age_secs
    ));
    write_info("Trigger paths: /, /expires, /cacheControl, /lastModified, /etag");
    write_info("======================================\n");
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_mode_activated(mode: CachingMode) {
    write_info(&format!("[Mode] Activated: {mode}"));
}

pub fn log_mode_expired(mode: CachingMode) {
    write_info(&format!("[Mode] Expired: {mode}"));
}

pub fn log_resource_error(path: &str, err: &ResourceError) {
    if err.is_not_found() {
        log_warning(&format!("{path}: {err}"));
    } else {
        log_error(&format!("{path}: {err}"));
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_shutdown() {
    write_info("\n[Shutdown] Stopped accepting connections");
}
