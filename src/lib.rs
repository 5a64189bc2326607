//! HTTP file server demonstrating browser caching strategies
//!
//! Visiting `/expires`, `/cacheControl`, `/lastModified` or `/etag` selects a
//! strategy for the next moments of browsing; resources requested meanwhile
//! are served with that strategy's headers, or answered with 304 when the
//! client's validator still matches.

pub mod cache;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
