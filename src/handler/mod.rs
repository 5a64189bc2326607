//! Request handler module
//!
//! Responsible for request routing dispatch and resource serving.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{handle_request, route_request, RequestContext};
