//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, trigger path
//! handling, and resource dispatch.

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use hyper::{HeaderMap, Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::cache::{mode_from_query, CachingMode};
use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};

const FAVICON_PATH: &str = "/favicon.ico";

/// Request context encapsulating information needed for request processing
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
    pub if_modified_since: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    /// Collect the parts of a request the router consumes
    pub fn new(method: &'a Method, uri: &'a hyper::Uri, headers: &'a HeaderMap) -> Self {
        Self {
            method,
            path: uri.path(),
            query: uri.query(),
            is_head: *method == Method::HEAD,
            if_none_match: headers.get(IF_NONE_MATCH).and_then(|v| v.to_str().ok()),
            if_modified_since: headers.get(IF_MODIFIED_SINCE).and_then(|v| v.to_str().ok()),
        }
    }
}

/// Routed response together with the caching mode it was served under
pub struct Routed {
    pub response: Response<Full<Bytes>>,
    pub mode: CachingMode,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();
    let ctx = RequestContext::new(&parts.method, &parts.uri, &parts.headers);

    let routed = route_request(&ctx, &state).await;

    if state.config.logging.access_log {
        let uri = parts
            .uri
            .path_and_query()
            .map_or_else(|| ctx.path.to_string(), ToString::to_string);
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), ctx.method.to_string(), uri);
        entry.status = routed.response.status().as_u16();
        entry.body_bytes = routed
            .response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.mode = routed.mode.to_string();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(routed.response)
}

/// Route request based on path
///
/// 1. Non-GET/HEAD methods are rejected
/// 2. Trigger paths activate their mode and serve the landing page
/// 3. The favicon is answered with an empty body
/// 4. Everything else is a resource, negotiated under the request's mode
pub async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Routed {
    if !matches!(*ctx.method, Method::GET | Method::HEAD) {
        logger::log_warning(&format!("Method not allowed: {}", ctx.method));
        return Routed {
            response: http::build_405_response(),
            mode: state.modes.current(),
        };
    }

    if let Some(mode) = CachingMode::from_trigger_path(ctx.path) {
        state.modes.activate(mode);
        logger::log_mode_activated(mode);
        return Routed {
            response: static_files::serve_landing_page(ctx, state).await,
            mode,
        };
    }

    if ctx.path == FAVICON_PATH {
        return Routed {
            response: http::build_empty_response(),
            mode: state.modes.current(),
        };
    }

    let mode = effective_mode(ctx, state);
    Routed {
        response: static_files::serve_resource(ctx, state, mode).await,
        mode,
    }
}

/// Mode for a resource request: an explicit `?cache=` wins over the shared selector
fn effective_mode(ctx: &RequestContext<'_>, state: &AppState) -> CachingMode {
    mode_from_query(ctx.query).unwrap_or_else(|| state.modes.current())
}
