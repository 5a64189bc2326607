//! Static file serving module
//!
//! Serves the landing page and negotiated resources.

use chrono::Utc;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::cache::{self, CachingMode, Resource, Validators};
use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;

/// Built-in landing page used when the configured file is missing
const DEFAULT_LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Browser caching strategies</title>
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <h1>Browser caching strategies</h1>
    <p>Open a strategy, then watch the network panel while reloading.</p>
    <ul>
        <li><a href="/expires">Expires</a></li>
        <li><a href="/cacheControl">Cache-Control: max-age</a></li>
        <li><a href="/lastModified">Last-Modified / If-Modified-Since</a></li>
        <li><a href="/etag">Etag / If-None-Match</a></li>
        <li><a href="/">No caching</a></li>
    </ul>
    <script src="/app.js"></script>
</body>
</html>
"#;

/// Serve the landing page
///
/// The file is read on every request so edits show up without a restart.
pub async fn serve_landing_page(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let path = state.landing_page_path();
    let content = match fs::read(&path).await {
        Ok(data) => Bytes::from(data),
        Err(e) => {
            logger::log_warning(&format!(
                "Landing page '{}' unavailable ({e}), serving built-in page",
                path.display()
            ));
            Bytes::from_static(DEFAULT_LANDING_PAGE.as_bytes())
        }
    };
    http::build_html_response(content, ctx.is_head)
}

/// Serve a resource under the document root using `mode`
pub async fn serve_resource(
    ctx: &RequestContext<'_>,
    state: &AppState,
    mode: CachingMode,
) -> Response<Full<Bytes>> {
    let received = Utc::now();
    let resource = match Resource::load(&state.root, ctx.path).await {
        Ok(r) => r,
        Err(e) => {
            logger::log_resource_error(ctx.path, &e);
            return if e.is_not_found() {
                http::build_404_response()
            } else {
                http::build_500_response()
            };
        }
    };

    let validators = Validators {
        if_modified_since: ctx.if_modified_since,
        if_none_match: ctx.if_none_match,
    };
    let negotiated = cache::negotiate(mode, &resource, validators, &state.policy, received);
    http::build_negotiated_response(negotiated, ctx.is_head)
}
