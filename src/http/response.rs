//! HTTP response building module
//!
//! Turns response descriptions into hyper responses. Builders never panic;
//! failures are logged and replaced with an empty response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};

use crate::cache::Negotiated;

/// Build the response for a negotiated resource
pub fn build_negotiated_response(negotiated: Negotiated, is_head: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(negotiated.status);
    for (name, value) in &negotiated.headers {
        builder = builder.header(name, value.as_str());
    }

    let body = match negotiated.body {
        Some(data) => {
            builder = builder.header(CONTENT_LENGTH, data.len());
            if is_head {
                Bytes::new()
            } else {
                data
            }
        }
        None => Bytes::new(),
    };

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(negotiated.status.as_str(), &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build landing page response
pub fn build_html_response(content: Bytes, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head { Bytes::new() } else { content };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html")
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response with an empty body
pub fn build_empty_response() -> Response<Full<Bytes>> {
    Response::new(Full::new(Bytes::new()))
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    let mut resp = build_text_response(StatusCode::METHOD_NOT_ALLOWED, "405 Method Not Allowed");
    resp.headers_mut()
        .insert(ALLOW, hyper::header::HeaderValue::from_static("GET, HEAD"));
    resp
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error")
}

fn build_text_response(status: StatusCode, text: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain")
        .body(Full::new(Bytes::from_static(text.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from_static(text.as_bytes())))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::{CACHE_CONTROL, ETAG};

    #[test]
    fn test_negotiated_full_response() {
        let negotiated = Negotiated {
            status: StatusCode::OK,
            headers: vec![
                (CONTENT_TYPE, "text/css".to_string()),
                (ETAG, "\"abc\"".to_string()),
            ],
            body: Some(Bytes::from_static(b"a{}")),
        };
        let resp = build_negotiated_response(negotiated, false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/css");
        assert_eq!(resp.headers()[ETAG], "\"abc\"");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "3");
    }

    #[test]
    fn test_negotiated_not_modified() {
        let negotiated = Negotiated {
            status: StatusCode::NOT_MODIFIED,
            headers: vec![(CACHE_CONTROL, "no-cache".to_string())],
            body: None,
        };
        let resp = build_negotiated_response(negotiated, false);
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
        assert!(resp.headers().get(CONTENT_LENGTH).is_none());
        assert!(resp.headers().get(ETAG).is_none());
    }

    #[test]
    fn test_error_responses() {
        assert_eq!(build_404_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(build_500_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = build_405_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[ALLOW], "GET, HEAD");
    }
}
