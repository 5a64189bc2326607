//! Cache negotiation
//!
//! Decides, for one resource request, between a full response carrying the
//! active strategy's headers and a `304 Not Modified` short-circuit.
//! Negotiation is a pure function of its inputs; loading the resource and
//! writing the response belong to the caller.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use hyper::body::Bytes;
use hyper::header::{HeaderName, CACHE_CONTROL, CONTENT_TYPE, ETAG, EXPIRES, LAST_MODIFIED};
use hyper::StatusCode;
use std::time::Duration;

use super::mode::CachingMode;
use super::resource::Resource;
use super::validator;

/// Request validators taken from `If-Modified-Since` and `If-None-Match`
#[derive(Debug, Clone, Copy, Default)]
pub struct Validators<'a> {
    pub if_modified_since: Option<&'a str>,
    pub if_none_match: Option<&'a str>,
}

/// Lifetimes used by the strong caching strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Offset added to the current time for `Expires`
    pub expires_in: Duration,
    /// Seconds sent as `Cache-Control: max-age`
    pub max_age: u64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            expires_in: Duration::from_millis(5000),
            max_age: 5,
        }
    }
}

/// Response description produced by negotiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiated {
    pub status: StatusCode,
    pub headers: Vec<(HeaderName, String)>,
    /// `None` for 304 responses
    pub body: Option<Bytes>,
}

impl Negotiated {
    /// Look up a header value by name
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_not_modified(&self) -> bool {
        self.status == StatusCode::NOT_MODIFIED
    }

    fn full(headers: Vec<(HeaderName, String)>, body: Bytes) -> Self {
        Self {
            status: StatusCode::OK,
            headers,
            body: Some(body),
        }
    }

    const fn not_modified(headers: Vec<(HeaderName, String)>) -> Self {
        Self {
            status: StatusCode::NOT_MODIFIED,
            headers,
            body: None,
        }
    }
}

/// Negotiate the response for `resource` under `mode`
///
/// `now` is the time the request was received; it only affects `Expires`.
pub fn negotiate(
    mode: CachingMode,
    resource: &Resource,
    validators: Validators<'_>,
    policy: &CachePolicy,
    now: DateTime<Utc>,
) -> Negotiated {
    let mut headers = vec![(CONTENT_TYPE, resource.content_type.to_string())];
    let body = resource.content.clone();

    match mode {
        CachingMode::None => Negotiated::full(headers, body),
        CachingMode::Expires => {
            // Offsets past the calendar range saturate at the latest representable date
            let expires = ChronoDuration::from_std(policy.expires_in)
                .ok()
                .and_then(|offset| now.checked_add_signed(offset))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            headers.push((EXPIRES, validator::format_http_date(expires)));
            Negotiated::full(headers, body)
        }
        CachingMode::CacheControl => {
            headers.push((CACHE_CONTROL, format!("max-age={}", policy.max_age)));
            Negotiated::full(headers, body)
        }
        CachingMode::LastModified => {
            headers.push((CACHE_CONTROL, "no-cache".to_string()));
            let last_modified = validator::format_last_modified(resource.modified);
            if validator::check_last_modified_match(validators.if_modified_since, &last_modified) {
                return Negotiated::not_modified(headers);
            }
            headers.push((LAST_MODIFIED, last_modified));
            Negotiated::full(headers, body)
        }
        CachingMode::ETag => {
            headers.push((CACHE_CONTROL, "no-cache".to_string()));
            let etag = validator::generate_etag(&resource.content);
            if validator::check_etag_match(validators.if_none_match, &etag) {
                return Negotiated::not_modified(headers);
            }
            headers.push((ETAG, etag));
            Negotiated::full(headers, body)
        }
    }
}
