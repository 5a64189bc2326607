//! Validator tokens for conditional requests
//!
//! Both validators are compared by exact string equality, so the same
//! rendering has to be used when emitting and when checking them.

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use std::time::SystemTime;

/// Canonical HTTP date layout, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Generate a quoted `ETag` from the MD5 digest of `content`
///
/// # Returns
/// Quoted lowercase hex digest, e.g. `"5eb63bbbe01eeed093cb22bb8f5acdc3"`
pub fn generate_etag(content: &[u8]) -> String {
    let digest = Md5::digest(content);
    format!("\"{}\"", hex::encode(digest))
}

/// Render a timestamp as an HTTP date with second precision
pub fn format_http_date(time: DateTime<Utc>) -> String {
    time.format(HTTP_DATE_FORMAT).to_string()
}

/// Render a file modification time as an HTTP date
pub fn format_last_modified(modified: SystemTime) -> String {
    format_http_date(DateTime::<Utc>::from(modified))
}

/// Check if client's `If-None-Match` header equals the current `ETag`
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client| client == etag)
}

/// Check if client's `If-Modified-Since` header equals the current `Last-Modified`
pub fn check_last_modified_match(if_modified_since: Option<&str>, last_modified: &str) -> bool {
    if_modified_since.is_some_and(|client| client == last_modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_generate_etag() {
        assert_eq!(
            generate_etag(b"hello world"),
            "\"5eb63bbbe01eeed093cb22bb8f5acdc3\""
        );
        assert_eq!(generate_etag(b""), "\"d41d8cd98f00b204e9800998ecf8427e\"");
    }

    #[test]
    fn test_etag_difference() {
        assert_ne!(generate_etag(b"content a"), generate_etag(b"content b"));
    }

    #[test]
    fn test_format_http_date() {
        let time = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        assert_eq!(format_http_date(time), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_last_modified_drops_subseconds() {
        let base = UNIX_EPOCH + Duration::from_secs(784_111_777);
        let later_same_second = base + Duration::from_millis(999);
        assert_eq!(
            format_last_modified(base),
            format_last_modified(later_same_second)
        );
        assert_eq!(format_last_modified(base), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(!check_etag_match(Some("abc123"), etag));
        assert!(!check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(!check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(None, etag));
    }

    #[test]
    fn test_check_last_modified_match() {
        let stamp = "Sun, 06 Nov 1994 08:49:37 GMT";
        assert!(check_last_modified_match(Some(stamp), stamp));
        assert!(!check_last_modified_match(
            Some("Sunday, 06-Nov-94 08:49:37 GMT"),
            stamp
        ));
        assert!(!check_last_modified_match(Some("garbage"), stamp));
        assert!(!check_last_modified_match(None, stamp));
    }
}
