//! Caching mode definitions
//!
//! Maps trigger paths and `?cache=` names to the strategy they select.

use std::fmt;
use std::str::FromStr;

/// Caching strategy applied to resource responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CachingMode {
    /// No cache headers beyond Content-Type
    #[default]
    None,
    /// Strong cache with an absolute `Expires` timestamp
    Expires,
    /// Strong cache with `Cache-Control: max-age`
    CacheControl,
    /// Conditional cache validated by `Last-Modified` / `If-Modified-Since`
    LastModified,
    /// Conditional cache validated by `Etag` / `If-None-Match`
    ETag,
}

/// Paths that select a caching mode when visited
pub const TRIGGER_PATHS: [(&str, CachingMode); 5] = [
    ("/", CachingMode::None),
    ("/expires", CachingMode::Expires),
    ("/cacheControl", CachingMode::CacheControl),
    ("/lastModified", CachingMode::LastModified),
    ("/etag", CachingMode::ETag),
];

impl CachingMode {
    /// Resolve a trigger path to the mode it activates
    pub fn from_trigger_path(path: &str) -> Option<Self> {
        TRIGGER_PATHS
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, mode)| *mode)
    }

    /// Name used in trigger paths and the `cache` query parameter
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Expires => "expires",
            Self::CacheControl => "cacheControl",
            Self::LastModified => "lastModified",
            Self::ETag => "etag",
        }
    }

    /// Conditional modes answer 304 when the client's validator matches
    pub const fn is_conditional(self) -> bool {
        matches!(self, Self::LastModified | Self::ETag)
    }
}

impl fmt::Display for CachingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized caching mode name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown caching mode: {0}")]
pub struct UnknownMode(pub String);

impl FromStr for CachingMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(Self::None),
            "expires" => Ok(Self::Expires),
            "cacheControl" => Ok(Self::CacheControl),
            "lastModified" => Ok(Self::LastModified),
            "etag" => Ok(Self::ETag),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Extract an explicit mode from a query string (`cache=<name>`)
///
/// Unknown names are ignored so the shared selector stays in charge.
pub fn mode_from_query(query: Option<&str>) -> Option<CachingMode> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "cache")
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_paths() {
        assert_eq!(CachingMode::from_trigger_path("/"), Some(CachingMode::None));
        assert_eq!(
            CachingMode::from_trigger_path("/expires"),
            Some(CachingMode::Expires)
        );
        assert_eq!(
            CachingMode::from_trigger_path("/cacheControl"),
            Some(CachingMode::CacheControl)
        );
        assert_eq!(
            CachingMode::from_trigger_path("/lastModified"),
            Some(CachingMode::LastModified)
        );
        assert_eq!(CachingMode::from_trigger_path("/etag"), Some(CachingMode::ETag));
        assert_eq!(CachingMode::from_trigger_path("/style.css"), None);
        assert_eq!(CachingMode::from_trigger_path("/ETAG"), None);
    }

    #[test]
    fn test_name_round_trip() {
        for (_, mode) in TRIGGER_PATHS {
            assert_eq!(mode.as_str().parse::<CachingMode>(), Ok(mode));
        }
        assert_eq!("".parse::<CachingMode>(), Ok(CachingMode::None));
        assert!("max-age".parse::<CachingMode>().is_err());
    }

    #[test]
    fn test_mode_from_query() {
        assert_eq!(mode_from_query(Some("cache=etag")), Some(CachingMode::ETag));
        assert_eq!(
            mode_from_query(Some("v=2&cache=lastModified")),
            Some(CachingMode::LastModified)
        );
        assert_eq!(mode_from_query(Some("cache=bogus")), None);
        assert_eq!(mode_from_query(Some("v=2")), None);
        assert_eq!(mode_from_query(None), None);
    }
}
