//! Client identification utilities
//!
//! Derives a rate-limit identity from request headers using an ordered list
//! of candidate sources. The first source yielding a non-empty value wins.

use http::HeaderMap;
use http::header::{HOST, HeaderName};

/// Identifier used when no source yields a value
pub const UNKNOWN_CLIENT: &str = "unknown";

/// API-key style header checked first
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Forwarded-address header set by reverse proxies
pub const FORWARDED_FOR_HEADER: HeaderName = HeaderName::from_static("x-forwarded-for");

/// A header the identity can be taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    ApiKey,
    ForwardedFor,
    Host,
}

impl IdentitySource {
    /// Default evaluation order
    pub const PRIORITY: [IdentitySource; 3] = [
        IdentitySource::ApiKey,
        IdentitySource::ForwardedFor,
        IdentitySource::Host,
    ];

    pub fn header_name(&self) -> HeaderName {
        match self {
            IdentitySource::ApiKey => API_KEY_HEADER,
            IdentitySource::ForwardedFor => FORWARDED_FOR_HEADER,
            IdentitySource::Host => HOST,
        }
    }

    /// Read this source from the headers
    ///
    /// Values that are not visible ASCII or are blank after trimming yield
    /// `None`. For `X-Forwarded-For` only the first non-empty entry (the
    /// originating client) is used.
    pub fn extract(&self, headers: &HeaderMap) -> Option<String> {
        let raw = headers.get(self.header_name())?.to_str().ok()?;

        let value = match self {
            IdentitySource::ForwardedFor => raw.split(',').map(str::trim).find(|s| !s.is_empty()),
            IdentitySource::ApiKey | IdentitySource::Host => Some(raw.trim()),
        }?;

        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

/// Client identity derived from request headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    identifier: String,
    /// `None` when the sentinel was used
    source: Option<IdentitySource>,
}

impl ClientIdentity {
    pub fn new(identifier: impl Into<String>, source: Option<IdentitySource>) -> Self {
        Self {
            identifier: identifier.into(),
            source,
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_CLIENT, None)
    }

    pub fn as_str(&self) -> &str {
        &self.identifier
    }

    pub fn source(&self) -> Option<IdentitySource> {
        self.source
    }

    pub fn is_unknown(&self) -> bool {
        self.source.is_none()
    }
}

/// Extract the client identity using the default source order
///
/// `x-api-key`, then `x-forwarded-for`, then `host`, then `"unknown"`.
pub fn extract_identity(headers: &HeaderMap) -> ClientIdentity {
    extract_identity_with(headers, &IdentitySource::PRIORITY)
}

/// Extract the client identity using a custom source order
pub fn extract_identity_with(headers: &HeaderMap, sources: &[IdentitySource]) -> ClientIdentity {
    sources
        .iter()
        .find_map(|source| {
            source
                .extract(headers)
                .map(|value| ClientIdentity::new(value, Some(*source)))
        })
        .unwrap_or_else(ClientIdentity::unknown)
}
