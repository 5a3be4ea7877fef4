//! Client configuration

use std::fmt;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use url::{ParseError, Url};

use crate::error::Result;

/// Connection settings for the Netlify API
///
/// Immutable once built: the `with_*` setters consume the value and return a
/// new one. Defaults point at Netlify's production API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// URL scheme (defaults to `https`)
    #[serde(default = "default_scheme")]
    scheme: String,
    /// API host (defaults to `api.netlify.com`)
    #[serde(default = "default_host")]
    host: String,
    /// Version path appended to the host (defaults to `/api/v1/`)
    #[serde(default = "default_version")]
    version: String,
    /// Personal access token sent as a bearer token
    #[serde(default, skip_serializing)]
    access_token: Option<String>,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_host() -> String {
    "api.netlify.com".to_string()
}

fn default_version() -> String {
    "/api/v1/".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            version: default_version(),
            access_token: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("version", &self.version)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ClientConfig {
    /// Create a config with Netlify's production defaults and no token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access token
    ///
    /// An empty token is treated as no token at all.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = if token.is_empty() { None } else { Some(token) };
        self
    }

    /// Set the URL scheme
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set the API host (may include a port)
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the version path
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether a non-empty access token is configured
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// `scheme://host` followed by the version path, verbatim
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host, self.version)
    }

    /// Build the URL of an endpoint below the base URL
    ///
    /// Each entry of `segments` becomes exactly one path segment, percent
    /// encoded, so `/`, `?` and `#` inside a segment stay part of it. A
    /// trailing `/` on the version path is dropped before appending.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or cannot take a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url())?;
        url.path_segments_mut()
            .map_err(|()| ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fresh copy of the base headers
    ///
    /// Holds `Authorization: Bearer <token>` when a token is configured and is
    /// empty otherwise. Every call returns a new map, so callers may add
    /// headers without affecting later requests.
    ///
    /// # Errors
    /// Returns an error if the token contains bytes not allowed in a header.
    pub fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}
