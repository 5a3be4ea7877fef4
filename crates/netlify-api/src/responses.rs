//! Response types for the API
//!
//! Only the fields this workspace reads are typed; everything else the API
//! returns is kept in `extra` untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Netlify site
///
/// Only `id` and `name` are required. Every other field stays untyped in
/// `extra`, so one odd value in a listing never fails the whole list; the
/// accessors below read them leniently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Site {
    /// Plain URL of the site, if present and a string
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.str_field("url")
    }

    /// HTTPS URL of the site, if present and a string
    #[must_use]
    pub fn ssl_url(&self) -> Option<&str> {
        self.str_field("ssl_url")
    }

    /// Creation time, if present and RFC 3339
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        timestamp(&self.extra, "created_at")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

fn timestamp(fields: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    let raw = fields.get(key)?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

/// A deploy as returned by `POST /{site_id}/deploys`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deploy {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Hashes of digest entries the server still needs uploaded
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Deploy {
    /// Creation time, if present and RFC 3339
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        timestamp(&self.extra, "created_at")
    }
}
