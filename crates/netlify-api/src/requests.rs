//! Request types for the API

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of a create-site call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSiteRequest {
    pub name: String,
}

impl CreateSiteRequest {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Form fields in submission order
    #[must_use]
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![("name".to_string(), self.name.clone())]
    }
}

/// Digest of a deploy: relative file path mapped to the file's content hash
///
/// Netlify answers a digest deploy with the hashes it does not yet store; the
/// upload of those files is a separate step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileDigest(BTreeMap<String, String>);

impl FileDigest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous hash for the same path
    pub fn insert(&mut self, path: impl Into<String>, hash: impl Into<String>) {
        self.0.insert(path.into(), hash.into());
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<P, H> FromIterator<(P, H)> for FileDigest
where
    P: Into<String>,
    H: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, H)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(path, hash)| (path.into(), hash.into()))
                .collect(),
        )
    }
}
