//! Request construction
//!
//! `DeployRequestBuilder` turns call arguments into a complete request
//! description without touching the network. Sending is the transport's job.

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use netlify_api::CreateSiteRequest;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::payload::DeployPayload;

/// Content type of archive deploys
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Body of an outbound request, encoded by the transport
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body
    Empty,
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
    /// JSON document
    Json(serde_json::Value),
    /// Raw bytes sent as-is
    Bytes(Vec<u8>),
}

/// A fully described HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

/// Builds requests for the Netlify site and deploy endpoints
///
/// Every method is pure: the config is only read, and each request gets its
/// own copy of the base headers.
#[derive(Debug, Clone, Default)]
pub struct DeployRequestBuilder {
    config: ClientConfig,
}

impl DeployRequestBuilder {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, segments: &[&str], body: RequestBody) -> Result<HttpRequest> {
        Ok(HttpRequest {
            method,
            url: self.config.endpoint(segments)?,
            headers: self.config.auth_headers()?,
            body,
        })
    }

    /// `POST /sites` with the site name as a form field
    ///
    /// # Errors
    /// Returns an error if the config yields an invalid URL or token header.
    pub fn create_site(&self, name: &str) -> Result<HttpRequest> {
        let body = RequestBody::Form(CreateSiteRequest::new(name).form_fields());
        self.request(Method::POST, &["sites"], body)
    }

    /// `GET /sites`
    ///
    /// # Errors
    /// Returns an error if the config yields an invalid URL or token header.
    pub fn list_sites(&self) -> Result<HttpRequest> {
        self.request(Method::GET, &["sites"], RequestBody::Empty)
    }

    /// `POST /{site_id}/deploys`
    ///
    /// Archive payloads add `Content-Type: application/zip` to this request's
    /// headers and send the bytes unchanged. Digest payloads keep the base
    /// headers and send the mapping as JSON.
    ///
    /// `site_id` is percent-encoded as one path segment, so `/`, `?` and `#`
    /// cannot change the endpoint.
    ///
    /// # Errors
    /// Returns `ClientError::InvalidPayload` if the payload fails validation,
    /// before any URL or header is built. Returns `ClientError::InvalidSiteId`
    /// for an empty id, `.` or `..`.
    pub fn deploy_site(&self, site_id: &str, payload: DeployPayload) -> Result<HttpRequest> {
        payload.validate()?;
        if matches!(site_id, "" | "." | "..") {
            return Err(ClientError::InvalidSiteId(site_id.to_string()));
        }

        let body = match payload {
            DeployPayload::Archive(bytes) => RequestBody::Bytes(bytes),
            DeployPayload::Digest(digest) => RequestBody::Json(serde_json::to_value(&digest)?),
        };

        let mut request = self.request(Method::POST, &[site_id, "deploys"], body)?;
        if matches!(request.body, RequestBody::Bytes(_)) {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(ZIP_CONTENT_TYPE));
        }

        debug!(
            site_id = %site_id,
            archive = request.headers.contains_key(CONTENT_TYPE),
            "built deploy request"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;
    use serde_json::json;

    use netlify_api::FileDigest;

    use super::*;
    use crate::error::InvalidPayload;

    const EMPTY_ZIP: &[u8] = b"PK\x05\x06\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0";

    fn builder(token: &str) -> DeployRequestBuilder {
        DeployRequestBuilder::new(ClientConfig::default().with_access_token(token))
    }

    #[test]
    fn test_create_site() {
        let request = builder("tok").create_site("my-site").unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.as_str(), "https://api.netlify.com/api/v1/sites");
        assert_eq!(
            request.body,
            RequestBody::Form(vec![("name".to_string(), "my-site".to_string())])
        );
        assert_eq!(request.headers[AUTHORIZATION], "Bearer tok");
    }

    #[test]
    fn test_list_sites_without_token() {
        let request = builder("").list_sites().unwrap();

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url.as_str(), "https://api.netlify.com/api/v1/sites");
        assert_eq!(request.body, RequestBody::Empty);
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_deploy_digest() {
        let digest: FileDigest = [("/index.html", "deadbeef")].into_iter().collect();
        let request = builder("")
            .deploy_site("abc123", DeployPayload::digest(digest))
            .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.url.as_str(),
            "https://api.netlify.com/api/v1/abc123/deploys"
        );
        assert_eq!(request.body, RequestBody::Json(json!({ "/index.html": "deadbeef" })));
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_deploy_archive_sets_zip_content_type() {
        let builder = builder("tok");
        let request = builder
            .deploy_site("abc123", DeployPayload::Archive(EMPTY_ZIP.to_vec()))
            .unwrap();

        assert_eq!(request.headers[CONTENT_TYPE], ZIP_CONTENT_TYPE);
        assert_eq!(request.headers[AUTHORIZATION], "Bearer tok");
        assert_eq!(request.body, RequestBody::Bytes(EMPTY_ZIP.to_vec()));
    }

    #[test]
    fn test_zip_content_type_does_not_leak() {
        let builder = builder("tok");
        builder
            .deploy_site("abc123", DeployPayload::Archive(EMPTY_ZIP.to_vec()))
            .unwrap();

        let digest: FileDigest = [("/index.html", "deadbeef")].into_iter().collect();
        let next = builder
            .deploy_site("abc123", DeployPayload::digest(digest))
            .unwrap();
        assert!(!next.headers.contains_key(CONTENT_TYPE));

        let sites = builder.list_sites().unwrap();
        assert!(!sites.headers.contains_key(CONTENT_TYPE));
        assert_eq!(builder.config().auth_headers().unwrap().len(), 1);
    }

    #[test]
    fn test_deploy_rejects_invalid_payloads() {
        let result = builder("").deploy_site("abc123", DeployPayload::Archive(b"html".to_vec()));
        assert!(matches!(
            result,
            Err(ClientError::InvalidPayload(InvalidPayload::ArchiveType))
        ));

        let result = builder("").deploy_site("abc123", DeployPayload::Digest(FileDigest::new()));
        assert!(matches!(
            result,
            Err(ClientError::InvalidPayload(InvalidPayload::Missing))
        ));
    }

    #[test]
    fn test_deploy_site_id_is_one_segment() {
        let builder = builder("");
        let digest: FileDigest = [("/index.html", "deadbeef")].into_iter().collect();

        for (site_id, url) in [
            ("a#b", "https://api.netlify.com/api/v1/a%23b/deploys"),
            ("a?b", "https://api.netlify.com/api/v1/a%3Fb/deploys"),
            (
                "x/../../sites",
                "https://api.netlify.com/api/v1/x%2F..%2F..%2Fsites/deploys",
            ),
        ] {
            let request = builder
                .deploy_site(site_id, DeployPayload::digest(digest.clone()))
                .unwrap();
            assert_eq!(request.url.as_str(), url);
        }
    }

    #[test]
    fn test_deploy_rejects_unusable_site_ids() {
        let builder = builder("");
        let digest: FileDigest = [("/index.html", "deadbeef")].into_iter().collect();

        for site_id in ["", ".", ".."] {
            let result = builder.deploy_site(site_id, DeployPayload::digest(digest.clone()));
            assert!(
                matches!(&result, Err(ClientError::InvalidSiteId(id)) if id == site_id),
                "{site_id:?}: {result:?}"
            );
        }
    }

    #[test]
    fn test_custom_host_and_version() {
        let builder = DeployRequestBuilder::new(
            ClientConfig::default()
                .with_scheme("http")
                .with_host("localhost:8080")
                .with_version("/v2/"),
        );
        let request = builder.list_sites().unwrap();
        assert_eq!(request.url.as_str(), "http://localhost:8080/v2/sites");
    }
}
