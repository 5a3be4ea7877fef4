//! HTTP client for the Netlify API

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use netlify_api::Site;

use crate::config::ClientConfig;
use crate::diagnostics::{Diagnostic, DiagnosticObserver, TracingObserver};
use crate::error::Result;
use crate::payload::DeployPayload;
use crate::request::{DeployRequestBuilder, HttpRequest};
use crate::transport::{HttpResponse, ReqwestTransport, Transport};

/// Client for the Netlify site and deploy endpoints
///
/// Requests are built by a [`DeployRequestBuilder`] and handed to a
/// [`Transport`]. Responses are returned as received; non-2xx statuses are not
/// turned into errors.
#[derive(Clone)]
pub struct NetlifyClient<T = ReqwestTransport> {
    requests: DeployRequestBuilder,
    transport: T,
    observer: Arc<dyn DiagnosticObserver>,
}

impl<T: fmt::Debug> fmt::Debug for NetlifyClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetlifyClient")
            .field("config", self.requests.config())
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl NetlifyClient<ReqwestTransport> {
    /// Create a new client backed by `reqwest`
    ///
    /// # Errors
    /// Returns an error if the config does not produce a valid base URL or the
    /// access token is not a valid header value.
    ///
    /// # Example
    /// ```no_run
    /// use netlify_client::{ClientConfig, NetlifyClient};
    ///
    /// let client = NetlifyClient::new(ClientConfig::default().with_access_token("token"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Replace the transport with one whose requests time out after `timeout`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.transport = ReqwestTransport::with_timeout(timeout)?;
        Ok(self)
    }
}

impl<T: Transport> NetlifyClient<T> {
    /// Create a client with a custom transport
    ///
    /// # Errors
    /// Returns an error if the config does not produce a valid base URL or the
    /// access token is not a valid header value.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.endpoint(&["sites"])?;
        config.auth_headers()?;

        Ok(Self {
            requests: DeployRequestBuilder::new(config),
            transport,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Route diagnostics to `observer` instead of `tracing`
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn DiagnosticObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.requests.config()
    }

    /// Request builder used by this client
    #[must_use]
    pub fn requests(&self) -> &DeployRequestBuilder {
        &self.requests
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");
        self.transport.execute(request).await
    }

    /// Create a site
    ///
    /// # Errors
    /// Returns an error if the request cannot be built or sent.
    ///
    /// # Example
    /// ```no_run
    /// # use netlify_client::{ClientConfig, NetlifyClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = NetlifyClient::new(ClientConfig::default().with_access_token("token"))?;
    /// let response = client.create_site("my-site").await?;
    /// println!("{}", response.status);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub async fn create_site(&self, name: &str) -> Result<HttpResponse> {
        let request = self.requests.create_site(name)?;
        self.send(request).await
    }

    /// List sites
    ///
    /// # Errors
    /// Returns an error if the request cannot be built or sent.
    pub async fn list_sites(&self) -> Result<HttpResponse> {
        let request = self.requests.list_sites()?;
        self.send(request).await
    }

    /// List sites and parse the response
    ///
    /// # Errors
    /// Returns an error if the request fails or the body is not a list of sites.
    pub async fn sites(&self) -> Result<Vec<Site>> {
        self.list_sites().await?.json()
    }

    /// Resolve a site's id from its name
    ///
    /// Returns the id of the first listed site whose name matches. When none
    /// does, a [`Diagnostic::SiteNotFound`] is sent to the observer and
    /// `Ok(None)` is returned.
    ///
    /// # Errors
    /// Returns an error if the request fails or the body is not a list of sites.
    ///
    /// # Example
    /// ```no_run
    /// # use netlify_client::{ClientConfig, NetlifyClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = NetlifyClient::new(ClientConfig::default().with_access_token("token"))?;
    /// match client.get_site_id("my-site").await? {
    ///     Some(id) => println!("{id}"),
    ///     None => println!("no such site"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub async fn get_site_id(&self, name: &str) -> Result<Option<String>> {
        let sites = self.sites().await?;

        match first_site_id(&sites, name) {
            Some(id) => Ok(Some(id.to_string())),
            None => {
                self.observer.observe(&Diagnostic::SiteNotFound {
                    name: name.to_string(),
                });
                Ok(None)
            }
        }
    }

    /// Start a deploy from a digest or a zip archive
    ///
    /// # Errors
    /// Returns `ClientError::InvalidPayload` for a rejected payload, otherwise
    /// an error if the request cannot be built or sent.
    ///
    /// # Example
    /// ```no_run
    /// # use netlify_client::{ClientConfig, DeployPayload, NetlifyClient};
    /// # use netlify_api::FileDigest;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = NetlifyClient::new(ClientConfig::default().with_access_token("token"))?;
    ///
    /// let mut digest = FileDigest::new();
    /// digest.insert("/index.html", "907d14fb3af2b0d4f18c2d46abe8aedce17367bd");
    /// client.deploy_site("abc123", DeployPayload::digest(digest)).await?;
    ///
    /// let zip = std::fs::File::open("site.zip")?;
    /// client.deploy_site("abc123", DeployPayload::archive(zip)?).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, payload), fields(archive = payload.is_archive()))]
    pub async fn deploy_site(&self, site_id: &str, payload: DeployPayload) -> Result<HttpResponse> {
        let request = self.requests.deploy_site(site_id, payload)?;
        self.send(request).await
    }
}

/// Id of the first site named `name`, in list order
fn first_site_id<'a>(sites: &'a [Site], name: &str) -> Option<&'a str> {
    sites
        .iter()
        .find(|site| site.name == name)
        .map(|site| site.id.as_str())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sites(value: serde_json::Value) -> Vec<Site> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = NetlifyClient::new(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_host() {
        let client = NetlifyClient::new(ClientConfig::default().with_host("not a host"));
        assert!(client.is_err());
    }

    #[test]
    fn test_invalid_token() {
        let client = NetlifyClient::new(ClientConfig::default().with_access_token("a\nb"));
        assert!(client.is_err());
    }

    #[test]
    fn test_first_site_id_first_match_wins() {
        let sites = sites(json!([
            { "id": "1", "name": "docs" },
            { "id": "2", "name": "blog" },
            { "id": "3", "name": "blog" }
        ]));
        assert_eq!(first_site_id(&sites, "blog"), Some("2"));
    }

    #[test]
    fn test_first_site_id_no_match() {
        let sites = sites(json!([{ "id": "1", "name": "docs" }]));
        assert_eq!(first_site_id(&sites, "blog"), None);
        assert_eq!(first_site_id(&[], "blog"), None);
    }

    #[test]
    fn test_first_site_id_exact_match_only() {
        let sites = sites(json!([{ "id": "1", "name": "Blog" }]));
        assert_eq!(first_site_id(&sites, "blog"), None);
    }
}
