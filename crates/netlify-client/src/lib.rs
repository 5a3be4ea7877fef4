//! netlify-client: Netlify deploy API client library
//!
//! Builds authenticated requests for creating and listing sites, resolving a
//! site id by name, and starting deploys from either a file digest or a zip
//! archive. Requests are plain values built by [`DeployRequestBuilder`];
//! [`NetlifyClient`] sends them through a [`Transport`].
//!
//! # Examples
//!
//! ```no_run
//! use netlify_client::{ClientConfig, DeployPayload, NetlifyClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::default().with_access_token("personal-access-token");
//! let client = NetlifyClient::new(config)?;
//!
//! // Create a site
//! client.create_site("my-site").await?;
//!
//! // Resolve its id, then deploy a zipped build
//! if let Some(site_id) = client.get_site_id("my-site").await? {
//!     let zip = std::fs::File::open("dist.zip")?;
//!     let response = client.deploy_site(&site_id, DeployPayload::archive(zip)?).await?;
//!     println!("deploy: {}", response.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod http;
pub mod payload;
pub mod request;
pub mod transport;

pub use config::ClientConfig;
pub use diagnostics::{Diagnostic, DiagnosticObserver, TracingObserver};
pub use error::{ClientError, InvalidPayload, Result};
pub use http::NetlifyClient;
pub use payload::DeployPayload;
pub use request::{DeployRequestBuilder, HttpRequest, RequestBody, ZIP_CONTENT_TYPE};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
