//! netlify-api: Shared API types
//!
//! Request and response bodies exchanged with the Netlify HTTP API, used by
//! the client library and the CLI.

pub mod requests;
pub mod responses;

pub use requests::{CreateSiteRequest, FileDigest};
pub use responses::{Deploy, Site};
