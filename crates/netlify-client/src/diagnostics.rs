//! Diagnostic events
//!
//! Soft failures are reported to a caller-supplied observer instead of a
//! global logger. `TracingObserver` is the default.

use std::fmt;

use tracing::warn;

/// A non-fatal condition worth reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No site with this name was found when resolving its id
    SiteNotFound {
        /// Name that was looked up
        name: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SiteNotFound { name } => write!(f, "Site '{name}' not found."),
        }
    }
}

/// Receives diagnostics emitted by the client
pub trait DiagnosticObserver: Send + Sync {
    fn observe(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to `tracing` at warn level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DiagnosticObserver for TracingObserver {
    fn observe(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::SiteNotFound { name } => warn!(site = %name, "{diagnostic}"),
        }
    }
}
