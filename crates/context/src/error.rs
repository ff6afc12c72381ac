//! Library error types.

use thiserror::Error;

/// Errors produced when ingesting host-supplied data.
///
/// Runtime operations never return these: resolution failures are
/// sentinel values and storage problems are reported on the diagnostic
/// channel (see the store module). Only construction from host JSON
/// has a typed failure mode.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Host navigation JSON did not parse.
    #[error("invalid navigation JSON")]
    InvalidNavigationJson(#[from] serde_json::Error),

    /// The host navigation value is not a JSON object.
    #[error("navigation tree must be a JSON object")]
    NavigationNotAnObject,
}
