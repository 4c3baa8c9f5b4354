//! Errors surfaced by the serialization and validation entry points
//!
//! Building and mutating objects never fails. Only encoding, decoding and
//! explicit validation return errors.

use thiserror::Error;

use crate::ValidationReport;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("Serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Failed to parse bundle: {0}")]
    Parse(#[source] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationReport),
}
