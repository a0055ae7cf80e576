//! Error types for `siddu-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A path segment or column value that is not a positive integer.
  #[error("malformed identifier: {0:?}")]
  MalformedId(String),

  /// An input field failed validation.
  #[error("{field} {reason}")]
  Invalid {
    field:  &'static str,
    reason: &'static str,
  },

  #[error("unknown owner kind: {0:?}")]
  UnknownOwnerKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reject an empty or whitespace-only required field.
pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::Invalid { field, reason: "is required" });
  }
  Ok(())
}
