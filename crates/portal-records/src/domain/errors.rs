//! Error types for the records layer

use thiserror::Error;

/// Errors from fetching or deriving records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordsError {
    /// The record source failed; message is shown as-is
    #[error("{0}")]
    Source(String),

    /// No one is signed in
    #[error("Not signed in")]
    Unauthenticated,
}

impl RecordsError {
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            RecordsError::fetch_failed("relation \"attendance\" does not exist").to_string(),
            "relation \"attendance\" does not exist"
        );
        assert_eq!(RecordsError::Unauthenticated.to_string(), "Not signed in");
    }
}
