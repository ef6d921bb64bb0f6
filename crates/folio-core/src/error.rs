//! Structured error handling for content resolution.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the source of a structured [`Error`], wrapping transport or
/// decoding failures from lower layers while keeping `Send + Sync` bounds.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while resolving content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// No document matched a slug, path, id or flag.
    NotFound,
    /// More than one document matched a key that should be unique.
    AmbiguousResult,
    /// Network, transport or response decoding failure.
    FetchFailure,
    /// A document lacks a block or field the consumer requires.
    MalformedContent,
    /// Static configuration is invalid (e.g. duplicate schema registration).
    Configuration,
    /// Caller-provided input was rejected.
    InvalidInput,
    /// The owning view was torn down before the operation finished.
    Cancelled,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
    /// Additional context information.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
            context: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
            context: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates a new not found error.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    /// Creates a new ambiguous result error.
    pub fn ambiguous() -> Self {
        Self::new(ErrorKind::AmbiguousResult)
    }

    /// Creates a new fetch failure.
    pub fn fetch_failure() -> Self {
        Self::new(ErrorKind::FetchFailure)
    }

    /// Creates a new malformed content error.
    pub fn malformed() -> Self {
        Self::new(ErrorKind::MalformedContent)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new cancellation error.
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }

    /// Returns true if no document matched the lookup.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        let message = error.to_string();
        Self::from_source(ErrorKind::MalformedContent, error).with_message(message)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Unknown);
        assert_eq!(error.kind, ErrorKind::Unknown);
        assert!(error.message.is_none());
        assert!(error.source.is_none());
        assert!(error.context.is_none());
    }

    #[test]
    fn test_error_builder_pattern() {
        let error = Error::not_found()
            .with_message("page `about` not found")
            .with_context("collection: pages");

        assert_eq!(error.kind, ErrorKind::NotFound);
        assert_eq!(error.message.as_deref(), Some("page `about` not found"));
        assert_eq!(error.context.as_deref(), Some("collection: pages"));
        assert!(error.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let error = Error::malformed().with_message("pageLayout is empty");

        let display_str = error.to_string();
        assert_eq!(display_str, "[malformed_content]: pageLayout is empty");
        assert_eq!(Error::fetch_failure().to_string(), "[fetch_failure]");
    }

    #[test]
    fn test_from_serde() {
        let source = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let error = Error::from(source);

        assert_eq!(error.kind, ErrorKind::MalformedContent);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ErrorKind::from_str("not_found").unwrap(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ErrorKind::from_str("ambiguous_result").unwrap(),
            ErrorKind::AmbiguousResult
        );
        assert!(ErrorKind::from_str("invalid").is_err());
        assert_eq!(Error::cancelled().kind_str(), "cancelled");
    }

    #[test]
    fn test_default() {
        assert_eq!(ErrorKind::default(), ErrorKind::Unknown);
    }
}
