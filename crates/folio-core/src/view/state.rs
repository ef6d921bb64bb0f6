//! Outcome of a page-view load.

use crate::{Error, ErrorKind, Result, TRACING_TARGET_VIEW};

/// Render state of a page view.
///
/// Load errors end here as [`ViewState::Failed`]: the view shows an inline
/// message instead of propagating the error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState<T> {
    /// The load has not finished yet.
    #[default]
    Loading,
    /// The view model is ready to render.
    Ready(T),
    /// The load failed; `message` is safe to show to visitors.
    Failed { kind: ErrorKind, message: String },
}

impl<T> ViewState<T> {
    /// Converts a load result, logging failures under `view`.
    pub fn from_result(view: &'static str, result: Result<T>) -> Self {
        match result {
            Ok(model) => Self::Ready(model),
            Err(error) => Self::failed(view, &error),
        }
    }

    /// Builds the failed state for `error`.
    pub fn failed(view: &'static str, error: &Error) -> Self {
        tracing::warn!(
            target: TRACING_TARGET_VIEW,
            view,
            kind = %error.kind,
            error = %error,
            "View failed to load"
        );

        Self::Failed {
            kind: error.kind,
            message: visitor_message(view, error.kind),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns the model if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(model) => Some(model),
            _ => None,
        }
    }

    /// Returns the inline error message if failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Maps the ready model.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            Self::Loading => ViewState::Loading,
            Self::Ready(model) => ViewState::Ready(f(model)),
            Self::Failed { kind, message } => ViewState::Failed { kind, message },
        }
    }
}

fn visitor_message(view: &str, kind: ErrorKind) -> String {
    match kind {
        ErrorKind::NotFound => format!("The {view} page could not be found."),
        _ => format!("Failed to load {view}. Please try again later."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ready = ViewState::from_result("about", Ok(3));
        assert_eq!(ready.ready(), Some(&3));
        assert_eq!(ready.map(|n| n * 2), ViewState::Ready(6));

        let failed: ViewState<u8> =
            ViewState::from_result("experiences", Err(Error::fetch_failure()));
        assert!(failed.is_failed());
        assert_eq!(
            failed.error_message(),
            Some("Failed to load experiences. Please try again later.")
        );

        let missing: ViewState<u8> = ViewState::from_result("contact", Err(Error::not_found()));
        assert_eq!(missing.error_message(), Some("The contact page could not be found."));
        assert_eq!(ViewState::<u8>::default(), ViewState::Loading);
    }
}
