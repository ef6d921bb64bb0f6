#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for page and collection resolution.
pub const TRACING_TARGET_RESOLVE: &str = "folio_core::resolve";

/// Tracing target for navigation materialization.
pub const TRACING_TARGET_NAVIGATION: &str = "folio_core::navigation";

/// Tracing target for view lifecycle events.
pub const TRACING_TARGET_VIEW: &str = "folio_core::view";

mod error;

pub mod content;
pub mod media;
pub mod navigation;
pub mod prelude;
pub mod provider;
pub mod resolve;
pub mod richtext;
pub mod schema;
pub mod slug;
pub mod view;

pub use error::{BoxedError, Error, ErrorKind, Result};
