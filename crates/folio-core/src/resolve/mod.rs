//! Page and collection resolution.

mod config;
mod service;

pub use self::config::{ResolverConfig, Uniqueness};
pub use self::service::ContentService;
