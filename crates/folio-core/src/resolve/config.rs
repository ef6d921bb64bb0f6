//! Resolver configuration.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::media::{DEFAULT_MEDIA_PREFIX, MediaResolver};

/// What to do when a key that should be unique matches several documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Uniqueness {
    /// Use the first match in store order and log a warning.
    #[default]
    FirstMatch,
    /// Fail with an ambiguous-result error.
    Strict,
}

/// Configuration of [`ContentService`](super::ContentService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Route prefix serving media documents by id.
    #[serde(default = "default_media_prefix")]
    pub media_prefix: String,

    /// Tie-break policy for slug, path and home lookups.
    #[serde(default)]
    pub uniqueness: Uniqueness,

    /// Whether documents with `_status = draft` are resolved.
    #[serde(default)]
    pub include_drafts: bool,
}

fn default_media_prefix() -> String {
    DEFAULT_MEDIA_PREFIX.to_owned()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            media_prefix: default_media_prefix(),
            uniqueness: Uniqueness::default(),
            include_drafts: false,
        }
    }
}

impl ResolverConfig {
    /// Set the media route prefix.
    pub fn with_media_prefix(mut self, media_prefix: impl Into<String>) -> Self {
        self.media_prefix = media_prefix.into();
        self
    }

    /// Set the tie-break policy.
    pub fn with_uniqueness(mut self, uniqueness: Uniqueness) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    /// Set whether drafts are resolved.
    pub fn with_include_drafts(mut self, include_drafts: bool) -> Self {
        self.include_drafts = include_drafts;
        self
    }

    /// Returns the media resolver for the configured prefix.
    pub fn media_resolver(&self) -> MediaResolver {
        MediaResolver::new(self.media_prefix.as_str())
    }
}
