//! Media references and URL normalization.
//!
//! Upload fields arrive from the CMS in one of three shapes: `null`, a bare
//! numeric media id, or a populated media document. [`MediaResolver`] turns
//! every non-null shape into a populated document with a usable `url`, so
//! typed content only ever holds a concrete [`Media`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Default media route, relative to the site origin.
pub const DEFAULT_MEDIA_PREFIX: &str = "/api/media";

/// A resolved media reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Media document id, when the CMS provided one.
    #[serde(default)]
    pub id: Option<u64>,
    /// Absolute or site-relative URL of the asset.
    pub url: String,
    /// Alternative text for the asset.
    #[serde(default)]
    pub alt: Option<String>,
}

impl Media {
    /// Alternative text, or an empty string.
    pub fn alt_text(&self) -> &str {
        self.alt.as_deref().unwrap_or_default()
    }
}

/// Rewrites raw upload values into the concrete [`Media`] shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResolver {
    prefix: String,
}

impl Default for MediaResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_PREFIX)
    }
}

impl MediaResolver {
    /// Creates a resolver serving media ids under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');
        let prefix = if trimmed.starts_with('/') || is_absolute(trimmed) {
            trimmed.to_owned()
        } else {
            format!("/{trimmed}")
        };

        Self { prefix }
    }

    /// Creates a resolver for an API mounted at `api_path` (e.g. `/api`).
    pub fn for_api_path(api_path: &str) -> Self {
        Self::new(format!("{}/media", api_path.trim_end_matches('/')))
    }

    /// Returns the media route prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the URL serving the media document `id`.
    pub fn url_for(&self, id: u64) -> String {
        format!("{}/{id}", self.prefix)
    }

    /// Returns true if `url` needs no rewriting.
    pub fn is_resolved(&self, url: &str) -> bool {
        is_absolute(url)
            || url
                .strip_prefix(self.prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Normalizes a raw upload value in place.
    ///
    /// `null` stays `null`. Applying this twice yields the same value as
    /// applying it once.
    pub fn normalize_value(&self, value: &mut Value) -> Result<()> {
        match value {
            Value::Null => Ok(()),
            Value::Number(_) | Value::String(_) => {
                let id = parse_id(value).ok_or_else(|| {
                    Error::malformed().with_message(format!("invalid media reference: {value}"))
                })?;

                let mut document = Map::new();
                document.insert("id".into(), Value::from(id));
                document.insert("url".into(), Value::from(self.url_for(id)));
                document.insert("alt".into(), Value::Null);
                *value = Value::Object(document);
                Ok(())
            }
            Value::Object(document) => {
                let id = document.get("id").and_then(parse_id);
                let url = document.get("url").and_then(Value::as_str);

                let rewritten = match (url, id) {
                    (Some(url), _) if self.is_resolved(url) => None,
                    (_, Some(id)) => Some(self.url_for(id)),
                    (Some(_), None) => None,
                    (None, None) => {
                        return Err(Error::malformed()
                            .with_message("media document has neither an id nor a url"));
                    }
                };

                if let Some(url) = rewritten {
                    document.insert("url".into(), Value::from(url));
                }
                if let Some(id) = id {
                    document.insert("id".into(), Value::from(id));
                }
                Ok(())
            }
            other => Err(Error::malformed()
                .with_message(format!("unexpected media reference shape: {other}"))),
        }
    }

    /// Resolves a raw upload value into [`Media`].
    pub fn resolve(&self, raw: &Value) -> Result<Option<Media>> {
        let mut value = raw.clone();
        self.normalize_value(&mut value)?;
        if value.is_null() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_value(value)?))
    }
}

fn parse_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(raw) => raw.parse().ok(),
        _ => None,
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(MediaResolver::new("/api/media/").prefix(), "/api/media");
        assert_eq!(MediaResolver::new("media").prefix(), "/media");
        assert_eq!(MediaResolver::for_api_path("/").prefix(), "/media");
        assert_eq!(MediaResolver::for_api_path("/api").prefix(), "/api/media");
    }

    #[test]
    fn test_numeric_id_is_expanded() {
        let resolver = MediaResolver::default();
        let media = resolver.resolve(&json!(7)).unwrap().unwrap();

        assert_eq!(media.id, Some(7));
        assert_eq!(media.url, "/api/media/7");
        assert_eq!(media.alt_text(), "");
    }

    #[test]
    fn test_unprefixed_document_url_is_rewritten() {
        let resolver = MediaResolver::default();
        let raw = json!({ "id": 12, "url": "/uploads/cover.png", "alt": "Cover" });
        let media = resolver.resolve(&raw).unwrap().unwrap();

        assert_eq!(media.url, "/api/media/12");
        assert_eq!(media.alt.as_deref(), Some("Cover"));
    }

    #[test]
    fn test_prefixed_and_absolute_urls_are_kept() {
        let resolver = MediaResolver::default();

        let prefixed = json!({ "id": 3, "url": "/api/media/file/cover.png" });
        let media = resolver.resolve(&prefixed).unwrap().unwrap();
        assert_eq!(media.url, "/api/media/file/cover.png");

        let absolute = json!({ "id": 3, "url": "https://cdn.example.com/cover.png" });
        let media = resolver.resolve(&absolute).unwrap().unwrap();
        assert_eq!(media.url, "https://cdn.example.com/cover.png");
    }

    #[test]
    fn test_prefix_must_end_at_segment_boundary() {
        let resolver = MediaResolver::default();
        assert!(!resolver.is_resolved("/api/mediafile/cover.png"));
        assert!(resolver.is_resolved("/api/media/cover.png"));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let resolver = MediaResolver::default();
        let mut once = json!({ "id": 9, "url": "/elsewhere/9.png", "alt": "x" });
        resolver.normalize_value(&mut once).unwrap();

        let mut twice = once.clone();
        resolver.normalize_value(&mut twice).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice["url"], "/api/media/9");
    }

    #[test]
    fn test_null_and_invalid_references() {
        let resolver = MediaResolver::default();
        assert!(resolver.resolve(&Value::Null).unwrap().is_none());
        assert!(resolver.resolve(&json!(true)).is_err());
        assert!(resolver.resolve(&json!({ "alt": "orphan" })).is_err());
        assert!(resolver.resolve(&json!("not-an-id")).is_err());
    }
}
