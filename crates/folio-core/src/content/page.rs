//! Page documents.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::{Block, BlockShape, Rows};
use crate::slug::{page_path, slugify};
use crate::{Error, Result};

/// Publication state of a versioned document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    #[default]
    Published,
}

/// Flags from the page settings sidebar group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    #[serde(default)]
    pub is_home_page: Option<bool>,
    #[serde(default)]
    pub is_dynamic_page: Option<bool>,
}

/// A reference to another page: either a bare id or a populated summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
    /// Unpopulated relationship.
    Id(u64),
    /// Populated relationship.
    Page(PageSummary),
}

impl PageRef {
    /// Returns the populated summary, if any.
    pub fn summary(&self) -> Option<&PageSummary> {
        match self {
            Self::Id(_) => None,
            Self::Page(summary) => Some(summary),
        }
    }

    /// Returns the site-relative URL of the referenced page, if known.
    pub fn href(&self) -> Option<String> {
        self.summary().and_then(PageSummary::href)
    }
}

/// Identifying fields of a page, as embedded in relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl PageSummary {
    /// Returns the page path, or `/<slug>` when only the slug is known.
    pub fn href(&self) -> Option<String> {
        if let Some(path) = non_empty(self.path.as_deref()) {
            return Some(path.to_owned());
        }

        let slug = non_empty(self.slug.as_deref())
            .map(ToOwned::to_owned)
            .or_else(|| self.title.as_deref().map(slugify))?;
        Some(page_path(None, &slug))
    }
}

/// Breadcrumb trail entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub label: String,
    pub url: String,
}

/// A page composed of layout blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default, deserialize_with = "super::nullable")]
    pub page_layout: Vec<Block>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub parent: Option<PageRef>,
    #[serde(default)]
    pub breadcrumbs: Rows<Breadcrumb>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub page_settings: PageSettings,
    #[serde(rename = "_status", default)]
    pub status: Option<Status>,
}

impl Page {
    /// Returns the slug, deriving it from the title when unset.
    pub fn slug(&self) -> String {
        non_empty(self.slug.as_deref())
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| slugify(&self.title))
    }

    /// Returns the path, deriving it from the parent and slug when unset.
    pub fn path(&self) -> String {
        if let Some(path) = non_empty(self.path.as_deref()) {
            return path.to_owned();
        }

        let parent = self.parent.as_ref().and_then(PageRef::href);
        page_path(parent.as_deref(), &self.slug())
    }

    /// Returns true if the page is flagged as the home page.
    #[must_use]
    pub fn is_home_page(&self) -> bool {
        self.page_settings.is_home_page.unwrap_or(false)
    }

    /// Returns true if the page is published (or unversioned).
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status.unwrap_or_default() == Status::Published
    }

    /// Returns the first layout block of shape `T`.
    pub fn block<T: BlockShape>(&self) -> Option<&T> {
        self.page_layout
            .iter()
            .find_map(|block| T::from_content(&block.content))
    }

    /// Returns the first layout block of shape `T`, or a malformed-content error.
    pub fn require_block<T: BlockShape>(&self) -> Result<&T> {
        self.block::<T>().ok_or_else(|| {
            Error::malformed()
                .with_message(format!(
                    "page `{}` has no `{}` in its layout",
                    self.slug(),
                    T::BLOCK_TYPE
                ))
                .with_context(format!("layout blocks: {}", self.page_layout.len()))
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
