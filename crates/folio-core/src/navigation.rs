//! Navigation menu materialization.

use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_NAVIGATION;
use crate::content::{LinkType, MenuLink, Rows};

/// Href used when a menu entry has no usable target.
pub const FALLBACK_HREF: &str = "#";

/// Path of the blog listing, appended to menus that lack it.
pub const BLOGS_PATH: &str = "/blogs";

/// A menu entry in render-ready shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub open_in_new_tab: bool,
    /// Icon URL.
    pub icon: Option<String>,
}

impl NavItem {
    /// Creates a same-tab entry without an icon.
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            open_in_new_tab: false,
            icon: None,
        }
    }

    fn is_blogs(&self) -> bool {
        let label = self.label.trim().to_lowercase();
        self.href == BLOGS_PATH || label == "blogs" || label == "blog"
    }
}

/// Materialized navigation menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    items: Vec<NavItem>,
}

impl Navigation {
    /// Materializes the site-settings menu links.
    ///
    /// Never fails: entries without a usable target get [`FALLBACK_HREF`].
    /// A `Blogs` entry is appended unless the menu already links the blog
    /// listing.
    pub fn materialize(menu: &Rows<MenuLink>) -> Self {
        let mut items: Vec<_> = menu.iter().map(nav_item).collect();

        if !items.iter().any(NavItem::is_blogs) {
            items.push(NavItem::new("Blogs", BLOGS_PATH));
        }

        Self { items }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Returns the entry whose href matches `path`, ignoring a trailing slash.
    pub fn active_item(&self, path: &str) -> Option<&NavItem> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        self.items.iter().find(|item| item.href == path)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for Navigation {
    type Item = NavItem;
    type IntoIter = std::vec::IntoIter<NavItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

fn nav_item(entry: &MenuLink) -> NavItem {
    let link = &entry.link;
    let kind = link.kind.unwrap_or_default();
    let page_href = match kind {
        LinkType::Internal => link.page.as_ref().and_then(|page| page.href()),
        LinkType::Custom => None,
    };
    let url = link.url.as_deref().filter(|url| !url.trim().is_empty());

    let href = match (page_href, url) {
        (Some(href), _) => href,
        (None, Some(url)) => url.to_owned(),
        (None, None) => {
            tracing::warn!(
                target: TRACING_TARGET_NAVIGATION,
                label = %entry.label(),
                kind = %kind,
                "Menu link has no usable target, falling back"
            );
            FALLBACK_HREF.to_owned()
        }
    };

    NavItem {
        label: entry.label().to_owned(),
        href,
        open_in_new_tab: link.open_in_new_tab.unwrap_or(false),
        icon: link.icon.as_ref().map(|icon| icon.url.clone()),
    }
}
