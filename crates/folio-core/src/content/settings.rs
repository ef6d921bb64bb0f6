//! The site-settings global.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::{PageRef, Rows};
use crate::media::Media;

/// Kind of a menu link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Reference to a page document.
    #[default]
    Internal,
    /// Literal URL.
    Custom,
}

/// Target of a navigation entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(rename = "type", default)]
    pub kind: Option<LinkType>,
    #[serde(default)]
    pub open_in_new_tab: Option<bool>,
    #[serde(default)]
    pub icon: Option<Media>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub page: Option<PageRef>,
    #[serde(default)]
    pub url: Option<String>,
}

/// One entry of the navigation menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuLink {
    #[serde(default)]
    pub group: Option<bool>,
    /// Entry label; takes precedence over the link label when set.
    #[serde(default)]
    pub label: Option<String>,
    pub link: Link,
}

impl MenuLink {
    /// Returns the entry label, falling back to the link label.
    pub fn label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or(&self.link.label)
    }
}

/// A sized logo image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    #[serde(default)]
    pub image: Option<Media>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// A group of footer links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterGroup {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub links: Rows<FooterLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub url: String,
}

/// A social profile shown in the footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSocialLink {
    pub platform: String,
    #[serde(default)]
    pub icon: Option<Media>,
    pub url: String,
}

/// A configured path redirection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    pub from_path: String,
    pub to_path: String,
    #[serde(default)]
    pub is_permanent: Option<bool>,
    #[serde(default)]
    pub is_enabled: Option<bool>,
}

impl Redirect {
    /// Redirects are permanent unless explicitly disabled.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.is_permanent.unwrap_or(true)
    }

    /// Redirects are enabled unless explicitly disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.is_enabled.unwrap_or(true)
    }
}

/// Where and how to redirect a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub location: String,
    /// `301` for permanent, `302` for temporary redirects.
    pub status: u16,
}

/// Ad slot position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AdPosition {
    Header,
    Sidebar,
    Content,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdPlacement {
    #[serde(rename = "type")]
    pub position: AdPosition,
    #[serde(default)]
    pub code: Option<String>,
}

/// Advertisement settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ads {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub adsense_id: Option<String>,
    #[serde(default)]
    pub placements: Rows<AdPlacement>,
}

/// Affiliate link settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliate {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub disclosure: Option<String>,
}

/// Singleton global shared by every page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub favicon: Option<Media>,
    #[serde(default)]
    pub og_image: Option<Media>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub logo: Option<Logo>,
    #[serde(default)]
    pub menu_links: Rows<MenuLink>,
    #[serde(default)]
    pub footer_logo: Option<Logo>,
    #[serde(default)]
    pub footer_text: Option<String>,
    #[serde(default)]
    pub footer_links: Rows<FooterGroup>,
    #[serde(default)]
    pub social_links: Rows<SiteSocialLink>,
    #[serde(default)]
    pub redirects: Rows<Redirect>,
    #[serde(default)]
    pub ads: Option<Ads>,
    #[serde(default)]
    pub affiliate: Option<Affiliate>,
}

impl SiteSettings {
    /// Splits the comma-separated keywords field.
    pub fn keywords(&self) -> Vec<&str> {
        self.keywords
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .collect()
    }

    /// Returns the first enabled redirect matching `path`.
    ///
    /// Trailing slashes are ignored on both sides.
    pub fn redirect_for(&self, path: &str) -> Option<RedirectTarget> {
        let wanted = trim_path(path);
        self.redirects
            .iter()
            .filter(|redirect| redirect.is_enabled())
            .find(|redirect| trim_path(&redirect.from_path) == wanted)
            .map(|redirect| RedirectTarget {
                location: redirect.to_path.clone(),
                status: if redirect.is_permanent() { 301 } else { 302 },
            })
    }

    /// Returns true if advertisements are switched on.
    #[must_use]
    pub fn ads_enabled(&self) -> bool {
        self.ads
            .as_ref()
            .and_then(|ads| ads.enabled)
            .unwrap_or(false)
    }
}

fn trim_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn settings() -> SiteSettings {
        serde_json::from_value(json!({
            "title": "Folio",
            "keywords": "rust, portfolio,, cms ",
            "menuLinks": [
                { "id": "m1", "link": { "type": "custom", "label": "GitHub", "url": "https://github.com" } }
            ],
            "redirects": [
                { "fromPath": "/old", "toPath": "/new", "isPermanent": false, "isEnabled": false },
                { "fromPath": "/old/", "toPath": "/newer" },
                { "fromPath": "/blog", "toPath": "/blogs", "isPermanent": false, "isEnabled": true }
            ],
            "ads": { "enabled": true, "placements": [ { "type": "sidebar" } ] }
        }))
        .unwrap()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(settings().keywords(), vec!["rust", "portfolio", "cms"]);
        assert!(SiteSettings::default().keywords().is_empty());
    }

    #[test]
    fn test_redirects() {
        let settings = settings();

        let permanent = settings.redirect_for("/old").unwrap();
        assert_eq!(permanent.location, "/newer");
        assert_eq!(permanent.status, 301);

        let temporary = settings.redirect_for("/blog/").unwrap();
        assert_eq!(temporary.location, "/blogs");
        assert_eq!(temporary.status, 302);

        assert!(settings.redirect_for("/about").is_none());
    }

    #[test]
    fn test_menu_and_ads() {
        let settings = settings();
        let link = &settings.menu_links.first().unwrap().link;

        assert_eq!(link.kind, Some(LinkType::Custom));
        assert_eq!(link.url.as_deref(), Some("https://github.com"));
        assert!(settings.ads_enabled());
    }
}
