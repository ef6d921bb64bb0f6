//! Typed content model.
//!
//! Documents arrive from the CMS as JSON. After schema validation and media
//! normalization they decode into the types in this module, which is all the
//! view layer ever sees.

mod block;
mod collection;
mod page;
mod rows;
mod settings;

use serde::{Deserialize, Deserializer};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

pub use self::block::{
    AboutBlock, Achievement, Block, BlockContent, BlockShape, BlockType, CodeProfile,
    CodeProfiles, CommentsBlock, ContactBlock, ContactReason, DEFAULT_CONTACT_SUBMIT,
    DEFAULT_FORM_SUBMIT, DetailPoint, DetailSection, DynamicContentBlock, Experience,
    ExperiencesBlock, FormBlock, FormField, FormFieldType, HomeBlock, ListBlock, ListCollection,
    Skill, SocialLink, SocialPlatform, StacksBlock, TechStack, Technology, WorkDetail,
};
pub use self::collection::{
    Blog, BlogPlatform, Feature, ListEntry, Project, ProjectLink, ProjectTechnology, ProjectType,
    Tag,
};
pub use self::page::{Breadcrumb, Page, PageRef, PageSettings, PageSummary, Status};
pub use self::rows::{Row, RowId, Rows};
pub use self::settings::{
    AdPlacement, AdPosition, Ads, Affiliate, FooterGroup, FooterLink, Link, LinkType, Logo,
    MenuLink, Redirect, RedirectTarget, SiteSettings, SiteSocialLink,
};

/// Collections and globals exposed by the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Collection {
    Pages,
    Projects,
    Blogs,
    /// The site-settings global.
    SiteSettings,
}

impl Collection {
    /// Returns the collection slug used in API routes.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Returns true for singleton globals.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::SiteSettings)
    }
}

impl From<ListCollection> for Collection {
    fn from(collection: ListCollection) -> Self {
        match collection {
            ListCollection::Blogs => Self::Blogs,
            ListCollection::Projects => Self::Projects,
        }
    }
}

/// Deserializes `null` as the default value.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_collection_slugs() {
        assert_eq!(Collection::SiteSettings.as_str(), "site-settings");
        assert_eq!(Collection::Pages.to_string(), "pages");
        assert_eq!(
            Collection::from_str("blogs").unwrap(),
            Collection::from(ListCollection::Blogs)
        );
        assert!(Collection::SiteSettings.is_global());
        assert!(!Collection::Projects.is_global());
    }
}
