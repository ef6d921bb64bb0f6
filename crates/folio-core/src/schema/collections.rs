//! Field contracts of the standard collections and globals.

use super::{CollectionSchema, FieldSchema};
use crate::content::{Collection, Status};

/// Returns the schemas of every standard collection and global.
pub fn standard_collections() -> Vec<CollectionSchema> {
    vec![pages(), projects(), blogs(), site_settings()]
}

fn pages() -> CollectionSchema {
    CollectionSchema::new(Collection::Pages, vec![
        FieldSchema::text("title").required(),
        FieldSchema::blocks("pageLayout"),
        FieldSchema::text("slug"),
        FieldSchema::text("path"),
        FieldSchema::relationship("parent", Collection::Pages),
        FieldSchema::array("breadcrumbs", vec![
            FieldSchema::text("label").required(),
            FieldSchema::text("url").required(),
        ]),
        FieldSchema::group("pageSettings", vec![
            FieldSchema::checkbox("isHomePage").with_default(false),
            FieldSchema::checkbox("isDynamicPage").with_default(false),
        ]),
        FieldSchema::select("_status", ["draft", "published"])
            .with_default(Status::default().as_ref()),
    ])
}

fn projects() -> CollectionSchema {
    CollectionSchema::new(Collection::Projects, vec![
        FieldSchema::select("projectType", ["major", "minor"])
            .required()
            .with_default("minor"),
        FieldSchema::text("projectName").required(),
        FieldSchema::upload("projectImage").required(),
        FieldSchema::textarea("summary").required(),
        FieldSchema::array("projectLinks", vec![
            FieldSchema::text("serviceName").required(),
            FieldSchema::text("serviceLink").required(),
        ]),
        FieldSchema::array("features", vec![FieldSchema::text("feature").required()]),
        FieldSchema::array("techStack", vec![
            FieldSchema::text("technology").required(),
            FieldSchema::upload("technologyIcon"),
        ]),
        FieldSchema::text("slug"),
    ])
}

fn blogs() -> CollectionSchema {
    CollectionSchema::new(Collection::Blogs, vec![
        FieldSchema::text("title").required(),
        FieldSchema::select("platform", ["medium", "devto", "hashnode", "other"])
            .required()
            .with_default("medium"),
        FieldSchema::upload("featuredImage").required(),
        FieldSchema::textarea("summary").required(),
        FieldSchema::text("externalLink").required(),
        FieldSchema::date("publishedDate").required(),
        FieldSchema::array("tags", vec![FieldSchema::text("tag").required()]),
        FieldSchema::text("slug"),
    ])
}

fn logo(name: &str, image_required: bool) -> FieldSchema {
    let image = FieldSchema::upload("image");
    let image = if image_required { image.required() } else { image };
    FieldSchema::group(name, vec![
        image,
        FieldSchema::number("height"),
        FieldSchema::number("width"),
    ])
}

fn site_settings() -> CollectionSchema {
    CollectionSchema::new(Collection::SiteSettings, vec![
        FieldSchema::text("title").required(),
        FieldSchema::textarea("description"),
        FieldSchema::upload("favicon"),
        FieldSchema::upload("ogImage"),
        FieldSchema::text("keywords"),
        logo("logo", true),
        FieldSchema::array("menuLinks", vec![
            FieldSchema::checkbox("group"),
            FieldSchema::text("label"),
            FieldSchema::group("link", vec![
                FieldSchema::select("type", ["internal", "custom"]).with_default("internal"),
                FieldSchema::checkbox("openInNewTab"),
                FieldSchema::upload("icon"),
                FieldSchema::text("label"),
                FieldSchema::relationship("page", Collection::Pages),
                FieldSchema::text("url"),
            ]),
        ]),
        logo("footerLogo", false),
        FieldSchema::textarea("footerText"),
        FieldSchema::array("footerLinks", vec![
            FieldSchema::text("group"),
            FieldSchema::array("links", vec![
                FieldSchema::text("label").required(),
                FieldSchema::text("url").required(),
            ]),
        ]),
        FieldSchema::array("socialLinks", vec![
            FieldSchema::text("platform").required(),
            FieldSchema::upload("icon"),
            FieldSchema::text("url").required(),
        ]),
        FieldSchema::array("redirects", vec![
            FieldSchema::text("fromPath").required(),
            FieldSchema::text("toPath").required(),
            FieldSchema::checkbox("isPermanent").with_default(true),
            FieldSchema::checkbox("isEnabled").with_default(true),
        ]),
        FieldSchema::group("ads", vec![
            FieldSchema::checkbox("enabled"),
            FieldSchema::text("adsenseId"),
            FieldSchema::array("placements", vec![
                FieldSchema::select("type", ["header", "sidebar", "content", "footer"]).required(),
                FieldSchema::textarea("code"),
            ]),
        ]),
        FieldSchema::group("affiliate", vec![
            FieldSchema::checkbox("enabled"),
            FieldSchema::textarea("disclosure"),
        ]),
    ])
    .global()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::content::Page;

    #[test]
    fn test_status_default_matches_unversioned_pages() {
        let pages = pages();
        let status = pages.field("_status").unwrap();
        assert_eq!(status.default, Some(json!("published")));

        let page: Page = serde_json::from_value(json!({ "title": "Home" })).unwrap();
        assert!(page.is_published());
    }
}
