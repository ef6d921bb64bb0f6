//! Content service wrapper with observability.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{ResolverConfig, Uniqueness};
use crate::content::{
    Blog, Collection, ListCollection, ListEntry, MenuLink, Page, Project, Rows, SiteSettings,
};
use crate::media::MediaResolver;
use crate::navigation::Navigation;
use crate::provider::{ContentProvider, Filter};
use crate::schema::{CollectionSchema, SchemaRegistry};
use crate::{Error, Result, TRACING_TARGET_RESOLVE};

/// Site-settings field holding the navigation menu.
const MENU_LINKS: &str = "menuLinks";

/// Resolves raw provider documents into typed, render-ready content.
///
/// Every document passes through the same boundary: draft filtering,
/// schema validation, media normalization and decoding. Layout blocks of an
/// unregistered type are dropped. Cloning is cheap.
#[derive(Clone)]
pub struct ContentService {
    inner: Arc<Inner>,
}

struct Inner {
    provider: Arc<dyn ContentProvider>,
    registry: Arc<SchemaRegistry>,
    config: ResolverConfig,
    media: MediaResolver,
}

impl fmt::Debug for ContentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentService")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ContentService {
    /// Creates a service over `provider` with the standard schema registry.
    ///
    /// Fails with a configuration error if the standard registry is invalid.
    pub fn new<P>(provider: P) -> Result<Self>
    where
        P: ContentProvider + 'static,
    {
        Ok(Self::from_parts(
            Arc::new(provider),
            SchemaRegistry::global()?,
            ResolverConfig::default(),
        ))
    }

    /// Creates a service from its parts.
    pub fn from_parts(
        provider: Arc<dyn ContentProvider>,
        registry: Arc<SchemaRegistry>,
        config: ResolverConfig,
    ) -> Self {
        let media = config.media_resolver();
        Self {
            inner: Arc::new(Inner {
                provider,
                registry,
                config,
                media,
            }),
        }
    }

    /// Returns a service sharing the provider and registry with a new config.
    pub fn with_config(&self, config: ResolverConfig) -> Self {
        Self::from_parts(
            Arc::clone(&self.inner.provider),
            Arc::clone(&self.inner.registry),
            config,
        )
    }

    /// Returns the resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.inner.config
    }

    /// Returns the schema registry documents are validated against.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.inner.registry
    }

    /// Resolves the page with the given slug.
    pub async fn resolve_by_slug(&self, slug: &str) -> Result<Page> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(Error::invalid_input().with_message("page slug must not be empty"));
        }

        self.resolve_page(Filter::equals("slug", slug)).await
    }

    /// Resolves the page mounted at `path`. A missing leading slash is added.
    pub async fn resolve_by_path(&self, path: &str) -> Result<Page> {
        let path = path.trim();
        let path = match path.strip_prefix('/') {
            Some(_) => path.to_owned(),
            None => format!("/{path}"),
        };

        self.resolve_page(Filter::equals("path", path)).await
    }

    /// Resolves the page flagged as the home page.
    pub async fn resolve_home(&self) -> Result<Page> {
        self.resolve_page(Filter::equals("pageSettings.isHomePage", true))
            .await
    }

    /// Resolves every entry of a flat list collection.
    pub async fn resolve_list(&self, collection: ListCollection) -> Result<Vec<ListEntry>> {
        let entries = match collection {
            ListCollection::Projects => self
                .projects()
                .await?
                .into_iter()
                .map(|project| ListEntry::Project(Box::new(project)))
                .collect(),
            ListCollection::Blogs => self
                .blogs()
                .await?
                .into_iter()
                .map(|blog| ListEntry::Blog(Box::new(blog)))
                .collect(),
        };
        Ok(entries)
    }

    /// Resolves every project, in store order.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.decode_all(Collection::Projects).await
    }

    /// Resolves every blog post, newest first.
    pub async fn blogs(&self) -> Result<Vec<Blog>> {
        let mut blogs: Vec<Blog> = self.decode_all(Collection::Blogs).await?;
        blogs.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        Ok(blogs)
    }

    /// Resolves the project whose slug matches `slug`, ignoring case.
    pub async fn project_by_slug(&self, slug: &str) -> Result<Project> {
        let wanted = slug.trim().to_lowercase();
        self.projects()
            .await?
            .into_iter()
            .find(|project| project.slug().to_lowercase() == wanted)
            .ok_or_else(|| {
                Error::not_found().with_message(format!("no project with slug `{slug}`"))
            })
    }

    /// Resolves a blog post by id.
    pub async fn blog_by_id(&self, id: u64) -> Result<Blog> {
        let detail = format!("id={id}");
        let raw = self
            .observe("find_by_id", Collection::Blogs, &detail, async {
                self.inner.provider.find_by_id(Collection::Blogs, id).await
            })
            .await?;
        self.decode(Collection::Blogs, raw)
    }

    /// Resolves the site-settings global.
    pub async fn site_settings(&self) -> Result<SiteSettings> {
        let raw = self
            .observe("global", Collection::SiteSettings, "", async {
                self.inner.provider.global(Collection::SiteSettings).await
            })
            .await?;
        self.decode(Collection::SiteSettings, raw)
    }

    /// Resolves and materializes the navigation menu.
    ///
    /// Only the `menuLinks` subtree of the site settings is validated, so
    /// unrelated gaps in the global do not take the menu down.
    pub async fn navigation(&self) -> Result<Navigation> {
        let mut raw = self
            .observe("global", Collection::SiteSettings, "menuLinks", async {
                self.inner.provider.global(Collection::SiteSettings).await
            })
            .await?;

        let settings = self
            .inner
            .registry
            .collection(Collection::SiteSettings.as_str())?;
        let menu_schema = CollectionSchema::new(
            settings.slug(),
            settings.field(MENU_LINKS).cloned().into_iter().collect(),
        );

        let links = raw.get_mut(MENU_LINKS).map(Value::take).unwrap_or_default();
        let mut menu = Value::Object(Map::from_iter([(MENU_LINKS.to_owned(), links)]));
        menu_schema.validate(&menu)?;
        menu_schema.normalize_media(&mut menu, &self.inner.media)?;

        let links = menu.get_mut(MENU_LINKS).map(Value::take).unwrap_or_default();
        let menu_links: Rows<MenuLink> = serde_json::from_value(links).map_err(|error| {
            Error::from(error).with_context(format!("collection: {}", Collection::SiteSettings))
        })?;
        Ok(Navigation::materialize(&menu_links))
    }

    async fn resolve_page(&self, filter: Filter) -> Result<Page> {
        let detail = filter.to_string();
        let mut documents = self.find(Collection::Pages, &filter).await?;

        let raw = match documents.len() {
            0 => {
                return Err(Error::not_found().with_message(format!("no page matches {detail}")));
            }
            1 => documents.swap_remove(0),
            count => match self.inner.config.uniqueness {
                Uniqueness::FirstMatch => {
                    tracing::warn!(
                        target: TRACING_TARGET_RESOLVE,
                        filter = %detail,
                        matches = count,
                        "Several pages match, using the first"
                    );
                    documents.swap_remove(0)
                }
                Uniqueness::Strict => {
                    return Err(Error::ambiguous()
                        .with_message(format!("{count} pages match {detail}")));
                }
            },
        };

        self.decode_page(raw)
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Value>> {
        let detail = filter.to_string();
        let documents = self
            .observe("find", collection, &detail, async {
                self.inner.provider.find(collection, filter).await
            })
            .await?;

        if self.inner.config.include_drafts {
            return Ok(documents);
        }

        let total = documents.len();
        let published: Vec<_> = documents.into_iter().filter(|doc| !is_draft(doc)).collect();
        if published.len() < total {
            tracing::debug!(
                target: TRACING_TARGET_RESOLVE,
                collection = %collection,
                skipped = total - published.len(),
                "Skipped draft documents"
            );
        }
        Ok(published)
    }

    async fn decode_all<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        self.find(collection, &Filter::all())
            .await?
            .into_iter()
            .map(|raw| self.decode(collection, raw))
            .collect()
    }

    /// Validates, normalizes and decodes a flat document.
    fn decode<T: DeserializeOwned>(&self, collection: Collection, mut raw: Value) -> Result<T> {
        let schema = self.inner.registry.collection(collection.as_str())?;
        schema.validate(&raw)?;
        schema.normalize_media(&mut raw, &self.inner.media)?;

        serde_json::from_value(raw).map_err(|error| {
            Error::from(error).with_context(format!("collection: {collection}"))
        })
    }

    /// Validates, normalizes and decodes a page, block by block.
    fn decode_page(&self, mut raw: Value) -> Result<Page> {
        let registry = &self.inner.registry;
        let schema = registry.collection(Collection::Pages.as_str())?;
        schema.validate(&raw)?;
        schema.normalize_media(&mut raw, &self.inner.media)?;

        let layout = match raw.get_mut("pageLayout") {
            Some(Value::Array(blocks)) => std::mem::take(blocks),
            _ => Vec::new(),
        };

        let mut blocks = Vec::with_capacity(layout.len());
        for (index, mut block) in layout.into_iter().enumerate() {
            let block_type = block
                .get("blockType")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned);

            let Some(block_type) = block_type.filter(|block_type| registry.contains(block_type))
            else {
                tracing::warn!(
                    target: TRACING_TARGET_RESOLVE,
                    index,
                    block_type = ?block.get("blockType"),
                    "Ignoring layout block of unknown type"
                );
                continue;
            };

            let block_schema = registry.resolve_schema(&block_type)?;
            block_schema
                .validate(&block)
                .map_err(|error| error.with_context(format!("pageLayout.{index}: {block_type}")))?;
            block_schema.normalize_media(&mut block, &self.inner.media)?;
            blocks.push(block);
        }

        if let Some(object) = raw.as_object_mut() {
            object.insert("pageLayout".into(), Value::Array(blocks));
        }

        let page: Page = serde_json::from_value(raw)
            .map_err(|error| Error::from(error).with_context("collection: pages"))?;

        tracing::debug!(
            target: TRACING_TARGET_RESOLVE,
            slug = %page.slug(),
            blocks = page.page_layout.len(),
            "Resolved page"
        );
        Ok(page)
    }

    /// Runs a provider call with timing and structured logging.
    async fn observe<T, F>(
        &self,
        operation: &'static str,
        collection: Collection,
        detail: &str,
        call: F,
    ) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET_RESOLVE,
            operation,
            collection = %collection,
            detail,
            "Fetching content"
        );

        let result = call.await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(_) => {
                tracing::debug!(
                    target: TRACING_TARGET_RESOLVE,
                    operation,
                    collection = %collection,
                    elapsed_ms = elapsed.as_millis(),
                    "Content fetched"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_RESOLVE,
                    operation,
                    collection = %collection,
                    detail,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Content fetch failed"
                );
            }
        }

        result
    }
}

fn is_draft(document: &Value) -> bool {
    document.get("_status").and_then(Value::as_str) == Some("draft")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::content::{AboutBlock, ContactBlock, HomeBlock};
    use crate::provider::MemoryProvider;

    fn about_page(id: u64, heading: &str) -> Value {
        json!({
            "id": id,
            "title": "About",
            "slug": "about",
            "path": "/about",
            "_status": "published",
            "pageLayout": [
                { "blockType": "aboutBlock", "heading": heading, "profileImage": 21 }
            ]
        })
    }

    fn home_page() -> Value {
        json!({
            "id": 1,
            "title": "Home",
            "slug": "home",
            "pageSettings": { "isHomePage": true },
            "pageLayout": [
                { "blockType": "carouselBlock", "slides": [] },
                {
                    "blockType": "homeBlock",
                    "name": "Ada",
                    "profileImage": { "id": 2, "url": "/uploads/ada.png", "alt": "Ada" },
                    "socialLinks": [ { "id": "s1", "platform": "github", "url": "https://github.com/ada" } ]
                }
            ]
        })
    }

    fn blog(id: u64, title: &str, published: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "platform": "medium",
            "featuredImage": id + 100,
            "summary": "Summary",
            "externalLink": "https://medium.com/@ada/post",
            "publishedDate": published
        })
    }

    fn project(id: u64, name: &str, kind: &str, slug: Option<&str>) -> Value {
        json!({
            "id": id,
            "projectType": kind,
            "projectName": name,
            "projectImage": { "id": id, "url": "https://cdn.example.com/p.png" },
            "summary": "Summary",
            "slug": slug
        })
    }

    fn service(provider: MemoryProvider) -> ContentService {
        ContentService::new(provider).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_by_slug_single_match() {
        let service = service(
            MemoryProvider::new().with_document(Collection::Pages, about_page(2, "About me")),
        );

        let page = service.resolve_by_slug("about").await.unwrap();
        let about = page.block::<AboutBlock>().unwrap();
        assert_eq!(about.heading, "About me");
        assert_eq!(about.profile_image.as_ref().unwrap().url, "/api/media/21");
    }

    #[tokio::test]
    async fn test_resolve_by_slug_not_found() {
        let service = service(MemoryProvider::new());
        let error = service.resolve_by_slug("about").await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::NotFound);

        let error = service.resolve_by_slug("  ").await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_duplicate_slug_uses_first_match() {
        let provider = MemoryProvider::new().with_documents(Collection::Pages, [
            about_page(2, "First"),
            about_page(3, "Second"),
        ]);
        let service = service(provider);

        let page = service.resolve_by_slug("about").await.unwrap();
        assert_eq!(page.id, Some(2));
        assert_eq!(page.block::<AboutBlock>().unwrap().heading, "First");

        let strict = service.with_config(ResolverConfig::default().with_uniqueness(Uniqueness::Strict));
        let error = strict.resolve_by_slug("about").await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::AmbiguousResult);
    }

    #[tokio::test]
    async fn test_drafts_are_skipped() {
        let mut draft = about_page(2, "Draft");
        draft["_status"] = json!("draft");
        let service = service(MemoryProvider::new().with_documents(Collection::Pages, [
            draft,
            about_page(3, "Live"),
        ]));

        let page = service.resolve_by_slug("about").await.unwrap();
        assert_eq!(page.id, Some(3));

        let with_drafts =
            service.with_config(ResolverConfig::default().with_include_drafts(true));
        assert_eq!(with_drafts.resolve_by_slug("about").await.unwrap().id, Some(2));
    }

    #[tokio::test]
    async fn test_resolve_home_and_path() {
        let service = service(
            MemoryProvider::new()
                .with_document(Collection::Pages, home_page())
                .with_document(Collection::Pages, about_page(2, "About")),
        );

        let home = service.resolve_home().await.unwrap();
        assert!(home.is_home_page());
        assert_eq!(home.page_layout.len(), 1);

        let hero = home.block::<HomeBlock>().unwrap();
        assert_eq!(hero.name, "Ada");
        assert_eq!(hero.profile_image.as_ref().unwrap().url, "/api/media/2");

        let about = service.resolve_by_path("about").await.unwrap();
        assert_eq!(about.id, Some(2));
    }

    #[tokio::test]
    async fn test_malformed_block_is_reported() {
        let page = json!({
            "title": "Contact",
            "slug": "contact",
            "pageLayout": [ { "blockType": "contactBlock", "contactReasons": [] } ]
        });
        let service = service(MemoryProvider::new().with_document(Collection::Pages, page));

        let error = service.resolve_by_slug("contact").await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedContent);
        assert_eq!(error.context.as_deref(), Some("pageLayout.0: contactBlock"));
    }

    #[tokio::test]
    async fn test_missing_block_is_malformed() {
        let service = service(
            MemoryProvider::new().with_document(Collection::Pages, about_page(2, "About")),
        );

        let page = service.resolve_by_slug("about").await.unwrap();
        let error = page.require_block::<ContactBlock>().unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedContent);
    }

    #[tokio::test]
    async fn test_blogs_are_newest_first_and_normalized() {
        let service = service(MemoryProvider::new().with_documents(Collection::Blogs, [
            blog(1, "Old", "2023-01-10T00:00:00.000Z"),
            blog(2, "New", "2024-06-01T00:00:00.000Z"),
        ]));

        let blogs = service.blogs().await.unwrap();
        let titles: Vec<_> = blogs.iter().map(|blog| blog.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old"]);
        assert_eq!(blogs[0].featured_image.url, "/api/media/102");

        let entries = service.resolve_list(ListCollection::Blogs).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title(), "New");

        let by_id = service.blog_by_id(1).await.unwrap();
        assert_eq!(by_id.title, "Old");
        assert!(service.blog_by_id(7).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_project_by_slug_ignores_case() {
        let service = service(MemoryProvider::new().with_documents(Collection::Projects, [
            project(1, "Folio Engine", "major", Some("Folio-Engine")),
            project(2, "Tiny Tool", "minor", None),
        ]));

        let engine = service.project_by_slug("folio-engine").await.unwrap();
        assert_eq!(engine.id, Some(1));
        assert_eq!(engine.project_image.url, "https://cdn.example.com/p.png");

        let tool = service.project_by_slug("TINY-TOOL").await.unwrap();
        assert_eq!(tool.id, Some(2));

        let error = service.project_by_slug("missing").await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let service = service(MemoryProvider::new().with_failure(Collection::Projects));
        let error = service.projects().await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::FetchFailure);
    }

    #[tokio::test]
    async fn test_navigation_appends_blogs() {
        let settings = json!({
            "menuLinks": [
                { "label": "About", "link": { "type": "internal", "page": { "slug": "about" } } }
            ]
        });
        let service = service(MemoryProvider::new().with_global(Collection::SiteSettings, settings));

        let navigation = service.navigation().await.unwrap();
        let items: Vec<_> = navigation
            .items()
            .iter()
            .map(|item| (item.label.as_str(), item.href.as_str()))
            .collect();
        assert_eq!(items, vec![("About", "/about"), ("Blogs", "/blogs")]);
    }

    #[tokio::test]
    async fn test_navigation_ignores_unrelated_settings_gaps() {
        let settings = json!({
            "logo": { "height": 40 },
            "menuLinks": [
                { "link": { "type": "custom", "label": "CV", "url": "/cv.pdf", "icon": 9 } }
            ]
        });
        let service = service(MemoryProvider::new().with_global(Collection::SiteSettings, settings));

        let navigation = service.navigation().await.unwrap();
        assert_eq!(navigation.items()[0].icon.as_deref(), Some("/api/media/9"));
        assert_eq!(navigation.len(), 2);

        let error = service.site_settings().await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedContent);
    }

    #[tokio::test]
    async fn test_navigation_rejects_malformed_menu() {
        let settings = json!({
            "menuLinks": [ { "link": { "type": "sideways", "label": "Odd" } } ]
        });
        let service = service(MemoryProvider::new().with_global(Collection::SiteSettings, settings));

        let error = service.navigation().await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedContent);
        assert!(error.to_string().contains("menuLinks.0.link.type"));
    }
}
