//! Content client implementation using reqwest.

use std::sync::Arc;
use std::time::Instant;

use folio_core::content::Collection;
use folio_core::provider::{ContentProvider, Filter};
use folio_core::resolve::ContentService;
use folio_core::schema::SchemaRegistry;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::ReqwestConfig;
use crate::error::{Error, Result};

/// Tracing target for content client operations.
pub const TRACING_TARGET: &str = "folio_reqwest::client";

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    config: ReqwestConfig,
    base: Url,
}

impl std::fmt::Debug for ReqwestClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClientInner")
            .field("config", &self.config)
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

/// Documents requested per list page. Servers may cap it lower.
const PAGE_LIMIT: u64 = 100;

/// One page of a list response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Docs {
    docs: Vec<Value>,
    #[serde(default)]
    has_next_page: bool,
    #[serde(default)]
    next_page: Option<u64>,
    #[serde(default)]
    total_docs: Option<u64>,
}

/// Reqwest-based [`ContentProvider`] reading from a Payload-style REST API.
///
/// # Examples
///
/// ```rust,ignore
/// use folio_reqwest::{ReqwestClient, ReqwestConfig};
///
/// let client = ReqwestClient::new(ReqwestConfig::default())?;
/// let service = client.into_service()?;
/// let home = service.resolve_home().await?;
/// ```
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl ReqwestClient {
    /// Creates a new content client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ReqwestConfig) -> Result<Self> {
        let base = config.base_url()?;
        let timeout = config.effective_timeout();

        tracing::debug!(
            target: TRACING_TARGET,
            api_url = %base,
            timeout_ms = timeout.as_millis(),
            "Creating content client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(config.effective_user_agent())
            .build()?;

        let inner = ReqwestClientInner { http, config, base };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Returns the parsed base API URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    /// Converts this client into a [`ContentService`] using the standard
    /// schema registry and a media prefix derived from the API URL.
    pub fn into_service(self) -> folio_core::Result<ContentService> {
        let config = self.inner.config.resolver_config()?;
        let registry = SchemaRegistry::global()?;
        Ok(ContentService::from_parts(Arc::new(self), registry, config))
    }

    /// Builds the URL for `segments` below the base API URL.
    fn endpoint<I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.inner.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidApiUrl(self.inner.config.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T>(&self, url: Url, query: &[(String, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            conditions = query.len(),
            "Fetching content"
        );

        let response = self.inner.http.get(url.clone()).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                target: TRACING_TARGET,
                url = %url,
                status = status.as_u16(),
                "Content request rejected"
            );
            return Err(Error::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let value: T = serde_json::from_slice(&body)?;

        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Content fetched"
        );

        Ok(value)
    }
}

#[async_trait::async_trait]
impl ContentProvider for ReqwestClient {
    async fn find(&self, collection: Collection, filter: &Filter) -> folio_core::Result<Vec<Value>> {
        let url = self.endpoint([collection.as_str()])?;
        let mut documents = Vec::new();
        let mut page = 1;

        loop {
            let mut query = filter.query_pairs();
            query.push(("limit".to_owned(), PAGE_LIMIT.to_string()));
            query.push(("page".to_owned(), page.to_string()));

            let batch: Docs = self.get_json(url.clone(), &query).await?;
            let received = batch.docs.len();
            documents.extend(batch.docs);

            if !batch.has_next_page || received == 0 {
                break;
            }

            tracing::debug!(
                target: TRACING_TARGET,
                collection = %collection,
                page,
                received = documents.len(),
                total = batch.total_docs,
                "Fetching next list page"
            );
            page = batch.next_page.filter(|next| *next > page).unwrap_or(page + 1);
        }

        Ok(documents)
    }

    async fn find_by_id(&self, collection: Collection, id: u64) -> folio_core::Result<Value> {
        let url = self.endpoint([collection.as_str().to_owned(), id.to_string()])?;
        let document: Value = self.get_json(url, &[]).await?;
        Ok(document)
    }

    async fn global(&self, global: Collection) -> folio_core::Result<Value> {
        let url = self.endpoint(["globals", global.as_str()])?;
        let document: Value = self.get_json(url, &[]).await?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::Json;
    use axum::Router;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use folio_core::ErrorKind;
    use folio_core::content::AboutBlock;
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    fn about_page() -> Value {
        json!({
            "id": 2,
            "title": "About",
            "slug": "about",
            "_status": "published",
            "pageLayout": [
                { "blockType": "aboutBlock", "heading": "Hi there", "profileImage": 3 }
            ]
        })
    }

    fn home_page() -> Value {
        json!({
            "id": 1,
            "title": "Home",
            "slug": "home",
            "pageSettings": { "isHomePage": true },
            "pageLayout": [{ "blockType": "homeBlock", "name": "Ada" }]
        })
    }

    async fn pages(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
        let docs = if query.get("where[slug][equals]").map(String::as_str) == Some("about") {
            vec![about_page()]
        } else if query
            .get("where[pageSettings.isHomePage][equals]")
            .map(String::as_str)
            == Some("true")
        {
            vec![home_page()]
        } else if !query.keys().any(|key| key.starts_with("where[")) {
            vec![home_page(), about_page()]
        } else {
            Vec::new()
        };

        Json(json!({ "docs": docs, "totalDocs": docs.len() }))
    }

    async fn blog(Path(id): Path<u64>) -> impl IntoResponse {
        if id != 7 {
            return (StatusCode::NOT_FOUND, Json(json!({ "errors": [] })));
        }

        let blog = json!({
            "id": 7,
            "title": "Shipping folio",
            "platform": "devto",
            "featuredImage": { "id": 4, "url": "/api/media/file/cover.png", "alt": "Cover" },
            "summary": "Notes",
            "externalLink": "https://dev.to/ada/shipping-folio",
            "publishedDate": "2024-03-05T10:00:00Z",
            "tags": [{ "tag": "rust" }]
        });
        (StatusCode::OK, Json(blog))
    }

    fn project(id: u64) -> Value {
        let kind = if id % 2 == 0 { "major" } else { "minor" };
        json!({
            "id": id,
            "projectType": kind,
            "projectName": format!("Project {id}"),
            "projectImage": id,
            "summary": "Summary"
        })
    }

    /// Pages through twelve projects, never more than ten at a time.
    async fn projects(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
        const TOTAL: u64 = 12;
        let limit = query
            .get("limit")
            .and_then(|limit| limit.parse().ok())
            .unwrap_or(10u64)
            .clamp(1, 10);
        let page = query
            .get("page")
            .and_then(|page| page.parse().ok())
            .unwrap_or(1u64)
            .max(1);

        let first = (page - 1) * limit + 1;
        let docs: Vec<_> = (first..=TOTAL).take(limit as usize).map(project).collect();
        let has_next_page = page * limit < TOTAL;
        let next_page = has_next_page.then_some(page + 1);

        Json(json!({
            "docs": docs,
            "totalDocs": TOTAL,
            "limit": limit,
            "page": page,
            "hasNextPage": has_next_page,
            "nextPage": next_page,
        }))
    }

    async fn site_settings() -> Json<Value> {
        Json(json!({
            "title": "Ada",
            "menuLinks": [
                { "link": { "type": "custom", "label": "GitHub", "url": "https://github.com/ada" } }
            ]
        }))
    }

    /// Serves a small CMS on an ephemeral port and returns its API URL.
    async fn serve() -> anyhow::Result<String> {
        let router = Router::new()
            .route("/api/pages", get(pages))
            .route("/api/blogs/{id}", get(blog))
            .route("/api/blogs", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
            .route("/api/projects", get(projects))
            .route("/api/projects/{id}", get(|| async { "<html>not json</html>" }))
            .route("/api/globals/site-settings", get(site_settings));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(format!("http://{address}/api"))
    }

    async fn client() -> anyhow::Result<ReqwestClient> {
        let config = ReqwestConfig::default().with_api_url(serve().await?);
        Ok(ReqwestClient::new(config)?)
    }

    #[test]
    fn test_endpoint_building() {
        let config = ReqwestConfig::default().with_api_url("https://cms.example.com/api/");
        let client = ReqwestClient::new(config).unwrap();

        let url = client.endpoint(["globals", "site-settings"]).unwrap();
        assert_eq!(url.as_str(), "https://cms.example.com/api/globals/site-settings");

        let root = ReqwestClient::new(ReqwestConfig::default().with_api_url("http://cms.local"))
            .unwrap();
        assert_eq!(
            root.endpoint(["pages", "3"]).unwrap().as_str(),
            "http://cms.local/pages/3"
        );
    }

    #[test]
    fn test_invalid_api_url_is_rejected() {
        let config = ReqwestConfig::default().with_api_url("ftp://cms.example.com");
        let error = ReqwestClient::new(config).unwrap_err();
        let error: folio_core::Error = error.into();
        assert_eq!(error.kind, ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_find_sends_where_conditions() -> anyhow::Result<()> {
        let client = client().await?;

        let about = client
            .find(Collection::Pages, &Filter::equals("slug", "about"))
            .await?;
        assert_eq!(about, vec![about_page()]);

        let home = client
            .find(Collection::Pages, &Filter::equals("pageSettings.isHomePage", true))
            .await?;
        assert_eq!(home, vec![home_page()]);

        let all = client.find(Collection::Pages, &Filter::all()).await?;
        assert_eq!(all.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_status_and_body_errors() -> anyhow::Result<()> {
        let client = client().await?;

        let missing = client.find_by_id(Collection::Blogs, 8).await.unwrap_err();
        assert_eq!(missing.kind, ErrorKind::NotFound);

        let unavailable = client
            .find(Collection::Blogs, &Filter::all())
            .await
            .unwrap_err();
        assert_eq!(unavailable.kind, ErrorKind::FetchFailure);

        let garbled = client.find_by_id(Collection::Projects, 3).await.unwrap_err();
        assert_eq!(garbled.kind, ErrorKind::FetchFailure);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_follows_every_list_page() -> anyhow::Result<()> {
        let client = client().await?;

        let raw = client.find(Collection::Projects, &Filter::all()).await?;
        let ids: Vec<_> = raw.iter().filter_map(|doc| doc["id"].as_u64()).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());

        let service = client.into_service()?;
        let projects = service.projects().await?;
        assert_eq!(projects.len(), 12);
        assert_eq!(projects.iter().filter(|project| project.is_major()).count(), 6);
        Ok(())
    }

    #[tokio::test]
    async fn test_connection_refused_is_fetch_failure() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        drop(listener);

        let config = ReqwestConfig::default().with_api_url(format!("http://{address}/api"));
        let client = ReqwestClient::new(config)?;
        let error = client.global(Collection::SiteSettings).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::FetchFailure);
        Ok(())
    }

    #[tokio::test]
    async fn test_service_resolves_over_http() -> anyhow::Result<()> {
        let service = client().await?.into_service()?;

        let about = service.resolve_by_slug("about").await?;
        let block = about.require_block::<AboutBlock>()?;
        assert_eq!(block.heading, "Hi there");
        assert_eq!(
            block.profile_image.as_ref().map(|media| media.url.as_str()),
            Some("/api/media/3")
        );

        let home = service.resolve_home().await?;
        assert_eq!(home.slug(), "home");

        let missing = service.resolve_by_slug("nowhere").await.unwrap_err();
        assert_eq!(missing.kind, ErrorKind::NotFound);

        let blog = service.blog_by_id(7).await?;
        assert_eq!(blog.featured_image.url, "/api/media/file/cover.png");

        let navigation = service.navigation().await?;
        let hrefs: Vec<_> = navigation.items().iter().map(|item| item.href.as_str()).collect();
        assert_eq!(hrefs, ["https://github.com/ada", "/blogs"]);
        Ok(())
    }
}
