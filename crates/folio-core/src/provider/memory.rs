//! In-memory content provider for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use super::{ContentProvider, Filter};
use crate::content::Collection;
use crate::{Error, Result};

/// Content provider backed by documents held in memory.
///
/// Documents are returned in insertion order. Collections marked with
/// [`with_failure`](Self::with_failure) fail every request with a fetch
/// failure.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    documents: HashMap<Collection, Vec<Value>>,
    globals: HashMap<Collection, Value>,
    failing: HashSet<Collection>,
    requests: Arc<AtomicUsize>,
}

impl MemoryProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document to a collection.
    pub fn with_document(mut self, collection: Collection, document: Value) -> Self {
        self.documents.entry(collection).or_default().push(document);
        self
    }

    /// Adds several documents to a collection.
    pub fn with_documents<I>(mut self, collection: Collection, documents: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.documents
            .entry(collection)
            .or_default()
            .extend(documents);
        self
    }

    /// Sets a global document.
    pub fn with_global(mut self, global: Collection, document: Value) -> Self {
        self.globals.insert(global, document);
        self
    }

    /// Makes every request for `collection` fail.
    pub fn with_failure(mut self, collection: Collection) -> Self {
        self.failing.insert(collection);
        self
    }

    /// Returns the number of requests served so far, failed ones included.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    fn begin(&self, collection: Collection) -> Result<()> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if self.failing.contains(&collection) {
            return Err(Error::fetch_failure()
                .with_message(format!("simulated failure fetching `{collection}`")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContentProvider for MemoryProvider {
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Value>> {
        self.begin(collection)?;
        let documents = self
            .documents
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn find_by_id(&self, collection: Collection, id: u64) -> Result<Value> {
        self.begin(collection)?;
        self.documents
            .get(&collection)
            .and_then(|documents| {
                documents
                    .iter()
                    .find(|document| document.get("id").and_then(Value::as_u64) == Some(id))
            })
            .cloned()
            .ok_or_else(|| {
                Error::not_found().with_message(format!("no `{collection}` document with id {id}"))
            })
    }

    async fn global(&self, global: Collection) -> Result<Value> {
        self.begin(global)?;
        self.globals
            .get(&global)
            .cloned()
            .ok_or_else(|| Error::not_found().with_message(format!("global `{global}` is not set")))
    }
}
