//! Content provider abstraction.
//!
//! A [`ContentProvider`] fetches raw JSON documents from wherever the content
//! lives. It performs no validation or decoding; that happens in
//! [`ContentService`](crate::resolve::ContentService).

mod filter;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
mod memory;

use serde_json::Value;

pub use self::filter::{Condition, Filter};
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use self::memory::MemoryProvider;
use crate::Result;
use crate::content::Collection;

/// Core trait for content retrieval.
///
/// Implement this trait to serve content from a custom backend.
#[async_trait::async_trait]
pub trait ContentProvider: Send + Sync {
    /// Returns every document of `collection` matching `filter`, in store order.
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Value>>;

    /// Returns the document of `collection` with the given id.
    ///
    /// Fails with `NotFound` if there is none.
    async fn find_by_id(&self, collection: Collection, id: u64) -> Result<Value>;

    /// Returns a singleton global document.
    async fn global(&self, global: Collection) -> Result<Value>;
}
