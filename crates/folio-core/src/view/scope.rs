//! View lifetime and fetch cancellation.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::{PageView, ViewState};
use crate::resolve::ContentService;
use crate::{Result, TRACING_TARGET_VIEW};

/// Lifetime of one mounted page view.
///
/// Fetches started through [`load`](Self::load) race against the scope's
/// cancellation token. Once the scope is unmounted (explicitly or by being
/// dropped) pending loads resolve to `None` and their results are discarded.
#[derive(Debug)]
pub struct ViewScope {
    view: &'static str,
    cancel_token: CancellationToken,
}

impl ViewScope {
    /// Mounts a scope for `view`.
    pub fn mount(view: &'static str) -> Self {
        Self::with_token(view, CancellationToken::new())
    }

    /// Mounts a scope that is also unmounted when `parent` is cancelled.
    pub fn with_parent(view: &'static str, parent: &CancellationToken) -> Self {
        Self::with_token(view, parent.child_token())
    }

    fn with_token(view: &'static str, cancel_token: CancellationToken) -> Self {
        tracing::trace!(target: TRACING_TARGET_VIEW, view, "View mounted");
        Self { view, cancel_token }
    }

    pub fn view(&self) -> &'static str {
        self.view
    }

    /// Returns a token that is cancelled when the view unmounts.
    pub fn token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !self.cancel_token.is_cancelled()
    }

    /// Tears the view down, discarding the results of pending loads.
    pub fn unmount(&self) {
        if self.is_mounted() {
            tracing::trace!(target: TRACING_TARGET_VIEW, view = self.view, "View unmounted");
            self.cancel_token.cancel();
        }
    }

    /// Awaits `fetch` unless the view unmounts first.
    ///
    /// Returns `None` if the view was, or became, unmounted; the fetch is
    /// dropped in that case.
    pub async fn load<F>(&self, fetch: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;

            () = self.cancel_token.cancelled() => {
                tracing::debug!(
                    target: TRACING_TARGET_VIEW,
                    view = self.view,
                    "Discarding load for unmounted view"
                );
                None
            }

            output = fetch => Some(output),
        }
    }

    /// Loads a fallible fetch into a [`ViewState`].
    ///
    /// Returns `None` if the view unmounted before the fetch finished.
    pub async fn load_state<T, F>(&self, fetch: F) -> Option<ViewState<T>>
    where
        F: Future<Output = Result<T>>,
    {
        let result = self.load(fetch).await?;
        Some(ViewState::from_result(self.view, result))
    }

    /// Fetches the page view `V` into a [`ViewState`].
    pub async fn load_view<V: PageView>(&self, service: &ContentService) -> Option<ViewState<V>> {
        self.load_state(V::fetch(service)).await
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::content::Collection;
    use crate::provider::MemoryProvider;
    use crate::view::AboutView;

    #[tokio::test]
    async fn test_load_while_mounted() {
        let scope = ViewScope::mount("about");
        assert_eq!(scope.load(async { 7 }).await, Some(7));
        assert!(scope.is_mounted());
    }

    #[tokio::test]
    async fn test_unmounted_scope_discards_results() {
        let scope = ViewScope::mount("about");
        scope.unmount();
        assert!(!scope.is_mounted());
        assert_eq!(scope.load(async { 7 }).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_during_fetch() {
        let scope = ViewScope::mount("blogs");
        let token = scope.token();

        let slow_fetch = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "stale"
        };
        let teardown = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            token.cancel();
        };

        let (loaded, ()) = tokio::join!(scope.load(slow_fetch), teardown);
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn test_load_view_states() {
        let service = ContentService::new(
            MemoryProvider::new().with_failure(Collection::Pages),
        )
        .unwrap();

        let scope = ViewScope::mount(AboutView::NAME);
        let state = scope.load_view::<AboutView>(&service).await.unwrap();
        assert_eq!(state.error_message(), Some("Failed to load about. Please try again later."));

        scope.unmount();
        assert!(scope.load_view::<AboutView>(&service).await.is_none());
    }

    #[tokio::test]
    async fn test_parent_cancellation_and_drop() {
        let parent = CancellationToken::new();
        let scope = ViewScope::with_parent("projects", &parent);
        parent.cancel();
        assert!(!scope.is_mounted());

        let scope = ViewScope::mount("contact");
        let token = scope.token();
        drop(scope);
        assert!(token.is_cancelled());
    }
}
