//! Keeps the posts store in step with pagination, search, and sort input.
//!
//! Every change of query context (a reset, or a new search text) bumps an
//! epoch. Requests remember the epoch they were issued under, and a response
//! whose epoch is no longer current is dropped without touching the store or
//! the pagination cursor.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use shared::{
    domain::SortOrder,
    error::ApiError,
    protocol::{PageRequest, PostsPage, PAGE_SIZE},
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{debounce::Debouncer, store::PostsStore, PostsApi};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Queries whose trimmed length is at or below this are never sent.
const MIN_SEARCH_CHARS: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSnapshot {
    pub skip: u32,
    pub has_more: bool,
    pub search_text: String,
    pub sort_order: SortOrder,
    pub is_loading: bool,
    pub is_searching: bool,
    pub initialized: bool,
}

impl SyncSnapshot {
    /// Whether the trailing "loading more" sentinel should be shown.
    pub fn shows_sentinel(&self) -> bool {
        self.has_more && self.search_text.is_empty()
    }
}

/// Outcome of selecting a sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortChange {
    Unchanged,
    /// Remembered until the search text is cleared.
    Deferred,
    Reloaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageMode {
    Replace,
    Append,
}

struct SyncState {
    skip: u32,
    has_more: bool,
    search_text: String,
    sort_order: SortOrder,
    initialized: bool,
    epoch: u64,
    loading: Option<u64>,
    searching: Option<u64>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            skip: 0,
            has_more: true,
            search_text: String::new(),
            sort_order: SortOrder::None,
            initialized: false,
            epoch: 0,
            loading: None,
            searching: None,
        }
    }
}

pub struct SyncController {
    api: Arc<dyn PostsApi>,
    store: PostsStore,
    state: Mutex<SyncState>,
    search_debounce: Debouncer,
    this: Weak<SyncController>,
}

impl SyncController {
    pub fn new(api: Arc<dyn PostsApi>, store: PostsStore) -> Arc<Self> {
        Self::with_debounce(api, store, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(
        api: Arc<dyn PostsApi>,
        store: PostsStore,
        debounce: Duration,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            api,
            store,
            state: Mutex::new(SyncState::default()),
            search_debounce: Debouncer::new(debounce),
            this: this.clone(),
        })
    }

    pub fn store(&self) -> &PostsStore {
        &self.store
    }

    pub async fn snapshot(&self) -> SyncSnapshot {
        let state = self.state.lock().await;
        SyncSnapshot {
            skip: state.skip,
            has_more: state.has_more,
            search_text: state.search_text.clone(),
            sort_order: state.sort_order,
            is_loading: state.loading.is_some(),
            is_searching: state.searching.is_some(),
            initialized: state.initialized,
        }
    }

    /// Loads the first page. Only the first call per controller does
    /// anything; returns whether this call performed the load.
    pub async fn initialize(&self) -> bool {
        self.initialize_inner(None).await
    }

    /// Like [`SyncController::initialize`], with `order` selected before the
    /// first page is requested.
    pub async fn initialize_sorted(&self, order: SortOrder) -> bool {
        self.initialize_inner(Some(order)).await
    }

    async fn initialize_inner(&self, order: Option<SortOrder>) -> bool {
        {
            let mut state = self.state.lock().await;
            if state.initialized {
                debug!("controller already initialized");
                return false;
            }
            state.initialized = true;
            if let Some(order) = order {
                state.sort_order = order;
            }
        }
        self.reset_and_fetch().await;
        true
    }

    /// Restarts pagination from page zero under the current sort order and
    /// replaces the store with the result.
    pub async fn reset_and_fetch(&self) {
        let (epoch, request) = {
            let mut state = self.state.lock().await;
            state.epoch += 1;
            state.skip = 0;
            state.has_more = true;
            state.loading = Some(state.epoch);
            (state.epoch, PageRequest::new(0, state.sort_order))
        };

        let result = self.api.fetch_page(request).await;
        self.apply_page(epoch, result, PageMode::Replace).await;
    }

    /// Appends the next page. Returns false without a request when a fetch
    /// is already in flight, the list is exhausted, or search text is set.
    pub async fn fetch_next_page(&self) -> bool {
        let (epoch, request) = {
            let mut state = self.state.lock().await;
            if state.loading.is_some() || !state.has_more || !state.search_text.is_empty() {
                debug!(
                    loading = state.loading.is_some(),
                    has_more = state.has_more,
                    searching = !state.search_text.is_empty(),
                    "skipping page fetch"
                );
                return false;
            }
            state.loading = Some(state.epoch);
            (state.epoch, PageRequest::new(state.skip, state.sort_order))
        };

        let result = self.api.fetch_page(request).await;
        self.apply_page(epoch, result, PageMode::Append).await;
        true
    }

    async fn apply_page(&self, epoch: u64, result: Result<PostsPage, ApiError>, mode: PageMode) {
        let mut state = self.state.lock().await;
        if state.loading == Some(epoch) {
            state.loading = None;
        }
        if state.epoch != epoch {
            debug!(epoch, current = state.epoch, "dropping stale page response");
            return;
        }

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, "failed to fetch posts page");
                state.has_more = false;
                return;
            }
        };

        let count = page.posts.len();
        match mode {
            PageMode::Replace => {
                self.store.replace_all(page.posts);
                state.skip = u32::from(count > 0);
            }
            PageMode::Append if count > 0 => {
                self.store.append(page.posts);
                state.skip += 1;
            }
            PageMode::Append => {}
        }
        if count < PAGE_SIZE {
            state.has_more = false;
        }
        info!(
            count,
            skip = state.skip,
            has_more = state.has_more,
            sort = %state.sort_order,
            "applied posts page"
        );
    }

    /// Schedules a search for `query` once input has been idle for the
    /// debounce delay, replacing any search still waiting. Queries of one
    /// character or less are not scheduled.
    pub async fn search(&self, query: impl Into<String>) -> bool {
        let epoch = self.state.lock().await.epoch;
        self.schedule_search(epoch, query.into())
    }

    /// The search only runs if `epoch` is still current when the timer fires.
    fn schedule_search(&self, epoch: u64, query: String) -> bool {
        if query.trim().chars().count() <= MIN_SEARCH_CHARS {
            self.search_debounce.cancel();
            debug!(query = %query, "search query too short");
            return false;
        }

        let this = self.this.clone();
        self.search_debounce.schedule(async move {
            if let Some(controller) = this.upgrade() {
                controller.run_search(epoch, query).await;
            }
        });
        true
    }

    async fn run_search(&self, epoch: u64, query: String) {
        {
            let mut state = self.state.lock().await;
            if state.epoch != epoch {
                debug!(query = %query, "search context changed before sending");
                return;
            }
            state.searching = Some(epoch);
        }

        let result = self.api.search(&query).await;

        let mut state = self.state.lock().await;
        if state.searching == Some(epoch) {
            state.searching = None;
        }
        if state.epoch != epoch {
            debug!(query = %query, "dropping stale search response");
            return;
        }
        state.has_more = false;
        match result {
            Ok(page) => {
                info!(query = %query, count = page.posts.len(), "applied search results");
                self.store.replace_all(page.posts);
            }
            Err(err) => warn!(query = %query, error = %err, "failed to search posts"),
        }
    }

    /// Waits for a scheduled search to fire and finish.
    pub async fn wait_for_pending_search(&self) {
        self.search_debounce.flush().await;
    }

    pub fn has_pending_search(&self) -> bool {
        self.search_debounce.is_pending()
    }

    /// Feeds a new value of the search box into the controller.
    pub async fn on_search_text_changed(&self, text: impl Into<String>) {
        let text = text.into();
        let (epoch, previous) = {
            let mut state = self.state.lock().await;
            if state.search_text == text {
                return;
            }
            state.epoch += 1;
            state.searching = None;
            let previous = std::mem::replace(&mut state.search_text, text.clone());
            (state.epoch, previous)
        };

        self.search_debounce.cancel();
        if !text.is_empty() {
            self.schedule_search(epoch, text);
        } else if !previous.is_empty() {
            self.on_search_text_cleared().await;
        }
    }

    pub async fn on_search_text_cleared(&self) {
        debug!("search cleared, reloading list");
        self.reset_and_fetch().await;
    }

    /// Records the selected sort order. While search text is set the order
    /// is only remembered; it takes effect when the search is cleared.
    pub async fn on_sort_order_changed(&self, order: SortOrder) -> SortChange {
        {
            let mut state = self.state.lock().await;
            if state.sort_order == order {
                return SortChange::Unchanged;
            }
            state.sort_order = order;
            if !state.search_text.is_empty() {
                debug!(sort = %order, "search active, deferring sort reload");
                return SortChange::Deferred;
            }
        }
        self.reset_and_fetch().await;
        SortChange::Reloaded
    }

    /// The trailing sentinel of the list scrolled into view.
    pub async fn on_scroll_sentinel_visible(&self) -> bool {
        self.fetch_next_page().await
    }
}

#[cfg(test)]
#[path = "tests/sync_tests.rs"]
mod tests;
