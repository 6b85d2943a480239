use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use shared::{
    domain::{Post, PostId, UserId},
    error::ApiError,
    protocol::{PageRequest, PostDraft, PostsPage},
};
use tokio::sync::{oneshot, Mutex};

use crate::PostsApi;

/// In-memory `PostsApi` that answers from queued responses and records every
/// call. An empty queue answers with an empty page.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    pages: Mutex<VecDeque<Result<PostsPage, ApiError>>>,
    searches: Mutex<VecDeque<Result<PostsPage, ApiError>>>,
    saves: Mutex<VecDeque<Result<Post, ApiError>>>,
    page_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    search_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    pub page_requests: Mutex<Vec<PageRequest>>,
    pub search_queries: Mutex<Vec<String>>,
    pub created: Mutex<Vec<PostDraft>>,
    pub updated: Mutex<Vec<(PostId, PostDraft)>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn push_page(&self, posts: Vec<Post>) {
        self.pages
            .lock()
            .await
            .push_back(Ok(PostsPage::from_posts(posts)));
    }

    pub async fn push_page_error(&self, err: ApiError) {
        self.pages.lock().await.push_back(Err(err));
    }

    pub async fn push_search(&self, posts: Vec<Post>) {
        self.searches
            .lock()
            .await
            .push_back(Ok(PostsPage::from_posts(posts)));
    }

    pub async fn push_search_error(&self, err: ApiError) {
        self.searches.lock().await.push_back(Err(err));
    }

    pub async fn push_save(&self, result: Result<Post, ApiError>) {
        self.saves.lock().await.push_back(result);
    }

    /// Makes the next page request wait until the returned sender fires.
    pub async fn hold_next_page(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.page_gates.lock().await.push_back(rx);
        tx
    }

    /// Makes the next search request wait until the returned sender fires.
    pub async fn hold_next_search(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.search_gates.lock().await.push_back(rx);
        tx
    }

    pub async fn page_request_count(&self) -> usize {
        self.page_requests.lock().await.len()
    }
}

#[async_trait]
impl PostsApi for ScriptedApi {
    async fn fetch_page(&self, request: PageRequest) -> Result<PostsPage, ApiError> {
        self.page_requests.lock().await.push(request);
        let response = self
            .pages
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(PostsPage::default()));
        let gate = self.page_gates.lock().await.pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        response
    }

    async fn search(&self, query: &str) -> Result<PostsPage, ApiError> {
        self.search_queries.lock().await.push(query.to_string());
        let response = self
            .searches
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(PostsPage::default()));
        let gate = self.search_gates.lock().await.pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        response
    }

    async fn create(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        self.created.lock().await.push(draft.clone());
        self.saves
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Status { status: 500 }))
    }

    async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Post, ApiError> {
        self.updated.lock().await.push((id, draft.clone()));
        self.saves
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Status { status: 500 }))
    }
}

pub(crate) fn post(id: i64) -> Post {
    Post {
        id: Some(PostId(id)),
        title: format!("post {id}"),
        body: format!("body of post {id}"),
        tags: vec!["history".to_string()],
        user_id: Some(UserId(id % 7 + 1)),
        views: Some(id as u64 * 10),
        reactions: None,
    }
}

/// Posts with ids `first..first + count`.
pub(crate) fn posts(first: i64, count: usize) -> Vec<Post> {
    (first..first + count as i64).map(post).collect()
}
