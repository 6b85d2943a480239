use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use shared::{
    domain::{Post, PostId},
    error::ApiError,
    protocol::{PageRequest, PostDraft, PostsPage, SORT_FIELD},
};
use tracing::debug;

pub mod debounce;
pub mod error;
pub mod forms;
pub mod store;
pub mod sync;

pub use debounce::Debouncer;
pub use error::SaveError;
pub use forms::{PostEditor, PostForm, PostFormState};
pub use store::PostsStore;
pub use sync::{SortChange, SyncController, SyncSnapshot};

pub const DEFAULT_API_URL: &str = "https://dummyjson.com";

/// Remote posts resource, as seen by the controller and the forms.
#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<PostsPage, ApiError>;
    async fn search(&self, query: &str) -> Result<PostsPage, ApiError>;
    async fn create(&self, draft: &PostDraft) -> Result<Post, ApiError>;
    async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Post, ApiError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageQuery {
    limit: usize,
    skip: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_by: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<&'static str>,
}

impl From<PageRequest> for PageQuery {
    fn from(request: PageRequest) -> Self {
        let order = request.sort.as_query();
        Self {
            limit: request.limit(),
            skip: request.offset(),
            sort_by: order.map(|_| SORT_FIELD),
            order,
        }
    }
}

fn api_error(err: reqwest::Error) -> ApiError {
    if let Some(status) = err.status() {
        ApiError::Status {
            status: status.as_u16(),
        }
    } else if err.is_decode() {
        ApiError::decode(err.to_string())
    } else {
        ApiError::transport(err.to_string())
    }
}

pub struct HttpPostsApi {
    http: Client,
    base_url: String,
}

impl HttpPostsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(api_error)?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn fetch_page(&self, request: PageRequest) -> Result<PostsPage, ApiError> {
        debug!(page = request.page, sort = %request.sort, "GET /posts");
        self.http
            .get(format!("{}/posts", self.base_url))
            .query(&PageQuery::from(request))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(api_error)?
            .json()
            .await
            .map_err(api_error)
    }

    async fn search(&self, query: &str) -> Result<PostsPage, ApiError> {
        debug!(query = %query, "GET /posts/search");
        self.http
            .get(format!("{}/posts/search", self.base_url))
            .query(&[("q", query)])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(api_error)?
            .json()
            .await
            .map_err(api_error)
    }

    async fn create(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        self.http
            .post(format!("{}/posts/add", self.base_url))
            .json(draft)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(api_error)?
            .json()
            .await
            .map_err(api_error)
    }

    async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Post, ApiError> {
        self.http
            .put(format!("{}/posts/{}", self.base_url, id.0))
            .json(draft)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(api_error)?
            .json()
            .await
            .map_err(api_error)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
