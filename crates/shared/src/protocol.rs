use serde::{Deserialize, Serialize};

use crate::domain::{Post, SortOrder, UserId};

/// Items per page; fixed by the remote API contract.
pub const PAGE_SIZE: usize = 20;

/// Field the remote API sorts on when a sort order is selected.
pub const SORT_FIELD: &str = "title";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page counter; the wire offset is `page * PAGE_SIZE`.
    pub page: u32,
    pub sort: SortOrder,
}

impl PageRequest {
    pub fn new(page: u32, sort: SortOrder) -> Self {
        Self { page, sort }
    }

    pub fn limit(&self) -> usize {
        PAGE_SIZE
    }

    pub fn offset(&self) -> usize {
        self.page as usize * PAGE_SIZE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPage {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl PostsPage {
    pub fn from_posts(posts: Vec<Post>) -> Self {
        Self {
            posts,
            ..Self::default()
        }
    }
}

/// Body of `POST /posts/add` and `PUT /posts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
