use std::sync::Arc;

use anyhow::Context;
use client_core::{HttpPostsApi, PostEditor, PostsApi, PostsStore, SyncController};
use shared::domain::UserId;

use crate::config::{normalize_api_url, Settings};

/// Everything one mounted posts view needs: a single store shared by the
/// controller, the forms, and the renderer.
pub struct Session {
    pub store: PostsStore,
    pub controller: Arc<SyncController>,
    pub editor: PostEditor,
}

impl Session {
    pub fn new(api: Arc<dyn PostsApi>, default_user_id: UserId) -> Self {
        let store = PostsStore::new();
        Self {
            controller: SyncController::new(Arc::clone(&api), store.clone()),
            editor: PostEditor::new(api, store.clone(), default_user_id),
            store,
        }
    }

    pub fn connect(settings: &Settings) -> anyhow::Result<Self> {
        let base_url = normalize_api_url(&settings.api_base_url)?;
        let api = HttpPostsApi::with_timeout(base_url, settings.request_timeout())
            .context("failed to build http client")?;
        Ok(Self::new(Arc::new(api), UserId(settings.default_user_id)))
    }
}
