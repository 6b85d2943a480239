//! Create and edit submissions for a single post.

use std::sync::Arc;

use shared::{
    domain::{Post, UserId},
    protocol::PostDraft,
};
use tracing::{debug, info, warn};

use crate::{
    error::{SaveError, SaveKind},
    store::PostsStore,
    PostsApi,
};

/// Raw values of the post form. `tags` is the comma separated text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub body: String,
    pub tags: String,
}

impl PostForm {
    pub fn new(title: impl Into<String>, body: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags: tags.into(),
        }
    }

    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            body: post.body.clone(),
            tags: post.tags.join(", "),
        }
    }

    pub fn parsed_tags(&self) -> Vec<String> {
        parse_tags(&self.tags)
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.title.trim().is_empty() {
            return Err(SaveError::MissingTitle);
        }
        if self.body.trim().is_empty() {
            return Err(SaveError::MissingBody);
        }
        Ok(())
    }

    pub fn to_draft(&self, user_id: Option<UserId>) -> PostDraft {
        PostDraft {
            title: self.title.clone(),
            body: self.body.clone(),
            tags: self.parsed_tags(),
            user_id,
        }
    }
}

/// Splits comma separated tag text, trimming each entry and dropping empty
/// ones.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sends create/edit submissions and folds the results into the store.
pub struct PostEditor {
    api: Arc<dyn PostsApi>,
    store: PostsStore,
    default_user_id: UserId,
}

impl PostEditor {
    pub fn new(api: Arc<dyn PostsApi>, store: PostsStore, default_user_id: UserId) -> Self {
        Self {
            api,
            store,
            default_user_id,
        }
    }

    /// Creates a post and puts it at the top of the store.
    pub async fn create(&self, form: &PostForm) -> Result<Post, SaveError> {
        form.validate()?;
        let draft = form.to_draft(Some(self.default_user_id));
        let created = self
            .api
            .create(&draft)
            .await
            .map_err(|err| SaveError::from_api(SaveKind::Add, err))?;
        info!(id = ?created.id, "created post");
        self.store.prepend(created.clone());
        Ok(created)
    }

    /// Saves edits to an existing post and merges the response into the
    /// stored copy with the same id.
    pub async fn update(&self, post: &Post, form: &PostForm) -> Result<Post, SaveError> {
        let id = post.id.ok_or(SaveError::MissingId)?;
        form.validate()?;
        let draft = form.to_draft(post.user_id);
        let updated = self
            .api
            .update(id, &draft)
            .await
            .map_err(|err| SaveError::from_api(SaveKind::Update, err))?;
        if !self.store.replace_by_id(updated.clone()) {
            debug!(%id, "updated post is not displayed");
        }
        info!(%id, "updated post");
        Ok(updated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Post),
}

/// State of one open form: its values, whether a submit is running, and the
/// message of the last failed submit.
#[derive(Debug, Clone)]
pub struct PostFormState {
    pub mode: FormMode,
    pub values: PostForm,
    pub open: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl PostFormState {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            values: PostForm::default(),
            open: true,
            loading: false,
            error: None,
        }
    }

    pub fn edit(post: &Post) -> Self {
        Self {
            mode: FormMode::Edit(post.clone()),
            values: PostForm::from_post(post),
            open: true,
            loading: false,
            error: None,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Post",
            FormMode::Edit(_) => "Save Changes",
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Submits the current values. On failure the form stays open with
    /// `error` set so it can be corrected and submitted again.
    pub async fn submit(&mut self, editor: &PostEditor) -> Option<Post> {
        self.loading = true;
        self.error = None;
        let result = match &self.mode {
            FormMode::Create => editor.create(&self.values).await,
            FormMode::Edit(post) => editor.update(post, &self.values).await,
        };
        self.loading = false;

        match result {
            Ok(saved) => {
                if self.mode == FormMode::Create {
                    self.values = PostForm::default();
                }
                self.open = false;
                Some(saved)
            }
            Err(err) => {
                warn!(error = %err, "post submission failed");
                self.error = Some(err.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
