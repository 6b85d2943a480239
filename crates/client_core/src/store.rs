//! Session-lifetime holder of the displayed post collection.

use std::sync::Arc;

use shared::domain::{Post, PostId};
use tokio::sync::watch;

/// Shared handle to the displayed posts.
///
/// Clones observe the same collection. The controller and the forms are the
/// only writers; views call [`PostsStore::subscribe`] and re-render whenever
/// the receiver reports a change.
#[derive(Clone)]
pub struct PostsStore {
    posts: Arc<watch::Sender<Vec<Post>>>,
}

impl Default for PostsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostsStore {
    pub fn new() -> Self {
        let (posts, _) = watch::channel(Vec::new());
        Self {
            posts: Arc::new(posts),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Post>> {
        self.posts.subscribe()
    }

    pub fn snapshot(&self) -> Vec<Post> {
        self.posts.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.posts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.borrow().is_empty()
    }

    pub fn find(&self, id: PostId) -> Option<Post> {
        self.posts
            .borrow()
            .iter()
            .find(|post| post.id == Some(id))
            .cloned()
    }

    pub fn replace_all(&self, posts: Vec<Post>) {
        self.posts.send_replace(posts);
    }

    pub fn append(&self, posts: Vec<Post>) {
        self.posts.send_modify(|current| current.extend(posts));
    }

    pub fn prepend(&self, post: Post) {
        self.posts.send_modify(|current| current.insert(0, post));
    }

    /// Merges `updated` into every stored post with the same id. Returns
    /// whether anything matched; an update without an id matches nothing.
    pub fn replace_by_id(&self, updated: Post) -> bool {
        let Some(id) = updated.id else {
            return false;
        };
        self.posts.send_if_modified(|current| {
            let mut matched = false;
            for post in current.iter_mut().filter(|post| post.id == Some(id)) {
                post.merge_from(updated.clone());
                matched = true;
            }
            matched
        })
    }

    pub fn clear(&self) {
        self.posts.send_replace(Vec::new());
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
