use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(PostId);
id_newtype!(UserId);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dislikes: Option<u64>,
}

/// A post as exchanged with the remote API.
///
/// `id` is absent for posts that were never saved. The server is the
/// authority on identity; nothing here enforces uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
}

impl Post {
    /// Overlays an update response on top of the stored post.
    ///
    /// Text fields and tags always come from `updated`; optional fields only
    /// replace the stored value when the response carries them.
    pub fn merge_from(&mut self, updated: Post) {
        self.title = updated.title;
        self.body = updated.body;
        self.tags = updated.tags;
        if updated.id.is_some() {
            self.id = updated.id;
        }
        if updated.user_id.is_some() {
            self.user_id = updated.user_id;
        }
        if updated.views.is_some() {
            self.views = updated.views;
        }
        if updated.reactions.is_some() {
            self.reactions = updated.reactions;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    /// Value of the `order` query parameter, if this order sorts at all.
    pub fn as_query(self) -> Option<&'static str> {
        match self {
            SortOrder::None => None,
            SortOrder::Ascending => Some("asc"),
            SortOrder::Descending => Some("desc"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query().unwrap_or("none"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order '{0}', expected one of: asc, desc, none")]
pub struct ParseSortOrderError(pub String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(SortOrder::None),
            "asc" | "a-z" => Ok(SortOrder::Ascending),
            "desc" | "z-a" => Ok(SortOrder::Descending),
            other => Err(ParseSortOrderError(other.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
