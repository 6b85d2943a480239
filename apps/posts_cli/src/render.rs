//! Plain-text views of the posts list.

use std::fmt::Write as _;

use client_core::SyncSnapshot;
use shared::domain::Post;

const BODY_PREVIEW_CHARS: usize = 140;

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn preview(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= BODY_PREVIEW_CHARS {
        return flat;
    }
    let mut clipped: String = flat.chars().take(BODY_PREVIEW_CHARS).collect();
    clipped.push_str("...");
    clipped
}

/// One post card. Posts without an id are not shown.
pub fn render_post(post: &Post) -> Option<String> {
    let id = post.id?;
    let mut out = format!("#{id} {}\n    {}\n", post.title, preview(&post.body));
    if !post.tags.is_empty() {
        let tags = post
            .tags
            .iter()
            .map(|tag| format!("[{}]", capitalize_first(tag)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "    {tags}");
    }
    let _ = write!(out, "    {} views", post.views.unwrap_or(0));
    if let Some(reactions) = post.reactions {
        let _ = write!(
            out,
            "  +{} / -{}",
            reactions.likes.unwrap_or(0),
            reactions.dislikes.unwrap_or(0)
        );
    }
    out.push('\n');
    Some(out)
}

pub fn render_list(posts: &[Post], snapshot: &SyncSnapshot) -> String {
    let mut out = String::from("Posts");
    if !snapshot.search_text.is_empty() {
        let _ = write!(out, " matching \"{}\"", snapshot.search_text);
    } else if let Some(order) = snapshot.sort_order.as_query() {
        let _ = write!(out, " sorted by title {order}");
    }
    out.push('\n');

    if snapshot.is_searching {
        out.push_str("Searching...\n");
        return out;
    }

    let cards: Vec<String> = posts.iter().filter_map(render_post).collect();
    if cards.is_empty() {
        out.push_str("(no posts)\n");
    }
    for card in cards {
        out.push_str(&card);
    }
    if snapshot.shows_sentinel() {
        out.push_str("Loading more posts... (:more)\n");
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
