use super::*;
use shared::domain::{PostId, Reactions, SortOrder};

fn snapshot() -> SyncSnapshot {
    SyncSnapshot {
        skip: 1,
        has_more: true,
        search_text: String::new(),
        sort_order: SortOrder::None,
        is_loading: false,
        is_searching: false,
        initialized: true,
    }
}

fn sample() -> Post {
    Post {
        id: Some(PostId(3)),
        title: "His mother had always taught him".into(),
        body: "short body".into(),
        tags: vec!["history".into(), "american".into()],
        user_id: None,
        views: None,
        reactions: Some(Reactions {
            likes: Some(192),
            dislikes: None,
        }),
    }
}

#[test]
fn capitalizes_first_letter_only() {
    assert_eq!(capitalize_first("history"), "History");
    assert_eq!(capitalize_first("éclair tag"), "Éclair tag");
    assert_eq!(capitalize_first(""), "");
}

#[test]
fn card_shows_tags_and_zero_defaults() {
    let card = render_post(&sample()).expect("card");
    assert!(card.starts_with("#3 His mother had always taught him\n"));
    assert!(card.contains("[History] [American]"));
    assert!(card.contains("0 views"));
    assert!(card.contains("+192 / -0"));
}

#[test]
fn unsaved_posts_are_hidden() {
    let mut unsaved = sample();
    unsaved.id = None;
    assert!(render_post(&unsaved).is_none());

    let list = render_list(&[unsaved], &snapshot());
    assert!(list.contains("(no posts)"));
}

#[test]
fn long_bodies_are_clipped() {
    let mut post = sample();
    post.body = "word ".repeat(100);
    let card = render_post(&post).expect("card");
    assert!(card.contains("..."));
}

#[test]
fn sentinel_hidden_during_search() {
    let list = render_list(&[sample()], &snapshot());
    assert!(list.contains("Loading more posts..."));

    let mut searching = snapshot();
    searching.search_text = "go".into();
    let list = render_list(&[sample()], &searching);
    assert!(list.starts_with("Posts matching \"go\""));
    assert!(!list.contains("Loading more posts..."));

    searching.is_searching = true;
    let list = render_list(&[sample()], &searching);
    assert!(list.contains("Searching..."));
    assert!(!list.contains("#3"));
}
