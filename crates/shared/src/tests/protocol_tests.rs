use super::*;
use crate::domain::UserId;

#[test]
fn page_request_offsets_by_whole_pages() {
    let request = PageRequest::new(3, SortOrder::None);
    assert_eq!(request.limit(), 20);
    assert_eq!(request.offset(), 60);
}

#[test]
fn search_response_without_posts_key_is_empty() {
    let page: PostsPage = serde_json::from_str(r#"{ "total": 0 }"#).expect("decode");
    assert!(page.posts.is_empty());
    assert_eq!(page.total, Some(0));
}

#[test]
fn draft_serializes_user_id_in_camel_case() {
    let draft = PostDraft {
        title: "T".into(),
        body: "B".into(),
        tags: vec!["a".into(), "b".into()],
        user_id: Some(UserId(1)),
    };

    let value = serde_json::to_value(&draft).expect("encode");
    assert_eq!(
        value,
        serde_json::json!({ "title": "T", "body": "B", "tags": ["a", "b"], "userId": 1 })
    );
}

#[test]
fn draft_without_user_omits_the_field() {
    let draft = PostDraft {
        title: "T".into(),
        body: "B".into(),
        tags: Vec::new(),
        user_id: None,
    };

    let value = serde_json::to_value(&draft).expect("encode");
    assert!(value.get("userId").is_none());
}
