#![cfg(feature = "auth")]

mod common;

use std::collections::HashSet;

use cookbook_core::DomainError;
use cookbook_core::domain::{Post, User};
use cookbook_core::ports::BaseRepository;
use cookbook_core::services::RELATED_LIMIT;
use uuid::Uuid;

use common::{Harness, new_post};

#[tokio::test]
async fn test_category_posts_after_rename() {
    let h = Harness::new();
    let alice = h.sign_up("alice@example.com").await;
    let soups = h.category(&alice.token, "Soups").await;
    let other = h.category(&alice.token, "Salads").await;

    let minestrone = h.post(&alice.token, soups.id, "Minestrone").await;
    let borscht = h.post(&alice.token, soups.id, "Borscht").await;
    h.post(&alice.token, other.id, "Caesar").await;

    let renamed = h
        .mutations
        .update_category(Some(&alice.token), soups.id, "Soups & stews".into())
        .await
        .unwrap();
    assert_eq!(renamed.name, "Soups & stews");

    let posts = h.relations.category_posts(&renamed).await.unwrap();
    let ids: HashSet<Uuid> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, HashSet::from([minestrone.id, borscht.id]));

    let author = h.relations.category_author(&renamed).await.unwrap();
    assert_eq!(author.id, alice.user.id);
}

#[tokio::test]
async fn test_post_related_excludes_itself_and_is_capped() {
    let h = Harness::new();
    let alice = h.sign_up("alice@example.com").await;
    let breads = h.category(&alice.token, "Breads").await;

    let focaccia = h.post(&alice.token, breads.id, "Focaccia").await;
    for title in ["Baguette", "Ciabatta", "Challah", "Pita"] {
        h.post(&alice.token, breads.id, title).await;
    }

    let related = h.relations.post_related(&focaccia).await.unwrap();

    assert_eq!(related.len(), RELATED_LIMIT);
    assert!(related.iter().all(|p| p.id != focaccia.id));
    assert!(related.iter().all(|p| p.category_id == breads.id));
}

#[tokio::test]
async fn test_post_related_empty_when_alone() {
    let h = Harness::new();
    let alice = h.sign_up("alice@example.com").await;
    let breads = h.category(&alice.token, "Breads").await;
    let focaccia = h.post(&alice.token, breads.id, "Focaccia").await;

    assert!(h.relations.post_related(&focaccia).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resolve_post() {
    let h = Harness::new();
    let alice = h.sign_up("alice@example.com").await;
    let breads = h.category(&alice.token, "Breads").await;
    let focaccia = h.post(&alice.token, breads.id, "Focaccia").await;
    let pita = h.post(&alice.token, breads.id, "Pita").await;

    let view = h.relations.resolve_post(focaccia.id).await.unwrap();

    assert_eq!(view.post, focaccia);
    assert_eq!(view.author.unwrap().email, "alice@example.com");
    assert_eq!(view.category.unwrap().id, breads.id);
    assert_eq!(view.related.unwrap(), vec![pita]);
}

#[tokio::test]
async fn test_dangling_author_fails_only_that_field() {
    let h = Harness::new();
    let alice = h.sign_up("alice@example.com").await;
    let breads = h.category(&alice.token, "Breads").await;

    let ghost_id = Uuid::new_v4();
    let orphan = h
        .posts
        .create(Post::new(ghost_id, new_post(breads.id, "Ghost loaf")))
        .await
        .unwrap();

    let view = h.relations.resolve_post(orphan.id).await.unwrap();

    assert!(matches!(
        view.author,
        Err(DomainError::NotFound { entity_type: "User", id }) if id == ghost_id
    ));
    assert_eq!(view.category.unwrap().id, breads.id);
    assert!(view.related.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleted_category_leaves_posts_resolvable() {
    let h = Harness::new();
    let alice = h.sign_up("alice@example.com").await;
    let breads = h.category(&alice.token, "Breads").await;
    let focaccia = h.post(&alice.token, breads.id, "Focaccia").await;

    h.mutations
        .delete_category(Some(&alice.token), breads.id)
        .await
        .unwrap();

    let view = h.relations.resolve_post(focaccia.id).await.unwrap();
    assert!(matches!(view.category, Err(DomainError::NotFound { .. })));
    assert!(view.author.is_ok());

    let missing = h.relations.resolve_category(breads.id).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_resolve_category_author_is_sanitized() {
    let h = Harness::new();
    let alice = h.sign_up("alice@example.com").await;
    let breads = h.category(&alice.token, "Breads").await;

    let view = h.relations.resolve_category(breads.id).await.unwrap();
    let author = serde_json::to_value(view.author.unwrap()).unwrap();

    let stored: User = h.users.find_by_id(alice.user.id).await.unwrap().unwrap();
    assert!(!author.to_string().contains(&stored.password_hash));
    assert!(author.get("password_hash").is_none());
    assert!(view.posts.unwrap().is_empty());
}
