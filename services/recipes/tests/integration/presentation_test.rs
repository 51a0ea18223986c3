use pantry_domain::pagination::PageRequest;
use pantry_recipes::usecase::presentation::BuildAuthorCardsUseCase;
use pantry_recipes::usecase::relation::{
    EdgeOp, ToggleCartUseCase, ToggleFavoriteUseCase, ToggleSubscriptionUseCase,
};
use pantry_recipes::usecase::user::ListSubscriptionsUseCase;

use crate::helpers::{InMemoryStore, seed_recipe, viewer_loader};

#[tokio::test]
async fn should_present_anonymous_viewer_without_lookups() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let salt = store.add_ingredient("Salt", "g");
    let recipe = seed_recipe(&store, &author, "Soup", &[&dinner], &[(&salt, 5)]).await;
    let before = store.accesses();

    let ctx = viewer_loader(&store).execute(None).await.unwrap();
    let view = ctx.present_recipe(recipe);

    assert_eq!(store.edge_lookups(), 0);
    assert_eq!(store.accesses(), before);
    assert!(!view.is_favorited);
    assert!(!view.is_in_shopping_cart);
    assert!(!view.author.is_subscribed);
}

#[tokio::test]
async fn should_reflect_mutations_made_before_loading() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let reader = store.add_user("reader");
    let salt = store.add_ingredient("Salt", "g");
    let recipe = seed_recipe(&store, &author, "Soup", &[&dinner], &[(&salt, 5)]).await;

    ToggleFavoriteUseCase::new(store.clone(), store.clone())
        .execute(reader.id, recipe.id, EdgeOp::Add)
        .await
        .unwrap();
    ToggleCartUseCase::new(store.clone(), store.clone())
        .execute(reader.id, recipe.id, EdgeOp::Add)
        .await
        .unwrap();
    ToggleSubscriptionUseCase {
        edges: store.clone(),
        users: store.clone(),
    }
    .execute(reader.id, author.id, EdgeOp::Add)
    .await
    .unwrap();

    let ctx = viewer_loader(&store).execute(Some(reader.id)).await.unwrap();
    assert_eq!(store.edge_lookups(), 3);

    let view = ctx.present_recipe(recipe.clone());
    assert!(view.is_favorited);
    assert!(view.is_in_shopping_cart);
    assert!(view.author.is_subscribed);

    // The author sees their own recipe without any flags.
    let own = viewer_loader(&store)
        .execute(Some(author.id))
        .await
        .unwrap()
        .present_recipe(recipe);
    assert!(!own.is_favorited);
    assert!(!own.author.is_subscribed);
}

#[tokio::test]
async fn should_build_author_cards_with_recipe_limit() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let quiet = store.add_user("quiet");
    let reader = store.add_user("reader");
    let salt = store.add_ingredient("Salt", "g");
    seed_recipe(&store, &author, "First", &[&dinner], &[(&salt, 1)]).await;
    let second = seed_recipe(&store, &author, "Second", &[&dinner], &[(&salt, 2)]).await;
    let third = seed_recipe(&store, &author, "Third", &[&dinner], &[(&salt, 3)]).await;

    let subscribe = ToggleSubscriptionUseCase {
        edges: store.clone(),
        users: store.clone(),
    };
    subscribe
        .execute(reader.id, author.id, EdgeOp::Add)
        .await
        .unwrap();
    subscribe
        .execute(reader.id, quiet.id, EdgeOp::Add)
        .await
        .unwrap();

    let followed = ListSubscriptionsUseCase { repo: store.clone() }
        .execute(reader.id, PageRequest::default())
        .await
        .unwrap();
    let ctx = viewer_loader(&store).execute(Some(reader.id)).await.unwrap();
    let cards = BuildAuthorCardsUseCase {
        recipes: store.clone(),
    }
    .execute(followed, &ctx, Some(2))
    .await
    .unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].author.user.id, quiet.id);
    assert!(cards[0].recipes.is_empty());
    assert_eq!(cards[0].recipes_count, 0);

    let card = &cards[1];
    assert!(card.author.is_subscribed);
    assert_eq!(card.recipes_count, 3);
    let ids: Vec<_> = card.recipes.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![third.id, second.id]);
}
