use pantry_domain::id::{RecipeId, UserId};
use pantry_recipes::error::RecipesServiceError;
use pantry_recipes::usecase::relation::{
    EdgeOp, ToggleCartUseCase, ToggleFavoriteUseCase, ToggleSubscriptionUseCase,
};
use uuid::Uuid;

use crate::helpers::{InMemoryStore, seed_recipe};

fn favorites(store: &InMemoryStore) -> ToggleFavoriteUseCase<InMemoryStore, InMemoryStore> {
    ToggleFavoriteUseCase::new(store.clone(), store.clone())
}

fn cart(store: &InMemoryStore) -> ToggleCartUseCase<InMemoryStore, InMemoryStore> {
    ToggleCartUseCase::new(store.clone(), store.clone())
}

fn subscriptions(
    store: &InMemoryStore,
) -> ToggleSubscriptionUseCase<InMemoryStore, InMemoryStore> {
    ToggleSubscriptionUseCase {
        edges: store.clone(),
        users: store.clone(),
    }
}

// ── Favorites ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_cycle_favorite_through_add_and_remove() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let reader = store.add_user("reader");
    let salt = store.add_ingredient("Salt", "g");
    let recipe = seed_recipe(&store, &author, "Soup", &[&dinner], &[(&salt, 5)]).await;
    let usecase = favorites(&store);

    let summary = usecase
        .execute(reader.id, recipe.id, EdgeOp::Add)
        .await
        .unwrap();
    assert_eq!(summary.id, recipe.id);
    assert_eq!(summary.name, "Soup");

    let again = usecase.execute(reader.id, recipe.id, EdgeOp::Add).await;
    assert!(
        matches!(again, Err(RecipesServiceError::FavoriteAlreadyExists)),
        "expected FavoriteAlreadyExists, got {again:?}"
    );

    usecase
        .execute(reader.id, recipe.id, EdgeOp::Remove)
        .await
        .unwrap();

    let gone = usecase.execute(reader.id, recipe.id, EdgeOp::Remove).await;
    assert!(
        matches!(gone, Err(RecipesServiceError::FavoriteNotFound)),
        "expected FavoriteNotFound, got {gone:?}"
    );
}

#[tokio::test]
async fn should_reject_favorite_of_missing_recipe() {
    let store = InMemoryStore::new();
    let reader = store.add_user("reader");

    let result = favorites(&store)
        .execute(reader.id, RecipeId(404), EdgeOp::Add)
        .await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

#[tokio::test]
async fn should_allow_favoriting_own_recipe() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let egg = store.add_ingredient("Egg", "pcs");
    let recipe = seed_recipe(&store, &author, "Omelette", &[&dinner], &[(&egg, 2)]).await;

    favorites(&store)
        .execute(author.id, recipe.id, EdgeOp::Add)
        .await
        .unwrap();
}

// ── Shopping cart ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_cycle_cart_entry_through_add_and_remove() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let reader = store.add_user("reader");
    let salt = store.add_ingredient("Salt", "g");
    let recipe = seed_recipe(&store, &author, "Soup", &[&dinner], &[(&salt, 5)]).await;
    let usecase = cart(&store);

    usecase
        .execute(reader.id, recipe.id, EdgeOp::Add)
        .await
        .unwrap();
    let again = usecase.execute(reader.id, recipe.id, EdgeOp::Add).await;
    assert!(matches!(
        again,
        Err(RecipesServiceError::CartEntryAlreadyExists)
    ));

    usecase
        .execute(reader.id, recipe.id, EdgeOp::Remove)
        .await
        .unwrap();
    let gone = usecase.execute(reader.id, recipe.id, EdgeOp::Remove).await;
    assert!(matches!(gone, Err(RecipesServiceError::CartEntryNotFound)));
}

#[tokio::test]
async fn should_keep_favorite_and_cart_independent() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let reader = store.add_user("reader");
    let salt = store.add_ingredient("Salt", "g");
    let recipe = seed_recipe(&store, &author, "Soup", &[&dinner], &[(&salt, 5)]).await;

    favorites(&store)
        .execute(reader.id, recipe.id, EdgeOp::Add)
        .await
        .unwrap();
    cart(&store)
        .execute(reader.id, recipe.id, EdgeOp::Add)
        .await
        .unwrap();
    favorites(&store)
        .execute(reader.id, recipe.id, EdgeOp::Remove)
        .await
        .unwrap();

    let still_in_cart = cart(&store).execute(reader.id, recipe.id, EdgeOp::Add).await;
    assert!(matches!(
        still_in_cart,
        Err(RecipesServiceError::CartEntryAlreadyExists)
    ));
}

// ── Subscriptions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_cycle_subscription_through_add_and_remove() {
    let store = InMemoryStore::new();
    let author = store.add_user("author");
    let reader = store.add_user("reader");
    let usecase = subscriptions(&store);

    let followed = usecase
        .execute(reader.id, author.id, EdgeOp::Add)
        .await
        .unwrap();
    assert_eq!(followed.id, author.id);

    let again = usecase.execute(reader.id, author.id, EdgeOp::Add).await;
    assert!(matches!(
        again,
        Err(RecipesServiceError::SubscriptionAlreadyExists)
    ));

    usecase
        .execute(reader.id, author.id, EdgeOp::Remove)
        .await
        .unwrap();
    let gone = usecase.execute(reader.id, author.id, EdgeOp::Remove).await;
    assert!(matches!(
        gone,
        Err(RecipesServiceError::SubscriptionNotFound)
    ));
}

#[tokio::test]
async fn should_always_reject_self_subscription() {
    let store = InMemoryStore::new();
    let user = store.add_user("loner");
    let usecase = subscriptions(&store);

    for _ in 0..2 {
        let result = usecase.execute(user.id, user.id, EdgeOp::Add).await;
        assert!(matches!(result, Err(RecipesServiceError::SelfSubscription)));
    }
}

#[tokio::test]
async fn should_reject_self_subscription_for_unknown_user_before_lookup() {
    let store = InMemoryStore::new();
    let ghost = UserId(Uuid::now_v7());

    let result = subscriptions(&store)
        .execute(ghost, ghost, EdgeOp::Add)
        .await;
    assert!(matches!(result, Err(RecipesServiceError::SelfSubscription)));
    assert_eq!(store.accesses(), 0);
}

#[tokio::test]
async fn should_reject_subscription_to_unknown_author() {
    let store = InMemoryStore::new();
    let reader = store.add_user("reader");

    let result = subscriptions(&store)
        .execute(reader.id, UserId(Uuid::now_v7()), EdgeOp::Add)
        .await;
    assert!(matches!(result, Err(RecipesServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_allow_mutual_subscriptions() {
    let store = InMemoryStore::new();
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    let usecase = subscriptions(&store);

    usecase.execute(alice.id, bob.id, EdgeOp::Add).await.unwrap();
    usecase.execute(bob.id, alice.id, EdgeOp::Add).await.unwrap();
}
