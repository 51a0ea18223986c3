use pantry_domain::id::{RecipeId, UserId};
use pantry_recipes::domain::types::ShoppingListItem;
use pantry_recipes::infra::document::PlainTextRenderer;
use pantry_recipes::usecase::relation::{EdgeOp, ToggleCartUseCase};
use pantry_recipes::usecase::shopping_list::{
    AggregateShoppingListUseCase, DownloadShoppingListUseCase,
};

use crate::helpers::{InMemoryStore, delete_recipe_usecase, seed_recipe};

fn item(index: usize, name: &str, unit: &str, total: u64) -> ShoppingListItem {
    ShoppingListItem {
        index,
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
        total_amount: total,
    }
}

async fn put_in_cart(store: &InMemoryStore, user: UserId, recipe: RecipeId) {
    ToggleCartUseCase::new(store.clone(), store.clone())
        .execute(user, recipe, EdgeOp::Add)
        .await
        .unwrap();
}

#[tokio::test]
async fn should_sum_amounts_in_first_seen_order() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let shopper = store.add_user("shopper");
    let salt = store.add_ingredient("Salt", "g");
    let egg = store.add_ingredient("Egg", "pcs");
    let first = seed_recipe(
        &store,
        &author,
        "Omelette",
        &[&dinner],
        &[(&salt, 5), (&egg, 2)],
    )
    .await;
    let second = seed_recipe(&store, &author, "Broth", &[&dinner], &[(&salt, 3)]).await;
    put_in_cart(&store, shopper.id, first.id).await;
    put_in_cart(&store, shopper.id, second.id).await;

    let items = AggregateShoppingListUseCase { repo: store.clone() }
        .execute(shopper.id)
        .await
        .unwrap();

    assert_eq!(
        items,
        vec![item(1, "Salt", "g", 8), item(2, "Egg", "pcs", 2)]
    );
}

#[tokio::test]
async fn should_return_identical_lists_without_mutation() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let flour = store.add_ingredient("Flour", "g");
    let milk = store.add_ingredient("Milk", "ml");
    let pancakes = seed_recipe(
        &store,
        &author,
        "Pancakes",
        &[&dinner],
        &[(&flour, 200), (&milk, 300)],
    )
    .await;
    put_in_cart(&store, author.id, pancakes.id).await;
    let usecase = AggregateShoppingListUseCase { repo: store.clone() };

    let first = usecase.execute(author.id).await.unwrap();
    let second = usecase.execute(author.id).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn should_return_empty_list_for_empty_cart() {
    let store = InMemoryStore::new();
    let shopper = store.add_user("shopper");

    let items = AggregateShoppingListUseCase { repo: store.clone() }
        .execute(shopper.id)
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn should_keep_same_name_with_different_units_apart() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let sugar_g = store.add_ingredient("Sugar", "g");
    let sugar_tbsp = store.add_ingredient("Sugar", "tbsp");
    let cake = seed_recipe(
        &store,
        &author,
        "Cake",
        &[&dinner],
        &[(&sugar_g, 100), (&sugar_tbsp, 2)],
    )
    .await;
    put_in_cart(&store, author.id, cake.id).await;

    let items = AggregateShoppingListUseCase { repo: store.clone() }
        .execute(author.id)
        .await
        .unwrap();
    assert_eq!(
        items,
        vec![item(1, "Sugar", "g", 100), item(2, "Sugar", "tbsp", 2)]
    );
}

#[tokio::test]
async fn should_drop_deleted_recipes_from_list() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let shopper = store.add_user("shopper");
    let rice = store.add_ingredient("Rice", "g");
    let recipe = seed_recipe(&store, &author, "Risotto", &[&dinner], &[(&rice, 300)]).await;
    put_in_cart(&store, shopper.id, recipe.id).await;

    delete_recipe_usecase(&store)
        .execute(author.id, recipe.id)
        .await
        .unwrap();

    let items = AggregateShoppingListUseCase { repo: store.clone() }
        .execute(shopper.id)
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn should_render_downloadable_document() {
    let store = InMemoryStore::new();
    let dinner = store.add_tag("Dinner");
    let author = store.add_user("author");
    let salt = store.add_ingredient("Salt", "g");
    let egg = store.add_ingredient("Egg", "pcs");
    let first = seed_recipe(
        &store,
        &author,
        "Omelette",
        &[&dinner],
        &[(&salt, 5), (&egg, 2)],
    )
    .await;
    let second = seed_recipe(&store, &author, "Broth", &[&dinner], &[(&salt, 3)]).await;
    put_in_cart(&store, author.id, first.id).await;
    put_in_cart(&store, author.id, second.id).await;

    let document = DownloadShoppingListUseCase {
        repo: store.clone(),
        renderer: PlainTextRenderer,
        title: "Shopping list".to_owned(),
    }
    .execute(author.id)
    .await
    .unwrap();

    assert_eq!(document.filename, "shopping_cart.txt");
    assert_eq!(
        String::from_utf8(document.bytes).unwrap(),
        "Shopping list\n\n1. Salt (g) - 8\n2. Egg (pcs) - 2\n"
    );
}
