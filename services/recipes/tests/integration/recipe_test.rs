use pantry_domain::id::{IngredientId, RecipeId, TagId};
use pantry_domain::pagination::PageRequest;
use pantry_recipes::domain::types::{IngredientSpec, Recipe, RecipePatch};
use pantry_recipes::error::RecipesServiceError;
use pantry_recipes::usecase::recipe::{ListRecipesUseCase, RecipeListQuery, UpdateRecipeInput};
use pantry_recipes::usecase::relation::{EdgeOp, ToggleFavoriteUseCase};

use crate::helpers::{
    InMemoryStore, create_recipe_usecase, delete_recipe_usecase, recipe_input, seed_recipe,
    update_recipe_usecase,
};

fn replace_lines(lines: &[(IngredientId, i32)], tags: &[TagId]) -> UpdateRecipeInput {
    UpdateRecipeInput {
        patch: RecipePatch::default(),
        tag_ids: tags.to_vec(),
        ingredients: lines
            .iter()
            .map(|(id, amount)| IngredientSpec {
                ingredient_id: *id,
                amount: *amount,
            })
            .collect(),
    }
}

// ── Composition ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_recipe_with_tags_and_lines_in_order() {
    let store = InMemoryStore::new();
    let author = store.add_user("author");
    let dinner = store.add_tag("Dinner");
    let lunch = store.add_tag("Lunch");
    let salt = store.add_ingredient("Salt", "g");
    let egg = store.add_ingredient("Egg", "pcs");

    let recipe = seed_recipe(
        &store,
        &author,
        "Omelette",
        &[&lunch, &dinner, &lunch],
        &[(&egg, 3), (&salt, 2)],
    )
    .await;

    assert_eq!(recipe.author.id, author.id);
    assert_eq!(recipe.tags, vec![dinner, lunch]);
    let lines: Vec<(&str, i32)> = recipe
        .ingredients
        .iter()
        .map(|l| (l.ingredient.name.as_str(), l.amount))
        .collect();
    assert_eq!(lines, vec![("Egg", 3), ("Salt", 2)]);
    assert_eq!(recipe.author.recipes_count, 1);
}

#[tokio::test]
async fn should_replace_ingredient_rows_wholesale_on_update() {
    let store = InMemoryStore::new();
    let author = store.add_user("author");
    let tag = store.add_tag("Breakfast");
    let a = store.add_ingredient("Apple", "pcs");
    let b = store.add_ingredient("Butter", "g");
    let c = store.add_ingredient("Cinnamon", "g");
    let recipe = seed_recipe(&store, &author, "Pie", &[&tag], &[(&a, 2), (&b, 3)]).await;

    let updated = update_recipe_usecase(&store)
        .execute(author.id, recipe.id, replace_lines(&[(c.id, 1)], &[tag.id]))
        .await
        .unwrap();

    assert_eq!(store.ingredient_rows(recipe.id), vec![(c.id, 1)]);
    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.name, "Pie");
}

#[tokio::test]
async fn should_apply_scalar_patch_only_where_given() {
    let store = InMemoryStore::new();
    let author = store.add_user("author");
    let tag = store.add_tag("Dinner");
    let rice = store.add_ingredient("Rice", "g");
    let recipe = seed_recipe(&store, &author, "Pilaf", &[&tag], &[(&rice, 200)]).await;

    let mut input = replace_lines(&[(rice.id, 250)], &[tag.id]);
    input.patch = RecipePatch {
        cooking_time: Some(45),
        ..Default::default()
    };
    let updated = update_recipe_usecase(&store)
        .execute(author.id, recipe.id, input)
        .await
        .unwrap();

    assert_eq!(updated.cooking_time, 45);
    assert_eq!(updated.name, recipe.name);
    assert_eq!(updated.text, recipe.text);
}

#[tokio::test]
async fn should_track_recipes_count_through_writes() {
    let store = InMemoryStore::new();
    let author = store.add_user("author");
    let other = store.add_user("other");
    let tag = store.add_tag("Snack");
    let nut = store.add_ingredient("Nut", "g");

    let first = seed_recipe(&store, &author, "Mix", &[&tag], &[(&nut, 50)]).await;
    let second = seed_recipe(&store, &author, "Bar", &[&tag], &[(&nut, 80)]).await;
    seed_recipe(&store, &other, "Bowl", &[&tag], &[(&nut, 30)]).await;
    assert_eq!(store.user(author.id).recipes_count, 2);

    update_recipe_usecase(&store)
        .execute(author.id, second.id, replace_lines(&[(nut.id, 90)], &[tag.id]))
        .await
        .unwrap();
    assert_eq!(store.user(author.id).recipes_count, 2);

    delete_recipe_usecase(&store)
        .execute(author.id, first.id)
        .await
        .unwrap();
    assert_eq!(store.user(author.id).recipes_count, 1);
    assert_eq!(
        usize::try_from(store.user(author.id).recipes_count).unwrap(),
        store.recipe_count_of(author.id)
    );
    assert_eq!(store.user(other.id).recipes_count, 1);
}

// ── Validation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_zero_cooking_time_before_storage() {
    let store = InMemoryStore::new();
    let author = store.add_user("author");
    let tag = store.add_tag("Dinner");
    let salt = store.add_ingredient("Salt", "g");
    let mut input = recipe_input("Soup", &[&tag], &[(&salt, 5)]);
    input.fields.cooking_time = 0;

    let result = create_recipe_usecase(&store).execute(author.id, input).await;
    assert!(matches!(result, Err(RecipesServiceError::Validation(_))));
    assert_eq!(store.accesses(), 0);
}

#[tokio::test]
async fn should_reject_zero_amount_before_storage() {
    let store = InMemoryStore::new();
    let author = store.add_user("author");
    let tag = store.add_tag("Dinner");
    let salt = store.add_ingredient("Salt", "g");

    let result = create_recipe_usecase(&store)
        .execute(author.id, recipe_input("Soup", &[&tag], &[(&salt, 0)]))
        .await;
    assert!(matches!(result, Err(RecipesServiceError::Validation(_))));

    let result = update_recipe_usecase(&store)
        .execute(author.id, RecipeId(1), replace_lines(&[(salt.id, 0)], &[tag.id]))
        .await;
    assert!(matches!(result, Err(RecipesServiceError::Validation(_))));
    assert_eq!(store.accesses(), 0);
}

#[tokio::test]
async fn should_reject_unknown_ingredient() {
    let store = InMemoryStore::new();
    let author = store.add_user("author");
    let tag = store.add_tag("Dinner");
    let mut input = recipe_input("Soup", &[&tag], &[]);
    input.ingredients = vec![IngredientSpec {
        ingredient_id: IngredientId(99),
        amount: 1,
    }];

    let result = create_recipe_usecase(&store).execute(author.id, input).await;
    assert!(
        matches!(result, Err(RecipesServiceError::UnknownIngredient(IngredientId(99)))),
        "expected UnknownIngredient(99), got {result:?}"
    );
    assert_eq!(store.recipe_count_of(author.id), 0);
}

// ── Authorization ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_changes_by_non_author() {
    let store = InMemoryStore::new();
    let author = store.add_user("author");
    let intruder = store.add_user("intruder");
    let tag = store.add_tag("Dinner");
    let salt = store.add_ingredient("Salt", "g");
    let recipe = seed_recipe(&store, &author, "Soup", &[&tag], &[(&salt, 5)]).await;

    let update = update_recipe_usecase(&store)
        .execute(intruder.id, recipe.id, replace_lines(&[(salt.id, 1)], &[tag.id]))
        .await;
    assert!(matches!(update, Err(RecipesServiceError::Forbidden)));

    let delete = delete_recipe_usecase(&store)
        .execute(intruder.id, recipe.id)
        .await;
    assert!(matches!(delete, Err(RecipesServiceError::Forbidden)));
    assert_eq!(store.ingredient_rows(recipe.id), vec![(salt.id, 5)]);
}

#[tokio::test]
async fn should_report_missing_recipe_on_delete() {
    let store = InMemoryStore::new();
    let author = store.add_user("author");

    let result = delete_recipe_usecase(&store)
        .execute(author.id, RecipeId(12))
        .await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

// ── Listing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_newest_first_with_filters() {
    let store = InMemoryStore::new();
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    let breakfast = store.add_tag("Breakfast");
    let dinner = store.add_tag("Dinner");
    let egg = store.add_ingredient("Egg", "pcs");

    let omelette = seed_recipe(&store, &alice, "Omelette", &[&breakfast], &[(&egg, 2)]).await;
    let frittata = seed_recipe(&store, &alice, "Frittata", &[&dinner], &[(&egg, 6)]).await;
    let scramble = seed_recipe(&store, &bob, "Scramble", &[&breakfast], &[(&egg, 3)]).await;

    let usecase = ListRecipesUseCase {
        recipes: store.clone(),
    };
    let ids = |recipes: Vec<Recipe>| {
        recipes.into_iter().map(|r| r.id).collect::<Vec<_>>()
    };

    let all = usecase
        .execute(None, RecipeListQuery::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(ids(all), vec![scramble.id, frittata.id, omelette.id]);

    let by_alice = usecase
        .execute(
            None,
            RecipeListQuery {
                author: Some(alice.id),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(ids(by_alice), vec![frittata.id, omelette.id]);

    let breakfasts = usecase
        .execute(
            None,
            RecipeListQuery {
                tags: vec!["breakfast".into()],
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(ids(breakfasts), vec![scramble.id, omelette.id]);

    let second_page = usecase
        .execute(
            None,
            RecipeListQuery::default(),
            PageRequest::from_parts(Some(2), Some(2)),
        )
        .await
        .unwrap();
    assert_eq!(ids(second_page), vec![omelette.id]);
}

#[tokio::test]
async fn should_restrict_to_viewer_favorites() {
    let store = InMemoryStore::new();
    let author = store.add_user("author");
    let reader = store.add_user("reader");
    let tag = store.add_tag("Dinner");
    let salt = store.add_ingredient("Salt", "g");
    let soup = seed_recipe(&store, &author, "Soup", &[&tag], &[(&salt, 5)]).await;
    seed_recipe(&store, &author, "Stew", &[&tag], &[(&salt, 7)]).await;

    ToggleFavoriteUseCase::new(store.clone(), store.clone())
        .execute(reader.id, soup.id, EdgeOp::Add)
        .await
        .unwrap();

    let usecase = ListRecipesUseCase {
        recipes: store.clone(),
    };
    let query = RecipeListQuery {
        is_favorited: true,
        ..Default::default()
    };

    let mine = usecase
        .execute(Some(reader.id), query.clone(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, soup.id);

    let anonymous = usecase
        .execute(None, query, PageRequest::default())
        .await
        .unwrap();
    assert!(anonymous.is_empty());
}
