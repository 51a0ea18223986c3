use chrono::{DateTime, Utc};

use pantry_domain::id::{IngredientId, RecipeId, TagId, UserId};

/// Largest value accepted for `cooking_time` and ingredient `amount`.
pub const MAX_SMALL_POSITIVE: i32 = 32767;

/// Longest username accepted at registration.
pub const MAX_USERNAME_LEN: usize = 150;

/// User profile as seen by the recipes service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Number of recipes authored. Rewritten by every recipe write.
    pub recipes_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub measurement_unit: String,
}

/// An ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Fully loaded recipe: author, tags and ingredient lines in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub author: User,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub created_at: DateTime<Utc>,
}

/// Short recipe form returned by toggle endpoints and author cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Requested ingredient line: catalogue id plus amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientSpec {
    pub ingredient_id: IngredientId,
    pub amount: i32,
}

/// Scalar recipe fields, all required on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

/// Scalar recipe fields on update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

/// Validated input for a recipe insert. Tag ids are deduplicated, ingredient
/// specs keep their request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub fields: RecipeFields,
    pub tag_ids: Vec<TagId>,
    pub ingredients: Vec<IngredientSpec>,
}

/// Validated input for a recipe update. Tags and ingredients replace the
/// stored sets wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeChanges {
    pub patch: RecipePatch,
    pub tag_ids: Vec<TagId>,
    pub ingredients: Vec<IngredientSpec>,
}

/// Filters for the recipe list. Every `Some` narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author: Option<UserId>,
    /// Tag slugs; a recipe matches when it carries any of them.
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<UserId>,
    pub in_cart_of: Option<UserId>,
}

/// One ingredient line of a recipe in a user's cart, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Aggregated shopping list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    /// 1-based position in first-encountered order.
    pub index: usize,
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: u64,
}

/// Output of a [`DocumentRenderer`](crate::domain::repository::DocumentRenderer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// New user registration forwarded by the identity service.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Validate a username: 1–150 characters of letters, digits and `@ . + - _`.
/// `me` is reserved for the `/users/@me` route family.
pub fn validate_username(username: &str) -> bool {
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
        return false;
    }
    if username.eq_ignore_ascii_case("me") {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}
