use std::collections::HashSet;

use pantry_domain::id::{RecipeId, TagId, UserId};
use pantry_domain::pagination::PageRequest;

use crate::domain::repository::{IngredientRepository, RecipeRepository, TagRepository};
use crate::domain::types::{
    IngredientSpec, MAX_SMALL_POSITIVE, NewRecipe, Recipe, RecipeChanges, RecipeFields,
    RecipeFilter, RecipePatch,
};
use crate::error::RecipesServiceError;

// ── Validation ───────────────────────────────────────────────────────────────

fn validate_name(name: &str) -> Result<(), RecipesServiceError> {
    if name.trim().is_empty() {
        return Err(RecipesServiceError::validation("name must not be empty"));
    }
    Ok(())
}

fn validate_cooking_time(cooking_time: i32) -> Result<(), RecipesServiceError> {
    if !(1..=MAX_SMALL_POSITIVE).contains(&cooking_time) {
        return Err(RecipesServiceError::validation(format!(
            "cooking_time must be between 1 and {MAX_SMALL_POSITIVE}"
        )));
    }
    Ok(())
}

/// Deduplicate tag ids keeping their first position.
fn validate_tags(tag_ids: &[TagId]) -> Result<Vec<TagId>, RecipesServiceError> {
    if tag_ids.is_empty() {
        return Err(RecipesServiceError::validation("at least one tag is required"));
    }
    let mut seen = HashSet::new();
    Ok(tag_ids.iter().copied().filter(|id| seen.insert(*id)).collect())
}

fn validate_ingredients(ingredients: &[IngredientSpec]) -> Result<(), RecipesServiceError> {
    if ingredients.is_empty() {
        return Err(RecipesServiceError::validation(
            "at least one ingredient is required",
        ));
    }
    if let Some(spec) = ingredients
        .iter()
        .find(|spec| !(1..=MAX_SMALL_POSITIVE).contains(&spec.amount))
    {
        return Err(RecipesServiceError::validation(format!(
            "amount of ingredient {} must be between 1 and {MAX_SMALL_POSITIVE}",
            spec.ingredient_id
        )));
    }
    Ok(())
}

fn validate_fields(fields: &RecipeFields) -> Result<(), RecipesServiceError> {
    validate_name(&fields.name)?;
    validate_cooking_time(fields.cooking_time)
}

fn validate_patch(patch: &RecipePatch) -> Result<(), RecipesServiceError> {
    if let Some(ref name) = patch.name {
        validate_name(name)?;
    }
    if let Some(cooking_time) = patch.cooking_time {
        validate_cooking_time(cooking_time)?;
    }
    Ok(())
}

/// Every referenced ingredient and tag must exist. Ingredients are checked
/// first; the first unknown id in request order is reported.
async fn check_references<T, I>(
    tags: &T,
    ingredients: &I,
    tag_ids: &[TagId],
    specs: &[IngredientSpec],
) -> Result<(), RecipesServiceError>
where
    T: TagRepository,
    I: IngredientRepository,
{
    let ingredient_ids: Vec<_> = specs.iter().map(|spec| spec.ingredient_id).collect();
    let known = ingredients.existing(&ingredient_ids).await?;
    if let Some(missing) = ingredient_ids.iter().find(|id| !known.contains(*id)) {
        return Err(RecipesServiceError::UnknownIngredient(*missing));
    }

    let known = tags.existing(tag_ids).await?;
    if let Some(missing) = tag_ids.iter().find(|id| !known.contains(*id)) {
        return Err(RecipesServiceError::UnknownTag(*missing));
    }
    Ok(())
}

async fn load_recipe<R: RecipeRepository>(
    recipes: &R,
    id: RecipeId,
) -> Result<Recipe, RecipesServiceError> {
    recipes
        .find_by_id(id)
        .await?
        .ok_or(RecipesServiceError::RecipeNotFound)
}

/// Resolve the author of `id` and make sure it is `caller`.
async fn authorize<R: RecipeRepository>(
    recipes: &R,
    caller: UserId,
    id: RecipeId,
) -> Result<(), RecipesServiceError> {
    let author = recipes
        .find_author(id)
        .await?
        .ok_or(RecipesServiceError::RecipeNotFound)?;
    if author != caller {
        return Err(RecipesServiceError::Forbidden);
    }
    Ok(())
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeInput {
    pub fields: RecipeFields,
    pub tag_ids: Vec<TagId>,
    pub ingredients: Vec<IngredientSpec>,
}

pub struct CreateRecipeUseCase<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
}

impl<R, T, I> CreateRecipeUseCase<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub async fn execute(
        &self,
        author: UserId,
        input: CreateRecipeInput,
    ) -> Result<Recipe, RecipesServiceError> {
        validate_fields(&input.fields)?;
        let tag_ids = validate_tags(&input.tag_ids)?;
        validate_ingredients(&input.ingredients)?;

        check_references(&self.tags, &self.ingredients, &tag_ids, &input.ingredients).await?;

        let new_recipe = NewRecipe {
            fields: input.fields,
            tag_ids,
            ingredients: input.ingredients,
        };
        let id = self.recipes.create(author, &new_recipe).await?;
        tracing::info!(user_id = %author, recipe_id = %id, "recipe created");
        load_recipe(&self.recipes, id).await
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeInput {
    pub patch: RecipePatch,
    pub tag_ids: Vec<TagId>,
    pub ingredients: Vec<IngredientSpec>,
}

pub struct UpdateRecipeUseCase<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
}

impl<R, T, I> UpdateRecipeUseCase<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    /// Provided scalars replace stored ones; tags and ingredients are always
    /// replaced wholesale.
    pub async fn execute(
        &self,
        caller: UserId,
        id: RecipeId,
        input: UpdateRecipeInput,
    ) -> Result<Recipe, RecipesServiceError> {
        validate_patch(&input.patch)?;
        let tag_ids = validate_tags(&input.tag_ids)?;
        validate_ingredients(&input.ingredients)?;

        authorize(&self.recipes, caller, id).await?;
        check_references(&self.tags, &self.ingredients, &tag_ids, &input.ingredients).await?;

        let changes = RecipeChanges {
            patch: input.patch,
            tag_ids,
            ingredients: input.ingredients,
        };
        self.recipes.update(id, caller, &changes).await?;
        tracing::info!(user_id = %caller, recipe_id = %id, "recipe updated");
        load_recipe(&self.recipes, id).await
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(&self, caller: UserId, id: RecipeId) -> Result<(), RecipesServiceError> {
        authorize(&self.recipes, caller, id).await?;
        if !self.recipes.delete(id, caller).await? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        tracing::info!(user_id = %caller, recipe_id = %id, "recipe deleted");
        Ok(())
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> GetRecipeUseCase<R> {
    pub async fn execute(&self, id: RecipeId) -> Result<Recipe, RecipesServiceError> {
        load_recipe(&self.recipes, id).await
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct RecipeListQuery {
    pub author: Option<UserId>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

pub struct ListRecipesUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ListRecipesUseCase<R> {
    /// Favorite and cart filters restrict to the viewer's own sets, so an
    /// anonymous viewer asking for them gets nothing.
    pub async fn execute(
        &self,
        viewer: Option<UserId>,
        query: RecipeListQuery,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        if viewer.is_none() && (query.is_favorited || query.is_in_shopping_cart) {
            return Ok(vec![]);
        }
        let filter = RecipeFilter {
            author: query.author,
            tag_slugs: query.tags,
            favorited_by: viewer.filter(|_| query.is_favorited),
            in_cart_of: viewer.filter(|_| query.is_in_shopping_cart),
        };
        self.recipes.list(&filter, page).await
    }
}
