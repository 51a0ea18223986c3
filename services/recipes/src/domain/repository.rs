#![allow(async_fn_in_trait)]

use std::collections::{HashMap, HashSet};

use pantry_domain::id::{IngredientId, RecipeId, TagId, UserId};
use pantry_domain::pagination::PageRequest;

use crate::domain::edge::EdgeKind;
use crate::domain::types::{
    Ingredient, IngredientLine, NewRecipe, NewUser, Recipe, RecipeChanges, RecipeFilter,
    RecipeSummary, RenderedDocument, Tag, User,
};
use crate::error::RecipesServiceError;

/// Unique `(owner, target)` edges of one kind.
pub trait EdgeRepository<K: EdgeKind>: Send + Sync {
    /// Conditional insert. Returns `false` when the edge already existed.
    async fn insert(&self, owner: UserId, target: K::Target) -> Result<bool, RecipesServiceError>;

    /// Returns `false` when there was nothing to delete.
    async fn delete(&self, owner: UserId, target: K::Target) -> Result<bool, RecipesServiceError>;

    async fn targets(&self, owner: UserId) -> Result<HashSet<K::Target>, RecipesServiceError>;
}

/// Repository for user profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RecipesServiceError>;

    /// Fails with `UserAlreadyExists` on an email or username collision.
    async fn create(&self, user: &NewUser) -> Result<User, RecipesServiceError>;

    /// Users ordered by username.
    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RecipesServiceError>;

    /// Authors followed by `follower`, most recent subscription first.
    async fn list_followed(
        &self,
        follower: UserId,
        page: PageRequest,
    ) -> Result<Vec<User>, RecipesServiceError>;
}

/// Repository for recipes and their tag and ingredient edges.
///
/// Every write runs in one transaction and recomputes the author's
/// `recipes_count` before committing.
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipesServiceError>;

    async fn find_summary(
        &self,
        id: RecipeId,
    ) -> Result<Option<RecipeSummary>, RecipesServiceError>;

    async fn find_author(&self, id: RecipeId) -> Result<Option<UserId>, RecipesServiceError>;

    /// Newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError>;

    /// Newest-first summaries per author, at most `limit` each when given.
    async fn summaries_by_authors(
        &self,
        authors: &[UserId],
        limit: Option<u64>,
    ) -> Result<HashMap<UserId, Vec<RecipeSummary>>, RecipesServiceError>;

    async fn create(
        &self,
        author: UserId,
        recipe: &NewRecipe,
    ) -> Result<RecipeId, RecipesServiceError>;

    async fn update(
        &self,
        id: RecipeId,
        author: UserId,
        changes: &RecipeChanges,
    ) -> Result<(), RecipesServiceError>;

    /// Returns `false` when the recipe was already gone.
    async fn delete(&self, id: RecipeId, author: UserId) -> Result<bool, RecipesServiceError>;
}

/// Read-only tag catalogue.
pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError>;

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, RecipesServiceError>;

    /// Subset of `ids` present in storage.
    async fn existing(&self, ids: &[TagId]) -> Result<HashSet<TagId>, RecipesServiceError>;
}

/// Read-only ingredient catalogue.
pub trait IngredientRepository: Send + Sync {
    /// Ordered by name. `name_prefix` matches case-insensitively.
    async fn list(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError>;

    async fn find_by_id(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, RecipesServiceError>;

    /// Subset of `ids` present in storage.
    async fn existing(
        &self,
        ids: &[IngredientId],
    ) -> Result<HashSet<IngredientId>, RecipesServiceError>;
}

/// Source of the ingredient lines behind a user's shopping list.
pub trait ShoppingListRepository: Send + Sync {
    /// Lines of every recipe in the cart, ordered by cart entry creation,
    /// then recipe id, then ingredient line id.
    async fn cart_lines(&self, owner: UserId) -> Result<Vec<IngredientLine>, RecipesServiceError>;
}

/// Turns a titled list of lines into a downloadable document.
pub trait DocumentRenderer: Send + Sync {
    fn render(
        &self,
        title: &str,
        lines: &[String],
    ) -> Result<RenderedDocument, RecipesServiceError>;
}
