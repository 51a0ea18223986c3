use std::marker::PhantomData;

use pantry_domain::id::{RecipeId, UserId};

use crate::domain::edge::{EdgeKind, Favorite, ShoppingCart, Subscription};
use crate::domain::repository::{EdgeRepository, RecipeRepository, UserRepository};
use crate::domain::types::{RecipeSummary, User};
use crate::error::RecipesServiceError;

/// Direction of an edge toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOp {
    Add,
    Remove,
}

/// Add or remove one edge of kind `K`.
///
/// `Add` runs the kind's target check first, then a conditional insert; a
/// conflict becomes `K::already_exists()`. `Remove` maps "nothing deleted"
/// to `K::not_found()`. Each branch is a single statement in storage.
pub async fn toggle_edge<K, E>(
    edges: &E,
    owner: UserId,
    target: K::Target,
    op: EdgeOp,
) -> Result<(), RecipesServiceError>
where
    K: EdgeKind,
    E: EdgeRepository<K>,
{
    match op {
        EdgeOp::Add => {
            K::check_target(owner, target)?;
            if !edges.insert(owner, target).await? {
                return Err(K::already_exists());
            }
        }
        EdgeOp::Remove => {
            if !edges.delete(owner, target).await? {
                return Err(K::not_found());
            }
        }
    }
    tracing::info!(kind = K::NAME, user_id = %owner, target = ?target, op = ?op, "edge toggled");
    Ok(())
}

// ── ToggleRecipeEdge ─────────────────────────────────────────────────────────

/// Toggle a user → recipe edge. The recipe must exist.
pub struct ToggleRecipeEdgeUseCase<K, E, R>
where
    K: EdgeKind<Target = RecipeId>,
    E: EdgeRepository<K>,
    R: RecipeRepository,
{
    pub edges: E,
    pub recipes: R,
    _kind: PhantomData<fn() -> K>,
}

pub type ToggleFavoriteUseCase<E, R> = ToggleRecipeEdgeUseCase<Favorite, E, R>;
pub type ToggleCartUseCase<E, R> = ToggleRecipeEdgeUseCase<ShoppingCart, E, R>;

impl<K, E, R> ToggleRecipeEdgeUseCase<K, E, R>
where
    K: EdgeKind<Target = RecipeId>,
    E: EdgeRepository<K>,
    R: RecipeRepository,
{
    pub fn new(edges: E, recipes: R) -> Self {
        Self {
            edges,
            recipes,
            _kind: PhantomData,
        }
    }

    pub async fn execute(
        &self,
        user: UserId,
        recipe_id: RecipeId,
        op: EdgeOp,
    ) -> Result<RecipeSummary, RecipesServiceError> {
        let summary = self
            .recipes
            .find_summary(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        toggle_edge::<K, E>(&self.edges, user, recipe_id, op).await?;
        Ok(summary)
    }
}

// ── ToggleSubscription ───────────────────────────────────────────────────────

pub struct ToggleSubscriptionUseCase<E, U>
where
    E: EdgeRepository<Subscription>,
    U: UserRepository,
{
    pub edges: E,
    pub users: U,
}

impl<E, U> ToggleSubscriptionUseCase<E, U>
where
    E: EdgeRepository<Subscription>,
    U: UserRepository,
{
    /// Returns the author. Self-subscription is rejected before the author
    /// lookup.
    pub async fn execute(
        &self,
        user: UserId,
        author: UserId,
        op: EdgeOp,
    ) -> Result<User, RecipesServiceError> {
        if op == EdgeOp::Add {
            Subscription::check_target(user, author)?;
        }
        let author = self
            .users
            .find_by_id(author)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        toggle_edge::<Subscription, E>(&self.edges, user, author.id, op).await?;
        Ok(author)
    }
}
