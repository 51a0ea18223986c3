use pantry_domain::id::UserId;

use crate::domain::edge::{Favorite, ShoppingCart, Subscription};
use crate::domain::repository::{EdgeRepository, RecipeRepository};
use crate::domain::types::User;
use crate::domain::viewer::{AuthorCard, ViewerContext};
use crate::error::RecipesServiceError;

// ── LoadViewerContext ────────────────────────────────────────────────────────

/// Load the viewer's favorite, cart and subscription sets.
///
/// Call once per request, after any mutation the request performs.
pub struct LoadViewerContextUseCase<F, C, S>
where
    F: EdgeRepository<Favorite>,
    C: EdgeRepository<ShoppingCart>,
    S: EdgeRepository<Subscription>,
{
    pub favorites: F,
    pub cart: C,
    pub subscriptions: S,
}

impl<F, C, S> LoadViewerContextUseCase<F, C, S>
where
    F: EdgeRepository<Favorite>,
    C: EdgeRepository<ShoppingCart>,
    S: EdgeRepository<Subscription>,
{
    pub async fn execute(
        &self,
        viewer: Option<UserId>,
    ) -> Result<ViewerContext, RecipesServiceError> {
        let Some(viewer) = viewer else {
            return Ok(ViewerContext::anonymous());
        };
        let (favorites, cart, subscriptions) = tokio::try_join!(
            self.favorites.targets(viewer),
            self.cart.targets(viewer),
            self.subscriptions.targets(viewer),
        )?;
        Ok(ViewerContext {
            viewer: Some(viewer),
            favorites,
            cart,
            subscriptions,
        })
    }
}

// ── BuildAuthorCards ─────────────────────────────────────────────────────────

/// Attach each author's newest recipes to their profile view.
pub struct BuildAuthorCardsUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> BuildAuthorCardsUseCase<R> {
    pub async fn execute(
        &self,
        authors: Vec<User>,
        ctx: &ViewerContext,
        recipes_limit: Option<u64>,
    ) -> Result<Vec<AuthorCard>, RecipesServiceError> {
        if authors.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<UserId> = authors.iter().map(|author| author.id).collect();
        let mut summaries = self.recipes.summaries_by_authors(&ids, recipes_limit).await?;
        Ok(authors
            .into_iter()
            .map(|author| {
                let recipes = summaries.remove(&author.id).unwrap_or_default();
                ctx.present_card(author, recipes)
            })
            .collect())
    }
}
