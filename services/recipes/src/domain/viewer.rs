//! Per-request viewer context and the views built from it.

use std::collections::HashSet;

use pantry_domain::id::{RecipeId, UserId};

use crate::domain::types::{Recipe, RecipeSummary, User};

/// Relationship sets of the requesting user, loaded once per request.
/// Anonymous viewers get an empty context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerContext {
    pub viewer: Option<UserId>,
    pub favorites: HashSet<RecipeId>,
    pub cart: HashSet<RecipeId>,
    pub subscriptions: HashSet<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub user: User,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author: UserView,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// A followed author with a preview of their latest recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorCard {
    pub author: UserView,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: i32,
}

impl ViewerContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_favorited(&self, recipe: RecipeId) -> bool {
        self.favorites.contains(&recipe)
    }

    pub fn is_in_shopping_cart(&self, recipe: RecipeId) -> bool {
        self.cart.contains(&recipe)
    }

    pub fn is_subscribed(&self, author: UserId) -> bool {
        self.subscriptions.contains(&author)
    }

    pub fn present_user(&self, user: User) -> UserView {
        UserView {
            is_subscribed: self.is_subscribed(user.id),
            user,
        }
    }

    pub fn present_recipe(&self, recipe: Recipe) -> RecipeView {
        let author = self.present_user(recipe.author.clone());
        RecipeView {
            is_favorited: self.is_favorited(recipe.id),
            is_in_shopping_cart: self.is_in_shopping_cart(recipe.id),
            author,
            recipe,
        }
    }

    pub fn present_card(&self, author: User, recipes: Vec<RecipeSummary>) -> AuthorCard {
        let recipes_count = author.recipes_count;
        AuthorCard {
            author: self.present_user(author),
            recipes,
            recipes_count,
        }
    }
}
