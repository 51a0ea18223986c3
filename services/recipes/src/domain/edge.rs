//! Edge kinds backed by the generic relationship store.
//!
//! Each kind is a unique `(owner, target)` pair owned by a user. The kind
//! decides the target id type, whether self edges are allowed and which
//! errors a duplicate add or an absent remove map to.

use std::fmt::Debug;
use std::hash::Hash;

use pantry_domain::id::{RecipeId, UserId};

use crate::error::RecipesServiceError;

pub trait EdgeKind: Send + Sync + 'static {
    type Target: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Short name used in logs.
    const NAME: &'static str;

    /// Reject an add before touching storage. Default allows everything.
    fn check_target(owner: UserId, target: Self::Target) -> Result<(), RecipesServiceError> {
        let _ = (owner, target);
        Ok(())
    }

    fn already_exists() -> RecipesServiceError;

    fn not_found() -> RecipesServiceError;
}

/// User marks a recipe as favorite.
#[derive(Debug, Clone, Copy)]
pub struct Favorite;

/// User puts a recipe in the shopping cart.
#[derive(Debug, Clone, Copy)]
pub struct ShoppingCart;

/// User follows an author.
#[derive(Debug, Clone, Copy)]
pub struct Subscription;

impl EdgeKind for Favorite {
    type Target = RecipeId;
    const NAME: &'static str = "favorite";

    fn already_exists() -> RecipesServiceError {
        RecipesServiceError::FavoriteAlreadyExists
    }

    fn not_found() -> RecipesServiceError {
        RecipesServiceError::FavoriteNotFound
    }
}

impl EdgeKind for ShoppingCart {
    type Target = RecipeId;
    const NAME: &'static str = "shopping_cart";

    fn already_exists() -> RecipesServiceError {
        RecipesServiceError::CartEntryAlreadyExists
    }

    fn not_found() -> RecipesServiceError {
        RecipesServiceError::CartEntryNotFound
    }
}

impl EdgeKind for Subscription {
    type Target = UserId;
    const NAME: &'static str = "subscription";

    fn check_target(owner: UserId, target: UserId) -> Result<(), RecipesServiceError> {
        if owner == target {
            return Err(RecipesServiceError::SelfSubscription);
        }
        Ok(())
    }

    fn already_exists() -> RecipesServiceError {
        RecipesServiceError::SubscriptionAlreadyExists
    }

    fn not_found() -> RecipesServiceError {
        RecipesServiceError::SubscriptionNotFound
    }
}
