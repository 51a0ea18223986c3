use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use pantry_domain::id::{IngredientId, TagId};

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("recipe is not in favorites")]
    FavoriteNotFound,
    #[error("recipe is not in the shopping cart")]
    CartEntryNotFound,
    #[error("not subscribed to this author")]
    SubscriptionNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("recipe is already in favorites")]
    FavoriteAlreadyExists,
    #[error("recipe is already in the shopping cart")]
    CartEntryAlreadyExists,
    #[error("already subscribed to this author")]
    SubscriptionAlreadyExists,
    #[error("cannot subscribe to yourself")]
    SelfSubscription,
    #[error("unknown ingredient: {0}")]
    UnknownIngredient(IngredientId),
    #[error("unknown tag: {0}")]
    UnknownTag(TagId),
    #[error("{0}")]
    Validation(String),
    #[error("invalid username")]
    InvalidUsername,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::FavoriteNotFound => "FAVORITE_NOT_FOUND",
            Self::CartEntryNotFound => "CART_ENTRY_NOT_FOUND",
            Self::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::FavoriteAlreadyExists => "FAVORITE_ALREADY_EXISTS",
            Self::CartEntryAlreadyExists => "CART_ENTRY_ALREADY_EXISTS",
            Self::SubscriptionAlreadyExists => "SUBSCRIPTION_ALREADY_EXISTS",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::UnknownIngredient(_) => "UNKNOWN_INGREDIENT",
            Self::UnknownTag(_) => "UNKNOWN_TAG",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::RecipeNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound
            | Self::FavoriteNotFound
            | Self::CartEntryNotFound
            | Self::SubscriptionNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists
            | Self::FavoriteAlreadyExists
            | Self::CartEntryAlreadyExists
            | Self::SubscriptionAlreadyExists => StatusCode::CONFLICT,
            Self::SelfSubscription
            | Self::UnknownIngredient(_)
            | Self::UnknownTag(_)
            | Self::Validation(_)
            | Self::InvalidUsername
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
