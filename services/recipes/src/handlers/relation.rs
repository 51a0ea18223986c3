use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use pantry_auth_types::identity::IdentityHeaders;
use pantry_domain::id::{RecipeId, UserId};

use crate::domain::edge::{Favorite, ShoppingCart, Subscription};
use crate::error::RecipesServiceError;
use crate::handlers::response::{AuthorCardResponse, RecipeSummaryResponse};
use crate::handlers::{parse_query, viewer_context};
use crate::state::AppState;
use crate::usecase::presentation::BuildAuthorCardsUseCase;
use crate::usecase::relation::{
    EdgeOp, ToggleCartUseCase, ToggleFavoriteUseCase, ToggleSubscriptionUseCase,
};

// ── POST/DELETE /recipes/{id}/favorite ───────────────────────────────────────

pub async fn add_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    let usecase = ToggleFavoriteUseCase::new(state.edge_repo::<Favorite>(), state.recipe_repo());
    let summary = usecase
        .execute(identity.id(), RecipeId(recipe_id), EdgeOp::Add)
        .await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

pub async fn remove_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = ToggleFavoriteUseCase::new(state.edge_repo::<Favorite>(), state.recipe_repo());
    usecase
        .execute(identity.id(), RecipeId(recipe_id), EdgeOp::Remove)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST/DELETE /recipes/{id}/shopping_cart ──────────────────────────────────

pub async fn add_to_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    let usecase = ToggleCartUseCase::new(state.edge_repo::<ShoppingCart>(), state.recipe_repo());
    let summary = usecase
        .execute(identity.id(), RecipeId(recipe_id), EdgeOp::Add)
        .await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

pub async fn remove_from_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = ToggleCartUseCase::new(state.edge_repo::<ShoppingCart>(), state.recipe_repo());
    usecase
        .execute(identity.id(), RecipeId(recipe_id), EdgeOp::Remove)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST/DELETE /users/{id}/subscribe ────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SubscribeQuery {
    pub recipes_limit: Option<u64>,
}

pub async fn subscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    RawQuery(raw_query): RawQuery,
) -> Result<(StatusCode, Json<AuthorCardResponse>), RecipesServiceError> {
    let query: SubscribeQuery = parse_query(raw_query.as_deref())?;
    let usecase = ToggleSubscriptionUseCase {
        edges: state.edge_repo::<Subscription>(),
        users: state.user_repo(),
    };
    let author = usecase
        .execute(identity.id(), UserId(author_id), EdgeOp::Add)
        .await?;

    let ctx = viewer_context(&state, Some(identity.id())).await?;
    let card = BuildAuthorCardsUseCase {
        recipes: state.recipe_repo(),
    }
    .execute(vec![author], &ctx, query.recipes_limit)
    .await?
    .pop()
    .ok_or_else(|| anyhow!("author card missing after subscribe"))?;
    Ok((StatusCode::CREATED, Json(card.into())))
}

pub async fn unsubscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = ToggleSubscriptionUseCase {
        edges: state.edge_repo::<Subscription>(),
        users: state.user_repo(),
    };
    usecase
        .execute(identity.id(), UserId(author_id), EdgeOp::Remove)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
