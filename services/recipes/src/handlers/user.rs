use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use pantry_auth_types::identity::IdentityHeaders;
use pantry_domain::id::UserId;
use pantry_domain::pagination::PageRequest;
use pantry_domain::user::UserRole;

use crate::domain::viewer::ViewerContext;
use crate::error::RecipesServiceError;
use crate::handlers::response::{AuthorCardResponse, UserResponse};
use crate::handlers::{parse_query, viewer_context};
use crate::state::AppState;
use crate::usecase::presentation::BuildAuthorCardsUseCase;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetUserUseCase, ListSubscriptionsUseCase,
    ListUsersUseCase,
};

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct PageQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl PageQuery {
    fn page_request(&self) -> PageRequest {
        PageRequest::from_parts(self.per_page, self.page)
    }
}

#[derive(Deserialize, Default)]
pub struct SubscriptionsQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub recipes_limit: Option<u64>,
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub id: Option<Uuid>,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), RecipesServiceError> {
    if identity.role() != UserRole::Service {
        return Err(RecipesServiceError::Forbidden);
    }
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(CreateUserInput {
            id: body.id,
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    let view = ViewerContext::anonymous().present_user(user);
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<UserResponse>>, RecipesServiceError> {
    let query: PageQuery = parse_query(raw_query.as_deref())?;
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute(query.page_request()).await?;
    let ctx = viewer_context(&state, identity.map(|i| i.id())).await?;
    Ok(Json(
        users
            .into_iter()
            .map(|user| ctx.present_user(user).into())
            .collect(),
    ))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.id()).await?;
    // A user never follows themselves, so no relationship lookup is needed.
    Ok(Json(ViewerContext::anonymous().present_user(user).into()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(UserId(user_id)).await?;
    let ctx = viewer_context(&state, identity.map(|i| i.id())).await?;
    Ok(Json(ctx.present_user(user).into()))
}

// ── GET /users/@me/subscriptions ─────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<AuthorCardResponse>>, RecipesServiceError> {
    let query: SubscriptionsQuery = parse_query(raw_query.as_deref())?;
    let page = PageRequest::from_parts(query.per_page, query.page);

    let authors = ListSubscriptionsUseCase {
        repo: state.user_repo(),
    }
    .execute(identity.id(), page)
    .await?;

    let ctx = viewer_context(&state, Some(identity.id())).await?;
    let cards = BuildAuthorCardsUseCase {
        recipes: state.recipe_repo(),
    }
    .execute(authors, &ctx, query.recipes_limit)
    .await?;
    Ok(Json(cards.into_iter().map(AuthorCardResponse::from).collect()))
}
