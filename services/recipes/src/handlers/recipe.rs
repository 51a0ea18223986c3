use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use pantry_auth_types::identity::IdentityHeaders;
use pantry_domain::id::{IngredientId, RecipeId, TagId, UserId};
use pantry_domain::pagination::PageRequest;

use crate::domain::types::{IngredientSpec, RecipeFields, RecipePatch};
use crate::error::RecipesServiceError;
use crate::handlers::response::RecipeResponse;
use crate::handlers::{parse_flag, parse_query, viewer_context};
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    ListRecipesUseCase, RecipeListQuery, UpdateRecipeInput, UpdateRecipeUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i32,
}

fn ingredient_specs(items: Vec<IngredientAmountRequest>) -> Vec<IngredientSpec> {
    items
        .into_iter()
        .map(|item| IngredientSpec {
            ingredient_id: IngredientId(item.id),
            amount: item.amount,
        })
        .collect()
}

fn tag_ids(ids: Vec<i32>) -> Vec<TagId> {
    ids.into_iter().map(TagId).collect()
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct RecipeListParams {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub author: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

pub async fn list_recipes(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<RecipeResponse>>, RecipesServiceError> {
    let params: RecipeListParams = parse_query(raw_query.as_deref())?;
    let query = RecipeListQuery {
        author: params.author.map(UserId),
        tags: params.tags,
        is_favorited: parse_flag("is_favorited", params.is_favorited.as_deref())?,
        is_in_shopping_cart: parse_flag(
            "is_in_shopping_cart",
            params.is_in_shopping_cart.as_deref(),
        )?,
    };
    let page = PageRequest::from_parts(params.per_page, params.page);
    let viewer = identity.map(|i| i.id());

    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
    };
    let recipes = usecase.execute(viewer, query, page).await?;
    let ctx = viewer_context(&state, viewer).await?;
    Ok(Json(
        recipes
            .into_iter()
            .map(|recipe| ctx.present_recipe(recipe).into())
            .collect(),
    ))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    #[serde(default)]
    pub tags: Vec<i32>,
    #[serde(default)]
    pub ingredients: Vec<IngredientAmountRequest>,
}

pub async fn create_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), RecipesServiceError> {
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
    };
    let recipe = usecase
        .execute(
            identity.id(),
            CreateRecipeInput {
                fields: RecipeFields {
                    name: body.name,
                    image: body.image,
                    text: body.text,
                    cooking_time: body.cooking_time,
                },
                tag_ids: tag_ids(body.tags),
                ingredients: ingredient_specs(body.ingredients),
            },
        )
        .await?;
    let ctx = viewer_context(&state, Some(identity.id())).await?;
    Ok((StatusCode::CREATED, Json(ctx.present_recipe(recipe).into())))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    let recipe = usecase.execute(RecipeId(recipe_id)).await?;
    let ctx = viewer_context(&state, identity.map(|i| i.id())).await?;
    Ok(Json(ctx.present_recipe(recipe).into()))
}

// ── PATCH /recipes/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    #[serde(default)]
    pub tags: Vec<i32>,
    #[serde(default)]
    pub ingredients: Vec<IngredientAmountRequest>,
}

pub async fn update_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    Json(body): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
    };
    let recipe = usecase
        .execute(
            identity.id(),
            RecipeId(recipe_id),
            UpdateRecipeInput {
                patch: RecipePatch {
                    name: body.name,
                    image: body.image,
                    text: body.text,
                    cooking_time: body.cooking_time,
                },
                tag_ids: tag_ids(body.tags),
                ingredients: ingredient_specs(body.ingredients),
            },
        )
        .await?;
    let ctx = viewer_context(&state, Some(identity.id())).await?;
    Ok(Json(ctx.present_recipe(recipe).into()))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    usecase.execute(identity.id(), RecipeId(recipe_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
