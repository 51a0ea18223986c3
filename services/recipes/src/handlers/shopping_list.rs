use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use pantry_auth_types::identity::IdentityHeaders;

use crate::error::RecipesServiceError;
use crate::handlers::response::ShoppingListItemResponse;
use crate::state::AppState;
use crate::usecase::shopping_list::{AggregateShoppingListUseCase, DownloadShoppingListUseCase};

// ── GET /recipes/shopping_list ───────────────────────────────────────────────

pub async fn get_shopping_list(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<ShoppingListItemResponse>>, RecipesServiceError> {
    let usecase = AggregateShoppingListUseCase {
        repo: state.shopping_list_repo(),
    };
    let items = usecase.execute(identity.id()).await?;
    Ok(Json(
        items
            .into_iter()
            .map(ShoppingListItemResponse::from)
            .collect(),
    ))
}

// ── GET /recipes/download_shopping_cart ──────────────────────────────────────

pub async fn download_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Response, RecipesServiceError> {
    let usecase = DownloadShoppingListUseCase {
        repo: state.shopping_list_repo(),
        renderer: state.document_renderer(),
        title: state.shopping_list_title.to_string(),
    };
    let document = usecase.execute(identity.id()).await?;
    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        [
            (header::CONTENT_TYPE, document.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(document.bytes),
    )
        .into_response())
}
