pub mod health;
pub mod ingredient;
pub mod recipe;
pub mod relation;
pub mod response;
pub mod shopping_list;
pub mod tag;
pub mod user;

use serde::de::DeserializeOwned;

use pantry_domain::id::UserId;

use crate::domain::edge::{Favorite, ShoppingCart, Subscription};
use crate::domain::viewer::ViewerContext;
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::presentation::LoadViewerContextUseCase;

/// Parse a raw query string with `serde_qs`. Absent or empty queries yield
/// the default value.
pub(crate) fn parse_query<T>(raw: Option<&str>) -> Result<T, RecipesServiceError>
where
    T: DeserializeOwned + Default,
{
    match raw {
        Some(raw) if !raw.is_empty() => serde_qs::from_str(raw)
            .map_err(|e| RecipesServiceError::validation(format!("invalid query string: {e}"))),
        _ => Ok(T::default()),
    }
}

/// Parse a boolean query flag given as `1`/`0` or `true`/`false`.
pub(crate) fn parse_flag(name: &str, value: Option<&str>) -> Result<bool, RecipesServiceError> {
    match value {
        None | Some("") | Some("0") | Some("false") => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some(other) => Err(RecipesServiceError::validation(format!(
            "{name} must be 0, 1, true or false, got {other:?}"
        ))),
    }
}

pub(crate) async fn viewer_context(
    state: &AppState,
    viewer: Option<UserId>,
) -> Result<ViewerContext, RecipesServiceError> {
    let usecase = LoadViewerContextUseCase {
        favorites: state.edge_repo::<Favorite>(),
        cart: state.edge_repo::<ShoppingCart>(),
        subscriptions: state.edge_repo::<Subscription>(),
    };
    usecase.execute(viewer).await
}
