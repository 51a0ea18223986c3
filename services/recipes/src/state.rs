use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::db::{DbIngredientRepository, DbTagRepository, DbUserRepository};
use crate::infra::document::PlainTextRenderer;
use crate::infra::edge::DbEdgeRepository;
use crate::infra::recipe::{DbRecipeRepository, DbShoppingListRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub shopping_list_title: Arc<str>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn shopping_list_repo(&self) -> DbShoppingListRepository {
        DbShoppingListRepository {
            db: self.db.clone(),
        }
    }

    pub fn edge_repo<K>(&self) -> DbEdgeRepository<K> {
        DbEdgeRepository::new(self.db.clone())
    }

    pub fn document_renderer(&self) -> PlainTextRenderer {
        PlainTextRenderer
    }
}
