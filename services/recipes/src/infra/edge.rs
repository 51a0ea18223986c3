//! Generic sea-orm store for user-owned edges.

use std::collections::HashSet;
use std::marker::PhantomData;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, sea_query::OnConflict,
};

use pantry_domain::id::{RecipeId, UserId};
use pantry_recipes_schema::{favorites, shopping_carts, subscriptions};

use crate::domain::edge::{EdgeKind, Favorite, ShoppingCart, Subscription};
use crate::domain::repository::EdgeRepository;
use crate::error::RecipesServiceError;

/// Maps an edge kind onto its table. The composite primary key of the table
/// is `(owner_column, target_column)`.
pub trait EdgeTable: EdgeKind {
    type Entity: EntityTrait;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + Send + 'static;

    fn owner_column() -> <Self::Entity as EntityTrait>::Column;

    fn target_column() -> <Self::Entity as EntityTrait>::Column;

    fn target_value(target: Self::Target) -> sea_orm::Value;

    fn target_of(model: &<Self::Entity as EntityTrait>::Model) -> Self::Target;

    fn new_row(
        owner: UserId,
        target: Self::Target,
        created_at: DateTime<Utc>,
    ) -> Self::ActiveModel;
}

impl EdgeTable for Favorite {
    type Entity = favorites::Entity;
    type ActiveModel = favorites::ActiveModel;

    fn owner_column() -> favorites::Column {
        favorites::Column::UserId
    }

    fn target_column() -> favorites::Column {
        favorites::Column::RecipeId
    }

    fn target_value(target: RecipeId) -> sea_orm::Value {
        target.0.into()
    }

    fn target_of(model: &favorites::Model) -> RecipeId {
        RecipeId(model.recipe_id)
    }

    fn new_row(
        owner: UserId,
        target: RecipeId,
        created_at: DateTime<Utc>,
    ) -> favorites::ActiveModel {
        favorites::ActiveModel {
            user_id: Set(owner.0),
            recipe_id: Set(target.0),
            created_at: Set(created_at),
        }
    }
}

impl EdgeTable for ShoppingCart {
    type Entity = shopping_carts::Entity;
    type ActiveModel = shopping_carts::ActiveModel;

    fn owner_column() -> shopping_carts::Column {
        shopping_carts::Column::UserId
    }

    fn target_column() -> shopping_carts::Column {
        shopping_carts::Column::RecipeId
    }

    fn target_value(target: RecipeId) -> sea_orm::Value {
        target.0.into()
    }

    fn target_of(model: &shopping_carts::Model) -> RecipeId {
        RecipeId(model.recipe_id)
    }

    fn new_row(
        owner: UserId,
        target: RecipeId,
        created_at: DateTime<Utc>,
    ) -> shopping_carts::ActiveModel {
        shopping_carts::ActiveModel {
            user_id: Set(owner.0),
            recipe_id: Set(target.0),
            created_at: Set(created_at),
        }
    }
}

impl EdgeTable for Subscription {
    type Entity = subscriptions::Entity;
    type ActiveModel = subscriptions::ActiveModel;

    fn owner_column() -> subscriptions::Column {
        subscriptions::Column::UserId
    }

    fn target_column() -> subscriptions::Column {
        subscriptions::Column::AuthorId
    }

    fn target_value(target: UserId) -> sea_orm::Value {
        target.0.into()
    }

    fn target_of(model: &subscriptions::Model) -> UserId {
        UserId(model.author_id)
    }

    fn new_row(
        owner: UserId,
        target: UserId,
        created_at: DateTime<Utc>,
    ) -> subscriptions::ActiveModel {
        subscriptions::ActiveModel {
            user_id: Set(owner.0),
            author_id: Set(target.0),
            created_at: Set(created_at),
        }
    }
}

// ── Edge repository ──────────────────────────────────────────────────────────

pub struct DbEdgeRepository<K> {
    pub db: DatabaseConnection,
    _kind: PhantomData<fn() -> K>,
}

impl<K> DbEdgeRepository<K> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _kind: PhantomData,
        }
    }
}

impl<K> Clone for DbEdgeRepository<K> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

impl<K> EdgeRepository<K> for DbEdgeRepository<K>
where
    K: EdgeTable,
    <K::Entity as EntityTrait>::Model: IntoActiveModel<K::ActiveModel>,
{
    async fn insert(&self, owner: UserId, target: K::Target) -> Result<bool, RecipesServiceError> {
        let inserted = K::Entity::insert(K::new_row(owner, target, Utc::now()))
            .on_conflict(
                OnConflict::columns([K::owner_column(), K::target_column()])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .with_context(|| format!("insert {} edge", K::NAME))?;
        Ok(inserted > 0)
    }

    async fn delete(&self, owner: UserId, target: K::Target) -> Result<bool, RecipesServiceError> {
        let result = K::Entity::delete_many()
            .filter(K::owner_column().eq(owner.0))
            .filter(K::target_column().eq(K::target_value(target)))
            .exec(&self.db)
            .await
            .with_context(|| format!("delete {} edge", K::NAME))?;
        Ok(result.rows_affected > 0)
    }

    async fn targets(&self, owner: UserId) -> Result<HashSet<K::Target>, RecipesServiceError> {
        let rows = K::Entity::find()
            .filter(K::owner_column().eq(owner.0))
            .all(&self.db)
            .await
            .with_context(|| format!("list {} edges", K::NAME))?;
        Ok(rows.iter().map(K::target_of).collect())
    }
}
