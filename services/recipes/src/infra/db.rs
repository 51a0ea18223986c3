use std::collections::HashSet;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr,
    sea_query::{Expr, Func},
};

use pantry_domain::id::{IngredientId, TagId, UserId};
use pantry_domain::pagination::PageRequest;
use pantry_recipes_schema::{ingredients, subscriptions, tags, users};

use crate::domain::repository::{IngredientRepository, TagRepository, UserRepository};
use crate::domain::types::{Ingredient, NewUser, Tag, User};
use crate::error::RecipesServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<User, RecipesServiceError> {
        let inserted = users::ActiveModel {
            id: Set(user.id.0),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            recipes_count: Set(0),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await;
        match inserted {
            Ok(model) => Ok(user_from_model(model)),
            Err(e) if is_unique_violation(&e) => Err(RecipesServiceError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RecipesServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn list_followed(
        &self,
        follower: UserId,
        page: PageRequest,
    ) -> Result<Vec<User>, RecipesServiceError> {
        let models = users::Entity::find()
            .join(JoinType::InnerJoin, subscriptions::Relation::Author.def().rev())
            .filter(subscriptions::Column::UserId.eq(follower.0))
            .order_by_desc(subscriptions::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list followed authors")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

pub(crate) fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        recipes_count: model.recipes_count,
        created_at: model.created_at,
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, RecipesServiceError> {
        let model = tags::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn existing(&self, ids: &[TagId]) -> Result<HashSet<TagId>, RecipesServiceError> {
        let found: Vec<i32> = tags::Entity::find()
            .select_only()
            .column(tags::Column::Id)
            .filter(tags::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .into_tuple()
            .all(&self.db)
            .await
            .context("check tag ids")?;
        Ok(found.into_iter().map(TagId).collect())
    }
}

pub(crate) fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: TagId(model.id),
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn list(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(ingredients::Column::Name)))
                    .like(prefix_pattern(prefix)),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn existing(
        &self,
        ids: &[IngredientId],
    ) -> Result<HashSet<IngredientId>, RecipesServiceError> {
        let found: Vec<i32> = ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Id)
            .filter(ingredients::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .into_tuple()
            .all(&self.db)
            .await
            .context("check ingredient ids")?;
        Ok(found.into_iter().map(IngredientId).collect())
    }
}

pub(crate) fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: IngredientId(model.id),
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

/// Lower-cased `LIKE` pattern matching names that start with `prefix`.
/// `%`, `_` and `\` in the prefix match literally.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
