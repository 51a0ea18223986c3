use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Statement, TransactionTrait,
    sea_query::{Expr, Query},
};
use uuid::Uuid;

use pantry_domain::id::{RecipeId, TagId, UserId};
use pantry_domain::pagination::PageRequest;
use pantry_recipes_schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts, tags, users,
};

use crate::domain::repository::{RecipeRepository, ShoppingListRepository};
use crate::domain::types::{
    IngredientLine, IngredientSpec, NewRecipe, Recipe, RecipeChanges, RecipeFilter,
    RecipeIngredient, RecipeSummary, Tag, User,
};
use crate::error::RecipesServiceError;
use crate::infra::db::{ingredient_from_model, tag_from_model, user_from_model};

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipesServiceError> {
        let Some(model) = recipes::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find recipe by id")?
        else {
            return Ok(None);
        };
        Ok(load_recipes(&self.db, vec![model]).await?.pop())
    }

    async fn find_summary(
        &self,
        id: RecipeId,
    ) -> Result<Option<RecipeSummary>, RecipesServiceError> {
        let model = recipes::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find recipe summary")?;
        Ok(model.map(summary_from_model))
    }

    async fn find_author(&self, id: RecipeId) -> Result<Option<UserId>, RecipesServiceError> {
        let author: Option<Uuid> = recipes::Entity::find_by_id(id.0)
            .select_only()
            .column(recipes::Column::AuthorId)
            .into_tuple()
            .one(&self.db)
            .await
            .context("find recipe author")?;
        Ok(author.map(UserId))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let models = filtered(filter)
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list recipes")?;
        load_recipes(&self.db, models).await
    }

    async fn summaries_by_authors(
        &self,
        authors: &[UserId],
        limit: Option<u64>,
    ) -> Result<HashMap<UserId, Vec<RecipeSummary>>, RecipesServiceError> {
        #[derive(Debug, FromQueryResult)]
        struct RankedRecipeRow {
            id: i32,
            author_id: Uuid,
            name: String,
            image: String,
            cooking_time: i32,
        }

        if authors.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = limit.map_or(i64::MAX, |l| i64::try_from(l).unwrap_or(i64::MAX));
        let mut values: Vec<sea_orm::Value> = vec![limit.into()];
        values.extend(authors.iter().map(|a| a.0.into()));

        let rows = RankedRecipeRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            ranked_summaries_sql(authors.len()),
            values,
        ))
        .all(&self.db)
        .await
        .context("list recipes by authors")?;

        let mut grouped: HashMap<UserId, Vec<RecipeSummary>> = HashMap::new();
        for row in rows {
            grouped
                .entry(UserId(row.author_id))
                .or_default()
                .push(RecipeSummary {
                    id: RecipeId(row.id),
                    name: row.name,
                    image: row.image,
                    cooking_time: row.cooking_time,
                });
        }
        Ok(grouped)
    }

    async fn create(
        &self,
        author: UserId,
        recipe: &NewRecipe,
    ) -> Result<RecipeId, RecipesServiceError> {
        let txn = self.db.begin().await.context("begin recipe create")?;
        lock_author(&txn, author).await?;

        let fields = &recipe.fields;
        let created = recipes::ActiveModel {
            author_id: Set(author.0),
            name: Set(fields.name.clone()),
            image: Set(fields.image.clone()),
            text: Set(fields.text.clone()),
            cooking_time: Set(fields.cooking_time),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("insert recipe")?;

        insert_tags(&txn, created.id, &recipe.tag_ids).await?;
        insert_ingredients(&txn, created.id, &recipe.ingredients).await?;
        refresh_recipes_count(&txn, author).await?;

        txn.commit().await.context("commit recipe create")?;
        Ok(RecipeId(created.id))
    }

    async fn update(
        &self,
        id: RecipeId,
        author: UserId,
        changes: &RecipeChanges,
    ) -> Result<(), RecipesServiceError> {
        let txn = self.db.begin().await.context("begin recipe update")?;
        lock_author(&txn, author).await?;
        let owned = recipes::Entity::find_by_id(id.0)
            .filter(recipes::Column::AuthorId.eq(author.0))
            .lock_exclusive()
            .one(&txn)
            .await
            .context("lock recipe")?;
        if owned.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }

        let patch = &changes.patch;
        let mut recipe = recipes::ActiveModel {
            id: Unchanged(id.0),
            ..Default::default()
        };
        if let Some(ref name) = patch.name {
            recipe.name = Set(name.clone());
        }
        if let Some(ref image) = patch.image {
            recipe.image = Set(image.clone());
        }
        if let Some(ref text) = patch.text {
            recipe.text = Set(text.clone());
        }
        if let Some(cooking_time) = patch.cooking_time {
            recipe.cooking_time = Set(cooking_time);
        }
        if recipe.is_changed() {
            recipe.update(&txn).await.context("update recipe fields")?;
        }

        recipe_tags::Entity::delete_many()
            .filter(recipe_tags::Column::RecipeId.eq(id.0))
            .exec(&txn)
            .await
            .context("clear recipe tags")?;
        insert_tags(&txn, id.0, &changes.tag_ids).await?;

        recipe_ingredients::Entity::delete_many()
            .filter(recipe_ingredients::Column::RecipeId.eq(id.0))
            .exec(&txn)
            .await
            .context("clear recipe ingredients")?;
        insert_ingredients(&txn, id.0, &changes.ingredients).await?;

        refresh_recipes_count(&txn, author).await?;

        txn.commit().await.context("commit recipe update")?;
        Ok(())
    }

    async fn delete(&self, id: RecipeId, author: UserId) -> Result<bool, RecipesServiceError> {
        let txn = self.db.begin().await.context("begin recipe delete")?;
        lock_author(&txn, author).await?;
        let result = recipes::Entity::delete_many()
            .filter(recipes::Column::Id.eq(id.0))
            .filter(recipes::Column::AuthorId.eq(author.0))
            .exec(&txn)
            .await
            .context("delete recipe")?;
        refresh_recipes_count(&txn, author).await?;
        txn.commit().await.context("commit recipe delete")?;
        Ok(result.rows_affected > 0)
    }
}

/// Base select with every filter applied. Filters combine with AND; the tag
/// filter matches any of the given slugs.
fn filtered(filter: &RecipeFilter) -> Select<recipes::Entity> {
    let mut query = recipes::Entity::find();
    if let Some(author) = filter.author {
        query = query.filter(recipes::Column::AuthorId.eq(author.0));
    }
    if !filter.tag_slugs.is_empty() {
        query = query.filter(
            recipes::Column::Id.in_subquery(
                Query::select()
                    .column(recipe_tags::Column::RecipeId)
                    .from(recipe_tags::Entity)
                    .and_where(
                        Expr::col(recipe_tags::Column::TagId).in_subquery(
                            Query::select()
                                .column(tags::Column::Id)
                                .from(tags::Entity)
                                .and_where(
                                    Expr::col(tags::Column::Slug)
                                        .is_in(filter.tag_slugs.iter().cloned()),
                                )
                                .to_owned(),
                        ),
                    )
                    .to_owned(),
            ),
        );
    }
    if let Some(user) = filter.favorited_by {
        query = query.filter(
            recipes::Column::Id.in_subquery(
                Query::select()
                    .column(favorites::Column::RecipeId)
                    .from(favorites::Entity)
                    .and_where(Expr::col(favorites::Column::UserId).eq(user.0))
                    .to_owned(),
            ),
        );
    }
    if let Some(user) = filter.in_cart_of {
        query = query.filter(
            recipes::Column::Id.in_subquery(
                Query::select()
                    .column(shopping_carts::Column::RecipeId)
                    .from(shopping_carts::Entity)
                    .and_where(Expr::col(shopping_carts::Column::UserId).eq(user.0))
                    .to_owned(),
            ),
        );
    }
    query
}

async fn insert_tags<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
    tag_ids: &[TagId],
) -> Result<(), RecipesServiceError> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    recipe_tags::Entity::insert_many(tag_ids.iter().map(|tag| recipe_tags::ActiveModel {
        recipe_id: Set(recipe_id),
        tag_id: Set(tag.0),
    }))
    .exec_without_returning(db)
    .await
    .context("insert recipe tags")?;
    Ok(())
}

/// One row per spec, in spec order.
async fn insert_ingredients<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
    specs: &[IngredientSpec],
) -> Result<(), RecipesServiceError> {
    if specs.is_empty() {
        return Ok(());
    }
    recipe_ingredients::Entity::insert_many(specs.iter().map(|spec| {
        recipe_ingredients::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(spec.ingredient_id.0),
            amount: Set(spec.amount),
            ..Default::default()
        }
    }))
    .exec_without_returning(db)
    .await
    .context("insert recipe ingredients")?;
    Ok(())
}

/// Row-lock the author for the rest of the transaction. Every recipe write
/// takes this lock first, so `refresh_recipes_count` never counts while
/// another write by the same author is uncommitted.
async fn lock_author<C: ConnectionTrait>(
    db: &C,
    author: UserId,
) -> Result<(), RecipesServiceError> {
    users::Entity::find_by_id(author.0)
        .lock_exclusive()
        .one(db)
        .await
        .context("lock recipe author")?
        .ok_or(RecipesServiceError::UserNotFound)?;
    Ok(())
}

/// Recount the author's recipes and store the result on the user row.
/// Callers hold the author lock.
pub(crate) async fn refresh_recipes_count<C: ConnectionTrait>(
    db: &C,
    author: UserId,
) -> Result<(), RecipesServiceError> {
    let count = recipes::Entity::find()
        .filter(recipes::Column::AuthorId.eq(author.0))
        .count(db)
        .await
        .context("count author recipes")?;
    let count = i32::try_from(count).context("recipes_count overflow")?;
    users::Entity::update_many()
        .col_expr(users::Column::RecipesCount, Expr::value(count))
        .filter(users::Column::Id.eq(author.0))
        .exec(db)
        .await
        .context("store recipes_count")?;
    Ok(())
}

/// Attach authors, tags and ingredient lines to recipe rows with one query
/// per relation. Output order follows `models`.
async fn load_recipes<C: ConnectionTrait>(
    db: &C,
    models: Vec<recipes::Model>,
) -> Result<Vec<Recipe>, RecipesServiceError> {
    if models.is_empty() {
        return Ok(vec![]);
    }
    let recipe_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let mut author_ids: Vec<Uuid> = models.iter().map(|m| m.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<Uuid, User> = users::Entity::find()
        .filter(users::Column::Id.is_in(author_ids))
        .all(db)
        .await
        .context("load recipe authors")?
        .into_iter()
        .map(|m| (m.id, user_from_model(m)))
        .collect();

    let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
    for (link, tag) in recipe_tags::Entity::find()
        .filter(recipe_tags::Column::RecipeId.is_in(recipe_ids.clone()))
        .order_by_asc(recipe_tags::Column::TagId)
        .find_also_related(tags::Entity)
        .all(db)
        .await
        .context("load recipe tags")?
    {
        if let Some(tag) = tag {
            tags_by_recipe
                .entry(link.recipe_id)
                .or_default()
                .push(tag_from_model(tag));
        }
    }

    let mut lines_by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
    for (line, ingredient) in recipe_ingredients::Entity::find()
        .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids))
        .order_by_asc(recipe_ingredients::Column::Id)
        .find_also_related(ingredients::Entity)
        .all(db)
        .await
        .context("load recipe ingredients")?
    {
        if let Some(ingredient) = ingredient {
            lines_by_recipe
                .entry(line.recipe_id)
                .or_default()
                .push(RecipeIngredient {
                    ingredient: ingredient_from_model(ingredient),
                    amount: line.amount,
                });
        }
    }

    models
        .into_iter()
        .map(|model| -> Result<Recipe, RecipesServiceError> {
            let author = authors.get(&model.author_id).cloned().with_context(|| {
                format!("author {} of recipe {} missing", model.author_id, model.id)
            })?;
            Ok(Recipe {
                id: RecipeId(model.id),
                author,
                tags: tags_by_recipe.remove(&model.id).unwrap_or_default(),
                ingredients: lines_by_recipe.remove(&model.id).unwrap_or_default(),
                name: model.name,
                image: model.image,
                text: model.text,
                cooking_time: model.cooking_time,
                created_at: model.created_at,
            })
        })
        .collect()
}

fn summary_from_model(model: recipes::Model) -> RecipeSummary {
    RecipeSummary {
        id: RecipeId(model.id),
        name: model.name,
        image: model.image,
        cooking_time: model.cooking_time,
    }
}

/// Newest recipes per author, `$1` per author at most. Authors bind from `$2`.
fn ranked_summaries_sql(authors: usize) -> String {
    let placeholders = (0..authors)
        .map(|i| format!("${}", i + 2))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"
    SELECT id, author_id, name, image, cooking_time
        FROM (
            SELECT r.id, r.author_id, r.name, r.image, r.cooking_time,
                   ROW_NUMBER() OVER (
                       PARTITION BY r.author_id
                       ORDER BY r.created_at DESC, r.id DESC
                   ) AS rn
                FROM recipes AS r
                WHERE r.author_id IN ({placeholders})
        ) AS ranked
        WHERE rn <= $1
        ORDER BY author_id, rn
"#
    )
}

// ── Shopping list repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbShoppingListRepository {
    pub db: DatabaseConnection,
}

const CART_LINES_SQL: &str = r#"
    SELECT i.name, i.measurement_unit, ri.amount
        FROM shopping_carts AS sc
        JOIN recipe_ingredients AS ri ON ri.recipe_id = sc.recipe_id
        JOIN ingredients AS i ON i.id = ri.ingredient_id
        WHERE sc.user_id = $1
        ORDER BY sc.created_at, sc.recipe_id, ri.id
"#;

impl ShoppingListRepository for DbShoppingListRepository {
    async fn cart_lines(&self, owner: UserId) -> Result<Vec<IngredientLine>, RecipesServiceError> {
        #[derive(Debug, FromQueryResult)]
        struct CartLineRow {
            name: String,
            measurement_unit: String,
            amount: i32,
        }

        let rows = CartLineRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            CART_LINES_SQL,
            [owner.0.into()],
        ))
        .all(&self.db)
        .await
        .context("load shopping cart lines")?;

        Ok(rows
            .into_iter()
            .map(|row| IngredientLine {
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: row.amount,
            })
            .collect())
    }
}
