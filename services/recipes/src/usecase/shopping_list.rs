use std::collections::HashMap;

use anyhow::Context as _;

use pantry_domain::id::UserId;

use crate::domain::repository::{DocumentRenderer, ShoppingListRepository};
use crate::domain::types::{IngredientLine, RenderedDocument, ShoppingListItem};
use crate::error::RecipesServiceError;

/// Group lines by `(name, measurement_unit)` and sum their amounts.
///
/// Items come out in first-encountered order with 1-based indexes. The same
/// ingredient in two units stays two items. A negative amount is a storage
/// fault and fails the whole list.
pub fn aggregate_ingredients<I>(lines: I) -> Result<Vec<ShoppingListItem>, RecipesServiceError>
where
    I: IntoIterator<Item = IngredientLine>,
{
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    let mut items: Vec<ShoppingListItem> = Vec::new();

    for line in lines {
        let amount = u64::try_from(line.amount).with_context(|| {
            format!("negative amount {} for {}", line.amount, line.name)
        })?;
        let key = (line.name, line.measurement_unit);
        match positions.get(&key) {
            Some(&pos) => items[pos].total_amount += amount,
            None => {
                positions.insert(key.clone(), items.len());
                items.push(ShoppingListItem {
                    index: items.len() + 1,
                    name: key.0,
                    measurement_unit: key.1,
                    total_amount: amount,
                });
            }
        }
    }
    Ok(items)
}

/// `"{index}. {name} ({unit}) - {total}"`, one line per item.
pub fn format_lines(items: &[ShoppingListItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            format!(
                "{}. {} ({}) - {}",
                item.index, item.name, item.measurement_unit, item.total_amount
            )
        })
        .collect()
}

// ── AggregateShoppingList ────────────────────────────────────────────────────

pub struct AggregateShoppingListUseCase<R: ShoppingListRepository> {
    pub repo: R,
}

impl<R: ShoppingListRepository> AggregateShoppingListUseCase<R> {
    pub async fn execute(
        &self,
        owner: UserId,
    ) -> Result<Vec<ShoppingListItem>, RecipesServiceError> {
        let lines = self.repo.cart_lines(owner).await?;
        aggregate_ingredients(lines)
    }
}

// ── DownloadShoppingList ─────────────────────────────────────────────────────

pub struct DownloadShoppingListUseCase<R: ShoppingListRepository, D: DocumentRenderer> {
    pub repo: R,
    pub renderer: D,
    pub title: String,
}

impl<R: ShoppingListRepository, D: DocumentRenderer> DownloadShoppingListUseCase<R, D> {
    pub async fn execute(&self, owner: UserId) -> Result<RenderedDocument, RecipesServiceError> {
        let items = aggregate_ingredients(self.repo.cart_lines(owner).await?)?;
        tracing::debug!(user_id = %owner, items = items.len(), "rendering shopping list");
        self.renderer.render(&self.title, &format_lines(&items))
    }
}
