use serde::Deserialize;

use pantry_core::config::Config;

/// Recipes service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct RecipesConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `RECIPES_PORT`.
    #[serde(default = "default_port")]
    pub recipes_port: u16,
    /// Title printed at the top of the downloadable shopping list.
    /// Env var: `SHOPPING_LIST_TITLE`.
    #[serde(default = "default_shopping_list_title")]
    pub shopping_list_title: String,
}

fn default_port() -> u16 {
    3114
}

fn default_shopping_list_title() -> String {
    "Shopping list".to_owned()
}

impl Config for RecipesConfig {}
