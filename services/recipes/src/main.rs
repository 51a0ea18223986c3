use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use pantry_core::config::Config;
use pantry_core::tracing::init_tracing;

use pantry_recipes::config::RecipesConfig;
use pantry_recipes::router::build_router;
use pantry_recipes::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = RecipesConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        shopping_list_title: Arc::from(config.shopping_list_title),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.recipes_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("recipes service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
