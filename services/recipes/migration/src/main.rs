use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(pantry_recipes_migration::Migrator).await;
}
