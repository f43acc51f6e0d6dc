use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::error::AppResult;

/// Sample rows inserted on first start against an empty table.
pub const SEED_MOVIES: [(&str, i32); 4] = [
    ("The Matrix", 50),
    ("Inception", 40),
    ("Interstellar", 45),
    ("The Dark Knight", 60),
];

/// Migrations are tracked by the migrator, so this is safe to run on
/// every start.
pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}
