use migration::Migrator;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::path::Path;

/// Creates a fresh SQLite database inside `dir` and applies every migration.
///
/// Keep the directory alive (e.g. a `TempDir`) for as long as the connection is used.
pub async fn setup_test_db(dir: &Path) -> DatabaseConnection {
    let path = dir.join("test.db");
    let db = crate::connect(&path.to_string_lossy())
        .await
        .expect("Failed to connect to test db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}
