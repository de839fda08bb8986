use anyhow::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::PathBuf;
use tokio::fs;

/// Open the SeaORM connection shared by the repositories and the audit sink.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    Ok(Database::connect(database_url).await?)
}

/// Apply the SQL files under `migrations/`, in filename order, once each.
/// Applied filenames are recorded in `schema_migrations` so a restart skips
/// files that already ran.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    let backend = conn.get_database_backend();
    conn.execute(Statement::from_string(
        backend,
        "CREATE TABLE IF NOT EXISTS schema_migrations (\
            filename TEXT PRIMARY KEY,\
            applied_at TIMESTAMPTZ NOT NULL DEFAULT now()\
        )",
    ))
    .await?;

    for file in migration_files().await? {
        let Some(filename) = file
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
        else {
            continue;
        };

        let applied = conn
            .query_one(Statement::from_sql_and_values(
                backend,
                "SELECT filename FROM schema_migrations WHERE filename = $1",
                [filename.clone().into()],
            ))
            .await?;
        if applied.is_some() {
            continue;
        }

        let sql = fs::read_to_string(&file).await?;
        // Postgres prepared statements hold a single command, so the file
        // runs one statement at a time.
        for stmt in sql.split(';') {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            conn.execute(Statement::from_string(backend, format!("{stmt};")))
                .await?;
        }

        conn.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO schema_migrations (filename) VALUES ($1)",
            [filename.clone().into()],
        ))
        .await?;
        tracing::info!(migration = %filename, "applied");
    }

    Ok(())
}

async fn migration_files() -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut entries = fs::read_dir("migrations").await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
