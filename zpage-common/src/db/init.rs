//! Catalog creation for local setup and test fixtures
//!
//! The production catalog is owned elsewhere; these helpers build a catalog
//! with the same `projects` shape.

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

use crate::provider::CATALOG_PLATFORM;
use crate::record::{ProjectId, ProjectRecord};
use crate::Result;

/// Open (creating if needed) a writable catalog at `db_path`
pub async fn init_catalog(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new catalog: {}", db_path.display());
    } else {
        info!("Opened existing catalog: {}", db_path.display());
    }

    create_projects_table(&pool).await?;

    Ok(pool)
}

/// Create the `projects` table (idempotent)
pub async fn create_projects_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY,
            name TEXT,
            source TEXT,
            win32 TEXT,
            version TEXT,
            lastdate TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert or replace the row for `id`
pub async fn upsert_project(pool: &SqlitePool, id: ProjectId, record: &ProjectRecord) -> Result<()> {
    sqlx::query(
        "INSERT OR REPLACE INTO projects (id, name, source, win32, version, lastdate)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(record.name.as_deref())
    .bind(record.source.as_deref())
    .bind(record.binaries.get(CATALOG_PLATFORM).map(String::as_str))
    .bind(record.version.as_deref())
    .bind(record.release_date.as_deref())
    .execute(pool)
    .await?;

    Ok(())
}
