//! Catalog database access
//!
//! Rendering only ever reads the catalog. [`init`] exists for local setup
//! and fixtures.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

use crate::{Error, Result};

pub mod init;

pub use init::{create_projects_table, init_catalog, upsert_project};

/// Connect to the catalog in read-only mode
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::Config(format!(
            "Catalog not found: {}",
            db_path.display()
        )));
    }

    // Read-only, but not immutable: the catalog owner keeps writing rows
    // while we serve, and each lookup must see the current file.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    // Verify read-only by attempting a write (should fail)
    #[cfg(debug_assertions)]
    {
        let write_test = sqlx::query("CREATE TABLE _test_write (id INTEGER)")
            .execute(&pool)
            .await;
        if write_test.is_ok() {
            return Err(Error::Config(format!(
                "Catalog connection is not read-only: {}",
                db_path.display()
            )));
        }
    }

    Ok(pool)
}
