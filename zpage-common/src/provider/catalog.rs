//! Catalog-backed record lookup
//!
//! The catalog is a shared multi-project SQLite database owned by someone
//! else. We open it read-only and issue exactly one single-row SELECT per
//! lookup.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::RecordProvider;
use crate::db;
use crate::record::{ProjectId, ProjectRecord};
use crate::Result;

/// Platform whose binary reference the catalog stores in its own column
pub const CATALOG_PLATFORM: &str = "win32";

type CatalogRow = (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

/// Looks up project rows in the shared catalog
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    pool: SqlitePool,
}

impl CatalogProvider {
    /// Wrap an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the catalog file read-only
    pub async fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(db::connect_readonly(path).await?))
    }
}

#[async_trait]
impl RecordProvider for CatalogProvider {
    fn source_id(&self) -> &'static str {
        "catalog"
    }

    async fn lookup(&self, id: ProjectId) -> Result<Option<ProjectRecord>> {
        let row = sqlx::query_as::<_, CatalogRow>(
            "SELECT name, source, win32, version, lastdate FROM projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((name, source, win32, version, lastdate)) = row else {
            debug!(id, "No catalog row");
            return Ok(None);
        };

        let mut binaries = BTreeMap::new();
        if let Some(reference) = win32 {
            binaries.insert(CATALOG_PLATFORM.to_string(), reference);
        }

        Ok(Some(ProjectRecord {
            name,
            source,
            binaries,
            version,
            release_date: lastdate,
        }))
    }
}
