//! Record providers
//!
//! A provider answers one question: what is the record for this project id?
//! The renderer only sees the [`RecordProvider`] trait, so the catalog, a
//! generated record file, literal config values and test fixtures are
//! interchangeable.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::record::{ProjectId, ProjectRecord};
use crate::{Error, Result};

mod catalog;
mod literal;
mod static_file;

pub use catalog::{CatalogProvider, CATALOG_PLATFORM};
pub use literal::LiteralProvider;
pub use static_file::{StaticFileProvider, StaticRecordFile};

/// Read-only lookup of a project record by identifier
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Provider identifier for logs (e.g. "catalog", "static-file")
    fn source_id(&self) -> &'static str;

    /// Look up the record for `id`
    ///
    /// # Returns
    /// * `Ok(Some(record))` - record found (fields may still be absent)
    /// * `Ok(None)` - no record for this id
    /// * `Err(_)` - the provider itself failed (database, I/O)
    async fn lookup(&self, id: ProjectId) -> Result<Option<ProjectRecord>>;
}

/// Look up `id`, treating absence as [`Error::RecordNotFound`]
pub async fn resolve_record(provider: &dyn RecordProvider, id: ProjectId) -> Result<ProjectRecord> {
    debug!(source = provider.source_id(), id, "Looking up project record");
    provider
        .lookup(id)
        .await?
        .ok_or(Error::RecordNotFound(id))
}

/// Which provider variant a deployment uses
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderSource {
    /// SQLite catalog, opened read-only
    Catalog(PathBuf),
    /// Generated TOML record file
    StaticFile(PathBuf),
    /// Values written directly into the site config
    Literal(ProjectRecord),
}

impl ProviderSource {
    /// Whether records come from the request-time catalog
    pub fn is_catalog(&self) -> bool {
        matches!(self, ProviderSource::Catalog(_))
    }
}

/// Construct the provider for `source`
pub async fn open_provider(source: &ProviderSource) -> Result<Arc<dyn RecordProvider>> {
    let provider: Arc<dyn RecordProvider> = match source {
        ProviderSource::Catalog(path) => {
            info!("Record provider: catalog {}", path.display());
            Arc::new(CatalogProvider::open(path).await?)
        }
        ProviderSource::StaticFile(path) => {
            info!("Record provider: static record file {}", path.display());
            Arc::new(StaticFileProvider::load(path)?)
        }
        ProviderSource::Literal(record) => {
            info!("Record provider: literal values from configuration");
            Arc::new(LiteralProvider::new(record.clone()))
        }
    };
    Ok(provider)
}
