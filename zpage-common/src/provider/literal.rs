//! Hand-edited literal values

use async_trait::async_trait;

use super::RecordProvider;
use crate::record::{ProjectId, ProjectRecord};
use crate::Result;

/// Serves one record supplied directly (no lookup, no I/O)
#[derive(Debug, Clone)]
pub struct LiteralProvider {
    record: ProjectRecord,
}

impl LiteralProvider {
    pub fn new(record: ProjectRecord) -> Self {
        Self { record }
    }
}

#[async_trait]
impl RecordProvider for LiteralProvider {
    fn source_id(&self) -> &'static str {
        "literal"
    }

    /// The deployment renders exactly one project, so any id resolves
    async fn lookup(&self, _id: ProjectId) -> Result<Option<ProjectRecord>> {
        Ok(Some(self.record.clone()))
    }
}
