//! Generated static record file
//!
//! An external packaging step writes a small TOML file naming the current
//! source archive and its date. The file is authoritative until regenerated;
//! it is read once when the provider is constructed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::RecordProvider;
use crate::record::{ProjectId, ProjectRecord};
use crate::{Error, Result};

/// On-disk shape of the generated record file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticRecordFile {
    pub source_package_filename: String,
    pub source_package_date: String,
    /// Restricts the file to one project id when present
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub binaries: BTreeMap<String, String>,
}

impl StaticRecordFile {
    /// Parse record file contents
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| {
            Error::Config(format!("Invalid record file {}: {}", origin.display(), e))
        })
    }

    pub fn into_record(self) -> ProjectRecord {
        ProjectRecord {
            name: self.name,
            source: Some(self.source_package_filename),
            binaries: self.binaries,
            version: self.version,
            release_date: Some(self.source_package_date),
        }
    }
}

/// Serves the record loaded from a generated file
#[derive(Debug, Clone)]
pub struct StaticFileProvider {
    project_id: Option<ProjectId>,
    record: ProjectRecord,
}

impl StaticFileProvider {
    /// Read and parse the record file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read record file {}: {}", path.display(), e))
        })?;
        let file = StaticRecordFile::parse(&text, path)?;
        debug!(
            "Loaded record file {} ({} dated {})",
            path.display(),
            file.source_package_filename,
            file.source_package_date
        );

        Ok(Self {
            project_id: file.project_id,
            record: file.into_record(),
        })
    }

    pub fn record(&self) -> &ProjectRecord {
        &self.record
    }
}

#[async_trait]
impl RecordProvider for StaticFileProvider {
    fn source_id(&self) -> &'static str {
        "static-file"
    }

    async fn lookup(&self, id: ProjectId) -> Result<Option<ProjectRecord>> {
        match self.project_id {
            Some(file_id) if file_id != id => Ok(None),
            _ => Ok(Some(self.record.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_record_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const GENERATED: &str = r#"
# Generated with updated filenames
source_package_filename = "inscribist-7.tar.gz"
source_package_date = "2014-01-01"
"#;

    #[test]
    fn test_load_generated_file() {
        let file = write_record_file(GENERATED);
        let provider = StaticFileProvider::load(file.path()).unwrap();

        let record = provider.record();
        assert_eq!(record.source.as_deref(), Some("inscribist-7.tar.gz"));
        assert_eq!(record.release_date.as_deref(), Some("2014-01-01"));
        assert!(record.name.is_none());
        assert!(record.binaries.is_empty());
    }

    #[test]
    fn test_load_is_idempotent() {
        let file = write_record_file(GENERATED);

        let first = StaticFileProvider::load(file.path()).unwrap();
        let second = StaticFileProvider::load(file.path()).unwrap();
        assert_eq!(first.record(), second.record());
    }

    #[test]
    fn test_optional_keys_populate_record() {
        let file = write_record_file(
            r#"
source_package_filename = "inscribist-7.tar.gz"
source_package_date = "2014-01-01"
name = "Inscribist"
version = "7"

[binaries]
win32 = "inscribist-7-win32.zip"
"#,
        );
        let record = StaticFileProvider::load(file.path()).unwrap().record().clone();

        assert_eq!(record.name.as_deref(), Some("Inscribist"));
        assert_eq!(record.version.as_deref(), Some("7"));
        assert_eq!(
            record.binaries.get("win32").map(String::as_str),
            Some("inscribist-7-win32.zip")
        );
    }

    #[test]
    fn test_missing_required_key_is_config_error() {
        let file = write_record_file("source_package_filename = \"inscribist-7.tar.gz\"\n");
        assert!(matches!(
            StaticFileProvider::load(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_unreadable_file_is_config_error() {
        let result = StaticFileProvider::load(Path::new("/nonexistent/zpage/settings.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_lookup_respects_project_id() {
        let file = write_record_file(
            r#"
project_id = 3
source_package_filename = "inscribist-7.tar.gz"
source_package_date = "2014-01-01"
"#,
        );
        let provider = StaticFileProvider::load(file.path()).unwrap();

        assert!(provider.lookup(3).await.unwrap().is_some());
        assert!(provider.lookup(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_without_project_id_matches_any() {
        let file = write_record_file(GENERATED);
        let provider = StaticFileProvider::load(file.path()).unwrap();

        assert!(provider.lookup(1).await.unwrap().is_some());
        assert!(provider.lookup(42).await.unwrap().is_some());
    }
}
