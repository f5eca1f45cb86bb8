//! Project record model and field bindings
//!
//! A [`ProjectRecord`] is what a record provider hands to the renderer. Every
//! attribute is optional here: which fields are actually required is decided by
//! the template being rendered, not by the record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier a project is looked up by (the catalog's integer key)
pub type ProjectId = i64;

/// Placeholder name for the display name
pub const FIELD_NAME: &str = "name";
/// Placeholder name for the source-archive reference
pub const FIELD_SOURCE: &str = "source";
/// Placeholder name for the version label
pub const FIELD_VERSION: &str = "version";
/// Placeholder name for the release date
pub const FIELD_LASTDATE: &str = "lastdate";

/// Per-release metadata for one project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub name: Option<String>,
    /// Source archive URL or path
    #[serde(default)]
    pub source: Option<String>,
    /// Binary URL or path, keyed by platform (e.g. `win32`)
    #[serde(default)]
    pub binaries: BTreeMap<String, String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Release date, kept as the provider supplied it
    #[serde(default, alias = "lastdate")]
    pub release_date: Option<String>,
}

impl ProjectRecord {
    /// Field mapping for template substitution; absent fields produce no binding
    pub fn bindings(&self) -> Bindings {
        let mut bindings: Bindings = self
            .binaries
            .iter()
            .map(|(platform, reference)| (platform.as_str(), reference.as_str()))
            .collect();
        // Named fields win over a platform key that happens to collide
        bindings.insert_opt(FIELD_NAME, self.name.as_deref());
        bindings.insert_opt(FIELD_SOURCE, self.source.as_deref());
        bindings.insert_opt(FIELD_VERSION, self.version.as_deref());
        bindings.insert_opt(FIELD_LASTDATE, self.release_date.as_deref());
        bindings
    }
}

/// Ordered mapping from placeholder name to substituted value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(BTreeMap<String, String>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    fn insert_opt(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.insert(field, value);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
