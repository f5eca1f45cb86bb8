//! Site configuration loading
//!
//! Config file resolution priority order:
//! 1. Command-line argument (highest priority)
//! 2. `ZPAGE_CONFIG` environment variable
//! 3. TOML config file in the user/system config directory
//! 4. Compiled defaults (fallback)
//!
//! An explicitly named file (1 or 2) must exist and parse. A missing file at
//! tier 3 only produces a warning.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::provider::ProviderSource;
use crate::record::{ProjectId, ProjectRecord};
use crate::template::{BuiltinTemplate, Template};
use crate::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "ZPAGE_CONFIG";

/// Default listen address for `serve`
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5780";

/// Deployment configuration for one project page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// The single project this deployment renders
    pub project_id: ProjectId,
    /// SQLite catalog (request-time lookup)
    pub catalog_path: Option<PathBuf>,
    /// Generated record file (build-time values)
    pub record_file: Option<PathBuf>,
    /// Custom template file; overrides `template`
    pub template_path: Option<PathBuf>,
    /// Built-in template choice
    pub template: Option<BuiltinTemplate>,
    /// Where `build` writes the page
    pub output_path: PathBuf,
    pub bind_addr: String,
    pub log_level: String,
    /// Hand-edited literal values; takes precedence over other providers
    pub record: Option<ProjectRecord>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            project_id: 1,
            catalog_path: None,
            record_file: None,
            template_path: None,
            template: None,
            output_path: PathBuf::from("index.html"),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_level: "info".to_string(),
            record: None,
        }
    }
}

impl SiteConfig {
    /// Parse TOML config text; `origin` is only used in error messages
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| Error::Config(format!("Invalid config {}: {}", origin.display(), e)))
    }

    /// Load a config file, resolving relative paths against its directory
    pub fn load_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read config {}: {}", path.display(), e)))?;
        let mut config = Self::from_toml_str(&text, path)?;

        if let Some(base) = path.parent() {
            config.rebase_paths(base);
        }
        Ok(config)
    }

    fn rebase_paths(&mut self, base: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        let optional = [
            &mut self.catalog_path,
            &mut self.record_file,
            &mut self.template_path,
        ];
        for path in optional.into_iter().flatten() {
            rebase(path);
        }
        rebase(&mut self.output_path);
    }

    /// Which record provider this deployment uses
    ///
    /// Precedence: `[record]` literal values, then `record_file`, then
    /// `catalog_path`.
    pub fn provider_source(&self) -> Result<ProviderSource> {
        if let Some(record) = &self.record {
            return Ok(ProviderSource::Literal(record.clone()));
        }
        if let Some(path) = &self.record_file {
            return Ok(ProviderSource::StaticFile(path.clone()));
        }
        if let Some(path) = &self.catalog_path {
            return Ok(ProviderSource::Catalog(path.clone()));
        }
        Err(Error::Config(
            "No record provider configured (set record, record_file or catalog_path)".to_string(),
        ))
    }

    /// Built-in template used when no `template_path` is given
    pub fn builtin_template(&self) -> Result<BuiltinTemplate> {
        if let Some(which) = self.template {
            return Ok(which);
        }
        Ok(if self.provider_source()?.is_catalog() {
            BuiltinTemplate::ProjectPage
        } else {
            BuiltinTemplate::ReleasePage
        })
    }

    /// Load the active template
    pub fn load_template(&self) -> Result<Template> {
        match &self.template_path {
            Some(path) => {
                info!("Template: {}", path.display());
                Template::load(path)
            }
            None => {
                let which = self.builtin_template()?;
                info!("Template: built-in {}", which.name());
                Template::builtin(which)
            }
        }
    }
}

/// Load the site config following the resolution order above
pub fn load_site_config(cli_arg: Option<&Path>) -> Result<SiteConfig> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        info!("Config file (command line): {}", path.display());
        return SiteConfig::load_file(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        info!("Config file ({}): {}", CONFIG_ENV_VAR, path);
        return SiteConfig::load_file(Path::new(&path));
    }

    // Priority 3: TOML config file
    if let Some(path) = default_config_file() {
        info!("Config file: {}", path.display());
        return SiteConfig::load_file(&path);
    }

    // Priority 4: Compiled defaults
    warn!("No config file found, using compiled defaults");
    Ok(SiteConfig::default())
}

/// First existing platform config file, if any
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("zpage").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/zpage/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.project_id, 1);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.output_path, PathBuf::from("index.html"));
        assert!(matches!(config.provider_source(), Err(Error::Config(_))));
    }

    #[test]
    fn test_literal_record_takes_precedence() {
        let config = SiteConfig::from_toml_str(
            r#"
            catalog_path = "catalog.db"
            record_file = "settings.toml"

            [record]
            source = "inscribist-5.tar.gz"
            lastdate = "2012-12-12"
            "#,
            Path::new("test.toml"),
        )
        .unwrap();

        match config.provider_source().unwrap() {
            ProviderSource::Literal(record) => {
                assert_eq!(record.source.as_deref(), Some("inscribist-5.tar.gz"));
            }
            other => panic!("expected literal provider, got {:?}", other),
        }
        assert_eq!(config.builtin_template().unwrap(), BuiltinTemplate::ReleasePage);
    }

    #[test]
    fn test_catalog_defaults_to_project_page() {
        let config = SiteConfig::from_toml_str(
            "project_id = 3\ncatalog_path = \"catalog.db\"\n",
            Path::new("test.toml"),
        )
        .unwrap();

        assert_eq!(config.project_id, 3);
        assert!(config.provider_source().unwrap().is_catalog());
        assert_eq!(config.builtin_template().unwrap(), BuiltinTemplate::ProjectPage);
    }

    #[test]
    fn test_explicit_template_choice_wins() {
        let config = SiteConfig::from_toml_str(
            "catalog_path = \"catalog.db\"\ntemplate = \"release_page\"\n",
            Path::new("test.toml"),
        )
        .unwrap();
        assert_eq!(config.builtin_template().unwrap(), BuiltinTemplate::ReleasePage);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = SiteConfig::from_toml_str("catalog = \"x.db\"\n", Path::new("test.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
