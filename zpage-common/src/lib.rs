//! # zpage common library
//!
//! Project-page rendering core shared by the site binary:
//! - Project record model and field bindings
//! - Record providers (catalog, generated record file, literal values)
//! - Templates with a validated binding step
//! - Page renderer
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod provider;
pub mod record;
pub mod render;
pub mod template;

pub use error::{Error, Result};
pub use provider::{open_provider, resolve_record, ProviderSource, RecordProvider};
pub use record::{Bindings, ProjectId, ProjectRecord};
pub use render::PageRenderer;
pub use template::{BuiltinTemplate, Template};
