//! HTTP API handlers for zpage-site

pub mod buildinfo;
pub mod health;
pub mod page;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use page::{serve_page, PageError};
