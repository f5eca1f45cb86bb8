//! zpage-site library - project page delivery
//!
//! Two ways to deliver the page:
//! - request-time: [`build_router`] renders on every `GET /`
//! - build-time: [`publish::publish_page`] renders once to a file

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use zpage_common::{PageRenderer, ProjectId, RecordProvider};

pub mod api;
pub mod logging;
pub mod publish;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Record source for the page
    pub provider: Arc<dyn RecordProvider>,
    /// Template-bound renderer (immutable)
    pub renderer: Arc<PageRenderer>,
    /// The single project this deployment renders
    pub project_id: ProjectId,
}

impl AppState {
    /// Create new application state
    pub fn new(provider: Arc<dyn RecordProvider>, renderer: PageRenderer, project_id: ProjectId) -> Self {
        Self {
            provider,
            renderer: Arc::new(renderer),
            project_id,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::serve_page))
        .route("/index.html", get(api::serve_page))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
