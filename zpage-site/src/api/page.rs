//! Request-time page rendering
//!
//! Every request performs one record lookup and one substitution pass. A
//! failed render produces no partial page, only a JSON error.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};
use zpage_common::Error;

use crate::AppState;

/// GET / and GET /index.html
pub async fn serve_page(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let html = state
        .renderer
        .render_for(state.provider.as_ref(), state.project_id)
        .await?;
    Ok(Html(html))
}

/// Render failure surfaced to the HTTP client
#[derive(Debug)]
pub struct PageError(pub Error);

impl From<Error> for PageError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::RecordNotFound(id) => {
                warn!("No record for project {}", id);
                StatusCode::NOT_FOUND
            }
            other => {
                error!("Page render failed: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
