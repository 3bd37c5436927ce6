use axum::{extract::State, response::Html};

use crate::error::AppError;
use crate::form::render_schema_object;
use crate::state::AppState;

/// GET / - Render an input form for the configured collection
pub async fn get(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let collection = state.backend.collection();

    let schema = state.backend.fetch_schema(collection).await.map_err(|e| {
        tracing::error!(collection, error = %e, "schema fetch failed");
        AppError::SchemaFetch
    })?;

    let html = render_schema_object(&schema, &state.config.form)?;
    Ok(Html(html))
}
