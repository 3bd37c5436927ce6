use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::record::{parse_form_body, Submission};
use crate::schema::CollectionSchema;
use crate::state::AppState;

pub const SUCCESS_PREFIX: &str = "✅ データ送信成功: ";

/// POST /submit - Forward the posted form as a new record
pub async fn post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    if !is_urlencoded(&headers) {
        tracing::warn!(content_type = ?headers.get(header::CONTENT_TYPE), "form body rejected: not urlencoded");
        return Err(AppError::FormParse);
    }
    let body = body.map_err(|rejection| {
        tracing::warn!(error = %rejection, "form body unreadable");
        AppError::FormParse
    })?;
    let pairs = parse_form_body(&body).map_err(|e| {
        tracing::warn!(error = %e, "form body rejected");
        AppError::FormParse
    })?;

    let mut submission = Submission::from_pairs(pairs);
    if state.config.form.fill_unchecked_booleans {
        fill_unchecked_booleans(&state, &mut submission).await;
    }

    let response = state.backend.create_record(&submission).await?;
    let collection = state.backend.collection();

    if !response.is_success() {
        tracing::warn!(collection, status = %response.status, "backend rejected record");
        if state.config.form.strict_upstream_status {
            return Err(AppError::UpstreamRejected {
                status: response.status,
                body: response.body,
            });
        }
    } else {
        tracing::info!(collection, fields = submission.len(), "record forwarded");
    }

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("{}{}", SUCCESS_PREFIX, response.body),
    ))
}

/// Any other method on /submit
pub async fn method_not_allowed(method: Method) -> AppError {
    tracing::warn!(%method, "rejected non-POST submit");
    AppError::MethodNotAllowed
}

fn is_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

async fn fill_unchecked_booleans(state: &AppState, submission: &mut Submission) {
    let collection = state.backend.collection();
    let schema = match state.backend.fetch_schema(collection).await {
        Ok(object) => CollectionSchema::from_object(&object),
        Err(e) => {
            tracing::warn!(collection, error = %e, "schema unavailable; forwarding without unchecked booleans");
            return;
        }
    };

    match schema {
        Ok(schema) => submission.fill_unchecked_booleans(&schema, &state.config.form),
        Err(e) => {
            tracing::warn!(collection, error = %e, "schema unusable; forwarding without unchecked booleans");
        }
    }
}
