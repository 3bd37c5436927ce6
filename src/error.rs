// HTTP Error Types
use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::backend::BackendError;
use crate::schema::SchemaError;

/// Terminal failure of a request: one fixed status and one fixed plain-text message per variant
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request
    FormParse,

    // 405 Method Not Allowed
    MethodNotAllowed,

    // 500 Internal Server Error
    SchemaFetch,
    InvalidSchema,
    Serialization,
    RequestBuild,
    Forward,

    // 502 Bad Gateway (backend answered, but not with success)
    UpstreamRejected { status: StatusCode, body: String },
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::FormParse => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::SchemaFetch => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidSchema => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RequestBuild => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Forward => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamRejected { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get client-facing message
    pub fn message(&self) -> String {
        match self {
            AppError::FormParse => "フォーム解析エラー".to_string(),
            AppError::MethodNotAllowed => "無効なメソッド".to_string(),
            AppError::SchemaFetch => "スキーマ取得失敗".to_string(),
            AppError::InvalidSchema => crate::form::INVALID_SCHEMA_MESSAGE.to_string(),
            AppError::Serialization => "データ変換エラー".to_string(),
            AppError::RequestBuild => "リクエスト作成エラー".to_string(),
            AppError::Forward => "PocketBase送信エラー".to_string(),
            AppError::UpstreamRejected { body, .. } => format!("❌ データ送信失敗: {}", body),
        }
    }

    /// Get error code for log correlation
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::FormParse => "FORM_PARSE",
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AppError::SchemaFetch => "SCHEMA_FETCH",
            AppError::InvalidSchema => "INVALID_SCHEMA",
            AppError::Serialization => "SERIALIZATION",
            AppError::RequestBuild => "REQUEST_BUILD",
            AppError::Forward => "FORWARD",
            AppError::UpstreamRejected { .. } => "UPSTREAM_REJECTED",
        }
    }
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        tracing::error!(error = %err, "malformed collection schema");
        AppError::InvalidSchema
    }
}

/// Classify a failed record forward. Schema reads map their errors at the call site.
impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::InvalidUrl(msg) => {
                tracing::error!(error = %msg, "could not build backend request");
                AppError::RequestBuild
            }
            BackendError::Encode(e) => {
                tracing::error!(error = %e, "record serialization failed");
                AppError::Serialization
            }
            BackendError::Transport(e) => {
                tracing::error!(error = %e, timeout = e.is_timeout(), "backend unreachable");
                AppError::Forward
            }
            BackendError::Status { status } => {
                tracing::warn!(%status, "backend returned non-success status");
                AppError::Forward
            }
            BackendError::Decode(e) => {
                tracing::error!(error = %e, "backend response unreadable");
                AppError::Forward
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.message(),
        )
            .into_response()
    }
}
