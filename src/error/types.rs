use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file provided")]
    MissingFile,

    #[error("Only PDF files are supported")]
    UnsupportedFileType,

    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("Extraction failed: {status_text}")]
    ExtractionFailed { status: u16, status_text: String },

    #[error("Could not reach the extraction service")]
    ExtractorUnreachable,

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingFile => "MISSING_FILE",
            AppError::UnsupportedFileType => "UNSUPPORTED_FILE_TYPE",
            AppError::EmptyFile => "EMPTY_FILE",
            AppError::ExtractionFailed { .. } => "EXTRACTION_FAILED",
            AppError::ExtractorUnreachable => "EXTRACTOR_UNREACHABLE",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFile => StatusCode::BAD_REQUEST,
            AppError::UnsupportedFileType => StatusCode::BAD_REQUEST,
            AppError::EmptyFile => StatusCode::BAD_REQUEST,
            // Mirror whatever the upstream service answered with.
            AppError::ExtractionFailed { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::ExtractorUnreachable => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        tracing::error!(
            error_code = error_code,
            status_code = %status,
            error_message = %message,
            "Request failed"
        );

        // The wire shape is a flat { "error": message } object.
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

// Convert common errors to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal {
            message: format!("JSON parsing error: {}", err),
        }
    }
}

// Helper methods for creating specific errors
impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }

    pub fn extraction_failed(status: StatusCode) -> Self {
        AppError::ExtractionFailed {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        }
    }
}
