//! Client for the remote document-extraction service.

use once_cell::sync::Lazy;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, info};

use crate::error::{AppError, AppResult};
use crate::models::{ExtractedDocument, UploadedFile};

// One connection pool for the whole process.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Wraps the single outbound call to the extraction service.
///
/// Best-effort: one request per invocation, no retries, no timeout. A stalled
/// service stalls the caller.
#[derive(Debug, Clone)]
pub struct ExtractorClient {
    base_url: String,
}

impl ExtractorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit one file and return the Markdown the service produced for it.
    ///
    /// The service answers batch-shaped (an array with one entry per file)
    /// even for a single upload; only element 0 is consulted.
    pub async fn extract_markdown(&self, file: &UploadedFile) -> AppResult<String> {
        if file.content.is_empty() {
            return Err(AppError::EmptyFile);
        }

        info!(
            file_name = %file.name,
            file_size = file.size,
            extractor_url = %self.base_url,
            "Forwarding file to extraction service"
        );

        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(file.mime_type.as_deref().unwrap_or("application/pdf"))
            .map_err(|e| AppError::internal(format!("Failed to build multipart part: {}", e)))?;

        let form = Form::new()
            .part("files", part)
            .text("output_format", "markdown");

        let response = match HTTP_CLIENT
            .post(format!("{}/extract", self.base_url))
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(extractor_url = %self.base_url, error = %e, "Extraction service unreachable");
                return Err(AppError::ExtractorUnreachable);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                upstream_body = %error_body,
                "Extraction service returned an error"
            );
            // `reqwest` (http 0.2) and `axum` (http 1.x) expose distinct
            // `StatusCode` types; bridge via the raw u16.
            let status = axum::http::StatusCode::from_u16(status.as_u16())
                .unwrap_or(axum::http::StatusCode::BAD_GATEWAY);
            return Err(AppError::extraction_failed(status));
        }

        let documents: Vec<ExtractedDocument> = response.json().await.map_err(|e| {
            AppError::internal(format!("Unexpected extraction service response: {}", e))
        })?;

        debug!(documents = documents.len(), "Extraction service response parsed");

        let markdown = documents
            .into_iter()
            .next()
            .map(ExtractedDocument::into_markdown)
            .unwrap_or_default();

        Ok(markdown)
    }
}
