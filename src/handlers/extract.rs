use axum::{
    extract::{Multipart, State},
    response::Json,
};
use std::time::Instant;
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::models::{ExtractResponse, UploadedFile};

/// Proxy endpoint: accept one PDF over multipart, forward it to the
/// extraction service, answer `{ markdown, filename }`.
pub async fn extract_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ExtractResponse>> {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

    info!(request_id = %request_id, "Starting extraction request");

    let file = match read_file_from_multipart(&mut multipart).await {
        Ok(file) => {
            info!(
                request_id = %request_id,
                file_name = %file.name,
                file_size = file.size,
                "File received from multipart form"
            );
            file
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "Rejected multipart upload");
            return Err(e);
        }
    };

    // Extension gate only, before any outbound I/O. Content is never sniffed.
    if !file.has_pdf_extension() {
        warn!(
            request_id = %request_id,
            file_name = %file.name,
            "Rejected non-PDF filename"
        );
        return Err(AppError::UnsupportedFileType);
    }

    let markdown = match state.extractor.extract_markdown(&file).await {
        Ok(markdown) => markdown,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Extraction failed");
            return Err(e);
        }
    };

    info!(
        request_id = %request_id,
        markdown_length = markdown.len(),
        total_time_ms = start.elapsed().as_millis() as u64,
        "Extraction request completed"
    );

    // The caller gets back the name it uploaded, not the one the extraction
    // service echoes.
    Ok(Json(ExtractResponse {
        markdown,
        filename: file.name,
    }))
}

async fn read_file_from_multipart(multipart: &mut Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::internal(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name().unwrap_or("") != "file" {
            continue;
        }

        let file_name = field.file_name().unwrap_or("unknown.pdf").to_string();
        let content_type = field.content_type().map(|ct| ct.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::internal(format!("Failed to read file data: {}", e)))?;

        // Empty uploads are rejected by the extraction client, after the
        // extension gate.
        let mut file = UploadedFile::new(file_name, data.to_vec());
        if let Some(mime_type) = content_type {
            file = file.with_mime_type(mime_type);
        }

        return Ok(file);
    }

    Err(AppError::MissingFile)
}
