//! Unit tests for individual components

use distill::{
    client::{markdown_filename, osc52_sequence},
    config::Config,
    error::AppError,
    models::{ExtractedDocument, UploadedFile},
    session::{UploadSession, ViewMode},
};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use std::env;

#[test]
fn test_config_loading() {
    // Explicit values first, then defaults; one test so the env mutations
    // don't race each other.
    env::set_var("SERVER_HOST", "127.0.0.1");
    env::set_var("SERVER_PORT", "8080");
    env::set_var("EXTRACTOR_URL", "http://extractor:9000");
    env::set_var("MAX_FILE_SIZE_MB", "5");

    let config = Config::from_env().unwrap();
    assert_eq!(config.server_host, "127.0.0.1");
    assert_eq!(config.server_port, 8080);
    assert_eq!(config.extractor_url, "http://extractor:9000");
    assert_eq!(config.max_file_size_mb, 5);

    env::remove_var("SERVER_HOST");
    env::remove_var("SERVER_PORT");
    env::remove_var("EXTRACTOR_URL");
    env::remove_var("MAX_FILE_SIZE_MB");

    let config = Config::from_env().unwrap();
    assert_eq!(config.server_host, "0.0.0.0");
    assert_eq!(config.server_port, 3000);
    assert_eq!(config.extractor_url, "http://localhost:8000");
    assert_eq!(config.max_file_size_mb, 10);
}

#[test]
fn test_error_codes() {
    assert_eq!(AppError::MissingFile.error_code(), "MISSING_FILE");
    assert_eq!(AppError::UnsupportedFileType.error_code(), "UNSUPPORTED_FILE_TYPE");
    assert_eq!(AppError::EmptyFile.error_code(), "EMPTY_FILE");
    assert_eq!(AppError::ExtractorUnreachable.error_code(), "EXTRACTOR_UNREACHABLE");
    assert_eq!(AppError::internal("boom").error_code(), "INTERNAL_ERROR");
}

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::UnsupportedFileType.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::EmptyFile.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::ExtractorUnreachable.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(AppError::internal("boom").status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    // The upstream status code is mirrored back to the caller.
    let upstream = AppError::extraction_failed(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(upstream.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(upstream.to_string(), "Extraction failed: Service Unavailable");
}

#[tokio::test]
async fn test_error_body_shape() {
    // The wire shape is exactly { "error": message }, nothing else.
    let response = AppError::MissingFile.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "No file provided" }));

    let response = AppError::UnsupportedFileType.into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Only PDF files are supported" }));
}

#[test]
fn test_pdf_extension_check() {
    let pdf = UploadedFile::new("report.pdf".to_string(), b"%PDF".to_vec());
    assert!(pdf.has_pdf_extension());

    let upper = UploadedFile::new("REPORT.PDF".to_string(), b"%PDF".to_vec());
    assert!(upper.has_pdf_extension());

    let mixed = UploadedFile::new("Report.Pdf".to_string(), b"%PDF".to_vec());
    assert!(mixed.has_pdf_extension());

    let txt = UploadedFile::new("notes.txt".to_string(), b"hello".to_vec());
    assert!(!txt.has_pdf_extension());

    // Extension check only, content is never consulted.
    let lying = UploadedFile::new("notes.txt".to_string(), b"%PDF-1.4".to_vec());
    assert!(!lying.has_pdf_extension());

    let short = UploadedFile::new("pdf".to_string(), b"x".to_vec());
    assert!(!short.has_pdf_extension());
}

#[test]
fn test_markdown_filename_derivation() {
    assert_eq!(markdown_filename("report.pdf"), "report.md");
    assert_eq!(markdown_filename("report.PDF"), "report.md");
    assert_eq!(markdown_filename("Quarterly.Report.Pdf"), "Quarterly.Report.md");
    // Only a trailing .pdf is replaced.
    assert_eq!(markdown_filename("archive.pdf.bak"), "archive.pdf.bak.md");
}

#[test]
fn test_extracted_document_field_fallback() {
    let primary = ExtractedDocument {
        content: Some("# Title".to_string()),
        text: Some("ignored".to_string()),
    };
    assert_eq!(primary.into_markdown(), "# Title");

    let fallback = ExtractedDocument {
        content: None,
        text: Some("body".to_string()),
    };
    assert_eq!(fallback.into_markdown(), "body");

    let empty = ExtractedDocument {
        content: None,
        text: None,
    };
    assert_eq!(empty.into_markdown(), "");
}

#[test]
fn test_session_happy_path() {
    let mut session = UploadSession::new();
    assert!(session.accepts_files());
    assert_eq!(session.status_label(), "idle");
    assert_eq!(session.filename(), "");

    assert!(session.accept_file("report.pdf"));
    assert_eq!(session.status_label(), "uploading");
    assert_eq!(session.filename(), "report.pdf");
    assert!(!session.accepts_files());

    assert!(session.dispatched());
    assert_eq!(session.status_label(), "processing");
    assert_eq!(session.filename(), "report.pdf");

    assert!(session.complete("# Title"));
    assert_eq!(session.status_label(), "done");
    assert_eq!(session.markdown(), Some("# Title"));
    assert_eq!(session.filename(), "report.pdf");
    // The view always opens in preview mode.
    assert_eq!(session.view_mode(), Some(ViewMode::Preview));
    assert_eq!(session.error_message(), None);
}

#[test]
fn test_session_rejects_shortcut_transitions() {
    // No idle -> done.
    let mut session = UploadSession::new();
    assert!(!session.complete("# Title"));
    assert_eq!(session.status_label(), "idle");

    // No idle -> processing, no idle -> error.
    assert!(!session.dispatched());
    assert!(!session.fail("boom"));
    assert_eq!(session.status_label(), "idle");

    // No uploading -> done, no uploading -> error, no uploading -> idle.
    assert!(session.accept_file("report.pdf"));
    assert!(!session.complete("# Title"));
    assert!(!session.fail("boom"));
    assert!(!session.reset());
    assert_eq!(session.status_label(), "uploading");

    // A second file is ignored while one is in flight.
    assert!(!session.accept_file("other.pdf"));
    assert_eq!(session.filename(), "report.pdf");

    // No processing -> idle, no double dispatch.
    assert!(session.dispatched());
    assert!(!session.dispatched());
    assert!(!session.reset());
    assert!(!session.accept_file("other.pdf"));
    assert_eq!(session.status_label(), "processing");
}

#[test]
fn test_session_failure_path() {
    let mut session = UploadSession::new();
    session.accept_file("report.pdf");
    session.dispatched();

    assert!(session.fail("Extraction failed: Service Unavailable"));
    assert_eq!(session.status_label(), "error");
    // Message stored verbatim; no result survives a failure.
    assert_eq!(session.error_message(), Some("Extraction failed: Service Unavailable"));
    assert_eq!(session.markdown(), None);
    assert_eq!(session.filename(), "");

    // A failed session only resets; it never completes or re-fails.
    assert!(!session.complete("# Title"));
    assert!(!session.fail("again"));
    assert!(!session.toggle_view());
    assert_eq!(session.status_label(), "error");
}

#[test]
fn test_session_reset_clears_everything() {
    let mut session = UploadSession::new();
    session.accept_file("report.pdf");
    session.dispatched();
    session.complete("# Title");

    assert!(session.reset());
    assert_eq!(session, UploadSession::Idle);
    assert_eq!(session.filename(), "");
    assert_eq!(session.markdown(), None);
    assert_eq!(session.error_message(), None);
    assert!(session.accepts_files());

    session.accept_file("report.pdf");
    session.dispatched();
    session.fail("boom");
    assert!(session.reset());
    assert_eq!(session, UploadSession::Idle);
}

#[test]
fn test_view_mode_toggle() {
    let mut session = UploadSession::new();
    // Nothing to toggle before a conversion finishes.
    assert!(!session.toggle_view());

    session.accept_file("report.pdf");
    assert!(!session.toggle_view());
    session.dispatched();
    assert!(!session.toggle_view());
    session.complete("# Title");

    assert_eq!(session.view_mode(), Some(ViewMode::Preview));
    assert!(session.toggle_view());
    assert_eq!(session.view_mode(), Some(ViewMode::Raw));
    assert!(session.toggle_view());
    assert_eq!(session.view_mode(), Some(ViewMode::Preview));
    // Toggling never leaves the done state.
    assert_eq!(session.status_label(), "done");
}

#[test]
fn test_osc52_clipboard_sequence() {
    // base64("hi") == "aGk="
    assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    assert!(osc52_sequence("# Title").starts_with("\x1b]52;c;"));
    assert!(osc52_sequence("# Title").ends_with('\x07'));
}
