//! Upload controller: drives an [`UploadSession`] end-to-end against the
//! proxy endpoint.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::{ErrorBody, ExtractResponse};
use crate::session::UploadSession;

/// Owns the session state machine and the HTTP call to the server. One
/// request in flight at a time; `upload` is a no-op unless the session is
/// idle.
pub struct UploadController {
    session: UploadSession,
    http: reqwest::Client,
    server_url: String,
}

impl UploadController {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self {
            session: UploadSession::new(),
            http: reqwest::Client::new(),
            server_url,
        }
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    /// Read a file from disk and run it through the pipeline. Every network
    /// or server failure lands the session in the failed state with the
    /// server's message stored verbatim; only a local read error before the
    /// session engages is returned as `Err`.
    pub async fn upload(&mut self, path: &Path) -> AppResult<()> {
        if !self.session.accepts_files() {
            debug!(status = self.session.status_label(), "Upload ignored, session busy");
            return Ok(());
        }

        let content = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown.pdf".to_string());

        self.session.accept_file(&filename);

        let part = reqwest::multipart::Part::bytes(content).file_name(filename);
        let form = reqwest::multipart::Form::new().part("file", part);
        let request = self
            .http
            .post(format!("{}/api/extract", self.server_url))
            .multipart(form);

        // One outstanding request covers both phases; flip to processing as
        // soon as it is dispatched.
        self.session.dispatched();

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<ExtractResponse>().await {
                    Ok(body) => {
                        self.session.complete(body.markdown);
                    }
                    Err(e) => {
                        self.session
                            .fail(format!("Malformed server response: {}", e));
                    }
                }
            }
            Ok(response) => {
                let status = response.status();
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .ok()
                    .map(|body| body.error)
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));
                self.session.fail(message);
            }
            Err(e) => {
                warn!(error = %e, "Upload request failed in transit");
                self.session.fail(e.to_string());
            }
        }

        Ok(())
    }

    /// Flip preview/raw on a finished conversion. Ignored otherwise.
    pub fn toggle_view(&mut self) -> bool {
        self.session.toggle_view()
    }

    /// Copy the converted Markdown to the system clipboard. Returns whether
    /// there was anything to copy.
    pub fn copy_markdown(&self) -> bool {
        match self.session.markdown() {
            Some(markdown) => {
                osc52_copy(markdown);
                true
            }
            None => false,
        }
    }

    /// Write the converted Markdown into `dir`, named after the uploaded
    /// file with its `.pdf` suffix swapped for `.md`. `Ok(None)` when the
    /// session holds no result.
    pub fn save_markdown(&self, dir: &Path) -> AppResult<Option<PathBuf>> {
        let Some(markdown) = self.session.markdown() else {
            return Ok(None);
        };

        let target = dir.join(markdown_filename(self.session.filename()));
        std::fs::write(&target, markdown)?;
        Ok(Some(target))
    }

    /// Back to idle, from either terminal state.
    pub fn reset(&mut self) -> bool {
        self.session.reset()
    }
}

/// Derive the download name: a trailing `.pdf` (any case) becomes `.md`.
pub fn markdown_filename(name: &str) -> String {
    if name.len() >= 4
        && name
            .get(name.len() - 4..)
            .map(|ext| ext.eq_ignore_ascii_case(".pdf"))
            .unwrap_or(false)
    {
        format!("{}.md", &name[..name.len() - 4])
    } else {
        format!("{}.md", name)
    }
}

/// The OSC 52 escape sequence carrying `text`, base64-encoded. Split out so
/// the payload is testable without a terminal.
pub fn osc52_sequence(text: &str) -> String {
    use base64::Engine;
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}

/// Copy text to the system clipboard via OSC 52. Works in most modern
/// terminals; a terminal that ignores the sequence simply drops it.
fn osc52_copy(text: &str) {
    let _ = std::io::stdout().write_all(osc52_sequence(text).as_bytes());
    let _ = std::io::stdout().flush();
}
