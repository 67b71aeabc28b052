use serde::{Deserialize, Serialize};

/// Successful conversion payload returned by the proxy endpoint.
///
/// `filename` is always the name the caller uploaded, not whatever the
/// extraction service echoes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub markdown: String,
    pub filename: String,
}

/// Failure payload: every error leaves the proxy in this flat shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// One entry of the extraction service's batch-shaped response. The service
/// answers with an array of these, one per submitted file; we only ever
/// submit one file and only ever read element 0.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractedDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ExtractedDocument {
    /// Primary field is `content`; `text` is the fallback some configurations
    /// of the service use. Neither being present is not an error, it is an
    /// empty document.
    pub fn into_markdown(self) -> String {
        self.content.or(self.text).unwrap_or_default()
    }
}
