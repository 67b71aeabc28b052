/// A file received from a multipart upload, held in memory for the duration
/// of one extraction request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub size: usize,
    pub content: Vec<u8>,
    pub mime_type: Option<String>,
}

impl UploadedFile {
    pub fn new(name: String, content: Vec<u8>) -> Self {
        let size = content.len();
        Self {
            name,
            size,
            content,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: String) -> Self {
        self.mime_type = Some(mime_type);
        self
    }

    /// Extension check only. The file contents are never inspected; the
    /// remote extraction service is the authority on whether the bytes are
    /// actually a readable PDF.
    pub fn has_pdf_extension(&self) -> bool {
        let name = self.name.as_str();
        name.len() >= 4
            && name
                .get(name.len() - 4..)
                .map(|ext| ext.eq_ignore_ascii_case(".pdf"))
                .unwrap_or(false)
    }
}
