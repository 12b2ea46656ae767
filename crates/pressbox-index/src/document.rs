use std::io;

/// Default maximum upload size: 16 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("file too large: {0} bytes")]
    FileTooLarge(u64),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("document contains no extractable text")]
    NoText,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
}

pub struct PdfExtractor {
    pub max_file_size: u64,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl PdfExtractor {
    #[must_use]
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Extract plain text from an in-memory PDF byte stream, page order
    /// preserved.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload exceeds the size cap, the bytes
    /// cannot be parsed as a PDF (corrupt, encrypted, or not a PDF at
    /// all), or parsing yields no text.
    pub async fn extract(&self, bytes: Vec<u8>) -> Result<Document, ExtractError> {
        if bytes.len() as u64 > self.max_file_size {
            return Err(ExtractError::FileTooLarge(bytes.len() as u64));
        }

        let content = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| ExtractError::Io(io::Error::other(e)))??;

        let content = content.trim();
        if content.is_empty() {
            return Err(ExtractError::NoText);
        }

        Ok(Document {
            content: content.to_owned(),
        })
    }
}
