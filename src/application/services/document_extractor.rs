use std::sync::Arc;

use crate::application::ports::{ExtractionError, FileLoader};
use crate::domain::{DocumentId, UploadedDocument};

/// Text pulled out of one upload. `text` is empty when the type is unsupported or the
/// extraction failed; a failure is recorded alongside rather than returned.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub document_id: DocumentId,
    pub text: String,
    pub failure: Option<ExtractionFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionFailure {
    pub filename: String,
    pub message: String,
}

pub struct DocumentExtractor {
    file_loader: Arc<dyn FileLoader>,
}

impl DocumentExtractor {
    pub fn new(file_loader: Arc<dyn FileLoader>) -> Self {
        Self { file_loader }
    }

    /// Extracts text without ever failing; one bad file must not abort the batch.
    #[tracing::instrument(
        skip(self, document),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
            content_type = document.content_type.as_mime(),
        )
    )]
    pub async fn extract(&self, document: &UploadedDocument) -> ExtractedText {
        match self.file_loader.extract_text(document).await {
            Ok(text) => {
                tracing::debug!(bytes = text.len(), "Text extracted");
                ExtractedText {
                    document_id: document.id,
                    text,
                    failure: None,
                }
            }
            Err(ExtractionError::UnsupportedContentType(content_type)) => {
                tracing::debug!(%content_type, "Skipping document with unsupported type");
                ExtractedText {
                    document_id: document.id,
                    text: String::new(),
                    failure: None,
                }
            }
            Err(e @ ExtractionError::ExtractionFailed(_)) => {
                tracing::warn!(error = %e, "Document extraction failed");
                ExtractedText {
                    document_id: document.id,
                    text: String::new(),
                    failure: Some(ExtractionFailure {
                        filename: document.filename.clone(),
                        message: e.to_string(),
                    }),
                }
            }
        }
    }
}
