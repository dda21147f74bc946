use async_trait::async_trait;

use crate::application::ports::{ExtractionError, FileLoader};
use crate::domain::{ContentType, UploadedDocument};

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        if document.content_type != ContentType::Text {
            return Err(ExtractionError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        String::from_utf8(document.data.clone())
            .map_err(|e| ExtractionError::ExtractionFailed(format!("invalid UTF-8 text: {e}")))
    }
}
