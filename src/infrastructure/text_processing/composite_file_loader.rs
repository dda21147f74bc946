use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, FileLoader};
use crate::domain::{ContentType, UploadedDocument};

use super::{DocxAdapter, PdfAdapter, PlainTextAdapter};

pub struct CompositeFileLoader {
    adapters: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// Routes plain text, PDF and DOCX uploads to their adapters.
    pub fn for_supported_types(pdf_timeout: Duration) -> Self {
        let text: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
        let pdf: Arc<dyn FileLoader> = Arc::new(PdfAdapter::with_timeout(pdf_timeout));
        let docx: Arc<dyn FileLoader> = Arc::new(DocxAdapter);

        Self::new(vec![
            (ContentType::Text, text),
            (ContentType::Pdf, pdf),
            (ContentType::Docx, docx),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        let adapter = self.adapters.get(&document.content_type).ok_or_else(|| {
            ExtractionError::UnsupportedContentType(document.content_type.as_mime().to_string())
        })?;

        adapter.extract_text(document).await
    }
}
