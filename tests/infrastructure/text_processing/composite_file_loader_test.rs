use std::sync::Arc;

use async_trait::async_trait;

use docqa::application::ports::{ExtractionError, FileLoader};
use docqa::domain::{ContentType, UploadedDocument};
use docqa::infrastructure::text_processing::{CompositeFileLoader, DEFAULT_PDF_TIMEOUT};

struct FixedLoader(&'static str);

#[async_trait]
impl FileLoader for FixedLoader {
    async fn extract_text(&self, _document: &UploadedDocument) -> Result<String, ExtractionError> {
        Ok(self.0.to_string())
    }
}

fn document(content_type: ContentType, data: &[u8]) -> UploadedDocument {
    UploadedDocument::new("upload".to_string(), content_type, data.to_vec())
}

#[tokio::test]
async fn given_registered_type_when_extracting_then_routes_to_matching_adapter() {
    let text: Arc<dyn FileLoader> = Arc::new(FixedLoader("from text"));
    let pdf: Arc<dyn FileLoader> = Arc::new(FixedLoader("from pdf"));
    let loader = CompositeFileLoader::new(vec![(ContentType::Text, text), (ContentType::Pdf, pdf)]);

    let result = loader.extract_text(&document(ContentType::Pdf, b"")).await;

    assert_eq!(result.unwrap(), "from pdf");
}

#[tokio::test]
async fn given_unregistered_type_when_extracting_then_returns_unsupported() {
    let loader = CompositeFileLoader::new(Vec::new());

    let result = loader
        .extract_text(&document(ContentType::Docx, b"PK"))
        .await;

    assert!(matches!(
        result,
        Err(ExtractionError::UnsupportedContentType(ref mime)) if mime == ContentType::DOCX_MIME
    ));
}

#[tokio::test]
async fn given_default_loader_when_extracting_text_then_returns_content() {
    let loader = CompositeFileLoader::for_supported_types(DEFAULT_PDF_TIMEOUT);

    let result = loader
        .extract_text(&document(ContentType::Text, b"hello"))
        .await;

    assert_eq!(result.unwrap(), "hello");
}

#[tokio::test]
async fn given_default_loader_when_type_unrecognized_then_returns_unsupported() {
    let loader = CompositeFileLoader::for_supported_types(DEFAULT_PDF_TIMEOUT);

    let result = loader
        .extract_text(&document(ContentType::Unrecognized, b"\x89PNG"))
        .await;

    assert!(matches!(
        result,
        Err(ExtractionError::UnsupportedContentType(ref mime)) if mime == "application/octet-stream"
    ));
}
