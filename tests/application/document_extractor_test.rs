use std::sync::Arc;
use std::time::Duration;

use docqa::application::ports::FileLoader;
use docqa::application::services::DocumentExtractor;
use docqa::domain::{ContentType, UploadedDocument};
use docqa::infrastructure::text_processing::CompositeFileLoader;

use crate::helpers::{SAMPLE_PDF, docx_with_body};

fn extractor() -> DocumentExtractor {
    let loader: Arc<dyn FileLoader> = Arc::new(CompositeFileLoader::for_supported_types(
        Duration::from_secs(30),
    ));
    DocumentExtractor::new(loader)
}

#[tokio::test]
async fn given_plain_text_when_extracting_then_returns_text_without_failure() {
    let document = UploadedDocument::new(
        "notes.txt".to_string(),
        ContentType::Text,
        b"Meeting moved to Friday.".to_vec(),
    );

    let extracted = extractor().extract(&document).await;

    assert_eq!(extracted.document_id, document.id);
    assert_eq!(extracted.text, "Meeting moved to Friday.");
    assert!(extracted.failure.is_none());
}

#[tokio::test]
async fn given_pdf_with_text_when_extracting_then_returns_page_text() {
    let document = UploadedDocument::new(
        "sample.pdf".to_string(),
        ContentType::Pdf,
        SAMPLE_PDF.to_vec(),
    );

    let extracted = extractor().extract(&document).await;

    assert!(extracted.failure.is_none());
    assert!(extracted.text.contains("Quarterly revenue grew by twelve percent"));
    assert!(extracted.text.contains("The board approved the merger"));
}

#[tokio::test]
async fn given_docx_with_text_when_extracting_then_returns_paragraphs() {
    let document = UploadedDocument::new(
        "minutes.docx".to_string(),
        ContentType::from_mime(ContentType::DOCX_MIME),
        docx_with_body(
            "<w:p><w:r><w:t>Agenda approved.</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Budget deferred.</w:t></w:r></w:p>",
        ),
    );

    let extracted = extractor().extract(&document).await;

    assert!(extracted.failure.is_none());
    assert_eq!(extracted.text, "Agenda approved.\nBudget deferred.");
}

#[tokio::test]
async fn given_unrecognized_type_when_extracting_then_returns_empty_without_failure() {
    let document = UploadedDocument::new(
        "photo.png".to_string(),
        ContentType::Unrecognized,
        vec![0x89, 0x50, 0x4E, 0x47],
    );

    let extracted = extractor().extract(&document).await;

    assert_eq!(extracted.text, "");
    assert!(extracted.failure.is_none());
}

#[tokio::test]
async fn given_corrupted_pdf_when_extracting_then_returns_empty_and_one_failure() {
    let document = UploadedDocument::new(
        "corrupt.pdf".to_string(),
        ContentType::Pdf,
        b"not a pdf at all".to_vec(),
    );

    let extracted = extractor().extract(&document).await;

    assert_eq!(extracted.text, "");
    let failure = extracted.failure.expect("corrupted PDF must be reported");
    assert_eq!(failure.filename, "corrupt.pdf");
    assert!(failure.message.contains("extraction failed"));
}

#[tokio::test]
async fn given_corrupted_docx_when_extracting_then_returns_empty_and_one_failure() {
    let document = UploadedDocument::new(
        "report.docx".to_string(),
        ContentType::Docx,
        b"PK but not really a zip".to_vec(),
    );

    let extracted = extractor().extract(&document).await;

    assert_eq!(extracted.text, "");
    assert_eq!(
        extracted.failure.map(|f| f.filename),
        Some("report.docx".to_string())
    );
}

#[tokio::test]
async fn given_invalid_utf8_text_when_extracting_then_reports_failure() {
    let document = UploadedDocument::new(
        "latin1.txt".to_string(),
        ContentType::Text,
        vec![0xFF, 0xFE, 0xFD],
    );

    let extracted = extractor().extract(&document).await;

    assert_eq!(extracted.text, "");
    assert!(extracted.failure.is_some());
}
