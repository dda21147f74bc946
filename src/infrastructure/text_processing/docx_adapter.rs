use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::application::ports::{ExtractionError, FileLoader};
use crate::domain::{ContentType, UploadedDocument};

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the main body part of a WordprocessingML package.
pub struct DocxAdapter;

impl DocxAdapter {
    fn read_document_part(data: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to open DOCX archive: {e}"))
        })?;

        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("missing {DOCUMENT_PART}: {e}"))
        })?;

        let mut xml = String::with_capacity(part.size() as usize);
        part.read_to_string(&mut xml).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to read {DOCUMENT_PART}: {e}"))
        })?;

        Ok(xml)
    }

    /// Collects the text of every `w:p` element, ordered by where each paragraph opens.
    ///
    /// Paragraphs nest inside text boxes (`w:txbxContent` within a run), so open
    /// paragraphs are kept on a stack, each with the run depth it opened at, and
    /// text goes to the innermost one.
    fn paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs: Vec<String> = Vec::new();
        let mut open: Vec<(usize, usize)> = Vec::new();
        let mut run_depth = 0usize;
        let mut text_depth = 0usize;

        loop {
            let event = reader.read_event().map_err(|e| {
                ExtractionError::ExtractionFailed(format!(
                    "malformed document XML at byte {}: {e}",
                    reader.buffer_position()
                ))
            })?;

            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"p" => {
                        open.push((paragraphs.len(), run_depth));
                        paragraphs.push(String::new());
                    }
                    b"r" => run_depth += 1,
                    b"t" => text_depth += 1,
                    _ => {}
                },
                Event::End(e) => match e.local_name().as_ref() {
                    b"p" => {
                        open.pop();
                    }
                    b"r" => run_depth = run_depth.saturating_sub(1),
                    b"t" => text_depth = text_depth.saturating_sub(1),
                    _ => {}
                },
                Event::Empty(e) => {
                    let innermost = open.last().copied();
                    match (e.local_name().as_ref(), innermost) {
                        (b"p", _) => paragraphs.push(String::new()),
                        // Tab stops in paragraph properties share the element name.
                        (b"tab", Some((index, base))) if run_depth > base => {
                            paragraphs[index].push('\t')
                        }
                        (b"br" | b"cr", Some((index, base))) if run_depth > base => {
                            paragraphs[index].push('\n')
                        }
                        _ => {}
                    }
                }
                Event::Text(t) if text_depth > 0 => {
                    let unescaped = t.unescape().map_err(|e| {
                        ExtractionError::ExtractionFailed(format!("invalid text run: {e}"))
                    })?;
                    if let Some(&(index, _)) = open.last() {
                        paragraphs[index].push_str(&unescaped);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(
        skip(self, document),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        if document.content_type != ContentType::Docx {
            return Err(ExtractionError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let xml = Self::read_document_part(&document.data)?;
        let paragraphs = Self::paragraphs(&xml)?;

        tracing::info!(
            paragraph_count = paragraphs.len(),
            "DOCX text extraction complete"
        );

        Ok(paragraphs.join("\n"))
    }
}
