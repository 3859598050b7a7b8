//! DOCX output via `docx-rs`.

use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Pic, Run};

use crate::builder::{DocumentBuilder, EmbeddedImage};
use crate::error::{ExportError, Result};

/// Builds an Office Open XML word-processing document in memory.
#[derive(Default)]
pub struct DocxBuilder {
    paragraphs: Vec<Paragraph>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A run holding `text`, with line breaks kept as soft breaks.
fn text_run(text: &str) -> Run {
    let mut run = Run::new();
    for (index, line) in text.lines().enumerate() {
        if index > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    run
}

impl DocumentBuilder for DocxBuilder {
    type Output = Vec<u8>;

    fn heading(&mut self, text: &str) {
        self.paragraphs.push(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(text_run(text).size(52).bold()),
        );
    }

    fn paragraph(&mut self, text: &str) {
        self.paragraphs.push(Paragraph::new().add_run(text_run(text)));
    }

    fn image(&mut self, image: &EmbeddedImage) {
        let picture =
            Pic::new(&image.bytes).size(image.display_width_emu, image.display_height_emu);
        self.paragraphs
            .push(Paragraph::new().add_run(Run::new().add_image(picture)));
    }

    fn page_break(&mut self) {
        self.paragraphs
            .push(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));
    }

    fn finish(self) -> Result<Vec<u8>> {
        let docx = self
            .paragraphs
            .into_iter()
            .fold(Docx::new(), Docx::add_paragraph);

        let mut cursor = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut cursor)
            .map_err(|e| ExportError::Write {
                reason: e.to_string(),
            })?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_produces_zip_container() {
        let mut builder = DocxBuilder::new();
        builder.heading("Question Paper");
        builder.paragraph("Q1: First line\nSecond line");
        builder.page_break();
        let bytes = builder.finish().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_empty_document_still_builds() {
        let bytes = DocxBuilder::new().finish().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
