//! Turning a selection of questions into a paper.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use qbank_model::{Question, QuestionCollection};

use crate::builder::{DocumentBuilder, EMU_PER_INCH, EmbeddedImage};
use crate::error::{ExportError, Result};

pub const DEFAULT_TITLE: &str = "Question Paper";
pub const DEFAULT_IMAGE_WIDTH_INCHES: f64 = 5.5;

/// Settings for one export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub title: String,
    /// Display width of every embedded image.
    pub image_width_inches: f64,
    /// Date printed under the title.
    pub generated_on: NaiveDate,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            image_width_inches: DEFAULT_IMAGE_WIDTH_INCHES,
            generated_on: Local::now().date_naive(),
        }
    }
}

impl ExportOptions {
    pub fn image_width_emu(&self) -> u32 {
        let emu = (self.image_width_inches.max(0.1) * f64::from(EMU_PER_INCH)).round();
        emu.min(f64::from(u32::MAX)) as u32
    }
}

/// `question_paper_YYYYMMDD.docx` for the given day.
pub fn default_file_name(date: NaiveDate) -> String {
    format!("question_paper_{}.docx", date.format("%Y%m%d"))
}

/// Questions picked for export, ascending by id.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSelection<'a> {
    pub questions: Vec<&'a Question>,
    /// Requested ids that are not in the collection.
    pub missing: Vec<u64>,
}

/// Pick the questions with the given ids, sorted by id.
///
/// Duplicate ids are collapsed; unknown ids are reported in `missing`.
pub fn select_for_export<'a>(questions: &'a QuestionCollection, ids: &[u64]) -> ExportSelection<'a> {
    let wanted: BTreeSet<u64> = ids.iter().copied().collect();
    let mut selected: Vec<&Question> = questions
        .iter()
        .filter(|q| wanted.contains(&q.id()))
        .collect();
    selected.sort_by_key(|q| q.id());
    let missing = wanted
        .into_iter()
        .filter(|id| !questions.contains(*id))
        .collect();
    ExportSelection {
        questions: selected,
        missing,
    }
}

/// Lays out selected questions one per page.
#[derive(Debug, Clone, Default)]
pub struct DocumentExporter {
    options: ExportOptions,
}

impl DocumentExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Write the paper for `selected` into `builder`.
    ///
    /// Questions are emitted in ascending id order whatever order they were
    /// given in. Each gets its text, its image if it has one, and a page
    /// break, including the last. An undecodable image aborts the export and
    /// the builder is dropped unfinished.
    pub fn build<B: DocumentBuilder>(&self, selected: &[&Question], mut builder: B) -> Result<B::Output> {
        if selected.is_empty() {
            return Err(ExportError::EmptySelection);
        }

        let mut ordered = selected.to_vec();
        ordered.sort_by_key(|q| q.id());

        let image_width = self.options.image_width_emu();
        builder.heading(&self.options.title);
        builder.paragraph(&format!(
            "Generated on: {}",
            self.options.generated_on.format("%d %B %Y")
        ));

        for question in &ordered {
            builder.paragraph(&format!("Q{}: {}", question.id(), question.text()));
            if let Some(image) = EmbeddedImage::from_question(question, image_width)? {
                builder.image(&image);
            }
            builder.page_break();
        }

        tracing::info!(questions = ordered.len(), "Export assembled");
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{Block, OutlineBuilder};
    use chrono::Utc;
    use qbank_model::QuestionDraft;

    fn collection(count: usize) -> QuestionCollection {
        let mut questions = QuestionCollection::new();
        for n in 1..=count {
            questions
                .insert(QuestionDraft::new(format!("Question number {n}")), Utc::now())
                .unwrap();
        }
        questions
    }

    #[test]
    fn test_select_sorts_and_reports_missing() {
        let questions = collection(10);
        let selection = select_for_export(&questions, &[9, 2, 5, 2, 42]);
        let ids: Vec<u64> = selection.questions.iter().map(|q| q.id()).collect();
        assert_eq!(ids, vec![2, 5, 9]);
        assert_eq!(selection.missing, vec![42]);
    }

    #[test]
    fn test_build_rejects_empty_selection() {
        let exporter = DocumentExporter::default();
        let result = exporter.build(&[], OutlineBuilder::new());
        assert!(matches!(result, Err(ExportError::EmptySelection)));
    }

    #[test]
    fn test_build_orders_by_id() {
        let questions = collection(10);
        let picked = [
            questions.get(5).unwrap(),
            questions.get(2).unwrap(),
            questions.get(9).unwrap(),
        ];
        let outline = DocumentExporter::default()
            .build(&picked, OutlineBuilder::new())
            .unwrap();

        let texts: Vec<&str> = outline
            .blocks
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph(text) if text.starts_with('Q') => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec!["Q2: Question number 2", "Q5: Question number 5", "Q9: Question number 9"]
        );
        assert_eq!(outline.page_breaks(), 3);
        assert_eq!(outline.blocks.last(), Some(&Block::PageBreak));
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(default_file_name(date), "question_paper_20240307.docx");
    }

    #[test]
    fn test_image_width_emu() {
        let options = ExportOptions::default();
        assert_eq!(options.image_width_emu(), 5_029_200);
    }
}
