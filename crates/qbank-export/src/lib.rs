//! Export of selected questions as a paginated document.
//!
//! [`DocumentExporter`] walks a selection in id order and feeds a
//! [`DocumentBuilder`]. Two builders ship with the crate:
//!
//! - [`DocxBuilder`] produces a `.docx` file in memory
//! - [`OutlineBuilder`] produces a plain-text outline of the same blocks
//!
//! # Example
//!
//! ```no_run
//! use qbank_export::{DocumentExporter, DocxBuilder, select_for_export};
//! use qbank_model::QuestionCollection;
//!
//! let questions = QuestionCollection::new();
//! let selection = select_for_export(&questions, &[5, 2, 9]);
//! let bytes = DocumentExporter::default()
//!     .build(&selection.questions, DocxBuilder::new())?;
//! std::fs::write("paper.docx", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod docx;
mod error;
mod exporter;
mod outline;

pub use builder::{
    DocumentBuilder, EMU_PER_INCH, EmbeddedImage, SUPPORTED_IMAGE_FORMATS, check_image,
};
pub use docx::DocxBuilder;
pub use error::{ExportError, ImageCheckError, Result};
pub use exporter::{
    DEFAULT_IMAGE_WIDTH_INCHES, DEFAULT_TITLE, DocumentExporter, ExportOptions, ExportSelection,
    default_file_name, select_for_export,
};
pub use outline::{Block, Outline, OutlineBuilder};
