//! Plain-text rendering of an export, block by block.

use std::fmt;

use crate::builder::{DocumentBuilder, EmbeddedImage};
use crate::error::Result;

/// One block of an exported document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    Image {
        width_px: u32,
        height_px: u32,
        width_in: f64,
        height_in: f64,
    },
    PageBreak,
}

/// The block sequence an export produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub blocks: Vec<Block>,
}

impl Outline {
    pub fn page_breaks(&self) -> usize {
        self.blocks
            .iter()
            .filter(|block| matches!(block, Block::PageBreak))
            .count()
    }

    pub fn images(&self) -> usize {
        self.blocks
            .iter()
            .filter(|block| matches!(block, Block::Image { .. }))
            .count()
    }
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            match block {
                Block::Heading(text) => writeln!(f, "# {text}")?,
                Block::Paragraph(text) => writeln!(f, "{text}")?,
                Block::Image {
                    width_px,
                    height_px,
                    width_in,
                    height_in,
                } => writeln!(
                    f,
                    "[image {width_px}x{height_px} px at {width_in:.2} x {height_in:.2} in]"
                )?,
                Block::PageBreak => writeln!(f, "--- page break ---")?,
            }
        }
        Ok(())
    }
}

/// Records blocks instead of writing a file; used for previews.
#[derive(Debug, Default)]
pub struct OutlineBuilder {
    outline: Outline,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentBuilder for OutlineBuilder {
    type Output = Outline;

    fn heading(&mut self, text: &str) {
        self.outline.blocks.push(Block::Heading(text.to_string()));
    }

    fn paragraph(&mut self, text: &str) {
        self.outline.blocks.push(Block::Paragraph(text.to_string()));
    }

    fn image(&mut self, image: &EmbeddedImage) {
        let (width_in, height_in) = image.display_inches();
        self.outline.blocks.push(Block::Image {
            width_px: image.width_px,
            height_px: image.height_px,
            width_in,
            height_in,
        });
    }

    fn page_break(&mut self) {
        self.outline.blocks.push(Block::PageBreak);
    }

    fn finish(self) -> Result<Outline> {
        Ok(self.outline)
    }
}
