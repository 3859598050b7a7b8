//! The document-writing seam.

use image::{GenericImageView, ImageFormat};
use qbank_model::Question;

use crate::error::{ExportError, ImageCheckError, Result};

/// English Metric Units per inch, the unit OOXML drawings are sized in.
pub const EMU_PER_INCH: u32 = 914_400;

/// Formats the DOCX writer can decode; it panics on anything else.
pub const SUPPORTED_IMAGE_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
];

/// Decode `bytes` as one of [`SUPPORTED_IMAGE_FORMATS`] and return its pixel
/// size.
pub fn check_image(bytes: &[u8]) -> std::result::Result<(u32, u32), ImageCheckError> {
    let format = image::guess_format(bytes).map_err(|_| ImageCheckError::UnknownFormat)?;
    if !SUPPORTED_IMAGE_FORMATS.contains(&format) {
        return Err(ImageCheckError::UnsupportedFormat(format));
    }
    let picture = image::load_from_memory_with_format(bytes, format)?;
    let (width, height) = picture.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageCheckError::Empty);
    }
    Ok((width, height))
}

/// Receives the blocks of an exported paper in order.
///
/// The exporter only ever calls these in document order and calls
/// [`finish`](DocumentBuilder::finish) once, after the last block.
pub trait DocumentBuilder {
    type Output;

    fn heading(&mut self, text: &str);

    fn paragraph(&mut self, text: &str);

    fn image(&mut self, image: &EmbeddedImage);

    fn page_break(&mut self);

    fn finish(self) -> Result<Self::Output>;
}

/// A decoded image ready to be placed in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub display_width_emu: u32,
    pub display_height_emu: u32,
}

impl EmbeddedImage {
    /// Decode the question's image, if it has one, and size it to
    /// `display_width_emu` wide with the height following the aspect ratio.
    pub fn from_question(question: &Question, display_width_emu: u32) -> Result<Option<Self>> {
        let Some(encoded) = question.image() else {
            return Ok(None);
        };
        let id = question.id();

        let bytes = encoded.decode().map_err(|e| ExportError::ImageDecode {
            id,
            reason: e.to_string(),
        })?;
        let (width_px, height_px) = check_image(&bytes).map_err(|e| ExportError::ImageDecode {
            id,
            reason: e.to_string(),
        })?;

        let scaled = u64::from(display_width_emu) * u64::from(height_px) / u64::from(width_px);
        let display_height_emu = u32::try_from(scaled).unwrap_or(u32::MAX);

        Ok(Some(Self {
            bytes,
            width_px,
            height_px,
            display_width_emu,
            display_height_emu,
        }))
    }

    pub fn display_inches(&self) -> (f64, f64) {
        (
            f64::from(self.display_width_emu) / f64::from(EMU_PER_INCH),
            f64::from(self.display_height_emu) / f64::from(EMU_PER_INCH),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut bytes, ImageOutputFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    fn pnm(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = format!("P6\n{width} {height}\n255\n").into_bytes();
        bytes.resize(bytes.len() + (width * height * 3) as usize, 128);
        bytes
    }

    #[test]
    fn test_check_image_reads_png_size() {
        assert_eq!(check_image(&png(4, 2)).unwrap(), (4, 2));
    }

    #[test]
    fn test_check_image_rejects_unsupported_format() {
        let err = check_image(&pnm(4, 2)).unwrap_err();
        assert!(matches!(err, ImageCheckError::UnsupportedFormat(ImageFormat::Pnm)));
    }

    #[test]
    fn test_check_image_rejects_unknown_bytes() {
        let err = check_image(b"plain text").unwrap_err();
        assert!(matches!(err, ImageCheckError::UnknownFormat));
    }

    #[test]
    fn test_check_image_rejects_truncated_png() {
        let bytes = png(4, 2);
        let err = check_image(&bytes[..20]).unwrap_err();
        assert!(matches!(err, ImageCheckError::Damaged(_)));
    }
}
