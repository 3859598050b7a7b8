use thiserror::Error;

/// Export failure. The whole export is abandoned; no partial document is
/// returned.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A stored image could not be turned back into a picture.
    #[error("image of question {id} could not be decoded: {reason}")]
    ImageDecode { id: u64, reason: String },

    /// The document container could not be written.
    #[error("failed to write document: {reason}")]
    Write { reason: String },

    #[error("no questions selected for export")]
    EmptySelection,
}

/// Why image bytes cannot be placed in a document.
#[derive(Debug, Error)]
pub enum ImageCheckError {
    #[error("unrecognised image data")]
    UnknownFormat,

    #[error("{0:?} images are not supported (use PNG, JPEG, GIF, BMP or TIFF)")]
    UnsupportedFormat(image::ImageFormat),

    #[error("image data is damaged: {0}")]
    Damaged(#[from] image::ImageError),

    #[error("image has no pixels")]
    Empty,
}

pub type Result<T> = std::result::Result<T, ExportError>;
