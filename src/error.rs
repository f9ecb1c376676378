use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum TableError {
    #[error("row {row} has {found} cells but the table has {expected} columns")]
    /// A content row does not have exactly one cell per column
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    /// The text measurer could not measure some text
    Measure(#[from] MeasureError),

    #[error("page {0} does not exist")]
    /// A canvas was asked to draw on a page it never opened
    PageMissing(usize),

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),
}

/// Failures reported by a [`TextMeasurer`](crate::TextMeasurer)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    #[error("font {font} has no glyph for {ch:?}")]
    /// The font cannot render this character
    MissingGlyph { ch: char, font: String },

    #[error("font {0} is not known to the measurer")]
    /// The font identity does not refer to a loaded font
    UnknownFont(String),
}
