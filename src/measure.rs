//! Text measurement hooks for table layout.
//!
//! Layout never looks inside a font itself: it asks a [`TextMeasurer`] how wide a
//! string is and how tall a line of a given font is. The PDF [`Document`](crate::Document)
//! measures with real font metrics; [`FixedAdvance`] is a deterministic
//! monospace stand-in for previews and tests.

use crate::error::MeasureError;
use crate::units::Pt;
use std::fmt::Debug;
use std::marker::PhantomData;

/// A minimal text measurement interface used by the layout engine.
///
/// Implementations must be pure: the same text, font and size always give the
/// same answer (or always fail the same way).
pub trait TextMeasurer {
    /// How a font is identified by this measurer
    type Font: Copy + PartialEq + Debug;

    /// The advance width of `text` set in `font` at `size`
    fn width(&self, text: &str, font: Self::Font, size: Pt) -> Result<Pt, MeasureError>;

    /// The vertical distance between two consecutive lines of `font` at `size`
    fn line_height(&self, font: Self::Font, size: Pt) -> Result<Pt, MeasureError>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    type Font = M::Font;

    fn width(&self, text: &str, font: Self::Font, size: Pt) -> Result<Pt, MeasureError> {
        (**self).width(text, font, size)
    }

    fn line_height(&self, font: Self::Font, size: Pt) -> Result<Pt, MeasureError> {
        (**self).line_height(font, size)
    }
}

/// A monospace measurer: every character advances `advance × size` and lines are
/// `line_height × size` apart. Control characters have no glyph and fail to
/// measure.
///
/// `F` is whatever the caller uses to name fonts; the measurer ignores it.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance<F> {
    /// Advance of one character, as a fraction of the font size
    pub advance: f32,
    /// Line height, as a fraction of the font size
    pub line_height: f32,
    font: PhantomData<F>,
}

impl<F> FixedAdvance<F> {
    pub fn new(advance: f32, line_height: f32) -> Self {
        FixedAdvance {
            advance,
            line_height,
            font: PhantomData,
        }
    }
}

impl<F> Default for FixedAdvance<F> {
    /// Roughly Helvetica-sized: 0.5em per character, 1.2em per line
    fn default() -> Self {
        FixedAdvance::new(0.5, 1.2)
    }
}

impl<F: Copy + PartialEq + Debug> TextMeasurer for FixedAdvance<F> {
    type Font = F;

    fn width(&self, text: &str, font: F, size: Pt) -> Result<Pt, MeasureError> {
        if let Some(ch) = text.chars().find(|ch| ch.is_control()) {
            return Err(MeasureError::MissingGlyph {
                ch,
                font: format!("{font:?}"),
            });
        }
        Ok(size * (self.advance * text.chars().count() as f32))
    }

    fn line_height(&self, _font: F, size: Pt) -> Result<Pt, MeasureError> {
        Ok(size * self.line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_advance_counts_chars() {
        let m = FixedAdvance::<&str>::new(0.25, 1.25);
        assert_eq!(m.width("abcd", "regular", Pt(10.0)), Ok(Pt(10.0)));
        assert_eq!(m.width("", "regular", Pt(10.0)), Ok(Pt(0.0)));
        assert_eq!(m.line_height("regular", Pt(10.0)), Ok(Pt(12.5)));
    }

    #[test]
    fn fixed_advance_rejects_control_chars() {
        let m = FixedAdvance::<&str>::default();
        assert_eq!(
            m.width("bell\u{7}", "regular", Pt(10.0)),
            Err(MeasureError::MissingGlyph {
                ch: '\u{7}',
                font: "\"regular\"".to_string(),
            })
        );
    }
}
