//! The drawing surface the table engine paints on.

use crate::colour::Colour;
use crate::error::{MeasureError, TableError};
use crate::measure::TextMeasurer;
use crate::rect::Rect;
use crate::units::Pt;
use std::fmt::Debug;

/// The narrow set of drawing capabilities the layout engine needs from a document
/// backend. Pages are opened and closed strictly in order; every drawing call
/// names the page it targets.
///
/// A canvas is also the engine's [`TextMeasurer`], since only the backend knows
/// what its fonts look like.
pub trait Canvas: TextMeasurer {
    /// Handle to a page opened by this canvas
    type Page: Copy + PartialEq + Debug;

    /// Start a new page with the given media size
    fn open_page(&mut self, width: Pt, height: Pt) -> Result<Self::Page, TableError>;

    /// Mark a page finished; no further content is flowed onto it
    fn close_page(&mut self, page: Self::Page) -> Result<(), TableError>;

    fn fill_rect(&mut self, page: Self::Page, rect: Rect, colour: Colour)
        -> Result<(), TableError>;

    fn stroke_line(
        &mut self,
        page: Self::Page,
        from: (Pt, Pt),
        to: (Pt, Pt),
    ) -> Result<(), TableError>;

    /// Place a run of text with its baseline starting at `origin`
    fn draw_text(
        &mut self,
        page: Self::Page,
        origin: (Pt, Pt),
        text: &str,
        font: Self::Font,
        size: Pt,
    ) -> Result<(), TableError>;

    /// Restrict the visible area of a page. Backends without the notion of a crop
    /// box can ignore it.
    fn crop_page(&mut self, page: Self::Page, crop: Rect) -> Result<(), TableError> {
        let _ = (page, crop);
        Ok(())
    }
}

/// One primitive recorded by a [`RecordingCanvas`]
#[derive(Clone, PartialEq, Debug)]
pub enum DrawOp<F> {
    Fill {
        rect: Rect,
        colour: Colour,
    },
    Line {
        from: (Pt, Pt),
        to: (Pt, Pt),
    },
    Text {
        origin: (Pt, Pt),
        text: String,
        font: F,
        size: Pt,
    },
}

/// A page as seen by a [`RecordingCanvas`]
#[derive(Clone, PartialEq, Debug)]
pub struct RecordedPage<F> {
    pub width: Pt,
    pub height: Pt,
    pub crop: Option<Rect>,
    pub closed: bool,
    pub ops: Vec<DrawOp<F>>,
}

/// An in-memory canvas that records every drawing call, page by page. Useful for
/// dry runs (how many pages will this table take?) and for inspecting layout.
#[derive(Debug)]
pub struct RecordingCanvas<M: TextMeasurer> {
    measurer: M,
    pages: Vec<RecordedPage<M::Font>>,
}

impl<M: TextMeasurer> RecordingCanvas<M> {
    pub fn new(measurer: M) -> Self {
        RecordingCanvas {
            measurer,
            pages: Vec::new(),
        }
    }

    pub fn pages(&self) -> &[RecordedPage<M::Font>] {
        &self.pages
    }

    /// All text placed on a page, in drawing order
    pub fn texts(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .map(|p| {
                p.ops
                    .iter()
                    .filter_map(|op| match op {
                        DrawOp::Text { text, .. } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut RecordedPage<M::Font>, TableError> {
        self.pages.get_mut(page).ok_or(TableError::PageMissing(page))
    }
}

impl<M: TextMeasurer> TextMeasurer for RecordingCanvas<M> {
    type Font = M::Font;

    fn width(&self, text: &str, font: Self::Font, size: Pt) -> Result<Pt, MeasureError> {
        self.measurer.width(text, font, size)
    }

    fn line_height(&self, font: Self::Font, size: Pt) -> Result<Pt, MeasureError> {
        self.measurer.line_height(font, size)
    }
}

impl<M: TextMeasurer> Canvas for RecordingCanvas<M> {
    type Page = usize;

    fn open_page(&mut self, width: Pt, height: Pt) -> Result<usize, TableError> {
        self.pages.push(RecordedPage {
            width,
            height,
            crop: None,
            closed: false,
            ops: Vec::new(),
        });
        Ok(self.pages.len() - 1)
    }

    fn close_page(&mut self, page: usize) -> Result<(), TableError> {
        self.page_mut(page)?.closed = true;
        Ok(())
    }

    fn fill_rect(&mut self, page: usize, rect: Rect, colour: Colour) -> Result<(), TableError> {
        self.page_mut(page)?
            .ops
            .push(DrawOp::Fill { rect, colour });
        Ok(())
    }

    fn stroke_line(&mut self, page: usize, from: (Pt, Pt), to: (Pt, Pt)) -> Result<(), TableError> {
        self.page_mut(page)?.ops.push(DrawOp::Line { from, to });
        Ok(())
    }

    fn draw_text(
        &mut self,
        page: usize,
        origin: (Pt, Pt),
        text: &str,
        font: Self::Font,
        size: Pt,
    ) -> Result<(), TableError> {
        self.page_mut(page)?.ops.push(DrawOp::Text {
            origin,
            text: text.to_string(),
            font,
            size,
        });
        Ok(())
    }

    fn crop_page(&mut self, page: usize, crop: Rect) -> Result<(), TableError> {
        self.page_mut(page)?.crop = Some(crop);
        Ok(())
    }
}
