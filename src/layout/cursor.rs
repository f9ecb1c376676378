use super::margins::Margins;
use crate::canvas::Canvas;
use crate::error::TableError;
use crate::pagesize::PageSize;
use crate::units::Pt;

/// Fixed page dimensions plus the content padding rows must stay inside
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    pub width: Pt,
    pub height: Pt,
    pub padding: Margins,
}

impl PageGeometry {
    pub fn new(size: PageSize, padding: Margins) -> Self {
        PageGeometry {
            width: size.0,
            height: size.1,
            padding,
        }
    }

    /// The y coordinate of the top of the content area
    pub fn content_top(&self) -> Pt {
        self.height - self.padding.top
    }

    /// The y coordinate below which no row may extend
    pub fn content_bottom(&self) -> Pt {
        self.padding.bottom
    }

    pub fn content_left(&self) -> Pt {
        self.padding.left
    }
}

/// The running position of the content flow, and the pages it has used.
///
/// Coordinates are PDF-style: `y` grows upwards, so flowing down the page means
/// decreasing `y`. The cursor starts with no page; the first
/// [`ensure_fits`](PageCursor::ensure_fits) opens one. After that it only ever
/// moves forward: a full page is closed and never written to again.
#[derive(Debug, Clone)]
pub struct PageCursor<P> {
    pub x: Pt,
    pub y: Pt,
    geometry: PageGeometry,
    current: Option<P>,
    finished: Vec<P>,
}

impl<P: Copy + PartialEq + std::fmt::Debug> PageCursor<P> {
    /// A cursor at the top-left of the content area, before any page exists
    pub fn new(geometry: PageGeometry) -> Self {
        PageCursor {
            x: geometry.content_left(),
            y: geometry.content_top(),
            geometry,
            current: None,
            finished: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// The page content is currently flowing onto, if one has been opened
    pub fn current_page(&self) -> Option<P> {
        self.current
    }

    /// Pages that have been closed, in order
    pub fn finished_pages(&self) -> &[P] {
        &self.finished
    }

    pub fn set_position(&mut self, x: Pt, y: Pt) {
        self.x = x;
        self.y = y;
    }

    /// Move to the top-left corner of the content area
    pub fn position_at_page_top(&mut self) {
        self.x = self.geometry.content_left();
        self.y = self.geometry.content_top();
    }

    /// Move right by `dx` and down by `dy`
    pub fn advance(&mut self, dx: Pt, dy: Pt) {
        self.x += dx;
        self.y -= dy;
    }

    /// Whether a block `needed` tall fits between the cursor and the bottom of the
    /// content area
    pub fn fits(&self, needed: Pt) -> bool {
        self.y - needed >= self.geometry.content_bottom()
    }

    fn at_page_top(&self) -> bool {
        self.y >= self.geometry.content_top()
    }

    /// Make sure a block `needed` tall can be drawn at the cursor, returning the
    /// page to draw it on.
    ///
    /// Opens the first page if none is open yet and draws there wherever the
    /// cursor sits, without a fit check. On an open page, when the block doesn't
    /// fit the page is closed, a new one of the same size is opened and the cursor
    /// moves to the top-left of its content area. A block that is taller than a
    /// whole content area is drawn on a fresh page anyway, overflowing the bottom.
    pub fn ensure_fits<C>(&mut self, canvas: &mut C, needed: Pt) -> Result<P, TableError>
    where
        C: Canvas<Page = P> + ?Sized,
    {
        let Some(page) = self.current else {
            let page = canvas.open_page(self.geometry.width, self.geometry.height)?;
            log::debug!("opened first page {page:?}");
            self.current = Some(page);
            return Ok(page);
        };

        if self.fits(needed) {
            return Ok(page);
        }

        if self.at_page_top() {
            log::warn!(
                "block of {needed} does not fit on an empty page, it will overflow the bottom padding"
            );
            return Ok(page);
        }

        canvas.close_page(page)?;
        self.finished.push(page);

        let next = canvas.open_page(self.geometry.width, self.geometry.height)?;
        log::debug!("{page:?} is full, continuing on {next:?}");
        self.current = Some(next);
        self.position_at_page_top();
        Ok(next)
    }

    /// Close the page being written, if any, and return every page used in order
    pub fn finish<C>(&mut self, canvas: &mut C) -> Result<Vec<P>, TableError>
    where
        C: Canvas<Page = P> + ?Sized,
    {
        if let Some(page) = self.current.take() {
            canvas.close_page(page)?;
            self.finished.push(page);
        }
        Ok(self.finished.clone())
    }
}
