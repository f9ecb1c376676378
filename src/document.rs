use crate::{
    canvas::Canvas,
    colour::Colour,
    error::{MeasureError, TableError},
    font::Font,
    measure::TextMeasurer,
    page::{Page, PageContents, SpanFont, SpanLayout},
    rect::Rect,
    refs::{ObjectReferences, RefType},
    units::Pt,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A PDF document: the fonts it embeds and the pages tables are drawn onto.
///
/// As a [`Canvas`] it measures text with the real metrics of its fonts, so a
/// [`TableFlow`](crate::TableFlow) over a document wraps and breaks exactly the
/// way the written PDF looks. Nothing is rendered until [`Document::write`].
pub struct Document {
    pub fonts: Arena<Font>,
    pub pages: Vec<Page>,
}

impl Document {
    /// Add a font to the document. The returned id names the font in columns and
    /// flow settings, and stays valid for the life of the document.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    pub fn font(&self, id: Id<Font>) -> Result<&Font, MeasureError> {
        self.fonts
            .get(id)
            .ok_or_else(|| MeasureError::UnknownFont(format!("F{}", id.index())))
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut Page, TableError> {
        self.pages.get_mut(page).ok_or(TableError::PageMissing(page))
    }

    /// Render the whole document and write it out. The PDF is built in memory
    /// first, then written to `w` in one go.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), TableError> {
        let Document { fonts, pages } = self;

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.allocate(RefType::Catalog);
        let page_tree_id = refs.allocate(RefType::PageTree);

        let mut writer = Pdf::new();

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.allocate(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id.index(), &mut writer);
        }

        for (index, (page, id)) in pages.iter().zip(page_refs).enumerate() {
            page.write(&mut refs, (id, page_tree_id), index, &fonts, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        let bytes = writer.finish();
        log::debug!(
            "writing {} pages and {} fonts, {} bytes",
            pages.len(),
            fonts.len(),
            bytes.len()
        );
        w.write_all(bytes.as_slice()).map_err(Into::into)
    }
}

impl TextMeasurer for Document {
    type Font = Id<Font>;

    fn width(&self, text: &str, font: Id<Font>, size: Pt) -> Result<Pt, MeasureError> {
        self.font(font)?.width(text, size)
    }

    fn line_height(&self, font: Id<Font>, size: Pt) -> Result<Pt, MeasureError> {
        Ok(self.font(font)?.line_height(size))
    }
}

impl Canvas for Document {
    type Page = usize;

    fn open_page(&mut self, width: Pt, height: Pt) -> Result<usize, TableError> {
        self.pages.push(Page::new(width, height));
        Ok(self.pages.len() - 1)
    }

    fn close_page(&mut self, page: usize) -> Result<(), TableError> {
        self.page_mut(page)?.closed = true;
        Ok(())
    }

    fn fill_rect(&mut self, page: usize, rect: Rect, colour: Colour) -> Result<(), TableError> {
        self.page_mut(page)?
            .contents
            .push(PageContents::Fill { rect, colour });
        Ok(())
    }

    fn stroke_line(&mut self, page: usize, from: (Pt, Pt), to: (Pt, Pt)) -> Result<(), TableError> {
        self.page_mut(page)?
            .contents
            .push(PageContents::Line { from, to });
        Ok(())
    }

    fn draw_text(
        &mut self,
        page: usize,
        origin: (Pt, Pt),
        text: &str,
        font: Id<Font>,
        size: Pt,
    ) -> Result<(), TableError> {
        // fail here rather than when the document is written
        self.font(font)?.encode(text)?;
        self.page_mut(page)?.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont { id: font, size },
            coords: origin,
        });
        Ok(())
    }

    fn crop_page(&mut self, page: usize, crop: Rect) -> Result<(), TableError> {
        self.page_mut(page)?.crop_box = Some(crop);
        Ok(())
    }
}
