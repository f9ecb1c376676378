use crate::colour::Colour;
use crate::content::render_contents;
use crate::error::TableError;
use crate::font::Font;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use id_arena::{Arena, Id};
use pdf_writer::{Filter, Finish, Name, Pdf, Ref};

/// A font and size to set a span of text in
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// One run of text, positioned by the start of its baseline
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub coords: (Pt, Pt),
}

/// The drawing primitives a page can hold, in painting order
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Fill { rect: Rect, colour: Colour },
    Line { from: (Pt, Pt), to: (Pt, Pt) },
    Text(SpanLayout),
}

/// A single page of a [`Document`](crate::Document)
#[derive(Clone, PartialEq, Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// The visible region, if narrower than the media box
    pub crop_box: Option<Rect>,
    /// Set once the table flow has moved on to the next page
    pub closed: bool,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(width: Pt, height: Pt) -> Page {
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            crop_box: None,
            closed: false,
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    /// Write the page object and its content stream. `id` must already be listed
    /// as a kid of `parent`.
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        (id, parent): (Ref, Ref),
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), TableError> {
        let content_id = refs.allocate(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        if let Some(crop) = self.crop_box {
            page.crop_box(crop.into());
        }
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}
