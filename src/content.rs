//! Turns recorded page contents into a PDF content stream.

use crate::colour::Colour;
use crate::error::{MeasureError, TableError};
use crate::font::Font;
use crate::page::{PageContents, SpanLayout};
use id_arena::Arena;
use std::io::Write;

/// Width of grid lines
const LINE_WIDTH: f32 = 1.0;

/// Renders page contents to a content stream, in the order they were added.
/// Fills and lines are wrapped in their own graphics state so text is always
/// painted in the default black.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, TableError> {
    let mut content: Vec<u8> = Vec::default();

    for item in contents.iter() {
        match item {
            PageContents::Fill { rect, colour } => {
                write!(&mut content, "q\n")?;
                write_colour(&mut content, *colour)?;
                write!(
                    &mut content,
                    "{} {} {} {} re\nf\n",
                    rect.x1.0,
                    rect.y1.0,
                    rect.width().0,
                    rect.height().0
                )?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Line { from, to } => {
                write!(&mut content, "q\n")?;
                write!(&mut content, "{LINE_WIDTH} w\n")?;
                write!(
                    &mut content,
                    "{} {} m\n{} {} l\nS\n",
                    from.0 .0,
                    from.1 .0,
                    to.0 .0,
                    to.1 .0
                )?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Text(span) => render_span(&mut content, span, fonts)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_span(
    content: &mut Vec<u8>,
    span: &SpanLayout,
    fonts: &Arena<Font>,
) -> Result<(), TableError> {
    let index = span.font.id.index();
    let font = fonts
        .get(span.font.id)
        .ok_or_else(|| MeasureError::UnknownFont(format!("F{index}")))?;

    write!(content, "BT\n")?;
    write!(content, "/F{index} {} Tf\n", span.font.size.0)?;
    write!(content, "{} {} Td\n", span.coords.0 .0, span.coords.1 .0)?;
    write!(content, "<")?;
    for gid in font.encode(&span.text)? {
        write!(content, "{gid:04x}")?;
    }
    write!(content, "> Tj\n")?;
    write!(content, "ET\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}
