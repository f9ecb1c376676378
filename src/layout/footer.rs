use crate::config::FooterConfig;
use crate::error::MeasureError;
use crate::measure::TextMeasurer;
use crate::units::Pt;

/// A single footer entry, with `(x, y)` on its baseline
#[derive(Debug, Clone, PartialEq)]
pub struct FooterLine {
    pub text: String,
    pub x: Pt,
    pub y: Pt,
}

/// Positions the footer of page `page_number` (1-based) out of `page_count`.
///
/// Lines are stacked from the top down and centred on the page; the block ends
/// `bottom_padding` above the page bottom, so the lowest baseline sits at
/// `bottom_padding + line_height`. The `"N / total"` stamp, when enabled, is the
/// lowest entry.
pub fn compose_footer<M: TextMeasurer + ?Sized>(
    measurer: &M,
    footer: &FooterConfig<M::Font>,
    page_width: Pt,
    page_number: usize,
    page_count: usize,
) -> Result<Vec<FooterLine>, MeasureError> {
    let line_height = measurer.line_height(footer.font, footer.size)?;

    let page_stamp = footer
        .include_page_number
        .then(|| format!("{page_number} / {page_count}"));
    let entries: Vec<&str> = footer
        .lines
        .iter()
        .map(String::as_str)
        .chain(page_stamp.as_deref())
        .collect();

    let mut y = footer.bottom_padding + line_height * entries.len() as f32;
    let mut placed = Vec::with_capacity(entries.len());
    for text in entries {
        let width = measurer.width(text, footer.font, footer.size)?;
        placed.push(FooterLine {
            text: text.to_string(),
            x: (page_width - width) / 2.0,
            y,
        });
        y -= line_height;
    }

    Ok(placed)
}
