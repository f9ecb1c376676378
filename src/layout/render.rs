use super::row::{LaidOutRow, RowKind};
use crate::canvas::Canvas;
use crate::colour::Colour;
use crate::error::TableError;
use crate::measure::TextMeasurer;
use crate::rect::Rect;
use crate::table::{HorizontalAlignment, Table, VerticalAlignment};
use crate::units::Pt;

/// One line of cell text, positioned by its baseline origin
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText<F> {
    pub text: String,
    pub origin: (Pt, Pt),
    pub font: F,
    pub size: Pt,
}

/// A grid segment from one point to another
pub type Segment = ((Pt, Pt), (Pt, Pt));

/// Everything needed to paint one row, in drawing order
#[derive(Debug, Clone, PartialEq)]
pub struct RowPlan<F> {
    /// Header background first (if any), then column backgrounds
    pub backgrounds: Vec<(Rect, Colour)>,
    pub grid: Vec<Segment>,
    pub text: Vec<PlacedText<F>>,
}

/// Works out where every background, grid segment and line of text of `row` goes
/// when the row's top-left corner sits at `origin`. Nothing is drawn.
///
/// Lines are stacked downwards from the vertical start offset of their column,
/// each one `line_height` below the previous, with the text origin on the
/// baseline at the bottom of the line box. Header rows ignore column
/// alignment and are always drawn top/left.
pub fn plan_row<M: TextMeasurer + ?Sized>(
    measurer: &M,
    table: &Table<M::Font>,
    row: &LaidOutRow<M::Font>,
    origin: (Pt, Pt),
) -> Result<RowPlan<M::Font>, TableError> {
    let (left, top) = origin;
    let padding = table.cell_padding;

    let mut backgrounds = Vec::new();
    if row.kind == RowKind::Header {
        backgrounds.push((
            Rect::from_top_left(left, top, table.width(), row.height),
            table.header_background,
        ));
    }

    // column backgrounds go on top of the header background
    let mut x = left;
    for column in table.columns() {
        if let Some(colour) = column.background {
            backgrounds.push((Rect::from_top_left(x, top, column.width, row.height), colour));
        }
        x += column.width;
    }

    let grid = if table.draw_grid {
        grid_segments(table, origin, row.height)
    } else {
        Vec::new()
    };

    let aligned = row.kind == RowKind::Body;
    let mut text = Vec::new();
    let mut x = left;
    for (column, cell) in table.columns().iter().zip(row.cells.iter()) {
        let (horizontal, vertical) = if aligned {
            (column.alignment, column.vertical_alignment)
        } else {
            (HorizontalAlignment::Left, VerticalAlignment::Top)
        };

        let mut y = top
            - vertical.start_offset(cell.lines.len(), row.line_height, row.height, padding);
        for line in cell.lines.iter() {
            y -= row.line_height;
            if line.is_empty() {
                continue;
            }
            let width = measurer.width(line, cell.font, row.font_size)?;
            text.push(PlacedText {
                text: line.clone(),
                origin: (x + horizontal.start_offset(width, column.width, padding), y),
                font: cell.font,
                size: row.font_size,
            });
        }
        x += column.width;
    }

    Ok(RowPlan {
        backgrounds,
        grid,
        text,
    })
}

/// Grid lines for one row: a vertical at a column's left edge when it or the
/// column before it shows the grid, top and bottom edges for every column that
/// shows it, and a closing vertical after the last column if that one does.
fn grid_segments<F>(table: &Table<F>, (left, top): (Pt, Pt), height: Pt) -> Vec<Segment> {
    let bottom = top - height;
    let mut segments = Vec::new();
    let mut x = left;
    let mut previous = false;

    for column in table.columns() {
        let current = !column.hide_grid;
        if current || previous {
            segments.push(((x, top), (x, bottom)));
        }
        if current {
            segments.push(((x, top), (x + column.width, top)));
            segments.push(((x, bottom), (x + column.width, bottom)));
        }
        x += column.width;
        previous = current;
    }

    if previous {
        segments.push(((x, top), (x, bottom)));
    }

    segments
}

/// Paints a planned row onto `page`. Canvas failures stop the row and are
/// returned as-is.
pub fn draw_row<C: Canvas + ?Sized>(
    canvas: &mut C,
    page: C::Page,
    plan: &RowPlan<C::Font>,
) -> Result<(), TableError> {
    for (rect, colour) in plan.backgrounds.iter() {
        canvas.fill_rect(page, *rect, *colour)?;
    }
    for (from, to) in plan.grid.iter() {
        canvas.stroke_line(page, *from, *to)?;
    }
    for placed in plan.text.iter() {
        canvas.draw_text(page, placed.origin, &placed.text, placed.font, placed.size)?;
    }
    Ok(())
}
