use super::wrap::wrap_text;
use crate::error::{MeasureError, TableError};
use crate::measure::TextMeasurer;
use crate::table::{Column, HorizontalAlignment, Table, VerticalAlignment};
use crate::units::Pt;

/// Whether a laid out row holds column headers or table content. Header rows
/// ignore column alignment when drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Body,
}

/// The lines of one cell after wrapping, with the font they were measured in
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedCell<F> {
    /// Never empty; a blank cell is one empty line
    pub lines: Vec<String>,
    pub font: F,
}

/// A row whose cells have all been wrapped and reconciled to one height
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutRow<F> {
    pub kind: RowKind,
    pub cells: Vec<WrappedCell<F>>,
    pub font_size: Pt,
    pub line_height: Pt,
    /// `max line count × line height + 2 × cell padding`
    pub height: Pt,
}

impl<F> LaidOutRow<F> {
    /// The line count of the tallest cell
    pub fn max_lines(&self) -> usize {
        self.cells
            .iter()
            .map(|c| c.lines.len())
            .max()
            .unwrap_or(1)
            .max(1)
    }
}

/// Wraps the header text of every column with the header font
pub fn layout_header<M: TextMeasurer + ?Sized>(
    measurer: &M,
    table: &Table<M::Font>,
    font: M::Font,
    size: Pt,
) -> Result<LaidOutRow<M::Font>, TableError> {
    let cells = table
        .columns()
        .iter()
        .map(|column| {
            let font = column.font.unwrap_or(font);
            let max_width = column.content_width(table.cell_padding);
            let lines = wrap_text(measurer, column.header.as_deref(), max_width, font, size)?;
            Ok(WrappedCell { lines, font })
        })
        .collect::<Result<Vec<_>, MeasureError>>()?;

    reconcile(measurer, table, RowKind::Header, cells, font, size)
}

/// Wraps every cell of a content row and works out the row height.
///
/// `cells` must hold one entry per column; anything else is reported as
/// [`TableError::ShapeMismatch`] (with row index 0, as the engine doesn't know
/// where the slice came from; [`layout_table_row`] reports the real index).
pub fn layout_row<M: TextMeasurer + ?Sized>(
    measurer: &M,
    table: &Table<M::Font>,
    cells: &[Option<String>],
    font: M::Font,
    size: Pt,
) -> Result<LaidOutRow<M::Font>, TableError> {
    table.check_row(0, cells)?;
    layout_checked(measurer, table, cells, font, size)
}

/// Lays out row `index` of the table itself
pub fn layout_table_row<M: TextMeasurer + ?Sized>(
    measurer: &M,
    table: &Table<M::Font>,
    index: usize,
    font: M::Font,
    size: Pt,
) -> Result<LaidOutRow<M::Font>, TableError> {
    let cells = table.rows().get(index).map(Vec::as_slice).unwrap_or(&[]);
    table.check_row(index, cells)?;
    layout_checked(measurer, table, cells, font, size)
}

fn layout_checked<M: TextMeasurer + ?Sized>(
    measurer: &M,
    table: &Table<M::Font>,
    cells: &[Option<String>],
    font: M::Font,
    size: Pt,
) -> Result<LaidOutRow<M::Font>, TableError> {
    let wrapped = (0..cells.len())
        .map(|i| {
            let cell_font = table.columns()[i].font.unwrap_or(font);
            let lines = wrap_cell(measurer, table, cells, i, font, size)?;
            Ok(WrappedCell {
                lines,
                font: cell_font,
            })
        })
        .collect::<Result<Vec<_>, MeasureError>>()?;

    reconcile(measurer, table, RowKind::Body, wrapped, font, size)
}

fn reconcile<M: TextMeasurer + ?Sized>(
    measurer: &M,
    table: &Table<M::Font>,
    kind: RowKind,
    cells: Vec<WrappedCell<M::Font>>,
    font: M::Font,
    size: Pt,
) -> Result<LaidOutRow<M::Font>, TableError> {
    let line_height = measurer.line_height(font, size)?;
    let mut row = LaidOutRow {
        kind,
        cells,
        font_size: size,
        line_height,
        height: Pt(0.0),
    };
    row.height = line_height * row.max_lines() as f32 + table.cell_padding * 2.0;
    log::trace!(
        "{kind:?} row: {} lines, {} high",
        row.max_lines(),
        row.height
    );
    Ok(row)
}

/// Wraps cell `i`, letting it spill into the next column when the overlap
/// conditions hold.
///
/// The overlap only handles one narrow case: the next column is bottom and right
/// aligned and its own text fits on a single line. Everything else falls back to
/// wrapping inside the cell's own column.
fn wrap_cell<M: TextMeasurer + ?Sized>(
    measurer: &M,
    table: &Table<M::Font>,
    cells: &[Option<String>],
    i: usize,
    row_font: M::Font,
    size: Pt,
) -> Result<Vec<String>, MeasureError> {
    let columns = table.columns();
    let column = &columns[i];
    let font = column.font.unwrap_or(row_font);
    let content_width = column.content_width(table.cell_padding);
    let text = cells[i].as_deref();

    let own_column = || wrap_text(measurer, text, content_width, font, size);

    let (Some(text), Some(next)) = (text, columns.get(i + 1)) else {
        return own_column();
    };
    if !column.overlap_next_column || !accepts_overlap(next) {
        return own_column();
    }

    let next_font = next.font.unwrap_or(row_font);
    let next_text = cells[i + 1].as_deref();
    let next_lines = wrap_text(
        measurer,
        next_text,
        next.content_width(table.cell_padding),
        next_font,
        size,
    )?;
    if next_lines.len() > 1 {
        return own_column();
    }

    let combined_width = content_width + next.width;
    let mut lines = wrap_text(measurer, Some(text), combined_width, font, size)?;

    let last_width = match lines.last() {
        Some(last) => measurer.width(last, font, size)?,
        None => Pt(0.0),
    };
    let next_width = measurer.width(next_text.unwrap_or_default(), next_font, size)?;
    if last_width + next_width > combined_width {
        // push the neighbour's bottom-aligned text below our last line
        lines.push(String::new());
    }

    Ok(lines)
}

fn accepts_overlap<F>(next: &Column<F>) -> bool {
    next.vertical_alignment == VerticalAlignment::Bottom
        && next.alignment == HorizontalAlignment::Right
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::FixedAdvance;
    use crate::table::row;

    type Font = &'static str;

    // 2.5pt per character and 12.5pt lines at 10pt
    fn measurer() -> FixedAdvance<Font> {
        FixedAdvance::new(0.25, 1.25)
    }

    fn lay_out(table: &Table<Font>, index: usize) -> LaidOutRow<Font> {
        layout_table_row(&measurer(), table, index, "regular", Pt(10.0)).unwrap()
    }

    fn lines(row: &LaidOutRow<Font>, cell: usize) -> Vec<&str> {
        row.cells[cell].lines.iter().map(String::as_str).collect()
    }

    #[test]
    fn name_and_quantity_example() {
        let table = Table::new(
            vec![
                Column::new("Name", Pt(100.0)),
                Column::with_alignment("Qty", Pt(25.0), HorizontalAlignment::Center),
            ],
            vec![row(["A very long product name that must wrap", "3"])],
        )
        .unwrap()
        .with_cell_padding(Pt(3.0));

        let laid_out = lay_out(&table, 0);
        assert_eq!(laid_out.cells[0].lines.len(), 2);
        assert_eq!(lines(&laid_out, 1), vec!["3"]);
        assert_eq!(laid_out.line_height, Pt(12.5));
        assert_eq!(laid_out.height, Pt(2.0 * 12.5 + 6.0));
    }

    #[test]
    fn blank_cells_are_one_line() {
        let table = Table::new(
            vec![Column::new("a", Pt(50.0)), Column::new("b", Pt(50.0))],
            vec![vec![None, None]],
        )
        .unwrap();
        let laid_out = lay_out(&table, 0);
        assert_eq!(lines(&laid_out, 0), vec![""]);
        assert_eq!(laid_out.height, Pt(12.5));
    }

    #[test]
    fn height_only_depends_on_the_tallest_cell() {
        let long = "one two three four five six seven eight";
        let columns = || vec![Column::new("a", Pt(40.0)), Column::new("b", Pt(40.0))];
        let left = Table::new(columns(), vec![row([long, "x"])]).unwrap();
        let right = Table::new(columns(), vec![row(["x", long])]).unwrap();

        let (l, r) = (lay_out(&left, 0), lay_out(&right, 0));
        assert_eq!(l.max_lines(), r.max_lines());
        assert_eq!(l.height, r.height);
    }

    #[test]
    fn mismatched_slices_are_rejected() {
        let table = Table::new(vec![Column::<Font>::new("a", Pt(50.0))], vec![]).unwrap();
        let err = layout_row(
            &measurer(),
            &table,
            &[Some("a".into()), Some("b".into())],
            "regular",
            Pt(10.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::ShapeMismatch {
                expected: 1,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn header_uses_header_font_and_blank_headers() {
        let table = Table::new(
            vec![
                Column::new("Item Name", Pt(100.0)),
                Column::unlabelled(Pt(30.0), HorizontalAlignment::Left, VerticalAlignment::Top),
            ],
            vec![],
        )
        .unwrap();
        let header = layout_header(&measurer(), &table, "bold", Pt(10.0)).unwrap();
        assert_eq!(header.kind, RowKind::Header);
        assert_eq!(header.cells[0].font, "bold");
        assert_eq!(lines(&header, 0), vec!["Item Name"]);
        assert_eq!(lines(&header, 1), vec![""]);
    }

    #[test]
    fn column_font_overrides_row_font() {
        let table = Table::new(
            vec![Column::new("a", Pt(50.0)).with_font("mono")],
            vec![row(["x"])],
        )
        .unwrap();
        assert_eq!(lay_out(&table, 0).cells[0].font, "mono");
    }

    fn overlap_table(rows: Vec<crate::table::Row>) -> Table<Font> {
        Table::new(
            vec![
                Column::new("", Pt(100.0)).with_overlap_next_column(),
                Column::unlabelled(Pt(60.0), HorizontalAlignment::Right, VerticalAlignment::Bottom),
                Column::unlabelled(Pt(50.0), HorizontalAlignment::Right, VerticalAlignment::Bottom),
            ],
            rows,
        )
        .unwrap()
        .with_cell_padding(Pt(2.0))
    }

    #[test]
    fn overlap_spills_into_an_empty_neighbour() {
        // 43 chars = 107.5pt: too wide for 96pt, fits in 96 + 60
        let text = "Fancy Product with long name and a quantity";
        let table = overlap_table(vec![row([text, "", "$10.00"])]);
        let laid_out = lay_out(&table, 0);
        assert_eq!(lines(&laid_out, 0), vec![text]);
        assert_eq!(laid_out.max_lines(), 1);
    }

    #[test]
    fn overlap_adds_a_line_on_collision() {
        let text = "Fancy Product with long name and a quantity";
        let table = overlap_table(vec![row([text, "3 X $10.00", "$30.00"])]);
        let laid_out = lay_out(&table, 0);
        // 107.5pt + 25pt still fits the 156pt combined width
        assert_eq!(lines(&laid_out, 0), vec![text]);

        let text = "Fancy Product with a much much longer name and a quantity";
        let table = overlap_table(vec![row([text, "3 X $10.00", "$30.00"])]);
        let laid_out = lay_out(&table, 0);
        // 57 chars = 142.5pt, plus 25pt for the quantity is past 156pt
        assert_eq!(lines(&laid_out, 0), vec![text, ""]);
        assert_eq!(lines(&laid_out, 1), vec!["3 X $10.00"]);
    }

    #[test]
    fn overlap_needs_a_bottom_right_neighbour() {
        let text = "Fancy Product with long name and a quantity";
        let table = Table::new(
            vec![
                Column::new("", Pt(100.0)).with_overlap_next_column(),
                Column::unlabelled(Pt(60.0), HorizontalAlignment::Right, VerticalAlignment::Top),
            ],
            vec![row([text, ""])],
        )
        .unwrap()
        .with_cell_padding(Pt(2.0));
        assert_eq!(lay_out(&table, 0).cells[0].lines.len(), 2);
    }

    #[test]
    fn overlap_gives_up_on_multi_line_neighbours() {
        let text = "Fancy Product with long name and a quantity";
        let table = overlap_table(vec![row([text, "two lines of quantity text", "$1"])]);
        let laid_out = lay_out(&table, 0);
        assert_eq!(laid_out.cells[0].lines.len(), 2);
    }

    #[test]
    fn overlap_on_last_column_is_ignored() {
        let table = Table::new(
            vec![Column::<Font>::new("", Pt(20.0)).with_overlap_next_column()],
            vec![row(["spills nowhere"])],
        )
        .unwrap();
        assert_eq!(lay_out(&table, 0).cells[0].lines, vec!["spills", "nowhere"]);
    }

    #[test]
    fn overlap_never_adds_lines_to_the_neighbour() {
        let text = "Fancy Product with long name and a quantity";
        let plain = Table::new(
            vec![
                Column::new("", Pt(100.0)),
                Column::unlabelled(Pt(60.0), HorizontalAlignment::Right, VerticalAlignment::Bottom),
            ],
            vec![row([text, "3 X $10"])],
        )
        .unwrap()
        .with_cell_padding(Pt(2.0));
        let overlapping = Table::new(
            vec![
                Column::new("", Pt(100.0)).with_overlap_next_column(),
                Column::unlabelled(Pt(60.0), HorizontalAlignment::Right, VerticalAlignment::Bottom),
            ],
            vec![row([text, "3 X $10"])],
        )
        .unwrap()
        .with_cell_padding(Pt(2.0));

        let plain = lay_out(&plain, 0);
        let overlapping = lay_out(&overlapping, 0);
        assert!(overlapping.cells[1].lines.len() <= plain.cells[1].lines.len());
        assert!(overlapping.max_lines() <= plain.max_lines());
    }
}
