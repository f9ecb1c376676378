use crate::colour::{colours, Colour};
use crate::error::TableError;
use crate::units::Pt;
use std::cell::OnceCell;

/// Horizontal placement of text inside a cell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of text inside a cell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl HorizontalAlignment {
    /// Distance from the cell's left edge to the start of a line `text_width` wide
    pub fn start_offset(self, text_width: Pt, column_width: Pt, padding: Pt) -> Pt {
        match self {
            HorizontalAlignment::Left => padding,
            HorizontalAlignment::Center => (column_width - text_width) / 2.0,
            HorizontalAlignment::Right => column_width - text_width - padding,
        }
    }
}

impl VerticalAlignment {
    /// Distance from the row's top edge to the top of the first of `lines` lines
    pub fn start_offset(self, lines: usize, line_height: Pt, row_height: Pt, padding: Pt) -> Pt {
        let block = line_height * lines as f32;
        match self {
            VerticalAlignment::Top => padding,
            VerticalAlignment::Middle => row_height - padding - block / 2.0,
            VerticalAlignment::Bottom => row_height - padding - block,
        }
    }
}

/// Display information for one column of a [`Table`]. `F` is the font identity of
/// the canvas the table will be drawn on.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<F> {
    pub header: Option<String>,
    pub width: Pt,
    pub alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    pub background: Option<Colour>,
    /// Overrides the row font for this column's cells
    pub font: Option<F>,
    pub hide_grid: bool,
    /// Let this column's text run into the next column when that column's cell
    /// is short. Only honoured when the next column is bottom/right aligned and
    /// its text fits on one line.
    pub overlap_next_column: bool,
}

impl<F> Column<F> {
    /// A left/top aligned column with a header
    pub fn new<S: ToString>(header: S, width: Pt) -> Self {
        Column {
            header: Some(header.to_string()),
            width,
            alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
            background: None,
            font: None,
            hide_grid: false,
            overlap_next_column: false,
        }
    }

    /// A column with a header and a horizontal alignment
    pub fn with_alignment<S: ToString>(
        header: S,
        width: Pt,
        alignment: HorizontalAlignment,
    ) -> Self {
        Column {
            alignment,
            ..Column::new(header, width)
        }
    }

    /// A column without a header, for tables that don't draw headers
    pub fn unlabelled(
        width: Pt,
        alignment: HorizontalAlignment,
        vertical_alignment: VerticalAlignment,
    ) -> Self {
        Column {
            header: None,
            alignment,
            vertical_alignment,
            ..Column::new("", width)
        }
    }

    pub fn with_vertical_alignment(self, vertical_alignment: VerticalAlignment) -> Self {
        Column {
            vertical_alignment,
            ..self
        }
    }

    pub fn with_background(self, background: Colour) -> Self {
        Column {
            background: Some(background),
            ..self
        }
    }

    pub fn with_font(self, font: F) -> Self {
        Column {
            font: Some(font),
            ..self
        }
    }

    pub fn with_hidden_grid(self) -> Self {
        Column {
            hide_grid: true,
            ..self
        }
    }

    pub fn with_overlap_next_column(self) -> Self {
        Column {
            overlap_next_column: true,
            ..self
        }
    }

    /// Room left for text once the cell padding is taken off both sides
    pub fn content_width(&self, cell_padding: Pt) -> Pt {
        self.width - cell_padding * 2.0
    }
}

/// One table row: a cell per column, `None` for a blank cell
pub type Row = Vec<Option<String>>;

/// Build a [`Row`] where every cell has text
pub fn row<S: ToString, I: IntoIterator<Item = S>>(cells: I) -> Row {
    cells.into_iter().map(|c| Some(c.to_string())).collect()
}

/// Columns plus a row-major matrix of cell text.
///
/// The shape is checked on construction: every row must carry exactly one cell
/// per column. Columns and rows can't be changed afterwards, which keeps the
/// cached [`Table::width`] honest.
#[derive(Debug, Clone)]
pub struct Table<F> {
    columns: Vec<Column<F>>,
    rows: Vec<Row>,
    width: OnceCell<Pt>,
    pub draw_grid: bool,
    pub draw_headers: bool,
    /// Padding applied on all four sides inside every cell
    pub cell_padding: Pt,
    pub header_background: Colour,
}

impl<F> Table<F> {
    pub fn new(columns: Vec<Column<F>>, rows: Vec<Row>) -> Result<Self, TableError> {
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(TableError::ShapeMismatch {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }

        Ok(Table {
            columns,
            rows,
            width: OnceCell::new(),
            draw_grid: false,
            draw_headers: false,
            cell_padding: Pt(0.0),
            header_background: colours::HEADER_GREY,
        })
    }

    /// A one-cell table, handy for laying out a wrapped paragraph
    pub fn single_cell<S: ToString>(column: Column<F>, text: S) -> Self {
        Table::from_valid(vec![column], vec![vec![Some(text.to_string())]])
    }

    /// A single-column table with one row per entry
    pub fn single_column<S: ToString, I: IntoIterator<Item = S>>(column: Column<F>, rows: I) -> Self {
        let rows = rows
            .into_iter()
            .map(|text| vec![Some(text.to_string())])
            .collect();
        Table::from_valid(vec![column], rows)
    }

    fn from_valid(columns: Vec<Column<F>>, rows: Vec<Row>) -> Self {
        Table {
            columns,
            rows,
            width: OnceCell::new(),
            draw_grid: false,
            draw_headers: false,
            cell_padding: Pt(0.0),
            header_background: colours::HEADER_GREY,
        }
    }

    pub fn with_grid(self) -> Self {
        Table {
            draw_grid: true,
            ..self
        }
    }

    pub fn with_headers(self) -> Self {
        Table {
            draw_headers: true,
            ..self
        }
    }

    pub fn with_cell_padding(self, cell_padding: Pt) -> Self {
        Table {
            cell_padding,
            ..self
        }
    }

    pub fn with_header_background(self, header_background: Colour) -> Self {
        Table {
            header_background,
            ..self
        }
    }

    /// Force the width used for the header background instead of the sum of the
    /// column widths
    pub fn with_width(self, width: Pt) -> Self {
        Table {
            width: OnceCell::from(width),
            ..self
        }
    }

    pub fn columns(&self) -> &[Column<F>] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Total width of the table, computed once from the column widths
    pub fn width(&self) -> Pt {
        *self
            .width
            .get_or_init(|| self.columns.iter().map(|c| c.width).sum())
    }

    /// Check that `cells` has one entry per column
    pub fn check_row(&self, row: usize, cells: &[Option<String>]) -> Result<(), TableError> {
        if cells.len() == self.columns.len() {
            Ok(())
        } else {
            Err(TableError::ShapeMismatch {
                row,
                expected: self.columns.len(),
                found: cells.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column<&'static str>> {
        vec![
            Column::new("Name", Pt(100.0)),
            Column::with_alignment("Qty", Pt(25.0), HorizontalAlignment::Center),
        ]
    }

    #[test]
    fn rejects_short_rows() {
        let err = Table::new(columns(), vec![row(["a", "1"]), vec![Some("b".into())]])
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::ShapeMismatch {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn blank_cells_count_towards_shape() {
        let table = Table::new(columns(), vec![vec![Some("a".into()), None]]).unwrap();
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn width_is_sum_of_columns_unless_overridden() {
        let table = Table::new(columns(), vec![]).unwrap();
        assert_eq!(table.width(), Pt(125.0));
        assert_eq!(table.with_width(Pt(90.0)).width(), Pt(90.0));
    }

    #[test]
    fn alignment_offsets() {
        let (w, col, pad) = (Pt(20.0), Pt(100.0), Pt(3.0));
        assert_eq!(HorizontalAlignment::Left.start_offset(w, col, pad), Pt(3.0));
        assert_eq!(HorizontalAlignment::Center.start_offset(w, col, pad), Pt(40.0));
        assert_eq!(HorizontalAlignment::Right.start_offset(w, col, pad), Pt(77.0));

        let (lh, rh) = (Pt(10.0), Pt(36.0));
        assert_eq!(VerticalAlignment::Top.start_offset(2, lh, rh, pad), Pt(3.0));
        assert_eq!(VerticalAlignment::Middle.start_offset(2, lh, rh, pad), Pt(23.0));
        assert_eq!(VerticalAlignment::Bottom.start_offset(2, lh, rh, pad), Pt(13.0));
    }

    #[test]
    fn single_column_builds_one_row_per_entry() {
        let table = Table::single_column(Column::<&str>::new("Employee", Pt(100.0)), ["a", "b"]);
        assert_eq!(table.rows(), &[vec![Some("a".to_string())], vec![Some("b".to_string())]]);
    }

    #[test]
    fn single_cell_wraps_one_paragraph() {
        let table = Table::single_cell(Column::<&str>::new("", Pt(80.0)), "some paragraph");
        assert_eq!(table.columns().len(), 1);
        assert_eq!(table.rows(), &[vec![Some("some paragraph".to_string())]]);
        assert!(table.check_row(0, &table.rows()[0]).is_ok());
    }
}
