//! The driver that flows headings and tables down a sequence of pages.

use crate::canvas::Canvas;
use crate::config::FlowConfig;
use crate::error::TableError;
use crate::layout::{
    compose_footer, draw_row, layout_header, layout_table_row, plan_row, LaidOutRow, PageCursor,
};
use crate::rect::Rect;
use crate::table::Table;
use crate::units::{Mm, Pt};

/// Owns a canvas and a page cursor, and lays content out one block at a time.
///
/// Pages are opened as content needs them and never revisited, except by
/// [`finish`](TableFlow::finish) which stamps the footer onto each of them.
///
/// ```
/// use pdf_table::{Column, FixedAdvance, FlowConfig, Pt, RecordingCanvas, Table, TableFlow, row};
/// use pdf_table::pagesize::A4;
///
/// let canvas = RecordingCanvas::new(FixedAdvance::<&str>::default());
/// let mut flow = TableFlow::new(canvas, FlowConfig::new(A4, "regular", "bold"));
///
/// let table = Table::new(
///     vec![Column::new("Product", Pt(200.0)), Column::new("Price", Pt(60.0))],
///     vec![row(["Widget", "$3.50"])],
/// )?
/// .with_headers()
/// .with_grid();
///
/// flow.draw_heading("Order summary")?;
/// flow.draw_table(&table)?;
/// let canvas = flow.finish()?;
/// assert_eq!(canvas.pages().len(), 1);
/// # Ok::<(), pdf_table::TableError>(())
/// ```
pub struct TableFlow<C: Canvas> {
    canvas: C,
    cursor: PageCursor<C::Page>,
    config: FlowConfig<C::Font>,
}

impl<C: Canvas> TableFlow<C> {
    /// Start a flow at the top-left of the content area. No page is opened until
    /// something is drawn.
    pub fn new(canvas: C, config: FlowConfig<C::Font>) -> Self {
        let cursor = PageCursor::new(config.page.geometry());
        TableFlow {
            canvas,
            cursor,
            config,
        }
    }

    pub fn config(&self) -> &FlowConfig<C::Font> {
        &self.config
    }

    pub fn cursor(&self) -> &PageCursor<C::Page> {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut PageCursor<C::Page> {
        &mut self.cursor
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn set_position(&mut self, x: Pt, y: Pt) {
        self.cursor.set_position(x, y);
    }

    pub fn position_at_page_top(&mut self) {
        self.cursor.position_at_page_top();
    }

    /// Draw a single line heading at the left of the content area, surrounded by
    /// the configured heading padding. The whole block moves to a new page if it
    /// doesn't fit. The cursor ends the bottom padding below the baseline.
    pub fn draw_heading(&mut self, text: &str) -> Result<(), TableError> {
        let FlowConfig {
            heading_font: font,
            heading_font_size: size,
            heading_top_padding: top,
            heading_bottom_padding: bottom,
            ..
        } = self.config;
        let line_height = self.canvas.line_height(font, size)?;

        let page = self
            .cursor
            .ensure_fits(&mut self.canvas, top + line_height + bottom)?;

        let x = self.cursor.geometry().content_left();
        let baseline = self.cursor.y - top - line_height;
        self.canvas.draw_text(page, (x, baseline), text, font, size)?;

        self.cursor.set_position(x, baseline - bottom);
        Ok(())
    }

    /// Draw a table starting at the cursor
    pub fn draw_table(&mut self, table: &Table<C::Font>) -> Result<(), TableError> {
        let (x, y) = (self.cursor.x, self.cursor.y);
        self.draw_table_at(table, x, y)
    }

    /// Draw a table with its top-left corner at `(x, y)`. The header row, when
    /// enabled, is drawn once at the start; rows that don't fit the remaining
    /// space continue on a new page.
    pub fn draw_table_at(
        &mut self,
        table: &Table<C::Font>,
        x: Pt,
        y: Pt,
    ) -> Result<(), TableError> {
        log::debug!(
            "drawing table of {} columns and {} rows at ({x}, {y})",
            table.columns().len(),
            table.rows().len()
        );
        self.cursor.set_position(x, y);

        let size = self.config.font_size;
        if table.draw_headers {
            let header = layout_header(&self.canvas, table, self.config.header_font, size)?;
            self.place_row(table, &header)?;
        }

        for index in 0..table.rows().len() {
            let row = layout_table_row(&self.canvas, table, index, self.config.body_font, size)?;
            self.place_row(table, &row)?;
        }

        log::debug!("table finished at y = {}", self.cursor.y);
        Ok(())
    }

    fn place_row(
        &mut self,
        table: &Table<C::Font>,
        row: &LaidOutRow<C::Font>,
    ) -> Result<(), TableError> {
        let page = self.cursor.ensure_fits(&mut self.canvas, row.height)?;
        let plan = plan_row(&self.canvas, table, row, (self.cursor.x, self.cursor.y))?;
        draw_row(&mut self.canvas, page, &plan)?;
        self.cursor.advance(Pt(0.0), row.height);
        Ok(())
    }

    /// Crop the page being written so it ends a little below the cursor: the crop
    /// box keeps the page's full width and top edge and reaches one font size (in
    /// millimetres) below the current position. Does nothing before the first
    /// page is opened.
    pub fn crop_current_page(&mut self) -> Result<(), TableError> {
        let Some(page) = self.cursor.current_page() else {
            return Ok(());
        };
        let geometry = *self.cursor.geometry();
        let bottom = self.cursor.y - Pt::from(Mm(self.config.font_size.0));
        let crop = Rect {
            x1: Pt(0.0),
            y1: bottom,
            x2: geometry.width,
            y2: geometry.height,
        };
        log::debug!("cropping {page:?} to {bottom} and above");
        self.canvas.crop_page(page, crop)
    }

    /// Close the last page, stamp the footer onto every page and hand the canvas
    /// back
    pub fn finish(mut self) -> Result<C, TableError> {
        let pages = self.cursor.finish(&mut self.canvas)?;
        let footer = &self.config.footer;
        if footer.is_empty() {
            return Ok(self.canvas);
        }

        let page_width = self.cursor.geometry().width;
        log::debug!("stamping footers on {} pages", pages.len());
        for (index, page) in pages.iter().enumerate() {
            let lines = compose_footer(&self.canvas, footer, page_width, index + 1, pages.len())?;
            for line in lines {
                self.canvas
                    .draw_text(*page, (line.x, line.y), &line.text, footer.font, footer.size)?;
            }
        }

        Ok(self.canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::config::FooterConfig;
    use crate::layout::Margins;
    use crate::measure::FixedAdvance;
    use crate::table::{row, Column};

    type Font = &'static str;
    type Recorder = RecordingCanvas<FixedAdvance<Font>>;

    // 2.5pt per character and 12.5pt lines at 10pt
    fn flow(height: f32, padding: f32) -> TableFlow<Recorder> {
        let config = FlowConfig::new((Pt(300.0), Pt(height)), "regular", "bold")
            .with_padding(Margins::all(Pt(padding)))
            .with_heading_padding(Pt(5.0), Pt(5.0));
        TableFlow::new(RecordingCanvas::new(FixedAdvance::new(0.25, 1.25)), config)
    }

    fn one_line_rows(count: usize) -> Table<Font> {
        let rows = (0..count).map(|i| row([format!("row {i}")])).collect();
        Table::new(vec![Column::new("Item", Pt(200.0))], rows).unwrap()
    }

    fn text_ys(canvas: &Recorder, page: usize) -> Vec<Pt> {
        canvas.pages()[page]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { origin, .. } => Some(origin.1),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn rows_fill_pages_in_order() {
        // content area of 100pt holds 8 rows of 12.5pt
        let mut flow = flow(140.0, 20.0);
        flow.draw_table(&one_line_rows(20)).unwrap();
        let canvas = flow.finish().unwrap();

        assert_eq!(canvas.pages().len(), 3);
        assert_eq!(canvas.texts(0).len(), 8);
        assert_eq!(canvas.texts(1).len(), 8);
        assert_eq!(canvas.texts(2), vec!["row 16", "row 17", "row 18", "row 19"]);
        assert!(canvas.pages().iter().all(|p| p.closed));
    }

    #[test]
    fn continuation_rows_start_at_content_top() {
        let mut flow = flow(140.0, 20.0);
        flow.draw_table(&one_line_rows(9)).unwrap();
        assert_eq!(flow.cursor().y, Pt(140.0 - 20.0 - 12.5));
        let canvas = flow.finish().unwrap();
        // first baseline one line below the content top
        assert_eq!(text_ys(&canvas, 1), vec![Pt(107.5)]);
    }

    #[test]
    fn header_is_drawn_once() {
        let mut flow = flow(140.0, 20.0);
        flow.draw_table(&one_line_rows(10).with_headers()).unwrap();
        let canvas = flow.finish().unwrap();
        assert_eq!(canvas.texts(0)[0], "Item");
        assert_eq!(canvas.texts(0).len(), 8);
        assert_eq!(canvas.texts(1), vec!["row 7", "row 8", "row 9"]);
    }

    #[test]
    fn heading_takes_its_padding() {
        let mut flow = flow(140.0, 20.0);
        flow.draw_heading("Title").unwrap();
        // 12pt heading: 15pt line between two 5pt paddings
        assert_eq!(flow.cursor().y, Pt(120.0 - 25.0));
        let canvas = flow.finish().unwrap();
        assert_eq!(text_ys(&canvas, 0), vec![Pt(100.0)]);
        assert_eq!(canvas.texts(0), vec!["Title"]);
    }

    #[test]
    fn table_starts_bottom_padding_below_the_heading() {
        let mut flow = flow(140.0, 20.0);
        flow.draw_heading("Title").unwrap();
        flow.draw_table(&one_line_rows(2)).unwrap();
        assert_eq!(flow.cursor().y, Pt(95.0 - 25.0));
        let canvas = flow.finish().unwrap();
        // heading baseline, then one 12.5pt line per row from 95 down
        assert_eq!(text_ys(&canvas, 0), vec![Pt(100.0), Pt(82.5), Pt(70.0)]);
    }

    #[test]
    fn heading_moves_to_next_page_when_full() {
        let mut flow = flow(140.0, 20.0);
        flow.draw_table(&one_line_rows(7)).unwrap();
        flow.draw_heading("Next section").unwrap();
        let canvas = flow.finish().unwrap();
        assert_eq!(canvas.pages().len(), 2);
        assert_eq!(canvas.texts(1), vec!["Next section"]);
    }

    #[test]
    fn draw_table_at_moves_the_cursor_first() {
        let mut flow = flow(140.0, 20.0);
        flow.draw_table_at(&one_line_rows(1), Pt(50.0), Pt(80.0)).unwrap();
        let canvas = flow.finish().unwrap();
        match &canvas.pages()[0].ops[0] {
            DrawOp::Text { origin, .. } => assert_eq!(*origin, (Pt(50.0), Pt(67.5))),
            op => panic!("unexpected {op:?}"),
        }
    }

    #[test]
    fn first_table_below_the_content_bottom_stays_on_page_one() {
        let mut flow = flow(140.0, 20.0);
        flow.draw_table_at(&one_line_rows(1), Pt(20.0), Pt(25.0)).unwrap();
        let canvas = flow.finish().unwrap();
        assert_eq!(canvas.pages().len(), 1);
        assert_eq!(canvas.texts(0), vec!["row 0"]);
        assert_eq!(text_ys(&canvas, 0), vec![Pt(12.5)]);
    }

    #[test]
    fn footer_is_stamped_on_every_page() {
        let footer = FooterConfig::new("bold")
            .with_lines(["footer"])
            .with_page_numbers()
            .with_bottom_padding(Pt(4.0));
        let config = FlowConfig::new((Pt(300.0), Pt(140.0)), "regular", "bold")
            .with_padding(Margins::all(Pt(20.0)))
            .with_footer(footer);
        let mut flow = TableFlow::new(RecordingCanvas::new(FixedAdvance::new(0.25, 1.25)), config);
        flow.draw_table(&one_line_rows(12)).unwrap();
        let canvas = flow.finish().unwrap();

        assert_eq!(canvas.pages().len(), 2);
        let last_two = |page: usize| canvas.texts(page).into_iter().rev().take(2).collect::<Vec<_>>();
        assert_eq!(last_two(0), vec!["1 / 2", "footer"]);
        assert_eq!(last_two(1), vec!["2 / 2", "footer"]);
    }

    #[test]
    fn crop_reaches_below_the_cursor() {
        let mut flow = flow(140.0, 20.0);
        flow.crop_current_page().unwrap();
        flow.draw_table(&one_line_rows(2)).unwrap();
        flow.crop_current_page().unwrap();
        let canvas = flow.finish().unwrap();

        let crop = canvas.pages()[0].crop.unwrap();
        assert_eq!((crop.x1, crop.x2, crop.y2), (Pt(0.0), Pt(300.0), Pt(140.0)));
        let expected = 120.0 - 25.0 - 10.0 * 72.0 / 25.4;
        assert!((crop.y1.0 - expected).abs() < 1e-3);
    }

    #[test]
    fn oversized_row_gets_a_page_of_its_own() {
        // 30 words of 5pt, three to a 20pt line: 10 lines = 125pt, taller than the 100pt content area
        let words: Vec<String> = (0..30).map(|i| format!("{:02}", i)).collect();
        let table = Table::new(
            vec![Column::new("", Pt(20.0))],
            vec![row(["first".to_string()]), row([words.join(" ")]), row(["last".to_string()])],
        )
        .unwrap();

        let mut flow = flow(140.0, 20.0);
        flow.draw_table(&table).unwrap();
        let canvas = flow.finish().unwrap();

        assert_eq!(canvas.pages().len(), 3);
        assert_eq!(canvas.texts(0), vec!["first"]);
        assert_eq!(canvas.texts(1).len(), 10);
        assert_eq!(canvas.texts(2), vec!["last"]);
    }
}
