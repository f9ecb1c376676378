//! The table layout engine.
//!
//! Everything here is independent of any document format: text is measured
//! through a [`TextMeasurer`](crate::TextMeasurer) and drawn through a
//! [`Canvas`](crate::Canvas). The pieces, leaves first:
//!
//! - [`wrap_text`] - greedy word wrap of one cell
//! - [`layout_row`] / [`layout_header`] - wraps a whole row and works out its height
//! - [`PageCursor`] - the running position, and when to start a new page
//! - [`plan_row`] / [`draw_row`] - where every background, grid line and line of
//!   text of a row goes
//! - [`compose_footer`] - footer lines and page numbers
//!
//! [`TableFlow`](crate::TableFlow) strings these together.
//!
//! # Example
//!
//! ```
//! use pdf_table::{Column, FixedAdvance, Pt, Table, row};
//! use pdf_table::layout::layout_table_row;
//!
//! let measurer = FixedAdvance::<&str>::new(0.25, 1.25);
//! let table = Table::new(
//!     vec![Column::new("Name", Pt(100.0)), Column::new("Qty", Pt(25.0))],
//!     vec![row(["A very long product name that must wrap", "3"])],
//! )
//! .expect("one cell per column")
//! .with_cell_padding(Pt(3.0));
//!
//! let laid_out = layout_table_row(&measurer, &table, 0, "regular", Pt(10.0))
//!     .expect("fixed advance measures everything printable");
//! assert_eq!(laid_out.max_lines(), 2);
//! assert_eq!(laid_out.height, Pt(31.0));
//! ```

mod cursor;
mod footer;
mod margins;
mod render;
mod row;
mod wrap;

pub use cursor::*;
pub use footer::*;
pub use margins::*;
pub use render::*;
pub use row::*;
pub use wrap::*;
