mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod flow;
pub use flow::*;

mod font;
pub use font::*;

/// Word wrapping, row layout, pagination and footers, independent of any document format
pub mod layout;

mod measure;
pub use measure::*;

mod page;
pub use page::*;

/// Common paper sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod table;
pub use table::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
