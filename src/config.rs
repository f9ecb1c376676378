//! Settings for a [`TableFlow`](crate::TableFlow): page geometry, fonts and sizes,
//! heading spacing and the footer stamped onto every page.

use crate::layout::{Margins, PageGeometry};
use crate::pagesize::PageSize;
use crate::units::{Mm, Pt};

pub const DEFAULT_FONT_SIZE: Pt = Pt(10.0);
pub const DEFAULT_HEADING_FONT_SIZE: Pt = Pt(12.0);
pub const DEFAULT_FOOTER_FONT_SIZE: Pt = Pt(8.0);

/// 5mm, used for heading spacing and the gap below the footer
pub fn default_padding() -> Pt {
    Mm(5.0).into()
}

/// The size of every page and the padding content rows stay inside
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageSetup {
    pub size: PageSize,
    pub padding: Margins,
}

impl PageSetup {
    /// Pages of `size` with no content padding
    pub fn new(size: PageSize) -> Self {
        PageSetup {
            size,
            padding: Margins::empty(),
        }
    }

    pub fn with_padding(self, padding: Margins) -> Self {
        PageSetup { padding, ..self }
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.size, self.padding)
    }
}

/// Text stamped at the bottom of every page once all content is laid out
#[derive(Debug, Clone, PartialEq)]
pub struct FooterConfig<F> {
    /// Drawn top to bottom, each centred on the page
    pub lines: Vec<String>,
    /// Add a `"page / total"` line below the footer lines
    pub include_page_number: bool,
    pub font: F,
    pub size: Pt,
    /// Distance between the bottom of the page and the footer block
    pub bottom_padding: Pt,
}

impl<F> FooterConfig<F> {
    /// An empty footer; nothing is stamped until lines or page numbers are added
    pub fn new(font: F) -> Self {
        FooterConfig {
            lines: Vec::new(),
            include_page_number: false,
            font,
            size: DEFAULT_FOOTER_FONT_SIZE,
            bottom_padding: default_padding(),
        }
    }

    pub fn with_lines<S: ToString, I: IntoIterator<Item = S>>(self, lines: I) -> Self {
        FooterConfig {
            lines: lines.into_iter().map(|l| l.to_string()).collect(),
            ..self
        }
    }

    pub fn with_page_numbers(self) -> Self {
        FooterConfig {
            include_page_number: true,
            ..self
        }
    }

    pub fn with_size(self, size: Pt) -> Self {
        FooterConfig { size, ..self }
    }

    pub fn with_bottom_padding(self, bottom_padding: Pt) -> Self {
        FooterConfig {
            bottom_padding,
            ..self
        }
    }

    /// Whether there is anything to stamp at all
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && !self.include_page_number
    }
}

/// Everything a [`TableFlow`](crate::TableFlow) needs besides the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct FlowConfig<F> {
    pub page: PageSetup,
    /// Font for table body rows
    pub body_font: F,
    /// Font for table header rows
    pub header_font: F,
    /// Size for both body and header rows
    pub font_size: Pt,
    pub heading_font: F,
    pub heading_font_size: Pt,
    pub heading_top_padding: Pt,
    pub heading_bottom_padding: Pt,
    pub footer: FooterConfig<F>,
}

impl<F: Copy> FlowConfig<F> {
    /// Body text and the footer in `regular`, headers and headings in `bold`.
    /// Use [`with_footer_font`](FlowConfig::with_footer_font) to give the footer
    /// a face of its own, such as an oblique.
    pub fn new(page_size: PageSize, regular: F, bold: F) -> Self {
        FlowConfig {
            page: PageSetup::new(page_size),
            body_font: regular,
            header_font: bold,
            font_size: DEFAULT_FONT_SIZE,
            heading_font: bold,
            heading_font_size: DEFAULT_HEADING_FONT_SIZE,
            heading_top_padding: default_padding(),
            heading_bottom_padding: default_padding(),
            footer: FooterConfig::new(regular),
        }
    }

    pub fn with_padding(self, padding: Margins) -> Self {
        FlowConfig {
            page: self.page.with_padding(padding),
            ..self
        }
    }

    pub fn with_font_size(self, font_size: Pt) -> Self {
        FlowConfig { font_size, ..self }
    }

    pub fn with_heading(self, font: F, size: Pt) -> Self {
        FlowConfig {
            heading_font: font,
            heading_font_size: size,
            ..self
        }
    }

    pub fn with_heading_padding(self, top: Pt, bottom: Pt) -> Self {
        FlowConfig {
            heading_top_padding: top,
            heading_bottom_padding: bottom,
            ..self
        }
    }

    pub fn with_footer(self, footer: FooterConfig<F>) -> Self {
        FlowConfig { footer, ..self }
    }

    /// Swap the footer font, keeping its lines, size and padding
    pub fn with_footer_font(self, font: F) -> Self {
        FlowConfig {
            footer: FooterConfig { font, ..self.footer },
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::A4;

    #[test]
    fn defaults() {
        let config = FlowConfig::new(A4, "regular", "bold");
        assert_eq!(config.font_size, Pt(10.0));
        assert_eq!(config.heading_font_size, Pt(12.0));
        assert_eq!(config.page.padding, Margins::empty());
        assert!((config.heading_top_padding.0 - 14.173).abs() < 0.01);
        assert_eq!(config.footer.size, Pt(8.0));
        assert_eq!(config.footer.font, "regular");
        assert!(config.footer.is_empty());
    }

    #[test]
    fn footer_font_swap_keeps_the_rest() {
        let config = FlowConfig::new(A4, "regular", "bold")
            .with_footer(FooterConfig::new("regular").with_lines(["confidential"]).with_page_numbers())
            .with_footer_font("oblique");
        assert_eq!(config.footer.font, "oblique");
        assert_eq!(config.footer.lines, vec!["confidential".to_string()]);
        assert!(config.footer.include_page_number);
        assert_eq!(config.footer.size, Pt(8.0));
    }

    #[test]
    fn footer_with_only_page_numbers_is_not_empty() {
        let footer = FooterConfig::new("bold").with_page_numbers();
        assert!(!footer.is_empty());
    }
}
