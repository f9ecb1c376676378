/// A fill colour for cell and header backgrounds
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space from 8-bit channels, the way colours
    /// usually arrive from configuration (`224, 224, 224`)
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Colour::new_rgb_bytes(r, g, b)
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// The light grey used behind header rows unless a table says otherwise
    pub const HEADER_GREY: Colour = Colour::RGB {
        r: 224.0 / 255.0,
        g: 224.0 / 255.0,
        b: 224.0 / 255.0,
    };
    /// The darker grey the demo uses to highlight a column
    pub const MID_GREY: Colour = Colour::RGB {
        r: 166.0 / 255.0,
        g: 166.0 / 255.0,
        b: 166.0 / 255.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_channels_match_constants() {
        assert_eq!(Colour::from((224, 224, 224)), colours::HEADER_GREY);
        assert_eq!(
            Colour::new_rgb_bytes(255, 0, 0),
            Colour::new_rgb(1.0, 0.0, 0.0)
        );
    }
}
