//! Pixel color for monochrome OLED panels
//!
//! The SSD1306 has one bit per pixel: a set bit lights the pixel.
//!
//! ## Example
//!
//! ```
//! use ssd1306_gauge::Color;
//!
//! assert_eq!(Color::On.fill_byte(), 0xFF);
//! assert_eq!(Color::from(0u32), Color::Off);
//! assert_eq!(Color::from(0x00FF_FFFFu32), Color::On);
//! ```

/// Monochrome pixel color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Pixel dark (bit clear)
    #[default]
    Off,
    /// Pixel lit (bit set)
    On,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU1;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    fn from(value: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        Self::from(value.is_on())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::BinaryColor {
    fn from(value: Color) -> Self {
        match value {
            Color::Off => Self::Off,
            Color::On => Self::On,
        }
    }
}

impl From<bool> for Color {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

/// Any non-zero value lights the pixel
impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self::from(value != 0)
    }
}

impl Color {
    /// Whether the pixel is lit
    pub fn is_on(self) -> bool {
        self == Self::On
    }

    /// Byte value with all eight pixels of a page column set to this color
    ///
    /// ```
    /// use ssd1306_gauge::Color;
    ///
    /// assert_eq!(Color::Off.fill_byte(), 0x00);
    /// assert_eq!(Color::On.fill_byte(), 0xFF);
    /// ```
    pub fn fill_byte(self) -> u8 {
        match self {
            Self::Off => 0x00,
            Self::On => 0xFF,
        }
    }
}
