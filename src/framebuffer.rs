//! Packed monochrome framebuffer
//!
//! Pixels are stored one bit each, eight rows per byte, in the SSD1306's
//! horizontal addressing order:
//!
//! - byte `(y / 8) * width + x` holds column `x` of page `y / 8`
//! - bit `y % 8` of that byte is row `y` (LSB is the top row of the page)
//!
//! Some transports need a fixed marker in front of the pixel data (the I2C
//! data control byte). The framebuffer reserves that prefix at the start of
//! the storage, writes it once, and addresses pixels through the view after it,
//! so the whole storage can be handed to the bus in a single transfer.
//!
//! ## Example
//!
//! ```
//! use ssd1306_gauge::{Color, Dimensions, FrameBuffer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dims = Dimensions::new(16, 8)?;
//! let mut fb = FrameBuffer::new(dims, &[0x40], [0u8; 17])?;
//!
//! fb.pixel(3, 2, Color::On)?;
//! assert_eq!(fb.as_bytes()[3], 0b0000_0100);
//! assert_eq!(fb.raw()[0], 0x40);
//!
//! // Coordinates outside the panel are rejected
//! assert!(fb.pixel(16, 0, Color::On).is_err());
//! # Ok(())
//! # }
//! ```

use crate::color::Color;
use crate::config::Dimensions;
use crate::error::{BufferLength, OutOfBounds};

/// Monochrome page-organised framebuffer over caller-provided storage
///
/// ## Type Parameters
///
/// * `B` - Backing storage, e.g. `[u8; N]`, `&mut [u8]` or `Vec<u8>`
pub struct FrameBuffer<B> {
    /// Prefix bytes followed by `pages * width` pixel bytes
    storage: B,
    /// Length of the transport prefix at the start of `storage`
    offset: usize,
    /// Display dimensions
    dimensions: Dimensions,
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap `storage` as a framebuffer for `dimensions`
    ///
    /// `prefix` is copied to the start of the storage once and never touched
    /// again by pixel operations. Pixel bytes are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`BufferLength`] unless `storage` is exactly
    /// `prefix.len() + dimensions.buffer_size()` bytes long.
    pub fn new(
        dimensions: Dimensions,
        prefix: &[u8],
        mut storage: B,
    ) -> Result<Self, BufferLength> {
        let required = prefix.len() + dimensions.buffer_size();
        let provided = storage.as_ref().len();
        if provided != required {
            return Err(BufferLength { required, provided });
        }
        storage.as_mut()[..prefix.len()].copy_from_slice(prefix);
        Ok(Self {
            storage,
            offset: prefix.len(),
            dimensions,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        u32::from(self.dimensions.width)
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        u32::from(self.dimensions.height)
    }

    /// Number of 8-row pages
    pub fn pages(&self) -> u32 {
        u32::from(self.dimensions.pages())
    }

    /// Display dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Pixel bytes only, without the transport prefix
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.as_ref()[self.offset..]
    }

    /// The whole storage: transport prefix followed by pixel bytes
    pub fn raw(&self) -> &[u8] {
        self.storage.as_ref()
    }

    /// Give back the storage
    pub fn release(self) -> B {
        self.storage
    }

    /// Set or clear one pixel
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `(x, y)` is outside the panel. The buffer
    /// is not modified in that case.
    pub fn pixel(&mut self, x: u32, y: u32, color: impl Into<Color>) -> Result<(), OutOfBounds> {
        let (index, bit) = self.locate(x, y)?;
        self.write_bit(index, bit, color.into());
        Ok(())
    }

    /// Read one pixel back
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `(x, y)` is outside the panel.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Color, OutOfBounds> {
        let (index, bit) = self.locate(x, y)?;
        Ok(Color::from(self.storage.as_ref()[index] & bit != 0))
    }

    /// Set every pixel to `color`
    ///
    /// The transport prefix is left untouched.
    pub fn fill(&mut self, color: impl Into<Color>) {
        let byte = color.into().fill_byte();
        self.storage.as_mut()[self.offset..].fill(byte);
    }

    /// Shift the contents by `dx` columns and `dy` rows
    ///
    /// Positive `dx` moves content right, positive `dy` moves it down.
    /// Content shifted past an edge is dropped; nothing wraps around. The
    /// strip uncovered at the opposite edge keeps its previous pixels. A
    /// shift of the full width or height (or more) leaves the buffer as is.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        let width = self.width();
        let height = self.height();
        if dx.unsigned_abs() >= width || dy.unsigned_abs() >= height {
            return;
        }

        let columns = Self::destinations(dx, width);
        for y in Self::destinations(dy, height) {
            for x in columns.clone() {
                let src_x = x.wrapping_add_signed(-dx);
                let src_y = y.wrapping_add_signed(-dy);
                let (src, src_bit) = self.index_of(src_x, src_y);
                let lit = self.storage.as_ref()[src] & src_bit != 0;
                let (dst, dst_bit) = self.index_of(x, y);
                self.write_bit(dst, dst_bit, Color::from(lit));
            }
        }
    }

    /// Check that a `w` x `h` region at `(x, y)` fits on the panel
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] carrying the first corner that falls outside.
    pub fn check_region(&self, x: u32, y: u32, w: u32, h: u32) -> Result<(), OutOfBounds> {
        let x_end = x.saturating_add(w.saturating_sub(1));
        let y_end = y.saturating_add(h.saturating_sub(1));
        if x >= self.width() || y >= self.height() {
            return Err(OutOfBounds { x, y });
        }
        if x_end >= self.width() || y_end >= self.height() {
            return Err(OutOfBounds { x: x_end, y: y_end });
        }
        Ok(())
    }

    /// Set a pixel if it lies on the panel, ignore it otherwise
    ///
    /// Used by draw targets that clip rather than reject.
    #[cfg(feature = "graphics")]
    pub(crate) fn set_clipped(&mut self, x: i32, y: i32, color: Color) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Ok((index, bit)) = self.locate(x, y) {
            self.write_bit(index, bit, color);
        }
    }

    /// Destination coordinates along one axis, in copy-safe order
    ///
    /// When shifting forward the copy must run from the far end so sources
    /// are read before they are overwritten.
    fn destinations(shift: i32, len: u32) -> impl Iterator<Item = u32> + Clone {
        let count = len - shift.unsigned_abs();
        (0..count).map(move |i| if shift > 0 { len - 1 - i } else { i })
    }

    fn locate(&self, x: u32, y: u32) -> Result<(usize, u8), OutOfBounds> {
        if x >= self.width() || y >= self.height() {
            return Err(OutOfBounds { x, y });
        }
        Ok(self.index_of(x, y))
    }

    fn index_of(&self, x: u32, y: u32) -> (usize, u8) {
        let index = self.offset + (y / 8) as usize * self.dimensions.width as usize + x as usize;
        let bit = 1u8 << (y % 8);
        (index, bit)
    }

    fn write_bit(&mut self, index: usize, bit: u8, color: Color) {
        let byte = &mut self.storage.as_mut()[index];
        match color {
            Color::On => *byte |= bit,
            Color::Off => *byte &= !bit,
        }
    }
}

#[cfg(feature = "alloc")]
impl FrameBuffer<alloc::vec::Vec<u8>> {
    /// Allocate zeroed storage sized for `dimensions` plus `prefix`
    pub fn new_vec(dimensions: Dimensions, prefix: &[u8]) -> Self {
        let mut storage = alloc::vec![0u8; prefix.len() + dimensions.buffer_size()];
        storage[..prefix.len()].copy_from_slice(prefix);
        Self {
            storage,
            offset: prefix.len(),
            dimensions,
        }
    }
}
