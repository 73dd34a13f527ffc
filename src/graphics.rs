//! Graphics support via embedded-graphics
//!
//! [`FrameBuffer`] and [`Display`] implement the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait, so
//! text, primitives and images from the embedded-graphics ecosystem can be
//! drawn next to the gauges.
//!
//! Unlike [`FrameBuffer::pixel`], drawing through embedded-graphics clips:
//! pixels outside the panel are dropped silently.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//!     text::{Baseline, Text},
//! };
//! use ssd1306_gauge::{Color, Dimensions, FrameBuffer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dims = Dimensions::new(128, 32)?;
//! let mut fb = FrameBuffer::new(dims, &[0x40], [0u8; 513])?;
//!
//! // Text with its top-left corner at (0, 0); background left untouched
//! let style = MonoTextStyle::new(&FONT_6X10, Color::On);
//! let _ = Text::with_baseline("PM2.5 12", Point::zero(), style, Baseline::Top).draw(&mut fb);
//!
//! let _ = Rectangle::new(Point::new(0, 12), Size::new(128, 1))
//!     .into_styled(PrimitiveStyle::with_fill(Color::On))
//!     .draw(&mut fb);
//! # Ok(())
//! # }
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::color::Color;
use crate::display::Display;
use crate::framebuffer::FrameBuffer;
use crate::interface::DisplayInterface;

impl<B> DrawTarget for FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.set_clipped(x, y, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl<B> OriginDimensions for FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

/// Draws into the display's framebuffer; call [`Display::show`] to push it
impl<I, B> DrawTarget for Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer_mut().draw_iter(pixels)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl<I, B> OriginDimensions for Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        self.framebuffer().size()
    }
}
