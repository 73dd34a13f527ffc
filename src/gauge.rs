//! Fixed-size bitmap gauges
//!
//! Three small indicators drawn straight into a [`FrameBuffer`]:
//!
//! - [`triangle_gauge`] - 16x8 ramp filled from the left
//! - [`battery_gauge`] - 16x8 battery outline with a fill bar
//! - [`signal_gauge`] - 8x8 four-level signal strength arcs
//!
//! `value` is a fraction in `0.0..=1.0`; anything outside is clamped and NaN
//! counts as empty. Step counts round half to even, so a battery at `0.5`
//! shows 7 bars (`6.5` rounds to `6`, plus the always-present first bar).
//!
//! Gauges only ever light pixels. Clear the area first to redraw a lower
//! value.
//!
//! ## Example
//!
//! ```
//! use ssd1306_gauge::{Dimensions, FrameBuffer, battery_gauge, signal_gauge};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dims = Dimensions::new(32, 8)?;
//! let mut fb = FrameBuffer::new(dims, &[], [0u8; 32])?;
//! battery_gauge(&mut fb, 0, 0, 0.8)?;
//! signal_gauge(&mut fb, 20, 0, 0.5)?;
//!
//! // A widget that does not fit is not drawn at all
//! assert!(battery_gauge(&mut fb, 20, 0, 1.0).is_err());
//! # Ok(())
//! # }
//! ```

use crate::color::Color;
use crate::error::OutOfBounds;
use crate::framebuffer::FrameBuffer;

/// Width of the triangle and battery gauges
pub const WIDE_GAUGE_WIDTH: u32 = 16;

/// Width of the signal gauge
pub const SIGNAL_GAUGE_WIDTH: u32 = 8;

/// Height of every gauge
pub const GAUGE_HEIGHT: u32 = 8;

/// Pixels added by each signal level, relative to the gauge origin
const SIGNAL_LEVELS: [&[(u32, u32)]; 4] = [
    &[(0, 7)],
    &[(0, 5), (1, 5), (2, 6), (2, 7)],
    &[(0, 3), (1, 3), (2, 3), (3, 4), (4, 5), (4, 6), (4, 7)],
    &[
        (0, 1),
        (1, 1),
        (2, 1),
        (3, 1),
        (4, 2),
        (5, 2),
        (5, 3),
        (6, 4),
        (6, 5),
        (6, 6),
        (6, 7),
    ],
];

/// Draw a 16x8 triangle gauge with its top-left corner at `(x, y)`
///
/// The outline is a right triangle with the vertical edge on the right.
/// `round(value * 10) + 1` bars fill it from the left, each one row taller
/// every second column.
///
/// # Errors
///
/// Returns [`OutOfBounds`] if the 16x8 box does not fit; nothing is drawn.
pub fn triangle_gauge<B>(
    fb: &mut FrameBuffer<B>,
    x: u32,
    y: u32,
    value: f32,
) -> Result<(), OutOfBounds>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fb.check_region(x, y, WIDE_GAUGE_WIDTH, GAUGE_HEIGHT)?;

    for i in 0..16 {
        fb.pixel(x + i, y + 7, Color::On)?;
    }
    for i in 0..8 {
        fb.pixel(x + 15, y + i, Color::On)?;
        fb.pixel(x + 2 * i, y + 7 - i, Color::On)?;
        fb.pixel(x + 2 * i + 1, y + 7 - i, Color::On)?;
    }

    for i in 0..=steps(value, 10.0) {
        for row in (y + 6 - i / 2)..=(y + 6) {
            fb.pixel(x + 4 + i, row, Color::On)?;
        }
    }
    Ok(())
}

/// Draw a 16x8 battery gauge with its top-left corner at `(x, y)`
///
/// `round(value * 13) + 1` one-pixel bars fill the body from the left; the
/// last bar is inset to clear the terminal nub.
///
/// # Errors
///
/// Returns [`OutOfBounds`] if the 16x8 box does not fit; nothing is drawn.
pub fn battery_gauge<B>(
    fb: &mut FrameBuffer<B>,
    x: u32,
    y: u32,
    value: f32,
) -> Result<(), OutOfBounds>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fb.check_region(x, y, WIDE_GAUGE_WIDTH, GAUGE_HEIGHT)?;

    for i in 0..14 {
        fb.pixel(x + i, y, Color::On)?;
        fb.pixel(x + i, y + 7, Color::On)?;
    }
    for i in 0..8 {
        fb.pixel(x, y + i, Color::On)?;
    }
    for i in 1..7 {
        fb.pixel(x + 15, y + i, Color::On)?;
    }
    for (dx, dy) in [(13, 1), (14, 1), (13, 6), (14, 6)] {
        fb.pixel(x + dx, y + dy, Color::On)?;
    }

    for i in 0..=steps(value, 13.0) {
        let rows = if i >= 13 { 2..=5 } else { 1..=6 };
        for row in rows {
            fb.pixel(x + 1 + i, y + row, Color::On)?;
        }
    }
    Ok(())
}

/// Draw an 8x8 signal gauge with its top-left corner at `(x, y)`
///
/// `round(value * 4)` levels are lit, from the corner dot out to the
/// widest arc. Zero draws nothing.
///
/// # Errors
///
/// Returns [`OutOfBounds`] if the 8x8 box does not fit; nothing is drawn.
pub fn signal_gauge<B>(
    fb: &mut FrameBuffer<B>,
    x: u32,
    y: u32,
    value: f32,
) -> Result<(), OutOfBounds>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fb.check_region(x, y, SIGNAL_GAUGE_WIDTH, GAUGE_HEIGHT)?;

    let levels = steps(value, 4.0) as usize;
    for level in SIGNAL_LEVELS.iter().take(levels) {
        for &(dx, dy) in *level {
            fb.pixel(x + dx, y + dy, Color::On)?;
        }
    }
    Ok(())
}

/// Clamp `value` to `0.0..=1.0`, scale and round half to even
fn steps(value: f32, scale: f32) -> u32 {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    libm::rintf(value * scale) as u32
}
