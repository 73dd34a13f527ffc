//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! framebuffer addressing ([`OutOfBounds`]) and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`OutOfBounds`] - A pixel or widget does not fit the framebuffer
//! - [`BufferLength`] - Framebuffer storage does not match the display
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use ssd1306_gauge::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Height must be a whole number of pages
//! let result = Dimensions::new(128, 30);
//! assert!(result.is_err());
//! ```

use crate::display::PowerState;
use crate::interface::DisplayInterface;

/// Maximum number of columns (segment outputs) on the SSD1306
pub const MAX_WIDTH: u8 = 128;

/// Maximum number of rows (common outputs) on the SSD1306
pub const MAX_HEIGHT: u8 = 64;

/// A coordinate or region falls outside the framebuffer
///
/// Out-of-range pixels are rejected rather than clamped; the buffer is left
/// untouched when this is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfBounds {
    /// X coordinate that was requested
    pub x: u32,
    /// Y coordinate that was requested
    pub y: u32,
}

impl core::fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Coordinate out of bounds: x={}, y={}", self.x, self.y)
    }
}

impl core::error::Error for OutOfBounds {}

/// Framebuffer storage has the wrong length
///
/// Storage must be exactly `pages * width` bytes plus the transport's
/// data prefix ([`DisplayInterface::DATA_PREFIX`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferLength {
    /// Required buffer size in bytes
    pub required: usize,
    /// Provided buffer size in bytes
    pub provided: usize,
}

impl core::fmt::Display for BufferLength {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Wrong buffer length: required {} bytes, provided {}",
            self.required, self.provided
        )
    }
}

impl core::error::Error for BufferLength {}

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (I2C/SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Pixel addressing outside the framebuffer
    OutOfBounds(OutOfBounds),
    /// Framebuffer storage has the wrong length
    BufferLength(BufferLength),
    /// Operation is not permitted in the current power state
    InvalidState {
        /// State the display was in
        state: PowerState,
        /// Operation that was attempted
        operation: &'static str,
    },
}

impl<I: DisplayInterface> From<OutOfBounds> for Error<I> {
    fn from(value: OutOfBounds) -> Self {
        Self::OutOfBounds(value)
    }
}

impl<I: DisplayInterface> From<BufferLength> for Error<I> {
    fn from(value: BufferLength) -> Self {
        Self::BufferLength(value)
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::OutOfBounds(err) => write!(f, "{err}"),
            Self::BufferLength(err) => write!(f, "{err}"),
            Self::InvalidState { state, operation } => {
                write!(f, "Cannot {operation} while display is {state:?}")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width in pixels requested
        width: u8,
        /// Height in pixels requested
        height: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_WIDTH}x{MAX_HEIGHT}, height must be multiple of 8)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
