//! SSD1306 OLED Display Driver
//!
//! A driver for SSD1306 monochrome OLED controllers (up to 128x64 pixels)
//! with small bitmap gauges for status screens.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - I2C and SPI transports
//! - Page-organised framebuffer over caller-provided storage
//! - Triangle, battery and signal gauges
//! - `embedded-graphics` integration (with `graphics` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::{I2c, Operation};
//! use ssd1306_gauge::{Builder, Dimensions, Display, I2cInterface, battery_gauge, signal_gauge};
//!
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let i2c = MockI2c;
//! # let mut delay = MockDelay;
//! let interface = I2cInterface::new(i2c);
//! let dims = match Dimensions::new(128, 32) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! // 512 pixel bytes plus the I2C data control byte
//! let mut display = match Display::new(interface, config, [0u8; 513]) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! let _ = display.init(&mut delay);
//!
//! let _ = battery_gauge(display.framebuffer_mut(), 0, 0, 0.75);
//! let _ = signal_gauge(display.framebuffer_mut(), 120, 0, 0.5);
//! let _ = display.show();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Monochrome pixel color
pub mod color;
/// SSD1306 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Packed monochrome framebuffer
pub mod framebuffer;
/// Fixed-size bitmap gauges
pub mod gauge;
/// Hardware interface abstraction
pub mod interface;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::Color;
pub use config::{Builder, Config, Dimensions, MAX_HEIGHT, MAX_WIDTH};
pub use display::{Display, PowerState};
pub use error::{BufferLength, BuilderError, Error, OutOfBounds};
pub use framebuffer::FrameBuffer;
pub use gauge::{battery_gauge, signal_gauge, triangle_gauge};
pub use interface::{
    ConfigurableBus, DEFAULT_I2C_ADDRESS, DisplayInterface, I2cInterface, InterfaceError,
    NoResetPin, SPI_FREQUENCY_HZ, SPI_MODE, SpiInterface,
};
