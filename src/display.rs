//! Core display operations
//!
//! [`Display`] owns the transport and the framebuffer and tracks the
//! controller's power state:
//!
//! ```text
//! any state   --power_on-->          PoweredRaw
//! PoweredRaw  --init_display-->      Ready
//! Ready, Off  --init_display-->      Ready
//! PoweredRaw  --power_off-->         Off
//! Ready       --power_off-->         Off
//! Off         --power_on_display-->  Ready
//! ```
//!
//! Operations called from a state that does not allow them fail with
//! [`Error::InvalidState`] before anything is written to the bus.

use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::color::Color;
use crate::command::{
    SET_COL_ADDR, SET_CONTRAST, SET_DISP, SET_NORM_INV, SET_PAGE_ADDR, init_sequence,
};
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::framebuffer::FrameBuffer;
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Controller power state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerState {
    /// Nothing has been sent yet
    #[default]
    Unpowered,
    /// Hardware reset done, registers not programmed
    PoweredRaw,
    /// Initialized and showing the framebuffer
    Ready,
    /// Panel switched off; controller RAM and registers are retained
    Off,
}

/// Core display driver for SSD1306
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `B` - Framebuffer storage, `pages * width + I::DATA_PREFIX.len()` bytes
pub struct Display<I, B>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Pixel buffer streamed by [`show`](Self::show)
    framebuffer: FrameBuffer<B>,
    /// Current power state
    state: PowerState,
}

impl<I, B> Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent to the controller; call [`init`](Self::init) or
    /// [`power_on`](Self::power_on) then [`init_display`](Self::init_display).
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `storage` is not exactly
    /// `pages * width` bytes plus the interface's data prefix.
    pub fn new(interface: I, config: Config, storage: B) -> Result<Self, Error<I>> {
        let framebuffer = FrameBuffer::new(config.dimensions, I::DATA_PREFIX, storage)?;
        Ok(Self {
            interface,
            config,
            framebuffer,
            state: PowerState::Unpowered,
        })
    }

    /// Hardware reset followed by full initialization
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.power_on(delay)?;
        self.init_display()
    }

    /// Run the hardware reset sequence
    ///
    /// Allowed from any state. The controller loses its configuration, so
    /// the display always lands in [`PowerState::PoweredRaw`].
    pub fn power_on<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.power_on(delay).map_err(Error::Interface)?;
        self.transition(PowerState::PoweredRaw);
        Ok(())
    }

    /// Program the controller and show a blank screen
    ///
    /// Sends the initialization table (every byte as its own command),
    /// clears the framebuffer and streams it.
    pub fn init_display(&mut self) -> DisplayResult<I> {
        self.require(
            "init_display",
            &[PowerState::PoweredRaw, PowerState::Ready, PowerState::Off],
        )?;

        let dims = self.config.dimensions;
        for step in init_sequence(dims.height, self.config.external_vcc) {
            self.send_command(step.register)?;
            if let Some(argument) = step.argument {
                self.send_command(argument)?;
            }
        }
        debug!(
            "SSD1306 initialized: {}x{}, external_vcc={}",
            dims.width, dims.height, self.config.external_vcc
        );
        self.transition(PowerState::Ready);

        self.framebuffer.fill(Color::Off);
        self.show()
    }

    /// Stream the framebuffer to the controller
    pub fn show(&mut self) -> DisplayResult<I> {
        self.require("show", &[PowerState::Ready])?;

        let (x0, x1) = self.config.dimensions.column_window();
        let last_page = self.config.dimensions.pages() - 1;
        trace!("show: columns {}..={}, pages 0..={}", x0, x1, last_page);

        self.send_command(SET_COL_ADDR)?;
        self.send_command(x0)?;
        self.send_command(x1)?;
        self.send_command(SET_PAGE_ADDR)?;
        self.send_command(0)?;
        self.send_command(last_page)?;
        self.interface
            .write_bulk(self.framebuffer.raw())
            .map_err(Error::Interface)
    }

    /// Set panel contrast (0 = dimmest, 255 = brightest)
    pub fn contrast(&mut self, value: u8) -> DisplayResult<I> {
        self.require("contrast", &[PowerState::Ready])?;
        self.send_command(SET_CONTRAST)?;
        self.send_command(value)
    }

    /// Invert the panel output without touching the framebuffer
    pub fn invert(&mut self, invert: bool) -> DisplayResult<I> {
        self.require("invert", &[PowerState::Ready])?;
        self.send_command(SET_NORM_INV | u8::from(invert))
    }

    /// Switch the panel off
    ///
    /// Only the display-off command is sent; controller RAM and registers
    /// are kept, so [`power_on_display`](Self::power_on_display) can bring
    /// the same image back.
    pub fn power_off(&mut self) -> DisplayResult<I> {
        self.require(
            "power_off",
            &[PowerState::PoweredRaw, PowerState::Ready, PowerState::Off],
        )?;
        self.send_command(SET_DISP)?;
        self.transition(PowerState::Off);
        Ok(())
    }

    /// Switch the panel back on after [`power_off`](Self::power_off)
    pub fn power_on_display(&mut self) -> DisplayResult<I> {
        self.require("power_on_display", &[PowerState::Off])?;
        self.send_command(SET_DISP | 0x01)?;
        self.transition(PowerState::Ready);
        Ok(())
    }

    /// Current power state
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Set every pixel in the framebuffer
    pub fn fill(&mut self, color: impl Into<Color>) {
        self.framebuffer.fill(color);
    }

    /// Set or clear one framebuffer pixel
    pub fn pixel(&mut self, x: u32, y: u32, color: impl Into<Color>) -> DisplayResult<I> {
        self.framebuffer.pixel(x, y, color).map_err(Error::OutOfBounds)
    }

    /// Shift the framebuffer contents; see [`FrameBuffer::scroll`]
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        self.framebuffer.scroll(dx, dy);
    }

    /// Read access to the framebuffer
    pub fn framebuffer(&self) -> &FrameBuffer<B> {
        &self.framebuffer
    }

    /// Write access to the framebuffer, for gauges and graphics
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer<B> {
        &mut self.framebuffer
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the interface and the framebuffer storage
    pub fn release(self) -> (I, B) {
        (self.interface, self.framebuffer.release())
    }

    fn require(&self, operation: &'static str, allowed: &[PowerState]) -> DisplayResult<I> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        warn!("Rejected {} while display is {:?}", operation, self.state);
        Err(Error::InvalidState {
            state: self.state,
            operation,
        })
    }

    fn transition(&mut self, next: PowerState) {
        if self.state != next {
            debug!("Display state {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.write_command(cmd).map_err(Error::Interface)
    }
}
