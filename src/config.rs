//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_HEIGHT, MAX_WIDTH};

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (corresponds to segment outputs)
    pub width: u8,
    /// Height in pixels (corresponds to common outputs)
    pub height: u8,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width == 0 or width > MAX_WIDTH
    /// - height == 0 or height > MAX_HEIGHT
    /// - height % 8 != 0 (rows are stored as 8-pixel pages)
    pub fn new(width: u8, height: u8) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        if height == 0 || height > MAX_HEIGHT || height % 8 != 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of 8-row pages
    pub fn pages(&self) -> u8 {
        self.height / 8
    }

    /// Pixel data size in bytes, excluding any transport prefix
    pub fn buffer_size(&self) -> usize {
        self.pages() as usize * self.width as usize
    }

    /// Column address window used when streaming the framebuffer
    ///
    /// 64-pixel-wide panels are wired to the middle of the controller's
    /// 128 segment outputs, so their window starts at column 32.
    pub fn column_window(&self) -> (u8, u8) {
        let end = self.width - 1;
        if self.width == 64 {
            (32, end + 32)
        } else {
            (0, end)
        }
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Whether the panel is driven by an external high-voltage supply
    ///
    /// Selects the pre-charge period and disables the internal charge pump.
    pub external_vcc: bool,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use ssd1306_gauge::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(128, 64) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).external_vcc(false).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// External VCC supply
    external_vcc: bool,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set whether an external high-voltage supply is connected
    ///
    /// Defaults to `false` (internal charge pump).
    pub fn external_vcc(mut self, external_vcc: bool) -> Self {
        self.external_vcc = external_vcc;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            external_vcc: self.external_vcc,
        })
    }
}
