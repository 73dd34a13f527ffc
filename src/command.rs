//! SSD1306 command definitions
//!
//! This module defines the command bytes used to control the SSD1306 OLED
//! controller, plus the fixed initialization table sent by
//! [`Display::init_display`](crate::Display::init_display).
//!
//! ## Command Structure
//!
//! Every byte of a command, including its argument bytes, is sent through
//! [`DisplayInterface::write_command`](crate::DisplayInterface::write_command):
//! - over I2C each byte is prefixed with [`CONTROL_COMMAND`] in its own transaction
//! - over SPI each byte is clocked with DC low
//!
//! ## Example
//!
//! ```
//! use ssd1306_gauge::command::{init_sequence, SET_MUX_RATIO};
//!
//! let steps = init_sequence(32, false);
//! let mux = steps.iter().find(|step| step.register == SET_MUX_RATIO);
//! assert_eq!(mux.and_then(|step| step.argument), Some(31));
//! ```

// Fundamental commands

/// Set contrast control (0x81)
///
/// Followed by one byte, 0x00..=0xFF.
pub const SET_CONTRAST: u8 = 0x81;

/// Entire display on (0xA4)
///
/// `0xA4` shows RAM content, `0xA5` lights every pixel regardless of RAM.
pub const SET_ENTIRE_ON: u8 = 0xA4;

/// Normal / inverse display (0xA6)
///
/// OR with 1 to invert.
pub const SET_NORM_INV: u8 = 0xA6;

/// Display off (0xAE)
///
/// OR with 1 (`0xAF`) to switch the panel on.
pub const SET_DISP: u8 = 0xAE;

// Addressing commands

/// Memory addressing mode (0x20)
///
/// Followed by one byte: 0x00 horizontal, 0x01 vertical, 0x02 page.
pub const SET_MEM_ADDR: u8 = 0x20;

/// Column address window (0x21)
///
/// Followed by start and end column.
pub const SET_COL_ADDR: u8 = 0x21;

/// Page address window (0x22)
///
/// Followed by start and end page.
pub const SET_PAGE_ADDR: u8 = 0x22;

// Hardware configuration commands

/// Display start line base (0x40)
///
/// OR with the start line, 0..=63.
pub const SET_DISP_START_LINE: u8 = 0x40;

/// Segment remap base (0xA0)
///
/// OR with 1 to map column 127 to SEG0.
pub const SET_SEG_REMAP: u8 = 0xA0;

/// Multiplex ratio (0xA8)
///
/// Followed by `height - 1`.
pub const SET_MUX_RATIO: u8 = 0xA8;

/// COM output scan direction base (0xC0)
///
/// OR with 0x08 to scan from COM[N-1] down to COM0.
pub const SET_COM_OUT_DIR: u8 = 0xC0;

/// Display offset (0xD3)
///
/// Followed by the vertical shift, 0..=63.
pub const SET_DISP_OFFSET: u8 = 0xD3;

/// COM pins hardware configuration (0xDA)
///
/// Followed by 0x02 (sequential) or 0x12 (alternative).
pub const SET_COM_PIN_CFG: u8 = 0xDA;

// Timing and driving scheme commands

/// Display clock divide ratio / oscillator frequency (0xD5)
pub const SET_DISP_CLK_DIV: u8 = 0xD5;

/// Pre-charge period (0xD9)
pub const SET_PRECHARGE: u8 = 0xD9;

/// VCOMH deselect level (0xDB)
pub const SET_VCOM_DESEL: u8 = 0xDB;

/// Charge pump setting (0x8D)
///
/// Followed by 0x14 (enabled) or 0x10 (disabled, external VCC).
pub const SET_CHARGE_PUMP: u8 = 0x8D;

// I2C control bytes

/// I2C control byte preceding a single command byte (Co=1, D/C#=0)
pub const CONTROL_COMMAND: u8 = 0x80;

/// I2C control byte preceding a run of display data (Co=0, D/C#=1)
pub const CONTROL_DATA: u8 = 0x40;

/// Number of steps in the initialization table
pub const INIT_STEPS: usize = 16;

/// One entry of the initialization table
///
/// A register byte, optionally followed by a single argument byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitStep {
    /// Command byte (already OR-ed with any inline flag bits)
    pub register: u8,
    /// Argument byte, if the command takes one
    pub argument: Option<u8>,
}

impl InitStep {
    const fn bare(register: u8) -> Self {
        Self {
            register,
            argument: None,
        }
    }

    const fn with(register: u8, argument: u8) -> Self {
        Self {
            register,
            argument: Some(argument),
        }
    }
}

/// Build the initialization table for a panel
///
/// The result depends only on `height` and `external_vcc`.
///
/// # Arguments
///
/// * `height` - Panel height in pixels (multiplex ratio is `height - 1`)
/// * `external_vcc` - True if the panel is driven by an external high-voltage supply
pub const fn init_sequence(height: u8, external_vcc: bool) -> [InitStep; INIT_STEPS] {
    [
        InitStep::bare(SET_DISP),
        // horizontal addressing
        InitStep::with(SET_MEM_ADDR, 0x00),
        InitStep::bare(SET_DISP_START_LINE),
        // column 127 mapped to SEG0
        InitStep::bare(SET_SEG_REMAP | 0x01),
        InitStep::with(SET_MUX_RATIO, height.saturating_sub(1)),
        // scan from COM[N] to COM0
        InitStep::bare(SET_COM_OUT_DIR | 0x08),
        InitStep::with(SET_DISP_OFFSET, 0x00),
        InitStep::with(SET_COM_PIN_CFG, if height == 32 { 0x02 } else { 0x12 }),
        InitStep::with(SET_DISP_CLK_DIV, 0x80),
        InitStep::with(SET_PRECHARGE, if external_vcc { 0x22 } else { 0xF1 }),
        // 0.83 * Vcc
        InitStep::with(SET_VCOM_DESEL, 0x30),
        InitStep::with(SET_CONTRAST, 0xFF),
        // output follows RAM contents
        InitStep::bare(SET_ENTIRE_ON),
        InitStep::bare(SET_NORM_INV),
        InitStep::with(SET_CHARGE_PUMP, if external_vcc { 0x10 } else { 0x14 }),
        InitStep::bare(SET_DISP | 0x01),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn flatten(steps: &[InitStep]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for step in steps {
            bytes.push(step.register);
            if let Some(arg) = step.argument {
                bytes.push(arg);
            }
        }
        bytes
    }

    #[test]
    fn test_init_sequence_128x32_internal_vcc() {
        let bytes = flatten(&init_sequence(32, false));
        assert_eq!(
            bytes,
            [
                0xAE, 0x20, 0x00, 0x40, 0xA1, 0xA8, 0x1F, 0xC8, 0xD3, 0x00, 0xDA, 0x02, 0xD5,
                0x80, 0xD9, 0xF1, 0xDB, 0x30, 0x81, 0xFF, 0xA4, 0xA6, 0x8D, 0x14, 0xAF,
            ]
        );
    }

    #[test]
    fn test_init_sequence_64_rows_external_vcc() {
        let bytes = flatten(&init_sequence(64, true));
        assert_eq!(
            bytes,
            [
                0xAE, 0x20, 0x00, 0x40, 0xA1, 0xA8, 0x3F, 0xC8, 0xD3, 0x00, 0xDA, 0x12, 0xD5,
                0x80, 0xD9, 0x22, 0xDB, 0x30, 0x81, 0xFF, 0xA4, 0xA6, 0x8D, 0x10, 0xAF,
            ]
        );
    }

    #[test]
    fn test_init_table_length() {
        for external_vcc in [false, true] {
            let steps = init_sequence(64, external_vcc);
            assert_eq!(steps.len(), 16);
            assert_eq!(steps.iter().filter(|s| s.argument.is_some()).count(), 9);
            assert_eq!(flatten(&steps).len(), 25);
        }
    }

    #[test]
    fn test_init_sequence_is_deterministic() {
        assert_eq!(init_sequence(48, false), init_sequence(48, false));
        assert_ne!(init_sequence(48, false), init_sequence(48, true));
    }

    #[test]
    fn test_init_sequence_starts_off_ends_on() {
        let steps = init_sequence(16, false);
        assert_eq!(steps[0], InitStep::bare(0xAE));
        assert_eq!(steps[INIT_STEPS - 1], InitStep::bare(0xAF));
    }

    #[test]
    fn test_com_pin_config_only_compact_for_32_rows() {
        for height in [8u8, 16, 24, 40, 48, 56, 64] {
            let steps = init_sequence(height, false);
            let cfg = steps
                .iter()
                .find(|step| step.register == SET_COM_PIN_CFG)
                .and_then(|step| step.argument);
            assert_eq!(cfg, Some(0x12), "height {height}");
        }
    }
}
