//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and its two
//! implementations:
//!
//! - [`I2cInterface`] - I2C with an optional reset line
//! - [`SpiInterface`] - SPI with data/command, reset and chip-select lines
//!
//! ## I2C framing
//!
//! Every command byte goes out in its own write of
//! `[CONTROL_COMMAND, byte]`. The framebuffer storage starts with
//! [`CONTROL_DATA`], so a refresh is a single write of the whole buffer.
//!
//! ## SPI framing
//!
//! Before every transfer the bus is reconfigured to [`SPI_FREQUENCY_HZ`] and
//! [`SPI_MODE`], because other devices may share it with different settings.
//! The driver toggles chip-select itself, so it takes an [`SpiBus`] rather
//! than an `SpiDevice`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{I2c, Operation};
//! use ssd1306_gauge::{DisplayInterface, I2cInterface};
//! # use core::convert::Infallible;
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
//! // Create interface at the default address 0x3C, no reset line
//! let mut interface = I2cInterface::new(MockI2c);
//!
//! // Send command
//! let _ = interface.write_command(0xAF); // Display on
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::{MODE_0, Mode, SpiBus};

use crate::command::{CONTROL_COMMAND, CONTROL_DATA};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Default I2C address of SSD1306 modules (SA0 low)
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// SPI clock rate applied before every transfer (10 MiHz)
pub const SPI_FREQUENCY_HZ: u32 = 10 * 1024 * 1024;

/// SPI mode applied before every transfer (CPOL = 0, CPHA = 0)
pub const SPI_MODE: Mode = MODE_0;

/// Reset line held high before the pulse, in milliseconds
const RESET_SETTLE_MS: u32 = 5;

/// Reset line held low, in milliseconds
const RESET_PULSE_MS: u32 = 10;

/// Trait for hardware interface to the SSD1306 controller
///
/// This trait abstracts over the I2C and SPI transports so the
/// [`Display`](crate::display::Display) never depends on bus details.
///
/// ## Implementing
///
/// For most cases, use [`I2cInterface`] or [`SpiInterface`]. To support a
/// different wiring, implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Bytes the transport needs at the start of the framebuffer storage
    ///
    /// The framebuffer writes them once; [`write_bulk`](Self::write_bulk)
    /// then receives them as the first bytes of every transfer.
    const DATA_PREFIX: &'static [u8];

    /// Run the hardware reset sequence
    ///
    /// Where a reset line is present, the implementation must:
    /// 1. Set RST high, wait 5ms
    /// 2. Set RST low, wait 10ms
    /// 3. Set RST high
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO write fails.
    fn power_on<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Send a single command byte to the controller
    ///
    /// # Errors
    ///
    /// Returns an error if bus communication or GPIO fails.
    fn write_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send framebuffer storage to the controller in one transfer
    ///
    /// `data` starts with [`DATA_PREFIX`](Self::DATA_PREFIX).
    ///
    /// # Errors
    ///
    /// Returns an error if bus communication or GPIO fails.
    fn write_bulk(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over bus and GPIO error types.
#[derive(Debug, PartialEq, Eq)]
pub enum InterfaceError<BusErr, PinErr> {
    /// I2C or SPI communication error
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

/// SPI bus that can be switched to the display's clock and mode
///
/// embedded-hal leaves bus configuration to the HAL; implement this on
/// your HAL's SPI type (typically by forwarding to its `set_config`).
pub trait ConfigurableBus: SpiBus {
    /// Apply clock rate and mode before a transfer
    ///
    /// # Errors
    ///
    /// Returns the bus error if the HAL rejects the configuration.
    fn reconfigure(&mut self, frequency_hz: u32, mode: Mode) -> InterfaceResult<(), Self::Error>;
}

/// Placeholder for an I2C module without a wired reset line
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResetPin;

impl embedded_hal::digital::ErrorType for NoResetPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn pulse_reset<P: OutputPin, D: DelayNs>(rst: &mut P, delay: &mut D) -> Result<(), P::Error> {
    rst.set_high()?;
    delay.delay_ms(RESET_SETTLE_MS);
    rst.set_low()?;
    delay.delay_ms(RESET_PULSE_MS);
    rst.set_high()
}

/// I2C transport
///
/// ## Type Parameters
///
/// * `I2C` - Bus implementing [`I2c`]
/// * `RST` - Optional reset pin implementing [`OutputPin`]
#[derive(Debug)]
pub struct I2cInterface<I2C, RST = NoResetPin> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
    /// Reset pin, if wired
    reset: Option<RST>,
}

impl<I2C> I2cInterface<I2C, NoResetPin>
where
    I2C: I2c,
{
    /// Create an interface at [`DEFAULT_I2C_ADDRESS`] without a reset line
    pub fn new(i2c: I2C) -> Self {
        Self::new_with_address(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Create an interface at `address` without a reset line
    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            reset: None,
        }
    }
}

impl<I2C, RST> I2cInterface<I2C, RST>
where
    I2C: I2c,
    RST: OutputPin,
{
    /// Create an interface at `address` with a reset line
    ///
    /// [`power_on`](DisplayInterface::power_on) pulses `rst`.
    pub fn with_reset(i2c: I2C, address: u8, rst: RST) -> Self {
        Self {
            i2c,
            address,
            reset: Some(rst),
        }
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the bus and reset pin
    pub fn release(self) -> (I2C, Option<RST>) {
        (self.i2c, self.reset)
    }
}

impl<I2C, RST> DisplayInterface for I2cInterface<I2C, RST>
where
    I2C: I2c,
    RST: OutputPin,
{
    type Error = InterfaceError<I2C::Error, RST::Error>;

    const DATA_PREFIX: &'static [u8] = &[CONTROL_DATA];

    fn power_on<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        let Some(rst) = self.reset.as_mut() else {
            return Ok(());
        };
        pulse_reset(rst, delay).map_err(InterfaceError::Pin)
    }

    fn write_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, command])
            .map_err(InterfaceError::Bus)
    }

    fn write_bulk(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.i2c
            .write(self.address, data)
            .map_err(InterfaceError::Bus)
    }
}

/// SPI transport
///
/// ## Type Parameters
///
/// * `SPI` - Bus implementing [`ConfigurableBus`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `CS` - Chip-select pin implementing [`OutputPin`] (active low)
#[derive(Debug)]
pub struct SpiInterface<SPI, DC, RST, CS> {
    /// SPI bus, possibly shared
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Chip-select pin (active low)
    cs: CS,
}

impl<SPI, DC, RST, CS> SpiInterface<SPI, DC, RST, CS>
where
    SPI: ConfigurableBus,
    DC: OutputPin,
    RST: OutputPin,
    CS: OutputPin,
{
    /// Create a new SPI interface
    ///
    /// Pins are not touched until the first operation;
    /// [`power_on`](DisplayInterface::power_on) deselects the chip before
    /// pulsing reset.
    pub fn new(spi: SPI, dc: DC, rst: RST, cs: CS) -> Self {
        Self { spi, dc, rst, cs }
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, DC, RST, CS) {
        (self.spi, self.dc, self.rst, self.cs)
    }
}

impl<SPI, DC, RST, CS, PinErr> SpiInterface<SPI, DC, RST, CS>
where
    SPI: ConfigurableBus,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
{
    fn transfer(
        &mut self,
        data_mode: bool,
        bytes: &[u8],
    ) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        self.spi
            .reconfigure(SPI_FREQUENCY_HZ, SPI_MODE)
            .map_err(InterfaceError::Bus)?;
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        if data_mode {
            self.dc.set_high().map_err(InterfaceError::Pin)?;
        } else {
            self.dc.set_low().map_err(InterfaceError::Pin)?;
        }
        self.cs.set_low().map_err(InterfaceError::Pin)?;

        let written = self.spi.write(bytes).and_then(|()| self.spi.flush());
        // Release chip-select even when the transfer failed
        let released = self.cs.set_high();
        written.map_err(InterfaceError::Bus)?;
        released.map_err(InterfaceError::Pin)
    }
}

impl<SPI, DC, RST, CS, PinErr> DisplayInterface for SpiInterface<SPI, DC, RST, CS>
where
    SPI: ConfigurableBus,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    const DATA_PREFIX: &'static [u8] = &[];

    fn power_on<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        pulse_reset(&mut self.rst, delay).map_err(InterfaceError::Pin)
    }

    fn write_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.transfer(false, &[command])
    }

    fn write_bulk(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.transfer(true, data)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    /// Everything the mocks observe, in order
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Event {
        I2cWrite(u8, Vec<u8>),
        SpiConfig(u32, Mode),
        SpiWrite(Vec<u8>),
        SpiFlush,
        Pin(&'static str, bool),
        DelayMs(u32),
    }

    pub(crate) type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct MockError;

    impl embedded_hal::i2c::Error for MockError {
        fn kind(&self) -> embedded_hal::i2c::ErrorKind {
            embedded_hal::i2c::ErrorKind::Other
        }
    }

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    #[derive(Debug)]
    pub(crate) struct MockI2c {
        pub(crate) log: Log,
        pub(crate) fail: bool,
    }

    impl embedded_hal::i2c::ErrorType for MockI2c {
        type Error = MockError;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [embedded_hal::i2c::Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            // A single transaction is recorded as one write
            let mut bytes = Vec::new();
            for op in operations.iter() {
                if let embedded_hal::i2c::Operation::Write(data) = op {
                    bytes.extend_from_slice(data);
                }
            }
            self.log.borrow_mut().push(Event::I2cWrite(address, bytes));
            Ok(())
        }
    }

    #[derive(Debug)]
    pub(crate) struct MockSpi {
        pub(crate) log: Log,
        pub(crate) fail_write: bool,
    }

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiBus for MockSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            if self.fail_write {
                return Err(MockError);
            }
            self.log.borrow_mut().push(Event::SpiWrite(words.to_vec()));
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::SpiFlush);
            Ok(())
        }
    }

    impl ConfigurableBus for MockSpi {
        fn reconfigure(&mut self, frequency_hz: u32, mode: Mode) -> Result<(), Self::Error> {
            self.log
                .borrow_mut()
                .push(Event::SpiConfig(frequency_hz, mode));
            Ok(())
        }
    }

    #[derive(Debug)]
    pub(crate) struct MockPin {
        pub(crate) name: &'static str,
        pub(crate) log: Log,
        pub(crate) fail: bool,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = MockError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.log.borrow_mut().push(Event::Pin(self.name, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.log.borrow_mut().push(Event::Pin(self.name, true));
            Ok(())
        }
    }

    pub(crate) struct MockDelay {
        pub(crate) log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::DelayMs(ms));
        }
    }

    pub(crate) fn pin(name: &'static str, log: &Log) -> MockPin {
        MockPin {
            name,
            log: log.clone(),
            fail: false,
        }
    }

    pub(crate) fn i2c(log: &Log) -> MockI2c {
        MockI2c {
            log: log.clone(),
            fail: false,
        }
    }

    pub(crate) fn spi_interface(log: &Log) -> SpiInterface<MockSpi, MockPin, MockPin, MockPin> {
        SpiInterface::new(
            MockSpi {
                log: log.clone(),
                fail_write: false,
            },
            pin("dc", log),
            pin("rst", log),
            pin("cs", log),
        )
    }

    fn reset_sequence() -> Vec<Event> {
        vec![
            Event::Pin("rst", true),
            Event::DelayMs(5),
            Event::Pin("rst", false),
            Event::DelayMs(10),
            Event::Pin("rst", true),
        ]
    }

    #[test]
    fn test_i2c_command_framing() {
        let log = Log::default();
        let mut interface = I2cInterface::new(i2c(&log));
        interface.write_command(0xAF).unwrap();
        interface.write_command(0x3F).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::I2cWrite(0x3C, vec![0x80, 0xAF]),
                Event::I2cWrite(0x3C, vec![0x80, 0x3F]),
            ]
        );
    }

    #[test]
    fn test_i2c_bulk_is_single_transaction() {
        let log = Log::default();
        let mut interface = I2cInterface::new_with_address(i2c(&log), 0x3D);
        let buffer = [0x40, 0x01, 0x02, 0x03];
        interface.write_bulk(&buffer).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![Event::I2cWrite(0x3D, vec![0x40, 0x01, 0x02, 0x03])]
        );
    }

    #[test]
    fn test_i2c_data_prefix_is_data_control_byte() {
        assert_eq!(
            <I2cInterface<MockI2c> as DisplayInterface>::DATA_PREFIX,
            &[0x40]
        );
        assert!(
            <SpiInterface<MockSpi, MockPin, MockPin, MockPin> as DisplayInterface>::DATA_PREFIX
                .is_empty()
        );
    }

    #[test]
    fn test_i2c_power_on_without_reset_is_noop() {
        let log = Log::default();
        let mut interface = I2cInterface::new(i2c(&log));
        let mut delay = MockDelay { log: log.clone() };
        interface.power_on(&mut delay).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_i2c_power_on_pulses_reset() {
        let log = Log::default();
        let mut interface = I2cInterface::with_reset(i2c(&log), 0x3C, pin("rst", &log));
        let mut delay = MockDelay { log: log.clone() };
        interface.power_on(&mut delay).unwrap();
        assert_eq!(*log.borrow(), reset_sequence());
    }

    #[test]
    fn test_i2c_bus_error_propagates() {
        let log = Log::default();
        let mut interface = I2cInterface::new(MockI2c {
            log: log.clone(),
            fail: true,
        });
        assert_eq!(
            interface.write_command(0xAE),
            Err(InterfaceError::Bus(MockError))
        );
    }

    #[test]
    fn test_i2c_reset_pin_error_propagates() {
        let log = Log::default();
        let rst = MockPin {
            name: "rst",
            log: log.clone(),
            fail: true,
        };
        let mut interface = I2cInterface::with_reset(i2c(&log), 0x3C, rst);
        let mut delay = MockDelay { log: log.clone() };
        assert_eq!(
            interface.power_on(&mut delay),
            Err(InterfaceError::Pin(MockError))
        );
    }

    #[test]
    fn test_spi_command_framing() {
        let log = Log::default();
        let mut interface = spi_interface(&log);
        interface.write_command(0xA6).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::SpiConfig(10 * 1024 * 1024, MODE_0),
                Event::Pin("cs", true),
                Event::Pin("dc", false),
                Event::Pin("cs", false),
                Event::SpiWrite(vec![0xA6]),
                Event::SpiFlush,
                Event::Pin("cs", true),
            ]
        );
    }

    #[test]
    fn test_spi_bulk_framing_sets_dc_high() {
        let log = Log::default();
        let mut interface = spi_interface(&log);
        interface.write_bulk(&[0xFF, 0x00]).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::SpiConfig(SPI_FREQUENCY_HZ, SPI_MODE),
                Event::Pin("cs", true),
                Event::Pin("dc", true),
                Event::Pin("cs", false),
                Event::SpiWrite(vec![0xFF, 0x00]),
                Event::SpiFlush,
                Event::Pin("cs", true),
            ]
        );
    }

    #[test]
    fn test_spi_reconfigures_before_every_transfer() {
        let log = Log::default();
        let mut interface = spi_interface(&log);
        interface.write_command(0xAE).unwrap();
        interface.write_command(0xAF).unwrap();
        interface.write_bulk(&[0x00]).unwrap();
        let configs = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::SpiConfig(..)))
            .count();
        assert_eq!(configs, 3);
    }

    #[test]
    fn test_spi_write_error_still_releases_chip_select() {
        let log = Log::default();
        let mut interface = SpiInterface::new(
            MockSpi {
                log: log.clone(),
                fail_write: true,
            },
            pin("dc", &log),
            pin("rst", &log),
            pin("cs", &log),
        );
        assert_eq!(
            interface.write_command(0xAE),
            Err(InterfaceError::Bus(MockError))
        );
        assert_eq!(log.borrow().last(), Some(&Event::Pin("cs", true)));
    }

    #[test]
    fn test_spi_power_on_always_pulses_reset() {
        let log = Log::default();
        let mut interface = spi_interface(&log);
        let mut delay = MockDelay { log: log.clone() };
        interface.power_on(&mut delay).unwrap();
        let mut expected = vec![Event::Pin("cs", true)];
        expected.extend(reset_sequence());
        assert_eq!(*log.borrow(), expected);
    }
}
