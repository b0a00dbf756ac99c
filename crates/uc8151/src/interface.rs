//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the UC8151 controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The UC8151 requires:
//! - SPI bus (MOSI + SCK, MISO for register reads)
//! - 4 GPIO pins:
//!   - **CS**: Chip select (output, active low)
//!   - **DC**: Data/Command select (output, low=command, high=data)
//!   - **RST**: Reset (output, active low)
//!   - **BUSY**: Busy status (input with pull-up, low while busy)
//!
//! ## Wire protocol
//!
//! Every call is one transaction bounded by CS: the opcode byte goes out with DC
//! low, then, only if there is a payload, DC goes high and the payload follows.
//! Because DC changes in the middle of a transaction, the interface drives CS
//! itself and takes an [`SpiBus`] rather than an `SpiDevice`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use uc8151::{Command, DisplayInterface, Interface};
//!
//! let mut interface = Interface::new(spi_bus, cs_pin, dc_pin, rst_pin, busy_pin);
//!
//! // Command only
//! interface.send(Command::PowerOn, &[])?;
//!
//! // Command with payload
//! interface.send(Command::Pll, &[0x3A])?;
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::command::Command;

/// Reset pulse low time and recovery time
pub const RESET_DELAY_MS: u32 = 10;

/// Trait for hardware interface to UC8151 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// Implementations are not reentrant: a call must complete before the next
/// one starts. The display serializes calls through `&mut self`.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command, followed by its payload if `payload` is non-empty
    ///
    /// The implementation must:
    /// 1. Set CS low
    /// 2. Set DC low and send the opcode byte
    /// 3. If the payload is non-empty, set DC high and send the payload
    /// 4. Set CS high, also when a write failed
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send(&mut self, command: Command, payload: &[u8]) -> Result<(), Self::Error>;

    /// Send a command and read `buf.len()` bytes back in the data phase
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn receive(&mut self, command: Command, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// The implementation must:
    /// 1. Set RST pin low
    /// 2. Wait at least 10ms
    /// 3. Set RST pin high
    /// 4. Wait at least 10ms
    ///
    /// # Errors
    ///
    /// Returns an error if the reset pin cannot be driven.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Sample the busy line once
    ///
    /// BUSY is active low: a low level means the controller is processing.
    ///
    /// # Errors
    ///
    /// Returns an error if the busy pin cannot be read.
    fn is_busy(&mut self) -> Result<bool, Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::Spi(e) => write!(f, "SPI error: {e:?}"),
            InterfaceError::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface implementation for UC8151
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI bus and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`], not shared with other devices
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
pub struct Interface<SPI, CS, DC, RST, BUSY> {
    /// SPI bus for communication
    spi: SPI,
    /// Chip select pin (active low)
    cs: CS,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Busy pin (active low)
    busy: BUSY,
}

impl<SPI, CS, DC, RST, BUSY, PinErr> Interface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
{
    /// Create a new Interface
    ///
    /// Drives CS and RST to their idle (high) level.
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::Pin`] if either pin cannot be driven.
    pub fn new(
        spi: SPI,
        mut cs: CS,
        dc: DC,
        mut rst: RST,
        busy: BUSY,
    ) -> Result<Self, InterfaceError<SPI::Error, PinErr>> {
        cs.set_high().map_err(InterfaceError::Pin)?;
        rst.set_high().map_err(InterfaceError::Pin)?;
        Ok(Self {
            spi,
            cs,
            dc,
            rst,
            busy,
        })
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, CS, DC, RST, BUSY) {
        (self.spi, self.cs, self.dc, self.rst, self.busy)
    }

    /// Opcode phase; CS must already be low
    fn write_command(
        &mut self,
        command: Command,
    ) -> Result<(), InterfaceError<SPI::Error, PinErr>> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi
            .write(&[command.addr()])
            .map_err(InterfaceError::Spi)?;
        // DC must not change while the opcode is still shifting out
        self.spi.flush().map_err(InterfaceError::Spi)
    }

    /// Run `phase` with CS asserted, releasing CS whatever the outcome
    fn selected<F>(&mut self, phase: F) -> Result<(), InterfaceError<SPI::Error, PinErr>>
    where
        F: FnOnce(&mut Self) -> Result<(), InterfaceError<SPI::Error, PinErr>>,
    {
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        let result = phase(self);
        let release = self.cs.set_high().map_err(InterfaceError::Pin);
        result.and(release)
    }
}

impl<SPI, CS, DC, RST, BUSY, PinErr> DisplayInterface for Interface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send(&mut self, command: Command, payload: &[u8]) -> Result<(), Self::Error> {
        self.selected(|this| {
            this.write_command(command)?;
            if !payload.is_empty() {
                this.dc.set_high().map_err(InterfaceError::Pin)?;
                this.spi.write(payload).map_err(InterfaceError::Spi)?;
                this.spi.flush().map_err(InterfaceError::Spi)?;
            }
            Ok(())
        })
    }

    fn receive(&mut self, command: Command, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.selected(|this| {
            this.write_command(command)?;
            this.dc.set_high().map_err(InterfaceError::Pin)?;
            this.spi.read(buf).map_err(InterfaceError::Spi)?;
            this.spi.flush().map_err(InterfaceError::Spi)
        })
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        // Reset sequence: LOW -> wait 10ms -> HIGH -> wait 10ms
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }

    fn is_busy(&mut self) -> Result<bool, Self::Error> {
        self.busy.is_low().map_err(InterfaceError::Pin)
    }
}
