//! UC8151 E-Paper Display Driver
//!
//! A driver for the UC8151 e-paper controller driving a 128x296 monochrome
//! panel, as found on the Badger 2040.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Four refresh speed profiles, OTP or register waveforms
//! - Full and partial (windowed) updates, blocking or non-blocking
//! - Pluggable busy-line wait strategy
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::SpiBus;
//! use uc8151::{Builder, Display, FRAME_SIZE, Interface, Profile};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let cs = MockPin;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let busy = MockPin;
//! # let mut delay = MockDelay;
//! let interface = match Interface::new(spi, cs, dc, rst, busy) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//! let config = Builder::new().update_speed(Profile::Fast).build();
//!
//! let mut display = Display::new(interface, config);
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! let frame = [0u8; FRAME_SIZE];
//! let _ = display.full_update(&frame, true, &mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// UC8151 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Register field values
pub mod flag;
/// Hardware interface abstraction
pub mod interface;
/// Waveform look-up tables for refresh profiles
pub mod lut;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use command::Command;
pub use config::{Builder, BusyWait, Config, FRAME_SIZE, LINE_BYTES, PANEL_HEIGHT, PANEL_WIDTH};
pub use display::{Display, Region, State, Status};
pub use error::{Error, UnknownProfile};
pub use interface::InterfaceError;
pub use interface::{DisplayInterface, Interface, RESET_DELAY_MS};
pub use lut::{Profile, Waveform, duration_estimate};

#[cfg(feature = "graphics")]
pub use graphics::{Frame, FrameSizeError};
