//! Error types for the driver
//!
//! - [`Error`] - failures of display operations
//! - [`UnknownProfile`] - a profile name outside `default`, `medium`, `fast`, `turbo`
//! - [`InterfaceError`](crate::interface::InterfaceError) - low-level bus and pin errors
//!
//! ## Example
//!
//! ```
//! use uc8151::{Profile, UnknownProfile};
//!
//! assert_eq!("turbo".parse::<Profile>(), Ok(Profile::Turbo));
//! assert_eq!("warp".parse::<Profile>(), Err(UnknownProfile));
//! ```

use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Profile name not recognized
    ///
    /// Raised before any bus traffic, so the loaded waveforms are untouched.
    UnknownProfile,
    /// Partial update region outside the panel or empty
    InvalidRegion {
        /// Region origin, gate axis
        x: i32,
        /// Region origin, source axis
        y: i32,
        /// Region width
        w: i32,
        /// Region height
        h: i32,
    },
    /// Frame buffer length does not match the update target
    BufferSize {
        /// Required buffer size in bytes
        expected: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// Update requested before the controller was configured
    Uninitialized,
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "Interface error: {e:?}"),
            Error::UnknownProfile => write!(f, "Unknown update speed profile"),
            Error::InvalidRegion { x, y, w, h } => {
                write!(f, "Invalid region: ({x}, {y}) {w}x{h}")
            }
            Error::BufferSize { expected, provided } => {
                write!(
                    f,
                    "Frame buffer size mismatch: expected {expected} bytes, provided {provided}"
                )
            }
            Error::Uninitialized => write!(f, "Display has not been configured"),
        }
    }
}

impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Error::UnknownProfile => f.write_str("UnknownProfile"),
            Error::InvalidRegion { x, y, w, h } => f
                .debug_struct("InvalidRegion")
                .field("x", x)
                .field("y", y)
                .field("w", w)
                .field("h", h)
                .finish(),
            Error::BufferSize { expected, provided } => f
                .debug_struct("BufferSize")
                .field("expected", expected)
                .field("provided", provided)
                .finish(),
            Error::Uninitialized => f.write_str("Uninitialized"),
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

impl<I: DisplayInterface> From<UnknownProfile> for Error<I> {
    fn from(_: UnknownProfile) -> Self {
        Error::UnknownProfile
    }
}

/// Profile name outside the known set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownProfile;

impl core::fmt::Display for UnknownProfile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Unknown profile (expected default, medium, fast or turbo)")
    }
}

impl core::error::Error for UnknownProfile {}
