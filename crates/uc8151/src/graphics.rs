//! Graphics support via embedded-graphics
//!
//! [`Frame`] wraps a byte buffer laid out the way the controller expects it
//! and implements [`DrawTarget`] for [`BinaryColor`], so the usual
//! embedded-graphics primitives can render straight into a frame that is then
//! handed to [`Display::full_update`](crate::display::Display::full_update) or
//! [`Display::partial_update`](crate::display::Display::partial_update).
//!
//! Coordinates are landscape: `x` along the 296 gate lines, `y` along the 128
//! source pixels. A region frame is drawn in region-local coordinates.
//!
//! ## Example
//!
//! ```rust,ignore
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     text::Text,
//! };
//! use uc8151::{FRAME_SIZE, Frame};
//!
//! let mut frame = Frame::full([0u8; FRAME_SIZE])?;
//! Text::new("Hello, Badger!", Point::new(10, 20),
//!     MonoTextStyle::new(&FONT_6X10, BinaryColor::On))
//!     .draw(&mut frame)?;
//!
//! display.full_update(frame.as_bytes(), true, &mut delay)?;
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::config::{FRAME_SIZE, LINE_BYTES, PANEL_HEIGHT, PANEL_WIDTH};
use crate::display::Region;
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Buffer length does not fit the frame geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSizeError {
    pub expected: usize,
    pub provided: usize,
}

impl core::fmt::Display for FrameSizeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Frame buffer size mismatch: expected {} bytes, provided {}",
            self.expected, self.provided
        )
    }
}

impl core::error::Error for FrameSizeError {}

impl<I: DisplayInterface> From<FrameSizeError> for Error<I> {
    fn from(e: FrameSizeError) -> Self {
        Error::BufferSize {
            expected: e.expected,
            provided: e.provided,
        }
    }
}

/// Frame buffer with embedded-graphics support
///
/// ## Type Parameters
///
/// * `B` - Buffer type, e.g. `[u8; FRAME_SIZE]` or `&mut [u8]`
pub struct Frame<B> {
    buffer: B,
    /// Gate lines covered
    width: u32,
    /// Source pixels covered
    height: u32,
    /// Bytes per gate line
    line_bytes: usize,
    /// Bit offset of local y = 0 inside the first byte of a line
    y_shift: u32,
}

impl<B> Frame<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap a whole-panel buffer of exactly [`FRAME_SIZE`] bytes
    pub fn full(buffer: B) -> Result<Self, FrameSizeError> {
        Self::check(&buffer, FRAME_SIZE)?;
        Ok(Self {
            buffer,
            width: u32::from(PANEL_WIDTH),
            height: u32::from(PANEL_HEIGHT),
            line_bytes: LINE_BYTES,
            y_shift: 0,
        })
    }

    /// Wrap a buffer for a partial update of `region`
    ///
    /// The buffer must be exactly [`Region::frame_len`] bytes. An invalid
    /// region yields an empty draw area; the update itself rejects it.
    pub fn for_region(buffer: B, region: Region) -> Result<Self, FrameSizeError> {
        let valid = region.is_valid();
        let expected = if valid { region.frame_len() } else { 0 };
        Self::check(&buffer, expected)?;
        Ok(Self {
            buffer,
            width: if valid { region.w as u32 } else { 0 },
            height: if valid { region.h as u32 } else { 0 },
            line_bytes: if valid { region.line_bytes() } else { 0 },
            y_shift: if valid { (region.y & 0x07) as u32 } else { 0 },
        })
    }

    fn check(buffer: &B, expected: usize) -> Result<(), FrameSizeError> {
        let provided = buffer.as_ref().len();
        if provided != expected {
            return Err(FrameSizeError { expected, provided });
        }
        Ok(())
    }

    /// Frame bytes in wire order
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    /// Unwrap the buffer
    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// Fill every byte; `On` sets all bits
    pub fn fill(&mut self, color: BinaryColor) {
        let byte = match color {
            BinaryColor::On => 0xFF,
            BinaryColor::Off => 0x00,
        };
        self.buffer.as_mut().fill(byte);
    }

    /// Set a single pixel; out-of-range coordinates are ignored
    fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        if x >= self.width || y >= self.height {
            return;
        }

        let y = y + self.y_shift;
        let index = x as usize * self.line_bytes + (y / 8) as usize;
        let bit = 0x80u8 >> (y % 8);

        let Some(byte) = self.buffer.as_mut().get_mut(index) else {
            return;
        };
        match color {
            BinaryColor::On => *byte |= bit,
            BinaryColor::Off => *byte &= !bit,
        }
    }
}

impl<B> DrawTarget for Frame<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x >= 0 && y >= 0 {
                self.set_pixel(x as u32, y as u32, color);
            }
        }

        Ok(())
    }
}

impl<B> OriginDimensions for Frame<B> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
