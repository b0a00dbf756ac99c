//! Display configuration types and builder

use crate::lut::Profile;

/// Panel extent along the gate axis (x), in pixels
pub const PANEL_WIDTH: u16 = 296;
/// Panel extent along the source axis (y), in pixels
pub const PANEL_HEIGHT: u16 = 128;
/// Bytes per gate line
pub const LINE_BYTES: usize = PANEL_HEIGHT as usize / 8;
/// Full frame buffer size in bytes
pub const FRAME_SIZE: usize = PANEL_WIDTH as usize * LINE_BYTES;

/// How the driver waits for the busy line to clear
///
/// Neither strategy times out; a refresh always runs to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusyWait {
    /// Sample continuously with a spin-loop hint in between
    ///
    /// For bare-metal hosts with nothing else to run.
    Spin,
    /// Sample, then hand control to the delay provider for `interval_us`
    ///
    /// On a cooperative scheduler the delay provider suspends the task,
    /// letting co-resident tasks run while the panel refreshes.
    Poll {
        /// Pause between samples, in microseconds
        interval_us: u32,
    },
}

impl Default for BusyWait {
    fn default() -> Self {
        BusyWait::Poll { interval_us: 1_000 }
    }
}

/// Display configuration
///
/// Resolution, pixel format and scan direction are fixed by the panel; only
/// the parameters below vary. Use `Builder` to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Active refresh speed profile
    pub update_speed: Profile,
    /// Invert pixel polarity (selects the CDI register value)
    pub pixel_inverted: bool,
    /// Busy line wait strategy
    pub busy_wait: BusyWait,
}

impl Default for Config {
    fn default() -> Self {
        Builder::new().build()
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use uc8151::{Builder, BusyWait, Profile};
///
/// let config = Builder::new()
///     .update_speed(Profile::Fast)
///     .pixel_inverted(false)
///     .busy_wait(BusyWait::Spin)
///     .build();
/// assert_eq!(config.update_speed, Profile::Fast);
/// ```
pub struct Builder {
    /// Refresh speed profile
    update_speed: Profile,
    /// Pixel polarity
    pixel_inverted: bool,
    /// Busy line wait strategy
    busy_wait: BusyWait,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            update_speed: Profile::Default,
            pixel_inverted: true,
            busy_wait: BusyWait::default(),
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the refresh speed profile
    pub fn update_speed(mut self, profile: Profile) -> Self {
        self.update_speed = profile;
        self
    }

    /// Set pixel polarity
    pub fn pixel_inverted(mut self, inverted: bool) -> Self {
        self.pixel_inverted = inverted;
        self
    }

    /// Set the busy line wait strategy
    pub fn busy_wait(mut self, strategy: BusyWait) -> Self {
        self.busy_wait = strategy;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            update_speed: self.update_speed,
            pixel_inverted: self.pixel_inverted,
            busy_wait: self.busy_wait,
        }
    }
}
