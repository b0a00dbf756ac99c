//! Core display operations
//!
//! [`Display`] owns the interface for its whole lifetime and walks the
//! controller through its states:
//!
//! ```text
//! Uninitialized -> Resetting -> Configuring -> Idle <-> Refreshing -> PoweredOff
//! ```
//!
//! Every register write is preceded, where the controller requires it, by a
//! wait for the busy line. The waits never time out.

use embedded_hal::delay::DelayNs;

use crate::command::{Command, LUT_REGISTERS};
use crate::config::{BusyWait, Config, FRAME_SIZE, LINE_BYTES, PANEL_HEIGHT, PANEL_WIDTH};
use crate::error::Error;
use crate::flag::{
    BoosterOffTime, BoosterPhase, BoosterStart, BoosterStrength, BoosterSwitch, CDI_PIXEL_INVERTED,
    CDI_PIXEL_NORMAL, ColorFormat, GatePower, GateVoltage, LutSource, PanelSetting, PowerOffFrames,
    PowerSetting, Resolution, STATUS_BUSY_N, STATUS_DATA, STATUS_I2C_BUSY_N, STATUS_I2C_ERROR,
    STATUS_PARTIAL, STATUS_POWER_OFF, STATUS_POWER_ON, ScanDirection, ShiftDirection, SoftReset,
    SourcePower, TCON_DEFAULT, TemperatureOffset, TemperatureSensor, TemperatureSource, VcomSource,
};
use crate::interface::DisplayInterface;
use crate::lut::Profile;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

const POWER_SETTING: PowerSetting = PowerSetting {
    source_power: SourcePower::Internal,
    gate_power: GatePower::Internal,
    vcom: VcomSource::Vd,
    gate_voltage: GateVoltage::V16,
    levels: [0b0010_1011; 3],
};

const BOOSTER_PHASE: BoosterPhase = BoosterPhase {
    start: BoosterStart::Ms10,
    strength: BoosterStrength::S3,
    off_time: BoosterOffTime::Us6_58,
};

const TEMPERATURE_SENSOR: TemperatureSensor = TemperatureSensor {
    source: TemperatureSource::Internal,
    offset: TemperatureOffset::Plus0,
};

/// Controller state as tracked by the driver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// Constructed, nothing sent yet
    #[default]
    Uninitialized,
    /// Hardware reset done or in progress, registers at chip defaults
    Resetting,
    /// Register sequence in progress
    Configuring,
    /// Configured and ready for updates
    Idle,
    /// A refresh was triggered and may still be running
    Refreshing,
    /// Configured, analog rails shut down
    PoweredOff,
}

impl State {
    fn is_configured(self) -> bool {
        matches!(self, State::Idle | State::Refreshing | State::PoweredOff)
    }
}

/// Window for partial updates
///
/// Coordinates are in landscape orientation: `x` runs along the 296 gate
/// lines, `y` along the 128 source pixels. The controller addresses `y` in
/// whole bytes, so the refreshed window is widened to 8-pixel boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// X coordinate in pixels
    pub x: i32,
    /// Y coordinate in pixels
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl Region {
    /// Create a new region
    #[allow(clippy::many_single_char_names)]
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Whole panel
    pub fn full() -> Self {
        Self::new(0, 0, i32::from(PANEL_WIDTH), i32::from(PANEL_HEIGHT))
    }

    /// Non-empty and within the panel
    pub fn is_valid(&self) -> bool {
        let width = i32::from(PANEL_WIDTH);
        let height = i32::from(PANEL_HEIGHT);
        // Origin is bounded first, so the subtractions cannot overflow
        (0..width).contains(&self.x)
            && (0..height).contains(&self.y)
            && self.w > 0
            && self.h > 0
            && self.w <= width - self.x
            && self.h <= height - self.y
    }

    /// Bytes per gate line after widening `y` to byte boundaries
    ///
    /// Zero for an invalid region.
    pub fn line_bytes(&self) -> usize {
        if !self.is_valid() {
            return 0;
        }
        let first = self.y >> 3;
        let last = (self.y + self.h - 1) >> 3;
        (last - first + 1) as usize
    }

    /// Frame buffer size in bytes for this region
    ///
    /// Zero for an invalid region.
    pub fn frame_len(&self) -> usize {
        if !self.is_valid() {
            return 0;
        }
        self.w as usize * self.line_bytes()
    }

    /// Partial window (PTL) payload
    ///
    /// Source range start/end, then the 9-bit gate start and end, then the
    /// scan-inside-window flag.
    /// Only meaningful for a valid region.
    pub fn window(&self) -> [u8; 7] {
        let y_end = self.y.wrapping_add(self.h).wrapping_sub(1);
        let x_end = self.x.wrapping_add(self.w).wrapping_sub(1);
        [
            (self.y & 0xF8) as u8,
            ((y_end & 0xFF) | 0x03) as u8,
            ((self.x >> 8) & 0x01) as u8,
            (self.x & 0xFF) as u8,
            ((x_end >> 8) & 0x01) as u8,
            (x_end & 0xFF) as u8,
            0x01,
        ]
    }
}

/// Decoded FLG status register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status(u8);

impl Status {
    /// Raw register value
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_busy(self) -> bool {
        self.0 & STATUS_BUSY_N == 0
    }

    pub fn is_powered_off(self) -> bool {
        self.0 & STATUS_POWER_OFF != 0
    }

    pub fn is_powered_on(self) -> bool {
        self.0 & STATUS_POWER_ON != 0
    }

    /// Frame data received and not yet refreshed
    pub fn has_data(self) -> bool {
        self.0 & STATUS_DATA != 0
    }

    pub fn is_i2c_busy(self) -> bool {
        self.0 & STATUS_I2C_BUSY_N == 0
    }

    pub fn has_i2c_error(self) -> bool {
        self.0 & STATUS_I2C_ERROR != 0
    }

    /// Partial mode enabled
    pub fn is_partial(self) -> bool {
        self.0 & STATUS_PARTIAL != 0
    }
}

/// Core display driver for UC8151
///
/// The driver is the single owner of the interface; calls are serialized by
/// `&mut self`. Sharing one display between threads needs an external lock.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Controller state
    state: State,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`init`](Self::init) or [`configure`](Self::configure).
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: State::Uninitialized,
        }
    }

    /// Sample the busy line once
    pub fn is_busy(&mut self) -> Result<bool, Error<I>> {
        self.interface.is_busy().map_err(Error::Interface)
    }

    /// Block until the busy line reports ready
    pub fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let strategy = self.config.busy_wait;
        let mut polls: u32 = 0;

        while self.is_busy()? {
            polls = polls.saturating_add(1);
            match strategy {
                BusyWait::Spin => core::hint::spin_loop(),
                BusyWait::Poll { interval_us } => delay.delay_us(interval_us),
            }
        }

        if polls > 0 {
            log::trace!("Busy cleared after {polls} polls");
        }
        Ok(())
    }

    /// Hardware reset, then wait until the controller is ready
    ///
    /// A refresh still running is waited out first.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        if self.state == State::Refreshing {
            self.busy_wait(delay)?;
        }

        self.state = State::Resetting;
        self.interface.reset(delay).map_err(Error::Interface)?;
        self.busy_wait(delay)
    }

    /// Reset and configure with the profile from the configuration
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.configure(self.config.update_speed, delay)
    }

    /// Reset the controller and load the full register configuration for `profile`
    pub fn configure<D: DelayNs>(&mut self, profile: Profile, delay: &mut D) -> DisplayResult<I> {
        self.config.update_speed = profile;
        self.reset(delay)?;
        self.state = State::Configuring;
        log::debug!("Configuring UC8151 with {profile} waveforms");

        // Panel setting
        self.send(Command::PanelSetting, &[Self::panel_setting(profile).bits()])?;

        // Waveforms, VCOM first, then PLL
        let waveform = profile.waveform();
        for (register, table) in LUT_REGISTERS.into_iter().zip(waveform.tables()) {
            self.send(register, table)?;
        }
        self.send(Command::Pll, &[waveform.pll as u8])?;

        // Power
        self.send(Command::PowerSetting, &POWER_SETTING.bytes())?;
        self.send(Command::PowerOn, &[])?;
        self.busy_wait(delay)?;

        let phase = BOOSTER_PHASE.bits();
        self.send(Command::BoosterSoftStart, &[phase, phase, phase])?;
        self.send(Command::PowerOffSequence, &[PowerOffFrames::F1 as u8])?;

        // Temperature sensor: internal
        self.send(Command::TemperatureSensorSelection, &[TEMPERATURE_SENSOR.bits()])?;

        // TCON, VCOM and data interval
        self.send(Command::TconSetting, &[TCON_DEFAULT])?;
        self.send(Command::VcomDataInterval, &[self.vcom_data_interval()])?;

        self.power_off(delay)?;
        self.state = State::Idle;
        log::debug!("UC8151 configured");
        Ok(())
    }

    /// Switch refresh profile
    ///
    /// Expensive: performs a hardware reset and reloads every register.
    pub fn set_update_speed<D: DelayNs>(
        &mut self,
        profile: Profile,
        delay: &mut D,
    ) -> DisplayResult<I> {
        log::info!(
            "Switching update speed {} -> {profile}",
            self.config.update_speed
        );
        self.configure(profile, delay)
    }

    /// Switch refresh profile by name
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProfile`] without touching the bus if `name` is
    /// not one of `default`, `medium`, `fast` or `turbo`.
    pub fn set_update_speed_by_name<D: DelayNs>(
        &mut self,
        name: &str,
        delay: &mut D,
    ) -> DisplayResult<I> {
        let profile = name.parse::<Profile>()?;
        self.set_update_speed(profile, delay)
    }

    /// Active refresh profile
    pub fn update_speed(&self) -> Profile {
        self.config.update_speed
    }

    /// Nominal full refresh time of the active profile, in milliseconds
    pub fn update_time_ms(&self) -> u32 {
        self.config.update_speed.duration_estimate_ms()
    }

    /// Change pixel polarity; reconfigures the controller
    pub fn set_pixel_inverted<D: DelayNs>(
        &mut self,
        inverted: bool,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.config.pixel_inverted = inverted;
        self.init(delay)
    }

    /// Refresh the whole panel from `frame`
    ///
    /// With `blocking`, waits for the refresh and powers off. Otherwise returns
    /// right after triggering; the next operation waits for the busy line.
    ///
    /// # Errors
    ///
    /// [`Error::BufferSize`] if `frame` is not exactly [`FRAME_SIZE`] bytes.
    pub fn full_update<D: DelayNs>(
        &mut self,
        frame: &[u8],
        blocking: bool,
        delay: &mut D,
    ) -> DisplayResult<I> {
        Self::check_frame(frame, FRAME_SIZE)?;
        self.ensure_configured()?;

        self.busy_wait(delay)?;
        self.send(Command::PowerOn, &[])?;
        self.send(Command::PartialOut, &[])?;
        self.refresh(frame, blocking, delay)
    }

    /// Refresh only `region` from `frame`
    ///
    /// `frame` holds `region.w` lines of `region.line_bytes()` bytes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRegion`] or [`Error::BufferSize`], both before any bus
    /// traffic.
    pub fn partial_update<D: DelayNs>(
        &mut self,
        frame: &[u8],
        region: Region,
        blocking: bool,
        delay: &mut D,
    ) -> DisplayResult<I> {
        if !region.is_valid() {
            return Err(Error::InvalidRegion {
                x: region.x,
                y: region.y,
                w: region.w,
                h: region.h,
            });
        }
        Self::check_frame(frame, region.frame_len())?;
        self.ensure_configured()?;

        self.busy_wait(delay)?;
        self.send(Command::PowerOn, &[])?;
        self.send(Command::PartialIn, &[])?;
        self.send(Command::PartialWindow, &region.window())?;
        self.refresh(frame, blocking, delay)
    }

    /// Wait for the controller, then shut down the analog rails
    pub fn power_off<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.busy_wait(delay)?;
        self.send(Command::PowerOff, &[])?;
        if self.state.is_configured() {
            self.state = State::PoweredOff;
        }
        Ok(())
    }

    /// Read the FLG status register
    pub fn status(&mut self) -> Result<Status, Error<I>> {
        let mut flags = [0u8; 1];
        self.interface
            .receive(Command::GetStatus, &mut flags)
            .map_err(Error::Interface)?;
        Ok(Status(flags[0]))
    }

    /// Current controller state
    pub fn state(&self) -> State {
        self.state
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Transmit the frame and trigger the refresh
    fn refresh<D: DelayNs>(
        &mut self,
        frame: &[u8],
        blocking: bool,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.send(Command::DataStartTransmission2, frame)?;
        self.send(Command::DataStop, &[])?;
        self.send(Command::DisplayRefresh, &[])?;
        self.state = State::Refreshing;

        if blocking {
            self.power_off(delay)?;
        }
        Ok(())
    }

    fn panel_setting(profile: Profile) -> PanelSetting {
        PanelSetting {
            resolution: Resolution::R128x296,
            lut_source: if profile.uses_register_lut() {
                LutSource::Register
            } else {
                LutSource::Otp
            },
            format: ColorFormat::BlackWhite,
            scan: ScanDirection::Up,
            shift: ShiftDirection::Left,
            booster: BoosterSwitch::On,
            reset: SoftReset::None,
        }
    }

    fn vcom_data_interval(&self) -> u8 {
        if self.config.pixel_inverted {
            CDI_PIXEL_INVERTED
        } else {
            CDI_PIXEL_NORMAL
        }
    }

    fn check_frame(frame: &[u8], expected: usize) -> DisplayResult<I> {
        if frame.len() != expected {
            return Err(Error::BufferSize {
                expected,
                provided: frame.len(),
            });
        }
        Ok(())
    }

    fn ensure_configured(&self) -> DisplayResult<I> {
        if self.state.is_configured() {
            Ok(())
        } else {
            Err(Error::Uninitialized)
        }
    }

    /// Send a command with optional payload to the display controller
    fn send(&mut self, command: Command, payload: &[u8]) -> DisplayResult<I> {
        self.interface
            .send(command, payload)
            .map_err(Error::Interface)
    }
}

// Full frames are whole gate lines
const _: () = assert!(FRAME_SIZE == PANEL_WIDTH as usize * LINE_BYTES);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use alloc::collections::VecDeque;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Send(Command, Vec<u8>),
        Receive(Command),
        Reset,
        BusySample(bool),
    }

    #[derive(Debug, Default)]
    struct MockInterface {
        events: Vec<Event>,
        busy_samples: VecDeque<bool>,
        status: u8,
    }

    impl MockInterface {
        fn commands(&self) -> Vec<Command> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    Event::Send(cmd, _) => Some(*cmd),
                    _ => None,
                })
                .collect()
        }

        fn payload(&self, command: Command) -> Option<Vec<u8>> {
            self.events.iter().rev().find_map(|event| match event {
                Event::Send(cmd, data) if *cmd == command => Some(data.clone()),
                _ => None,
            })
        }
    }

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send(&mut self, command: Command, payload: &[u8]) -> Result<(), Self::Error> {
            self.events.push(Event::Send(command, payload.to_vec()));
            Ok(())
        }

        fn receive(&mut self, command: Command, buf: &mut [u8]) -> Result<(), Self::Error> {
            self.events.push(Event::Receive(command));
            buf.fill(self.status);
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            self.events.push(Event::Reset);
            Ok(())
        }

        fn is_busy(&mut self) -> Result<bool, Self::Error> {
            let busy = self.busy_samples.pop_front().unwrap_or(false);
            self.events.push(Event::BusySample(busy));
            Ok(busy)
        }
    }

    #[derive(Default)]
    struct MockDelay {
        calls: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {
            self.calls += 1;
        }
    }

    fn test_display(config: Config) -> Display<MockInterface> {
        Display::new(MockInterface::default(), config)
    }

    fn configured_display() -> Display<MockInterface> {
        let mut display = test_display(Config::default());
        display.init(&mut MockDelay::default()).unwrap();
        display.interface.events.clear();
        display
    }

    #[test]
    fn test_new_display_is_uninitialized() {
        let display = test_display(Config::default());
        assert_eq!(display.state(), State::Uninitialized);
        assert!(display.interface.events.is_empty());
    }

    #[test]
    fn test_configure_sequence() {
        let mut display = test_display(Config::default());
        display.init(&mut MockDelay::default()).unwrap();

        assert_eq!(display.interface.events[0], Event::Reset);
        assert_eq!(
            display.interface.commands(),
            vec![
                Command::PanelSetting,
                Command::LutVcom,
                Command::LutWhiteToWhite,
                Command::LutBlackToWhite,
                Command::LutWhiteToBlack,
                Command::LutBlackToBlack,
                Command::Pll,
                Command::PowerSetting,
                Command::PowerOn,
                Command::BoosterSoftStart,
                Command::PowerOffSequence,
                Command::TemperatureSensorSelection,
                Command::TconSetting,
                Command::VcomDataInterval,
                Command::PowerOff,
            ]
        );
        assert_eq!(display.state(), State::Idle);
    }

    #[test]
    fn test_configure_register_values() {
        let mut display = test_display(Config::default());
        display.init(&mut MockDelay::default()).unwrap();
        let iface = &display.interface;

        assert_eq!(iface.payload(Command::PanelSetting), Some(vec![0x9B]));
        assert_eq!(iface.payload(Command::Pll), Some(vec![0x3A]));
        assert_eq!(
            iface.payload(Command::PowerSetting),
            Some(vec![0x03, 0x00, 0x2B, 0x2B, 0x2B])
        );
        assert_eq!(iface.payload(Command::PowerOn), Some(vec![]));
        assert_eq!(
            iface.payload(Command::BoosterSoftStart),
            Some(vec![0x17, 0x17, 0x17])
        );
        assert_eq!(iface.payload(Command::PowerOffSequence), Some(vec![0x00]));
        assert_eq!(
            iface.payload(Command::TemperatureSensorSelection),
            Some(vec![0x00])
        );
        assert_eq!(iface.payload(Command::TconSetting), Some(vec![0x22]));
    }

    #[test]
    fn test_every_profile_writes_luts_then_one_pll() {
        for profile in Profile::ALL {
            let mut display = test_display(Config::default());
            display
                .configure(profile, &mut MockDelay::default())
                .unwrap();

            let commands = display.interface.commands();
            let lut_and_pll: Vec<Command> = commands
                .iter()
                .copied()
                .filter(|cmd| LUT_REGISTERS.contains(cmd) || *cmd == Command::Pll)
                .collect();
            assert_eq!(
                lut_and_pll,
                vec![
                    Command::LutVcom,
                    Command::LutWhiteToWhite,
                    Command::LutBlackToWhite,
                    Command::LutWhiteToBlack,
                    Command::LutBlackToBlack,
                    Command::Pll,
                ]
            );

            let waveform = profile.waveform();
            assert_eq!(
                display.interface.payload(Command::LutVcom).as_deref(),
                Some(waveform.vcom)
            );
            assert_eq!(
                display.interface.payload(Command::LutBlackToBlack).as_deref(),
                Some(waveform.bb)
            );
        }
    }

    #[test]
    fn test_lut_source_follows_profile() {
        let mut display = test_display(Config::default());
        let mut delay = MockDelay::default();

        display.configure(Profile::Turbo, &mut delay).unwrap();
        assert_eq!(
            display.interface.payload(Command::PanelSetting),
            Some(vec![0xBB])
        );

        display.configure(Profile::Default, &mut delay).unwrap();
        assert_eq!(
            display.interface.payload(Command::PanelSetting),
            Some(vec![0x9B])
        );
    }

    #[test]
    fn test_pixel_polarity_selects_cdi() {
        let mut inverted = test_display(Builder::new().pixel_inverted(true).build());
        inverted.init(&mut MockDelay::default()).unwrap();
        assert_eq!(
            inverted.interface.payload(Command::VcomDataInterval),
            Some(vec![0b1001_1100])
        );

        let mut normal = test_display(Builder::new().pixel_inverted(false).build());
        normal.init(&mut MockDelay::default()).unwrap();
        assert_eq!(
            normal.interface.payload(Command::VcomDataInterval),
            Some(vec![0b0100_1100])
        );
    }

    #[test]
    fn test_set_pixel_inverted_reconfigures() {
        let mut display = configured_display();
        display
            .set_pixel_inverted(false, &mut MockDelay::default())
            .unwrap();
        assert_eq!(display.interface.events[0], Event::Reset);
        assert_eq!(
            display.interface.payload(Command::VcomDataInterval),
            Some(vec![CDI_PIXEL_NORMAL])
        );
        assert!(!display.config().pixel_inverted);
    }

    #[test]
    fn test_set_update_speed_roundtrip() {
        let mut display = configured_display();
        let mut delay = MockDelay::default();
        for profile in Profile::ALL {
            display.set_update_speed(profile, &mut delay).unwrap();
            assert_eq!(display.update_speed(), profile);
            assert_eq!(display.update_time_ms(), profile.duration_estimate_ms());
            assert_eq!(display.state(), State::Idle);
        }
    }

    #[test]
    fn test_set_update_speed_resets_hardware() {
        let mut display = configured_display();
        display
            .set_update_speed(Profile::Medium, &mut MockDelay::default())
            .unwrap();
        assert_eq!(display.interface.events[0], Event::Reset);
        assert_eq!(
            display.interface.payload(Command::LutVcom).as_deref(),
            Some(Profile::Medium.waveform().vcom)
        );
    }

    #[test]
    fn test_update_times() {
        let mut display = configured_display();
        let mut delay = MockDelay::default();
        let expected = [
            (Profile::Default, 4500),
            (Profile::Medium, 2000),
            (Profile::Fast, 800),
            (Profile::Turbo, 250),
        ];
        for (profile, ms) in expected {
            display.set_update_speed(profile, &mut delay).unwrap();
            assert_eq!(display.update_time_ms(), ms);
        }
    }

    #[test]
    fn test_set_update_speed_by_name() {
        let mut display = configured_display();
        display
            .set_update_speed_by_name("fast", &mut MockDelay::default())
            .unwrap();
        assert_eq!(display.update_speed(), Profile::Fast);
    }

    #[test]
    fn test_unknown_profile_name_rejected_without_traffic() {
        let mut display = configured_display();
        let result = display.set_update_speed_by_name("hyper", &mut MockDelay::default());
        assert!(matches!(result, Err(Error::UnknownProfile)));
        assert!(display.interface.events.is_empty());
        assert_eq!(display.update_speed(), Profile::Default);
        assert_eq!(display.state(), State::Idle);
    }

    #[test]
    fn test_full_update_blocking_powers_off() {
        let mut display = configured_display();
        let frame = vec![0xFFu8; FRAME_SIZE];
        display
            .full_update(&frame, true, &mut MockDelay::default())
            .unwrap();

        assert_eq!(
            display.interface.commands(),
            vec![
                Command::PowerOn,
                Command::PartialOut,
                Command::DataStartTransmission2,
                Command::DataStop,
                Command::DisplayRefresh,
                Command::PowerOff,
            ]
        );
        assert_eq!(
            display.interface.payload(Command::DataStartTransmission2),
            Some(frame)
        );
        assert_eq!(display.state(), State::PoweredOff);
    }

    #[test]
    fn test_full_update_non_blocking_leaves_refresh_pending() {
        let mut display = configured_display();
        let frame = vec![0x00u8; FRAME_SIZE];
        display
            .full_update(&frame, false, &mut MockDelay::default())
            .unwrap();

        let commands = display.interface.commands();
        assert_eq!(commands.last(), Some(&Command::DisplayRefresh));
        assert!(!commands.contains(&Command::PowerOff));
        assert_eq!(display.state(), State::Refreshing);
    }

    #[test]
    fn test_full_update_rejects_wrong_frame_size() {
        let mut display = configured_display();
        let frame = vec![0u8; FRAME_SIZE - 1];
        let result = display.full_update(&frame, true, &mut MockDelay::default());
        assert!(matches!(
            result,
            Err(Error::BufferSize {
                expected: 4736,
                provided: 4735
            })
        ));
        assert!(display.interface.events.is_empty());
    }

    #[test]
    fn test_update_before_configure_fails() {
        let mut display = test_display(Config::default());
        let frame = vec![0u8; FRAME_SIZE];
        let result = display.full_update(&frame, true, &mut MockDelay::default());
        assert!(matches!(result, Err(Error::Uninitialized)));
        assert!(display.interface.events.is_empty());
    }

    #[test]
    fn test_update_allowed_after_power_off() {
        let mut display = configured_display();
        let mut delay = MockDelay::default();
        let frame = vec![0u8; FRAME_SIZE];
        display.full_update(&frame, true, &mut delay).unwrap();
        assert_eq!(display.state(), State::PoweredOff);
        display.full_update(&frame, true, &mut delay).unwrap();
        assert_eq!(display.state(), State::PoweredOff);
    }

    #[test]
    fn test_partial_window_descriptor() {
        assert_eq!(
            Region::new(0, 0, 8, 8).window(),
            [0x00, 0x07, 0x00, 0x00, 0x00, 0x07, 0x01]
        );
        assert_eq!(
            Region::new(288, 120, 8, 8).window(),
            [0x78, 0x7F, 0x01, 0x20, 0x01, 0x27, 0x01]
        );
        assert_eq!(
            Region::new(10, 13, 100, 2).window(),
            [0x08, 0x0F, 0x00, 0x0A, 0x00, 0x6D, 0x01]
        );
    }

    #[test]
    fn test_invalid_region_has_no_frame() {
        let invalid = [
            Region::new(0, 0, -1, 8),
            Region::new(1, 0, i32::MAX, 8),
            Region::new(0, 100, 8, i32::MAX - 50),
            Region::new(296, 0, 1, 1),
        ];
        for region in invalid {
            assert!(!region.is_valid(), "{region:?} accepted");
            assert_eq!(region.line_bytes(), 0);
            assert_eq!(region.frame_len(), 0);
        }
        assert!(Region::new(295, 127, 1, 1).is_valid());
    }

    #[test]
    fn test_configure_waits_for_power_on() {
        let mut display = test_display(Config::default());
        // Ready after reset, then busy once while the rails come up
        display.interface.busy_samples = VecDeque::from(vec![false, true, false]);
        display.init(&mut MockDelay::default()).unwrap();

        let events = &display.interface.events;
        let power_on = events
            .iter()
            .position(|event| *event == Event::Send(Command::PowerOn, vec![]))
            .unwrap();
        let booster = events
            .iter()
            .position(|event| matches!(event, Event::Send(Command::BoosterSoftStart, _)))
            .unwrap();
        assert_eq!(
            &events[power_on + 1..booster],
            &[Event::BusySample(true), Event::BusySample(false)]
        );
    }

    #[test]
    fn test_region_frame_len() {
        assert_eq!(Region::new(0, 0, 8, 8).frame_len(), 8);
        assert_eq!(Region::new(0, 4, 10, 8).frame_len(), 20);
        assert_eq!(Region::full().frame_len(), FRAME_SIZE);
    }

    #[test]
    fn test_partial_update_sequence() {
        let mut display = configured_display();
        let region = Region::new(0, 0, 8, 8);
        let frame = vec![0xAAu8; region.frame_len()];
        display
            .partial_update(&frame, region, true, &mut MockDelay::default())
            .unwrap();

        assert_eq!(
            display.interface.commands(),
            vec![
                Command::PowerOn,
                Command::PartialIn,
                Command::PartialWindow,
                Command::DataStartTransmission2,
                Command::DataStop,
                Command::DisplayRefresh,
                Command::PowerOff,
            ]
        );
        assert_eq!(
            display.interface.payload(Command::PartialWindow),
            Some(vec![0x00, 0x07, 0x00, 0x00, 0x00, 0x07, 0x01])
        );
        assert_eq!(display.state(), State::PoweredOff);
    }

    #[test]
    fn test_partial_update_non_blocking() {
        let mut display = configured_display();
        let region = Region::new(16, 32, 40, 16);
        let frame = vec![0u8; region.frame_len()];
        display
            .partial_update(&frame, region, false, &mut MockDelay::default())
            .unwrap();
        assert_eq!(
            display.interface.commands().last(),
            Some(&Command::DisplayRefresh)
        );
        assert_eq!(display.state(), State::Refreshing);
    }

    #[test]
    fn test_invalid_regions_emit_no_traffic() {
        let invalid = [
            Region::new(-1, 0, 8, 8),
            Region::new(0, 0, 0, 8),
            Region::new(0, 0, 8, 0),
            Region::new(0, -8, 8, 8),
            Region::new(290, 0, 8, 8),
            Region::new(0, 124, 8, 8),
            Region::new(1, 0, i32::MAX, 8),
            Region::new(0, 100, 8, i32::MAX - 50),
            Region::new(i32::MAX, 0, 8, 8),
            Region::new(0, 0, i32::MIN, 8),
        ];
        for region in invalid {
            let mut display = configured_display();
            let frame = vec![0u8; 8];
            let result = display.partial_update(&frame, region, true, &mut MockDelay::default());
            assert!(
                matches!(result, Err(Error::InvalidRegion { .. })),
                "{region:?} accepted"
            );
            assert!(display.interface.events.is_empty());
        }
    }

    #[test]
    fn test_partial_update_rejects_wrong_frame_size() {
        let mut display = configured_display();
        let result = display.partial_update(
            &[0u8; 4],
            Region::new(0, 0, 8, 8),
            true,
            &mut MockDelay::default(),
        );
        assert!(matches!(
            result,
            Err(Error::BufferSize {
                expected: 8,
                provided: 4
            })
        ));
        assert!(display.interface.events.is_empty());
    }

    #[test]
    fn test_busy_wait_blocks_until_ready() {
        let mut display = test_display(Config::default());
        display.interface.busy_samples = VecDeque::from(vec![true, true, true, false]);
        let mut delay = MockDelay::default();
        display.busy_wait(&mut delay).unwrap();

        assert_eq!(
            display.interface.events,
            vec![
                Event::BusySample(true),
                Event::BusySample(true),
                Event::BusySample(true),
                Event::BusySample(false),
            ]
        );
        // Default strategy sleeps between samples
        assert_eq!(delay.calls, 3);
    }

    #[test]
    fn test_spin_strategy_does_not_delay() {
        let mut display = test_display(Builder::new().busy_wait(BusyWait::Spin).build());
        display.interface.busy_samples = VecDeque::from(vec![true, true, false]);
        let mut delay = MockDelay::default();
        display.busy_wait(&mut delay).unwrap();
        assert_eq!(delay.calls, 0);
        assert_eq!(display.interface.events.len(), 3);
    }

    #[test]
    fn test_update_waits_for_busy_before_first_write() {
        let mut display = configured_display();
        display.interface.busy_samples = VecDeque::from(vec![true, true, false]);
        let frame = vec![0u8; FRAME_SIZE];
        display
            .full_update(&frame, false, &mut MockDelay::default())
            .unwrap();

        let first_send = display
            .interface
            .events
            .iter()
            .position(|event| matches!(event, Event::Send(..)))
            .unwrap();
        assert_eq!(
            &display.interface.events[..first_send],
            &[
                Event::BusySample(true),
                Event::BusySample(true),
                Event::BusySample(false),
            ]
        );
    }

    #[test]
    fn test_power_off_waits_for_refresh() {
        let mut display = configured_display();
        let frame = vec![0u8; FRAME_SIZE];
        let mut delay = MockDelay::default();
        display.full_update(&frame, false, &mut delay).unwrap();
        display.interface.events.clear();

        display.interface.busy_samples = VecDeque::from(vec![true, false]);
        display.power_off(&mut delay).unwrap();
        assert_eq!(
            display.interface.events,
            vec![
                Event::BusySample(true),
                Event::BusySample(false),
                Event::Send(Command::PowerOff, vec![]),
            ]
        );
        assert_eq!(display.state(), State::PoweredOff);
    }

    #[test]
    fn test_reset_waits_out_pending_refresh() {
        let mut display = configured_display();
        let frame = vec![0u8; FRAME_SIZE];
        let mut delay = MockDelay::default();
        display.full_update(&frame, false, &mut delay).unwrap();
        display.interface.events.clear();

        display.interface.busy_samples = VecDeque::from(vec![true, false]);
        display.reset(&mut delay).unwrap();
        assert_eq!(
            &display.interface.events[..3],
            &[
                Event::BusySample(true),
                Event::BusySample(false),
                Event::Reset,
            ]
        );
        assert_eq!(display.state(), State::Resetting);
    }

    #[test]
    fn test_is_busy_samples_once() {
        let mut display = test_display(Config::default());
        display.interface.busy_samples = VecDeque::from(vec![true]);
        assert!(display.is_busy().unwrap());
        assert!(!display.is_busy().unwrap());
        assert_eq!(display.interface.events.len(), 2);
    }

    #[test]
    fn test_status_register() {
        let mut display = test_display(Config::default());
        display.interface.status = STATUS_BUSY_N | STATUS_POWER_ON | STATUS_PARTIAL;
        let status = display.status().unwrap();

        assert_eq!(display.interface.events, vec![Event::Receive(Command::GetStatus)]);
        assert!(!status.is_busy());
        assert!(status.is_powered_on());
        assert!(!status.is_powered_off());
        assert!(status.is_partial());
        assert!(!status.has_data());
        assert!(status.is_i2c_busy());
        assert!(!status.has_i2c_error());
    }
}
