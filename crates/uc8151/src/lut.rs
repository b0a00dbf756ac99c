//! Waveform lookup tables for the four refresh speed profiles
//!
//! Every profile carries the five LUT register payloads (VCOM, white-to-white,
//! black-to-white, white-to-black, black-to-black) and a PLL frame rate. Each
//! 6-byte group of a table is one waveform phase: level select, four frame
//! counts and a repeat count. The profiles only differ in their frame counts;
//! longer dwell times give cleaner images, shorter ones faster refreshes.

use core::fmt;
use core::str::FromStr;

use crate::error::UnknownProfile;
use crate::flag::PllFrequency;

/// Refresh speed profile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Best quality, ~4.5 s. The panel uses its OTP waveforms.
    #[default]
    Default,
    /// ~2 s
    Medium,
    /// ~800 ms
    Fast,
    /// ~250 ms, most ghosting
    Turbo,
}

impl Profile {
    /// All profiles, slowest first
    pub const ALL: [Profile; 4] = [
        Profile::Default,
        Profile::Medium,
        Profile::Fast,
        Profile::Turbo,
    ];

    /// Name used in configuration strings
    pub const fn as_str(self) -> &'static str {
        match self {
            Profile::Default => "default",
            Profile::Medium => "medium",
            Profile::Fast => "fast",
            Profile::Turbo => "turbo",
        }
    }

    /// Waveform tables loaded during configuration
    pub fn waveform(self) -> &'static Waveform {
        match self {
            Profile::Default => &DEFAULT,
            Profile::Medium => &MEDIUM,
            Profile::Fast => &FAST,
            Profile::Turbo => &TURBO,
        }
    }

    /// Nominal full refresh time in milliseconds
    ///
    /// Informational only; completion is always detected through the busy line.
    pub const fn duration_estimate_ms(self) -> u32 {
        match self {
            Profile::Default => 4500,
            Profile::Medium => 2000,
            Profile::Fast => 800,
            Profile::Turbo => 250,
        }
    }

    /// Whether the panel setting selects register-loaded LUTs
    pub const fn uses_register_lut(self) -> bool {
        !matches!(self, Profile::Default)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|profile| profile.as_str() == s)
            .ok_or(UnknownProfile)
    }
}

/// Refresh time estimate for a profile name
///
/// Unknown names fall back to the `default` estimate.
pub fn duration_estimate(name: &str) -> u32 {
    name.parse::<Profile>()
        .unwrap_or_default()
        .duration_estimate_ms()
}

/// One profile's register payloads
#[derive(Debug, PartialEq, Eq)]
pub struct Waveform {
    pub vcom: &'static [u8],
    pub ww: &'static [u8],
    pub bw: &'static [u8],
    pub wb: &'static [u8],
    pub bb: &'static [u8],
    pub pll: PllFrequency,
}

impl Waveform {
    /// Tables in LUT register order: VCOM, WW, BW, WB, BB
    pub const fn tables(&self) -> [&'static [u8]; 5] {
        [self.vcom, self.ww, self.bw, self.wb, self.bb]
    }
}

static DEFAULT: Waveform = Waveform {
    vcom: &DEFAULT_VCOM,
    ww: &DEFAULT_WW,
    bw: &DEFAULT_BW,
    wb: &DEFAULT_WB,
    bb: &DEFAULT_BB,
    pll: PllFrequency::Hz100,
};

static MEDIUM: Waveform = Waveform {
    vcom: &MEDIUM_VCOM,
    ww: &MEDIUM_WW,
    bw: &MEDIUM_BW,
    wb: &MEDIUM_WB,
    bb: &MEDIUM_BB,
    pll: PllFrequency::Hz100,
};

static FAST: Waveform = Waveform {
    vcom: &FAST_VCOM,
    ww: &FAST_WW,
    bw: &FAST_BW,
    wb: &FAST_WB,
    bb: &FAST_BB,
    pll: PllFrequency::Hz100,
};

static TURBO: Waveform = Waveform {
    vcom: &TURBO_VCOM,
    ww: &TURBO_WW,
    bw: &TURBO_BW,
    wb: &TURBO_WB,
    bb: &TURBO_BB,
    pll: PllFrequency::Hz100,
};

#[rustfmt::skip]
const DEFAULT_VCOM: [u8; 44] = [
    0x00, 0x64, 0x64, 0x37, 0x00, 0x01,
    0x00, 0x8C, 0x8C, 0x00, 0x00, 0x04,
    0x00, 0x64, 0x64, 0x37, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

#[rustfmt::skip]
const DEFAULT_WW: [u8; 42] = [
    0x54, 0x64, 0x64, 0x37, 0x00, 0x01,
    0x60, 0x8C, 0x8C, 0x00, 0x00, 0x04,
    0xA8, 0x64, 0x64, 0x37, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const DEFAULT_BW: [u8; 42] = [
    0x54, 0x64, 0x64, 0x37, 0x00, 0x01,
    0x60, 0x8C, 0x8C, 0x00, 0x00, 0x04,
    0xA8, 0x64, 0x64, 0x37, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const DEFAULT_WB: [u8; 42] = [
    0xA8, 0x64, 0x64, 0x37, 0x00, 0x01,
    0x60, 0x8C, 0x8C, 0x00, 0x00, 0x04,
    0x54, 0x64, 0x64, 0x37, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const DEFAULT_BB: [u8; 42] = [
    0xA8, 0x64, 0x64, 0x37, 0x00, 0x01,
    0x60, 0x8C, 0x8C, 0x00, 0x00, 0x04,
    0x54, 0x64, 0x64, 0x37, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const MEDIUM_VCOM: [u8; 44] = [
    0x00, 0x16, 0x16, 0x0D, 0x00, 0x01,
    0x00, 0x23, 0x23, 0x00, 0x00, 0x02,
    0x00, 0x16, 0x16, 0x0D, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

#[rustfmt::skip]
const MEDIUM_WW: [u8; 42] = [
    0x54, 0x16, 0x16, 0x0D, 0x00, 0x01,
    0x60, 0x23, 0x23, 0x00, 0x00, 0x02,
    0xA8, 0x16, 0x16, 0x0D, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const MEDIUM_BW: [u8; 42] = [
    0x54, 0x16, 0x16, 0x0D, 0x00, 0x01,
    0x60, 0x23, 0x23, 0x00, 0x00, 0x02,
    0xA8, 0x16, 0x16, 0x0D, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const MEDIUM_WB: [u8; 42] = [
    0xA8, 0x16, 0x16, 0x0D, 0x00, 0x01,
    0x60, 0x23, 0x23, 0x00, 0x00, 0x02,
    0x54, 0x16, 0x16, 0x0D, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const MEDIUM_BB: [u8; 42] = [
    0xA8, 0x16, 0x16, 0x0D, 0x00, 0x01,
    0x60, 0x23, 0x23, 0x00, 0x00, 0x02,
    0x54, 0x16, 0x16, 0x0D, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const FAST_VCOM: [u8; 44] = [
    0x00, 0x04, 0x04, 0x07, 0x00, 0x01,
    0x00, 0x0C, 0x0C, 0x00, 0x00, 0x02,
    0x00, 0x04, 0x04, 0x07, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

#[rustfmt::skip]
const FAST_WW: [u8; 42] = [
    0x54, 0x04, 0x04, 0x07, 0x00, 0x01,
    0x60, 0x0C, 0x0C, 0x00, 0x00, 0x02,
    0xA8, 0x04, 0x04, 0x07, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const FAST_BW: [u8; 42] = [
    0x54, 0x04, 0x04, 0x07, 0x00, 0x01,
    0x60, 0x0C, 0x0C, 0x00, 0x00, 0x02,
    0xA8, 0x04, 0x04, 0x07, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const FAST_WB: [u8; 42] = [
    0xA8, 0x04, 0x04, 0x07, 0x00, 0x01,
    0x60, 0x0C, 0x0C, 0x00, 0x00, 0x02,
    0x54, 0x04, 0x04, 0x07, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const FAST_BB: [u8; 42] = [
    0xA8, 0x04, 0x04, 0x07, 0x00, 0x01,
    0x60, 0x0C, 0x0C, 0x00, 0x00, 0x02,
    0x54, 0x04, 0x04, 0x07, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const TURBO_VCOM: [u8; 44] = [
    0x00, 0x01, 0x01, 0x02, 0x00, 0x01,
    0x00, 0x02, 0x02, 0x00, 0x00, 0x02,
    0x00, 0x02, 0x02, 0x03, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

#[rustfmt::skip]
const TURBO_WW: [u8; 42] = [
    0x54, 0x01, 0x01, 0x02, 0x00, 0x01,
    0x60, 0x02, 0x02, 0x00, 0x00, 0x02,
    0xA8, 0x02, 0x02, 0x03, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const TURBO_BW: [u8; 42] = [
    0x54, 0x01, 0x01, 0x02, 0x00, 0x01,
    0x60, 0x02, 0x02, 0x00, 0x00, 0x02,
    0xA8, 0x02, 0x02, 0x03, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const TURBO_WB: [u8; 42] = [
    0xA8, 0x01, 0x01, 0x02, 0x00, 0x01,
    0x60, 0x02, 0x02, 0x00, 0x00, 0x02,
    0x54, 0x02, 0x02, 0x03, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const TURBO_BB: [u8; 42] = [
    0xA8, 0x01, 0x01, 0x02, 0x00, 0x01,
    0x60, 0x02, 0x02, 0x00, 0x00, 0x02,
    0x54, 0x02, 0x02, 0x03, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_estimates() {
        assert_eq!(duration_estimate("default"), 4500);
        assert_eq!(duration_estimate("medium"), 2000);
        assert_eq!(duration_estimate("fast"), 800);
        assert_eq!(duration_estimate("turbo"), 250);
    }

    #[test]
    fn test_unknown_name_estimate_falls_back_to_default() {
        assert_eq!(duration_estimate("ludicrous"), 4500);
        assert_eq!(duration_estimate(""), 4500);
        assert_eq!(duration_estimate("Turbo"), 4500);
    }

    #[test]
    fn test_parse_rejects_unknown_profile() {
        assert_eq!("fast".parse::<Profile>(), Ok(Profile::Fast));
        assert_eq!("warp".parse::<Profile>(), Err(UnknownProfile));
    }

    #[test]
    fn test_name_roundtrip() {
        for profile in Profile::ALL {
            assert_eq!(profile.as_str().parse::<Profile>(), Ok(profile));
        }
    }

    #[test]
    fn test_table_lengths() {
        for profile in Profile::ALL {
            let waveform = profile.waveform();
            assert_eq!(waveform.vcom.len(), 44);
            for table in &waveform.tables()[1..] {
                assert_eq!(table.len(), 42);
            }
            assert_eq!(waveform.pll, PllFrequency::Hz100);
        }
    }

    #[test]
    fn test_profiles_differ_only_in_timing() {
        // Level select bytes (first of each group) are shared by every profile
        let reference = Profile::Default.waveform().tables();
        for profile in Profile::ALL {
            let tables = profile.waveform().tables();
            for (table, expected) in tables.iter().zip(reference.iter()) {
                for group in 0..3 {
                    assert_eq!(table[group * 6], expected[group * 6]);
                }
            }
        }
    }

    #[test]
    fn test_only_default_uses_otp() {
        assert!(!Profile::Default.uses_register_lut());
        assert!(Profile::Medium.uses_register_lut());
        assert!(Profile::Fast.uses_register_lut());
        assert!(Profile::Turbo.uses_register_lut());
    }
}
