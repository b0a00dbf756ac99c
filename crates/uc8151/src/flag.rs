//! Register field values for the UC8151
//!
//! Each enum is one bit field of a register; a register byte is the bitwise OR
//! of one value from each of its fields. The small builder structs at the
//! bottom of each section do that combination.

/// PSR resolution select, bits 7:6
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Resolution {
    R96x230 = 0b0000_0000,
    R96x252 = 0b0100_0000,
    R128x296 = 0b1000_0000,
    R160x296 = 0b1100_0000,
}

/// PSR LUT source, bit 5
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LutSource {
    /// Waveforms burned into the controller's OTP
    Otp = 0b0000_0000,
    /// Waveforms loaded through the LUT registers
    Register = 0b0010_0000,
}

/// PSR color format, bit 4
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorFormat {
    BlackWhiteRed = 0b0000_0000,
    BlackWhite = 0b0001_0000,
}

/// PSR gate scan direction, bit 3
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ScanDirection {
    Down = 0b0000_0000,
    Up = 0b0000_1000,
}

/// PSR source shift direction, bit 2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ShiftDirection {
    Left = 0b0000_0000,
    Right = 0b0000_0100,
}

/// PSR booster switch, bit 1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BoosterSwitch {
    Off = 0b0000_0000,
    On = 0b0000_0010,
}

/// PSR soft reset, bit 0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SoftReset {
    /// Writing PSR triggers a soft reset
    Reset = 0b0000_0000,
    /// No soft reset on PSR write
    None = 0b0000_0001,
}

/// Panel setting (PSR) register value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelSetting {
    pub resolution: Resolution,
    pub lut_source: LutSource,
    pub format: ColorFormat,
    pub scan: ScanDirection,
    pub shift: ShiftDirection,
    pub booster: BoosterSwitch,
    pub reset: SoftReset,
}

impl PanelSetting {
    /// Combine all fields into the register byte
    pub const fn bits(&self) -> u8 {
        self.resolution as u8
            | self.lut_source as u8
            | self.format as u8
            | self.scan as u8
            | self.shift as u8
            | self.booster as u8
            | self.reset as u8
    }
}

/// PWR byte 1 bit 1: source driving voltage (VDH/VDL) supply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SourcePower {
    External = 0b0000_0000,
    Internal = 0b0000_0010,
}

/// PWR byte 1 bit 0: gate driving voltage (VGH/VGL) supply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GatePower {
    External = 0b0000_0000,
    Internal = 0b0000_0001,
}

/// PWR byte 2 bit 2: VCOM voltage level source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum VcomSource {
    /// VCOMH = VDH + VCOMDC, VCOML = VDL + VCOMDC
    Vd = 0b0000_0000,
    /// VCOMH = VGH, VCOML = VGL
    Vg = 0b0000_0100,
}

/// PWR byte 2 bits 1:0: VGH/VGL voltage level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GateVoltage {
    V16 = 0b0000_0000,
    V15 = 0b0000_0001,
    V14 = 0b0000_0010,
    V13 = 0b0000_0011,
}

/// Power setting (PWR) payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerSetting {
    pub source_power: SourcePower,
    pub gate_power: GatePower,
    pub vcom: VcomSource,
    pub gate_voltage: GateVoltage,
    /// VDH, VDL and VDHR level bytes
    pub levels: [u8; 3],
}

impl PowerSetting {
    pub const fn bytes(&self) -> [u8; 5] {
        [
            self.source_power as u8 | self.gate_power as u8,
            self.vcom as u8 | self.gate_voltage as u8,
            self.levels[0],
            self.levels[1],
            self.levels[2],
        ]
    }
}

/// BTST soft start period, bits 7:6
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BoosterStart {
    Ms10 = 0b0000_0000,
    Ms20 = 0b0100_0000,
    Ms30 = 0b1000_0000,
    Ms40 = 0b1100_0000,
}

/// BTST driving strength, bits 5:3
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BoosterStrength {
    S1 = 0b0000_0000,
    S2 = 0b0000_1000,
    S3 = 0b0001_0000,
    S4 = 0b0001_1000,
    S5 = 0b0010_0000,
    S6 = 0b0010_1000,
    S7 = 0b0011_0000,
    S8 = 0b0011_1000,
}

/// BTST minimum off time of GDR, bits 2:0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BoosterOffTime {
    Us0_27 = 0b0000_0000,
    Us0_34 = 0b0000_0001,
    Us0_40 = 0b0000_0010,
    Us0_54 = 0b0000_0011,
    Us0_80 = 0b0000_0100,
    Us1_54 = 0b0000_0101,
    Us3_34 = 0b0000_0110,
    Us6_58 = 0b0000_0111,
}

/// One booster phase of the BTST payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoosterPhase {
    pub start: BoosterStart,
    pub strength: BoosterStrength,
    pub off_time: BoosterOffTime,
}

impl BoosterPhase {
    pub const fn bits(&self) -> u8 {
        self.start as u8 | self.strength as u8 | self.off_time as u8
    }
}

/// PFS power-off sequence frame count, bits 5:4
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PowerOffFrames {
    F1 = 0b0000_0000,
    F2 = 0b0001_0000,
    F3 = 0b0010_0000,
    F4 = 0b0011_0000,
}

/// TSE sensor select, bit 7
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TemperatureSource {
    Internal = 0b0000_0000,
    External = 0b1000_0000,
}

/// TSE temperature offset, bits 3:0, in degrees (4-bit two's complement)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TemperatureOffset {
    Plus0 = 0b0000,
    Plus1 = 0b0001,
    Plus2 = 0b0010,
    Plus3 = 0b0011,
    Plus4 = 0b0100,
    Plus5 = 0b0101,
    Plus6 = 0b0110,
    Plus7 = 0b0111,
    Minus8 = 0b1000,
    Minus7 = 0b1001,
    Minus6 = 0b1010,
    Minus5 = 0b1011,
    Minus4 = 0b1100,
    Minus3 = 0b1101,
    Minus2 = 0b1110,
    Minus1 = 0b1111,
}

/// Temperature sensor selection (TSE) register value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemperatureSensor {
    pub source: TemperatureSource,
    pub offset: TemperatureOffset,
}

impl TemperatureSensor {
    pub const fn bits(&self) -> u8 {
        self.source as u8 | self.offset as u8
    }
}

/// PLL frame rate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PllFrequency {
    Hz29 = 0b0011_1111,
    Hz33 = 0b0011_1110,
    Hz40 = 0b0011_1101,
    Hz50 = 0b0011_1100,
    Hz67 = 0b0011_1011,
    Hz100 = 0b0011_1010,
    Hz150 = 0b0010_1001,
    Hz200 = 0b0011_1001,
}

/// TCON source-to-gate and gate-to-source non-overlap periods
pub const TCON_DEFAULT: u8 = 0x22;

/// CDI value used when pixel data is inverted
pub const CDI_PIXEL_INVERTED: u8 = 0b1001_1100;
/// CDI value used for normal pixel polarity
pub const CDI_PIXEL_NORMAL: u8 = 0b0100_1100;

/// FLG status register bits
pub const STATUS_BUSY_N: u8 = 0b0000_0001;
pub const STATUS_POWER_OFF: u8 = 0b0000_0010;
pub const STATUS_POWER_ON: u8 = 0b0000_0100;
pub const STATUS_DATA: u8 = 0b0000_1000;
pub const STATUS_I2C_BUSY_N: u8 = 0b0001_0000;
pub const STATUS_I2C_ERROR: u8 = 0b0010_0000;
pub const STATUS_PARTIAL: u8 = 0b0100_0000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_setting_combines_fields() {
        let psr = PanelSetting {
            resolution: Resolution::R128x296,
            lut_source: LutSource::Register,
            format: ColorFormat::BlackWhite,
            scan: ScanDirection::Up,
            shift: ShiftDirection::Left,
            booster: BoosterSwitch::On,
            reset: SoftReset::None,
        };
        assert_eq!(psr.bits(), 0b1011_1011);

        let otp = PanelSetting {
            lut_source: LutSource::Otp,
            ..psr
        };
        assert_eq!(otp.bits(), 0b1001_1011);
    }

    #[test]
    fn test_booster_phase() {
        let phase = BoosterPhase {
            start: BoosterStart::Ms10,
            strength: BoosterStrength::S3,
            off_time: BoosterOffTime::Us6_58,
        };
        assert_eq!(phase.bits(), 0x17);
    }

    #[test]
    fn test_power_setting_bytes() {
        let pwr = PowerSetting {
            source_power: SourcePower::Internal,
            gate_power: GatePower::Internal,
            vcom: VcomSource::Vd,
            gate_voltage: GateVoltage::V16,
            levels: [0x2B; 3],
        };
        assert_eq!(pwr.bytes(), [0x03, 0x00, 0x2B, 0x2B, 0x2B]);
    }

    #[test]
    fn test_temperature_sensor() {
        let tse = TemperatureSensor {
            source: TemperatureSource::External,
            offset: TemperatureOffset::Minus1,
        };
        assert_eq!(tse.bits(), 0x8F);
    }
}
