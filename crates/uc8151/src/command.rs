// UC8151 command definitions

/// Controller register opcodes.
///
/// Every register write or read starts with exactly one of these bytes sent
/// with DC low. Discriminants are checked for uniqueness by the compiler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    // Panel and power
    PanelSetting = 0x00,          // PSR
    PowerSetting = 0x01,          // PWR
    PowerOff = 0x02,              // POF
    PowerOffSequence = 0x03,      // PFS
    PowerOn = 0x04,               // PON
    PowerOnMeasure = 0x05,        // PMES
    BoosterSoftStart = 0x06,      // BTST
    DeepSleep = 0x07,             // DSLP

    // Frame data and refresh
    DataStartTransmission1 = 0x10, // DTM1, old frame
    DataStop = 0x11,               // DSP
    DisplayRefresh = 0x12,         // DRF
    DataStartTransmission2 = 0x13, // DTM2, new frame

    // Waveform lookup tables
    LutVcom = 0x20,
    LutWhiteToWhite = 0x21,
    LutBlackToWhite = 0x22,
    LutWhiteToBlack = 0x23,
    LutBlackToBlack = 0x24,
    Pll = 0x30,

    // Temperature sensor
    TemperatureSensorCalibration = 0x40, // TSC
    TemperatureSensorSelection = 0x41,   // TSE
    TemperatureSensorWrite = 0x42,       // TSW
    TemperatureSensorRead = 0x43,        // TSR

    // Timing and resolution
    VcomDataInterval = 0x50, // CDI
    LowPowerDetection = 0x51,
    TconSetting = 0x60,
    ResolutionSetting = 0x61,

    // Status and VCOM
    Revision = 0x70,
    GetStatus = 0x71, // FLG
    AutoMeasureVcom = 0x80,
    VcomValue = 0x81,
    VcomDcSetting = 0x82,

    // Partial window
    PartialWindow = 0x90, // PTL
    PartialIn = 0x91,     // PTIN
    PartialOut = 0x92,    // PTOU

    // OTP programming
    ProgramMode = 0xA0,
    ActiveProgram = 0xA1,
    ReadOtp = 0xA2,

    // Misc
    CascadeSetting = 0xE0,
    PowerSaving = 0xE3,
    ForceTemperature = 0xE5,
}

impl Command {
    /// Opcode byte sent on the wire
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Lookup-table registers in the order the controller expects them written
pub const LUT_REGISTERS: [Command; 5] = [
    Command::LutVcom,
    Command::LutWhiteToWhite,
    Command::LutBlackToWhite,
    Command::LutWhiteToBlack,
    Command::LutBlackToBlack,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcodes_match_datasheet() {
        assert_eq!(Command::PanelSetting.addr(), 0x00);
        assert_eq!(Command::DataStartTransmission2.addr(), 0x13);
        assert_eq!(Command::Pll.addr(), 0x30);
        assert_eq!(Command::PartialWindow.addr(), 0x90);
        assert_eq!(Command::ForceTemperature.addr(), 0xE5);
    }

    #[test]
    fn test_lut_registers_are_contiguous() {
        for (offset, reg) in LUT_REGISTERS.iter().enumerate() {
            assert_eq!(reg.addr(), 0x20 + offset as u8);
        }
    }
}
