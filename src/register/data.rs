//! ### press / temp - Measurement data (`0xF7` - `0xFC`, 6 bytes, R)
//!
//! Each quantity is an MSB, LSB and XLSB register. The 20-bit raw value is MSB:LSB:XLSB[7:4].
//! The driver reads MSB:LSB as one big-endian word and XLSB as a separate byte, temperature first.

/// press_msb, followed by press_lsb (0xF8) and press_xlsb (0xF9)
pub const PRESSURE_DATA: u8 = 0xF7;

/// temp_msb, followed by temp_lsb (0xFB) and temp_xlsb (0xFC)
pub const TEMPERATURE_DATA: u8 = 0xFA;

/// Raw value reported for a quantity whose oversampling is set to skipped.
pub const SKIPPED_MEASUREMENT: u32 = 0x80000;

/// A pair of uncompensated ADC codes from one sampling cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawSample {
    temperature: u32,
    pressure: u32,
}

impl RawSample {
    pub fn new(temperature: u32, pressure: u32) -> Self {
        Self { temperature, pressure }
    }

    /// Returns the raw 20-bit temperature code
    pub fn temperature(&self) -> u32 { self.temperature }

    /// Returns the raw 20-bit pressure code
    pub fn pressure(&self) -> u32 { self.pressure }

    /// Pressure oversampling was set to skipped, so there is no pressure in this sample.
    pub fn pressure_skipped(&self) -> bool {
        self.pressure == SKIPPED_MEASUREMENT
    }
}
