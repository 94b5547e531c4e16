//! ### CONFIG - Rate, filter and interface options (`0xF5`, 1 byte, R/W)
//!
//! | Bits | Field    |
//! |------|----------|
//! | 7..5 | t_sb     |
//! | 4..2 | filter   |
//! | 0    | spi3w_en |
//!
//! Writes to CONFIG may be ignored by the device in normal mode, so the driver writes it before CTRL_MEAS.
use crate::register::{Readable, Reg, Writable};

/// Marker type for CONFIG (0xF5) register
pub struct Config;
impl Reg for Config { const ADDR: u8 = 0xF5; }

/// The payload for the CONFIG (0xF5) register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConfigFields {
    /// Inactive duration between measurements in normal mode.
    pub standby: StandbyTime,
    /// IIR filter coefficient, datasheet section 3.3.3
    pub filter: FilterCoefficient,
    /// Enables the 3-wire SPI interface
    pub spi3w_en: bool,
}

impl Readable for Config {
    type Out = ConfigFields;

    fn decode(b: &[u8]) -> Self::Out {
        ConfigFields {
            standby: StandbyTime::from(b[0] >> 5),
            filter: FilterCoefficient::from((b[0] >> 2) & 0b111),
            spi3w_en: b[0] & 0b1 != 0,
        }
    }
}

impl Writable for Config {
    type In = ConfigFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = (v.standby as u8) << 5 | (v.filter as u8) << 2 | v.spi3w_en as u8;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StandbyTime {
    Ms0_5   = 0b000,
    Ms62_5  = 0b001,
    Ms125   = 0b010,
    Ms250   = 0b011,
    Ms500   = 0b100,
    Ms1000  = 0b101,
    Ms2000  = 0b110,
    Ms4000  = 0b111,
}

impl From<u8> for StandbyTime {
    fn from(field: u8) -> Self {
        match field & 0b111 {
            0b000 => StandbyTime::Ms0_5,
            0b001 => StandbyTime::Ms62_5,
            0b010 => StandbyTime::Ms125,
            0b011 => StandbyTime::Ms250,
            0b100 => StandbyTime::Ms500,
            0b101 => StandbyTime::Ms1000,
            0b110 => StandbyTime::Ms2000,
            _ => StandbyTime::Ms4000,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FilterCoefficient {
    /// Filter off
    Off    = 0b000,
    Coef2  = 0b001,
    Coef4  = 0b010,
    Coef8  = 0b011,
    Coef16 = 0b100,
}

impl From<u8> for FilterCoefficient {
    fn from(field: u8) -> Self {
        match field & 0b111 {
            0b000 => FilterCoefficient::Off,
            0b001 => FilterCoefficient::Coef2,
            0b010 => FilterCoefficient::Coef4,
            0b011 => FilterCoefficient::Coef8,
            _ => FilterCoefficient::Coef16,
        }
    }
}
