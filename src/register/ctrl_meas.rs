//! ### CTRL_MEAS - Measurement control (`0xF4`, 1 byte, R/W)
//!
//! Selects the temperature and pressure oversampling and the power mode.
//!
//! | Bits | Field    |
//! |------|----------|
//! | 7..5 | osrs_t   |
//! | 4..2 | osrs_p   |
//! | 1..0 | mode     |
//!
//! The driver writes 0x3F by default: temperature ×1, pressure ×16 (written as `0b111`), normal mode.
//! [`CtrlMeasFields`] keeps the raw byte, so a value read back is written back unchanged even where the
//! datasheet gives several encodings the same meaning.
//!
//! ### Examples
//! ```rust,no_run
//! # use bmp280_rs::{Bmp280, Bmp280Result};
//! # use bmp280_rs::bus::Bus;
//! # async fn demo<B: Bus>(mut device: Bmp280<B>)
//! #     -> Bmp280Result<(), B::Error> {
//! use bmp280_rs::register::ctrl_meas::{CtrlMeas, CtrlMeasFields, Oversampling, PowerMode};
//!
//! let fields = device.read::<CtrlMeas>().await?;
//! assert_eq!(PowerMode::Normal, fields.mode());
//!
//! device.write::<CtrlMeas>(&CtrlMeasFields::new(Oversampling::X2, Oversampling::X16, PowerMode::Normal)).await?;
//! # Ok(()) }
//! ```
#![doc(alias = "CTRL_MEAS")]
use crate::register::{Readable, Reg, Writable};

/// Control byte enabling continuous oversampled measurements.
pub const DEFAULT_CTRL_MEAS: u8 = 0x3F;

/// Marker type for CTRL_MEAS (0xF4) register
pub struct CtrlMeas;
impl Reg for CtrlMeas { const ADDR: u8 = 0xF4; }

/// The payload for the CTRL_MEAS (0xF4) register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CtrlMeasFields(u8);

impl CtrlMeasFields {
    pub fn new(temperature: Oversampling, pressure: Oversampling, mode: PowerMode) -> Self {
        let osrs_t: u8 = temperature.into();
        let osrs_p: u8 = pressure.into();
        let mode: u8 = mode.into();
        Self(osrs_t << 5 | osrs_p << 2 | mode)
    }

    /// Uses `bits` as the register value without interpreting it.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub fn temperature_oversampling(&self) -> Oversampling {
        Oversampling::from(self.0 >> 5)
    }

    pub fn pressure_oversampling(&self) -> Oversampling {
        Oversampling::from((self.0 >> 2) & 0b111)
    }

    pub fn mode(&self) -> PowerMode {
        PowerMode::from(self.0 & 0b11)
    }
}

impl Default for CtrlMeasFields {
    fn default() -> Self {
        Self(DEFAULT_CTRL_MEAS)
    }
}

impl Readable for CtrlMeas {
    type Out = CtrlMeasFields;

    fn decode(b: &[u8]) -> Self::Out {
        CtrlMeasFields(b[0])
    }
}

impl Writable for CtrlMeas {
    type In = CtrlMeasFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = v.0;
    }
}

/// Oversampling settings for `osrs_t` and `osrs_p`.
///
/// See datasheet section 3.3.1 and 3.3.2.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Oversampling {
    /// Measurement skipped, output is set to 0x80000
    Skipped,
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl From<u8> for Oversampling {
    fn from(field: u8) -> Self {
        match field & 0b111 {
            0b000 => Oversampling::Skipped,
            0b001 => Oversampling::X1,
            0b010 => Oversampling::X2,
            0b011 => Oversampling::X4,
            0b100 => Oversampling::X8,
            _ => Oversampling::X16,
        }
    }
}

impl From<Oversampling> for u8 {
    fn from(o: Oversampling) -> u8 {
        match o {
            Oversampling::Skipped => 0b000,
            Oversampling::X1 => 0b001,
            Oversampling::X2 => 0b010,
            Oversampling::X4 => 0b011,
            Oversampling::X8 => 0b100,
            Oversampling::X16 => 0b101,
        }
    }
}

/// Power modes, see datasheet section 3.6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    /// No measurements are performed. This is the mode after power on reset.
    Sleep,
    /// A single measurement is performed after which the device returns to Sleep.
    Forced,
    /// Measurements are performed continuously, separated by the standby time set in CONFIG.
    Normal,
}

impl From<u8> for PowerMode {
    fn from(field: u8) -> Self {
        match field & 0b11 {
            0b00 => PowerMode::Sleep,
            0b01 | 0b10 => PowerMode::Forced,
            _ => PowerMode::Normal,
        }
    }
}

impl From<PowerMode> for u8 {
    fn from(mode: PowerMode) -> u8 {
        match mode {
            PowerMode::Sleep => 0b00,
            PowerMode::Forced => 0b01,
            PowerMode::Normal => 0b11,
        }
    }
}
