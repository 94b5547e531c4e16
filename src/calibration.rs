use crate::bus::Bus;
use crate::register::calibration::*;
use crate::Bmp280Result;

/// Factory trimming parameters of one BMP280.
///
/// Loaded once from NVM when the device session is created and never modified afterwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CalibrationData {
    pub(crate) dig_t1: u16,
    pub(crate) dig_t2: i16,
    pub(crate) dig_t3: i16,
    pub(crate) dig_p1: u16,
    pub(crate) dig_p2: i16,
    pub(crate) dig_p3: i16,
    pub(crate) dig_p4: i16,
    pub(crate) dig_p5: i16,
    pub(crate) dig_p6: i16,
    pub(crate) dig_p7: i16,
    pub(crate) dig_p8: i16,
    pub(crate) dig_p9: i16,
}

impl CalibrationData {
    /// Reads the twelve trimming words, one transaction each, in address order.
    pub async fn load<B: Bus>(bus: &mut B) -> Bmp280Result<Self, B::Error> {
        let calibration = Self {
            dig_t1: bus.read_u16_le(DIG_T1).await?,
            dig_t2: bus.read_i16_le(DIG_T2).await?,
            dig_t3: bus.read_i16_le(DIG_T3).await?,
            dig_p1: bus.read_u16_le(DIG_P1).await?,
            dig_p2: bus.read_i16_le(DIG_P2).await?,
            dig_p3: bus.read_i16_le(DIG_P3).await?,
            dig_p4: bus.read_i16_le(DIG_P4).await?,
            dig_p5: bus.read_i16_le(DIG_P5).await?,
            dig_p6: bus.read_i16_le(DIG_P6).await?,
            dig_p7: bus.read_i16_le(DIG_P7).await?,
            dig_p8: bus.read_i16_le(DIG_P8).await?,
            dig_p9: bus.read_i16_le(DIG_P9).await?,
        };

        log::debug!("calibration loaded: {:?}", calibration);

        Ok(calibration)
    }

    /// Temperature trimming parameters `dig_T1..dig_T3`.
    pub fn temperature_trims(&self) -> (u16, i16, i16) {
        (self.dig_t1, self.dig_t2, self.dig_t3)
    }

    /// Pressure trimming parameters `dig_P1..dig_P9`; `dig_P1` is unsigned.
    pub fn pressure_trims(&self) -> (u16, [i16; 8]) {
        (
            self.dig_p1,
            [
                self.dig_p2, self.dig_p3, self.dig_p4, self.dig_p5,
                self.dig_p6, self.dig_p7, self.dig_p8, self.dig_p9,
            ],
        )
    }
}
