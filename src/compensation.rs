//! Integer compensation formulas from the BMP280 datasheet, section 3.11.3.
//!
//! Temperature compensation yields a [`FineTemperature`] besides the temperature in °C. Pressure
//! compensation takes that value as input, so the only way to get one is to compensate the temperature
//! of the same cycle first.
//!
//! All intermediates are computed with two's-complement wrapping so that out-of-range trims or raw codes
//! produce the same bits as the 32/64-bit reference code instead of panicking.

use crate::calibration::CalibrationData;

/// Fixed-point temperature (`t_fine`) produced by [`CalibrationData::compensate_temperature`].
///
/// Only valid as input to the pressure compensation of the same sampling cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FineTemperature(pub(crate) i32);

impl FineTemperature {
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl CalibrationData {
    /// Compensates a raw 20-bit temperature code.
    ///
    /// Returns the temperature in °C with a resolution of 0.01 °C, and the fine temperature needed by
    /// [`compensate_pressure`](Self::compensate_pressure).
    pub fn compensate_temperature(&self, adc_t: u32) -> (f32, FineTemperature) {
        let adc_t = adc_t as i32;
        let t1 = self.dig_t1 as i32;
        let t2 = self.dig_t2 as i32;
        let t3 = self.dig_t3 as i32;

        let var1 = ((adc_t >> 3).wrapping_sub(t1 << 1)).wrapping_mul(t2) >> 11;
        let delta = (adc_t >> 4).wrapping_sub(t1);
        let var2 = ((delta.wrapping_mul(delta) >> 12).wrapping_mul(t3)) >> 14;

        let t_fine = var1.wrapping_add(var2);

        // arithmetic shift, rounds toward negative infinity below 0 °C
        let centi_celsius = (t_fine.wrapping_mul(5).wrapping_add(128)) >> 8;

        (centi_celsius as f32 / 100.0, FineTemperature(t_fine))
    }

    /// Compensates a raw 20-bit pressure code into Pa in Q24.8 fixed point.
    ///
    /// Returns `None` if the intermediate divisor is zero, which only happens with unusable trims.
    pub fn pressure_q24_8(&self, adc_p: u32, t_fine: FineTemperature) -> Option<i64> {
        let p1 = self.dig_p1 as i64;
        let p2 = self.dig_p2 as i64;
        let p3 = self.dig_p3 as i64;
        let p4 = self.dig_p4 as i64;
        let p5 = self.dig_p5 as i64;
        let p6 = self.dig_p6 as i64;
        let p7 = self.dig_p7 as i64;
        let p8 = self.dig_p8 as i64;
        let p9 = self.dig_p9 as i64;

        let mut var1 = t_fine.0 as i64 - 128_000;
        let mut var2 = var1.wrapping_mul(var1).wrapping_mul(p6);
        var2 = var2.wrapping_add(var1.wrapping_mul(p5) << 17);
        var2 = var2.wrapping_add(p4 << 35);
        var1 = (var1.wrapping_mul(var1).wrapping_mul(p3) >> 8).wrapping_add(var1.wrapping_mul(p2) << 12);
        var1 = ((1i64 << 47).wrapping_add(var1)).wrapping_mul(p1) >> 33;

        if var1 == 0 {
            return None;
        }

        let mut p = 1_048_576 - adc_p as i64;
        p = ((p << 31).wrapping_sub(var2)).wrapping_mul(3125).wrapping_div(var1);
        var1 = p9.wrapping_mul(p >> 13).wrapping_mul(p >> 13) >> 25;
        var2 = p8.wrapping_mul(p) >> 19;

        Some((p.wrapping_add(var1).wrapping_add(var2) >> 8).wrapping_add(p7 << 4))
    }

    /// Like [`pressure_q24_8`](Self::pressure_q24_8), with 0 standing in for the zero divisor.
    pub fn compensate_pressure_q24_8(&self, adc_p: u32, t_fine: FineTemperature) -> i64 {
        self.pressure_q24_8(adc_p, t_fine).unwrap_or(0)
    }

    /// Pressure in Pa, or `None` if the intermediate divisor is zero.
    pub fn pressure_pascal(&self, adc_p: u32, t_fine: FineTemperature) -> Option<f32> {
        self.pressure_q24_8(adc_p, t_fine).map(|q| q as f32 / 256.0)
    }

    /// Compensates a raw 20-bit pressure code into Pa with a resolution of 1/256 Pa.
    ///
    /// Returns exactly `0.0` when the formula would divide by zero. Use
    /// [`pressure_pascal`](Self::pressure_pascal) to tell that apart from a compensated 0 Pa.
    pub fn compensate_pressure(&self, adc_p: u32, t_fine: FineTemperature) -> f32 {
        self.pressure_pascal(adc_p, t_fine).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::tests::reference_calibration;

    #[test]
    fn reference_temperature() {
        let (temperature, t_fine) = reference_calibration().compensate_temperature(519888);

        assert_eq!(128422, t_fine.value());
        assert_eq!(25.08, temperature);
    }

    #[test]
    fn reference_pressure() {
        let calibration = reference_calibration();
        let (_, t_fine) = calibration.compensate_temperature(519888);

        assert_eq!(25767233, calibration.compensate_pressure_q24_8(415148, t_fine));

        let pressure = calibration.compensate_pressure(415148, t_fine);
        assert!((pressure - 100653.27).abs() < 0.05, "{pressure}");
    }

    #[test]
    fn negative_temperature_uses_arithmetic_shift() {
        let (temperature, t_fine) = reference_calibration().compensate_temperature(400000);

        assert_eq!(-64736, t_fine.value());
        assert_eq!(-12.64, temperature);
    }

    #[test]
    fn zero_divisor_yields_zero_pressure() {
        let calibration = CalibrationData { dig_p1: 0, ..reference_calibration() };

        for t_fine in [i32::MIN, -128_000, 0, 128_422, i32::MAX] {
            for adc_p in [0, 415148, 0xFFFFF] {
                assert_eq!(0.0, calibration.compensate_pressure(adc_p, FineTemperature(t_fine)));
                assert_eq!(None, calibration.pressure_pascal(adc_p, FineTemperature(t_fine)));
            }
        }
    }

    #[test]
    fn compensated_zero_is_not_the_divisor_marker() {
        let calibration = CalibrationData { dig_p7: 32580, ..reference_calibration() };

        assert_eq!(Some(0), calibration.pressure_q24_8(1015120, FineTemperature(128422)));
        assert_eq!(Some(0.0), calibration.pressure_pascal(1015120, FineTemperature(128422)));
        assert_eq!(0.0, calibration.compensate_pressure(1015120, FineTemperature(128422)));
    }

    #[test]
    fn pressure_depends_on_fine_temperature() {
        let calibration = reference_calibration();
        let (_, warm) = calibration.compensate_temperature(519888);
        let (_, cold) = calibration.compensate_temperature(400000);

        assert_ne!(
            calibration.compensate_pressure(415148, warm),
            calibration.compensate_pressure(415148, cold)
        );
    }

    #[test]
    fn compensation_is_deterministic() {
        let calibration = reference_calibration();

        for (adc_t, adc_p) in [(519888, 415148), (0, 0), (0xFFFFF, 0xFFFFF), (400000, 300000)] {
            let (t_a, fine_a) = calibration.compensate_temperature(adc_t);
            let (t_b, fine_b) = calibration.compensate_temperature(adc_t);
            assert_eq!(fine_a, fine_b);
            assert_eq!(t_a.to_bits(), t_b.to_bits());

            assert_eq!(
                calibration.compensate_pressure_q24_8(adc_p, fine_a),
                calibration.compensate_pressure_q24_8(adc_p, fine_b)
            );
            assert_eq!(
                calibration.compensate_pressure(adc_p, fine_a).to_bits(),
                calibration.compensate_pressure(adc_p, fine_b).to_bits()
            );
        }
    }

    #[test]
    fn extreme_trims_do_not_panic() {
        let calibration = CalibrationData {
            dig_t1: u16::MAX,
            dig_t2: i16::MAX,
            dig_t3: i16::MIN,
            dig_p1: u16::MAX,
            dig_p2: i16::MIN,
            dig_p3: i16::MAX,
            dig_p4: i16::MIN,
            dig_p5: i16::MAX,
            dig_p6: i16::MIN,
            dig_p7: i16::MAX,
            dig_p8: i16::MIN,
            dig_p9: i16::MAX,
        };

        for adc in [0, 0x80000, 0xFFFFF] {
            let (_, t_fine) = calibration.compensate_temperature(adc);
            let _ = calibration.compensate_pressure(adc, t_fine);
        }
    }
}
