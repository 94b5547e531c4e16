//! Quantities derived from a compensated pressure.

/// Standard atmosphere at sea level, in hPa.
pub const STANDARD_SEA_LEVEL_HPA: f32 = 1013.25;

/// Boiling point of water in °C at `pressure_hpa`, using the Magnus formula.
///
/// Only meaningful for positive pressures; returns NaN or infinity otherwise.
pub fn water_boiling_point(pressure_hpa: f32) -> f32 {
    let x = libm::logf(pressure_hpa / 6.1078);
    234.175 * x / (17.08085 - x)
}

/// Altitude in meters above the level where the pressure is `sea_level_hpa`, using the international
/// barometric formula.
pub fn altitude(pressure_hpa: f32, sea_level_hpa: f32) -> f32 {
    44330.0 * (1.0 - libm::powf(pressure_hpa / sea_level_hpa, 0.1903))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boiling_point_at_standard_pressure() {
        let bp = water_boiling_point(STANDARD_SEA_LEVEL_HPA);
        assert!((bp - 100.0).abs() < 0.5, "{bp}");
    }

    #[test]
    fn boiling_point_drops_with_pressure() {
        assert!(water_boiling_point(700.0) < water_boiling_point(1006.53));
        assert!((water_boiling_point(1006.53) - 99.81).abs() < 0.01);
    }

    #[test]
    fn boiling_point_undefined_without_pressure() {
        assert!(!water_boiling_point(0.0).is_finite());
        assert!(water_boiling_point(-5.0).is_nan());
    }

    #[test]
    fn altitude_at_reference_is_zero() {
        for p in [300.0, 1006.53, STANDARD_SEA_LEVEL_HPA, 1100.0] {
            assert_eq!(0.0, altitude(p, p));
        }
    }

    #[test]
    fn altitude_reference_reading() {
        let alt = altitude(1006.5325, STANDARD_SEA_LEVEL_HPA);
        assert!((alt - 56.08).abs() < 0.1, "{alt}");
        assert!(altitude(1020.0, STANDARD_SEA_LEVEL_HPA) < 0.0);
    }
}
