use core::fmt::{Display, Formatter};

use crate::derived::{altitude, water_boiling_point};

/// Compensated temperature and pressure from one sampling cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CalibratedReading {
    temperature_c: f32,
    pressure_pa: Option<f32>,
}

impl CalibratedReading {
    /// `pressure_pa` is `None` when compensation could not produce a pressure.
    pub fn new(temperature_c: f32, pressure_pa: Option<f32>) -> Self {
        Self { temperature_c, pressure_pa }
    }

    pub fn temperature_celsius(&self) -> f32 {
        self.temperature_c
    }

    /// Pressure in Pa, or `None` if compensation could not produce one.
    pub fn pressure_pascal(&self) -> Option<f32> {
        self.pressure_pa
    }

    pub fn pressure_hpa(&self) -> Option<f32> {
        self.pressure_pa.map(|p| p / 100.0)
    }

    /// Computes boiling point and altitude relative to `sea_level_hpa`.
    ///
    /// Returns `None` when there is no positive pressure to derive from.
    pub fn derive(&self, sea_level_hpa: f32) -> Option<DerivedReading> {
        let hpa = self.pressure_hpa().filter(|p| *p > 0.0)?;

        Some(DerivedReading {
            boiling_point_c: water_boiling_point(hpa),
            altitude_m: altitude(hpa, sea_level_hpa),
        })
    }
}

#[cfg(feature = "uom")]
impl CalibratedReading {
    pub fn temperature_uom(&self) -> uom::si::f32::ThermodynamicTemperature {
        use uom::si::thermodynamic_temperature::{degree_celsius, ThermodynamicTemperature};
        ThermodynamicTemperature::new::<degree_celsius>(self.temperature_c)
    }

    pub fn pressure_uom(&self) -> Option<uom::si::f32::Pressure> {
        use uom::si::pressure::{pascal, Pressure};
        self.pressure_pa.map(Pressure::new::<pascal>)
    }
}

/// Boiling point of water and altitude, both functions of pressure only.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DerivedReading {
    pub boiling_point_c: f32,
    pub altitude_m: f32,
}

/// Everything produced by one sampling cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Report {
    pub reading: CalibratedReading,
    pub derived: Option<DerivedReading>,
}

impl Report {
    pub fn new(reading: CalibratedReading, sea_level_hpa: f32) -> Self {
        Self { reading, derived: reading.derive(sea_level_hpa) }
    }
}

/// One line per cycle, all values with two decimals.
impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Temperature = {:.2} *C, ", self.reading.temperature_c)?;

        match self.reading.pressure_pa {
            Some(p) => write!(f, "Pressure = {p:.2} Pa, ")?,
            None => write!(f, "Pressure = n/a, ")?,
        }

        match self.derived {
            Some(d) => write!(
                f,
                "Water BoilPoint = {:.2} *C, Altitude = {:.2} m",
                d.boiling_point_c, d.altitude_m
            ),
            None => write!(f, "Water BoilPoint = n/a, Altitude = n/a"),
        }
    }
}
