use crate::derived::STANDARD_SEA_LEVEL_HPA;
use crate::register::config::ConfigFields;
use crate::register::ctrl_meas::CtrlMeasFields;

/// What to do at startup before loading calibration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Write 0xB6 to RESET and wait the 2 ms start-up time.
    Soft,
    /// Don't reset; leave the chip as-is.
    None,
}

/// Device and sampling settings, applied by [`crate::Bmp280::new`] and [`crate::Sampler::new`].
#[derive(Copy, Clone, Debug)]
pub struct Configuration {
    pub(crate) control: CtrlMeasFields,
    pub(crate) config: Option<ConfigFields>,
    pub(crate) reset: ResetPolicy,
    pub(crate) probe_attempts: u32,
    pub(crate) sampling_interval_ms: u32,
    pub(crate) sea_level_hpa: f32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            control: CtrlMeasFields::default(),
            config: None,
            reset: ResetPolicy::None,
            probe_attempts: 1,
            sampling_interval_ms: 1200,
            sea_level_hpa: STANDARD_SEA_LEVEL_HPA,
        }
    }
}

impl Configuration {
    /// Sets the CTRL_MEAS value written at the end of initialization.
    pub fn control(mut self, control: CtrlMeasFields) -> Self {
        self.control = control;

        self
    }

    /// Sets the CTRL_MEAS value from a raw byte, e.g. one taken from a datasheet table.
    pub fn control_bits(mut self, bits: u8) -> Self {
        self.control = CtrlMeasFields::from_bits(bits);

        self
    }

    /// Also writes CONFIG (standby time, IIR filter) during initialization.
    pub fn config(mut self, config: ConfigFields) -> Self {
        self.config = Some(config);

        self
    }

    pub fn reset_policy(mut self, reset: ResetPolicy) -> Self {
        self.reset = reset;

        self
    }

    /// How many times the chip id is read, 1 ms apart, before giving up. At least one attempt is made.
    pub fn probe_attempts(mut self, attempts: u32) -> Self {
        self.probe_attempts = attempts.max(1);

        self
    }

    /// Period of the sampling loop.
    pub fn sampling_interval_ms(mut self, interval_ms: u32) -> Self {
        self.sampling_interval_ms = interval_ms;

        self
    }

    /// Pressure at the altitude reference level, in hPa.
    pub fn sea_level_hpa(mut self, sea_level_hpa: f32) -> Self {
        self.sea_level_hpa = sea_level_hpa;

        self
    }
}
