use crate::bus::{Bus, Spi};
use crate::calibration::CalibrationData;
use crate::codec;
use crate::compensation::FineTemperature;
use crate::config::{Configuration, ResetPolicy};
use crate::error::Bmp280Error;
use crate::measurement::CalibratedReading;
use crate::register::chip_id::{ChipId, BMP280_CHIP_ID};
use crate::register::ctrl_meas::{CtrlMeas, CtrlMeasFields};
use crate::register::data::{RawSample, PRESSURE_DATA, TEMPERATURE_DATA};
use crate::register::reset::{Reset, ResetCommand};
use crate::register::version::Version;
use crate::register::config::Config;
use crate::register::{Readable, Writable};
use embedded_hal_async::delay::DelayNs;

/// Type alias for a Bmp280 chip communicating over an `embedded-hal-async` SPI device
pub type Bmp280Spi<T> = Bmp280<Spi<T>>;

/// Start-up time after power-on or soft reset, datasheet table 2.
const STARTUP_TIME_MS: u32 = 2;

/// Main Bmp280 driver struct.
///
/// Owns the bus and the calibration data of the connected device for as long as the session lives.
pub struct Bmp280<B> {
    bus: B,
    calibration_data: CalibrationData,
}

/// Type alias used to simplify return types throughout the driver
pub type Bmp280Result<T, BusError> = Result<T, Bmp280Error<BusError>>;

impl<T> Bmp280Spi<T>
where
    T: embedded_hal_async::spi::SpiDevice,
{
    /// Constructs a new Bmp280 driver instance that communicates over SPI.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal_async::delay::DelayNs;
    /// # use embedded_hal_async::spi::SpiDevice;
    /// # use bmp280_rs::Bmp280Result;
    ///  use bmp280_rs::Bmp280;
    ///  use bmp280_rs::config::Configuration;
    /// # async fn demo<S: SpiDevice, D: DelayNs>(spi: S, mut delay: D) -> Bmp280Result<(), S::Error> {
    ///
    ///  let mut device = Bmp280::new_spi(spi, &Configuration::default(), &mut delay).await?;
    ///  let reading = device.sample_once().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new_spi<D: DelayNs>(
        spi: T,
        config: &Configuration,
        delay: &mut D,
    ) -> Bmp280Result<Self, <Spi<T> as Bus>::Error> {
        Self::new(Spi::new(spi), config, delay).await
    }
}

impl<B> Bmp280<B>
where
    B: Bus,
{
    /// Reads ChipId up to `attempts` times with a 1 ms delay in between.
    ///
    /// Returns [`Bmp280Error::DeviceNotFound`] if a different id was read, or the last bus error if no
    /// read succeeded at all.
    async fn probe<D: DelayNs>(
        bus: &mut B,
        delay: &mut D,
        attempts: u32,
    ) -> Bmp280Result<(), B::Error> {
        let mut last = Err(Bmp280Error::DeviceNotFound { chip_id: 0 });

        for attempt in 0..attempts {
            if attempt > 0 {
                delay.delay_ms(1).await;
            }

            match bus.read::<ChipId>().await {
                Ok(BMP280_CHIP_ID) => return Ok(()),
                Ok(chip_id) => {
                    log::warn!("unexpected chip id {:#04x}", chip_id);
                    last = Err(Bmp280Error::DeviceNotFound { chip_id });
                }
                Err(e) => last = Err(e),
            }
        }

        last
    }

    /// Creates a device session:
    /// - Probe for a connected BMP280.
    /// - Perform a soft reset if the configuration asks for it.
    /// - Load calibration coefficients from NVM.
    /// - Write CONFIG (if configured) and CTRL_MEAS.
    pub async fn new<D: DelayNs>(
        mut bus: B,
        config: &Configuration,
        delay: &mut D,
    ) -> Bmp280Result<Self, B::Error> {
        Self::probe(&mut bus, delay, config.probe_attempts).await?;

        if config.reset == ResetPolicy::Soft {
            bus.write::<Reset>(&ResetCommand::SoftReset).await?;
            delay.delay_ms(STARTUP_TIME_MS).await;
        }

        let calibration_data = CalibrationData::load(&mut bus).await?;

        let mut device = Bmp280 { bus, calibration_data };
        device.apply_configuration(config).await?;

        log::info!("BMP280 initialized, control {:#04x}", config.control.bits());

        Ok(device)
    }

    /// Writes CONFIG (if set) followed by CTRL_MEAS.
    pub async fn apply_configuration(&mut self, config: &Configuration) -> Bmp280Result<(), B::Error> {
        if let Some(fields) = &config.config {
            log::debug!("writing CONFIG {:?}", fields);
            self.bus.write::<Config>(fields).await?;
        }

        self.set_control(config.control).await
    }

    /// Read a register using a typed marker from [`crate::register`].
    pub async fn read<R: Readable>(&mut self) -> Bmp280Result<R::Out, B::Error> {
        self.bus.read::<R>().await
    }

    /// Write a register using a typed marker from [`crate::register`].
    pub async fn write<W: Writable>(&mut self, v: &W::In) -> Bmp280Result<(), B::Error> {
        self.bus.write::<W>(v).await
    }

    /// Determines if the BMP280 is still connected by reading the ID (0xD0) register.
    pub async fn is_connected(&mut self) -> Bmp280Result<bool, B::Error> {
        let id = self.bus.read::<ChipId>().await?;

        Ok(id == BMP280_CHIP_ID)
    }

    /// Returns the mask revision from the VERSION (0xD1) register.
    pub async fn version(&mut self) -> Bmp280Result<u8, B::Error> {
        self.bus.read::<Version>().await
    }

    /// Triggers a soft reset and waits the start-up time.
    ///
    /// **Note:** This resets CTRL_MEAS and CONFIG to their power-on defaults (sleep mode); call
    /// [`apply_configuration`](Self::apply_configuration) afterwards to resume sampling.
    pub async fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Bmp280Result<(), B::Error> {
        self.bus.write::<Reset>(&ResetCommand::SoftReset).await?;
        delay.delay_ms(STARTUP_TIME_MS).await;

        Ok(())
    }

    /// Reads CTRL_MEAS (0xF4).
    pub async fn control(&mut self) -> Bmp280Result<CtrlMeasFields, B::Error> {
        self.bus.read::<CtrlMeas>().await
    }

    /// Writes CTRL_MEAS (0xF4).
    pub async fn set_control(&mut self, control: CtrlMeasFields) -> Bmp280Result<(), B::Error> {
        log::debug!("writing CTRL_MEAS {:#04x}", control.bits());
        self.bus.write::<CtrlMeas>(&control).await
    }

    /// The trimming parameters loaded during initialization.
    pub fn calibration(&self) -> &CalibrationData {
        &self.calibration_data
    }

    async fn read_raw(&mut self, addr: u8) -> Bmp280Result<u32, B::Error> {
        let msb_lsb = self.bus.read_u16_be(addr).await?;
        let xlsb = self.bus.read_u8(addr + 2).await?;

        Ok(codec::raw_adc(msb_lsb, xlsb))
    }

    /// Reads the raw temperature code (0xFA..0xFC).
    pub async fn read_raw_temperature(&mut self) -> Bmp280Result<u32, B::Error> {
        self.read_raw(TEMPERATURE_DATA).await
    }

    /// Reads the raw pressure code (0xF7..0xF9).
    pub async fn read_raw_pressure(&mut self) -> Bmp280Result<u32, B::Error> {
        self.read_raw(PRESSURE_DATA).await
    }

    /// Reads both raw codes, temperature first.
    pub async fn read_raw_sample(&mut self) -> Bmp280Result<RawSample, B::Error> {
        let temperature = self.read_raw_temperature().await?;
        let pressure = self.read_raw_pressure().await?;

        Ok(RawSample::new(temperature, pressure))
    }

    /// Reads and compensates the temperature.
    ///
    /// The returned [`FineTemperature`] is the input for [`read_pressure`](Self::read_pressure) in the
    /// same cycle.
    pub async fn read_temperature(&mut self) -> Bmp280Result<(f32, FineTemperature), B::Error> {
        let adc_t = self.read_raw_temperature().await?;

        Ok(self.calibration_data.compensate_temperature(adc_t))
    }

    /// Reads and compensates the pressure in Pa. See [`CalibrationData::compensate_pressure`] for the
    /// meaning of `0.0`; [`sample_once`](Self::sample_once) reports that case as no pressure.
    pub async fn read_pressure(&mut self, t_fine: FineTemperature) -> Bmp280Result<f32, B::Error> {
        let adc_p = self.read_raw_pressure().await?;

        Ok(self.calibration_data.compensate_pressure(adc_p, t_fine))
    }

    /// Reads temperature then pressure and compensates both.
    pub async fn sample_once(&mut self) -> Bmp280Result<CalibratedReading, B::Error> {
        let sample = self.read_raw_sample().await?;
        log::trace!("raw temperature {} pressure {}", sample.temperature(), sample.pressure());

        let (temperature, t_fine) = self.calibration_data.compensate_temperature(sample.temperature());

        let pressure = if sample.pressure_skipped() {
            log::debug!("pressure measurement skipped");
            None
        } else {
            let pressure = self.calibration_data.pressure_pascal(sample.pressure(), t_fine);
            if pressure.is_none() {
                log::warn!("pressure compensation divisor is zero, check calibration data");
            }
            pressure
        };

        Ok(CalibratedReading::new(temperature, pressure))
    }

    /// Ends the session and hands back the bus.
    pub fn release(self) -> B {
        self.bus
    }
}
