//! Async driver for the Bosch BMP280 barometric pressure and temperature sensor over SPI.
//!
//! The driver is built on `embedded-hal-async` and works with any [`SpiDevice`](embedded_hal_async::spi::SpiDevice)
//! implementation. A [`Bmp280`] session probes the chip, loads its factory calibration and turns raw ADC
//! codes into degrees Celsius and Pascal. [`Sampler`] repeats that at a fixed interval and adds the
//! boiling point of water and the altitude for every reading.
//!
//! ```rust,no_run
//! # use embedded_hal_async::delay::DelayNs;
//! # use embedded_hal_async::spi::SpiDevice;
//! use bmp280_rs::{Bmp280, Bmp280Result, Configuration, Report};
//!
//! # async fn demo<S: SpiDevice, D: DelayNs>(spi: S, mut delay: D) -> Bmp280Result<(), S::Error> {
//! let config = Configuration::default();
//! let mut device = Bmp280::new_spi(spi, &config, &mut delay).await?;
//!
//! let reading = device.sample_once().await?;
//! let report = Report::new(reading, 1013.25);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), no_std)]

pub mod bus;
pub mod codec;
pub mod config;
pub mod derived;
pub mod error;
pub mod measurement;
pub mod register;
pub mod sampler;

mod bmp280;
mod calibration;
mod compensation;

#[cfg(test)]
mod testing;

pub use bmp280::{Bmp280, Bmp280Result, Bmp280Spi};
pub use calibration::CalibrationData;
pub use compensation::FineTemperature;
pub use config::{Configuration, ResetPolicy};
pub use error::Bmp280Error;
pub use measurement::{CalibratedReading, DerivedReading, Report};
pub use register::data::RawSample;
pub use sampler::{ReadingSink, Sampler, Shutdown};
