//! Samples a BMP280 on a Linux spidev node and prints one line per reading until Ctrl+C.
use std::fmt::{self, Display, Formatter};
use std::io;
use std::process::ExitCode;
use std::time::Duration;

use bmp280_rs::bus::Bus;
use bmp280_rs::codec::MAX_FRAME_BYTES;
use bmp280_rs::{Bmp280, Bmp280Error, Configuration, ReadingSink, Report, Sampler, Shutdown};
use embedded_hal_async::delay::DelayNs;
use env_logger::{Builder, Env};
use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};

const SPI_DEVICE: &str = "/dev/spidev0.1";
const SPI_SPEED_HZ: u32 = 500_000;
const SPI_BITS_PER_WORD: u8 = 8;

static SHUTDOWN: Shutdown = Shutdown::new();

#[derive(Debug)]
enum MonitorError {
    /// The spidev node could not be opened.
    TransportOpenFailed(io::Error),

    /// Mode, word size or speed were rejected.
    TransportConfigFailed(io::Error),

    Device(Bmp280Error<io::Error>),
}

impl Display for MonitorError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::TransportOpenFailed(error) => {
                write!(f, "cannot open {SPI_DEVICE}: {error}")
            }
            Self::TransportConfigFailed(error) => {
                write!(f, "cannot configure {SPI_DEVICE}: {error}")
            }
            Self::Device(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for MonitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TransportOpenFailed(error) | Self::TransportConfigFailed(error) => Some(error),
            Self::Device(_) => None,
        }
    }
}

impl From<Bmp280Error<io::Error>> for MonitorError {
    fn from(error: Bmp280Error<io::Error>) -> Self {
        MonitorError::Device(error)
    }
}

/// [`Bus`] over a Linux spidev character device.
struct SpidevBus {
    spi: Spidev,
}

impl SpidevBus {
    fn open(path: &str) -> Result<Self, MonitorError> {
        let mut spi = Spidev::open(path).map_err(MonitorError::TransportOpenFailed)?;

        let options = SpidevOptions::new()
            .bits_per_word(SPI_BITS_PER_WORD)
            .max_speed_hz(SPI_SPEED_HZ)
            .lsb_first(false)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();

        spi.configure(&options).map_err(MonitorError::TransportConfigFailed)?;

        Ok(Self { spi })
    }
}

impl Bus for SpidevBus {
    type Error = io::Error;

    async fn transfer(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut tx = [0u8; MAX_FRAME_BYTES];
        let tx = tx.get_mut(..buf.len()).ok_or_else(|| io::Error::from(io::ErrorKind::InvalidInput))?;
        tx.copy_from_slice(buf);

        // spidev either clocks the whole frame or fails
        let mut transfer = SpidevTransfer::read_write(tx, buf);
        self.spi.transfer(&mut transfer)?;

        Ok(tx.len())
    }
}

struct TokioDelay;

impl DelayNs for TokioDelay {
    async fn delay_ns(&mut self, ns: u32) {
        tokio::time::sleep(Duration::from_nanos(ns.into())).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        tokio::time::sleep(Duration::from_millis(ms.into())).await;
    }
}

struct StdoutSink;

impl ReadingSink for StdoutSink {
    fn emit(&mut self, report: &Report) {
        println!("{report}");
    }
}

async fn monitor() -> Result<u32, MonitorError> {
    let config = Configuration::default();
    let mut delay = TokioDelay;

    let bus = SpidevBus::open(SPI_DEVICE)?;
    log::info!("opened {SPI_DEVICE} at {SPI_SPEED_HZ} Hz");

    let device = Bmp280::new(bus, &config, &mut delay).await?;
    log::debug!("calibration: {:?}", device.calibration());

    let mut sampler = Sampler::new(device, &config);
    let result = sampler.run(&mut delay, &SHUTDOWN, &mut StdoutSink).await;

    drop(sampler.into_device().release());
    log::info!("released {SPI_DEVICE}");

    Ok(result?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    tokio::spawn(async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("interrupt received, stopping");
                SHUTDOWN.request();
            }
            Err(e) => log::warn!("cannot listen for Ctrl+C: {e}"),
        }
    });

    match monitor().await {
        Ok(cycles) => {
            log::info!("{cycles} readings taken");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
