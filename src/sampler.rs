//! Periodic sampling loop with cooperative shutdown.
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal_async::delay::DelayNs;

use crate::bus::Bus;
use crate::config::Configuration;
use crate::measurement::Report;
use crate::{Bmp280, Bmp280Result};

/// Stop flag shared between the sampling loop and whoever asks it to stop (e.g. a signal handler).
///
/// Can live in a `static`.
pub struct Shutdown {
    requested: AtomicBool,
}

impl Shutdown {
    pub const fn new() -> Self {
        Self { requested: AtomicBool::new(false) }
    }

    /// Asks the loop to stop before its next cycle.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives one [`Report`] per sampling cycle.
pub trait ReadingSink {
    fn emit(&mut self, report: &Report);
}

/// Drives a [`Bmp280`] session at a fixed interval.
pub struct Sampler<B> {
    device: Bmp280<B>,
    interval_ms: u32,
    sea_level_hpa: f32,
}

impl<B> Sampler<B>
where
    B: Bus,
{
    pub fn new(device: Bmp280<B>, config: &Configuration) -> Self {
        Self {
            device,
            interval_ms: config.sampling_interval_ms,
            sea_level_hpa: config.sea_level_hpa,
        }
    }

    /// One sample plus derived values.
    pub async fn cycle(&mut self) -> Bmp280Result<Report, B::Error> {
        let reading = self.device.sample_once().await?;

        Ok(Report::new(reading, self.sea_level_hpa))
    }

    /// Samples, emits and sleeps until `shutdown` is requested.
    ///
    /// The flag is checked at the top of every cycle, so a request made while sleeping takes effect once
    /// the current delay has elapsed. Returns the number of completed cycles, or the first error, which
    /// ends the loop.
    pub async fn run<D, S>(
        &mut self,
        delay: &mut D,
        shutdown: &Shutdown,
        sink: &mut S,
    ) -> Bmp280Result<u32, B::Error>
    where
        D: DelayNs,
        S: ReadingSink,
    {
        let mut cycles = 0;

        while !shutdown.is_requested() {
            let report = self.cycle().await?;
            sink.emit(&report);
            cycles += 1;

            delay.delay_ms(self.interval_ms).await;
        }

        log::info!("sampling stopped after {} cycles", cycles);

        Ok(cycles)
    }

    /// The session, e.g. to change CTRL_MEAS between runs.
    pub fn device(&mut self) -> &mut Bmp280<B> {
        &mut self.device
    }

    pub fn into_device(self) -> Bmp280<B> {
        self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Bmp280Error;
    use crate::register::calibration::DIG_P1;
    use crate::register::ctrl_meas::{CtrlMeasFields, Oversampling, PowerMode};
    use crate::testing::{FakeBus, FakeBusError, FakeDelay};

    #[derive(Default)]
    struct Lines(Vec<String>);

    impl ReadingSink for Lines {
        fn emit(&mut self, report: &Report) {
            self.0.push(format!("{report}"));
        }
    }

    async fn sampler(bus: FakeBus) -> Sampler<FakeBus> {
        let config = Configuration::default();
        let device = Bmp280::new(bus, &config, &mut FakeDelay::new()).await.unwrap();

        Sampler::new(device, &config)
    }

    #[test]
    fn shutdown_flag() {
        static SHUTDOWN: Shutdown = Shutdown::new();

        assert!(!SHUTDOWN.is_requested());
        SHUTDOWN.request();
        assert!(SHUTDOWN.is_requested());
    }

    #[tokio::test]
    async fn runs_until_shutdown() {
        let mut sampler = sampler(FakeBus::bmp280()).await;
        let shutdown = Shutdown::new();
        let mut delay = FakeDelay::stop_after(&shutdown, 3);
        let mut lines = Lines::default();

        let cycles = sampler.run(&mut delay, &shutdown, &mut lines).await.unwrap();

        assert_eq!(3, cycles);
        assert_eq!(3_600_000_000, delay.elapsed_ns);
        assert_eq!(3, lines.0.len());
        assert!(lines.0[0].starts_with("Temperature = 25.08 *C, Pressure = 100653.2"));
        assert!(lines.0.iter().all(|l| l == &lines.0[0]));
    }

    #[tokio::test]
    async fn device_is_reachable_between_runs() {
        let mut sampler = sampler(FakeBus::bmp280()).await;

        sampler
            .device()
            .set_control(CtrlMeasFields::new(Oversampling::X1, Oversampling::Skipped, PowerMode::Normal))
            .await
            .unwrap();

        let shutdown = Shutdown::new();
        let mut delay = FakeDelay::stop_after(&shutdown, 1);
        let mut lines = Lines::default();
        sampler.run(&mut delay, &shutdown, &mut lines).await.unwrap();

        assert_eq!(Oversampling::Skipped, sampler.device().control().await.unwrap().pressure_oversampling());
        assert_eq!(Some(&(0xF4, 0x23)), sampler.into_device().release().writes().last());
    }

    #[tokio::test]
    async fn shutdown_before_start_samples_nothing() {
        let mut sampler = sampler(FakeBus::bmp280()).await;
        let shutdown = Shutdown::new();
        shutdown.request();
        let mut delay = FakeDelay::new();
        let mut lines = Lines::default();

        assert_eq!(0, sampler.run(&mut delay, &shutdown, &mut lines).await.unwrap());
        assert_eq!(0, delay.calls);
        assert!(lines.0.is_empty());
    }

    #[tokio::test]
    async fn bus_error_ends_loop() {
        let mut bus = FakeBus::bmp280();
        // initialization, one full cycle, then the first read of the second
        bus.fail_after(14 + 4 + 1);
        let mut sampler = sampler(bus).await;
        let shutdown = Shutdown::new();
        let mut delay = FakeDelay::new();
        let mut lines = Lines::default();

        let result = sampler.run(&mut delay, &shutdown, &mut lines).await;

        assert_eq!(Err(Bmp280Error::Bus(FakeBusError)), result);
        assert_eq!(1, lines.0.len());
        assert_eq!(1, delay.calls);
    }

    #[tokio::test]
    async fn unusable_calibration_keeps_sampling() {
        let mut bus = FakeBus::bmp280();
        bus.set(DIG_P1, &[0x00, 0x00]);
        let mut sampler = sampler(bus).await;

        let report = sampler.cycle().await.unwrap();

        assert_eq!(None, report.derived);
        assert_eq!(
            "Temperature = 25.08 *C, Pressure = n/a, Water BoilPoint = n/a, Altitude = n/a",
            format!("{report}")
        );
    }

    #[tokio::test]
    async fn reference_report() {
        let mut sampler = sampler(FakeBus::bmp280()).await;

        let report = sampler.cycle().await.unwrap();
        let derived = report.derived.unwrap();

        assert!((derived.boiling_point_c - 99.81).abs() < 0.01);
        assert!((derived.altitude_m - 56.08).abs() < 0.1);
    }
}
