use crate::bus::Bus;
use crate::codec::READ_FLAG;
use crate::register::calibration::DIG_T1;
use crate::register::chip_id::BMP280_CHIP_ID;
use crate::register::data::{PRESSURE_DATA, TEMPERATURE_DATA};
use crate::register::reset::Reset;
use crate::register::Reg;
use crate::sampler::Shutdown;
use embedded_hal_async::delay::DelayNs;

/// Datasheet section 8.1 trimming values as stored in NVM (0x88..0x9F, LSB first).
pub const REFERENCE_CALIBRATION_NVM: [u8; 24] = [
    0x70, 0x6B, // dig_T1 27504
    0x43, 0x67, // dig_T2 26435
    0x18, 0xFC, // dig_T3 -1000
    0x7D, 0x8E, // dig_P1 36477
    0x43, 0xD6, // dig_P2 -10685
    0xD0, 0x0B, // dig_P3 3024
    0x27, 0x0B, // dig_P4 2855
    0x8C, 0x00, // dig_P5 140
    0xF9, 0xFF, // dig_P6 -7
    0x8C, 0x3C, // dig_P7 15500
    0xF8, 0xC6, // dig_P8 -14600
    0x70, 0x17, // dig_P9 6000
];

/// adc_T = 519888
pub const REFERENCE_RAW_TEMPERATURE: [u8; 3] = [0x7E, 0xED, 0x00];

/// adc_P = 415148
pub const REFERENCE_RAW_PRESSURE: [u8; 3] = [0x65, 0x5A, 0xC0];

#[derive(Debug, PartialEq)]
pub struct FakeBusError;

/// Simulated BMP280 register file behind the [`Bus`] seam.
///
/// Reads auto-increment from the addressed register, writes land in the register file and are logged.
pub struct FakeBus {
    regs: [u8; 256],
    reads: Vec<(u8, usize)>,
    writes: Vec<(u8, u8)>,
    short_transfer: Option<usize>,
    transfers_until_failure: Option<usize>,
}

impl FakeBus {
    pub fn new() -> Self {
        FakeBus {
            regs: [0u8; 256],
            reads: Vec::new(),
            writes: Vec::new(),
            short_transfer: None,
            transfers_until_failure: None,
        }
    }

    /// A connected BMP280 holding the reference trimming values and raw codes.
    pub fn bmp280() -> Self {
        let mut bus = Self::new();
        bus.set(0xD0, &[BMP280_CHIP_ID]);
        bus.set(0xD1, &[0x10]);
        bus.set(DIG_T1, &REFERENCE_CALIBRATION_NVM);
        bus.set(TEMPERATURE_DATA, &REFERENCE_RAW_TEMPERATURE);
        bus.set(PRESSURE_DATA, &REFERENCE_RAW_PRESSURE);
        bus
    }

    pub fn set(&mut self, addr: u8, bytes: &[u8]) {
        let start = addr as usize;
        self.regs[start..start + bytes.len()].copy_from_slice(bytes);
    }

    pub fn get(&self, addr: u8) -> u8 {
        self.regs[addr as usize]
    }

    /// Every read as (register, payload length), in order.
    pub fn reads(&self) -> &[(u8, usize)] {
        &self.reads
    }

    /// Every write as (register, value), in order.
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    pub fn clear_log(&mut self) {
        self.reads.clear();
        self.writes.clear();
    }

    /// From now on, report only `actual` bytes exchanged for any longer frame.
    pub fn short_transfers(&mut self, actual: usize) {
        self.short_transfer = Some(actual);
    }

    /// Let `transfers` more transfers succeed, then fail all of them.
    pub fn fail_after(&mut self, transfers: usize) {
        self.transfers_until_failure = Some(transfers);
    }
}

impl Bus for FakeBus {
    type Error = FakeBusError;

    async fn transfer(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if let Some(remaining) = self.transfers_until_failure.as_mut() {
            if *remaining == 0 {
                return Err(FakeBusError);
            }
            *remaining -= 1;
        }

        if let Some(actual) = self.short_transfer {
            if actual < buf.len() {
                return Ok(actual);
            }
        }

        let addr = buf[0];
        if addr & READ_FLAG != 0 {
            self.reads.push((addr, buf.len() - 1));
            buf[0] = 0xFF;
            for (i, b) in buf[1..].iter_mut().enumerate() {
                *b = self.regs[addr as usize + i];
            }
        } else {
            let reg = addr | READ_FLAG;
            self.writes.push((reg, buf[1]));
            if reg != Reset::ADDR {
                self.regs[reg as usize] = buf[1];
            }
        }

        Ok(buf.len())
    }
}

/// Records requested delays instead of waiting, optionally requesting shutdown after a number of them.
pub struct FakeDelay<'a> {
    pub elapsed_ns: u64,
    pub calls: usize,
    stop: Option<(&'a Shutdown, usize)>,
}

impl FakeDelay<'static> {
    pub fn new() -> Self {
        FakeDelay { elapsed_ns: 0, calls: 0, stop: None }
    }
}

impl<'a> FakeDelay<'a> {
    pub fn stop_after(shutdown: &'a Shutdown, calls: usize) -> Self {
        FakeDelay { elapsed_ns: 0, calls: 0, stop: Some((shutdown, calls)) }
    }

    fn record(&mut self, ns: u64) {
        self.elapsed_ns += ns;
        self.calls += 1;

        if let Some((shutdown, calls)) = self.stop {
            if self.calls >= calls {
                shutdown.request();
            }
        }
    }
}

impl DelayNs for FakeDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.record(ns as u64);
    }

    async fn delay_us(&mut self, us: u32) {
        self.record(us as u64 * 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.record(ms as u64 * 1_000_000);
    }
}
