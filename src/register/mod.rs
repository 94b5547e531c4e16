//! Register catalog for the BMP280.
//!
//! Each register is a zero-sized marker type implementing [`Reg`] plus [`Readable`] and/or [`Writable`].
//! The marker carries the address and payload length, and knows how to decode/encode the payload.
//! Markers are used with [`Bmp280::read`](crate::Bmp280::read) and [`Bmp280::write`](crate::Bmp280::write).
//!
//! The calibration words and the measurement data registers are read word-by-word with the codec reads on
//! [`Bus`](crate::bus::Bus); their addresses live in [`calibration`] and [`data`].
pub mod chip_id;
pub mod version;
pub mod reset;
pub mod ctrl_meas;
pub mod config;
pub mod calibration;
pub mod data;

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Self::Out;
}

/// Single byte writable register
pub trait Writable: Reg {
    type In;
    fn encode(v: &Self::In, out: &mut [u8]);
}
