//! Frame building and byte decoding for BMP280 SPI register access.
//!
//! The BMP280 uses bit 7 of the first byte on MOSI as the read/write flag. A read is the register address
//! with bit 7 set followed by one dummy byte per data byte, and the device starts shifting data out on the
//! second byte, so the first received byte is always discarded. A write is the address with bit 7 cleared
//! followed by the value.
//!
//! Everything here is pure; the [`Bus`](crate::bus::Bus) trait turns these frames into transactions.

use heapless::Vec;

/// Largest register payload a single read frame can carry.
pub const MAX_REG_BYTES: usize = 8;

/// A read frame is the address byte plus one dummy byte per payload byte.
pub const MAX_FRAME_BYTES: usize = MAX_REG_BYTES + 1;

/// Bit 7 of the address byte. Set for reads, cleared for writes.
pub const READ_FLAG: u8 = 0x80;

pub type Frame = Vec<u8, MAX_FRAME_BYTES>;

/// Builds the frame for reading `len` bytes starting at `addr`.
///
/// Returns `None` if `len` exceeds [`MAX_REG_BYTES`].
pub fn read_request(addr: u8, len: usize) -> Option<Frame> {
    if len > MAX_REG_BYTES {
        return None;
    }

    let mut frame = Frame::new();
    frame.push(addr | READ_FLAG).ok()?;
    frame.resize(len + 1, 0x00).ok()?;

    Some(frame)
}

/// Builds the two byte frame for writing `value` to `addr`.
pub fn write_request(addr: u8, value: u8) -> [u8; 2] {
    [addr & !READ_FLAG, value]
}

/// Interprets two received bytes as a big-endian (MSB first) word.
pub fn be_u16(b: [u8; 2]) -> u16 {
    u16::from_be_bytes(b)
}

/// Interprets two received bytes as a little-endian (LSB first) word.
///
/// The calibration words are stored this way in the BMP280 NVM.
pub fn le_u16(b: [u8; 2]) -> u16 {
    be_u16(b).swap_bytes()
}

/// Same bits as [`be_u16`], read as two's complement.
pub fn be_i16(b: [u8; 2]) -> i16 {
    be_u16(b) as i16
}

/// Same bits as [`le_u16`], read as two's complement.
pub fn le_i16(b: [u8; 2]) -> i16 {
    le_u16(b) as i16
}

/// Packs an MSB/LSB register pair and the XLSB register into a 20-bit raw ADC code.
///
/// Only the upper nibble of `xlsb` carries data.
pub fn raw_adc(msb_lsb: u16, xlsb: u8) -> u32 {
    (((msb_lsb as u32) << 8) | xlsb as u32) >> 4
}
