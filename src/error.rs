//! Errors that can occur when using the BMP280 device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication with BMP280.
//! It is generic over the underlying bus error type.

use core::fmt::{Debug, Display, Formatter};

/// This represents all possible errors that can occur when using the BMP280 device.
#[derive(Debug, PartialEq)]
pub enum Bmp280Error<BusError> {
    /// An error has occurred in the underlying bus driver
    Bus(BusError),

    /// The CHIP_ID (0xD0) register did not hold the BMP280 identity.
    ///
    /// Could possibly indicate an error with pin configuration and/or wiring, or a different Bosch sensor on the bus.
    DeviceNotFound {
        /// The value that was read back instead
        chip_id: u8,
    },

    /// The bus exchanged fewer bytes than the request frame held.
    ///
    /// The received data is discarded, it is never handed out partially filled.
    TransferIncomplete {
        /// Length of the request frame
        expected: usize,
        /// Number of bytes the bus reported as exchanged
        actual: usize,
    },

    /// A register read asked for more bytes than a single frame can carry.
    PayloadTooLong(usize),
}

impl<BusError: Debug> Display for Bmp280Error<BusError> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Bmp280Error::Bus(e) => write!(f, "bus error: {e:?}"),
            Bmp280Error::DeviceNotFound { chip_id } => {
                write!(f, "BMP280 not found (chip id {chip_id:#04x}, expected 0x58)")
            }
            Bmp280Error::TransferIncomplete { expected, actual } => {
                write!(f, "incomplete transfer: {actual} of {expected} bytes exchanged")
            }
            Bmp280Error::PayloadTooLong(len) => {
                write!(f, "register payload of {len} bytes does not fit in one frame")
            }
        }
    }
}
