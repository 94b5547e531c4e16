//! ### VERSION - Mask revision (`0xD1`, 1 byte, R)
//!
//! Holds the revision of the ASIC. Where `ID` identifies the device model, `VERSION` tells revisions of it apart.
use crate::register::{Readable, Reg};

/// Marker type for the VERSION (0xD1) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
///
/// Used with [`crate::Bmp280::version`]
pub struct Version;
impl Reg for Version { const ADDR: u8 = 0xD1; }

impl Readable for Version {
    type Out = u8;
    fn decode(b: &[u8]) -> Self::Out {
        b[0]
    }
}
