//! ### calib00..calib23 - Trimming parameters (`0x88` - `0x9F`, 24 bytes, R)
//!
//! Twelve 16-bit words programmed into NVM during production, stored LSB first. `dig_T1` and `dig_P1` are
//! unsigned, the remaining ten are two's complement. See datasheet section 3.11.2.

pub const DIG_T1: u8 = 0x88;
pub const DIG_T2: u8 = 0x8A;
pub const DIG_T3: u8 = 0x8C;
pub const DIG_P1: u8 = 0x8E;
pub const DIG_P2: u8 = 0x90;
pub const DIG_P3: u8 = 0x92;
pub const DIG_P4: u8 = 0x94;
pub const DIG_P5: u8 = 0x96;
pub const DIG_P6: u8 = 0x98;
pub const DIG_P7: u8 = 0x9A;
pub const DIG_P8: u8 = 0x9C;
pub const DIG_P9: u8 = 0x9E;
