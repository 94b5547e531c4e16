use crate::codec;
use crate::error::Bmp280Error;
use crate::register::{Readable, Writable};
use crate::Bmp280Result;

pub use crate::codec::MAX_REG_BYTES;

/// Transport seam between the driver and the SPI hardware.
///
/// Implementors only provide [`transfer`](Bus::transfer); framing, length checks and decoding are
/// provided on top of it so every transport behaves the same way.
#[allow(async_fn_in_trait)]
pub trait Bus {
    type Error;

    /// Performs one full-duplex exchange. `buf` is clocked out and overwritten in place with the bytes
    /// clocked in. Returns the number of bytes actually exchanged.
    async fn transfer(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Reads `data.len()` consecutive bytes starting at register `addr` in one transaction.
    async fn read_register(&mut self, addr: u8, data: &mut [u8]) -> Bmp280Result<(), Self::Error> {
        let mut frame =
            codec::read_request(addr, data.len()).ok_or(Bmp280Error::PayloadTooLong(data.len()))?;

        let actual = self.transfer(&mut frame).await.map_err(Bmp280Error::Bus)?;
        if actual < frame.len() {
            return Err(Bmp280Error::TransferIncomplete { expected: frame.len(), actual });
        }

        // frame[0] was clocked in while the address went out
        data.copy_from_slice(&frame[1..]);

        Ok(())
    }

    /// Writes a single byte to register `addr`.
    async fn write_register(&mut self, addr: u8, value: u8) -> Bmp280Result<(), Self::Error> {
        let mut frame = codec::write_request(addr, value);

        let actual = self.transfer(&mut frame).await.map_err(Bmp280Error::Bus)?;
        if actual < frame.len() {
            return Err(Bmp280Error::TransferIncomplete { expected: frame.len(), actual });
        }

        Ok(())
    }

    /// Reads and decodes a register using a typed marker from [`crate::register`].
    async fn read<R: Readable>(&mut self) -> Bmp280Result<R::Out, Self::Error> {
        let mut buf = [0u8; MAX_REG_BYTES];
        let data = buf.get_mut(..R::N).ok_or(Bmp280Error::PayloadTooLong(R::N))?;
        self.read_register(R::ADDR, data).await?;

        Ok(R::decode(data))
    }

    /// Encodes and writes a register using a typed marker from [`crate::register`].
    async fn write<W: Writable>(&mut self, v: &W::In) -> Bmp280Result<(), Self::Error> {
        let mut buf = [0u8; 1];
        W::encode(v, &mut buf);
        self.write_register(W::ADDR, buf[0]).await
    }

    async fn read_u8(&mut self, addr: u8) -> Bmp280Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_register(addr, &mut buf).await?;
        Ok(buf[0])
    }

    async fn read_u16_be(&mut self, addr: u8) -> Bmp280Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.read_register(addr, &mut buf).await?;
        Ok(codec::be_u16(buf))
    }

    async fn read_i16_be(&mut self, addr: u8) -> Bmp280Result<i16, Self::Error> {
        let mut buf = [0u8; 2];
        self.read_register(addr, &mut buf).await?;
        Ok(codec::be_i16(buf))
    }

    async fn read_u16_le(&mut self, addr: u8) -> Bmp280Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.read_register(addr, &mut buf).await?;
        Ok(codec::le_u16(buf))
    }

    async fn read_i16_le(&mut self, addr: u8) -> Bmp280Result<i16, Self::Error> {
        let mut buf = [0u8; 2];
        self.read_register(addr, &mut buf).await?;
        Ok(codec::le_i16(buf))
    }
}

/// [`Bus`] over any [`embedded_hal_async::spi::SpiDevice`].
///
/// The device is expected to be configured for SPI mode 0 (or 3), 8 bit words, MSB first.
pub struct Spi<SpiType> {
    spi: SpiType,
}

impl<SpiType> Spi<SpiType>
where
    SpiType: embedded_hal_async::spi::SpiDevice,
{
    pub fn new(spi: SpiType) -> Self {
        Self { spi }
    }

    /// Returns the wrapped SPI device.
    pub fn release(self) -> SpiType {
        self.spi
    }
}

impl<SpiType> Bus for Spi<SpiType>
where
    SpiType: embedded_hal_async::spi::SpiDevice,
{
    type Error = <SpiType as embedded_hal::spi::ErrorType>::Error;

    async fn transfer(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.spi.transfer_in_place(buf).await?;

        Ok(buf.len())
    }
}
