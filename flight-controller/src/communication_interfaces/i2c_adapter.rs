use core::fmt::Debug;

use embedded_hal::i2c::I2c;

/// Largest single read the buffered adapter can hold.
pub const MAX_REQUEST_LEN: usize = 32;

/// Byte oriented view of a two-wire bus: a read is requested up front and
/// the bytes are drained one at a time once they are available.
pub trait I2CAdapter {
    type Error: Debug;

    fn write_to_device(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;
    fn request_from_device(&mut self, address: u8, count: usize) -> Result<(), Self::Error>;
    fn available(&mut self) -> usize;
    fn read_byte(&mut self) -> Option<u8>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HalI2CAdapterError<E> {
    Bus(E),
    /// The request does not fit the adapter buffer. Nothing was read.
    RequestTooLong { requested: usize, max: usize },
}

/// [`I2CAdapter`] over a blocking `embedded-hal` bus. The request performs
/// the whole read, so the bytes are available as soon as it returns.
pub struct HalI2CAdapter<I> {
    i2c_driver: I,
    buffer: [u8; MAX_REQUEST_LEN],
    len: usize,
    position: usize,
}

impl<I> HalI2CAdapter<I>
where
    I: I2c,
{
    pub fn new(i2c_driver: I) -> Self {
        HalI2CAdapter {
            i2c_driver,
            buffer: [0; MAX_REQUEST_LEN],
            len: 0,
            position: 0,
        }
    }
}

impl<I> I2CAdapter for HalI2CAdapter<I>
where
    I: I2c,
{
    type Error = HalI2CAdapterError<I::Error>;

    fn write_to_device(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c_driver
            .write(address, bytes)
            .map_err(HalI2CAdapterError::Bus)
    }

    fn request_from_device(&mut self, address: u8, count: usize) -> Result<(), Self::Error> {
        self.len = 0;
        self.position = 0;
        if count > MAX_REQUEST_LEN {
            return Err(HalI2CAdapterError::RequestTooLong {
                requested: count,
                max: MAX_REQUEST_LEN,
            });
        }
        self.i2c_driver
            .read(address, &mut self.buffer[..count])
            .map_err(HalI2CAdapterError::Bus)?;
        self.len = count;
        Ok(())
    }

    fn available(&mut self) -> usize {
        self.len - self.position
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.position >= self.len {
            return None;
        }
        let byte = self.buffer[self.position];
        self.position += 1;
        Some(byte)
    }
}
