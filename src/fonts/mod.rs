//! Binary font decoders. Each one only needs to reach the `name` table.

pub mod name;
pub mod opentype;
pub mod woff;
pub mod woff2;

#[cfg(test)]
pub(crate) mod fixtures;

pub use opentype::OpenTypeDecoder;
pub use woff::WoffDecoder;
pub use woff2::Woff2Decoder;

use crate::domain::ports::FontDecoder;
use crate::utils::error::FontDecodeError;
use read_fonts::FontData;

pub(crate) const NAME_TAG: u32 = u32::from_be_bytes(*b"name");

/// Brute-force order: OpenType, then WOFF2, then WOFF.
pub fn default_decoders() -> Vec<Box<dyn FontDecoder>> {
    vec![
        Box::new(OpenTypeDecoder),
        Box::new(Woff2Decoder),
        Box::new(WoffDecoder),
    ]
}

/// Big-endian reader over font bytes; running past the end is `Truncated`.
pub(crate) struct Cursor<'a> {
    data: FontData<'a>,
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self {
            data: FontData::new(bytes),
            pos,
        }
    }

    pub fn u8(&mut self) -> Result<u8, FontDecodeError> {
        let value = self.data.read_at::<u8>(self.pos).map_err(|_| FontDecodeError::Truncated)?;
        self.pos += 1;
        Ok(value)
    }

    pub fn u16(&mut self) -> Result<u16, FontDecodeError> {
        let value = self.data.read_at::<u16>(self.pos).map_err(|_| FontDecodeError::Truncated)?;
        self.pos += 2;
        Ok(value)
    }

    pub fn u32(&mut self) -> Result<u32, FontDecodeError> {
        let value = self.data.read_at::<u32>(self.pos).map_err(|_| FontDecodeError::Truncated)?;
        self.pos += 4;
        Ok(value)
    }

    pub fn u32_at(&self, offset: usize) -> Result<u32, FontDecodeError> {
        self.data.read_at::<u32>(offset).map_err(|_| FontDecodeError::Truncated)
    }

    pub fn u16_at(&self, offset: usize) -> Result<u16, FontDecodeError> {
        self.data.read_at::<u16>(offset).map_err(|_| FontDecodeError::Truncated)
    }
}
