use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};
use super::types::{Fixed, WorldPoint2d};
use super::strings::decode_fixed_string;

/// Big-endian binary reader over one chunk or file buffer
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof);
        }
        self.pos += n;
        Ok(())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.read_bytes(4)?))
    }

    /// Read `N` consecutive i16 values (index arrays in polygon and line records)
    pub fn read_i16_array<const N: usize>(&mut self) -> Result<[i16; N]> {
        let mut out = [0i16; N];
        for v in out.iter_mut() {
            *v = self.read_i16()?;
        }
        Ok(out)
    }

    /// Read a 16.16 fixed-point value
    pub fn read_fixed(&mut self) -> Result<Fixed> {
        Ok(Fixed(self.read_i32()?))
    }

    /// Read a 2D world point (x, y)
    pub fn read_point(&mut self) -> Result<WorldPoint2d> {
        Ok(WorldPoint2d {
            x: self.read_i16()?,
            y: self.read_i16()?,
        })
    }

    /// Read a NUL-padded string occupying exactly `len` bytes
    pub fn read_fixed_string(&mut self, len: usize) -> Result<String> {
        Ok(decode_fixed_string(self.read_bytes(len)?))
    }
}
