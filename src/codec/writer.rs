use byteorder::{BigEndian, ByteOrder};

use super::types::{Fixed, WorldPoint2d};
use super::strings::encode_fixed_string;

/// Big-endian binary writer for chunk and file data
pub struct BinaryWriter {
    data: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity) }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn write_zeros(&mut self, n: usize) {
        self.data.resize(self.data.len() + n, 0);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i16(&mut self, v: i16) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i16_slice(&mut self, values: &[i16]) {
        for &v in values {
            self.write_i16(v);
        }
    }

    /// Overwrite a previously written u32 (offsets and checksums patched after layout)
    pub fn patch_u32(&mut self, pos: usize, v: u32) {
        BigEndian::write_u32(&mut self.data[pos..pos + 4], v);
    }

    pub fn patch_i32(&mut self, pos: usize, v: i32) {
        BigEndian::write_i32(&mut self.data[pos..pos + 4], v);
    }

    /// Write a 16.16 fixed-point value
    pub fn write_fixed(&mut self, v: Fixed) {
        self.write_i32(v.0);
    }

    /// Write a 2D world point
    pub fn write_point(&mut self, p: WorldPoint2d) {
        self.write_i16(p.x);
        self.write_i16(p.y);
    }

    /// Write a string NUL-padded (or truncated) to exactly `len` bytes
    pub fn write_fixed_string(&mut self, s: &str, len: usize) {
        self.write_bytes(&encode_fixed_string(s, len));
    }
}

impl Default for BinaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BinaryWriter> for Vec<u8> {
    fn from(writer: BinaryWriter) -> Self {
        writer.into_vec()
    }
}
