//! Fixed-size record runs.
//!
//! Every entity chunk is a plain concatenation of equally sized records with
//! no count prefix; the block length alone determines how many there are.

use crate::error::{Error, Result};
use super::{BinaryReader, BinaryWriter};

/// A fixed-size big-endian record
pub trait Record: Sized {
    /// Encoded size in bytes
    const SIZE: usize;
    /// Human-readable name used in error messages
    const NAME: &'static str;

    fn read(reader: &mut BinaryReader) -> Result<Self>;
    fn write(&self, writer: &mut BinaryWriter);
}

/// Decode every record in `data`
pub fn decode_all<T: Record>(data: &[u8]) -> Result<Vec<T>> {
    if data.len() % T::SIZE != 0 {
        return Err(Error::Format(format!(
            "{} chunk is {} bytes, not a multiple of the {}-byte record size",
            T::NAME,
            data.len(),
            T::SIZE
        )));
    }
    let mut reader = BinaryReader::new(data);
    let mut out = Vec::with_capacity(data.len() / T::SIZE);
    while !reader.is_empty() {
        out.push(T::read(&mut reader)?);
    }
    Ok(out)
}

/// Encode records back to back
pub fn encode_all<T: Record>(records: &[T]) -> Vec<u8> {
    let mut writer = BinaryWriter::with_capacity(records.len() * T::SIZE);
    for record in records {
        record.write(&mut writer);
    }
    writer.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair(i16, i16);

    impl Record for Pair {
        const SIZE: usize = 4;
        const NAME: &'static str = "pair";

        fn read(reader: &mut BinaryReader) -> Result<Self> {
            Ok(Self(reader.read_i16()?, reader.read_i16()?))
        }

        fn write(&self, writer: &mut BinaryWriter) {
            writer.write_i16(self.0);
            writer.write_i16(self.1);
        }
    }

    #[test]
    fn test_decode_run() {
        let records: Vec<Pair> = decode_all(&[0, 1, 0, 2, 0xFF, 0xFF, 0, 0]).unwrap();
        assert_eq!(records, vec![Pair(1, 2), Pair(-1, 0)]);
    }

    #[test]
    fn test_empty_block() {
        let records: Vec<Pair> = decode_all(&[]).unwrap();
        assert!(records.is_empty());
        assert!(encode_all::<Pair>(&[]).is_empty());
    }

    #[test]
    fn test_length_not_multiple() {
        let err = decode_all::<Pair>(&[0, 1, 0]).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
