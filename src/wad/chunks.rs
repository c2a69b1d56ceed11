//! Tagged chunk directory of one wad entry.
//!
//! Entry layout, repeated until `next_offset` is zero:
//!
//! ```text
//!   tag          u32
//!   next_offset  i32   offset of the next header from the start of the entry
//!   length       i32   payload bytes following this header
//!   offset       i32   unused, zero (absent in version 0/1 files)
//!   payload      [u8; length]
//! ```

use bytes::Bytes;
use indexmap::IndexMap;

use crate::codec::{BinaryReader, BinaryWriter, Tag};
use crate::error::{Error, Result};

pub const CHUNK_HEADER_SIZE: usize = 16;
pub const OLD_CHUNK_HEADER_SIZE: usize = 12;

/// Map of chunk tag to raw payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkMap {
    chunks: IndexMap<Tag, Bytes>,
}

impl ChunkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the chunk chain of one entry
    pub fn parse(data: &[u8], header_size: usize) -> Result<Self> {
        if header_size != CHUNK_HEADER_SIZE && header_size != OLD_CHUNK_HEADER_SIZE {
            return Err(Error::Format(format!("unsupported chunk header size {header_size}")));
        }

        let mut map = Self::new();
        if data.is_empty() {
            return Ok(map);
        }

        let mut reader = BinaryReader::new(data);
        let mut pos = 0usize;
        loop {
            if pos + header_size > data.len() {
                return Err(Error::Format(format!(
                    "chunk header at offset {pos} overruns {}-byte entry",
                    data.len()
                )));
            }
            reader.set_position(pos);
            let tag = Tag(reader.read_u32()?);
            let next_offset = reader.read_i32()?;
            let length = reader.read_i32()?;
            reader.skip(header_size - 12)?;

            let length = usize::try_from(length)
                .map_err(|_| Error::Format(format!("chunk {tag} has negative length {length}")))?;
            let start = pos + header_size;
            if length > data.len() - start {
                return Err(Error::Format(format!(
                    "chunk {tag} declares {length} bytes but only {} remain",
                    data.len() - start
                )));
            }

            if map.chunks.contains_key(&tag) {
                tracing::warn!(%tag, "duplicate chunk, keeping the last one");
            }
            map.chunks.insert(tag, Bytes::copy_from_slice(&data[start..start + length]));

            if next_offset == 0 {
                break;
            }
            let next = usize::try_from(next_offset).unwrap_or(0);
            if next < start + length {
                return Err(Error::Format(format!(
                    "chunk {tag} links to offset {next_offset}, inside or before its own data"
                )));
            }
            pos = next;
        }

        Ok(map)
    }

    /// Encode every chunk with 16-byte headers, in insertion order
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(self.encoded_len());
        let count = self.chunks.len();
        for (i, (tag, data)) in self.chunks.iter().enumerate() {
            let next_offset = if i + 1 == count {
                0
            } else {
                writer.len() + CHUNK_HEADER_SIZE + data.len()
            };
            writer.write_u32(tag.0);
            writer.write_i32(next_offset as i32);
            writer.write_i32(data.len() as i32);
            writer.write_i32(0);
            writer.write_bytes(data);
        }
        writer.into_vec()
    }

    pub fn encoded_len(&self) -> usize {
        self.chunks.values().map(|d| CHUNK_HEADER_SIZE + d.len()).sum()
    }

    pub fn get(&self, tag: Tag) -> Option<&[u8]> {
        self.chunks.get(&tag).map(|b| b.as_ref())
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.chunks.contains_key(&tag)
    }

    pub fn insert(&mut self, tag: Tag, data: impl Into<Bytes>) {
        self.chunks.insert(tag, data.into());
    }

    /// Remove a chunk; the remaining chunks keep their relative order
    pub fn remove(&mut self, tag: Tag) -> Option<Bytes> {
        self.chunks.shift_remove(&tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.chunks.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, &[u8])> + '_ {
        self.chunks.iter().map(|(t, d)| (*t, d.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChunkMap {
        let mut map = ChunkMap::new();
        map.insert(Tag::new(b"Minf"), vec![1u8, 2, 3]);
        map.insert(Tag::new(b"PNTS"), vec![0u8; 8]);
        map.insert(Tag::new(b"fx  "), Vec::<u8>::new());
        map
    }

    #[test]
    fn test_encode_layout() {
        let data = sample().encode();
        assert_eq!(data.len(), 16 * 3 + 3 + 8);
        assert_eq!(&data[0..4], b"Minf");
        // next header starts right after the 3-byte payload
        assert_eq!(&data[4..8], &19i32.to_be_bytes());
        assert_eq!(&data[8..12], &3i32.to_be_bytes());
        assert_eq!(&data[19..23], b"PNTS");
        // last chunk terminates the chain
        assert_eq!(&data[43 + 4..43 + 8], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_parse_encoded() {
        let map = sample();
        let parsed = ChunkMap::parse(&map.encode(), CHUNK_HEADER_SIZE).unwrap();
        assert_eq!(parsed, map);
        assert_eq!(parsed.get(Tag::new(b"Minf")), Some(&[1u8, 2, 3][..]));
        assert_eq!(parsed.get(Tag::new(b"fx  ")), Some(&[][..]));
    }

    #[test]
    fn test_parse_old_headers() {
        let mut data = Vec::new();
        data.extend_from_slice(b"NOTE");
        data.extend_from_slice(&14i32.to_be_bytes());
        data.extend_from_slice(&2i32.to_be_bytes());
        data.extend_from_slice(&[9, 9]);
        data.extend_from_slice(b"OBJS");
        data.extend_from_slice(&0i32.to_be_bytes());
        data.extend_from_slice(&0i32.to_be_bytes());

        let map = ChunkMap::parse(&data, OLD_CHUNK_HEADER_SIZE).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(Tag::new(b"NOTE")), Some(&[9u8, 9][..]));
        assert!(map.contains(Tag::new(b"OBJS")));
    }

    #[test]
    fn test_length_overrun() {
        let mut data = sample().encode();
        // claim 100 bytes for the first chunk
        data[8..12].copy_from_slice(&100i32.to_be_bytes());
        let err = ChunkMap::parse(&data, CHUNK_HEADER_SIZE).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_truncated_header() {
        let data = sample().encode();
        let err = ChunkMap::parse(&data[..10], CHUNK_HEADER_SIZE).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_backward_link() {
        let mut data = sample().encode();
        data[4..8].copy_from_slice(&0i32.to_be_bytes());
        // a chain that terminates early is valid; one that loops is not
        assert_eq!(ChunkMap::parse(&data, CHUNK_HEADER_SIZE).unwrap().len(), 1);
        let mut looping = sample().encode();
        looping[19 + 4..19 + 8].copy_from_slice(&19i32.to_be_bytes());
        assert!(ChunkMap::parse(&looping, CHUNK_HEADER_SIZE).is_err());
    }

    fn header(tag: &[u8; 4], next_offset: i32, length: i32) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend_from_slice(&next_offset.to_be_bytes());
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(&0i32.to_be_bytes());
        out
    }

    #[test]
    fn test_link_into_own_payload() {
        let mut data = header(b"AAAA", 20, 40);
        data.extend_from_slice(&[0u8; 4]);
        // a plausible header hidden inside AAAA's payload
        data.extend_from_slice(&header(b"BBBB", 0, 0));
        data.resize(16 + 40, 0);

        let err = ChunkMap::parse(&data, CHUNK_HEADER_SIZE).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_duplicate_tag_last_wins() {
        let mut data = header(b"PNTS", 18, 2);
        data.extend_from_slice(&[1, 1]);
        data.extend_from_slice(&header(b"PNTS", 0, 2));
        data.extend_from_slice(&[2, 2]);

        let map = ChunkMap::parse(&data, CHUNK_HEADER_SIZE).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(Tag::new(b"PNTS")), Some(&[2u8, 2][..]));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map = sample();
        map.remove(Tag::new(b"Minf"));
        let tags: Vec<_> = map.tags().collect();
        assert_eq!(tags, vec![Tag::new(b"PNTS"), Tag::new(b"fx  ")]);
    }
}
