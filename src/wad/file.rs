//! Wadfile container: header, entry data, directory.
//!
//! # Header (128 bytes)
//!   version                      i16
//!   data_version                 i16
//!   file_name                    [u8; 64]
//!   checksum                     u32   CRC-32 of the file with this field zeroed
//!   directory_offset             i32
//!   wad_count                    i16
//!   app_specific_directory_size  i16
//!   entry_header_size            i16
//!   directory_entry_base_size    i16
//!   parent_checksum              u32
//!   unused                       [i16; 20]
//!
//! Files older than version 2 leave the three size fields zero and use
//! fixed sizes instead.

use std::path::Path;

use bytes::Bytes;
use crc32fast::Hasher;

use crate::codec::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};
use super::chunks::{ChunkMap, CHUNK_HEADER_SIZE, OLD_CHUNK_HEADER_SIZE};

pub const HEADER_SIZE: usize = 128;
pub const FILE_NAME_LENGTH: usize = 64;
const CHECKSUM_OFFSET: usize = 68;
const DIRECTORY_ENTRY_SIZE: usize = 10;
const OLD_DIRECTORY_ENTRY_SIZE: usize = 8;
const MAX_VERSION: i16 = 4;

/// One level (or other resource) inside the wadfile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub index: i16,
    pub chunks: ChunkMap,
    /// Application-specific directory bytes, preserved verbatim
    pub app_data: Bytes,
}

impl DirectoryEntry {
    pub fn new(index: i16, chunks: ChunkMap) -> Self {
        Self { index, chunks, app_data: Bytes::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wadfile {
    pub version: i16,
    pub data_version: i16,
    pub file_name: String,
    pub parent_checksum: u32,
    pub app_data_size: usize,
    pub entries: Vec<DirectoryEntry>,
}

impl Default for Wadfile {
    fn default() -> Self {
        Self {
            version: MAX_VERSION,
            data_version: 1,
            file_name: String::new(),
            parent_checksum: 0,
            app_data_size: 0,
            entries: Vec::new(),
        }
    }
}

impl Wadfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }

    pub fn write_path(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.encode())?;
        Ok(())
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::Format(format!(
                "wadfile header needs {HEADER_SIZE} bytes, file has {}",
                data.len()
            )));
        }

        let mut reader = BinaryReader::new(data);
        let version = reader.read_i16()?;
        let data_version = reader.read_i16()?;
        let file_name = reader.read_fixed_string(FILE_NAME_LENGTH)?;
        let checksum = reader.read_u32()?;
        let directory_offset = reader.read_i32()?;
        let wad_count = reader.read_i16()?;
        let app_data_size = reader.read_i16()?;
        let entry_header_size = reader.read_i16()?;
        let directory_entry_base_size = reader.read_i16()?;
        let parent_checksum = reader.read_u32()?;

        if !(0..=MAX_VERSION).contains(&version) {
            return Err(Error::Format(format!("unknown wadfile version {version}")));
        }
        if wad_count < 0 || app_data_size < 0 || directory_offset < 0 {
            return Err(Error::Format("negative size in wadfile header".into()));
        }

        if checksum != 0 {
            let actual = file_checksum(data);
            if actual != checksum {
                tracing::warn!(expected = checksum, actual, "wadfile checksum mismatch");
            }
        }

        let (entry_header_size, directory_entry_size, app_data_size) = if version >= 2 {
            (entry_header_size as usize, directory_entry_base_size as usize, app_data_size as usize)
        } else if version == 1 {
            (OLD_CHUNK_HEADER_SIZE, DIRECTORY_ENTRY_SIZE, 0)
        } else {
            (OLD_CHUNK_HEADER_SIZE, OLD_DIRECTORY_ENTRY_SIZE, 0)
        };
        if directory_entry_size < OLD_DIRECTORY_ENTRY_SIZE {
            return Err(Error::Format(format!(
                "directory entry size {directory_entry_size} is too small"
            )));
        }

        let stride = directory_entry_size + app_data_size;
        let directory_offset = directory_offset as usize;
        let directory_len = stride * wad_count as usize;
        if directory_offset > data.len() || directory_len > data.len() - directory_offset {
            return Err(Error::Format("wadfile directory overruns the file".into()));
        }

        let mut entries = Vec::with_capacity(wad_count as usize);
        for i in 0..wad_count as usize {
            reader.set_position(directory_offset + i * stride);
            let offset = reader.read_i32()?;
            let length = reader.read_i32()?;
            let index = if directory_entry_size >= DIRECTORY_ENTRY_SIZE {
                reader.read_i16()?
            } else {
                i as i16
            };
            reader.set_position(directory_offset + i * stride + directory_entry_size);
            let app_data = Bytes::copy_from_slice(reader.read_bytes(app_data_size)?);

            let (offset, length) = match (usize::try_from(offset), usize::try_from(length)) {
                (Ok(o), Ok(l)) if o <= data.len() && l <= data.len() - o => (o, l),
                _ => {
                    return Err(Error::Format(format!(
                        "entry {index} at offset {offset} with length {length} overruns the file"
                    )));
                }
            };
            let chunks = ChunkMap::parse(&data[offset..offset + length], entry_header_size)?;
            entries.push(DirectoryEntry { index, chunks, app_data });
        }

        tracing::debug!(version, entries = entries.len(), "parsed wadfile");

        Ok(Self {
            version,
            data_version,
            file_name,
            parent_checksum,
            app_data_size,
            entries,
        })
    }

    /// Encode the file: header, entry data, then the directory.
    /// Always writes version 2+ layout with 16-byte chunk headers.
    pub fn encode(&self) -> Vec<u8> {
        let version = self.version.max(2);
        let mut writer = BinaryWriter::new();

        writer.write_i16(version);
        writer.write_i16(self.data_version);
        writer.write_fixed_string(&self.file_name, FILE_NAME_LENGTH);
        writer.write_u32(0); // checksum, patched below
        writer.write_i32(0); // directory offset, patched below
        writer.write_i16(self.entries.len() as i16);
        writer.write_i16(self.app_data_size as i16);
        writer.write_i16(CHUNK_HEADER_SIZE as i16);
        writer.write_i16(DIRECTORY_ENTRY_SIZE as i16);
        writer.write_u32(self.parent_checksum);
        writer.write_zeros(HEADER_SIZE - writer.len());

        let mut placed = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let offset = writer.len();
            writer.write_bytes(&entry.chunks.encode());
            placed.push((offset, writer.len() - offset));
        }

        let directory_offset = writer.len();
        for (entry, (offset, length)) in self.entries.iter().zip(placed) {
            writer.write_i32(offset as i32);
            writer.write_i32(length as i32);
            writer.write_i16(entry.index);
            let keep = entry.app_data.len().min(self.app_data_size);
            writer.write_bytes(&entry.app_data[..keep]);
            writer.write_zeros(self.app_data_size - keep);
        }
        writer.patch_i32(CHECKSUM_OFFSET + 4, directory_offset as i32);

        let checksum = file_checksum(writer.as_slice());
        writer.patch_u32(CHECKSUM_OFFSET, checksum);
        writer.into_vec()
    }

    pub fn entry(&self, index: i16) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|e| e.index == index)
    }

    pub fn entry_mut(&mut self, index: i16) -> Option<&mut DirectoryEntry> {
        self.entries.iter_mut().find(|e| e.index == index)
    }
}

/// CRC-32 of the file with the checksum field treated as zero
pub fn file_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    if data.len() < CHECKSUM_OFFSET + 4 {
        hasher.update(data);
    } else {
        hasher.update(&data[..CHECKSUM_OFFSET]);
        hasher.update(&[0u8; 4]);
        hasher.update(&data[CHECKSUM_OFFSET + 4..]);
    }
    hasher.finalize()
}
