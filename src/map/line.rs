use bitflags::bitflags;

use crate::codec::{BinaryReader, BinaryWriter, Record};
use crate::error::Result;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LineFlags: u16 {
        const SOLID = 0x4000;
        const TRANSPARENT = 0x2000;
        const LANDSCAPE = 0x1000;
        const ELEVATION = 0x0800;
        const VARIABLE_ELEVATION = 0x0400;
        const HAS_TRANSPARENT_SIDE = 0x0200;
        const DECORATIVE = 0x0100;
    }
}

/// Wall segment between two endpoints (`LINS`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub endpoint_indexes: [i16; 2],
    pub flags: LineFlags,
    pub length: i16,
    /// Derived: recomputed from the owning polygons on every load
    pub highest_adjacent_floor: i16,
    /// Derived: recomputed from the owning polygons on every load
    pub lowest_adjacent_ceiling: i16,
    pub clockwise_polygon_side_index: i16,
    pub counterclockwise_polygon_side_index: i16,
    pub clockwise_polygon_owner: i16,
    pub counterclockwise_polygon_owner: i16,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            endpoint_indexes: [-1, -1],
            flags: LineFlags::empty(),
            length: 0,
            highest_adjacent_floor: 0,
            lowest_adjacent_ceiling: 0,
            clockwise_polygon_side_index: -1,
            counterclockwise_polygon_side_index: -1,
            clockwise_polygon_owner: -1,
            counterclockwise_polygon_owner: -1,
        }
    }
}

impl Line {
    pub fn new(a: i16, b: i16) -> Self {
        Self {
            endpoint_indexes: [a, b],
            ..Self::default()
        }
    }

    pub fn solid(&self) -> bool {
        self.flags.contains(LineFlags::SOLID)
    }

    pub fn set_solid(&mut self, value: bool) {
        self.flags.set(LineFlags::SOLID, value);
    }

    pub fn variable_elevation(&self) -> bool {
        self.flags.contains(LineFlags::VARIABLE_ELEVATION)
    }

    pub fn transparent(&self) -> bool {
        self.flags.contains(LineFlags::TRANSPARENT)
    }

    /// Owning polygons, clockwise first
    pub fn owners(&self) -> [i16; 2] {
        [self.clockwise_polygon_owner, self.counterclockwise_polygon_owner]
    }
}

impl Record for Line {
    const SIZE: usize = 32;
    const NAME: &'static str = "lines";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        let line = Self {
            endpoint_indexes: reader.read_i16_array()?,
            flags: LineFlags::from_bits_retain(reader.read_u16()?),
            length: reader.read_i16()?,
            highest_adjacent_floor: reader.read_i16()?,
            lowest_adjacent_ceiling: reader.read_i16()?,
            clockwise_polygon_side_index: reader.read_i16()?,
            counterclockwise_polygon_side_index: reader.read_i16()?,
            clockwise_polygon_owner: reader.read_i16()?,
            counterclockwise_polygon_owner: reader.read_i16()?,
        };
        reader.skip(12)?;
        Ok(line)
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16_slice(&self.endpoint_indexes);
        writer.write_u16(self.flags.bits());
        writer.write_i16(self.length);
        writer.write_i16(self.highest_adjacent_floor);
        writer.write_i16(self.lowest_adjacent_ceiling);
        writer.write_i16(self.clockwise_polygon_side_index);
        writer.write_i16(self.counterclockwise_polygon_side_index);
        writer.write_i16(self.clockwise_polygon_owner);
        writer.write_i16(self.counterclockwise_polygon_owner);
        writer.write_zeros(12);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_all, encode_all};

    #[test]
    fn test_line_roundtrip() {
        let lines = vec![
            Line {
                endpoint_indexes: [0, 1],
                flags: LineFlags::SOLID | LineFlags::ELEVATION,
                length: 1024,
                highest_adjacent_floor: 0,
                lowest_adjacent_ceiling: 1024,
                clockwise_polygon_side_index: 0,
                counterclockwise_polygon_side_index: -1,
                clockwise_polygon_owner: 0,
                counterclockwise_polygon_owner: -1,
            },
            Line::new(1, 2),
        ];
        let data = encode_all(&lines);
        assert_eq!(data.len(), 64);
        assert_eq!(decode_all::<Line>(&data).unwrap(), lines);
    }

    #[test]
    fn test_unknown_flag_bits_survive() {
        let mut data = encode_all(&[Line::new(0, 1)]);
        data[4..6].copy_from_slice(&0x8001u16.to_be_bytes());
        let line = &decode_all::<Line>(&data).unwrap()[0];
        assert_eq!(line.flags.bits(), 0x8001);
        assert_eq!(encode_all(std::slice::from_ref(line)), data);
    }
}
