use crate::codec::{BinaryReader, BinaryWriter, Record, WorldPoint2d};
use crate::error::Result;

/// Map vertex, stored in the `PNTS` chunk
pub type Point = WorldPoint2d;

impl Record for WorldPoint2d {
    const SIZE: usize = 4;
    const NAME: &'static str = "points";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        reader.read_point()
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_point(*self);
    }
}

/// Pre-computed endpoint record found in older or engine-optimized maps (`EPNT`).
/// Only `vertex` is authoring data; the rest is kept alongside the point list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Endpoint {
    pub flags: u16,
    pub highest_adjacent_floor: i16,
    pub lowest_adjacent_ceiling: i16,
    pub vertex: Point,
    pub transformed: Point,
    pub supporting_polygon_index: i16,
}

impl Endpoint {
    pub const SOLID: u16 = 0x0001;
    pub const MULTIPLE_HIGHEST_ADJACENT_FLOORS: u16 = 0x0002;
    pub const ELEVATION: u16 = 0x0004;
    pub const TRANSPARENT: u16 = 0x0008;
}

impl Record for Endpoint {
    const SIZE: usize = 16;
    const NAME: &'static str = "endpoints";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            flags: reader.read_u16()?,
            highest_adjacent_floor: reader.read_i16()?,
            lowest_adjacent_ceiling: reader.read_i16()?,
            vertex: reader.read_point()?,
            transformed: reader.read_point()?,
            supporting_polygon_index: reader.read_i16()?,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16(self.flags);
        writer.write_i16(self.highest_adjacent_floor);
        writer.write_i16(self.lowest_adjacent_ceiling);
        writer.write_point(self.vertex);
        writer.write_point(self.transformed);
        writer.write_i16(self.supporting_polygon_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_all, encode_all};

    #[test]
    fn test_points_roundtrip() {
        let points = vec![Point::new(-1024, 2048), Point::new(0, i16::MAX)];
        let data = encode_all(&points);
        assert_eq!(data, [0xFC, 0x00, 0x08, 0x00, 0x00, 0x00, 0x7F, 0xFF]);
        assert_eq!(decode_all::<Point>(&data).unwrap(), points);
    }

    #[test]
    fn test_endpoint_layout() {
        let endpoint = Endpoint {
            flags: Endpoint::SOLID | Endpoint::ELEVATION,
            highest_adjacent_floor: 0,
            lowest_adjacent_ceiling: 1024,
            vertex: Point::new(512, -512),
            transformed: Point::new(1, 2),
            supporting_polygon_index: 3,
        };
        let data = encode_all(&[endpoint]);
        assert_eq!(data.len(), Endpoint::SIZE);
        // vertex sits after flags and the two heights
        assert_eq!(&data[6..10], &[0x02, 0x00, 0xFE, 0x00]);
        assert_eq!(decode_all::<Endpoint>(&data).unwrap(), vec![endpoint]);
    }
}
