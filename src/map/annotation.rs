use crate::codec::{BinaryReader, BinaryWriter, Record, WorldPoint2d};
use crate::error::Result;

pub const ANNOTATION_TEXT_LENGTH: usize = 64;

/// Map label shown on the overhead map (`NOTE`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotation {
    pub annotation_type: i16,
    pub location: WorldPoint2d,
    pub polygon_index: i16,
    pub text: String,
}

impl Record for Annotation {
    const SIZE: usize = 72;
    const NAME: &'static str = "annotations";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            annotation_type: reader.read_i16()?,
            location: reader.read_point()?,
            polygon_index: reader.read_i16()?,
            text: reader.read_fixed_string(ANNOTATION_TEXT_LENGTH)?,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16(self.annotation_type);
        writer.write_point(self.location);
        writer.write_i16(self.polygon_index);
        writer.write_fixed_string(&self.text, ANNOTATION_TEXT_LENGTH);
    }
}
