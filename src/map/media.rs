use crate::codec::{Angle, BinaryReader, BinaryWriter, Fixed, Record, WorldPoint2d};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    #[default]
    Water,
    Lava,
    Goo,
    Sewage,
    Jjaro,
    Other(i16),
}

impl MediaType {
    pub fn from_i16(v: i16) -> Self {
        match v {
            0 => Self::Water,
            1 => Self::Lava,
            2 => Self::Goo,
            3 => Self::Sewage,
            4 => Self::Jjaro,
            other => Self::Other(other),
        }
    }

    pub fn to_i16(self) -> i16 {
        match self {
            Self::Water => 0,
            Self::Lava => 1,
            Self::Goo => 2,
            Self::Sewage => 3,
            Self::Jjaro => 4,
            Self::Other(v) => v,
        }
    }
}

/// Liquid volume; its height follows a light's intensity between `low` and `high` (`medi`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Media {
    pub media_type: MediaType,
    pub flags: u16,
    pub light_index: i16,
    pub current_direction: Angle,
    pub current_magnitude: i16,
    pub low: i16,
    pub high: i16,
    pub origin: WorldPoint2d,
    pub height: i16,
    pub minimum_light_intensity: Fixed,
    pub texture: u16,
    pub transfer_mode: i16,
}

impl Media {
    pub const SOUND_OBSTRUCTED_BY_FLOOR: u16 = 0x0001;
}

impl Record for Media {
    const SIZE: usize = 32;
    const NAME: &'static str = "media";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        let media = Self {
            media_type: MediaType::from_i16(reader.read_i16()?),
            flags: reader.read_u16()?,
            light_index: reader.read_i16()?,
            current_direction: Angle(reader.read_i16()?),
            current_magnitude: reader.read_i16()?,
            low: reader.read_i16()?,
            high: reader.read_i16()?,
            origin: reader.read_point()?,
            height: reader.read_i16()?,
            minimum_light_intensity: reader.read_fixed()?,
            texture: reader.read_u16()?,
            transfer_mode: reader.read_i16()?,
        };
        reader.skip(4)?;
        Ok(media)
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16(self.media_type.to_i16());
        writer.write_u16(self.flags);
        writer.write_i16(self.light_index);
        writer.write_i16(self.current_direction.raw());
        writer.write_i16(self.current_magnitude);
        writer.write_i16(self.low);
        writer.write_i16(self.high);
        writer.write_point(self.origin);
        writer.write_i16(self.height);
        writer.write_fixed(self.minimum_light_intensity);
        writer.write_u16(self.texture);
        writer.write_i16(self.transfer_mode);
        writer.write_zeros(4);
    }
}
