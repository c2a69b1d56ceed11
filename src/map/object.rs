use bitflags::bitflags;

use crate::codec::{Angle, BinaryReader, BinaryWriter, Record, WorldPoint2d};
use crate::error::Result;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ObjectFlags: u16 {
        /// Invisible monster, or a sound source bound to a platform
        const INVISIBLE = 0x0001;
        /// Hangs from the ceiling; z is measured from the ceiling
        const HANGING_FROM_CEILING = 0x0002;
        const BLIND = 0x0004;
        const DEAF = 0x0008;
        const FLOATS = 0x0010;
        const NETWORK_ONLY = 0x0020;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectKind {
    #[default]
    Monster,
    Scenery,
    Item,
    Player,
    Goal,
    SoundSource,
    Other(i16),
}

impl ObjectKind {
    pub fn from_i16(v: i16) -> Self {
        match v {
            0 => Self::Monster,
            1 => Self::Scenery,
            2 => Self::Item,
            3 => Self::Player,
            4 => Self::Goal,
            5 => Self::SoundSource,
            other => Self::Other(other),
        }
    }

    pub fn to_i16(self) -> i16 {
        match self {
            Self::Monster => 0,
            Self::Scenery => 1,
            Self::Item => 2,
            Self::Player => 3,
            Self::Goal => 4,
            Self::SoundSource => 5,
            Self::Other(v) => v,
        }
    }
}

/// Initial placement of a monster, item, scenery, player start, goal or sound (`OBJS`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapObject {
    pub kind: ObjectKind,
    /// Type within the kind (which monster, which item)
    pub index: i16,
    pub facing: Angle,
    pub polygon_index: i16,
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub flags: ObjectFlags,
}

impl MapObject {
    pub fn player_start(position: WorldPoint2d, polygon_index: i16) -> Self {
        Self {
            kind: ObjectKind::Player,
            x: position.x,
            y: position.y,
            polygon_index,
            ..Self::default()
        }
    }

    pub fn position(&self) -> WorldPoint2d {
        WorldPoint2d::new(self.x, self.y)
    }

    pub fn network_only(&self) -> bool {
        self.flags.contains(ObjectFlags::NETWORK_ONLY)
    }

    pub fn set_network_only(&mut self, value: bool) {
        self.flags.set(ObjectFlags::NETWORK_ONLY, value);
    }
}

impl Record for MapObject {
    const SIZE: usize = 16;
    const NAME: &'static str = "objects";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            kind: ObjectKind::from_i16(reader.read_i16()?),
            index: reader.read_i16()?,
            facing: Angle(reader.read_i16()?),
            polygon_index: reader.read_i16()?,
            x: reader.read_i16()?,
            y: reader.read_i16()?,
            z: reader.read_i16()?,
            flags: ObjectFlags::from_bits_retain(reader.read_u16()?),
        })
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16(self.kind.to_i16());
        writer.write_i16(self.index);
        writer.write_i16(self.facing.raw());
        writer.write_i16(self.polygon_index);
        writer.write_i16(self.x);
        writer.write_i16(self.y);
        writer.write_i16(self.z);
        writer.write_u16(self.flags.bits());
    }
}
