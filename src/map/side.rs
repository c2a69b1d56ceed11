use bitflags::bitflags;

use crate::codec::{BinaryReader, BinaryWriter, Record, WorldPoint2d};
use crate::error::Result;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SideFlags: u16 {
        const CONTROL_PANEL_STATUS = 0x0001;
        const IS_CONTROL_PANEL = 0x0002;
        const IS_REPAIR_SWITCH = 0x0004;
        const IS_DESTRUCTIVE_SWITCH = 0x0008;
        const IS_LIGHTED_SWITCH = 0x0010;
        const SWITCH_CAN_BE_DESTROYED = 0x0020;
        const SWITCH_CAN_ONLY_BE_HIT_BY_PROJECTILES = 0x0040;
        const ITEM_IS_OPTIONAL = 0x0080;
        const EDITOR_DIRTY = 0x4000;
    }
}

/// Which parts of the wall the side covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SideType {
    #[default]
    Full,
    High,
    Low,
    Composite,
    Split,
    Other(i16),
}

impl SideType {
    pub fn from_i16(v: i16) -> Self {
        match v {
            0 => Self::Full,
            1 => Self::High,
            2 => Self::Low,
            3 => Self::Composite,
            4 => Self::Split,
            other => Self::Other(other),
        }
    }

    pub fn to_i16(self) -> i16 {
        match self {
            Self::Full => 0,
            Self::High => 1,
            Self::Low => 2,
            Self::Composite => 3,
            Self::Split => 4,
            Self::Other(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureDefinition {
    pub x: i16,
    pub y: i16,
    /// Shape descriptor (collection and bitmap); `0xFFFF` for none
    pub texture: u16,
}

impl Default for TextureDefinition {
    fn default() -> Self {
        Self { x: 0, y: 0, texture: 0xFFFF }
    }
}

impl TextureDefinition {
    fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            x: reader.read_i16()?,
            y: reader.read_i16()?,
            texture: reader.read_u16()?,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16(self.x);
        writer.write_i16(self.y);
        writer.write_u16(self.texture);
    }

    pub fn is_empty(&self) -> bool {
        self.texture == 0xFFFF
    }
}

/// Textured face of a line as seen from one polygon (`SIDS`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Side {
    pub side_type: SideType,
    pub flags: SideFlags,
    pub primary_texture: TextureDefinition,
    pub secondary_texture: TextureDefinition,
    pub transparent_texture: TextureDefinition,
    pub exclusion_zone: [WorldPoint2d; 4],
    pub control_panel_type: i16,
    pub control_panel_permutation: i16,
    pub primary_transfer_mode: i16,
    pub secondary_transfer_mode: i16,
    pub transparent_transfer_mode: i16,
    /// Back-reference, rebuilt from the declaring line during reconciliation
    pub polygon_index: i16,
    /// Back-reference, rebuilt from the declaring line during reconciliation
    pub line_index: i16,
    pub primary_light: i16,
    pub secondary_light: i16,
    pub transparent_light: i16,
    pub ambient_delta: i32,
}

impl Default for Side {
    fn default() -> Self {
        Self {
            side_type: SideType::Full,
            flags: SideFlags::empty(),
            primary_texture: TextureDefinition::default(),
            secondary_texture: TextureDefinition::default(),
            transparent_texture: TextureDefinition::default(),
            exclusion_zone: [WorldPoint2d::default(); 4],
            control_panel_type: 0,
            control_panel_permutation: 0,
            primary_transfer_mode: 0,
            secondary_transfer_mode: 0,
            transparent_transfer_mode: 0,
            polygon_index: -1,
            line_index: -1,
            primary_light: 0,
            secondary_light: 0,
            transparent_light: 0,
            ambient_delta: 0,
        }
    }
}

impl Side {
    pub fn is_control_panel(&self) -> bool {
        self.flags.contains(SideFlags::IS_CONTROL_PANEL)
    }
}

impl Record for Side {
    const SIZE: usize = 64;
    const NAME: &'static str = "sides";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        let side = Self {
            side_type: SideType::from_i16(reader.read_i16()?),
            flags: SideFlags::from_bits_retain(reader.read_u16()?),
            primary_texture: TextureDefinition::read(reader)?,
            secondary_texture: TextureDefinition::read(reader)?,
            transparent_texture: TextureDefinition::read(reader)?,
            exclusion_zone: [
                reader.read_point()?,
                reader.read_point()?,
                reader.read_point()?,
                reader.read_point()?,
            ],
            control_panel_type: reader.read_i16()?,
            control_panel_permutation: reader.read_i16()?,
            primary_transfer_mode: reader.read_i16()?,
            secondary_transfer_mode: reader.read_i16()?,
            transparent_transfer_mode: reader.read_i16()?,
            polygon_index: reader.read_i16()?,
            line_index: reader.read_i16()?,
            primary_light: reader.read_i16()?,
            secondary_light: reader.read_i16()?,
            transparent_light: reader.read_i16()?,
            ambient_delta: reader.read_i32()?,
        };
        reader.skip(2)?;
        Ok(side)
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16(self.side_type.to_i16());
        writer.write_u16(self.flags.bits());
        self.primary_texture.write(writer);
        self.secondary_texture.write(writer);
        self.transparent_texture.write(writer);
        for p in self.exclusion_zone {
            writer.write_point(p);
        }
        writer.write_i16(self.control_panel_type);
        writer.write_i16(self.control_panel_permutation);
        writer.write_i16(self.primary_transfer_mode);
        writer.write_i16(self.secondary_transfer_mode);
        writer.write_i16(self.transparent_transfer_mode);
        writer.write_i16(self.polygon_index);
        writer.write_i16(self.line_index);
        writer.write_i16(self.primary_light);
        writer.write_i16(self.secondary_light);
        writer.write_i16(self.transparent_light);
        writer.write_i32(self.ambient_delta);
        writer.write_zeros(2);
    }
}
