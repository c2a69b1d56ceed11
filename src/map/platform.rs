//! Platforms: doors, lifts and crushers attached to one polygon.
//!
//! Maps store the static description (`plat`). Saved games and some old maps
//! store the engine's runtime record instead (`PLAT`), which carries the
//! static flags but splits the travel range into separate floor and ceiling
//! limits. [`DynamicPlatform::to_static`] folds it back.

use bitflags::bitflags;

use crate::codec::{BinaryReader, BinaryWriter, Record};
use crate::error::Result;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlatformFlags: u32 {
        const INITIALLY_ACTIVE = 1 << 0;
        const INITIALLY_EXTENDED = 1 << 1;
        const DEACTIVATES_AT_EACH_LEVEL = 1 << 2;
        const DEACTIVATES_AT_INITIAL_LEVEL = 1 << 3;
        const ACTIVATES_ADJACENT_PLATFORMS_WHEN_DEACTIVATING = 1 << 4;
        const EXTENDS_FLOOR_TO_CEILING = 1 << 5;
        const COMES_FROM_FLOOR = 1 << 6;
        const COMES_FROM_CEILING = 1 << 7;
        const CAUSES_DAMAGE = 1 << 8;
        const DOES_NOT_ACTIVATE_PARENT = 1 << 9;
        const ACTIVATES_ONLY_ONCE = 1 << 10;
        const ACTIVATES_LIGHT = 1 << 11;
        const DEACTIVATES_LIGHT = 1 << 12;
        const IS_PLAYER_CONTROLLABLE = 1 << 13;
        const IS_MONSTER_CONTROLLABLE = 1 << 14;
        const REVERSES_DIRECTION_WHEN_OBSTRUCTED = 1 << 15;
        const CANNOT_BE_EXTERNALLY_DEACTIVATED = 1 << 16;
        const USES_NATIVE_POLYGON_HEIGHTS = 1 << 17;
        const DELAYS_BEFORE_ACTIVATION = 1 << 18;
        const ACTIVATES_ADJACENT_PLATFORMS_WHEN_ACTIVATING = 1 << 19;
        const DEACTIVATES_ADJACENT_PLATFORMS_WHEN_ACTIVATING = 1 << 20;
        const DEACTIVATES_ADJACENT_PLATFORMS_WHEN_DEACTIVATING = 1 << 21;
        const CONTRACTS_SLOWER = 1 << 22;
        const ACTIVATES_ADJACENT_PLATFORMS_AT_EACH_LEVEL = 1 << 23;
        const IS_LOCKED = 1 << 24;
        const IS_SECRET = 1 << 25;
        const IS_DOOR = 1 << 26;
        const FLOODS_M1 = 1 << 27;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlatformType {
    #[default]
    SphtDoor,
    SphtSplitDoor,
    LockedSphtDoor,
    SphtPlatform,
    NoisySphtPlatform,
    HeavySphtDoor,
    PfhorDoor,
    HeavySphtPlatform,
    PfhorPlatform,
    Other(i16),
}

impl PlatformType {
    pub fn from_i16(v: i16) -> Self {
        match v {
            0 => Self::SphtDoor,
            1 => Self::SphtSplitDoor,
            2 => Self::LockedSphtDoor,
            3 => Self::SphtPlatform,
            4 => Self::NoisySphtPlatform,
            5 => Self::HeavySphtDoor,
            6 => Self::PfhorDoor,
            7 => Self::HeavySphtPlatform,
            8 => Self::PfhorPlatform,
            other => Self::Other(other),
        }
    }

    pub fn to_i16(self) -> i16 {
        match self {
            Self::SphtDoor => 0,
            Self::SphtSplitDoor => 1,
            Self::LockedSphtDoor => 2,
            Self::SphtPlatform => 3,
            Self::NoisySphtPlatform => 4,
            Self::HeavySphtDoor => 5,
            Self::PfhorDoor => 6,
            Self::HeavySphtPlatform => 7,
            Self::PfhorPlatform => 8,
            Self::Other(v) => v,
        }
    }
}

/// Platform speeds in world units per tick
pub mod speed {
    pub const VERY_SLOW: i16 = 1024 / (4 * 30);
    pub const SLOW: i16 = 1024 / (2 * 30);
    pub const FAST: i16 = 2 * SLOW;
}

/// Platform delays in ticks
pub mod delay {
    pub const SHORT: i16 = 30;
    pub const LONG: i16 = 2 * 30;
}

/// Static platform record (`plat`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub platform_type: PlatformType,
    pub speed: i16,
    pub delay: i16,
    /// -1 means "derive from adjacent polygons"
    pub maximum_height: i16,
    /// -1 means "derive from adjacent polygons"
    pub minimum_height: i16,
    pub flags: PlatformFlags,
    pub polygon_index: i16,
    pub tag: i16,
}

impl Default for Platform {
    fn default() -> Self {
        Self::with_defaults(PlatformType::SphtDoor)
    }
}

impl Platform {
    /// Preset values for a platform type, unattached to any polygon
    pub fn with_defaults(platform_type: PlatformType) -> Self {
        use PlatformFlags as F;

        let door = F::IS_PLAYER_CONTROLLABLE
            | F::IS_MONSTER_CONTROLLABLE
            | F::REVERSES_DIRECTION_WHEN_OBSTRUCTED
            | F::IS_DOOR
            | F::INITIALLY_EXTENDED
            | F::DEACTIVATES_AT_INITIAL_LEVEL;
        let lift = F::IS_PLAYER_CONTROLLABLE
            | F::IS_MONSTER_CONTROLLABLE
            | F::DEACTIVATES_AT_INITIAL_LEVEL
            | F::COMES_FROM_FLOOR;

        let (speed, delay, flags) = match platform_type {
            PlatformType::SphtDoor | PlatformType::PfhorDoor => {
                (speed::FAST, delay::LONG, door | F::EXTENDS_FLOOR_TO_CEILING | F::COMES_FROM_CEILING)
            }
            PlatformType::SphtSplitDoor => (
                speed::FAST,
                delay::LONG,
                door | F::EXTENDS_FLOOR_TO_CEILING | F::COMES_FROM_FLOOR | F::COMES_FROM_CEILING,
            ),
            PlatformType::LockedSphtDoor => (
                speed::SLOW,
                delay::LONG,
                (door | F::EXTENDS_FLOOR_TO_CEILING | F::COMES_FROM_CEILING | F::IS_LOCKED)
                    - F::IS_PLAYER_CONTROLLABLE,
            ),
            PlatformType::HeavySphtDoor => (
                speed::SLOW,
                delay::LONG,
                door | F::EXTENDS_FLOOR_TO_CEILING | F::COMES_FROM_CEILING,
            ),
            PlatformType::SphtPlatform | PlatformType::NoisySphtPlatform | PlatformType::PfhorPlatform => {
                (speed::SLOW, delay::SHORT, lift)
            }
            PlatformType::HeavySphtPlatform => (speed::VERY_SLOW, delay::SHORT, lift),
            PlatformType::Other(_) => (speed::FAST, delay::LONG, door | F::COMES_FROM_CEILING),
        };

        Self {
            platform_type,
            speed,
            delay,
            maximum_height: -1,
            minimum_height: -1,
            flags,
            polygon_index: -1,
            tag: 0,
        }
    }

    pub fn comes_from_floor(&self) -> bool {
        self.flags.contains(PlatformFlags::COMES_FROM_FLOOR)
    }

    pub fn comes_from_ceiling(&self) -> bool {
        self.flags.contains(PlatformFlags::COMES_FROM_CEILING)
    }

    pub fn is_door(&self) -> bool {
        self.flags.contains(PlatformFlags::IS_DOOR)
    }
}

impl Record for Platform {
    const SIZE: usize = 32;
    const NAME: &'static str = "static platforms";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        let platform = Self {
            platform_type: PlatformType::from_i16(reader.read_i16()?),
            speed: reader.read_i16()?,
            delay: reader.read_i16()?,
            maximum_height: reader.read_i16()?,
            minimum_height: reader.read_i16()?,
            flags: PlatformFlags::from_bits_retain(reader.read_u32()?),
            polygon_index: reader.read_i16()?,
            tag: reader.read_i16()?,
        };
        reader.skip(14)?;
        Ok(platform)
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16(self.platform_type.to_i16());
        writer.write_i16(self.speed);
        writer.write_i16(self.delay);
        writer.write_i16(self.maximum_height);
        writer.write_i16(self.minimum_height);
        writer.write_u32(self.flags.bits());
        writer.write_i16(self.polygon_index);
        writer.write_i16(self.tag);
        writer.write_zeros(14);
    }
}

/// Runtime platform record (`PLAT`), read only to recover the static platform
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DynamicPlatform {
    pub platform_type: i16,
    pub flags: PlatformFlags,
    pub speed: i16,
    pub delay: i16,
    pub minimum_floor_height: i16,
    pub maximum_floor_height: i16,
    pub minimum_ceiling_height: i16,
    pub maximum_ceiling_height: i16,
    pub polygon_index: i16,
    pub dynamic_flags: u16,
    pub floor_height: i16,
    pub ceiling_height: i16,
    pub ticks_until_restart: i16,
    pub parent_platform_index: i16,
    pub tag: i16,
}

impl DynamicPlatform {
    /// Fold the split floor/ceiling travel range into the static min/max pair
    pub fn to_static(&self) -> Platform {
        let comes_from_floor = self.flags.contains(PlatformFlags::COMES_FROM_FLOOR);
        let comes_from_ceiling = self.flags.contains(PlatformFlags::COMES_FROM_CEILING);
        Platform {
            platform_type: PlatformType::from_i16(self.platform_type),
            speed: self.speed,
            delay: self.delay,
            minimum_height: if comes_from_floor {
                self.minimum_floor_height
            } else {
                self.minimum_ceiling_height
            },
            maximum_height: if comes_from_ceiling {
                self.maximum_ceiling_height
            } else {
                self.maximum_floor_height
            },
            flags: self.flags,
            polygon_index: self.polygon_index,
            tag: self.tag,
        }
    }
}

impl Record for DynamicPlatform {
    const SIZE: usize = 140;
    const NAME: &'static str = "dynamic platforms";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        let platform_type = reader.read_i16()?;
        let flags = PlatformFlags::from_bits_retain(reader.read_u32()?);
        let speed = reader.read_i16()?;
        let delay = reader.read_i16()?;
        let minimum_floor_height = reader.read_i16()?;
        let maximum_floor_height = reader.read_i16()?;
        let minimum_ceiling_height = reader.read_i16()?;
        let maximum_ceiling_height = reader.read_i16()?;
        let polygon_index = reader.read_i16()?;
        let dynamic_flags = reader.read_u16()?;
        let floor_height = reader.read_i16()?;
        let ceiling_height = reader.read_i16()?;
        let ticks_until_restart = reader.read_i16()?;
        // endpoint owner table, rebuilt by the engine
        reader.skip(8 * 8)?;
        let parent_platform_index = reader.read_i16()?;
        let tag = reader.read_i16()?;
        reader.skip(44)?;

        Ok(Self {
            platform_type,
            flags,
            speed,
            delay,
            minimum_floor_height,
            maximum_floor_height,
            minimum_ceiling_height,
            maximum_ceiling_height,
            polygon_index,
            dynamic_flags,
            floor_height,
            ceiling_height,
            ticks_until_restart,
            parent_platform_index,
            tag,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16(self.platform_type);
        writer.write_u32(self.flags.bits());
        writer.write_i16(self.speed);
        writer.write_i16(self.delay);
        writer.write_i16(self.minimum_floor_height);
        writer.write_i16(self.maximum_floor_height);
        writer.write_i16(self.minimum_ceiling_height);
        writer.write_i16(self.maximum_ceiling_height);
        writer.write_i16(self.polygon_index);
        writer.write_u16(self.dynamic_flags);
        writer.write_i16(self.floor_height);
        writer.write_i16(self.ceiling_height);
        writer.write_i16(self.ticks_until_restart);
        writer.write_zeros(8 * 8);
        writer.write_i16(self.parent_platform_index);
        writer.write_i16(self.tag);
        writer.write_zeros(44);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_all, encode_all};

    #[test]
    fn test_static_roundtrip() {
        let mut lift = Platform::with_defaults(PlatformType::SphtPlatform);
        lift.polygon_index = 3;
        lift.minimum_height = 0;
        lift.maximum_height = 1024;
        lift.flags |= PlatformFlags::ACTIVATES_LIGHT;
        lift.tag = 7;

        let platforms = vec![lift, Platform::default()];
        let data = encode_all(&platforms);
        assert_eq!(data.len(), 64);
        assert_eq!(decode_all::<Platform>(&data).unwrap(), platforms);
    }

    #[test]
    fn test_static_flag_offset() {
        let platform = Platform {
            flags: PlatformFlags::COMES_FROM_FLOOR,
            polygon_index: 0x0102,
            ..Platform::default()
        };
        let data = encode_all(&[platform]);
        assert_eq!(&data[10..14], &[0, 0, 0, 0x40]);
        assert_eq!(&data[14..16], &[1, 2]);
    }

    #[test]
    fn test_spht_door_preset() {
        let door = Platform::default();
        assert_eq!(door.platform_type, PlatformType::SphtDoor);
        assert!(door.is_door());
        assert!(door.comes_from_ceiling());
        assert!(!door.comes_from_floor());
        assert_eq!(door.polygon_index, -1);
        assert_eq!((door.minimum_height, door.maximum_height), (-1, -1));
        assert_eq!(door.speed, speed::FAST);
    }

    #[test]
    fn test_dynamic_roundtrip_and_fold() {
        let dynamic = DynamicPlatform {
            platform_type: 3,
            flags: PlatformFlags::COMES_FROM_FLOOR,
            speed: speed::SLOW,
            delay: delay::SHORT,
            minimum_floor_height: -512,
            maximum_floor_height: 512,
            minimum_ceiling_height: 1024,
            maximum_ceiling_height: 2048,
            polygon_index: 2,
            floor_height: 0,
            ceiling_height: 2048,
            parent_platform_index: -1,
            tag: 4,
            ..DynamicPlatform::default()
        };
        let data = encode_all(std::slice::from_ref(&dynamic));
        assert_eq!(data.len(), DynamicPlatform::SIZE);
        assert_eq!(decode_all::<DynamicPlatform>(&data).unwrap(), vec![dynamic.clone()]);

        let platform = dynamic.to_static();
        assert_eq!(platform.platform_type, PlatformType::SphtPlatform);
        assert_eq!(platform.minimum_height, -512);
        assert_eq!(platform.maximum_height, 512);
        assert_eq!(platform.polygon_index, 2);
        assert_eq!(platform.tag, 4);
    }

    #[test]
    fn test_dynamic_fold_from_ceiling() {
        let dynamic = DynamicPlatform {
            flags: PlatformFlags::COMES_FROM_CEILING,
            minimum_floor_height: 0,
            maximum_floor_height: 0,
            minimum_ceiling_height: 256,
            maximum_ceiling_height: 1536,
            ..DynamicPlatform::default()
        };
        let platform = dynamic.to_static();
        assert_eq!(platform.minimum_height, 256);
        assert_eq!(platform.maximum_height, 1536);
    }
}
