use bitflags::bitflags;

use crate::codec::{BinaryReader, BinaryWriter, Record};
use crate::error::Result;

pub const LEVEL_NAME_LENGTH: usize = 66;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EnvironmentFlags: u16 {
        const VACUUM = 0x0001;
        const MAGNETIC = 0x0002;
        const REBELLION = 0x0004;
        const LOW_GRAVITY = 0x0008;
        const GLUE_M1 = 0x0010;
        const OUCH_M1 = 0x0020;
        const REBELLION_M1 = 0x0040;
        const SONG_INDEX_M1 = 0x0080;
        const TERMINALS_STOP_TIME = 0x0100;
        const M1_ACTIVATION_RANGE = 0x0200;
        const M1_WEAPONS = 0x0400;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MissionFlags: u16 {
        const EXTERMINATION = 0x0001;
        const EXPLORATION = 0x0002;
        const RETRIEVAL = 0x0004;
        const REPAIR = 0x0008;
        const RESCUE = 0x0010;
        const EXPLORATION_M1 = 0x0020;
        const RESCUE_M1 = 0x0040;
        const REPAIR_M1 = 0x0080;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EntryPointFlags: u32 {
        const SINGLE_PLAYER = 0x0001;
        const MULTIPLAYER_COOPERATIVE = 0x0002;
        const MULTIPLAYER_CARNAGE = 0x0004;
        const KILL_THE_MAN_WITH_THE_BALL = 0x0008;
        const KING_OF_THE_HILL = 0x0010;
        const DEFENSE = 0x0020;
        const RUGBY = 0x0040;
        const CAPTURE_THE_FLAG = 0x0080;
    }
}

/// Level-wide settings (`Minf`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapInfo {
    pub environment: i16,
    pub physics_model: i16,
    /// Stored in the song index slot
    pub landscape: i16,
    pub mission_flags: MissionFlags,
    pub environment_flags: EnvironmentFlags,
    pub name: String,
    pub entry_point_flags: EntryPointFlags,
}

impl Record for MapInfo {
    const SIZE: usize = 88;
    const NAME: &'static str = "map info";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        let environment = reader.read_i16()?;
        let physics_model = reader.read_i16()?;
        let landscape = reader.read_i16()?;
        let mission_flags = MissionFlags::from_bits_retain(reader.read_u16()?);
        let environment_flags = EnvironmentFlags::from_bits_retain(reader.read_u16()?);
        reader.skip(8)?;
        let name = reader.read_fixed_string(LEVEL_NAME_LENGTH)?;
        let entry_point_flags = EntryPointFlags::from_bits_retain(reader.read_u32()?);

        Ok(Self {
            environment,
            physics_model,
            landscape,
            mission_flags,
            environment_flags,
            name,
            entry_point_flags,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16(self.environment);
        writer.write_i16(self.physics_model);
        writer.write_i16(self.landscape);
        writer.write_u16(self.mission_flags.bits());
        writer.write_u16(self.environment_flags.bits());
        writer.write_zeros(8);
        writer.write_fixed_string(&self.name, LEVEL_NAME_LENGTH);
        writer.write_u32(self.entry_point_flags.bits());
    }
}
