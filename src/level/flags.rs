//! Named boolean properties over the three map-info flag registers.

use crate::map::{EntryPointFlags, EnvironmentFlags, MissionFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagRegister {
    Environment,
    Mission,
    EntryPoint,
}

/// Index into [`MAP_FLAGS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum MapFlag {
    Vacuum,
    Magnetic,
    Rebellion,
    LowGravity,
    RebellionM1,
    GlueM1,
    OuchM1,
    SongIndexM1,
    TerminalsStopTime,
    M1ActivationRange,
    M1Weapons,
    Extermination,
    Exploration,
    Retrieval,
    Repair,
    Rescue,
    ExplorationM1,
    RescueM1,
    RepairM1,
    SinglePlayer,
    MultiplayerCooperative,
    MultiplayerCarnage,
    KillTheManWithTheBall,
    KingOfTheHill,
    Defense,
    Rugby,
    CaptureTheFlag,
}

#[derive(Debug, Clone, Copy)]
pub struct FlagEntry {
    pub flag: MapFlag,
    pub name: &'static str,
    pub register: FlagRegister,
    pub mask: u32,
}

const fn env(flag: MapFlag, name: &'static str, bits: EnvironmentFlags) -> FlagEntry {
    FlagEntry { flag, name, register: FlagRegister::Environment, mask: bits.bits() as u32 }
}

const fn mission(flag: MapFlag, name: &'static str, bits: MissionFlags) -> FlagEntry {
    FlagEntry { flag, name, register: FlagRegister::Mission, mask: bits.bits() as u32 }
}

const fn entry(flag: MapFlag, name: &'static str, bits: EntryPointFlags) -> FlagEntry {
    FlagEntry { flag, name, register: FlagRegister::EntryPoint, mask: bits.bits() }
}

pub const MAP_FLAGS: [FlagEntry; 27] = [
    env(MapFlag::Vacuum, "vacuum", EnvironmentFlags::VACUUM),
    env(MapFlag::Magnetic, "magnetic", EnvironmentFlags::MAGNETIC),
    env(MapFlag::Rebellion, "rebellion", EnvironmentFlags::REBELLION),
    env(MapFlag::LowGravity, "low_gravity", EnvironmentFlags::LOW_GRAVITY),
    env(MapFlag::RebellionM1, "rebellion_m1", EnvironmentFlags::REBELLION_M1),
    env(MapFlag::GlueM1, "glue_m1", EnvironmentFlags::GLUE_M1),
    env(MapFlag::OuchM1, "ouch_m1", EnvironmentFlags::OUCH_M1),
    env(MapFlag::SongIndexM1, "song_index_m1", EnvironmentFlags::SONG_INDEX_M1),
    env(MapFlag::TerminalsStopTime, "terminals_stop_time", EnvironmentFlags::TERMINALS_STOP_TIME),
    env(MapFlag::M1ActivationRange, "m1_activation_range", EnvironmentFlags::M1_ACTIVATION_RANGE),
    env(MapFlag::M1Weapons, "m1_weapons", EnvironmentFlags::M1_WEAPONS),
    mission(MapFlag::Extermination, "extermination", MissionFlags::EXTERMINATION),
    mission(MapFlag::Exploration, "exploration", MissionFlags::EXPLORATION),
    mission(MapFlag::Retrieval, "retrieval", MissionFlags::RETRIEVAL),
    mission(MapFlag::Repair, "repair", MissionFlags::REPAIR),
    mission(MapFlag::Rescue, "rescue", MissionFlags::RESCUE),
    mission(MapFlag::ExplorationM1, "exploration_m1", MissionFlags::EXPLORATION_M1),
    mission(MapFlag::RescueM1, "rescue_m1", MissionFlags::RESCUE_M1),
    mission(MapFlag::RepairM1, "repair_m1", MissionFlags::REPAIR_M1),
    entry(MapFlag::SinglePlayer, "single_player", EntryPointFlags::SINGLE_PLAYER),
    entry(MapFlag::MultiplayerCooperative, "multiplayer_cooperative", EntryPointFlags::MULTIPLAYER_COOPERATIVE),
    entry(MapFlag::MultiplayerCarnage, "multiplayer_carnage", EntryPointFlags::MULTIPLAYER_CARNAGE),
    entry(MapFlag::KillTheManWithTheBall, "kill_the_man_with_the_ball", EntryPointFlags::KILL_THE_MAN_WITH_THE_BALL),
    entry(MapFlag::KingOfTheHill, "king_of_the_hill", EntryPointFlags::KING_OF_THE_HILL),
    entry(MapFlag::Defense, "defense", EntryPointFlags::DEFENSE),
    entry(MapFlag::Rugby, "rugby", EntryPointFlags::RUGBY),
    entry(MapFlag::CaptureTheFlag, "capture_the_flag", EntryPointFlags::CAPTURE_THE_FLAG),
];

impl MapFlag {
    pub fn entry(self) -> &'static FlagEntry {
        &MAP_FLAGS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    pub fn register(self) -> FlagRegister {
        self.entry().register
    }

    pub fn mask(self) -> u32 {
        self.entry().mask
    }

    pub fn from_name(name: &str) -> Option<Self> {
        MAP_FLAGS.iter().find(|e| e.name == name).map(|e| e.flag)
    }

    pub fn all() -> impl Iterator<Item = MapFlag> {
        MAP_FLAGS.iter().map(|e| e.flag)
    }
}
