use bitflags::bitflags;

use crate::codec::{BinaryReader, BinaryWriter, Fixed, Record};
use crate::error::Result;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LightFlags: u16 {
        const INITIALLY_ACTIVE = 0x0001;
        const HAS_SLAVED_INTENSITIES = 0x0002;
        const STATELESS = 0x0004;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightType {
    #[default]
    Normal,
    Strobe,
    Media,
    Other(i16),
}

impl LightType {
    pub fn from_i16(v: i16) -> Self {
        match v {
            0 => Self::Normal,
            1 => Self::Strobe,
            2 => Self::Media,
            other => Self::Other(other),
        }
    }

    pub fn to_i16(self) -> i16 {
        match self {
            Self::Normal => 0,
            Self::Strobe => 1,
            Self::Media => 2,
            Self::Other(v) => v,
        }
    }
}

/// Shape of the intensity curve over one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FunctionKind {
    #[default]
    Constant,
    Linear,
    Smooth,
    Flicker,
    Other(i16),
}

impl FunctionKind {
    pub fn from_i16(v: i16) -> Self {
        match v {
            0 => Self::Constant,
            1 => Self::Linear,
            2 => Self::Smooth,
            3 => Self::Flicker,
            other => Self::Other(other),
        }
    }

    pub fn to_i16(self) -> i16 {
        match self {
            Self::Constant => 0,
            Self::Linear => 1,
            Self::Smooth => 2,
            Self::Flicker => 3,
            Self::Other(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LightingFunction {
    pub function: FunctionKind,
    pub period: i16,
    pub delta_period: i16,
    pub intensity: Fixed,
    pub delta_intensity: Fixed,
}

impl LightingFunction {
    pub fn new(function: FunctionKind, period: i16, intensity: f64) -> Self {
        Self {
            function,
            period,
            delta_period: 0,
            intensity: Fixed::from_f64(intensity),
            delta_intensity: Fixed(0),
        }
    }

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            function: FunctionKind::from_i16(reader.read_i16()?),
            period: reader.read_i16()?,
            delta_period: reader.read_i16()?,
            intensity: reader.read_fixed()?,
            delta_intensity: reader.read_fixed()?,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16(self.function.to_i16());
        writer.write_i16(self.period);
        writer.write_i16(self.delta_period);
        writer.write_fixed(self.intensity);
        writer.write_fixed(self.delta_intensity);
    }
}

/// Light source state machine (`LITE`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Light {
    pub light_type: LightType,
    pub flags: LightFlags,
    pub phase: i16,
    pub primary_active: LightingFunction,
    pub secondary_active: LightingFunction,
    pub becoming_active: LightingFunction,
    pub primary_inactive: LightingFunction,
    pub secondary_inactive: LightingFunction,
    pub becoming_inactive: LightingFunction,
    pub tag: i16,
}

impl Light {
    /// Steady light at `intensity` in both states, as created by a new level
    pub fn with_intensity(intensity: f64) -> Self {
        let steady = LightingFunction::new(FunctionKind::Constant, 30, intensity);
        let transition = LightingFunction::new(FunctionKind::Linear, 30, intensity);
        Self {
            light_type: LightType::Normal,
            flags: LightFlags::INITIALLY_ACTIVE,
            phase: 0,
            primary_active: steady,
            secondary_active: steady,
            becoming_active: transition,
            primary_inactive: steady,
            secondary_inactive: steady,
            becoming_inactive: transition,
            tag: 0,
        }
    }

    pub fn initially_active(&self) -> bool {
        self.flags.contains(LightFlags::INITIALLY_ACTIVE)
    }
}

impl Record for Light {
    const SIZE: usize = 100;
    const NAME: &'static str = "lights";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        let light = Self {
            light_type: LightType::from_i16(reader.read_i16()?),
            flags: LightFlags::from_bits_retain(reader.read_u16()?),
            phase: reader.read_i16()?,
            primary_active: LightingFunction::read(reader)?,
            secondary_active: LightingFunction::read(reader)?,
            becoming_active: LightingFunction::read(reader)?,
            primary_inactive: LightingFunction::read(reader)?,
            secondary_inactive: LightingFunction::read(reader)?,
            becoming_inactive: LightingFunction::read(reader)?,
            tag: reader.read_i16()?,
        };
        reader.skip(8)?;
        Ok(light)
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16(self.light_type.to_i16());
        writer.write_u16(self.flags.bits());
        writer.write_i16(self.phase);
        self.primary_active.write(writer);
        self.secondary_active.write(writer);
        self.becoming_active.write(writer);
        self.primary_inactive.write(writer);
        self.secondary_inactive.write(writer);
        self.becoming_inactive.write(writer);
        writer.write_i16(self.tag);
        writer.write_zeros(8);
    }
}
