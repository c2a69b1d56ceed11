use crate::codec::{Angle, BinaryReader, BinaryWriter, Fixed, Record};
use crate::error::Result;

/// Looping background sound attached to polygons (`ambi`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmbientSound {
    pub flags: u16,
    pub sound_index: i16,
    pub volume: i16,
}

impl Record for AmbientSound {
    const SIZE: usize = 16;
    const NAME: &'static str = "ambient sounds";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        let sound = Self {
            flags: reader.read_u16()?,
            sound_index: reader.read_i16()?,
            volume: reader.read_i16()?,
        };
        reader.skip(10)?;
        Ok(sound)
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16(self.flags);
        writer.write_i16(self.sound_index);
        writer.write_i16(self.volume);
        writer.write_zeros(10);
    }
}

/// Sound played at random intervals (`bonk`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomSound {
    pub flags: u16,
    pub sound_index: i16,
    pub volume: i16,
    pub delta_volume: i16,
    pub period: i16,
    pub delta_period: i16,
    pub direction: Angle,
    pub delta_direction: Angle,
    pub pitch: Fixed,
    pub delta_pitch: Fixed,
    pub phase: i16,
}

impl RandomSound {
    pub const NON_DIRECTIONAL: u16 = 0x0001;

    pub fn non_directional(&self) -> bool {
        self.flags & Self::NON_DIRECTIONAL != 0
    }
}

impl Record for RandomSound {
    const SIZE: usize = 32;
    const NAME: &'static str = "random sounds";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        let sound = Self {
            flags: reader.read_u16()?,
            sound_index: reader.read_i16()?,
            volume: reader.read_i16()?,
            delta_volume: reader.read_i16()?,
            period: reader.read_i16()?,
            delta_period: reader.read_i16()?,
            direction: Angle(reader.read_i16()?),
            delta_direction: Angle(reader.read_i16()?),
            pitch: reader.read_fixed()?,
            delta_pitch: reader.read_fixed()?,
            phase: reader.read_i16()?,
        };
        reader.skip(6)?;
        Ok(sound)
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16(self.flags);
        writer.write_i16(self.sound_index);
        writer.write_i16(self.volume);
        writer.write_i16(self.delta_volume);
        writer.write_i16(self.period);
        writer.write_i16(self.delta_period);
        writer.write_i16(self.direction.raw());
        writer.write_i16(self.delta_direction.raw());
        writer.write_fixed(self.pitch);
        writer.write_fixed(self.delta_pitch);
        writer.write_i16(self.phase);
        writer.write_zeros(6);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_all, encode_all};

    #[test]
    fn test_ambient_roundtrip() {
        let sounds = vec![
            AmbientSound { flags: 0, sound_index: 7, volume: 256 },
            AmbientSound { flags: 1, sound_index: -1, volume: 0 },
        ];
        let data = encode_all(&sounds);
        assert_eq!(data.len(), 32);
        assert_eq!(decode_all::<AmbientSound>(&data).unwrap(), sounds);
    }

    #[test]
    fn test_random_roundtrip() {
        let sounds = vec![RandomSound {
            flags: RandomSound::NON_DIRECTIONAL,
            sound_index: 3,
            volume: 200,
            delta_volume: 50,
            period: 300,
            delta_period: 90,
            direction: Angle(128),
            delta_direction: Angle(16),
            pitch: Fixed::from_f64(1.0),
            delta_pitch: Fixed::from_f64(0.125),
            phase: -1,
        }];
        let data = encode_all(&sounds);
        assert_eq!(data.len(), RandomSound::SIZE);
        let decoded = decode_all::<RandomSound>(&data).unwrap();
        assert_eq!(decoded, sounds);
        assert!(decoded[0].non_directional());
    }
}
