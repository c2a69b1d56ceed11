use crate::codec::{decode_all, encode_all, BinaryReader, BinaryWriter, Record};
use crate::error::{Error, Result};

/// One frequency record per item or monster type
pub const PLACEMENT_COUNT: usize = 64;

/// Spawn frequencies for one item or monster type (`plac`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub flags: u16,
    pub initial_count: i16,
    pub minimum_count: i16,
    pub maximum_count: i16,
    pub random_count: i16,
    pub random_chance: u16,
}

impl Placement {
    pub const REAPPEARS_IN_RANDOM_LOCATION: u16 = 0x0001;

    pub fn random_location(&self) -> bool {
        self.flags & Self::REAPPEARS_IN_RANDOM_LOCATION != 0
    }
}

impl Record for Placement {
    const SIZE: usize = 12;
    const NAME: &'static str = "placements";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            flags: reader.read_u16()?,
            initial_count: reader.read_i16()?,
            minimum_count: reader.read_i16()?,
            maximum_count: reader.read_i16()?,
            random_count: reader.read_i16()?,
            random_chance: reader.read_u16()?,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16(self.flags);
        writer.write_i16(self.initial_count);
        writer.write_i16(self.minimum_count);
        writer.write_i16(self.maximum_count);
        writer.write_i16(self.random_count);
        writer.write_u16(self.random_chance);
    }
}

pub const PLACEMENT_CHUNK_SIZE: usize = 2 * PLACEMENT_COUNT * Placement::SIZE;

/// Split the placement chunk into its item and monster tables
pub fn decode_placements(data: &[u8]) -> Result<(Vec<Placement>, Vec<Placement>)> {
    if data.len() != PLACEMENT_CHUNK_SIZE {
        return Err(Error::Format(format!(
            "placement chunk is {} bytes, expected {PLACEMENT_CHUNK_SIZE}",
            data.len()
        )));
    }
    let mut all = decode_all::<Placement>(data)?;
    let monsters = all.split_off(PLACEMENT_COUNT);
    Ok((all, monsters))
}

/// Encode item then monster tables, each padded or cut to the fixed count
pub fn encode_placements(items: &[Placement], monsters: &[Placement]) -> Vec<u8> {
    let mut table = Vec::with_capacity(2 * PLACEMENT_COUNT);
    for list in [items, monsters] {
        let start = table.len();
        table.extend(list.iter().take(PLACEMENT_COUNT).copied());
        table.resize(start + PLACEMENT_COUNT, Placement::default());
    }
    encode_all(&table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_tables() {
        let mut items = vec![Placement::default(); PLACEMENT_COUNT];
        let mut monsters = vec![Placement::default(); PLACEMENT_COUNT];
        items[3] = Placement {
            flags: Placement::REAPPEARS_IN_RANDOM_LOCATION,
            initial_count: 2,
            minimum_count: 1,
            maximum_count: 4,
            random_count: 3,
            random_chance: 0x8000,
        };
        monsters[0].initial_count = 6;

        let data = encode_placements(&items, &monsters);
        assert_eq!(data.len(), PLACEMENT_CHUNK_SIZE);
        // monster table starts after all 64 item records
        assert_eq!(&data[64 * 12 + 2..64 * 12 + 4], &[0, 6]);

        let (decoded_items, decoded_monsters) = decode_placements(&data).unwrap();
        assert_eq!(decoded_items, items);
        assert_eq!(decoded_monsters, monsters);
        assert!(decoded_items[3].random_location());
    }

    #[test]
    fn test_short_tables_are_padded() {
        let data = encode_placements(&[], &[Placement { initial_count: 1, ..Placement::default() }]);
        let (items, monsters) = decode_placements(&data).unwrap();
        assert_eq!(items.len(), PLACEMENT_COUNT);
        assert_eq!(monsters[0].initial_count, 1);
    }

    #[test]
    fn test_wrong_size_rejected() {
        assert!(decode_placements(&[0u8; 12]).unwrap_err().is_format());
    }
}
