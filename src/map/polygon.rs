use crate::codec::{BinaryReader, BinaryWriter, Record, WorldPoint2d};
use crate::error::Result;

pub const MAX_VERTICES_PER_POLYGON: usize = 8;

/// Polygon behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolygonType {
    #[default]
    Normal,
    ItemImpassable,
    MonsterImpassable,
    Hill,
    Base,
    /// Paired with a platform record through `permutation`
    Platform,
    LightOnTrigger,
    PlatformOnTrigger,
    LightOffTrigger,
    PlatformOffTrigger,
    Teleporter,
    ZoneBorder,
    Goal,
    VisibleMonsterTrigger,
    InvisibleMonsterTrigger,
    DualMonsterTrigger,
    ItemTrigger,
    MustBeExplored,
    AutomaticExit,
    MinorOuch,
    MajorOuch,
    Glue,
    GlueTrigger,
    Superglue,
    Other(i16),
}

impl PolygonType {
    const KNOWN: [PolygonType; 24] = [
        Self::Normal,
        Self::ItemImpassable,
        Self::MonsterImpassable,
        Self::Hill,
        Self::Base,
        Self::Platform,
        Self::LightOnTrigger,
        Self::PlatformOnTrigger,
        Self::LightOffTrigger,
        Self::PlatformOffTrigger,
        Self::Teleporter,
        Self::ZoneBorder,
        Self::Goal,
        Self::VisibleMonsterTrigger,
        Self::InvisibleMonsterTrigger,
        Self::DualMonsterTrigger,
        Self::ItemTrigger,
        Self::MustBeExplored,
        Self::AutomaticExit,
        Self::MinorOuch,
        Self::MajorOuch,
        Self::Glue,
        Self::GlueTrigger,
        Self::Superglue,
    ];

    pub fn from_i16(v: i16) -> Self {
        usize::try_from(v)
            .ok()
            .and_then(|i| Self::KNOWN.get(i).copied())
            .unwrap_or(Self::Other(v))
    }

    pub fn to_i16(self) -> i16 {
        match self {
            Self::Other(v) => v,
            known => Self::KNOWN.iter().position(|&k| k == known).unwrap_or(0) as i16,
        }
    }
}

/// Convex (ideally) floor/ceiling region bounded by lines (`POLY`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub polygon_type: PolygonType,
    pub flags: u16,
    /// Type-dependent: platform index for `Platform`, light or polygon index for triggers
    pub permutation: i16,
    pub vertex_count: u16,
    pub endpoint_indexes: [i16; MAX_VERTICES_PER_POLYGON],
    /// Line `i` connects vertex `i` to vertex `i + 1` (mod vertex count)
    pub line_indexes: [i16; MAX_VERTICES_PER_POLYGON],
    pub floor_texture: u16,
    pub ceiling_texture: u16,
    pub floor_height: i16,
    pub ceiling_height: i16,
    pub floor_light: i16,
    pub ceiling_light: i16,
    pub area: i32,
    pub first_object: i16,
    pub first_exclusion_zone_index: i16,
    pub line_exclusion_zone_count: i16,
    pub point_exclusion_zone_count: i16,
    pub floor_transfer_mode: i16,
    pub ceiling_transfer_mode: i16,
    pub adjacent_polygon_indexes: [i16; MAX_VERTICES_PER_POLYGON],
    pub first_neighbor_index: i16,
    pub neighbor_count: i16,
    pub center: WorldPoint2d,
    pub side_indexes: [i16; MAX_VERTICES_PER_POLYGON],
    pub floor_origin: WorldPoint2d,
    pub ceiling_origin: WorldPoint2d,
    pub media_index: i16,
    pub media_light: i16,
    pub sound_source_indexes: i16,
    pub ambient_sound: i16,
    pub random_sound: i16,
    /// Derived during reconciliation; not stored
    pub concave: bool,
}

impl Default for Polygon {
    fn default() -> Self {
        Self {
            polygon_type: PolygonType::Normal,
            flags: 0,
            permutation: 0,
            vertex_count: 0,
            endpoint_indexes: [-1; MAX_VERTICES_PER_POLYGON],
            line_indexes: [-1; MAX_VERTICES_PER_POLYGON],
            floor_texture: 0xFFFF,
            ceiling_texture: 0xFFFF,
            floor_height: 0,
            ceiling_height: 1024,
            floor_light: 0,
            ceiling_light: 0,
            area: 0,
            first_object: -1,
            first_exclusion_zone_index: 0,
            line_exclusion_zone_count: 0,
            point_exclusion_zone_count: 0,
            floor_transfer_mode: 0,
            ceiling_transfer_mode: 0,
            adjacent_polygon_indexes: [-1; MAX_VERTICES_PER_POLYGON],
            first_neighbor_index: -1,
            neighbor_count: 0,
            center: WorldPoint2d::default(),
            side_indexes: [-1; MAX_VERTICES_PER_POLYGON],
            floor_origin: WorldPoint2d::default(),
            ceiling_origin: WorldPoint2d::default(),
            media_index: -1,
            media_light: -1,
            sound_source_indexes: -1,
            ambient_sound: -1,
            random_sound: -1,
            concave: false,
        }
    }
}

impl Polygon {
    /// Build a polygon from vertex and line lists of equal length (at most 8)
    pub fn with_vertices(endpoints: &[i16], lines: &[i16]) -> Self {
        let n = endpoints.len().min(lines.len()).min(MAX_VERTICES_PER_POLYGON);
        let mut polygon = Self {
            vertex_count: n as u16,
            ..Self::default()
        };
        polygon.endpoint_indexes[..n].copy_from_slice(&endpoints[..n]);
        polygon.line_indexes[..n].copy_from_slice(&lines[..n]);
        polygon
    }

    /// Number of usable vertices; a stored count above 8 is clamped
    pub fn len(&self) -> usize {
        (self.vertex_count as usize).min(MAX_VERTICES_PER_POLYGON)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn vertices(&self) -> &[i16] {
        &self.endpoint_indexes[..self.len()]
    }

    pub fn lines(&self) -> &[i16] {
        &self.line_indexes[..self.len()]
    }

    pub fn is_platform(&self) -> bool {
        self.polygon_type == PolygonType::Platform
    }
}

impl Record for Polygon {
    const SIZE: usize = 128;
    const NAME: &'static str = "polygons";

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        let polygon = Self {
            polygon_type: PolygonType::from_i16(reader.read_i16()?),
            flags: reader.read_u16()?,
            permutation: reader.read_i16()?,
            vertex_count: reader.read_u16()?,
            endpoint_indexes: reader.read_i16_array()?,
            line_indexes: reader.read_i16_array()?,
            floor_texture: reader.read_u16()?,
            ceiling_texture: reader.read_u16()?,
            floor_height: reader.read_i16()?,
            ceiling_height: reader.read_i16()?,
            floor_light: reader.read_i16()?,
            ceiling_light: reader.read_i16()?,
            area: reader.read_i32()?,
            first_object: reader.read_i16()?,
            first_exclusion_zone_index: reader.read_i16()?,
            line_exclusion_zone_count: reader.read_i16()?,
            point_exclusion_zone_count: reader.read_i16()?,
            floor_transfer_mode: reader.read_i16()?,
            ceiling_transfer_mode: reader.read_i16()?,
            adjacent_polygon_indexes: reader.read_i16_array()?,
            first_neighbor_index: reader.read_i16()?,
            neighbor_count: reader.read_i16()?,
            center: reader.read_point()?,
            side_indexes: reader.read_i16_array()?,
            floor_origin: reader.read_point()?,
            ceiling_origin: reader.read_point()?,
            media_index: reader.read_i16()?,
            media_light: reader.read_i16()?,
            sound_source_indexes: reader.read_i16()?,
            ambient_sound: reader.read_i16()?,
            random_sound: reader.read_i16()?,
            concave: false,
        };
        reader.skip(2)?;
        Ok(polygon)
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i16(self.polygon_type.to_i16());
        writer.write_u16(self.flags);
        writer.write_i16(self.permutation);
        writer.write_u16(self.vertex_count);
        writer.write_i16_slice(&self.endpoint_indexes);
        writer.write_i16_slice(&self.line_indexes);
        writer.write_u16(self.floor_texture);
        writer.write_u16(self.ceiling_texture);
        writer.write_i16(self.floor_height);
        writer.write_i16(self.ceiling_height);
        writer.write_i16(self.floor_light);
        writer.write_i16(self.ceiling_light);
        writer.write_i32(self.area);
        writer.write_i16(self.first_object);
        writer.write_i16(self.first_exclusion_zone_index);
        writer.write_i16(self.line_exclusion_zone_count);
        writer.write_i16(self.point_exclusion_zone_count);
        writer.write_i16(self.floor_transfer_mode);
        writer.write_i16(self.ceiling_transfer_mode);
        writer.write_i16_slice(&self.adjacent_polygon_indexes);
        writer.write_i16(self.first_neighbor_index);
        writer.write_i16(self.neighbor_count);
        writer.write_point(self.center);
        writer.write_i16_slice(&self.side_indexes);
        writer.write_point(self.floor_origin);
        writer.write_point(self.ceiling_origin);
        writer.write_i16(self.media_index);
        writer.write_i16(self.media_light);
        writer.write_i16(self.sound_source_indexes);
        writer.write_i16(self.ambient_sound);
        writer.write_i16(self.random_sound);
        writer.write_zeros(2);
    }
}
