//! A loaded level: every entity list of one wad entry plus derived topology.
//!
//! [`Level::load`] decodes the chunks, upgrades legacy encodings and
//! reconciles the result. [`Level::save`] encodes the lists back into the
//! chunk map they came from, keeping chunks this crate does not understand
//! and dropping the transient ones.

pub mod attributes;
pub mod filter;
pub mod flags;
pub mod legacy;
pub mod reconcile;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::BTreeSet;

use tracing::debug;

use crate::codec::{decode_all, encode_all, Record, Tag, WorldPoint2d};
use crate::error::{Error, Result};
use crate::map::placement::{decode_placements, encode_placements};
use crate::map::{
    AmbientSound, Annotation, Endpoint, EntryPointFlags, EnvironmentFlags, Light, Line, MapInfo,
    MapObject, Media, MissionFlags, ObjectKind, Placement, Platform, Point, Polygon, RandomSound,
    Side, PLACEMENT_COUNT,
};
use crate::wad::{tags, ChunkMap, DirectoryEntry};

pub use attributes::{LevelAndAttributes, LevelAttributes};
pub use flags::{FlagRegister, MapFlag, MAP_FLAGS};

/// Number of lights a new level starts with
pub const DEFAULT_LIGHT_COUNT: usize = 21;

#[derive(Debug, Clone)]
pub struct Level {
    map_info: MapInfo,

    pub points: Vec<Point>,
    /// Extra endpoint data, present only when points were read from `EPNT`
    pub legacy_endpoints: Vec<Endpoint>,
    pub lines: Vec<Line>,
    pub polygons: Vec<Polygon>,
    pub sides: Vec<Side>,
    pub platforms: Vec<Platform>,
    pub lights: Vec<Light>,
    pub objects: Vec<MapObject>,
    pub item_placements: Vec<Placement>,
    pub monster_placements: Vec<Placement>,
    pub annotations: Vec<Annotation>,
    pub media: Vec<Media>,
    pub ambient_sounds: Vec<AmbientSound>,
    pub random_sounds: Vec<RandomSound>,

    pub attributes: LevelAttributes,

    endpoint_polygons: Vec<BTreeSet<usize>>,
    endpoint_lines: Vec<BTreeSet<usize>>,

    /// Every chunk of the source entry, written back on save unless replaced or transient
    chunks: ChunkMap,
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}

impl Level {
    /// Empty level with a ramp of steady lights and default placements
    pub fn new() -> Self {
        let step = (DEFAULT_LIGHT_COUNT - 1) as f64;
        let lights = (0..DEFAULT_LIGHT_COUNT)
            .map(|i| Light::with_intensity((step - i as f64) / step))
            .collect();

        Self {
            map_info: MapInfo::default(),
            points: Vec::new(),
            legacy_endpoints: Vec::new(),
            lines: Vec::new(),
            polygons: Vec::new(),
            sides: Vec::new(),
            platforms: Vec::new(),
            lights,
            objects: Vec::new(),
            item_placements: vec![Placement::default(); PLACEMENT_COUNT],
            monster_placements: vec![Placement::default(); PLACEMENT_COUNT],
            annotations: Vec::new(),
            media: Vec::new(),
            ambient_sounds: Vec::new(),
            random_sounds: Vec::new(),
            attributes: LevelAttributes::default(),
            endpoint_polygons: Vec::new(),
            endpoint_lines: Vec::new(),
            chunks: ChunkMap::new(),
        }
    }

    /// Decode and reconcile a level. Fails without returning anything when a
    /// required chunk is missing or any present chunk is malformed.
    pub fn load(chunks: &ChunkMap) -> Result<Self> {
        let map_info = decode_map_info(chunks)?;
        let points = legacy::decode_points(chunks)?;
        let lines = required::<Line>(chunks, tags::LINES)?;
        let mut polygons = required::<Polygon>(chunks, tags::POLYGONS)?;
        let objects = required::<MapObject>(chunks, tags::OBJECTS)?;

        let sides = optional::<Side>(chunks, tags::SIDES)?;
        let platforms = legacy::decode_platforms(chunks)?;
        if platforms.from_dynamic {
            legacy::apply_dynamic_platform_heights(&platforms.platforms, &mut polygons);
        }
        let lights = optional::<Light>(chunks, tags::LIGHTS)?;
        let (item_placements, monster_placements) = match chunks.get(tags::PLACEMENTS) {
            Some(data) => decode_placements(data)?,
            None => (Vec::new(), Vec::new()),
        };
        let annotations = optional::<Annotation>(chunks, tags::ANNOTATIONS)?;
        let media = optional::<Media>(chunks, tags::MEDIA)?;
        let ambient_sounds = optional::<AmbientSound>(chunks, tags::AMBIENT_SOUNDS)?;
        let random_sounds = optional::<RandomSound>(chunks, tags::RANDOM_SOUNDS)?;

        let mut level = Self {
            map_info,
            points: points.points,
            legacy_endpoints: points.legacy_endpoints,
            lines,
            polygons,
            sides,
            platforms: platforms.platforms,
            lights,
            objects,
            item_placements,
            monster_placements,
            annotations,
            media,
            ambient_sounds,
            random_sounds,
            attributes: LevelAttributes::default(),
            endpoint_polygons: Vec::new(),
            endpoint_lines: Vec::new(),
            chunks: chunks.clone(),
        };
        level.reconcile();

        debug!(
            name = %level.map_info.name,
            points = level.points.len(),
            lines = level.lines.len(),
            polygons = level.polygons.len(),
            objects = level.objects.len(),
            "loaded level"
        );
        Ok(level)
    }

    pub fn load_entry(entry: &DirectoryEntry) -> Result<Self> {
        Self::load(&entry.chunks)
    }

    /// Encode every list over the chunks the level was loaded from.
    /// The graph is written as is; nothing is validated.
    pub fn save(&self) -> ChunkMap {
        let mut chunks = self.chunks.clone();

        chunks.insert(tags::MAP_INFO, encode_all(std::slice::from_ref(&self.map_info)));
        chunks.insert(tags::POINTS, encode_all(&self.points));
        chunks.insert(tags::LINES, encode_all(&self.lines));
        chunks.insert(tags::SIDES, encode_all(&self.sides));
        chunks.insert(tags::POLYGONS, encode_all(&self.polygons));
        chunks.insert(tags::LIGHTS, encode_all(&self.lights));
        chunks.insert(tags::ANNOTATIONS, encode_all(&self.annotations));
        chunks.insert(tags::OBJECTS, encode_all(&self.objects));
        chunks.insert(tags::MEDIA, encode_all(&self.media));
        chunks.insert(tags::AMBIENT_SOUNDS, encode_all(&self.ambient_sounds));
        chunks.insert(tags::RANDOM_SOUNDS, encode_all(&self.random_sounds));
        chunks.insert(tags::STATIC_PLATFORMS, encode_all(&self.platforms));
        chunks.insert(
            tags::PLACEMENTS,
            encode_placements(&self.item_placements, &self.monster_placements),
        );

        let removed = filter::strip_transient(&mut chunks);
        debug!(chunks = chunks.len(), removed, "saved level");
        chunks
    }

    pub fn save_with_attributes(&self) -> LevelAndAttributes {
        LevelAndAttributes {
            chunks: self.save(),
            attributes: self.attributes.clone(),
        }
    }

    /// Rebuild all derived state. Safe to call after editing the lists.
    pub fn reconcile(&mut self) {
        reconcile::reconcile(self);
    }

    pub fn map_info(&self) -> &MapInfo {
        &self.map_info
    }

    pub fn map_info_mut(&mut self) -> &mut MapInfo {
        &mut self.map_info
    }

    pub fn name(&self) -> &str {
        &self.map_info.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.map_info.name = name.into();
    }

    pub fn environment(&self) -> i16 {
        self.map_info.environment
    }

    pub fn set_environment(&mut self, environment: i16) {
        self.map_info.environment = environment;
    }

    pub fn landscape(&self) -> i16 {
        self.map_info.landscape
    }

    pub fn set_landscape(&mut self, landscape: i16) {
        self.map_info.landscape = landscape;
    }

    pub fn flag(&self, flag: MapFlag) -> bool {
        let bits = match flag.register() {
            FlagRegister::Environment => u32::from(self.map_info.environment_flags.bits()),
            FlagRegister::Mission => u32::from(self.map_info.mission_flags.bits()),
            FlagRegister::EntryPoint => self.map_info.entry_point_flags.bits(),
        };
        bits & flag.mask() != 0
    }

    pub fn set_flag(&mut self, flag: MapFlag, value: bool) {
        let mask = flag.mask();
        match flag.register() {
            FlagRegister::Environment => self
                .map_info
                .environment_flags
                .set(EnvironmentFlags::from_bits_retain(mask as u16), value),
            FlagRegister::Mission => self
                .map_info
                .mission_flags
                .set(MissionFlags::from_bits_retain(mask as u16), value),
            FlagRegister::EntryPoint => self
                .map_info
                .entry_point_flags
                .set(EntryPointFlags::from_bits_retain(mask), value),
        }
    }

    /// Polygons using the point as a vertex
    pub fn endpoint_polygons(&self, point: usize) -> Option<&BTreeSet<usize>> {
        self.endpoint_polygons.get(point)
    }

    /// Lines ending at the point
    pub fn endpoint_lines(&self, point: usize) -> Option<&BTreeSet<usize>> {
        self.endpoint_lines.get(point)
    }

    /// Mean of the polygon's vertices, ignoring vertices outside the point list
    pub fn polygon_center(&self, index: usize) -> Option<WorldPoint2d> {
        let polygon = self.polygons.get(index)?;
        let corners: Vec<Point> = polygon
            .vertices()
            .iter()
            .filter_map(|&v| reconcile::checked(v, self.points.len()).map(|i| self.points[i]))
            .collect();
        if corners.is_empty() {
            return None;
        }

        let n = corners.len() as i32;
        let x: i32 = corners.iter().map(|p| i32::from(p.x)).sum();
        let y: i32 = corners.iter().map(|p| i32::from(p.y)).sum();
        Some(WorldPoint2d::new((x / n) as i16, (y / n) as i16))
    }

    pub fn has_player_start(&self) -> bool {
        self.objects.iter().any(|o| o.kind == ObjectKind::Player)
    }

    /// Add a player start in the middle of polygon 0 if the level has none.
    /// Returns whether one was added.
    pub fn ensure_player_start(&mut self) -> bool {
        if self.has_player_start() || self.polygons.is_empty() {
            return false;
        }
        let center = self.polygon_center(0).unwrap_or_default();
        self.objects.push(MapObject::player_start(center, 0));
        debug!(x = center.x, y = center.y, "added player start");
        true
    }
}

fn decode_map_info(chunks: &ChunkMap) -> Result<MapInfo> {
    let data = chunks
        .get(tags::MAP_INFO)
        .ok_or(Error::MissingChunk(MapInfo::NAME))?;
    decode_all::<MapInfo>(data)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::Format("empty map info chunk".into()))
}

fn required<T: Record>(chunks: &ChunkMap, tag: Tag) -> Result<Vec<T>> {
    let data = chunks.get(tag).ok_or(Error::MissingChunk(T::NAME))?;
    decode_all(data)
}

fn optional<T: Record>(chunks: &ChunkMap, tag: Tag) -> Result<Vec<T>> {
    chunks.get(tag).map_or_else(|| Ok(Vec::new()), decode_all::<T>)
}

#[cfg(test)]
mod tests {
    use super::fixtures::Fixture;
    use super::*;
    use crate::map::{DynamicPlatform, PlatformFlags, PolygonType};

    #[test]
    fn test_new_level() {
        let level = Level::new();
        assert_eq!(level.lights.len(), DEFAULT_LIGHT_COUNT);
        assert_eq!(level.lights[0], Light::with_intensity(1.0));
        assert_eq!(level.lights[20], Light::with_intensity(0.0));
        assert_eq!(level.item_placements.len(), PLACEMENT_COUNT);
        assert_eq!(level.monster_placements.len(), PLACEMENT_COUNT);
        assert!(level.polygons.is_empty());
    }

    #[test]
    fn test_load_fixture() {
        let level = Fixture::two_rooms().level();
        assert_eq!(level.name(), "Fixture");
        assert_eq!(level.points.len(), 6);
        assert_eq!(level.lines.len(), 7);
        assert_eq!(level.polygons.len(), 2);
        assert_eq!(level.objects.len(), 1);
        assert!(level.platforms.is_empty());
        assert!(level.lights.is_empty());
        assert!(level.item_placements.is_empty());
        assert!(level.legacy_endpoints.is_empty());
        assert!(level.polygons.iter().all(|p| !p.concave));
    }

    #[test]
    fn test_missing_points() {
        let mut chunks = Fixture::two_rooms().chunks();
        chunks.remove(tags::POINTS);
        let err = Level::load(&chunks).unwrap_err();
        assert!(matches!(err, Error::MissingChunk("points")));
    }

    #[test]
    fn test_missing_required_chunks() {
        let cases = [
            (tags::MAP_INFO, "map info"),
            (tags::LINES, "lines"),
            (tags::POLYGONS, "polygons"),
            (tags::OBJECTS, "objects"),
        ];
        for (tag, name) in cases {
            let mut chunks = Fixture::two_rooms().chunks();
            chunks.remove(tag);
            match Level::load(&chunks) {
                Err(Error::MissingChunk(missing)) => assert_eq!(missing, name),
                other => panic!("expected missing {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_optional_chunk_absent_or_malformed() {
        let mut chunks = Fixture::two_rooms().chunks();
        chunks.remove(tags::SIDES);
        assert!(Level::load(&chunks).unwrap().sides.is_empty());

        chunks.insert(tags::SIDES, vec![0u8; Side::SIZE - 1]);
        assert!(Level::load(&chunks).unwrap_err().is_format());

        chunks.remove(tags::SIDES);
        chunks.insert(tags::PLACEMENTS, vec![0u8; 12]);
        assert!(Level::load(&chunks).unwrap_err().is_format());
    }

    #[test]
    fn test_points_from_legacy_endpoints() {
        let fixture = Fixture::two_rooms();
        let mut chunks = fixture.chunks();
        chunks.remove(tags::POINTS);
        let endpoints: Vec<Endpoint> = fixture
            .points
            .iter()
            .map(|&vertex| Endpoint { vertex, flags: Endpoint::ELEVATION, ..Endpoint::default() })
            .collect();
        chunks.insert(tags::ENDPOINTS, encode_all(&endpoints));

        let level = Level::load(&chunks).unwrap();
        assert_eq!(level.points, fixture.points);
        assert_eq!(level.legacy_endpoints, endpoints);
        assert_eq!(level.lines[1].highest_adjacent_floor, 256);
    }

    #[test]
    fn test_dynamic_platform_sets_floor() {
        let mut fixture = Fixture::two_rooms();
        fixture.polygons[1].polygon_type = PolygonType::Platform;
        let mut chunks = fixture.chunks();
        let dynamic = DynamicPlatform {
            platform_type: 3,
            flags: PlatformFlags::COMES_FROM_FLOOR,
            minimum_floor_height: -512,
            maximum_floor_height: 256,
            polygon_index: 1,
            ..DynamicPlatform::default()
        };
        chunks.insert(tags::DYNAMIC_PLATFORMS, encode_all(&[dynamic]));

        let level = Level::load(&chunks).unwrap();
        assert_eq!(level.polygons[1].floor_height, -512);
        assert_eq!(level.polygons[1].ceiling_height, 768);
        assert_eq!(level.platforms.len(), 1);
        assert_eq!(level.platforms[0].minimum_height, -512);
        assert_eq!(level.polygons[1].permutation, 0);
        // heights are reconciled after the platform moved the floor
        assert_eq!(level.lines[1].highest_adjacent_floor, 0);
        assert_eq!(level.lines[5].highest_adjacent_floor, -512);
    }

    #[test]
    fn test_static_platforms_win_over_dynamic() {
        let mut fixture = Fixture::two_rooms();
        fixture.polygons[1].polygon_type = PolygonType::Platform;
        let mut chunks = fixture.chunks();
        let platform = Platform { polygon_index: 1, tag: 9, ..Platform::default() };
        chunks.insert(tags::STATIC_PLATFORMS, encode_all(std::slice::from_ref(&platform)));
        let dynamic = DynamicPlatform {
            flags: PlatformFlags::COMES_FROM_FLOOR,
            minimum_floor_height: -512,
            polygon_index: 1,
            ..DynamicPlatform::default()
        };
        chunks.insert(tags::DYNAMIC_PLATFORMS, encode_all(&[dynamic]));

        let level = Level::load(&chunks).unwrap();
        assert_eq!(level.platforms, vec![platform]);
        assert_eq!(level.polygons[1].floor_height, 256);
    }

    #[test]
    fn test_save_roundtrip() {
        let mut fixture = Fixture::two_rooms();
        fixture.polygons[0].polygon_type = PolygonType::Platform;
        let mut level = fixture.level();
        level.lights.push(Light::with_intensity(0.5));
        level.annotations.push(Annotation {
            text: "start here".into(),
            polygon_index: 0,
            ..Annotation::default()
        });
        level.item_placements = vec![Placement { initial_count: 2, ..Placement::default() }; PLACEMENT_COUNT];
        level.monster_placements = vec![Placement::default(); PLACEMENT_COUNT];

        let reloaded = Level::load(&level.save()).unwrap();
        assert_eq!(reloaded.map_info(), level.map_info());
        assert_eq!(reloaded.points, level.points);
        assert_eq!(reloaded.lines, level.lines);
        assert_eq!(reloaded.polygons, level.polygons);
        assert_eq!(reloaded.sides, level.sides);
        assert_eq!(reloaded.platforms, level.platforms);
        assert_eq!(reloaded.lights, level.lights);
        assert_eq!(reloaded.objects, level.objects);
        assert_eq!(reloaded.annotations, level.annotations);
        assert_eq!(reloaded.item_placements, level.item_placements);
        assert_eq!(reloaded.monster_placements, level.monster_placements);
    }

    #[test]
    fn test_save_filters_transient_and_keeps_unknown() {
        let fixture = Fixture::two_rooms();
        let mut chunks = fixture.chunks();
        chunks.remove(tags::POINTS);
        let endpoints: Vec<Endpoint> = fixture
            .points
            .iter()
            .map(|&vertex| Endpoint { vertex, ..Endpoint::default() })
            .collect();
        chunks.insert(tags::ENDPOINTS, encode_all(&endpoints));
        chunks.insert(Tag::new(b"plyr"), vec![1u8, 2, 3]);
        chunks.insert(tags::TERMINALS, vec![9u8; 10]);
        chunks.insert(Tag::new(b"ZZZZ"), vec![0xde, 0xad, 0xbe, 0xef]);

        let saved = Level::load(&chunks).unwrap().save();
        assert!(!saved.contains(tags::ENDPOINTS));
        assert!(!saved.contains(Tag::new(b"plyr")));
        assert_eq!(saved.get(Tag::new(b"ZZZZ")), Some(&[0xde, 0xad, 0xbe, 0xef][..]));
        assert_eq!(saved.get(tags::TERMINALS), Some(&[9u8; 10][..]));
        assert_eq!(saved.get(tags::POINTS), Some(&encode_all(&fixture.points)[..]));
    }

    #[test]
    fn test_save_writes_empty_optional_lists() {
        let saved = Fixture::two_rooms().level().save();
        assert_eq!(saved.get(tags::MEDIA), Some(&[][..]));
        assert_eq!(saved.get(tags::STATIC_PLATFORMS), Some(&[][..]));
        assert_eq!(
            saved.get(tags::PLACEMENTS).map(<[u8]>::len),
            Some(2 * PLACEMENT_COUNT * Placement::SIZE)
        );
    }

    #[test]
    fn test_save_does_not_validate() {
        let mut level = Fixture::two_rooms().level();
        level.lines[0].clockwise_polygon_owner = 55;
        level.lines[0].highest_adjacent_floor = 999;
        let saved = level.save();
        let lines = decode_all::<Line>(saved.get(tags::LINES).unwrap()).unwrap();
        assert_eq!(lines[0].clockwise_polygon_owner, 55);
        assert_eq!(lines[0].highest_adjacent_floor, 999);
    }

    #[test]
    fn test_save_with_attributes() {
        let mut level = Fixture::two_rooms().level();
        level.attributes.portal_lines.insert(1, true);
        let saved = level.save_with_attributes();
        assert_eq!(saved.attributes.portal_lines.get(&1), Some(&true));

        let reloaded = Level::load(&saved.chunks).unwrap();
        assert!(reloaded.attributes.is_empty());
    }

    #[test]
    fn test_flags() {
        let mut level = Fixture::two_rooms().level();
        assert!(level.flag(MapFlag::SinglePlayer));
        assert!(!level.flag(MapFlag::Vacuum));

        level.set_flag(MapFlag::Vacuum, true);
        level.set_flag(MapFlag::Rescue, true);
        level.set_flag(MapFlag::SinglePlayer, false);
        level.set_flag(MapFlag::CaptureTheFlag, true);

        let info = level.map_info();
        assert_eq!(info.environment_flags, EnvironmentFlags::VACUUM);
        assert_eq!(info.mission_flags, MissionFlags::RESCUE);
        assert_eq!(info.entry_point_flags, EntryPointFlags::CAPTURE_THE_FLAG);
        assert!(level.flag(MapFlag::Vacuum));
        assert!(!level.flag(MapFlag::Magnetic));
    }

    #[test]
    fn test_ensure_player_start_idempotent() {
        let mut level = Fixture::two_rooms().level();
        assert!(!level.has_player_start());

        assert!(level.ensure_player_start());
        assert!(!level.ensure_player_start());

        let players: Vec<&MapObject> =
            level.objects.iter().filter(|o| o.kind == ObjectKind::Player).collect();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].position(), WorldPoint2d::new(512, 512));
        assert_eq!(players[0].polygon_index, 0);
    }

    #[test]
    fn test_ensure_player_start_needs_polygon() {
        let mut level = Level::new();
        assert!(!level.ensure_player_start());
        assert!(level.objects.is_empty());
    }

    #[test]
    fn test_polygon_center_truncates() {
        let mut level = Level::new();
        level.points = vec![Point::new(0, 0), Point::new(5, 0), Point::new(0, 5)];
        level.polygons.push(Polygon::with_vertices(&[0, 1, 2], &[0, 1, 2]));
        assert_eq!(level.polygon_center(0), Some(WorldPoint2d::new(1, 1)));
        assert_eq!(level.polygon_center(1), None);
    }
}
