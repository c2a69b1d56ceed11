//! Small synthetic levels for tests.

use super::Level;
use crate::codec::encode_all;
use crate::map::{
    EntryPointFlags, Line, MapInfo, MapObject, ObjectKind, Point, Polygon, Side,
};
use crate::wad::{tags, ChunkMap};

/// Entity lists that [`Fixture::chunks`] encodes into a chunk map
pub struct Fixture {
    pub map_info: MapInfo,
    pub points: Vec<Point>,
    pub lines: Vec<Line>,
    pub polygons: Vec<Polygon>,
    pub sides: Vec<Side>,
    pub objects: Vec<MapObject>,
}

impl Fixture {
    /// Two square rooms sharing the wall from point 1 to point 2:
    ///
    /// ```text
    /// 0 ---- 1 ---- 4
    /// |  p0  |  p1  |
    /// 3 ---- 2 ---- 5
    /// ```
    ///
    /// Room 1 has a raised floor and lowered ceiling. The shared wall (line 1)
    /// declares sides 0 and 1; side 2 is unreferenced. All sides carry stale
    /// back-references.
    pub fn two_rooms() -> Self {
        let points = vec![
            Point::new(0, 0),
            Point::new(1024, 0),
            Point::new(1024, 1024),
            Point::new(0, 1024),
            Point::new(2048, 0),
            Point::new(2048, 1024),
        ];

        let mut lines: Vec<Line> = [(0, 1), (1, 2), (2, 3), (3, 0), (1, 4), (4, 5), (5, 2)]
            .into_iter()
            .map(|(a, b)| Line::new(a, b))
            .collect();
        for (l, line) in lines.iter_mut().enumerate() {
            line.clockwise_polygon_owner = if l < 4 { 0 } else { 1 };
        }
        lines[1].counterclockwise_polygon_owner = 1;
        lines[1].clockwise_polygon_side_index = 0;
        lines[1].counterclockwise_polygon_side_index = 1;

        let west = Polygon::with_vertices(&[0, 1, 2, 3], &[0, 1, 2, 3]);
        let east = Polygon {
            floor_height: 256,
            ceiling_height: 768,
            ..Polygon::with_vertices(&[1, 4, 5, 2], &[4, 5, 6, 1])
        };

        let stale = Side {
            polygon_index: 7,
            line_index: 7,
            ..Side::default()
        };

        let monster = MapObject {
            kind: ObjectKind::Monster,
            index: 3,
            polygon_index: 1,
            x: 1536,
            y: 512,
            ..MapObject::default()
        };

        Self {
            map_info: MapInfo {
                name: "Fixture".into(),
                entry_point_flags: EntryPointFlags::SINGLE_PLAYER,
                ..MapInfo::default()
            },
            points,
            lines,
            polygons: vec![west, east],
            sides: vec![stale.clone(), stale.clone(), stale],
            objects: vec![monster],
        }
    }

    pub fn chunks(&self) -> ChunkMap {
        let mut chunks = ChunkMap::new();
        chunks.insert(tags::MAP_INFO, encode_all(std::slice::from_ref(&self.map_info)));
        chunks.insert(tags::POINTS, encode_all(&self.points));
        chunks.insert(tags::LINES, encode_all(&self.lines));
        chunks.insert(tags::POLYGONS, encode_all(&self.polygons));
        chunks.insert(tags::SIDES, encode_all(&self.sides));
        chunks.insert(tags::OBJECTS, encode_all(&self.objects));
        chunks
    }

    pub fn level(&self) -> Level {
        Level::load(&self.chunks()).unwrap()
    }
}
