//! Chunk tags.

use crate::codec::Tag;

pub const MAP_INFO: Tag = Tag::new(b"Minf");
pub const POINTS: Tag = Tag::new(b"PNTS");
pub const ENDPOINTS: Tag = Tag::new(b"EPNT");
pub const LINES: Tag = Tag::new(b"LINS");
pub const SIDES: Tag = Tag::new(b"SIDS");
pub const POLYGONS: Tag = Tag::new(b"POLY");
pub const LIGHTS: Tag = Tag::new(b"LITE");
pub const ANNOTATIONS: Tag = Tag::new(b"NOTE");
pub const OBJECTS: Tag = Tag::new(b"OBJS");
pub const PLACEMENTS: Tag = Tag::new(b"plac");
pub const STATIC_PLATFORMS: Tag = Tag::new(b"plat");
pub const DYNAMIC_PLATFORMS: Tag = Tag::new(b"PLAT");
pub const MEDIA: Tag = Tag::new(b"medi");
pub const AMBIENT_SOUNDS: Tag = Tag::new(b"ambi");
pub const RANDOM_SOUNDS: Tag = Tag::new(b"bonk");
pub const TERMINALS: Tag = Tag::new(b"term");

/// Tags written by the engine into saved games or merged maps.
/// None of them are authoring data; a saved level never carries them.
pub const TRANSIENT: [Tag; 20] = [
    // saved game / optimized map
    ENDPOINTS,
    Tag::new(b"plyr"),
    Tag::new(b"dwol"),
    Tag::new(b"mobj"),
    Tag::new(b"door"),
    Tag::new(b"iidx"),
    Tag::new(b"alin"),
    Tag::new(b"apol"),
    Tag::new(b"mOns"),
    Tag::new(b"fx  "),
    Tag::new(b"bang"),
    DYNAMIC_PLATFORMS,
    Tag::new(b"weap"),
    Tag::new(b"cint"),
    Tag::new(b"slua"),
    // embedded physics
    Tag::new(b"MNpx"),
    Tag::new(b"FXpx"),
    Tag::new(b"PRpx"),
    Tag::new(b"RXpx"),
    Tag::new(b"WPpx"),
];

pub fn is_transient(tag: Tag) -> bool {
    TRANSIENT.contains(&tag)
}
