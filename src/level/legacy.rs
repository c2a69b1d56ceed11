//! Selection between canonical and legacy encodings of points and platforms.
//!
//! Each chunk kind is resolved once into a [`Source`]; decoding then matches
//! on the variant. Applying legacy platform heights to their polygons is a
//! separate step that runs before reconciliation.

use tracing::{debug, trace};

use crate::codec::{decode_all, Tag};
use crate::error::{Error, Result};
use crate::map::{DynamicPlatform, Endpoint, Platform, Point, Polygon};
use crate::wad::{tags, ChunkMap};

/// Where a chunk kind is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    Canonical(&'a [u8]),
    Legacy(&'a [u8]),
}

impl<'a> Source<'a> {
    /// Prefer the canonical tag, fall back to the legacy one
    pub fn select(chunks: &'a ChunkMap, canonical: Tag, legacy: Tag) -> Option<Self> {
        chunks
            .get(canonical)
            .map(Source::Canonical)
            .or_else(|| chunks.get(legacy).map(Source::Legacy))
    }
}

/// Points plus, when read from endpoint records, the extra per-endpoint data
#[derive(Debug, Default)]
pub struct DecodedPoints {
    pub points: Vec<Point>,
    pub legacy_endpoints: Vec<Endpoint>,
}

pub fn decode_points(chunks: &ChunkMap) -> Result<DecodedPoints> {
    match Source::select(chunks, tags::POINTS, tags::ENDPOINTS) {
        Some(Source::Canonical(data)) => Ok(DecodedPoints {
            points: decode_all::<Point>(data)?,
            legacy_endpoints: Vec::new(),
        }),
        Some(Source::Legacy(data)) => {
            let legacy_endpoints = decode_all::<Endpoint>(data)?;
            debug!(count = legacy_endpoints.len(), "reading points from endpoint records");
            Ok(DecodedPoints {
                points: legacy_endpoints.iter().map(|e| e.vertex).collect(),
                legacy_endpoints,
            })
        }
        None => Err(Error::MissingChunk("points")),
    }
}

/// Platforms decoded from whichever chunk is present, not yet applied to polygons
#[derive(Debug, Default)]
pub struct DecodedPlatforms {
    pub platforms: Vec<Platform>,
    pub from_dynamic: bool,
}

pub fn decode_platforms(chunks: &ChunkMap) -> Result<DecodedPlatforms> {
    match Source::select(chunks, tags::STATIC_PLATFORMS, tags::DYNAMIC_PLATFORMS) {
        Some(Source::Canonical(data)) => Ok(DecodedPlatforms {
            platforms: decode_all::<Platform>(data)?,
            from_dynamic: false,
        }),
        Some(Source::Legacy(data)) => {
            let platforms: Vec<Platform> = decode_all::<DynamicPlatform>(data)?
                .iter()
                .map(DynamicPlatform::to_static)
                .collect();
            debug!(count = platforms.len(), "reading platforms from dynamic records");
            Ok(DecodedPlatforms {
                platforms,
                from_dynamic: true,
            })
        }
        None => Ok(DecodedPlatforms::default()),
    }
}

/// Move each platform's polygon to its resting extent: floor platforms
/// start at their minimum height, ceiling platforms at their maximum.
/// Platforms pointing outside the polygon list are skipped.
pub fn apply_dynamic_platform_heights(platforms: &[Platform], polygons: &mut [Polygon]) {
    for (i, platform) in platforms.iter().enumerate() {
        let Some(polygon) = usize::try_from(platform.polygon_index)
            .ok()
            .and_then(|p| polygons.get_mut(p))
        else {
            trace!(platform = i, polygon = platform.polygon_index, "platform has no polygon");
            continue;
        };
        if platform.comes_from_floor() {
            polygon.floor_height = platform.minimum_height;
        }
        if platform.comes_from_ceiling() {
            polygon.ceiling_height = platform.maximum_height;
        }
    }
}
