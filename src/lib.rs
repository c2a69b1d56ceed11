//! Marathon map files
//!
//! Reads and writes the chunked wad container used by Marathon-engine levels,
//! decodes each level into typed entity lists, and rebuilds the topology the
//! format does not store.

pub mod codec;
pub mod error;
pub mod level;
pub mod map;
pub mod wad;

pub use error::{Error, Result};
pub use codec::{Angle, Fixed, Tag, WorldDistance, WorldPoint2d};
pub use level::{Level, LevelAndAttributes, LevelAttributes, MapFlag};
pub use wad::{ChunkMap, DirectoryEntry, Wadfile};
