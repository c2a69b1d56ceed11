pub mod chunks;
pub mod file;
pub mod tags;

pub use chunks::ChunkMap;
pub use file::{DirectoryEntry, Wadfile};
