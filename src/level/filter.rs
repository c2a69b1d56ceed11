use tracing::trace;

use crate::wad::{tags, ChunkMap};

/// Drop saved-game and engine-only chunks, returning how many were removed
pub fn strip_transient(chunks: &mut ChunkMap) -> usize {
    let mut removed = 0;
    for tag in tags::TRANSIENT {
        if chunks.remove(tag).is_some() {
            trace!(%tag, "dropping transient chunk");
            removed += 1;
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Tag;

    #[test]
    fn test_strip_transient() {
        let mut chunks = ChunkMap::new();
        chunks.insert(tags::POINTS, vec![0u8; 4]);
        chunks.insert(tags::ENDPOINTS, vec![0u8; 16]);
        chunks.insert(Tag::new(b"fx  "), vec![1u8, 2]);
        chunks.insert(Tag::new(b"fx__"), vec![3u8]);

        assert_eq!(strip_transient(&mut chunks), 2);
        let remaining: Vec<Tag> = chunks.tags().collect();
        assert_eq!(remaining, vec![tags::POINTS, Tag::new(b"fx__")]);
        assert_eq!(strip_transient(&mut chunks), 0);
    }
}
