//! Editor-side data kept next to a level but never written into its chunks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::wad::ChunkMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelAttributes {
    /// Layer ids each polygon belongs to, keyed by polygon index
    #[serde(default)]
    pub polygon_layers: BTreeMap<i16, Vec<i32>>,
    /// Lines marked as portals, keyed by line index
    #[serde(default)]
    pub portal_lines: BTreeMap<i16, bool>,
}

impl LevelAttributes {
    pub fn is_empty(&self) -> bool {
        self.polygon_layers.is_empty() && self.portal_lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.polygon_layers.clear();
        self.portal_lines.clear();
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of saving a level together with its attributes
#[derive(Debug, Clone, Default)]
pub struct LevelAndAttributes {
    pub chunks: ChunkMap,
    pub attributes: LevelAttributes,
}
