//! Sprite geometry table for sprite-sheet animations.
//!
//! The table maps keys of the form `"<name>_<sheetIndex>"` to the geometry of
//! one sprite sheet: the size of a single frame cell and where the art sits on
//! the original art board. Animations look entries up by key while computing
//! the rectangle to draw; see
//! [`Animation::get_frame`](crate::components::animation::Animation::get_frame).
//!
//! Both the table and the sheet descriptors are plain JSON:
//!
//! ```json
//! {
//!   "boogie_0": { "width": 218, "height": 344, "offsetX": 460, "offsetY": 180 },
//!   "boogie_1": { "width": 218, "height": 344, "offsetX": 460, "offsetY": 180 }
//! }
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Geometry of one sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteData {
    /// Width of a single frame cell in pixels.
    pub width: f32,
    /// Height of a single frame cell in pixels.
    pub height: f32,
    /// Horizontal position of the art on the original art board.
    #[serde(rename = "offsetX")]
    pub offset_x: f32,
    /// Vertical position of the art on the original art board.
    #[serde(rename = "offsetY")]
    pub offset_y: f32,
}

/// Describes an animation: which sheets it uses and how many logical frames
/// it spans across them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub name: String,
    pub frames: usize,
}

impl SpriteSheet {
    pub fn new(name: impl Into<String>, frames: usize) -> Self {
        Self {
            name: name.into(),
            frames,
        }
    }
}

/// Lookup table from `"<name>_<index>"` keys to [`SpriteData`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteTable {
    pub entries: FxHashMap<String, SpriteData>,
}

impl SpriteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the lookup key for a sheet of `name`.
    pub fn key(name: &str, index: usize) -> String {
        format!("{}_{}", name, index)
    }

    pub fn insert(&mut self, key: impl Into<String>, data: SpriteData) {
        self.entries.insert(key.into(), data);
    }

    /// Register the same geometry for sheets `0..count` of `name`.
    pub fn insert_sheets(&mut self, name: &str, count: usize, data: SpriteData) {
        for index in 0..count {
            self.insert(Self::key(name, index), data);
        }
    }

    pub fn get(&self, key: &str) -> Option<&SpriteData> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a table from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse sprite table: {}", e))
    }

    /// Load a table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read sprite table {:?}: {}", path, e))?;
        let table = Self::from_json_str(&json)?;
        log::info!("Loaded {} sprite entries from {:?}", table.len(), path);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(SpriteTable::key("boogie", 0), "boogie_0");
        assert_eq!(SpriteTable::key("boogie", 12), "boogie_12");
    }

    #[test]
    fn test_parse_camel_case_offsets() {
        let table = SpriteTable::from_json_str(
            r#"{ "dance_0": { "width": 10, "height": 20, "offsetX": 3.5, "offsetY": -4 } }"#,
        )
        .unwrap();
        let data = table.get("dance_0").unwrap();
        assert_eq!(data.width, 10.0);
        assert_eq!(data.height, 20.0);
        assert_eq!(data.offset_x, 3.5);
        assert_eq!(data.offset_y, -4.0);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = SpriteTable::from_json_str("{ not json").unwrap_err();
        assert!(err.starts_with("Failed to parse sprite table"));
    }

    #[test]
    fn test_insert_sheets() {
        let mut table = SpriteTable::new();
        let data = SpriteData {
            width: 1.0,
            height: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        table.insert_sheets("wave", 3, data);
        assert_eq!(table.len(), 3);
        assert!(table.get("wave_2").is_some());
        assert!(table.get("wave_3").is_none());
    }

    #[test]
    fn test_sheet_descriptor_parses() {
        let sheet: SpriteSheet = serde_json::from_str(r#"{"name":"boogie","frames":48}"#).unwrap();
        assert_eq!(sheet, SpriteSheet::new("boogie", 48));
    }
}
