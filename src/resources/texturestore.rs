//! Texture lookup.
//!
//! Playback only needs the pixel size of a sheet to cut it into frames, so
//! the provider answers `(category, name) -> size`. [`TextureStore`] is the
//! in-memory implementation; a manifest file maps names in the animation
//! category to sizes:
//!
//! ```json
//! { "fire_lower.png": { "width": 256, "height": 64 } }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Texture folder a sheet is looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureCategory {
    Animation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
}

impl TextureInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Source of texture sizes keyed by category and name.
pub trait TextureProvider {
    fn texture(&self, category: TextureCategory, name: &str) -> Option<TextureInfo>;
}

#[derive(Resource, Debug, Default)]
pub struct TextureStore {
    pub map: FxHashMap<(TextureCategory, String), TextureInfo>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: TextureCategory, name: impl Into<String>, info: TextureInfo) {
        self.map.insert((category, name.into()), info);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Parse a manifest of animation textures.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let raw: FxHashMap<String, TextureInfo> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse texture manifest: {}", e))?;
        let mut store = Self::new();
        for (name, info) in raw {
            store.insert(TextureCategory::Animation, name, info);
        }
        Ok(store)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let store = Self::from_json_str(&json)?;
        info!("Loaded {} textures from {}", store.len(), path.display());
        Ok(store)
    }
}

impl TextureProvider for TextureStore {
    fn texture(&self, category: TextureCategory, name: &str) -> Option<TextureInfo> {
        self.map.get(&(category, name.to_string())).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let mut store = TextureStore::new();
        store.insert(TextureCategory::Animation, "hero.png", TextureInfo::new(32, 32));
        assert!(store.texture(TextureCategory::Animation, "villain.png").is_none());
        assert_eq!(
            store.texture(TextureCategory::Animation, "hero.png"),
            Some(TextureInfo::new(32, 32))
        );
    }

    #[test]
    fn test_manifest_goes_to_animation_category() {
        let store =
            TextureStore::from_json_str(r#"{ "fire.png": { "width": 256, "height": 64 } }"#)
                .unwrap();
        assert_eq!(
            store.texture(TextureCategory::Animation, "fire.png"),
            Some(TextureInfo::new(256, 64))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_bad_manifest_is_error() {
        assert!(TextureStore::from_json_str(r#"{ "fire.png": 3 }"#).is_err());
    }
}
