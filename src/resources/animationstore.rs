//! Animation definition registry.
//!
//! Definitions are immutable once loaded and shared by every instance that
//! plays them, so the store hands out `Arc`s. A store file is a JSON object
//! keyed by animation name:
//!
//! ```json
//! {
//!   "fireball": {
//!     "sound": "fire_loop",
//!     "lower": { "sprite": "fire_lower.png", "x_frames": 4, "y_frames": 1,
//!                "frame_count": 4, "frame_speed_ms": 100, "loop_count": 0 },
//!     "upper": { "sprite": "fire_upper.png", "x_frames": 4, "y_frames": 1,
//!                "frame_count": 4, "frame_speed_ms": 100, "loop_count": 0,
//!                "lights": [ { "offset_x": 0, "offset_y": -8, "size": 32,
//!                              "intensity": 200, "expand": 0.0,
//!                              "color": { "r": 255, "g": 160, "b": 64 } } ] }
//!   }
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::layer::LayerId;
use crate::components::tint::Color;

/// Light emitted while a particular frame is showing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LightDescriptor {
    /// Offset from the effect center, in the sprite's unrotated space.
    pub offset_x: i32,
    pub offset_y: i32,
    pub size: i32,
    pub intensity: u8,
    pub expand: f32,
    pub color: Color,
}

/// Playback parameters for one layer of an effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDefinition {
    /// Texture name in the animation texture category. Empty means no sprite.
    #[serde(default)]
    pub sprite: String,
    #[serde(default = "one")]
    pub x_frames: u32,
    #[serde(default = "one")]
    pub y_frames: u32,
    #[serde(default = "one")]
    pub frame_count: u32,
    /// Time each frame stays on screen.
    #[serde(default = "default_frame_speed")]
    pub frame_speed_ms: u64,
    /// Extra playthroughs after the first one.
    #[serde(default)]
    pub loop_count: i32,
    /// Per-frame lights, indexed by frame.
    #[serde(default)]
    pub lights: Vec<LightDescriptor>,
}

fn one() -> u32 {
    1
}

fn default_frame_speed() -> u64 {
    100
}

impl Default for LayerDefinition {
    fn default() -> Self {
        Self {
            sprite: String::new(),
            x_frames: 1,
            y_frames: 1,
            frame_count: 1,
            frame_speed_ms: default_frame_speed(),
            loop_count: 0,
            lights: Vec::new(),
        }
    }
}

impl LayerDefinition {
    pub fn light(&self, frame_index: u32) -> Option<&LightDescriptor> {
        self.lights.get(frame_index as usize)
    }
}

/// Immutable description of a two-layer effect.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationDefinition {
    /// Filled from the store key when loaded from a file.
    #[serde(default)]
    pub name: String,
    /// Sound resource played for the lifetime of the effect.
    #[serde(default)]
    pub sound: Option<String>,
    #[serde(default)]
    pub lower: LayerDefinition,
    #[serde(default)]
    pub upper: LayerDefinition,
}

impl AnimationDefinition {
    pub fn layer(&self, id: LayerId) -> &LayerDefinition {
        match id {
            LayerId::Lower => &self.lower,
            LayerId::Upper => &self.upper,
        }
    }

    /// Sound name, if one is set and non-empty.
    pub fn sound_name(&self) -> Option<&str> {
        self.sound.as_deref().filter(|s| !s.is_empty())
    }

    /// Check the invariants playback relies on.
    pub fn validate(&self) -> Result<(), String> {
        for id in LayerId::ALL {
            let layer = self.layer(id);
            if layer.frame_count == 0 {
                return Err(format!(
                    "animation '{}': {:?} layer has frame_count 0",
                    self.name, id
                ));
            }
            if layer.loop_count < 0 {
                return Err(format!(
                    "animation '{}': {:?} layer has negative loop_count {}",
                    self.name, id, layer.loop_count
                ));
            }
        }
        Ok(())
    }
}

/// Central registry of animation definitions keyed by name.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, Arc<AnimationDefinition>>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition under its own name, replacing any previous one.
    pub fn insert(&mut self, definition: AnimationDefinition) -> Result<(), String> {
        definition.validate()?;
        self.animations
            .insert(definition.name.clone(), Arc::new(definition));
        Ok(())
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<Arc<AnimationDefinition>> {
        self.animations.get(key.as_ref()).cloned()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Parse a store from a JSON object keyed by animation name.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let raw: FxHashMap<String, AnimationDefinition> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse animation definitions: {}", e))?;
        let mut store = Self::new();
        for (name, mut definition) in raw {
            definition.name = name;
            store.insert(definition)?;
        }
        Ok(store)
    }

    /// Load a store from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let store = Self::from_json_str(&json)?;
        info!(
            "Loaded {} animation definitions from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }
}
