//! A single playing effect.
//!
//! An [`AnimationInstance`] plays an [`AnimationDefinition`] at a world
//! position: two sprite-sheet layers advanced on their own timers, per-frame
//! lights, and an optional looping positional sound. It registers itself in
//! the shared [`AnimationRegistry`] when spawned and removes itself once both
//! layers have finished.
//!
//! # Lifecycle
//!
//! 1. [`AnimationInstance::spawn`] builds the instance, starts its sound and
//!    registers it. An absent definition yields `None` and touches nothing.
//! 2. The driver calls [`update`](AnimationInstance::update) once per tick and
//!    [`draw`](AnimationInstance::draw) once per render pass.
//! 3. When both layers are [`LayerPhase::Finished`] the instance disposes
//!    itself. Callers may also [`dispose`](AnimationInstance::dispose) early.
//!
//! Disposal stops the sound and unregisters in one registry critical section
//! and is idempotent.

use std::fmt;
use std::sync::{Arc, Weak};

use log::{debug, trace, warn};
use parking_lot::Mutex;

use crate::components::facing::Facing;
use crate::components::layer::{LayerId, LayerPhase, LayerState, LayerTick};
use crate::components::mapposition::{MapLocation, MapPosition};
use crate::components::rotation::{Point, Rotation, rotate_point};
use crate::components::sprite::SpriteFrame;
use crate::components::tint::Color;
use crate::resources::animationstore::AnimationDefinition;
use crate::resources::audio::{MapSound, SoundFactory};
use crate::resources::registry::{AnimationId, AnimationRegistry, SharedAnimation};
use crate::resources::renderqueue::{BlendMode, LightDraw, RenderBackend, SpriteDraw};
use crate::resources::texturestore::{TextureCategory, TextureProvider};
use crate::resources::worldtime::Clock;

/// Audible distance, in tiles, for effect sounds.
pub const DEFAULT_SOUND_DISTANCE: i32 = 12;

/// Construction parameters chosen by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationOptions {
    /// Restart both layers forever instead of finishing.
    pub loop_forever: bool,
    /// Rotate sprites (and their lights) to match the facing.
    pub auto_rotate: bool,
    pub z: i32,
    pub sound_distance: i32,
}

impl AnimationOptions {
    pub fn new(loop_forever: bool) -> Self {
        Self {
            loop_forever,
            auto_rotate: false,
            z: -1,
            sound_distance: DEFAULT_SOUND_DISTANCE,
        }
    }

    pub fn with_auto_rotate(mut self, auto_rotate: bool) -> Self {
        self.auto_rotate = auto_rotate;
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn with_sound_distance(mut self, distance: i32) -> Self {
        self.sound_distance = distance;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstanceState {
    Active,
    Disposed,
}

pub struct AnimationInstance {
    id: AnimationId,
    definition: Arc<AnimationDefinition>,
    layers: [LayerState; 2],
    position: MapPosition,
    z: i32,
    /// `None` after an out-of-range direction; draws unrotated.
    facing: Option<Facing>,
    auto_rotate: bool,
    hidden: bool,
    infinite_loop: bool,
    sound: Option<Box<dyn MapSound>>,
    registry: Weak<AnimationRegistry>,
    state: InstanceState,
}

impl AnimationInstance {
    /// Build, start and register an instance of `definition`.
    ///
    /// Returns `None` without registering anything when `definition` is absent.
    pub fn spawn(
        definition: Option<Arc<AnimationDefinition>>,
        options: AnimationOptions,
        registry: &Arc<AnimationRegistry>,
        clock: &dyn Clock,
        sounds: &dyn SoundFactory,
    ) -> Option<SharedAnimation> {
        let Some(definition) = definition else {
            debug!("animation spawn skipped: no definition");
            return None;
        };

        let now = clock.now_ms();
        let layers = [
            LayerState::new(&definition.lower, now),
            LayerState::new(&definition.upper, now),
        ];
        let sound = definition.sound_name().and_then(|name| {
            sounds.create_map_sound(
                name,
                0,
                0,
                0,
                options.loop_forever,
                options.sound_distance,
            )
        });

        let id = registry.next_id();
        debug!(
            "spawn animation {} '{}' (loop_forever={}, auto_rotate={}, z={}, sound={})",
            id,
            definition.name,
            options.loop_forever,
            options.auto_rotate,
            options.z,
            sound.is_some()
        );
        let instance = Arc::new(Mutex::new(AnimationInstance {
            id,
            definition,
            layers,
            position: MapPosition::default(),
            z: options.z,
            facing: Some(Facing::default()),
            auto_rotate: options.auto_rotate,
            hidden: false,
            infinite_loop: options.loop_forever,
            sound,
            registry: Arc::downgrade(registry),
            state: InstanceState::Active,
        }));
        registry.register(id, Arc::clone(&instance));
        Some(instance)
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn state(&self) -> InstanceState {
        self.state
    }

    pub fn is_disposed(&self) -> bool {
        self.state == InstanceState::Disposed
    }

    pub fn layer(&self, id: LayerId) -> &LayerState {
        &self.layers[id.index()]
    }

    pub fn position(&self) -> MapPosition {
        self.position
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn facing(&self) -> Option<Facing> {
        self.facing
    }

    pub fn has_sound(&self) -> bool {
        self.sound.is_some()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Sprite rotation for the current facing. Zero without a valid facing.
    pub fn rotation(&self) -> Rotation {
        self.facing
            .map(|facing| facing.rotation(self.auto_rotate))
            .unwrap_or_default()
    }

    /// Advance both layers against `clock` and dispose when both are done.
    pub fn update(&mut self, clock: &dyn Clock) -> InstanceState {
        if self.is_disposed() {
            return self.state;
        }
        if let Some(sound) = self.sound.as_mut() {
            sound.update();
        }
        let now = clock.now_ms();
        for id in LayerId::ALL {
            let layer = self.definition.layer(id);
            if self.layers[id.index()].tick(layer, now, self.infinite_loop) == LayerTick::Finished {
                trace!("animation {} {:?} layer finished at {}ms", self.id, id, now);
            }
        }
        if self.layers.iter().all(|l| l.phase == LayerPhase::Finished) {
            debug!("animation {} '{}' finished", self.id, self.definition.name);
            self.dispose();
        }
        self.state
    }

    /// Draw the layer belonging to `pass`, with its light.
    ///
    /// A missing texture skips the sprite but still submits the light.
    pub fn draw(&self, pass: LayerId, textures: &dyn TextureProvider, out: &mut dyn RenderBackend) {
        if self.hidden || self.is_disposed() {
            return;
        }
        let state = &self.layers[pass.index()];
        if !state.is_playing() {
            return;
        }
        let layer = self.definition.layer(pass);
        let rotation = self.rotation();

        if let Some(texture) = textures.texture(TextureCategory::Animation, &layer.sprite) {
            if let Some(frame) = SpriteFrame::project(
                state.frame_index,
                layer.x_frames,
                layer.y_frames,
                texture.width,
                texture.height,
                self.position.x,
                self.position.y,
            ) {
                out.draw_texture(SpriteDraw {
                    category: TextureCategory::Animation,
                    texture: layer.sprite.clone(),
                    src: frame.src,
                    dest: frame.dest,
                    tint: Color::WHITE,
                    blend: BlendMode::None,
                    rotation_degrees: rotation.degrees,
                });
            }
        }

        let Some(light) = layer.light(state.frame_index) else {
            trace!(
                "animation {} {:?} frame {} has no light",
                self.id, pass, state.frame_index
            );
            return;
        };
        let offset = rotate_point(
            Point::new(light.offset_x, light.offset_y),
            Point::default(),
            rotation.light_degrees(),
        );
        out.add_light(LightDraw {
            x: self.position.x as i32 - offset.x,
            y: self.position.y as i32 - offset.y,
            size: light.size,
            intensity: light.intensity,
            expand: light.expand,
            color: light.color,
        });
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn set_auto_rotate(&mut self, auto_rotate: bool) {
        self.auto_rotate = auto_rotate;
    }

    /// Move the effect and its sound.
    ///
    /// A negative `dir` keeps the current facing.
    pub fn set_position(
        &mut self,
        world_x: f32,
        world_y: f32,
        location: MapLocation,
        dir: i32,
        z: i32,
    ) {
        self.position = MapPosition::new(world_x, world_y);
        if let Some(sound) = self.sound.as_mut() {
            sound.update_position(location.tile_x, location.tile_y, location.map_id);
        }
        if dir >= 0 {
            self.set_dir(dir);
        }
        self.z = z;
    }

    /// Set the facing. Values outside `0..=7` leave the effect unrotated.
    pub fn set_dir(&mut self, dir: i32) {
        self.facing = Facing::from_index(dir);
        if self.facing.is_none() {
            warn!("animation {}: invalid facing {}, drawing unrotated", self.id, dir);
        }
    }

    /// Stop the sound and leave the registry. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.state = InstanceState::Disposed;
        let sound = self.sound.take();
        match self.registry.upgrade() {
            Some(registry) => {
                registry.unregister(self.id, sound);
            }
            None => {
                if let Some(mut sound) = sound {
                    sound.stop();
                }
            }
        }
        debug!("animation {} disposed", self.id);
    }
}

impl Drop for AnimationInstance {
    fn drop(&mut self) {
        if let Some(mut sound) = self.sound.take() {
            sound.stop();
        }
    }
}

impl fmt::Debug for AnimationInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationInstance")
            .field("id", &self.id)
            .field("definition", &self.definition.name)
            .field("layers", &self.layers)
            .field("position", &self.position)
            .field("z", &self.z)
            .field("facing", &self.facing)
            .field("auto_rotate", &self.auto_rotate)
            .field("hidden", &self.hidden)
            .field("infinite_loop", &self.infinite_loop)
            .field("has_sound", &self.sound.is_some())
            .field("state", &self.state)
            .finish()
    }
}
