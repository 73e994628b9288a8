//! Render output.
//!
//! Effects do not talk to a graphics API directly. They issue sprite draws
//! and light submissions to a [`RenderBackend`]. [`RenderQueue`] is the ECS
//! resource implementation: it records [`DrawCommand`]s for the frame so the
//! real renderer (or a test) can consume them in order.

use bevy_ecs::prelude::Resource;

use crate::components::sprite::Rect;
use crate::components::tint::Color;
use crate::resources::texturestore::TextureCategory;

/// Blending applied to a sprite draw. Effects draw unblended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    #[default]
    None,
}

/// One textured quad.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteDraw {
    pub category: TextureCategory,
    pub texture: String,
    pub src: Rect,
    pub dest: Rect,
    pub tint: Color,
    pub blend: BlendMode,
    /// Clockwise, around the center of `dest`.
    pub rotation_degrees: f32,
}

/// One point light in world pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct LightDraw {
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub intensity: u8,
    pub expand: f32,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Sprite(SpriteDraw),
    Light(LightDraw),
}

pub trait RenderBackend {
    fn draw_texture(&mut self, draw: SpriteDraw);
    fn add_light(&mut self, light: LightDraw);
}

#[derive(Resource, Debug, Default)]
pub struct RenderQueue {
    pub commands: Vec<DrawCommand>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every command recorded since the last drain.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn sprites(&self) -> impl Iterator<Item = &SpriteDraw> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(s) => Some(s),
            DrawCommand::Light(_) => None,
        })
    }

    pub fn lights(&self) -> impl Iterator<Item = &LightDraw> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Light(l) => Some(l),
            DrawCommand::Sprite(_) => None,
        })
    }
}

impl RenderBackend for RenderQueue {
    fn draw_texture(&mut self, draw: SpriteDraw) {
        self.commands.push(DrawCommand::Sprite(draw));
    }

    fn add_light(&mut self, light: LightDraw) {
        self.commands.push(DrawCommand::Light(light));
    }
}
