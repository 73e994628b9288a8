//! Effect draw passes.
//!
//! Lower layers go under actors and upper layers over them, so the renderer
//! runs two passes. Each pass walks a snapshot of the live effects and
//! records sprites and lights into the [`RenderQueue`].

use bevy_ecs::prelude::*;

use crate::components::layer::LayerId;
use crate::resources::registry::LiveAnimations;
use crate::resources::renderqueue::RenderQueue;
use crate::resources::texturestore::TextureStore;

/// Drop last frame's commands. Runs first in the frame.
pub fn clear_render_queue(mut queue: ResMut<RenderQueue>) {
    queue.commands.clear();
}

/// Draw one pass of every live effect into `queue`.
pub fn render_pass(
    live: &LiveAnimations,
    textures: &TextureStore,
    queue: &mut RenderQueue,
    pass: LayerId,
) {
    for animation in live.snapshot() {
        animation.lock().draw(pass, textures, queue);
    }
}

pub fn render_lower_pass(
    live: Res<LiveAnimations>,
    textures: Res<TextureStore>,
    mut queue: ResMut<RenderQueue>,
) {
    render_pass(&live, &textures, &mut queue, LayerId::Lower);
}

pub fn render_upper_pass(
    live: Res<LiveAnimations>,
    textures: Res<TextureStore>,
    mut queue: ResMut<RenderQueue>,
) {
    render_pass(&live, &textures, &mut queue, LayerId::Upper);
}
