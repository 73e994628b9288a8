//! Effect playback system.
//!
//! [`update_live_animations`] advances every registered effect once per
//! frame against [`WorldTime`]. Effects that finish during the update remove
//! themselves from the registry; the snapshot keeps them alive until the
//! loop is done with them.
//!
//! # Related
//!
//! - [`crate::components::animationinstance::AnimationInstance`] – per-effect state
//! - [`crate::resources::registry::LiveAnimations`] – the shared live set
//! - [`crate::systems::render`] – the matching draw passes

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::animationinstance::InstanceState;
use crate::resources::registry::LiveAnimations;
use crate::resources::worldtime::WorldTime;

/// Advance all live effects.
///
/// The registry lock is held only to take the snapshot.
pub fn update_live_animations(live: Res<LiveAnimations>, time: Res<WorldTime>) {
    let mut finished = 0;
    for animation in live.snapshot() {
        if animation.lock().update(&*time) == InstanceState::Disposed {
            finished += 1;
        }
    }
    if finished > 0 {
        trace!("{} animations finished at {}ms", finished, time.elapsed_ms);
    }
}
