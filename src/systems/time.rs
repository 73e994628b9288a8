//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance elapsed time on the `WorldTime` resource.
///
/// `dt_ms` is the unscaled frame delta. Fractions of a millisecond carry over
/// to later frames, so small scales still move the clock.
pub fn update_world_time(world: &mut World, dt_ms: u64) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled = (dt_ms as f64 * wt.time_scale as f64).max(0.0);
    wt.elapsed += scaled;
    wt.elapsed_ms = wt.elapsed.floor() as u64;
    wt.frame_count += 1;
}
